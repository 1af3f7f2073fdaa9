//! Error Module
//!
//! Error taxonomy shared by the XML arena, the message parsers and the trans-units.

use std::fmt;
use thiserror::Error;

/// Malformed or mismatched marker nesting found while normalizing a message.
///
/// Never repaired: the parse call that raised it produces no message at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupError {
    pub message: String,
    /// Ordinal of the offending node within the walked fragment, or the byte
    /// offset when the input was a display string.
    pub position: usize,
    pub tag: Option<String>,
    /// Set once the error leaves a trans-unit accessor.
    pub unit_id: Option<String>,
}

impl MarkupError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        MarkupError {
            message: message.into(),
            position,
            tag: None,
            unit_id: None,
        }
    }

    pub fn unexpected_close(tag: &str, position: usize) -> Self {
        MarkupError {
            tag: Some(tag.to_string()),
            ..MarkupError::new(format!("unexpected close tag <{}>", tag), position)
        }
    }

    pub fn unterminated(tag: &str, position: usize) -> Self {
        MarkupError {
            tag: Some(tag.to_string()),
            ..MarkupError::new(format!("unterminated tag <{}>", tag), position)
        }
    }

    pub fn in_unit(mut self, unit_id: &str) -> Self {
        self.unit_id = Some(unit_id.to_string());
        self
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message, self.position)?;
        if let Some(id) = &self.unit_id {
            write!(f, " in trans-unit \"{}\"", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for MarkupError {}

/// Native XML handed in by a caller could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed xml at {position}: {message}")]
pub struct XmlError {
    pub message: String,
    pub position: usize,
}

impl XmlError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        XmlError {
            message: message.into(),
            position,
        }
    }
}

#[derive(Debug, Error)]
pub enum I18nError {
    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error("invalid translation state \"{0}\"")]
    InvalidState(String),

    #[error("note origin \"{origin}\" is reserved and cannot be set as a note")]
    Validation { origin: String },

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl I18nError {
    /// Attaches the trans-unit id to markup errors; other errors pass through.
    pub fn in_unit(self, unit_id: &str) -> Self {
        match self {
            I18nError::Markup(err) => I18nError::Markup(err.in_unit(unit_id)),
            other => other,
        }
    }
}

pub type Result<T, E = I18nError> = std::result::Result<T, E>;
