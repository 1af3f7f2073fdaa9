//! Translation State
//!
//! Abstract lifecycle state of a trans-unit and its per-dialect native tokens.
//! Reading a native token never fails; unknown or absent tokens read as `New`.

use crate::error::I18nError;
use crate::i18n::parsers::DialectKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationState {
    New,
    Translated,
    Final,
}

impl TranslationState {
    pub const ALL: [TranslationState; 3] = [
        TranslationState::New,
        TranslationState::Translated,
        TranslationState::Final,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TranslationState::New => "new",
            TranslationState::Translated => "translated",
            TranslationState::Final => "final",
        }
    }

    /// Native token written for this state, `None` for dialects without one.
    pub fn to_native(self, dialect: DialectKind) -> Option<&'static str> {
        match dialect {
            DialectKind::Xliff => Some(self.as_str()),
            DialectKind::Xliff2 => Some(match self {
                TranslationState::New => "initial",
                TranslationState::Translated => "translated",
                TranslationState::Final => "final",
            }),
            DialectKind::Xmb => None,
        }
    }

    /// Lenient inverse of `to_native`.
    pub fn from_native(token: Option<&str>, dialect: DialectKind) -> TranslationState {
        let Some(token) = token else {
            return TranslationState::New;
        };
        let state = match dialect {
            DialectKind::Xliff => match token {
                "new" | "needs-translation" | "needs-adaptation" | "needs-l10n" => {
                    Some(TranslationState::New)
                }
                "translated"
                | "needs-review-translation"
                | "needs-review-adaptation"
                | "needs-review-l10n" => Some(TranslationState::Translated),
                "final" | "signed-off" => Some(TranslationState::Final),
                _ => None,
            },
            DialectKind::Xliff2 => match token {
                "initial" => Some(TranslationState::New),
                "translated" | "reviewed" => Some(TranslationState::Translated),
                "final" => Some(TranslationState::Final),
                _ => None,
            },
            DialectKind::Xmb => Some(TranslationState::New),
        };
        state.unwrap_or_else(|| {
            warn!(token, dialect = ?dialect, "unknown translation state, reading as new");
            TranslationState::New
        })
    }
}

impl fmt::Display for TranslationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationState {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(TranslationState::New),
            "translated" => Ok(TranslationState::Translated),
            "final" => Ok(TranslationState::Final),
            other => Err(I18nError::InvalidState(other.to_string())),
        }
    }
}
