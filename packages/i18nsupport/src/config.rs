//! Translation Configuration
//!
//! Settings the owning translation file hands to its trans-units.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Configuration read when a trans-unit synthesizes a target from its source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationConfig {
    /// Prepended to copied source content, e.g. `"[[ "`
    pub target_prefix: String,
    /// Appended to copied source content, e.g. `" ]]"`
    pub target_suffix: String,
}

impl TranslationConfig {
    pub fn new(target_prefix: impl Into<String>, target_suffix: impl Into<String>) -> Self {
        TranslationConfig {
            target_prefix: target_prefix.into(),
            target_suffix: target_suffix.into(),
        }
    }

    /// Reads a configuration from JSON. Missing keys default to empty strings.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
