//! Hub configuration.
//!
//! ```json
//! { "lookup": "present", "filename": "src/services.rs" }
//! ```
//!
//! Both keys are optional. Unknown keys are rejected.

use crate::invoker::Lookup;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration of a [`ServiceHub`](crate::ServiceHub).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct HubConfig {
    /// How property lookups decide that a segment resolved.
    #[serde(default)]
    pub lookup: Lookup,

    /// Source file name mixed into derived service ids.
    #[serde(default)]
    pub filename: Option<String>,
}

impl HubConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the lookup rule.
    pub fn with_lookup(mut self, lookup: Lookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Set the file name used for derived ids.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not valid configuration JSON.
    #[error("failed to parse hub config: {0}")]
    Json(#[from] serde_json::Error),
}
