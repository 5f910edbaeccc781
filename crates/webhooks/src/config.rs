//! Verification settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::timestamp::DEFAULT_TOLERANCE;
use crate::{Result, WebhookError};

/// Settings shared by symmetric and asymmetric webhooks.
///
/// Can be embedded in an application's TOML config:
///
/// ```toml
/// [webhooks]
/// tolerance_secs = 300
/// accept_alias_headers = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Allowed clock skew, in seconds, in either direction
    #[serde(default = "default_tolerance_secs")]
    pub tolerance_secs: u64,

    /// Also look for `svix-*` headers when `webhook-*` ones are absent
    #[serde(default = "default_true")]
    pub accept_alias_headers: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            tolerance_secs: default_tolerance_secs(),
            accept_alias_headers: true,
        }
    }
}

fn default_tolerance_secs() -> u64 {
    DEFAULT_TOLERANCE.as_secs()
}

fn default_true() -> bool {
    true
}

impl WebhookConfig {
    /// Parse from a TOML document; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| WebhookError::Config(e.to_string()))
    }

    /// Override the tolerance window.
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance_secs = tolerance.as_secs();
        self
    }

    /// Enable or disable the `svix-*` header aliases.
    pub fn with_alias_headers(mut self, accept: bool) -> Self {
        self.accept_alias_headers = accept;
        self
    }

    /// The tolerance window as a duration.
    pub fn tolerance(&self) -> Duration {
        Duration::from_secs(self.tolerance_secs)
    }
}
