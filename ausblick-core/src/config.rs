use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_TITLE: &str = "Volkswirtschaftlicher Ausblick";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Report configuration - document title, generation model and call timeout.
///
/// Credentials are never part of this struct; they are sourced from the
/// process environment at startup by the client implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Upper bound for the generation call. A call exceeding it fails,
    /// it never hangs the pipeline.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ReportConfig {
    pub fn trace_loaded(&self) {
        info!(
            title = %self.title,
            model = %self.model,
            timeout_secs = self.timeout_secs,
            "Loaded ReportConfig"
        );
        debug!(?self, "ReportConfig loaded (full debug)");
    }
}
