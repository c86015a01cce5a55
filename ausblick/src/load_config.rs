/// `load_config` module: Loads a static YAML config into the internal ReportConfig.
///
/// This module is the only place where untrusted YAML is parsed and mapped to
/// rich, strongly-typed internal structs.
///
/// # Responsibilities
/// - Parse user-supplied YAML configuration files into type-safe Rust structs
/// - Apply defaults for omitted keys (title, model, timeout)
/// - Ensure robust error messages for CLI and tests: any failure in loading
///   must result in clear diagnostics.
/// - Acts as the adapter layer decoupling input schemas from the domain core
///
/// Secrets (the generation API key) are never part of this file; they are
/// sourced from the process environment by the client at startup.
///
/// # Errors
/// All errors in this module use `anyhow::Error` for context-rich
/// diagnostics, and are surfaced at the CLI boundary.
///
/// ---
///
/// Internal implementation begins below.
///
use anyhow::Result;
use ausblick_core::config::ReportConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ReportConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    #[derive(Debug, Deserialize)]
    struct RawConfig {
        #[serde(default)]
        report: ReportConfig,
    }

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    Ok(raw.report)
}
