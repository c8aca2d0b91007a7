//! Pipeline configuration, loaded from TOML.
//!
//! ```toml
//! [execution]
//! on_errors = "refuse"
//! ```

use serde::Deserialize;

/// Top-level configuration. Every field has a default, so an empty
/// document is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub execution: ExecutionConfig,
}

/// The `[execution]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutionConfig {
    pub on_errors: OnErrors,
}

/// What `execute` does when the last analysis reported diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnErrors {
    /// Refuse to execute an invalid program.
    #[default]
    Refuse,
    /// Execute anyway, first well-formed matching case wins.
    Run,
}

impl Config {
    /// Parse a configuration document.
    pub fn from_toml(content: &str) -> Result<Config, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// A configuration that executes programs even when they have errors.
    pub fn permissive() -> Self {
        Config {
            execution: ExecutionConfig {
                on_errors: OnErrors::Run,
            },
        }
    }
}
