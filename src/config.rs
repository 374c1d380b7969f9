//! Configuration System
//!
//! Hierarchical configuration for the session log and its host: built-in
//! defaults, then an optional TOML file, then `MULTILOG__*` environment
//! variables (`MULTILOG__SESSION__PRODUCT`, `MULTILOG__CAPABILITIES__HEADLESS`, ...).

use crate::diagnostics::StaticHostInfo;
use crate::error::ConfigError;
use crate::line::Capabilities;
use crate::logging::LoggingConfig;
use crate::session::{DEFAULT_PRODUCT, DEFAULT_REPORT_INTERVAL_SECS};
use crate::sink::FilePolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod config_file;
    pub mod environment;
}

pub use sources::environment::ENV_PREFIX;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiLogConfig {
    /// Session log settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Host capabilities (interactive operator, headless server)
    #[serde(default)]
    pub capabilities: Capabilities,

    /// Static host facts for the diagnostic snapshot
    #[serde(default)]
    pub host: StaticHostInfo,

    /// Process diagnostic logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Session log settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Product name used in banners and the version line
    #[serde(default = "default_product")]
    pub product: String,

    /// Session log file path
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Whether sessions share one file or get one each
    #[serde(default)]
    pub file_policy: FilePolicy,

    /// Seconds between uptime reports
    #[serde(default = "default_report_interval")]
    pub report_interval_secs: u64,

    /// Echo every session line to the diagnostic log at debug level
    #[serde(default)]
    pub echo_to_debug: bool,
}

fn default_product() -> String {
    DEFAULT_PRODUCT.to_string()
}

fn default_report_interval() -> u64 {
    DEFAULT_REPORT_INTERVAL_SECS
}

/// Default session log path: the platform data directory, or the working
/// directory when none can be resolved.
pub fn default_log_file() -> PathBuf {
    directories::ProjectDirs::from("", "", "multilog")
        .map(|dirs| dirs.data_dir().join("multilog.log"))
        .unwrap_or_else(|| PathBuf::from("multilog.log"))
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            product: default_product(),
            file: default_log_file(),
            file_policy: FilePolicy::default(),
            report_interval_secs: default_report_interval(),
            echo_to_debug: false,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.product.trim().is_empty() {
            errors.push("session.product cannot be empty".to_string());
        }
        if self.file.as_os_str().is_empty() {
            errors.push("session.file cannot be empty".to_string());
        }
        if self.report_interval_secs == 0 {
            errors.push("session.report_interval_secs must be positive".to_string());
        }
        errors
    }
}

impl MultiLogConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.session.validate();
        if let Err(e) = self.logging.validate() {
            errors.push(e);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Render as TOML, e.g. for `multilog config`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(format!("Failed to render config: {}", e)))
    }
}

/// Loads [`MultiLogConfig`] from defaults, a file and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load with the process environment. `path` is optional; a missing file
    /// is an error only when a path was given.
    pub fn load(path: Option<&Path>) -> Result<MultiLogConfig, ConfigError> {
        Self::load_from_sources(path, None)
    }

    /// Load a specific file with the process environment.
    pub fn load_from_file(path: &Path) -> Result<MultiLogConfig, ConfigError> {
        Self::load(Some(path))
    }

    /// Load with an explicit environment map instead of the process
    /// environment (`None` reads the process environment).
    pub fn load_from_sources(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<MultiLogConfig, ConfigError> {
        let mut builder = merge::merge_policy::builder_with_defaults()?;
        if let Some(path) = path {
            builder = sources::config_file::add_to_builder(builder, path)?;
        }
        builder = sources::environment::add_to_builder(builder, env);

        let config: MultiLogConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
