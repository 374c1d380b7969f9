//! Merge rules: defaults, override order.

use crate::session::{DEFAULT_PRODUCT, DEFAULT_REPORT_INTERVAL_SECS};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources (file, environment) override these.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    let log_file = crate::config::default_log_file();
    Config::builder()
        .set_default("session.product", DEFAULT_PRODUCT)?
        .set_default("session.file", log_file.to_string_lossy().into_owned())?
        .set_default(
            "session.report_interval_secs",
            DEFAULT_REPORT_INTERVAL_SECS as i64,
        )
}
