//! CLI route: run context and command dispatch.

use crate::cli::parse::{Commands, RunArgs};
use crate::config::{ConfigLoader, MultiLogConfig};
use crate::error::ConfigError;
use crate::mirror::{ConsoleMirror, LiveMirror};
use crate::session::SessionLog;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Runtime context for CLI execution: the loaded configuration.
pub struct RunContext {
    config: MultiLogConfig,
    config_path: Option<PathBuf>,
}

impl RunContext {
    /// Load configuration from the optional file and the environment.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Ok(Self::from_config(config, config_path))
    }

    pub fn from_config(config: MultiLogConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    pub fn config(&self) -> &MultiLogConfig {
        &self.config
    }

    /// Execute a command and return its output for stdout.
    pub fn execute(&self, command: &Commands) -> Result<String, ConfigError> {
        match command {
            Commands::Run(args) => self.run_session(args),
            Commands::Config => self.config.to_toml(),
        }
    }

    fn run_session(&self, args: &RunArgs) -> Result<String, ConfigError> {
        let mut config = self.config.clone();
        apply_overrides(&mut config, args);
        config.validate()?;

        let mut host = config.host.clone();
        if host.startup_summary.is_none() {
            host.startup_summary = Some(render_startup_summary(&config, args, self.config_path.as_ref()));
        }

        let mirror: Option<Box<dyn LiveMirror>> = if config.capabilities.interactive {
            Some(Box::new(ConsoleMirror::new(config.logging.color)))
        } else {
            None
        };

        let mut log = SessionLog::from_config(&config, mirror);
        log.start(&host);
        info!(
            duration_secs = args.duration,
            tick_ms = args.tick_ms,
            active = log.is_active(),
            "session running"
        );

        let tick = Duration::from_millis(args.tick_ms.max(1));
        let deadline = run_deadline(Instant::now(), args.duration);
        if deadline.is_none() {
            debug!(duration_secs = args.duration, "duration out of range, running until killed");
        }
        loop {
            let sleep_for = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    tick.min(deadline - now)
                }
                None => tick,
            };
            std::thread::sleep(sleep_for);
            log.poll_now();
        }

        // Captured before stop: a per-session file name depends on the session id.
        let written_to = log.log_path();
        log.stop();

        if let Some(path) = written_to {
            Ok(format!("Session log written to {}", path.display()))
        } else {
            Ok(format!(
                "Session log disabled: could not open {}",
                config.session.file.display()
            ))
        }
    }
}

/// When a run of `secs` seconds starting at `start` ends. `None` when the
/// instant is not representable; the run then has no deadline.
fn run_deadline(start: Instant, secs: u64) -> Option<Instant> {
    start.checked_add(Duration::from_secs(secs))
}

/// Apply `run` flags on top of the loaded configuration.
pub fn apply_overrides(config: &mut MultiLogConfig, args: &RunArgs) {
    if let Some(ref path) = args.log_path {
        config.session.file = path.clone();
    }
    if let Some(secs) = args.report_interval_secs {
        config.session.report_interval_secs = secs;
    }
    if let Some(ref product) = args.product {
        config.session.product = product.clone();
    }
    if args.interactive {
        config.capabilities.interactive = true;
    }
    if args.headless {
        config.capabilities.headless = true;
    }
    if args.echo {
        config.session.echo_to_debug = true;
    }
}

fn render_startup_summary(
    config: &MultiLogConfig,
    args: &RunArgs,
    config_path: Option<&PathBuf>,
) -> String {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    let config_file = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    let lines = [
        "Startup options:".to_string(),
        format!("  config file: {}", config_file),
        format!("  session duration: {}s", args.duration),
        format!("  poll interval: {}ms", args.tick_ms),
        format!("  report interval: {}s", config.session.report_interval_secs),
        format!("  interactive: {}", yes_no(config.capabilities.interactive)),
        format!("  headless: {}", yes_no(config.capabilities.headless)),
    ];
    lines.join("\n")
}
