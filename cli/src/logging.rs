//! Process-wide diagnostics via `tracing`.
//!
//! Diagnostics go to stderr by default and never mix with the lint report on
//! stdout. The subscriber is installed exactly once per run by [`init`]; the
//! returned [`LoggingContext`] records what was installed.
//!
//! Without `--log-config` a single `fmt` layer is installed at the
//! `--log-level` threshold, printing timestamp, level, target and message.
//! With `--log-config FILE` the file replaces that default wholesale:
//!
//! ```toml
//! filter = "tflint_engine=debug,info"
//! format = "json"      # full | compact | pretty | json
//! writer = "stderr"    # stderr | stdout
//! ansi = false
//! target = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use serde::Deserialize;
use tracing::Subscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::ResolvedConfig;

/// Severity threshold accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    /// Same threshold as `error`; `tracing` has nothing above ERROR.
    Critical,
}

impl LogLevel {
    /// `EnvFilter` directive for this threshold.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogWriter {
    #[default]
    Stderr,
    Stdout,
}

/// Structured logging configuration (JSON or TOML).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `EnvFilter` directives, e.g. `"info"` or `"tflint_engine=debug,warn"`.
    pub filter: String,
    pub format: LogFormat,
    pub writer: LogWriter,
    pub ansi: bool,
    /// Print the event target (the logger name).
    pub target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: LogLevel::Info.directive().to_string(),
            format: LogFormat::Full,
            writer: LogWriter::Stderr,
            ansi: true,
            target: true,
        }
    }
}

impl LogConfig {
    /// Default console handler at `level`.
    pub fn console(level: LogLevel) -> Self {
        Self {
            filter: level.directive().to_string(),
            ..Self::default()
        }
    }

    /// Load from `path`: `.json` files are JSON, anything else is TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: LogConfig = if is_json {
            serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))?
        } else {
            toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?
        };
        config
            .env_filter()
            .with_context(|| format!("validate {}", path.display()))?;
        Ok(config)
    }

    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.filter)
            .map_err(|err| anyhow!("invalid log filter '{}': {}", self.filter, err))
    }
}

/// Where the installed configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    /// Built-in console handler at the requested level.
    Console(LogLevel),
    /// User-supplied configuration file.
    File(PathBuf),
}

/// What [`init`] installed. Read-only once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingContext {
    pub source: LogSource,
    pub config: LogConfig,
}

impl LoggingContext {
    /// Decide what to install without touching global state.
    pub fn resolve(config: &ResolvedConfig) -> Result<Self> {
        match &config.log_config {
            Some(path) => Ok(Self {
                source: LogSource::File(path.clone()),
                config: LogConfig::load(path)?,
            }),
            None => Ok(Self {
                source: LogSource::Console(config.log_level),
                config: LogConfig::console(config.log_level),
            }),
        }
    }
}

/// Install the process-wide subscriber. Fails if one is already installed.
pub fn init(config: &ResolvedConfig) -> Result<LoggingContext> {
    let context = LoggingContext::resolve(config)?;
    install(&context.config)?;
    Ok(context)
}

fn install(config: &LogConfig) -> Result<()> {
    let filter = config.env_filter()?;
    tracing_subscriber::registry()
        .with(filter)
        .with(format_layer(config))
        .try_init()
        .context("install tracing subscriber")
}

fn format_layer<S>(config: &LogConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let writer = match config.writer {
        LogWriter::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogWriter::Stdout => BoxMakeWriter::new(std::io::stdout),
    };
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.ansi)
        .with_target(config.target);
    match config.format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}
