//! Command-line surface and its resolution into [`ResolvedConfig`].

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use clap::Parser;

use crate::exit_codes;
use crate::logging::LogLevel;
use crate::validators::{readable_directory, readable_file};

#[derive(Parser, Debug)]
#[command(
    name = "tflint-cli",
    version,
    about = "Cli to lint naming conventions of terraform plans based on a provided rule set"
)]
struct Cli {
    /// The location of the logging config file (JSON, or TOML for other extensions).
    #[arg(short = 'l', long = "log-config", value_parser = readable_file)]
    log_config: Option<PathBuf>,

    /// Provide the log level.
    #[arg(short = 'L', long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Naming rules file.
    #[arg(short = 'n', long, value_name = "naming.yaml", value_parser = readable_file)]
    naming: PathBuf,

    /// Positioning rules file.
    #[arg(short = 'p', long, value_name = "positioning.yaml", value_parser = readable_file)]
    positioning: PathBuf,

    /// Directory of Terraform plans to lint.
    #[arg(short = 's', long, value_name = "tf_plans_dir", value_parser = readable_directory)]
    stack: PathBuf,
}

/// Fully-checked invocation settings. Every path was validated readable
/// while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub naming_rules: PathBuf,
    pub positioning_rules: PathBuf,
    pub stack: PathBuf,
    pub log_config: Option<PathBuf>,
    pub log_level: LogLevel,
}

impl Cli {
    fn into_config(self) -> ResolvedConfig {
        ResolvedConfig {
            naming_rules: self.naming,
            positioning_rules: self.positioning,
            stack: self.stack,
            log_config: self.log_config,
            log_level: self.log_level,
        }
    }
}

/// Parse `args` (including the binary name) into a [`ResolvedConfig`].
pub fn resolve<I, T>(args: I) -> Result<ResolvedConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map(Cli::into_config)
}

/// Print a parse failure the way `clap` renders it and pick the exit code.
///
/// Help and version output go to stdout and exit [`exit_codes::OK`]; every
/// real error goes to stderr and exits [`exit_codes::USAGE`].
pub fn report_usage_error(err: &clap::Error) -> i32 {
    usage_exit_code(err, err.print())
}

/// Falls back to plain stderr when `clap` could not write its rendering.
fn usage_exit_code(err: &clap::Error, printed: io::Result<()>) -> i32 {
    if printed.is_err() {
        eprintln!("{err}");
    }
    if err.use_stderr() {
        exit_codes::USAGE
    } else {
        exit_codes::OK
    }
}
