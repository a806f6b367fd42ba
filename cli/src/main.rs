//! `tflint-cli`: lint a directory of Terraform plans against naming and
//! positioning rule sets.

use std::io;
use std::process::exit;

use anyhow::Result;
use tflint_cli::args::{self, ResolvedConfig};
use tflint_cli::{exit_codes, lint, logging};
use tracing::debug;

fn main() {
    let config = match args::resolve(std::env::args_os()) {
        Ok(config) => config,
        Err(err) => exit(args::report_usage_error(&err)),
    };
    match run(&config) {
        Ok(code) => exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            exit(exit_codes::ERROR);
        }
    }
}

fn run(config: &ResolvedConfig) -> Result<i32> {
    let logging = logging::init(config)?;
    debug!(?logging, ?config, "logging initialized");
    let mut stdout = io::stdout().lock();
    lint::run(config, &mut stdout)
}
