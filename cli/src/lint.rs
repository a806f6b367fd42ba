//! Bridges a [`ResolvedConfig`] to the validation engine and to the user.
//!
//! Exactly one of three reports is printed per run: the invalid-rules
//! message, the violation list, or the success message.

use std::io::Write;

use anyhow::{Context, Result};
use colored::Colorize;
use tflint_engine::{EngineError, Stack, Violation};
use tracing::{info, warn};

use crate::args::ResolvedConfig;
use crate::exit_codes;

pub const INVALID_FILE_MESSAGE: &str = "Invalid file provided as argument";
pub const SUCCESS_MESSAGE: &str = "No naming convention or file positioning errors found!";

/// Abstraction over an opened validation engine.
///
/// [`Stack`] is the production implementation; tests use scripted linters.
pub trait Linter {
    /// Run the checks, replacing any previous results.
    fn validate(&mut self) -> std::result::Result<(), EngineError>;

    /// Violations from the last [`Linter::validate`], in engine order.
    fn errors(&self) -> &[Violation];
}

impl Linter for Stack {
    fn validate(&mut self) -> std::result::Result<(), EngineError> {
        Stack::validate(self)
    }

    fn errors(&self) -> &[Violation] {
        Stack::errors(self)
    }
}

/// Result of one lint run, before it is rendered.
#[derive(Debug)]
pub enum LintOutcome {
    /// The engine rejected a rule file; validation never ran.
    InvalidRules(EngineError),
    Violations(Vec<Violation>),
    Clean,
}

impl LintOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            LintOutcome::InvalidRules(_) => exit_codes::INVALID_RULES,
            LintOutcome::Violations(_) => exit_codes::VIOLATIONS,
            LintOutcome::Clean => exit_codes::OK,
        }
    }
}

/// Open the production engine.
pub fn open_stack(config: &ResolvedConfig) -> std::result::Result<Stack, EngineError> {
    Stack::new(
        &config.stack,
        &config.naming_rules,
        &config.positioning_rules,
    )
}

/// Open an engine with `open`, validate, and classify the result.
///
/// Rule-file rejections become [`LintOutcome::InvalidRules`]; any other
/// engine error is returned as an error.
pub fn lint_with<L, F>(config: &ResolvedConfig, open: F) -> Result<LintOutcome>
where
    L: Linter,
    F: FnOnce(&ResolvedConfig) -> std::result::Result<L, EngineError>,
{
    let mut linter = match open(config) {
        Ok(linter) => linter,
        Err(err) if err.is_invalid_rules() => {
            warn!(error = %err, "rule file rejected");
            return Ok(LintOutcome::InvalidRules(err));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("open stack {}", config.stack.display()));
        }
    };

    linter
        .validate()
        .with_context(|| format!("validate stack {}", config.stack.display()))?;
    let errors = linter.errors();
    info!(violations = errors.len(), "lint finished");
    if errors.is_empty() {
        Ok(LintOutcome::Clean)
    } else {
        Ok(LintOutcome::Violations(errors.to_vec()))
    }
}

/// Render `outcome` to `out` and return the process exit code.
pub fn report(outcome: &LintOutcome, out: &mut impl Write) -> Result<i32> {
    match outcome {
        LintOutcome::InvalidRules(_) => {
            writeln!(out, "{}", INVALID_FILE_MESSAGE.red().bold())?;
        }
        LintOutcome::Violations(violations) => {
            for violation in violations {
                writeln!(out, "{violation}")?;
            }
        }
        LintOutcome::Clean => {
            writeln!(out, "{}", SUCCESS_MESSAGE.green().bold())?;
        }
    }
    out.flush().context("flush report")?;
    Ok(outcome.exit_code())
}

/// Lint the configured stack with the production engine and report to `out`.
pub fn run(config: &ResolvedConfig, out: &mut impl Write) -> Result<i32> {
    let outcome = lint_with(config, open_stack)?;
    report(&outcome, out)
}
