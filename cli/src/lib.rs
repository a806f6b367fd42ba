//! Command-line front-end for linting a Terraform stack against naming and
//! positioning rule sets.
//!
//! Control flows one way through the modules:
//!
//! - **[`args`]**: CLI surface. Path flags are checked by [`validators`]
//!   while parsing, so nothing downstream sees an unchecked path.
//! - **[`logging`]**: Installs the process-wide `tracing` subscriber once.
//! - **[`lint`]**: Opens the [`tflint_engine::Stack`], validates it and maps
//!   the outcome to stdout and an [`exit_codes`] value.

pub mod args;
pub mod exit_codes;
pub mod lint;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validators;
