//! Stable exit codes for `tflint-cli`.

/// No violations found (also `--help` / `--version`).
pub const OK: i32 = 0;
/// Missing flag or a path that failed validation.
pub const USAGE: i32 = 1;
/// Naming or positioning rule file rejected by the engine.
pub const INVALID_RULES: i32 = 1;
/// The stack has at least one naming or positioning violation.
pub const VIOLATIONS: i32 = 1;
/// Unexpected failure (unreadable logging config, I/O while scanning, ...).
pub const ERROR: i32 = 1;
