//! Filesystem-facing helpers: plan discovery and block scanning.

pub mod plans;
pub mod scan;
