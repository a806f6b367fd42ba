//! Deterministic checks over scanned Terraform blocks.
//!
//! Nothing in here touches the filesystem; the scanner in [`crate::io`] feeds
//! these functions already-parsed [`block::Block`] values.

pub mod block;
pub mod checks;
pub mod violation;
