//! Naming and file-positioning checks for a directory of Terraform files.
//!
//! The entry point is [`Stack`]: it loads a naming rule set and a positioning
//! rule set, and [`Stack::validate`] scans every `*.tf` file in the stack
//! directory, collecting one [`Violation`] per breach.
//!
//! - **[`core`]**: Pure checks over already-scanned blocks. No I/O.
//! - **[`io`]**: Plan discovery and HCL parsing into blocks.
//! - **[`rules`]**: Rule set loading and semantic validation.

pub mod core;
pub mod error;
pub mod io;
pub mod rules;
pub mod stack;

pub use crate::core::block::{Block, BlockKind};
pub use crate::core::violation::Violation;
pub use error::{EngineError, Result};
pub use rules::naming::NamingRules;
pub use rules::positioning::PositioningRules;
pub use stack::Stack;
