//! Rule set loading.
//!
//! Both rule files are YAML. Loading reports an I/O failure as
//! [`crate::EngineError::Io`] and anything wrong with the content as the
//! rule-specific invalid variant.

pub mod naming;
pub mod positioning;

use std::fs;
use std::path::Path;

use crate::error::{EngineError, Result};

fn read_rules(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| EngineError::io(path, err))
}
