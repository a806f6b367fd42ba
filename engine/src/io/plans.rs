//! Terraform file discovery inside a stack directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::block::Block;
use crate::error::{EngineError, Result};
use crate::io::scan::scan_source;

/// Top-level `*.tf` files in `dir`, sorted by file name.
///
/// Subdirectories are not descended into; modules are linted as their own stack.
pub fn discover_plans(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|err| EngineError::io(dir, err))?;
    let mut plans = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| EngineError::io(dir, err))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "tf") {
            plans.push(path);
        }
    }
    plans.sort();
    debug!(dir = %dir.display(), count = plans.len(), "discovered plans");
    Ok(plans)
}

/// Read and scan one plan file; blocks carry the bare file name.
pub fn load_blocks(path: &Path) -> Result<Vec<Block>> {
    let contents = fs::read_to_string(path).map_err(|err| EngineError::io(path, err))?;
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    scan_source(&file, &contents).map_err(|err| EngineError::InvalidPlan {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}
