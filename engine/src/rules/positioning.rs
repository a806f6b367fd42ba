//! Positioning rules: which file a block belongs in.
//!
//! Keys are either a block keyword (`variable`, `output`, ...) or a resource
//! type; resource types win over the generic `resource` key.
//!
//! ```yaml
//! provider: provider.tf
//! variable: variables.tf
//! output: outputs.tf
//! aws_instance: compute.tf
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::core::block::{Block, BlockKind};
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositioningRules {
    placements: BTreeMap<String, String>,
}

impl PositioningRules {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = super::read_rules(path)?;
        let rules = Self::parse(&contents).map_err(|reason| EngineError::InvalidPositioning {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(path = %path.display(), rules = rules.placements.len(), "positioning rules loaded");
        Ok(rules)
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, String> {
        let placements: Option<BTreeMap<String, String>> =
            serde_yaml::from_str(contents).map_err(|err| err.to_string())?;
        let placements = placements.ok_or_else(|| "document is empty".to_string())?;
        if placements.is_empty() {
            return Err("no placements defined".to_string());
        }
        for (key, file) in &placements {
            if key.trim().is_empty() {
                return Err("empty key".to_string());
            }
            validate_file_name(key, file)?;
        }
        Ok(Self { placements })
    }

    /// File the block is required to live in, if any rule covers it.
    pub fn expected_file(&self, block: &Block) -> Option<&str> {
        let by_type = match block.kind {
            BlockKind::Resource => block
                .resource_type()
                .and_then(|resource_type| self.placements.get(resource_type)),
            _ => None,
        };
        by_type
            .or_else(|| self.placements.get(block.kind.keyword()))
            .map(String::as_str)
    }
}

fn validate_file_name(key: &str, file: &str) -> std::result::Result<(), String> {
    if !file.ends_with(".tf") || file.len() <= ".tf".len() {
        return Err(format!("'{key}' must map to a .tf file name (got '{file}')"));
    }
    if file.contains('/') || file.contains('\\') {
        return Err(format!("'{key}' must map to a bare file name (got '{file}')"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(keyword: &str, labels: &[&str]) -> Block {
        Block::new(
            BlockKind::from_keyword(keyword),
            labels.iter().map(|label| label.to_string()).collect(),
            "main.tf",
            1,
        )
    }

    #[test]
    fn resource_type_overrides_generic_resource_key() {
        let rules = PositioningRules::parse(
            "resource: main.tf\naws_instance: compute.tf\nvariable: variables.tf\n",
        )
        .expect("parse");
        assert_eq!(
            rules.expected_file(&block("resource", &["aws_instance", "web"])),
            Some("compute.tf")
        );
        assert_eq!(
            rules.expected_file(&block("resource", &["aws_vpc", "main"])),
            Some("main.tf")
        );
        assert_eq!(
            rules.expected_file(&block("variable", &["region"])),
            Some("variables.tf")
        );
        assert_eq!(rules.expected_file(&block("output", &["id"])), None);
    }

    #[test]
    fn parse_rejects_non_tf_targets() {
        let err = PositioningRules::parse("variable: vars.yaml\n").expect_err("bad target");
        assert!(err.contains("variable"));
        assert!(PositioningRules::parse("variable: nested/vars.tf\n").is_err());
    }

    #[test]
    fn parse_rejects_non_mapping_documents() {
        assert!(PositioningRules::parse("- a\n- b\n").is_err());
        assert!(PositioningRules::parse("").is_err());
        assert!(PositioningRules::parse("{}\n").is_err());
    }
}
