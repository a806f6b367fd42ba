//! Naming rules: one regex per resource type, plus optional per-attribute regexes.
//!
//! ```yaml
//! resources:
//!   - type: aws_instance
//!     regex: '^[a-z]+(_[a-z]+)*$'
//!     fields:
//!       - value: tags.Name
//!         regex: '^[a-z]+-[a-z]+$'
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NamingFile {
    resources: Vec<ResourceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResourceEntry {
    #[serde(rename = "type")]
    resource_type: String,
    regex: String,
    #[serde(default)]
    fields: Vec<FieldEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldEntry {
    value: String,
    regex: String,
}

#[derive(Debug, Clone)]
pub struct ResourceRule {
    pub resource_type: String,
    pub regex: Regex,
    pub fields: Vec<FieldRule>,
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Dotted attribute path inside the block.
    pub path: String,
    pub regex: Regex,
}

/// Compiled naming rules keyed by resource type.
#[derive(Debug, Clone)]
pub struct NamingRules {
    rules: BTreeMap<String, ResourceRule>,
}

impl NamingRules {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = super::read_rules(path)?;
        let rules = Self::parse(&contents).map_err(|reason| EngineError::InvalidNaming {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(path = %path.display(), rules = rules.len(), "naming rules loaded");
        Ok(rules)
    }

    /// Parse and compile rules; the error is a human-readable reason.
    pub fn parse(contents: &str) -> std::result::Result<Self, String> {
        let file: Option<NamingFile> =
            serde_yaml::from_str(contents).map_err(|err| err.to_string())?;
        let file = file.ok_or_else(|| "document is empty".to_string())?;
        if file.resources.is_empty() {
            return Err("'resources' must list at least one rule".to_string());
        }

        let mut rules = BTreeMap::new();
        for entry in file.resources {
            let resource_type = entry.resource_type.trim().to_string();
            if resource_type.is_empty() {
                return Err("resource 'type' must not be empty".to_string());
            }
            if rules.contains_key(&resource_type) {
                return Err(format!("duplicate rule for type '{resource_type}'"));
            }
            let regex = compile(&entry.regex, &resource_type)?;
            let fields = entry
                .fields
                .into_iter()
                .map(|field| {
                    if field.value.trim().is_empty() {
                        return Err(format!("empty field 'value' for type '{resource_type}'"));
                    }
                    Ok(FieldRule {
                        regex: compile(&field.regex, &resource_type)?,
                        path: field.value.trim().to_string(),
                    })
                })
                .collect::<std::result::Result<Vec<_>, String>>()?;
            rules.insert(
                resource_type.clone(),
                ResourceRule {
                    resource_type,
                    regex,
                    fields,
                },
            );
        }
        Ok(Self { rules })
    }

    pub fn rule_for(&self, resource_type: &str) -> Option<&ResourceRule> {
        self.rules.get(resource_type)
    }

    pub(crate) fn len(&self) -> usize {
        self.rules.len()
    }
}

fn compile(pattern: &str, resource_type: &str) -> std::result::Result<Regex, String> {
    Regex::new(pattern).map_err(|err| format!("bad regex for type '{resource_type}': {err}"))
}
