//! Naming and positioning checks.

use crate::core::block::Block;
use crate::core::violation::Violation;
use crate::rules::naming::NamingRules;
use crate::rules::positioning::PositioningRules;

/// Check every block in order; per block, positioning comes before naming.
pub fn check_blocks(
    blocks: &[Block],
    naming: &NamingRules,
    positioning: &PositioningRules,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for block in blocks {
        violations.extend(check_positioning(block, positioning));
        violations.extend(check_naming(block, naming));
    }
    violations
}

/// Apply the rule for the block's type to its name and to any covered fields.
///
/// Field rules only fire when the attribute is present as a string literal.
pub fn check_naming(block: &Block, rules: &NamingRules) -> Vec<Violation> {
    let Some(rule) = block.resource_type().and_then(|ty| rules.rule_for(ty)) else {
        return Vec::new();
    };
    let mut violations = Vec::new();
    let name = block.name().unwrap_or_default();
    if !rule.regex.is_match(name) {
        violations.push(Violation::Naming {
            file: block.file.clone(),
            line: block.line,
            block: block.to_string(),
            regex: rule.regex.as_str().to_string(),
        });
    }
    for field in &rule.fields {
        let Some(value) = block.attribute(&field.path) else {
            continue;
        };
        if !field.regex.is_match(value) {
            violations.push(Violation::Field {
                file: block.file.clone(),
                line: block.line,
                block: block.to_string(),
                field: field.path.clone(),
                value: value.to_string(),
                regex: field.regex.as_str().to_string(),
            });
        }
    }
    violations
}

pub fn check_positioning(block: &Block, rules: &PositioningRules) -> Option<Violation> {
    let expected = rules.expected_file(block)?;
    if expected == block.file {
        return None;
    }
    Some(Violation::Positioning {
        file: block.file.clone(),
        line: block.line,
        block: block.to_string(),
        expected: expected.to_string(),
    })
}
