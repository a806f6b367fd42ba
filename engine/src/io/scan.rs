//! Terraform source → top-level [`Block`]s, via `hcl-edit`.
//!
//! Only what the checks need is kept: block keyword, labels, header line and
//! string-literal attributes. Attributes of nested blocks and object values
//! are flattened into dotted paths (`tags.Name`, `lifecycle.prevent_destroy`).
//! Template strings with interpolations have no literal value and are skipped.

use std::collections::BTreeMap;

use hcl_edit::Span;
use hcl_edit::expr::{Expression, ObjectKey};
use hcl_edit::parser::{self, parse_body};
use hcl_edit::structure::{self, BlockLabel, Body, Structure};

use crate::core::block::{Block, BlockKind};

/// Parse one file's source into its top-level blocks, in source order.
pub fn scan_source(file: &str, source: &str) -> Result<Vec<Block>, parser::Error> {
    let body = parse_body(source)?;
    let blocks = body
        .into_blocks()
        .map(|block| to_block(file, source, &block))
        .collect();
    Ok(blocks)
}

fn to_block(file: &str, source: &str, block: &structure::Block) -> Block {
    let labels = block
        .labels
        .iter()
        .map(|label| match label {
            BlockLabel::String(value) => value.value().to_string(),
            BlockLabel::Ident(ident) => ident.value().as_str().to_string(),
        })
        .collect();
    let offset = block
        .ident
        .span()
        .or_else(|| block.span())
        .map(|span| span.start)
        .unwrap_or_default();

    let mut scanned = Block::new(
        BlockKind::from_keyword(block.ident.value().as_str()),
        labels,
        file,
        line_at(source, offset),
    );
    collect_body(&block.body, "", &mut scanned.attributes);
    scanned
}

fn collect_body(body: &Body, prefix: &str, out: &mut BTreeMap<String, String>) {
    for structure in body.iter() {
        match structure {
            Structure::Attribute(attribute) => {
                let path = join(prefix, attribute.key.value().as_str());
                collect_expression(&path, &attribute.value, out);
            }
            Structure::Block(nested) => {
                let path = join(prefix, nested.ident.value().as_str());
                collect_body(&nested.body, &path, out);
            }
        }
    }
}

fn collect_expression(path: &str, expr: &Expression, out: &mut BTreeMap<String, String>) {
    match expr {
        Expression::String(value) => {
            out.entry(path.to_string())
                .or_insert_with(|| value.value().to_string());
        }
        Expression::Object(object) => {
            for (key, value) in object.iter() {
                let key = match key {
                    ObjectKey::Ident(ident) => ident.value().as_str().to_string(),
                    ObjectKey::Expression(Expression::String(name)) => name.value().to_string(),
                    ObjectKey::Expression(_) => continue,
                };
                collect_expression(&join(path, &key), value.expr(), out);
            }
        }
        _ => {}
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// 1-based line containing byte `offset`.
fn line_at(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end]
        .iter()
        .filter(|byte| **byte == b'\n')
        .count()
        + 1
}
