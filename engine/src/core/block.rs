use std::collections::BTreeMap;
use std::fmt;

/// Top-level Terraform block keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Resource,
    Data,
    Provider,
    Variable,
    Output,
    Module,
    Locals,
    Terraform,
    Other(String),
}

impl BlockKind {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "resource" => BlockKind::Resource,
            "data" => BlockKind::Data,
            "provider" => BlockKind::Provider,
            "variable" => BlockKind::Variable,
            "output" => BlockKind::Output,
            "module" => BlockKind::Module,
            "locals" => BlockKind::Locals,
            "terraform" => BlockKind::Terraform,
            other => BlockKind::Other(other.to_string()),
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            BlockKind::Resource => "resource",
            BlockKind::Data => "data",
            BlockKind::Provider => "provider",
            BlockKind::Variable => "variable",
            BlockKind::Output => "output",
            BlockKind::Module => "module",
            BlockKind::Locals => "locals",
            BlockKind::Terraform => "terraform",
            BlockKind::Other(keyword) => keyword,
        }
    }

    /// Kinds whose first label is a provider type (`aws_instance`).
    pub fn is_typed(&self) -> bool {
        matches!(self, BlockKind::Resource | BlockKind::Data)
    }
}

/// One top-level block found in a Terraform file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub labels: Vec<String>,
    /// File name relative to the stack directory.
    pub file: String,
    /// 1-based line of the block header.
    pub line: usize,
    /// String-literal attributes keyed by dotted path (`tags.Name`).
    pub attributes: BTreeMap<String, String>,
}

impl Block {
    pub fn new(kind: BlockKind, labels: Vec<String>, file: &str, line: usize) -> Self {
        Self {
            kind,
            labels,
            file: file.to_string(),
            line,
            attributes: BTreeMap::new(),
        }
    }

    /// Provider type for `resource`/`data` blocks.
    pub fn resource_type(&self) -> Option<&str> {
        if self.kind.is_typed() {
            self.labels.first().map(String::as_str)
        } else {
            None
        }
    }

    /// Local name: second label of typed blocks, first label otherwise.
    pub fn name(&self) -> Option<&str> {
        let index = if self.kind.is_typed() { 1 } else { 0 };
        self.labels.get(index).map(String::as_str)
    }

    pub fn attribute(&self, path: &str) -> Option<&str> {
        self.attributes.get(path).map(String::as_str)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.keyword())?;
        for label in &self.labels {
            write!(f, " \"{label}\"")?;
        }
        Ok(())
    }
}
