use std::fmt;

/// A single naming or positioning breach, printable as one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Block name does not match the rule for its type.
    Naming {
        file: String,
        line: usize,
        block: String,
        regex: String,
    },
    /// A named attribute does not match its field rule.
    Field {
        file: String,
        line: usize,
        block: String,
        field: String,
        value: String,
        regex: String,
    },
    /// Block lives in the wrong file.
    Positioning {
        file: String,
        line: usize,
        block: String,
        expected: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Naming {
                file,
                line,
                block,
                regex,
            } => write!(
                f,
                "{file}:{line}: naming convention not followed for {block}: name must match '{regex}'"
            ),
            Violation::Field {
                file,
                line,
                block,
                field,
                value,
                regex,
            } => write!(
                f,
                "{file}:{line}: naming convention not followed for {block}: field '{field}' value \"{value}\" must match '{regex}'"
            ),
            Violation::Positioning {
                file,
                line,
                block,
                expected,
            } => write!(
                f,
                "{file}:{line}: {block} is in {file} but should be in {expected}"
            ),
        }
    }
}
