//! Test-only fixtures: on-disk stacks and a scripted engine.

use std::cell::Cell;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use tempfile::TempDir;
use tflint_engine::{EngineError, Violation};

use crate::lint::Linter;

pub const NAMING_RULES: &str = r#"resources:
  - type: aws_instance
    regex: '^[a-z]+(_[a-z]+)*$'
    fields:
      - value: tags.Name
        regex: '^[a-z]+-[a-z]+$'
  - type: aws_s3_bucket
    regex: '^[a-z]+(_[a-z]+)*$'
"#;

pub const POSITIONING_RULES: &str = "provider: provider.tf
variable: variables.tf
output: outputs.tf
resource: main.tf
";

pub const CONFORMANT_MAIN: &str = r#"resource "aws_instance" "web_server" {
  ami           = "ami-123456"
  instance_type = "t3.micro"

  tags = {
    Name = "web-server"
  }
}

resource "aws_s3_bucket" "logs" {
  bucket = "acme-logs"
}
"#;

pub const MISNAMED_MAIN: &str = r#"resource "aws_instance" "WebServer" {
  ami = "ami-123456"
}
"#;

/// A temp directory holding `naming.yaml`, `positioning.yaml` and an empty
/// `plans/` stack directory.
pub struct FixtureStack {
    temp: TempDir,
}

impl FixtureStack {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let fixture = Self { temp };
        fs::create_dir(fixture.stack_dir()).context("create plans dir")?;
        fixture.write_naming(NAMING_RULES)?;
        fixture.write_positioning(POSITIONING_RULES)?;
        Ok(fixture)
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn stack_dir(&self) -> PathBuf {
        self.root().join("plans")
    }

    pub fn naming_path(&self) -> PathBuf {
        self.root().join("naming.yaml")
    }

    pub fn positioning_path(&self) -> PathBuf {
        self.root().join("positioning.yaml")
    }

    pub fn write_naming(&self, contents: &str) -> Result<()> {
        fs::write(self.naming_path(), contents).context("write naming.yaml")
    }

    pub fn write_positioning(&self, contents: &str) -> Result<()> {
        fs::write(self.positioning_path(), contents).context("write positioning.yaml")
    }

    /// Write a Terraform file into the stack directory.
    pub fn write_plan(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.stack_dir().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Write an arbitrary file next to the rule files.
    pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Minimal valid argv (binary name first) using short flags.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "tflint-cli".into(),
            "-n".into(),
            self.naming_path().into(),
            "-p".into(),
            self.positioning_path().into(),
            "-s".into(),
            self.stack_dir().into(),
        ]
    }
}

/// Linter that reports a fixed list of violations once validated.
pub struct ScriptedLinter {
    scripted: Vec<Violation>,
    errors: Vec<Violation>,
    calls: Rc<Cell<u32>>,
}

impl ScriptedLinter {
    pub fn new(scripted: Vec<Violation>) -> Self {
        Self {
            scripted,
            errors: Vec::new(),
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Shared counter of `validate` calls.
    pub fn calls(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.calls)
    }
}

impl Linter for ScriptedLinter {
    fn validate(&mut self) -> std::result::Result<(), EngineError> {
        self.calls.set(self.calls.get() + 1);
        self.errors = self.scripted.clone();
        Ok(())
    }

    fn errors(&self) -> &[Violation] {
        &self.errors
    }
}

pub fn naming_violation(file: &str, line: usize, name: &str) -> Violation {
    Violation::Naming {
        file: file.to_string(),
        line,
        block: format!("resource \"aws_instance\" \"{name}\""),
        regex: "^[a-z]+$".to_string(),
    }
}
