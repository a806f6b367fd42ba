//! Stack entry point: rule loading plus whole-directory validation.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::core::checks::check_blocks;
use crate::core::violation::Violation;
use crate::error::Result;
use crate::io::plans::{discover_plans, load_blocks};
use crate::rules::naming::NamingRules;
use crate::rules::positioning::PositioningRules;

/// A directory of Terraform files linted as a unit.
#[derive(Debug)]
pub struct Stack {
    directory: PathBuf,
    naming: NamingRules,
    positioning: PositioningRules,
    errors: Vec<Violation>,
}

impl Stack {
    /// Load both rule sets. Naming is loaded first, so a stack with two bad
    /// rule files reports `InvalidNaming`.
    pub fn new(
        directory: impl Into<PathBuf>,
        naming_path: &Path,
        positioning_path: &Path,
    ) -> Result<Self> {
        let naming = NamingRules::load(naming_path)?;
        let positioning = PositioningRules::load(positioning_path)?;
        Ok(Self {
            directory: directory.into(),
            naming,
            positioning,
            errors: Vec::new(),
        })
    }

    /// Scan every plan and replace [`Stack::errors`] with what was found.
    #[instrument(skip_all, fields(stack = %self.directory.display()))]
    pub fn validate(&mut self) -> Result<()> {
        let mut errors = Vec::new();
        for plan in discover_plans(&self.directory)? {
            let blocks = load_blocks(&plan)?;
            debug!(plan = %plan.display(), blocks = blocks.len(), "scanned plan");
            errors.extend(check_blocks(&blocks, &self.naming, &self.positioning));
        }
        info!(violations = errors.len(), "stack validated");
        self.errors = errors;
        Ok(())
    }

    /// Violations from the last [`Stack::validate`], in file then source order.
    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::EngineError;

    const NAMING: &str = "resources:\n  - type: aws_instance\n    regex: '^[a-z]+$'\n";
    const POSITIONING: &str = "variable: variables.tf\nresource: main.tf\n";

    struct Fixture {
        _temp: tempfile::TempDir,
        stack: PathBuf,
        naming: PathBuf,
        positioning: PathBuf,
    }

    fn fixture(naming: &str, positioning: &str) -> Fixture {
        let temp = tempfile::tempdir().expect("tempdir");
        let stack = temp.path().join("plans");
        fs::create_dir(&stack).expect("mkdir");
        let naming_path = temp.path().join("naming.yaml");
        let positioning_path = temp.path().join("positioning.yaml");
        fs::write(&naming_path, naming).expect("write naming");
        fs::write(&positioning_path, positioning).expect("write positioning");
        Fixture {
            _temp: temp,
            stack,
            naming: naming_path,
            positioning: positioning_path,
        }
    }

    #[test]
    fn conformant_stack_has_no_errors() {
        let fx = fixture(NAMING, POSITIONING);
        fs::write(
            fx.stack.join("main.tf"),
            "resource \"aws_instance\" \"web\" {\n  ami = \"ami-1\"\n}\n",
        )
        .expect("write");
        fs::write(fx.stack.join("variables.tf"), "variable \"region\" {}\n").expect("write");

        let mut stack = Stack::new(&fx.stack, &fx.naming, &fx.positioning).expect("stack");
        stack.validate().expect("validate");
        assert!(stack.errors().is_empty());
    }

    #[test]
    fn misnamed_and_misplaced_blocks_are_reported_in_order() {
        let fx = fixture(NAMING, POSITIONING);
        fs::write(
            fx.stack.join("main.tf"),
            "variable \"region\" {}\nresource \"aws_instance\" \"Web\" {\n}\n",
        )
        .expect("write");

        let mut stack = Stack::new(&fx.stack, &fx.naming, &fx.positioning).expect("stack");
        stack.validate().expect("validate");
        let errors = stack.errors();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], Violation::Positioning { line: 1, .. }));
        assert!(matches!(errors[1], Violation::Naming { line: 2, .. }));
    }

    #[test]
    fn empty_stack_is_clean() {
        let fx = fixture(NAMING, POSITIONING);
        let mut stack = Stack::new(&fx.stack, &fx.naming, &fx.positioning).expect("stack");
        stack.validate().expect("validate");
        assert!(stack.errors().is_empty());
    }

    #[test]
    fn invalid_rule_files_map_to_distinct_errors() {
        let fx = fixture("resources: nope\n", POSITIONING);
        let err = Stack::new(&fx.stack, &fx.naming, &fx.positioning).expect_err("naming");
        assert!(matches!(err, EngineError::InvalidNaming { .. }));

        let fx = fixture(NAMING, "- not\n- a mapping\n");
        let err = Stack::new(&fx.stack, &fx.naming, &fx.positioning).expect_err("positioning");
        assert!(matches!(err, EngineError::InvalidPositioning { .. }));
        assert!(err.is_invalid_rules());
    }

    #[test]
    fn revalidation_replaces_previous_errors() {
        let fx = fixture(NAMING, POSITIONING);
        let plan = fx.stack.join("main.tf");
        fs::write(&plan, "resource \"aws_instance\" \"Bad\" {\n}\n").expect("write");
        let mut stack = Stack::new(&fx.stack, &fx.naming, &fx.positioning).expect("stack");
        stack.validate().expect("validate");
        assert_eq!(stack.errors().len(), 1);

        fs::write(&plan, "resource \"aws_instance\" \"good\" {\n}\n").expect("write");
        stack.validate().expect("validate");
        assert!(stack.errors().is_empty());
    }

    #[test]
    fn brace_in_template_does_not_hide_later_misnamed_resource() {
        let fx = fixture(NAMING, POSITIONING);
        fs::write(
            fx.stack.join("main.tf"),
            "resource \"null_resource\" \"a\" {\n  x = \"${format(\"%s\", \"{\")}\"\n}\nresource \"aws_instance\" \"BadName\" {\n}\n",
        )
        .expect("write");

        let mut stack = Stack::new(&fx.stack, &fx.naming, &fx.positioning).expect("stack");
        stack.validate().expect("validate");
        let errors = stack.errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], Violation::Naming { line: 4, .. }));
    }

    #[test]
    fn inline_map_field_is_checked() {
        let naming = "resources:\n  - type: aws_instance\n    regex: '^[a-z]+$'\n    fields:\n      - value: tags.Name\n        regex: '^[a-z]+-[a-z]+$'\n";
        let fx = fixture(naming, POSITIONING);
        fs::write(
            fx.stack.join("main.tf"),
            "resource \"aws_instance\" \"web\" {\n  tags = { Name = \"Web-Front\" }\n}\n",
        )
        .expect("write");

        let mut stack = Stack::new(&fx.stack, &fx.naming, &fx.positioning).expect("stack");
        stack.validate().expect("validate");
        let errors = stack.errors();
        assert_eq!(errors.len(), 1);
        assert!(
            matches!(&errors[0], Violation::Field { field, value, .. } if field == "tags.Name" && value == "Web-Front")
        );
    }

    #[test]
    fn unparsable_plan_fails_validation() {
        let fx = fixture(NAMING, POSITIONING);
        fs::write(fx.stack.join("main.tf"), "resource \"aws_instance\" \"web\" {\n").expect("write");
        let mut stack = Stack::new(&fx.stack, &fx.naming, &fx.positioning).expect("stack");
        let err = stack.validate().expect_err("parse");
        assert!(matches!(err, EngineError::InvalidPlan { .. }));
    }
}
