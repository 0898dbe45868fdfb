use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a validation pass.
///
/// `errors` block saving or activating the workflow; `warnings` are advisory
/// and never affect `is_valid`. Both keep the order in which checks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub(crate) fn from_issues(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid && !self.has_warnings() {
            return write!(f, "Workflow is valid");
        }

        if self.is_valid {
            write!(f, "Workflow is valid with {} warning(s)", self.warnings.len())?;
        } else {
            write!(
                f,
                "Workflow is invalid: {} error(s), {} warning(s)",
                self.errors.len(),
                self.warnings.len()
            )?;
        }
        for error in &self.errors {
            write!(f, "\n  error: {}", error)?;
        }
        for warning in &self.warnings {
            write!(f, "\n  warning: {}", warning)?;
        }
        Ok(())
    }
}
