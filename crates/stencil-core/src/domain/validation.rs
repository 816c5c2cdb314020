use tracing::{debug, instrument};

use crate::domain::{ModuleName, ProjectName, RemovalManifest, error::DomainError};

/// Centralized domain validation.
///
/// The pre-generation hook lives here: both names must pass before the
/// renderer writes anything.
pub struct InputValidator;

/// Names that passed the pre-generation checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInputs {
    pub project_name: ProjectName,
    pub module_name: ModuleName,
}

impl InputValidator {
    /// Check the project name first, then the module name.
    ///
    /// The first violation wins; nothing is partially accepted.
    #[instrument(level = "debug")]
    pub fn validate(project_name: &str, module_name: &str) -> Result<ValidatedInputs, DomainError> {
        let project_name = ProjectName::parse(project_name)?;
        let module_name = ModuleName::parse(module_name)?;
        debug!("inputs accepted");
        Ok(ValidatedInputs {
            project_name,
            module_name,
        })
    }

    pub fn validate_manifest(manifest: &RemovalManifest) -> Result<(), DomainError> {
        manifest.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_project_name_with_space() {
        assert!(matches!(
            InputValidator::validate("My Project", "my_project"),
            Err(DomainError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn project_name_checked_before_module_name() {
        // Both are invalid; the project name error is reported.
        assert!(matches!(
            InputValidator::validate("My Project", "1abc"),
            Err(DomainError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn rejects_leading_digit_module() {
        assert!(matches!(
            InputValidator::validate("demo", "1abc"),
            Err(DomainError::InvalidModuleName { .. })
        ));
    }

    #[test]
    fn accepts_underscore_module() {
        let inputs = InputValidator::validate("demo", "_abc1").unwrap();
        assert_eq!(inputs.module_name.as_str(), "_abc1");
        assert_eq!(inputs.project_name.as_str(), "demo");
    }
}
