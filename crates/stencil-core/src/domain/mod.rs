// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! Pure data and rules: validated names, removal manifests, render options,
//! environment outcomes and the setup instructions text.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, process, or network calls
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//! - **Validated construction**: invalid names and paths cannot be built
//!
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    artifacts::{ArtifactCategory, ArtifactTarget, COMPILED_SCAN_ROOTS, is_compiled_artifact},
    common::RelativePath,
    environment::{EnvironmentOutcome, MINIMUM_INTERPRETER, SkipReason, VENV_DIR},
    instructions::SetupInstructions,
    manifest::{MissingPathPolicy, PruneReport, RemovalManifest},
    options::{BootstrapOptions, BootstrapOptionsBuilder},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{InterpreterVersion, MODULE_PATTERN, ModuleName, ProjectName};

pub use validation::{InputValidator, ValidatedInputs};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Pipeline-level properties over the domain types
    // ========================================================================

    #[test]
    fn any_name_with_a_space_is_rejected() {
        for name in ["a b", "My Project", " x", "x ", "a  b"] {
            assert!(
                InputValidator::validate(name, "valid_mod").is_err(),
                "accepted {name:?}"
            );
        }
    }

    #[test]
    fn any_identifier_is_accepted() {
        for module in ["ab", "_a", "A1", "snake_case_2", "_abc1"] {
            assert!(InputValidator::validate("proj", module).is_ok(), "rejected {module}");
        }
    }

    #[test]
    fn docs_manifest_stays_inside_docs() {
        let manifest = RemovalManifest::docs();
        for path in manifest.removal_order() {
            assert!(path.as_path().starts_with("docs"), "{path} outside docs");
        }
    }

    #[test]
    fn manifest_round_trips_through_serde_with_validation() {
        let json = r#"{"files":["docs/a.txt"],"directories":[],"enclosing":"docs"}"#;
        let manifest: RemovalManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.files, vec![RelativePath::new("docs/a.txt")]);

        let escaping = r#"{"files":["../secret"]}"#;
        assert!(serde_json::from_str::<RemovalManifest>(escaping).is_err());
    }

    #[test]
    fn error_category_for_bad_module_is_validation() {
        let err = ModuleName::parse("1abc").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }
}
