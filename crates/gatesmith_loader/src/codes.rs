//! Diagnostic codes for load and packaging problems.
//!
//! Error codes `E101`--`E106` cover definitions that could not be loaded.
//! `W201` reports a feedback loop that was kept under the `warn` policy.

use gatesmith_diagnostics::{Category, Diagnostic, DiagnosticCode};

use crate::error::LoadError;

/// A component uses a chip type that is not registered.
pub const E101: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);

/// An input pin's recorded source is invalid.
pub const E102: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);

/// A component's pin count differs from its chip type.
pub const E103: DiagnosticCode = DiagnosticCode::new(Category::Error, 103);

/// Duplicate chip name.
pub const E104: DiagnosticCode = DiagnosticCode::new(Category::Error, 104);

/// Feedback loop without a cyclic pin, rejected under the `deny` policy.
pub const E105: DiagnosticCode = DiagnosticCode::new(Category::Error, 105);

/// Stored chip data could not be decoded.
pub const E106: DiagnosticCode = DiagnosticCode::new(Category::Error, 106);

/// Feedback loop without a cyclic pin, kept under the `warn` policy.
pub const W201: DiagnosticCode = DiagnosticCode::new(Category::Warning, 201);

/// Converts a load failure into a diagnostic.
pub fn error_diagnostic(err: &LoadError) -> Diagnostic {
    let diag = match err {
        LoadError::MissingDependency { dependency, .. } => Diagnostic::error(E101, err.to_string())
            .with_help(format!(
                "`{dependency}` must be packaged before any chip that uses it"
            )),
        LoadError::InvalidSource { .. } | LoadError::Circuit(_) => {
            Diagnostic::error(E102, err.to_string())
        }
        LoadError::PinCountMismatch { dependency, .. } => Diagnostic::error(E103, err.to_string())
            .with_note(format!("`{dependency}` may have been edited after this chip was saved")),
        LoadError::DuplicateChip { .. } => Diagnostic::error(E104, err.to_string()),
        LoadError::UnflaggedCycle { .. } => Diagnostic::error(E105, err.to_string())
            .with_help("mark one input pin on the loop as cyclic"),
        LoadError::Undecodable { .. } | LoadError::Encoding(_) => Diagnostic::error(E106, err.to_string()),
    };
    match err.chip() {
        Some(chip) => diag.with_subject(chip),
        None => diag,
    }
}

/// Creates a warning for a feedback loop kept under the `warn` policy.
pub fn warn_unflagged_cycle(chip: &str, components: &[usize]) -> Diagnostic {
    Diagnostic::warning(
        W201,
        format!("chip `{chip}` has a feedback loop with no cyclic pin through components {components:?}"),
    )
    .with_subject(chip)
    .with_note("driving this loop will hit the propagation depth limit")
    .with_help("mark one input pin on the loop as cyclic")
}
