//! Diagnostic rendering backends.

use crate::diagnostic::Diagnostic;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// error[E101]: missing dependency 'XOR'
///   --> HALF ADDER
///    = note: ...
///    = help: ...
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer;

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}[{}]: {}\n", diag.severity, diag.code, diag.message);

        if let Some(subject) = &diag.subject {
            out.push_str(&format!("  --> {subject}\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};

    #[test]
    fn render_error_with_subject() {
        let code = DiagnosticCode::new(Category::Error, 101);
        let diag = Diagnostic::error(code, "missing dependency 'XOR'").with_subject("HALF ADDER");

        let output = TerminalRenderer.render(&diag);

        assert!(output.contains("error[E101]: missing dependency 'XOR'"));
        assert!(output.contains("--> HALF ADDER"));
    }

    #[test]
    fn render_warning_with_notes() {
        let code = DiagnosticCode::new(Category::Warning, 201);
        let diag = Diagnostic::warning(code, "unflagged feedback loop")
            .with_note("components 0 -> 1 -> 0")
            .with_help("mark one input pin in the loop as cyclic");

        let output = TerminalRenderer.render(&diag);

        assert!(output.contains("warning[W201]: unflagged feedback loop"));
        assert!(output.contains("= note: components 0 -> 1 -> 0"));
        assert!(output.contains("= help: mark one input pin in the loop as cyclic"));
    }

    #[test]
    fn render_without_subject() {
        let code = DiagnosticCode::new(Category::Error, 999);
        let diag = Diagnostic::error(code, "general error");

        let output = TerminalRenderer.render(&diag);

        assert!(output.contains("error[E999]: general error"));
        assert!(!output.contains("-->"));
    }
}
