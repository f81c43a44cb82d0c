//! Per-load diagnostic collection.

use std::cell::{Cell, RefCell};

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Collects the diagnostics raised while chip definitions load or package.
///
/// Loading runs on the caller's thread, so the sink is shared by plain
/// reference and uses interior mutability; it is not `Sync`.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
    errors: Cell<usize>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity.is_error() {
            self.errors.set(self.errors.get() + 1);
        }
        self.diagnostics.borrow_mut().push(diag);
    }

    /// Returns `true` once any error has been recorded, even after draining.
    pub fn has_errors(&self) -> bool {
        self.errors.get() > 0
    }

    /// Number of errors recorded so far.
    pub fn error_count(&self) -> usize {
        self.errors.get()
    }

    /// Drains the recorded diagnostics. The error count is kept.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    /// Copy of everything recorded so far, oldest first.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Diagnostics whose subject is the chip `name`.
    pub fn for_subject(&self, name: &str) -> Vec<Diagnostic> {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.subject.as_deref() == Some(name))
            .cloned()
            .collect()
    }

    /// Highest severity recorded so far, if any.
    pub fn worst(&self) -> Option<Severity> {
        self.diagnostics.borrow().iter().map(|d| d.severity).max()
    }
}
