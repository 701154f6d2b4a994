//! In-memory doubles for the external collaborators: symbol table,
//! artifact sink, and diagnostics channel.

mod sink;
mod symtab;

pub use sink::{MemorySink, WrittenArtifact};
pub use symtab::MemorySymbolTable;

use std::cell::RefCell;
use vminject_schema::{
    report::{Diagnostic, Reporter, Severity},
    types::TypePath,
};

/// Parse a test path, panicking on bad input.
#[must_use]
pub fn path(s: &str) -> TypePath {
    TypePath::parse(s).expect("test paths are valid")
}

/// Parse a batch of test paths.
#[must_use]
pub fn paths(names: &[&str]) -> Vec<TypePath> {
    names.iter().map(|name| path(name)).collect()
}

///
/// RecordingReporter
///

#[derive(Debug, Default)]
pub struct RecordingReporter {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .map(|diagnostic| diagnostic.message.clone())
            .collect()
    }

    #[must_use]
    pub fn notes(&self) -> Vec<String> {
        self.messages(Severity::Note)
    }

    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
