use derive_more::Display;
use serde::Serialize;

///
/// Severity
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum Severity {
    Error,
    Note,
}

///
/// Diagnostic
///

#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn note(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Note,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

///
/// Reporter
///
/// Diagnostics boundary towards the host's build log. Reporting is
/// observational and must not affect pipeline semantics.
///

pub trait Reporter {
    fn report(&self, diagnostic: Diagnostic);
}

///
/// NullReporter
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _diagnostic: Diagnostic) {}
}
