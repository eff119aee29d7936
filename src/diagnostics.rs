use crate::error::RowError;
use serde::Serialize;
use std::fmt;

/// How much attention a diagnostic deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A non-fatal issue found while converting a sheet.
///
/// Only `RequiredFieldMissing` drops the row it refers to. Every other variant
/// is reported and the conversion carries on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// The row was skipped because a required column was empty.
    RequiredFieldMissing { line: usize, column: &'static str },
    /// The trigger cell could not be understood and was read as a default trigger.
    UnparseableTrigger { line: usize, text: String },
    /// A parameter segment had no `=` or no name and was skipped.
    UnparseableParameterSegment { line: usize, segment: String },
    /// A route points at a page that no row defines.
    DanglingRouteTarget {
        line: usize,
        page: String,
        target: String,
    },
    /// A row added to a page that an earlier row had already created.
    DuplicatePageMerge { line: usize, page: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::RequiredFieldMissing { .. } => Severity::Error,
            Diagnostic::DuplicatePageMerge { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }

    /// The 1-based sheet line the diagnostic points at (the header is line 1).
    pub fn line(&self) -> usize {
        match self {
            Diagnostic::RequiredFieldMissing { line, .. }
            | Diagnostic::UnparseableTrigger { line, .. }
            | Diagnostic::UnparseableParameterSegment { line, .. }
            | Diagnostic::DanglingRouteTarget { line, .. }
            | Diagnostic::DuplicatePageMerge { line, .. } => *line,
        }
    }
}

impl From<RowError> for Diagnostic {
    fn from(err: RowError) -> Self {
        match err {
            RowError::RequiredFieldMissing { line, column } => {
                Diagnostic::RequiredFieldMissing { line, column }
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RequiredFieldMissing { line, column } => {
                write!(f, "line {}: required column '{}' is empty, row skipped", line, column)
            }
            Diagnostic::UnparseableTrigger { line, text } => {
                write!(f, "line {}: trigger '{}' not understood, using default", line, text)
            }
            Diagnostic::UnparseableParameterSegment { line, segment } => {
                write!(f, "line {}: parameter segment '{}' skipped", line, segment)
            }
            Diagnostic::DanglingRouteTarget { line, page, target } => write!(
                f,
                "line {}: route on '{}' targets unknown page '{}'",
                line, page, target
            ),
            Diagnostic::DuplicatePageMerge { line, page } => {
                write!(f, "line {}: merged into existing page '{}'", line, page)
            }
        }
    }
}

/// A value produced alongside the non-fatal issues found while producing it.
#[derive(Debug, Clone)]
pub struct Converted<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Converted<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Converted<U> {
        Converted {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    /// Diagnostics at `Warning` severity or above.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() >= Severity::Warning)
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}
