use rowan::TextRange;

use crate::diagnostics::{DiagnosticMessage, Diagnostics};

use super::ClauseKind;

/// Malformed query text.
///
/// `clause` is the name of the clause the first error falls in, as written
/// (empty when the clause has no name or the error sits between clauses).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.describe())]
pub struct ParseError {
    clause: String,
    first: DiagnosticMessage,
    diagnostics: Diagnostics,
}

impl ParseError {
    pub(crate) fn new(clause: String, first: DiagnosticMessage, diagnostics: Diagnostics) -> Self {
        Self {
            clause,
            first,
            diagnostics,
        }
    }

    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn message(&self) -> &str {
        self.first.message()
    }

    pub fn range(&self) -> TextRange {
        self.first.range()
    }

    /// Every diagnostic collected for the query, warnings included.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn describe(&self) -> String {
        if self.clause.is_empty() {
            format!("malformed query: {}", self.first.message())
        } else {
            format!("malformed clause `{}`: {}", self.clause, self.first.message())
        }
    }
}

/// A well-formed clause that edge-activation conditions do not accept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("clause `{clause}` is not supported in edge conditions")]
pub struct UnsupportedClauseError {
    clause: String,
    kind: Option<ClauseKind>,
    range: TextRange,
}

impl UnsupportedClauseError {
    pub(crate) fn new(clause: String, kind: Option<ClauseKind>, range: TextRange) -> Self {
        Self {
            clause,
            kind,
            range,
        }
    }

    /// Canonical spelling for known clauses, as written otherwise.
    pub fn clause(&self) -> &str {
        &self.clause
    }

    /// `None` for names the language does not know at all.
    pub fn kind(&self) -> Option<ClauseKind> {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }
}
