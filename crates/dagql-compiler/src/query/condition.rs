//! Edge-activation conditions: the query grammar restricted to
//! `visited`, `exclude`, `visitedAny`, `case` and `context`.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::parser::{self, ParseResult, Root};
use crate::{Error, Result};

use super::lower::Lowerer;
use super::{ClauseKind, ParsedQuery, UnsupportedClauseError, parse_error};

/// Parsed edge condition. All clauses are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedCondition {
    pub visited: Vec<String>,
    pub exclude: Vec<String>,
    /// OR within a group, AND across groups.
    pub visited_any: Vec<Vec<String>>,
    pub cases: BTreeSet<(String, String)>,
    pub contexts: BTreeSet<(String, String)>,
}

impl ParsedCondition {
    /// Canonical text, in the same clause order as [`ParsedQuery::to_dsl`].
    pub fn to_dsl(&self) -> String {
        ParsedQuery {
            visited: self.visited.clone(),
            exclude: self.exclude.clone(),
            visited_any: self.visited_any.clone(),
            cases: self.cases.clone(),
            contexts: self.contexts.clone(),
            ..ParsedQuery::default()
        }
        .to_dsl()
    }
}

impl TryFrom<&str> for ParsedCondition {
    type Error = Error;

    fn try_from(source: &str) -> Result<Self> {
        parse_constraint_condition(source)
    }
}

/// Parse an edge condition.
///
/// Clauses outside the condition grammar fail with
/// [`Error::UnsupportedClause`] even when the rest of the text is malformed,
/// so `cohort(...)` reports the clause rather than its arguments.
pub fn parse_constraint_condition(source: &str) -> Result<ParsedCondition> {
    let ParseResult {
        root,
        mut diagnostics,
    } = parser::parse(source);

    if let Some(err) = first_unsupported(&root) {
        return Err(Error::UnsupportedClause(err));
    }

    let query = Lowerer::lower(&root, source, &mut diagnostics);
    if let Some(err) = parse_error(&root, &diagnostics) {
        return Err(Error::Parse(err));
    }

    Ok(ParsedCondition {
        visited: query.visited,
        exclude: query.exclude,
        visited_any: query.visited_any,
        cases: query.cases,
        contexts: query.contexts,
    })
}

fn first_unsupported(root: &Root) -> Option<UnsupportedClauseError> {
    root.clauses().find_map(|clause| {
        let name = clause.name()?;
        match ClauseKind::from_name(name.text()) {
            Some(kind) if kind.allowed_in_condition() => None,
            Some(kind) => Some(UnsupportedClauseError::new(
                kind.name().to_owned(),
                Some(kind),
                name.text_range(),
            )),
            None => Some(UnsupportedClauseError::new(
                name.text().to_owned(),
                None,
                name.text_range(),
            )),
        }
    })
}
