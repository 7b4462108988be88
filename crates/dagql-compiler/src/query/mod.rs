//! Structured queries and edge conditions.
//!
//! Text goes through the resilient parser first, then through lowering into
//! [`ParsedQuery`]. Any error diagnostic from either stage turns into
//! [`Error::Parse`](crate::Error::Parse); warnings (unknown clauses) do not.

mod clause;
mod condition;
mod error;
mod lower;

#[cfg(test)]
mod clause_tests;
#[cfg(test)]
mod query_tests;

use std::collections::BTreeSet;
use std::fmt;

use rowan::TextSize;
use serde::Serialize;

use crate::parser::{self, ParseResult, Root};
use crate::{Diagnostics, Error, PassResult, Result};

pub use clause::ClauseKind;
pub use condition::{ParsedCondition, parse_constraint_condition};
pub use error::{ParseError, UnsupportedClauseError};

use lower::Lowerer;

/// `start:end` date bounds, either side optional (`window(:7-Nov-25)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.start.as_deref().unwrap_or_default(),
            self.end.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Cohort {
    /// Node whose entry date defines cohort membership; the query's `from` when absent.
    pub anchor: Option<String>,
    pub range: DateRange,
}

/// A well-formed clause the language does not interpret, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ExtraClause {
    pub name: String,
    pub args: Vec<String>,
}

/// Structured form of a query string.
///
/// Equality is semantic: clause order, repeated entries and `raw` are ignored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedQuery {
    pub from_node: Option<String>,
    pub to_node: Option<String>,
    pub exclude: Vec<String>,
    pub visited: Vec<String>,
    /// One OR-group per `visitedAny` clause; groups are ANDed.
    pub visited_any: Vec<Vec<String>>,
    pub cases: BTreeSet<(String, String)>,
    pub contexts: BTreeSet<(String, String)>,
    /// One OR-group per `contextAny` clause; groups are ANDed.
    pub context_any: Vec<Vec<(String, String)>>,
    pub window: Option<DateRange>,
    pub cohort: Option<Cohort>,
    /// Visited sets of subtracted inclusion-exclusion terms.
    pub minus: Vec<Vec<String>>,
    /// Visited sets of added-back inclusion-exclusion terms.
    pub plus: Vec<Vec<String>>,
    pub extra: Vec<ExtraClause>,
    #[serde(skip)]
    pub raw: String,
}

/// Order-insensitive view used for equality.
#[derive(PartialEq, Eq)]
struct Canonical<'a> {
    from_node: Option<&'a str>,
    to_node: Option<&'a str>,
    exclude: BTreeSet<&'a str>,
    visited: BTreeSet<&'a str>,
    visited_any: BTreeSet<BTreeSet<&'a str>>,
    cases: &'a BTreeSet<(String, String)>,
    contexts: &'a BTreeSet<(String, String)>,
    context_any: BTreeSet<BTreeSet<&'a (String, String)>>,
    window: Option<&'a DateRange>,
    cohort: Option<&'a Cohort>,
    minus: Vec<BTreeSet<&'a str>>,
    plus: Vec<BTreeSet<&'a str>>,
    extra: BTreeSet<&'a ExtraClause>,
}

fn node_set(nodes: &[String]) -> BTreeSet<&str> {
    nodes.iter().map(String::as_str).collect()
}

/// Multiset of groups: term multiplicity matters for inclusion-exclusion.
fn sorted_groups(groups: &[Vec<String>]) -> Vec<BTreeSet<&str>> {
    let mut sets: Vec<_> = groups.iter().map(|g| node_set(g)).collect();
    sets.sort();
    sets
}

impl ParsedQuery {
    fn canonical(&self) -> Canonical<'_> {
        Canonical {
            from_node: self.from_node.as_deref(),
            to_node: self.to_node.as_deref(),
            exclude: node_set(&self.exclude),
            visited: node_set(&self.visited),
            visited_any: self.visited_any.iter().map(|g| node_set(g)).collect(),
            cases: &self.cases,
            contexts: &self.contexts,
            context_any: self
                .context_any
                .iter()
                .map(|g| g.iter().collect())
                .collect(),
            window: self.window.as_ref(),
            cohort: self.cohort.as_ref(),
            minus: sorted_groups(&self.minus),
            plus: sorted_groups(&self.plus),
            extra: self.extra.iter().collect(),
        }
    }

    /// Canonical query text. Parsing the result yields an equal query.
    ///
    /// Clause order: `from`, `to`, `visited`, `visitedAny`, `exclude`,
    /// `context`, `contextAny`, `case`, `window`, `cohort`, `minus`, `plus`,
    /// then unknown clauses in source order.
    pub fn to_dsl(&self) -> String {
        let mut clauses = Vec::new();

        if let Some(node) = &self.from_node {
            clauses.push(format!("from({node})"));
        }
        if let Some(node) = &self.to_node {
            clauses.push(format!("to({node})"));
        }
        if !self.visited.is_empty() {
            clauses.push(format!("visited({})", self.visited.join(",")));
        }
        for group in &self.visited_any {
            clauses.push(format!("visitedAny({})", group.join(",")));
        }
        if !self.exclude.is_empty() {
            clauses.push(format!("exclude({})", self.exclude.join(",")));
        }
        if !self.contexts.is_empty() {
            clauses.push(format!("context({})", join_pairs(&self.contexts)));
        }
        for group in &self.context_any {
            clauses.push(format!("contextAny({})", join_pairs(group)));
        }
        if !self.cases.is_empty() {
            clauses.push(format!("case({})", join_pairs(&self.cases)));
        }
        if let Some(window) = &self.window {
            clauses.push(format!("window({window})"));
        }
        if let Some(cohort) = &self.cohort {
            match &cohort.anchor {
                Some(anchor) => clauses.push(format!("cohort({anchor},{})", cohort.range)),
                None => clauses.push(format!("cohort({})", cohort.range)),
            }
        }
        for group in &self.minus {
            clauses.push(format!("minus({})", group.join(",")));
        }
        for group in &self.plus {
            clauses.push(format!("plus({})", group.join(",")));
        }
        for extra in &self.extra {
            clauses.push(format!("{}({})", extra.name, extra.args.join(",")));
        }

        clauses.join(".")
    }
}

impl PartialEq for ParsedQuery {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for ParsedQuery {}

impl TryFrom<&str> for ParsedQuery {
    type Error = Error;

    fn try_from(source: &str) -> Result<Self> {
        parse_query(source)
    }
}

fn join_pairs<'a>(pairs: impl IntoIterator<Item = &'a (String, String)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| format!("{k}:{v}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a query string.
pub fn parse_query(source: &str) -> Result<ParsedQuery> {
    check_query(source).map(|(query, _)| query)
}

/// Parse a query string, keeping non-fatal diagnostics (unknown clauses).
pub fn check_query(source: &str) -> PassResult<ParsedQuery> {
    let ParseResult {
        root,
        mut diagnostics,
    } = parser::parse(source);
    let query = Lowerer::lower(&root, source, &mut diagnostics);

    if let Some(err) = parse_error(&root, &diagnostics) {
        return Err(Error::Parse(err));
    }
    Ok((query, diagnostics))
}

/// Non-throwing check: `(true, None)` or `(false, Some(reason))`.
pub fn validate_query(source: &str) -> (bool, Option<String>) {
    match parse_query(source) {
        Ok(_) => (true, None),
        Err(err) => (false, Some(err.to_string())),
    }
}

pub(crate) fn parse_error(root: &Root, diagnostics: &Diagnostics) -> Option<ParseError> {
    let first = diagnostics.first_error()?;
    let clause = clause_name_at(root, first.range().start());
    Some(ParseError::new(clause, first, diagnostics.clone()))
}

/// Name of the clause covering `offset`, preferring one that starts there.
fn clause_name_at(root: &Root, offset: TextSize) -> String {
    let clauses: Vec<_> = root.clauses().collect();
    clauses
        .iter()
        .find(|c| c.text_range().contains(offset))
        .or_else(|| {
            clauses
                .iter()
                .find(|c| c.text_range().contains_inclusive(offset))
        })
        .map(|c| c.name_text())
        .unwrap_or_default()
}
