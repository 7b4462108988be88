//! Compiled plans: the query string plus its signed term list.

use dagql_core::ProviderCapability;
use serde::Serialize;

/// One funnel query of a plan, with its sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    /// Standalone funnel, e.g. `from(s).to(m).visited(a).visited(b)`.
    pub query: String,
    /// `+1` or `-1`.
    pub coefficient: i32,
    /// Nodes the funnel requires, sorted by id. Empty for the base term.
    pub visited: Vec<String>,
}

impl Term {
    pub(crate) fn base(split: &str, merge: &str) -> Self {
        Self {
            query: format!("from({split}).to({merge})"),
            coefficient: 1,
            visited: Vec::new(),
        }
    }

    /// Term for a reachable hop subset of size k, signed `(-1)^k`.
    pub(crate) fn subset(split: &str, merge: &str, visited: Vec<String>) -> Self {
        let mut query = format!("from({split}).to({merge})");
        for node in &visited {
            query.push_str(&format!(".visited({node})"));
        }
        let coefficient = if visited.len() % 2 == 1 { -1 } else { 1 };
        Self {
            query,
            coefficient,
            visited,
        }
    }

    pub fn is_base(&self) -> bool {
        self.visited.is_empty()
    }

    /// Funnel steps: `from`, `to`, plus one per visited node.
    pub fn funnel_length(&self) -> usize {
        2 + self.visited.len()
    }

    /// Clause this term contributes to the combined query string.
    pub(crate) fn clause(&self) -> Option<String> {
        if self.is_base() {
            return None;
        }
        let name = if self.coefficient < 0 { "minus" } else { "plus" };
        Some(format!("{name}({})", self.visited.join(",")))
    }
}

/// How a plan expresses the exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// No competing hops, nothing to exclude.
    Trivial,
    /// One query with provider-side `exclude(...)`.
    NativeExclude,
    /// Base funnel plus signed `visited(...)` funnels.
    InclusionExclusion,
}

/// Result of compiling one edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    pub(crate) split: String,
    pub(crate) target: String,
    pub(crate) merge: String,
    pub(crate) strategy: Strategy,
    pub(crate) competing_hops: Vec<String>,
    pub(crate) active_hops: Vec<String>,
    pub(crate) query: String,
    pub(crate) terms: Vec<Term>,
}

impl CompiledQuery {
    pub fn split(&self) -> &str {
        &self.split
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn merge(&self) -> &str {
        &self.merge
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Every competing first hop, sorted by id.
    pub fn competing_hops(&self) -> &[String] {
        &self.competing_hops
    }

    /// Hops left after dominance elimination (all of them for native plans).
    pub fn active_hops(&self) -> &[String] {
        &self.active_hops
    }

    /// Combined query string, parseable by [`parse_query`](crate::query::parse_query).
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Signed terms. The first is always the base funnel with coefficient `+1`.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn max_funnel_length(&self) -> usize {
        self.terms.iter().map(Term::funnel_length).max().unwrap_or(2)
    }

    /// Whether a provider can run this plan as is.
    ///
    /// The compiler never truncates a plan; callers use this to detect
    /// `max_funnel_length` overflow and missing features up front.
    pub fn fits(&self, capability: &ProviderCapability) -> bool {
        if self.strategy == Strategy::NativeExclude && !capability.supports_native_exclude {
            return false;
        }
        if self.terms.iter().any(|t| !t.is_base()) && !capability.supports_visited {
            return false;
        }
        match capability.max_funnel_length {
            Some(limit) => self.max_funnel_length() <= limit as usize,
            None => true,
        }
    }
}
