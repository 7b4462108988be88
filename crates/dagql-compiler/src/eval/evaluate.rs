use std::collections::{HashMap, HashSet};

use crate::ParsedCondition;

/// Everything a condition can be tested against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvalContext {
    pub visited: HashSet<String>,
    pub context: HashMap<String, String>,
    pub case_variants: HashMap<String, String>,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_visited<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visited.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn with_case(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.case_variants.insert(key.into(), value.into());
        self
    }

    pub fn matches(&self, condition: &ParsedCondition) -> bool {
        evaluate_constraint_condition(
            condition,
            &self.visited,
            &self.context,
            &self.case_variants,
        )
    }
}

/// Whether a journey satisfies every clause of `condition`.
///
/// - `visited(a,b)`: all listed nodes were visited
/// - `exclude(c)`: none of the listed nodes were visited
/// - `visitedAny(a,b)`: at least one per group; groups are ANDed
/// - `context(k:v)` / `case(k:v)`: the map holds exactly `v` under `k`
pub fn evaluate_constraint_condition(
    condition: &ParsedCondition,
    visited_nodes: &HashSet<String>,
    context: &HashMap<String, String>,
    case_variants: &HashMap<String, String>,
) -> bool {
    condition
        .visited
        .iter()
        .all(|node| visited_nodes.contains(node))
        && !condition
            .exclude
            .iter()
            .any(|node| visited_nodes.contains(node))
        && condition
            .visited_any
            .iter()
            .all(|group| group.iter().any(|node| visited_nodes.contains(node)))
        && condition
            .contexts
            .iter()
            .all(|(key, value)| context.get(key) == Some(value))
        && condition
            .cases
            .iter()
            .all(|(key, value)| case_variants.get(key) == Some(value))
}
