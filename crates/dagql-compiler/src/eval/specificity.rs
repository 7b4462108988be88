use crate::query::parse_constraint_condition;
use crate::{ParsedCondition, Result};

use super::EvalContext;

/// Relative tie-break weight of a condition.
///
/// Each `visited`/`exclude` node and each `case`/`context` pair adds 1.
/// A `visitedAny` group adds `1 / |group|`, so wider OR-groups count less.
/// Only meaningful when comparing conditions attached to the same edge.
pub fn specificity(condition: &ParsedCondition) -> f64 {
    let exact = condition.visited.len()
        + condition.exclude.len()
        + condition.cases.len()
        + condition.contexts.len();

    let any: f64 = condition
        .visited_any
        .iter()
        .filter(|group| !group.is_empty())
        .map(|group| 1.0 / group.len() as f64)
        .sum();

    exact as f64 + any
}

/// [`specificity`] of a condition given as text.
pub fn constraint_specificity_score(condition: &str) -> Result<f64> {
    parse_constraint_condition(condition).map(|c| specificity(&c))
}

/// Index of the most specific condition that matches `ctx`.
///
/// Ties go to the earliest condition; `None` when nothing matches.
pub fn select_conditional_branch(conditions: &[ParsedCondition], ctx: &EvalContext) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, condition) in conditions.iter().enumerate() {
        if !ctx.matches(condition) {
            continue;
        }
        let score = specificity(condition);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}
