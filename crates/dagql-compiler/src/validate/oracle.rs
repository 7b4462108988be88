use std::collections::{HashMap, HashSet};

use dagql_core::ConversionGraph;
use tracing::debug;

use super::flow::PathFlows;
use super::{FlowReport, ValidationError, check};
use crate::compile::{Term, inclusion_exclusion_terms};
use crate::eval::evaluate_constraint_condition;
use crate::query::parse_query;
use crate::{ParsedCondition, ParsedQuery};

/// Check the inclusion-exclusion plan for `(split, merge)` against synthetic
/// flow.
///
/// The signed term flows must add up to the non-direct flow, leaving exactly
/// the direct flow after subtraction from the base funnel.
pub fn validate_inclusion_exclusion_with_flow(
    graph: &ConversionGraph,
    split: &str,
    target: &str,
    merge: &str,
    competing_hops: &[String],
    n_start: f64,
) -> Result<FlowReport, ValidationError> {
    let plan = inclusion_exclusion_terms(graph, split, merge, competing_hops)?;
    debug!(split, target, merge, terms = plan.terms.len(), "validating plan");
    validate_terms_with_flow(graph, split, merge, competing_hops, &plan.terms, n_start)
}

/// Check an arbitrary signed term list. The base term counts as the whole
/// funnel; every other term counts the non-direct paths covering its
/// visited set.
pub fn validate_terms_with_flow(
    graph: &ConversionGraph,
    split: &str,
    merge: &str,
    competing_hops: &[String],
    terms: &[Term],
    n_start: f64,
) -> Result<FlowReport, ValidationError> {
    let flows = PathFlows::new(graph, split, merge, competing_hops, n_start);
    let total_flow = flows.total_flow();

    let term_flows: Vec<f64> = terms
        .iter()
        .map(|term| {
            if term.is_base() {
                total_flow
            } else {
                flows.flow_visiting(&term.visited)
            }
        })
        .collect();

    let excluded_flow: f64 = terms
        .iter()
        .zip(&term_flows)
        .filter(|(term, _)| !term.is_base())
        .map(|(term, flow)| -f64::from(term.coefficient) * flow)
        .sum();

    let report = FlowReport {
        path_count: flows.len(),
        total_flow,
        direct_flow: flows.direct_flow(),
        non_direct_flow: flows.non_direct_flow(),
        excluded_flow,
        compiled_flow: total_flow - excluded_flow,
        term_flows,
    };

    check("non-direct flow", report.non_direct_flow, report.excluded_flow)?;
    check("direct flow", report.direct_flow, report.compiled_flow)?;
    Ok(report)
}

/// Check `from(S).to(M).exclude(h1)...` by evaluating its `exclude` clause
/// on every path.
pub fn validate_native_exclude_with_flow(
    graph: &ConversionGraph,
    split: &str,
    target: &str,
    merge: &str,
    competing_hops: &[String],
    n_start: f64,
) -> Result<FlowReport, ValidationError> {
    let mut query = format!("from({split}).to({merge})");
    for hop in competing_hops {
        query.push_str(&format!(".exclude({hop})"));
    }
    debug!(split, target, merge, query = %query, "validating native plan");
    validate_compiled_with_flow(graph, &query, competing_hops, n_start)
}

/// Re-parse a compiled query string and check it against synthetic flow.
///
/// A path contributes when it satisfies the query's `visited`, `exclude` and
/// `visitedAny` clauses, weighted by `1 - minus + plus` over the terms whose
/// visited set it covers.
pub fn validate_compiled_with_flow(
    graph: &ConversionGraph,
    query: &str,
    competing_hops: &[String],
    n_start: f64,
) -> Result<FlowReport, ValidationError> {
    let parsed = parse_query(query)?;
    let from = parsed
        .from_node
        .as_deref()
        .ok_or(ValidationError::MissingEndpoint("from"))?;
    let to = parsed
        .to_node
        .as_deref()
        .ok_or(ValidationError::MissingEndpoint("to"))?;

    let flows = PathFlows::new(graph, from, to, competing_hops, n_start);
    let condition = path_condition(&parsed);
    let (context, cases) = (HashMap::new(), HashMap::new());

    let mut base_flow = 0.0;
    let mut compiled_flow = 0.0;
    let mut minus_flows = vec![0.0; parsed.minus.len()];
    let mut plus_flows = vec![0.0; parsed.plus.len()];

    for (interior, flow) in flows.iter() {
        let visited: HashSet<String> = interior.iter().cloned().collect();
        if !evaluate_constraint_condition(&condition, &visited, &context, &cases) {
            continue;
        }
        base_flow += flow;

        let mut weight = 1.0;
        for (group, acc) in parsed.minus.iter().zip(&mut minus_flows) {
            if group.iter().all(|n| visited.contains(n)) {
                weight -= 1.0;
                *acc += flow;
            }
        }
        for (group, acc) in parsed.plus.iter().zip(&mut plus_flows) {
            if group.iter().all(|n| visited.contains(n)) {
                weight += 1.0;
                *acc += flow;
            }
        }
        compiled_flow += flow * weight;
    }

    let total_flow = flows.total_flow();
    let report = FlowReport {
        path_count: flows.len(),
        total_flow,
        direct_flow: flows.direct_flow(),
        non_direct_flow: flows.non_direct_flow(),
        excluded_flow: total_flow - compiled_flow,
        compiled_flow,
        term_flows: std::iter::once(base_flow)
            .chain(minus_flows)
            .chain(plus_flows)
            .collect(),
    };

    check("direct flow", report.direct_flow, report.compiled_flow)?;
    Ok(report)
}

/// The per-path part of a query; context and case clauses need journey data
/// the oracle does not simulate.
fn path_condition(query: &ParsedQuery) -> ParsedCondition {
    ParsedCondition {
        visited: query.visited.clone(),
        exclude: query.exclude.clone(),
        visited_any: query.visited_any.clone(),
        ..ParsedCondition::default()
    }
}

