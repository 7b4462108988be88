use dagql_core::{ConversionGraph, ProviderCapability};
use tracing::debug;

use super::inclusion_exclusion::plan_ix;
use super::{CompileError, CompiledQuery, Strategy, Term};
use crate::topology::{competing_hops_ix, minimal_merge_ix};

/// Compile the edge `(split, target)` for a provider.
///
/// Unknown nodes and edges with no competing hops compile to the trivial
/// `from(S).to(M)`; they are not errors.
pub fn compile_query_for_edge(
    graph: &ConversionGraph,
    edge: (&str, &str),
    capability: &ProviderCapability,
) -> Result<CompiledQuery, CompileError> {
    let (split, target) = edge;
    let (Some(s), Some(t)) = (graph.node_ix(split), graph.node_ix(target)) else {
        debug!(split, target, "edge endpoint not in graph");
        return Ok(trivial(split, target, target));
    };

    let m = minimal_merge_ix(graph, s, t);
    let merge = graph.node_id(m);
    let hops_ix = competing_hops_ix(graph, s, t, m);
    let hops: Vec<String> = graph.ids(&hops_ix).into_iter().map(str::to_owned).collect();

    debug!(split, target, merge, hops = ?hops, "competing first hops");

    if hops.is_empty() {
        return Ok(trivial(split, target, merge));
    }

    if capability.supports_native_exclude {
        return Ok(native(split, target, merge, hops));
    }

    let plan = plan_ix(graph, s, m, &hops_ix)?;
    let query = std::iter::once(Term::base(split, merge).query)
        .chain(plan.terms.iter().filter_map(Term::clause))
        .collect::<Vec<_>>()
        .join(".");

    Ok(CompiledQuery {
        split: split.to_owned(),
        target: target.to_owned(),
        merge: merge.to_owned(),
        strategy: Strategy::InclusionExclusion,
        competing_hops: hops,
        active_hops: plan.active_hops,
        query,
        terms: plan.terms,
    })
}

/// Compile every edge of the graph, in edge order.
pub fn compile_all_edges(
    graph: &ConversionGraph,
    capability: &ProviderCapability,
) -> Result<Vec<CompiledQuery>, CompileError> {
    graph
        .edges()
        .map(|(from, to)| {
            compile_query_for_edge(graph, (graph.node_id(from), graph.node_id(to)), capability)
        })
        .collect()
}

fn trivial(split: &str, target: &str, merge: &str) -> CompiledQuery {
    let base = Term::base(split, merge);
    CompiledQuery {
        split: split.to_owned(),
        target: target.to_owned(),
        merge: merge.to_owned(),
        strategy: Strategy::Trivial,
        competing_hops: Vec::new(),
        active_hops: Vec::new(),
        query: base.query.clone(),
        terms: vec![base],
    }
}

/// `from(S).to(M).exclude(h1).exclude(h2)`, hops in id order.
fn native(split: &str, target: &str, merge: &str, hops: Vec<String>) -> CompiledQuery {
    let mut query = format!("from({split}).to({merge})");
    for hop in &hops {
        query.push_str(&format!(".exclude({hop})"));
    }
    let term = Term {
        query: query.clone(),
        coefficient: 1,
        visited: Vec::new(),
    };
    CompiledQuery {
        split: split.to_owned(),
        target: target.to_owned(),
        merge: merge.to_owned(),
        strategy: Strategy::NativeExclude,
        active_hops: hops.clone(),
        competing_hops: hops,
        query,
        terms: vec![term],
    }
}
