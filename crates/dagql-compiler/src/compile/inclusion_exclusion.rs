//! Inclusion-exclusion term generation.
//!
//! Every simple path `S -> M` is reduced to a bitmask of the competing hops
//! among its interior nodes. Both optimizations are questions about those
//! masks:
//!
//! - dominance: every mask containing `h1` also contains `h2`
//! - reachability: some mask is a superset of the subset
//!
//! Masks are 64-bit, which caps the number of competing hops.

use std::collections::BTreeSet;

use dagql_core::{ConversionGraph, NodeIx};
use serde::Serialize;
use tracing::{debug, trace};

use super::combinations::Combinations;
use super::{CompileError, MAX_BRANCHES, Term};

/// A hop dropped because another active hop already covers its traffic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dominance {
    pub hop: String,
    pub by: String,
}

/// Output of the inclusion-exclusion pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InclusionExclusion {
    /// Hops left after dominance elimination, sorted by id.
    pub active_hops: Vec<String>,
    pub dominated: Vec<Dominance>,
    /// Base term first, then reachable subsets by size, then by member id.
    pub terms: Vec<Term>,
    /// Subsets enumerated but never realized by a path.
    pub pruned: usize,
}

/// Signed terms that reproduce "reach `merge` from `split` without visiting
/// any of `hops`" using only `visited` funnels.
///
/// Unknown nodes contribute no paths; the result is then just the base term.
pub fn inclusion_exclusion_terms(
    graph: &ConversionGraph,
    split: &str,
    merge: &str,
    hops: &[String],
) -> Result<InclusionExclusion, CompileError> {
    let (Some(s), Some(m)) = (graph.node_ix(split), graph.node_ix(merge)) else {
        return Ok(InclusionExclusion {
            active_hops: Vec::new(),
            dominated: Vec::new(),
            terms: vec![Term::base(split, merge)],
            pruned: 0,
        });
    };

    let mut hop_ix: Vec<NodeIx> = hops.iter().filter_map(|h| graph.node_ix(h)).collect();
    hop_ix.sort_by(|&a, &b| graph.node_id(a).cmp(graph.node_id(b)));
    hop_ix.dedup();

    plan_ix(graph, s, m, &hop_ix)
}

/// `hops` must be sorted by node id.
pub(crate) fn plan_ix(
    graph: &ConversionGraph,
    split: NodeIx,
    merge: NodeIx,
    hops: &[NodeIx],
) -> Result<InclusionExclusion, CompileError> {
    if hops.len() > MAX_BRANCHES {
        return Err(CompileError::TooManyBranches {
            count: hops.len(),
            limit: MAX_BRANCHES,
        });
    }

    let split_id = graph.node_id(split);
    let merge_id = graph.node_id(merge);
    let ids: Vec<String> = graph.ids(hops).into_iter().map(str::to_owned).collect();
    let masks = PathMasks::collect(graph, split, merge, hops);

    // Dominance: sequential, so two hops that always co-occur cannot
    // eliminate each other.
    let mut active = vec![true; hops.len()];
    let mut dominated = Vec::new();
    for i in 0..hops.len() {
        let by = (0..hops.len()).find(|&j| j != i && active[j] && masks.dominated_by(i, j));
        if let Some(j) = by {
            active[i] = false;
            debug!(hop = %ids[i], by = %ids[j], "dominated hop eliminated");
            dominated.push(Dominance {
                hop: ids[i].clone(),
                by: ids[j].clone(),
            });
        }
    }

    let active_ix: Vec<usize> = (0..hops.len()).filter(|&i| active[i]).collect();
    let mut terms = vec![Term::base(split_id, merge_id)];
    let mut pruned = 0usize;

    for size in 1..=active_ix.len() {
        let mut reachable = 0usize;
        for combo in Combinations::new(active_ix.len(), size) {
            let subset = combo
                .iter()
                .fold(0u64, |acc, &c| acc | (1u64 << active_ix[c]));
            let members: Vec<String> = combo.iter().map(|&c| ids[active_ix[c]].clone()).collect();

            if masks.realizes(subset) {
                terms.push(Term::subset(split_id, merge_id, members));
                reachable += 1;
            } else {
                trace!(subset = ?members, "pruned unreachable subset");
                pruned += 1;
            }
        }
        // Supersets of unreachable subsets are unreachable too.
        if reachable == 0 {
            break;
        }
    }

    debug!(
        split = split_id,
        merge = merge_id,
        active = active_ix.len(),
        dominated = dominated.len(),
        terms = terms.len(),
        pruned,
        "inclusion-exclusion plan"
    );

    Ok(InclusionExclusion {
        active_hops: active_ix.iter().map(|&i| ids[i].clone()).collect(),
        dominated,
        terms,
        pruned,
    })
}

/// Distinct non-empty hop masks over all simple paths `S -> M`.
struct PathMasks {
    masks: Vec<u64>,
}

impl PathMasks {
    fn collect(graph: &ConversionGraph, split: NodeIx, merge: NodeIx, hops: &[NodeIx]) -> Self {
        let mut bit_of: Vec<Option<u32>> = vec![None; graph.node_count()];
        for (bit, hop) in hops.iter().enumerate() {
            bit_of[hop.index()] = Some(bit as u32);
        }

        let mut masks = BTreeSet::new();
        for path in graph.simple_paths(split, merge) {
            let interior = &path[1..path.len() - 1];
            let mask = interior
                .iter()
                .filter_map(|ix| bit_of[ix.index()])
                .fold(0u64, |acc, bit| acc | (1u64 << bit));
            if mask != 0 {
                masks.insert(mask);
            }
        }

        Self {
            masks: masks.into_iter().collect(),
        }
    }

    /// Some path visits every hop in `subset`.
    fn realizes(&self, subset: u64) -> bool {
        self.masks.iter().any(|&m| m & subset == subset)
    }

    /// Every path through `hop` also passes `by`.
    fn dominated_by(&self, hop: usize, by: usize) -> bool {
        let (hop_bit, by_bit) = (1u64 << hop, 1u64 << by);
        self.masks
            .iter()
            .filter(|&&m| m & hop_bit != 0)
            .all(|&m| m & by_bit != 0)
    }
}
