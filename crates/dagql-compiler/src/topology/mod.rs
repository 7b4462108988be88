//! Local branching structure around an edge `S -> T`.
//!
//! The merge node bounds the inclusion-exclusion problem to the region
//! between `S` and the first place its branches reconverge, instead of the
//! graph sink. Unknown nodes and missing paths are not errors here: they
//! produce an empty hop set, which compiles to the trivial query.

mod hops;
mod merge;


pub use hops::{CompetingHopSet, get_competing_first_hops};
pub use merge::find_minimal_merge;

pub(crate) use hops::competing_hops_ix;
pub(crate) use merge::minimal_merge_ix;
