//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{ConversionGraph, NodeIx};

impl ConversionGraph {
    #[inline]
    pub(crate) fn ensure_ix(&self, ix: NodeIx) {
        assert!(
            ix.index() < self.node_count(),
            "ConversionGraph: node handle {} out of range (graph has {} nodes)",
            ix.index(),
            self.node_count()
        );
    }
}
