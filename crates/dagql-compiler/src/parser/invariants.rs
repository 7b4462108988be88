//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::cst::SyntaxKind;

impl Parser<'_> {
    #[inline]
    pub(super) fn ensure_progress(&self) {
        let left = self.fuel.get();
        assert!(left != 0, "parser is stuck: too many lookaheads without a bump");
        self.fuel.set(left - 1);
    }

    #[inline]
    pub(super) fn assert_not_eof(&self) {
        assert!(
            self.pos < self.tokens.len(),
            "broken parser invariant: advance at end of input"
        );
    }

    #[inline]
    pub(super) fn assert_at(&mut self, expected: SyntaxKind) {
        let found = self.peek();
        assert_eq!(
            found,
            Some(expected),
            "broken parser invariant: expected {expected:?}, found {found:?}"
        );
    }
}
