//! Token cursor and tree-building primitives used by the grammar.

use std::cell::Cell;

use rowan::{Checkpoint, GreenNodeBuilder, TextRange, TextSize};

use super::ast::Root;
use super::cst::{SyntaxKind, SyntaxNode, TokenSet};
use super::lexer::Token;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Lookaheads allowed between two consumed tokens.
pub(super) const FUEL: u32 = 256;

#[derive(Debug)]
pub struct ParseResult {
    pub root: Root,
    pub diagnostics: Diagnostics,
}

/// Whitespace is held in `pending_trivia` and written just before the next
/// token or node, so no node ends in whitespace.
pub struct Parser<'src> {
    source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pending_trivia: Vec<Token>,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    last_error_at: Option<TextSize>,
    pub(super) fuel: Cell<u32>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            pending_trivia: Vec::new(),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            last_error_at: None,
            fuel: Cell::new(FUEL),
        }
    }

    /// The tree always covers the whole input; problems go to `diagnostics`.
    pub fn parse(mut self) -> ParseResult {
        self.parse_root();

        let green = self.builder.finish();
        let root = Root::cast(SyntaxNode::new_root(green)).unwrap_or_else(|| {
            unreachable!("parse_root always opens a Root node");
        });
        ParseResult {
            root,
            diagnostics: self.diagnostics,
        }
    }

    /// Kind of the next non-trivia token, `None` at end of input.
    pub(super) fn peek(&mut self) -> Option<SyntaxKind> {
        self.ensure_progress();
        self.skip_trivia();
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    pub(super) fn at_eof(&mut self) -> bool {
        self.skip_trivia();
        self.pos >= self.tokens.len()
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.peek() == Some(kind)
    }

    pub(super) fn at_any(&mut self, set: TokenSet) -> bool {
        self.peek().is_some_and(|kind| set.contains(kind))
    }

    /// Span of the next token, or an empty span at the end of input.
    pub(super) fn peek_span(&mut self) -> TextRange {
        self.skip_trivia();
        match self.tokens.get(self.pos) {
            Some(token) => token.span,
            None => TextRange::empty(self.end_offset()),
        }
    }

    pub(super) fn peek_text(&mut self) -> &'src str {
        self.skip_trivia();
        let source = self.source;
        self.tokens.get(self.pos).map_or("", |t| t.text(source))
    }

    pub(super) fn end_offset(&self) -> TextSize {
        TextSize::of(self.source)
    }

    /// End of the last consumed non-trivia token.
    pub(super) fn prev_end(&self) -> Option<TextSize> {
        self.tokens[..self.pos]
            .iter()
            .rev()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.span.end())
    }

    fn skip_trivia(&mut self) {
        while let Some(&token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.pending_trivia.push(token);
            self.pos += 1;
        }
    }

    pub(super) fn flush_trivia(&mut self) {
        let source = self.source;
        for token in self.pending_trivia.drain(..) {
            self.builder.token(token.kind.into(), token.text(source));
        }
    }

    /// Move the next token into the open node.
    pub(super) fn advance(&mut self) {
        self.assert_not_eof();
        self.fuel.set(FUEL);
        self.flush_trivia();

        let token = self.tokens[self.pos];
        self.builder.token(token.kind.into(), token.text(self.source));
        self.pos += 1;
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        let found = self.at(kind);
        if found {
            self.advance();
        }
        found
    }

    /// Wrap the next token in its own `Error` node.
    pub(super) fn advance_as_error(&mut self) {
        self.open(SyntaxKind::Error);
        self.advance();
        self.close();
    }

    pub(super) fn open(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    /// Retroactively open `kind` so it starts at `mark`.
    pub(super) fn open_at(&mut self, mark: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(mark, kind.into());
    }

    pub(super) fn close(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn mark(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    /// Error at the next token.
    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let range = self.peek_span();
        self.error_in(kind, range, None);
    }

    pub(super) fn error_with(&mut self, kind: DiagnosticKind, detail: &str) {
        let range = self.peek_span();
        self.error_in(kind, range, Some(detail));
    }

    /// At most one error per offset, so recovery loops cannot repeat themselves.
    pub(super) fn error_in(&mut self, kind: DiagnosticKind, range: TextRange, detail: Option<&str>) {
        if !self.claim_offset(range.start()) {
            return;
        }
        let builder = self.diagnostics.report(kind, range);
        match detail {
            Some(detail) => builder.message(detail).emit(),
            None => builder.emit(),
        }
    }

    /// `open` is the unmatched `(`. The reported span runs up to the next
    /// token so errors inside the clause are hidden behind it.
    pub(super) fn error_unclosed(&mut self, open: TextRange) {
        let here = self.peek_span();
        if !self.claim_offset(here.start()) {
            return;
        }
        self.diagnostics
            .report(DiagnosticKind::UnclosedClause, open.cover(here))
            .related_to("clause started here", open)
            .emit();
    }

    fn claim_offset(&mut self, offset: TextSize) -> bool {
        self.last_error_at.replace(offset) != Some(offset)
    }
}
