//! Grammar productions for the query language.
//!
//! ```text
//! Root    = Clause ("." Clause)*
//! Clause  = Word? "(" ArgList ")"
//! ArgList = (Arg | Pair) ("," (Arg | Pair))*
//! Arg     = Word
//! Pair    = Word? ":" Word?
//! ```
//!
//! Nested parentheses inside an argument list are a structural error, not a
//! sub-expression.

use rowan::TextRange;

use super::core::Parser;
use super::cst::SyntaxKind;
use super::cst::token_sets::{ARG_FIRST, ARGS_RECOVERY, CLAUSE_FIRST};
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub(super) fn parse_root(&mut self) {
        self.open(SyntaxKind::Root);

        if self.at_eof() {
            self.error(DiagnosticKind::ExpectedClause);
        } else {
            self.parse_clause();
        }

        while !self.at_eof() {
            if self.eat(SyntaxKind::Dot) {
                if self.at_eof() {
                    self.error_with(DiagnosticKind::ExpectedClause, "after trailing `.`");
                    break;
                }
                self.parse_clause();
            } else if self.at_any(CLAUSE_FIRST) {
                self.error(DiagnosticKind::MissingClauseSeparator);
                self.parse_clause();
            } else {
                self.unexpected();
            }
        }

        self.flush_trivia();
        self.close();
    }

    /// `name(args)`. Reports and returns without consuming when the next
    /// token cannot start a clause; the root loop resynchronizes.
    fn parse_clause(&mut self) {
        if !self.at_any(CLAUSE_FIRST) {
            self.error(DiagnosticKind::ExpectedClause);
            return;
        }

        self.open(SyntaxKind::Clause);

        if !self.eat(SyntaxKind::Word) {
            self.error(DiagnosticKind::EmptyClauseName);
        }

        if !self.at(SyntaxKind::ParenOpen) {
            let name_end = self.prev_end().unwrap_or_else(|| self.end_offset());
            self.error_in(
                DiagnosticKind::ExpectedArguments,
                TextRange::empty(name_end),
                None,
            );
            self.close();
            return;
        }

        let open = self.peek_span();
        self.assert_at(SyntaxKind::ParenOpen);
        self.advance();

        self.parse_arg_list();

        if !self.eat(SyntaxKind::ParenClose) {
            self.error_unclosed(open);
        }

        self.close();
    }

    fn parse_arg_list(&mut self) {
        self.open(SyntaxKind::ArgList);

        // Whether the next thing should be an argument rather than a `,`.
        let mut want_arg = true;
        let mut any = false;

        while let Some(kind) = self.peek() {
            if ARGS_RECOVERY.contains(kind) {
                break;
            }
            match kind {
                SyntaxKind::Comma => {
                    if want_arg {
                        self.error(DiagnosticKind::EmptyArgument);
                    }
                    self.advance();
                    want_arg = true;
                }
                SyntaxKind::ParenOpen => {
                    self.parse_nested_parens();
                    want_arg = false;
                }
                kind if ARG_FIRST.contains(kind) => {
                    if !want_arg {
                        self.error(DiagnosticKind::MissingComma);
                    }
                    self.parse_arg();
                    want_arg = false;
                }
                _ => {
                    self.unexpected();
                    continue;
                }
            }
            any = true;
        }

        if any && want_arg {
            // `a,)`: the trailing comma has nothing after it
            self.error_with(DiagnosticKind::EmptyArgument, "after trailing `,`");
        }

        self.close();
    }

    /// `value` or `key:value`. Either side of a pair may be empty.
    fn parse_arg(&mut self) {
        let mark = self.mark();

        self.eat(SyntaxKind::Word);

        if self.at(SyntaxKind::Colon) {
            self.open_at(mark, SyntaxKind::Pair);
            self.advance();
            self.eat(SyntaxKind::Word);
        } else {
            self.open_at(mark, SyntaxKind::Arg);
        }

        self.close();
    }

    /// Swallow a balanced `( ... )` group into one `Error` node.
    fn parse_nested_parens(&mut self) {
        let start = self.peek_span().start();
        self.open(SyntaxKind::Error);

        let mut depth = 0usize;
        while let Some(kind) = self.peek() {
            match kind {
                SyntaxKind::ParenOpen => depth += 1,
                SyntaxKind::ParenClose => depth -= 1,
                _ => {}
            }
            self.advance();
            if depth == 0 {
                break;
            }
        }

        self.close();

        let end = self.prev_end().unwrap_or(start);
        self.error_in(
            DiagnosticKind::NestedParentheses,
            TextRange::new(start, end),
            None,
        );
    }

    fn unexpected(&mut self) {
        let range = self.peek_span();
        let detail = format!("`{}`", self.peek_text());
        self.error_in(DiagnosticKind::UnexpectedToken, range, Some(&detail));
        self.advance_as_error();
    }
}
