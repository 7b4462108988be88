//! Parser infrastructure for the query language.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace collected, then attached as leading trivia
//! - Checkpoint-based wrapping: an argument becomes a `Pair` once its `:` is seen
//!
//! # Recovery Strategy
//!
//! The parser is resilient, it always produces a tree:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. A `.` inside an argument list closes it, so one missing `)` does not swallow
//!    the rest of the query

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod ast_tests;
#[cfg(test)]
mod cst_tests;
#[cfg(test)]
mod lexer_tests;

use std::fmt::Write;

use rowan::NodeOrToken;

pub use ast::{Arg, ArgItem, ArgList, Clause, Pair, Root};
pub use core::{ParseResult, Parser};
pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

use lexer::lex;

/// Main entry point. Never fails; problems land in `ParseResult::diagnostics`.
pub fn parse(source: &str) -> ParseResult {
    Parser::new(source, lex(source)).parse()
}

/// Indented tree dump without trivia, one element per line.
pub fn dump_cst(node: &SyntaxNode) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = format_cst(node, 0, &mut out);
    out
}

fn format_cst(node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
    let prefix = "  ".repeat(indent);
    writeln!(w, "{}{:?}", prefix, node.kind())?;

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(n) => format_cst(&n, indent + 1, w)?,
            NodeOrToken::Token(t) => {
                if !t.kind().is_trivia() {
                    writeln!(w, "{}  {:?} {:?}", prefix, t.kind(), t.text())?;
                }
            }
        }
    }
    Ok(())
}
