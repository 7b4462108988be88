//! Tokenizer for query text.
//!
//! Tokens are `(kind, span)` pairs; text is sliced from the source on demand.
//! Each run of characters logos rejects becomes a single `Garbage` token.

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[std::ops::Range::<usize>::from(self.span)]
    }
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for (result, span) in SyntaxKind::lexer(source).spanned() {
        let kind = result.unwrap_or(SyntaxKind::Garbage);
        let span = TextRange::new(
            TextSize::new(span.start as u32),
            TextSize::new(span.end as u32),
        );

        match tokens.last_mut() {
            Some(prev) if kind == SyntaxKind::Garbage && prev.kind == SyntaxKind::Garbage => {
                prev.span = prev.span.cover(span);
            }
            _ => tokens.push(Token { kind, span }),
        }
    }

    tokens
}
