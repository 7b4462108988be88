//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens in lowering.

use rowan::TextRange;

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            pub fn text_range(&self) -> TextRange {
                self.0.text_range()
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(Clause, Clause);
ast_node!(ArgList, ArgList);
ast_node!(Arg, Arg);
ast_node!(Pair, Pair);

/// One comma-separated entry of an argument list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgItem {
    Arg(Arg),
    Pair(Pair),
}

impl ArgItem {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Arg => Arg::cast(node).map(ArgItem::Arg),
            SyntaxKind::Pair => Pair::cast(node).map(ArgItem::Pair),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            ArgItem::Arg(n) => n.as_cst(),
            ArgItem::Pair(n) => n.as_cst(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.as_cst().text_range()
    }
}

fn words(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(|t| t.kind() == SyntaxKind::Word)
}

impl Root {
    pub fn clauses(&self) -> impl Iterator<Item = Clause> + '_ {
        self.0.children().filter_map(Clause::cast)
    }
}

impl Clause {
    pub fn name(&self) -> Option<SyntaxToken> {
        words(&self.0).next()
    }

    /// Clause name as written, or `""` when missing.
    pub fn name_text(&self) -> String {
        self.name().map(|t| t.text().to_owned()).unwrap_or_default()
    }

    pub fn args(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }

    pub fn items(&self) -> Vec<ArgItem> {
        self.args()
            .map(|list| list.items().collect())
            .unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .any(|t| t.kind() == SyntaxKind::ParenClose)
    }
}

impl ArgList {
    pub fn items(&self) -> impl Iterator<Item = ArgItem> + '_ {
        self.0.children().filter_map(ArgItem::cast)
    }

    /// Whether recovery wrapped anything in the list into an `Error` node.
    pub fn has_errors(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::Error)
    }
}

impl Arg {
    pub fn value(&self) -> Option<SyntaxToken> {
        words(&self.0).next()
    }
}

impl Pair {
    pub fn key(&self) -> Option<SyntaxToken> {
        self.side(true)
    }

    pub fn value(&self) -> Option<SyntaxToken> {
        self.side(false)
    }

    fn side(&self, before_colon: bool) -> Option<SyntaxToken> {
        let mut past_colon = false;
        for token in self.0.children_with_tokens().filter_map(|it| it.into_token()) {
            match token.kind() {
                SyntaxKind::Colon => past_colon = true,
                SyntaxKind::Word if past_colon != before_colon => return Some(token),
                _ => {}
            }
        }
        None
    }
}
