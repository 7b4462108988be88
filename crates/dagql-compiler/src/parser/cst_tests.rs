use rowan::Language;

use super::cst::{DagLang, SyntaxKind::*, TokenSet, token_sets};

#[test]
fn token_set_contains() {
    let set = TokenSet::new(&[ParenOpen, ParenClose, Dot]);
    assert!(set.contains(ParenOpen));
    assert!(set.contains(ParenClose));
    assert!(set.contains(Dot));
    assert!(!set.contains(Comma));
    assert!(!set.contains(Word));
}

#[test]
fn token_set_union() {
    let c = TokenSet::new(&[ParenOpen]).union(TokenSet::new(&[Colon]));
    assert!(c.contains(ParenOpen));
    assert!(c.contains(Colon));
    assert!(!c.contains(Dot));
    assert!(!TokenSet::EMPTY.contains(ParenOpen));
}

#[test]
fn token_set_debug() {
    insta::assert_snapshot!(format!("{:?}", token_sets::ARG_FIRST), @"{Colon, Word}");
}

#[test]
fn node_kinds_are_outside_token_sets() {
    assert!(!token_sets::CLAUSE_FIRST.contains(Clause));
    assert!(!token_sets::ARGS_RECOVERY.contains(Root));
}

#[test]
fn trivia_and_errors() {
    assert!(Whitespace.is_trivia());
    assert!(!Word.is_trivia());
    assert!(Garbage.is_error());
    assert!(Error.is_error());
    assert!(!Dot.is_error());
}

#[test]
fn syntax_kind_count_under_32() {
    assert!(
        (__LAST as u16) < 32,
        "SyntaxKind has {} variants, exceeds TokenSet capacity of 32",
        __LAST as u16
    );
}

#[test]
fn raw_kind_round_trip() {
    for kind in [ParenOpen, Word, Garbage, Root, Pair] {
        let raw = DagLang::kind_to_raw(kind);
        assert_eq!(DagLang::kind_from_raw(raw), kind);
    }
}
