use super::cst::SyntaxKind;
use super::lexer::lex;

fn tokens(source: &str) -> String {
    lex(source)
        .iter()
        .map(|t| format!("{:?} {:?}", t.kind, t.text(source)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn clause_chain() {
    insta::assert_snapshot!(tokens("from(a).to(b)"), @r#"
    Word "from"
    ParenOpen "("
    Word "a"
    ParenClose ")"
    Dot "."
    Word "to"
    ParenOpen "("
    Word "b"
    ParenClose ")"
    "#);
}

#[test]
fn pairs_and_whitespace() {
    insta::assert_snapshot!(tokens("case(k: v)"), @r#"
    Word "case"
    ParenOpen "("
    Word "k"
    Colon ":"
    Whitespace " "
    Word "v"
    ParenClose ")"
    "#);
}

#[test]
fn dates_are_single_words() {
    insta::assert_snapshot!(tokens("window(1-Nov-25:-30d)"), @r#"
    Word "window"
    ParenOpen "("
    Word "1-Nov-25"
    Colon ":"
    Word "-30d"
    ParenClose ")"
    "#);
}

#[test]
fn unknown_characters_coalesce_into_garbage() {
    let source = "a;;&b";
    let lexed = lex(source);
    assert_eq!(lexed.len(), 3);
    assert_eq!(lexed[1].kind, SyntaxKind::Garbage);
    assert_eq!(lexed[1].text(source), ";;&");
}

#[test]
fn trailing_garbage() {
    let source = "from(a)$";
    let lexed = lex(source);
    let last = lexed.last().unwrap();
    assert_eq!(last.kind, SyntaxKind::Garbage);
    assert_eq!(last.text(source), "$");
}

#[test]
fn empty_source() {
    assert!(lex("").is_empty());
}
