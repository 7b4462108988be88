use indoc::indoc;

use super::{Cohort, DateRange, ExtraClause, check_query, parse_query, validate_query};
use crate::{Error, ParsedQuery};

fn parse_err(source: &str) -> String {
    match parse_query(source) {
        Err(Error::Parse(err)) => format!("[{}] {}", err.clause(), err),
        other => panic!("expected a parse error for {source:?}, got {other:?}"),
    }
}

#[test]
fn basic_query() {
    let query = parse_query("from(a).to(b).exclude(c).visited(d,e).visitedAny(f,g)").unwrap();

    assert_eq!(query.from_node.as_deref(), Some("a"));
    assert_eq!(query.to_node.as_deref(), Some("b"));
    assert_eq!(query.exclude, ["c"]);
    assert_eq!(query.visited, ["d", "e"]);
    assert_eq!(query.visited_any, [vec!["f".to_string(), "g".to_string()]]);
    assert_eq!(query.raw, "from(a).to(b).exclude(c).visited(d,e).visitedAny(f,g)");
}

#[test]
fn clause_names_are_case_insensitive() {
    let query = parse_query("FROM(a).To(b).VISITEDANY(x,y).Case(k:v)").unwrap();
    assert_eq!(query.from_node.as_deref(), Some("a"));
    assert_eq!(query.to_node.as_deref(), Some("b"));
    assert_eq!(query.visited_any.len(), 1);
    assert!(query.cases.contains(&("k".to_string(), "v".to_string())));
}

#[test]
fn repeated_clauses_accumulate() {
    let query = parse_query("visited(a).visited(b,a).visitedAny(x).visitedAny(y,y)").unwrap();
    assert_eq!(query.visited, ["a", "b"]);
    assert_eq!(
        query.visited_any,
        [vec!["x".to_string()], vec!["y".to_string()]]
    );
}

#[test]
fn pairs() {
    let query = parse_query("case(variant:treatment).context(channel:paid,device:ios)").unwrap();
    assert_eq!(query.cases.len(), 1);
    assert_eq!(query.contexts.len(), 2);
    assert!(query.contexts.contains(&("device".to_string(), "ios".to_string())));
}

#[test]
fn window_and_cohort() {
    let query = parse_query("window(1-Nov-25:7-Nov-25).cohort(signup,-30d:)").unwrap();
    assert_eq!(
        query.window,
        Some(DateRange {
            start: Some("1-Nov-25".into()),
            end: Some("7-Nov-25".into()),
        })
    );
    assert_eq!(
        query.cohort,
        Some(Cohort {
            anchor: Some("signup".into()),
            range: DateRange {
                start: Some("-30d".into()),
                end: None,
            },
        })
    );
}

#[test]
fn inclusion_exclusion_terms() {
    let query = parse_query("from(s).to(m).minus(a).minus(b).plus(a,b)").unwrap();
    assert_eq!(query.minus, [vec!["a".to_string()], vec!["b".to_string()]]);
    assert_eq!(query.plus, [vec!["a".to_string(), "b".to_string()]]);
}

#[test]
fn equality_ignores_clause_order_and_raw() {
    let a = parse_query("from(a).to(b).visited(c,d).case(k:v)").unwrap();
    let b = parse_query("case(k:v).visited(d).to(b).visited(c).from(a)").unwrap();
    assert_eq!(a, b);

    let c = parse_query("from(a).to(b).visited(c)").unwrap();
    assert_ne!(a, c);
}

#[test]
fn term_multiplicity_matters() {
    let once = parse_query("from(a).to(b).minus(c)").unwrap();
    let twice = parse_query("from(a).to(b).minus(c).minus(c)").unwrap();
    assert_ne!(once, twice);
}

#[test]
fn canonical_rendering() {
    let source = indoc! {"
        case(variant:b).exclude(x).from(a).visitedAny(p,q).to(b)
        .visited(c,d).context(channel:paid).window(:7-Nov-25)
        .cohort(a,1-Nov-25:7-Nov-25).minus(c).custom(z)
    "};
    let query = parse_query(source).unwrap();

    insta::assert_snapshot!(
        query.to_dsl(),
        @"from(a).to(b).visited(c,d).visitedAny(p,q).exclude(x).context(channel:paid).case(variant:b).window(:7-Nov-25).cohort(a,1-Nov-25:7-Nov-25).minus(c).custom(z)"
    );

    let reparsed = parse_query(&query.to_dsl()).unwrap();
    assert_eq!(reparsed, query);
}

#[test]
fn try_from_str() {
    let query = ParsedQuery::try_from("from(a).to(b)").unwrap();
    assert_eq!(query.to_dsl(), "from(a).to(b)");
}

#[test]
fn unknown_clause_is_kept_with_warning() {
    let source = "from(a).visted(b)";
    let (query, diagnostics) = check_query(source).unwrap();

    assert!(diagnostics.has_warnings());
    assert!(!diagnostics.has_errors());
    assert_eq!(
        query.extra,
        [ExtraClause {
            name: "visted".into(),
            args: vec!["b".into()],
        }]
    );
    insta::assert_snapshot!(
        diagnostics.printer(source).render_plain(),
        @"warning at 8..14: unknown clause `visted` (fix: did you mean `visited`?)"
    );
}

#[test]
fn parse_errors_cite_the_clause() {
    insta::assert_snapshot!(parse_err("from(a).visited(b"), @"[visited] malformed clause `visited`: missing closing `)`");
    insta::assert_snapshot!(parse_err("(a)"), @"[] malformed query: clause name is empty");
    insta::assert_snapshot!(parse_err(""), @"[] malformed query: expected a clause");
    insta::assert_snapshot!(parse_err("minus(from(a).to(b))"), @"[minus] malformed clause `minus`: missing closing `)`");
}

#[test]
fn shape_errors() {
    insta::assert_snapshot!(parse_err("from(a).from(b)"), @"[from] malformed clause `from`: `from` is given more than once");
    insta::assert_snapshot!(parse_err("from(a,b)"), @"[from] malformed clause `from`: wrong number of arguments: `from` takes exactly one node");
    insta::assert_snapshot!(parse_err("visited()"), @"[visited] malformed clause `visited`: wrong number of arguments: `visited` needs at least one argument");
    insta::assert_snapshot!(parse_err("visited(k:v)"), @"[visited] malformed clause `visited`: expected a node id: found `k:v`");
    insta::assert_snapshot!(parse_err("case(a)"), @"[case] malformed clause `case`: expected a `key:value` pair: found `a`");
    insta::assert_snapshot!(parse_err("context(k:)"), @"[context] malformed clause `context`: expected a `key:value` pair: found `k:`");
    insta::assert_snapshot!(parse_err("window(x)"), @"[window] malformed clause `window`: expected a `start:end` range: found `x`");
}

#[test]
fn parse_error_keeps_all_diagnostics() {
    let Err(Error::Parse(err)) = parse_query("from(a,b).to(c).to(d)") else {
        panic!("expected a parse error");
    };
    assert_eq!(err.diagnostics().error_count(), 2);
    assert_eq!(err.clause(), "from");
}

#[test]
fn validate_query_does_not_throw() {
    assert_eq!(validate_query("from(a).to(b)"), (true, None));
    assert_eq!(
        validate_query("from("),
        (
            false,
            Some("malformed clause `from`: missing closing `)`".to_string())
        )
    );
    assert_eq!(
        validate_query("from(a).to(b).visited(é)"),
        (
            false,
            Some("malformed clause `visited`: unexpected token: `é`".to_string())
        )
    );
}

#[test]
fn broken_clauses_skip_shape_checks() {
    insta::assert_snapshot!(parse_err("from(a,b"), @"[from] malformed clause `from`: missing closing `)`");
    insta::assert_snapshot!(parse_err("from(a).visited(;)"), @"[visited] malformed clause `visited`: unexpected token: `;`");
    insta::assert_snapshot!(parse_err("visited(a(b))"), @"[visited] malformed clause `visited`: nested parentheses are not allowed in arguments");

    let Err(Error::Parse(err)) = parse_query("to(b).from(") else {
        panic!("expected a parse error");
    };
    assert_eq!(err.diagnostics().error_count(), 1);
}
