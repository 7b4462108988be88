use super::{ArgItem, parse};

fn item_summary(item: &ArgItem) -> String {
    match item {
        ArgItem::Arg(arg) => arg.value().map(|t| t.text().to_owned()).unwrap_or_default(),
        ArgItem::Pair(pair) => format!(
            "{}:{}",
            pair.key().map(|t| t.text().to_owned()).unwrap_or_default(),
            pair.value().map(|t| t.text().to_owned()).unwrap_or_default()
        ),
    }
}

#[test]
fn clause_names_and_items() {
    let result = parse("from(a).visited(b, c).case(k:v).window(:2025-01-07)");
    let summary: Vec<String> = result
        .root
        .clauses()
        .map(|clause| {
            let items: Vec<String> = clause.items().iter().map(item_summary).collect();
            format!("{} [{}]", clause.name_text(), items.join(" "))
        })
        .collect();

    insta::assert_snapshot!(summary.join("\n"), @r"
    from [a]
    visited [b c]
    case [k:v]
    window [:2025-01-07]
    ");
}

#[test]
fn clause_without_name() {
    let result = parse("(a)");
    let clause = result.root.clauses().next().unwrap();
    assert!(clause.name().is_none());
    assert_eq!(clause.name_text(), "");
    assert!(clause.is_closed());
}

#[test]
fn unclosed_clause_is_not_closed() {
    let result = parse("from(a");
    let clause = result.root.clauses().next().unwrap();
    assert!(!clause.is_closed());
    assert_eq!(clause.items().len(), 1);
}

#[test]
fn recovered_tokens_mark_the_arg_list() {
    let result = parse("visited(a;b).to(c)");
    let lists: Vec<bool> = result
        .root
        .clauses()
        .filter_map(|c| c.args())
        .map(|args| args.has_errors())
        .collect();
    assert_eq!(lists, [true, false]);
}

#[test]
fn clause_without_args() {
    let result = parse("from.to(b)");
    let clause = result.root.clauses().next().unwrap();
    assert!(clause.args().is_none());
    assert!(clause.items().is_empty());
}

#[test]
fn text_ranges_exclude_leading_separator() {
    let result = parse("from(a).to(b)");
    let ranges: Vec<String> = result
        .root
        .clauses()
        .map(|c| format!("{:?}", c.text_range()))
        .collect();
    assert_eq!(ranges, ["0..7", "8..13"]);
}
