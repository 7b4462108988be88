use super::ClauseKind;

#[test]
fn names_match_case_insensitively() {
    assert_eq!(ClauseKind::from_name("from"), Some(ClauseKind::From));
    assert_eq!(ClauseKind::from_name("FROM"), Some(ClauseKind::From));
    assert_eq!(ClauseKind::from_name("visitedany"), Some(ClauseKind::VisitedAny));
    assert_eq!(ClauseKind::from_name("ContextAny"), Some(ClauseKind::ContextAny));
    assert_eq!(ClauseKind::from_name("fromm"), None);
    assert_eq!(ClauseKind::from_name(""), None);
}

#[test]
fn canonical_names_round_trip() {
    for kind in ClauseKind::ALL {
        assert_eq!(ClauseKind::from_name(kind.name()), Some(kind));
        assert_eq!(kind.to_string(), kind.name());
    }
}

#[test]
fn condition_whitelist() {
    let allowed: Vec<&str> = ClauseKind::ALL
        .into_iter()
        .filter(|k| k.allowed_in_condition())
        .map(ClauseKind::name)
        .collect();
    assert_eq!(allowed, ["exclude", "visited", "visitedAny", "case", "context"]);
}

#[test]
fn suggestions_for_typos() {
    assert_eq!(ClauseKind::suggest("visted"), Some(ClauseKind::Visited));
    assert_eq!(ClauseKind::suggest("exlcude"), Some(ClauseKind::Exclude));
    assert_eq!(ClauseKind::suggest("VisitedAnny"), Some(ClauseKind::VisitedAny));
    assert_eq!(ClauseKind::suggest("segment"), None);
}
