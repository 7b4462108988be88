use super::combinations::Combinations;

fn render(n: usize, k: usize) -> String {
    Combinations::new(n, k)
        .map(|c| format!("{c:?}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn lexicographic_order() {
    insta::assert_snapshot!(render(4, 2), @"[0, 1] [0, 2] [0, 3] [1, 2] [1, 3] [2, 3]");
    insta::assert_snapshot!(render(3, 3), @"[0, 1, 2]");
    insta::assert_snapshot!(render(3, 1), @"[0] [1] [2]");
}

#[test]
fn counts_match_binomials() {
    assert_eq!(Combinations::new(6, 3).count(), 20);
    assert_eq!(Combinations::new(10, 4).count(), 210);
}

#[test]
fn degenerate_sizes() {
    assert_eq!(Combinations::new(3, 0).count(), 0);
    assert_eq!(Combinations::new(2, 3).count(), 0);
    assert_eq!(Combinations::new(0, 1).count(), 0);
}

#[test]
fn is_lazy() {
    let mut combos = Combinations::new(40, 20);
    assert_eq!(combos.next(), Some((0..20).collect()));
}
