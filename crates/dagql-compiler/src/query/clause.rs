//! Recognized clause names.

use std::fmt;

/// Every clause the language interprets. Names match case-insensitively;
/// [`ClauseKind::name`] is the canonical spelling used when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClauseKind {
    From,
    To,
    Exclude,
    Visited,
    VisitedAny,
    Case,
    Context,
    ContextAny,
    Window,
    Cohort,
    /// Inclusion-exclusion term subtracted from the base funnel.
    Minus,
    /// Inclusion-exclusion term added back to the base funnel.
    Plus,
}

impl ClauseKind {
    pub const ALL: [ClauseKind; 12] = [
        Self::From,
        Self::To,
        Self::Exclude,
        Self::Visited,
        Self::VisitedAny,
        Self::Case,
        Self::Context,
        Self::ContextAny,
        Self::Window,
        Self::Cohort,
        Self::Minus,
        Self::Plus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::From => "from",
            Self::To => "to",
            Self::Exclude => "exclude",
            Self::Visited => "visited",
            Self::VisitedAny => "visitedAny",
            Self::Case => "case",
            Self::Context => "context",
            Self::ContextAny => "contextAny",
            Self::Window => "window",
            Self::Cohort => "cohort",
            Self::Minus => "minus",
            Self::Plus => "plus",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Clauses an edge-activation condition may carry.
    pub fn allowed_in_condition(self) -> bool {
        matches!(
            self,
            Self::Visited | Self::Exclude | Self::VisitedAny | Self::Case | Self::Context
        )
    }

    /// Closest known clause for a misspelled name, within edit distance 2.
    pub fn suggest(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .map(|kind| (kind, levenshtein(&kind.name().to_ascii_lowercase(), &lower)))
            .filter(|&(_, distance)| distance <= 2)
            .min_by_key(|&(_, distance)| distance)
            .map(|(kind, _)| kind)
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
