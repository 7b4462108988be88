//! Diagnostics collected while parsing and lowering a query.
//!
//! Parsing and lowering both report into one [`Diagnostics`]. Because a
//! broken clause tends to trip several checks at once, consumers read
//! [`Diagnostics::filtered`] (or [`Diagnostics::first_error`]) instead of the
//! raw list.

mod message;
mod printer;


use rowan::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};
pub use printer::DiagnosticsPrinter;

use message::{Fix, RelatedInfo};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a diagnostic with the kind's fallback message.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity() == severity)
            .count()
    }

    /// Earliest error that survives [`filtered`](Self::filtered).
    pub fn first_error(&self) -> Option<DiagnosticMessage> {
        self.filtered()
            .into_iter()
            .filter(DiagnosticMessage::is_error)
            .min_by_key(|m| m.range.start())
    }

    /// Diagnostics with follow-up noise removed. `b` is dropped when some
    /// other diagnostic `a` hides it:
    ///
    /// 1. `a` is a syntax error overlapping the shape error `b`. The clause
    ///    did not parse, so its arity and argument kinds mean nothing.
    /// 2. `a` has higher priority and its span strictly contains `b`'s.
    /// 3. Both start at the same offset and `a` has higher priority, except
    ///    that a missing name or `(` beats the unclosed clause it causes.
    pub(crate) fn filtered(&self) -> Vec<DiagnosticMessage> {
        self.messages
            .iter()
            .enumerate()
            .filter(|&(j, b)| {
                !self
                    .messages
                    .iter()
                    .enumerate()
                    .any(|(i, a)| i != j && hides(a, b))
            })
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn printer<'a>(&self, source: &'a str) -> DiagnosticsPrinter<'a> {
        DiagnosticsPrinter::new(self.filtered(), source)
    }

    pub fn render(&self, source: &str) -> String {
        self.printer(source).render()
    }

    pub fn render_colored(&self, source: &str, colored: bool) -> String {
        self.printer(source).colored(colored).render()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl DiagnosticBuilder<'_> {
    /// Fill the kind's message template with `detail`.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn related_to(mut self, msg: impl Into<String>, range: TextRange) -> Self {
        self.message.related.push(RelatedInfo::new(range, msg));
        self
    }

    pub fn fix(mut self, description: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.message.fix = Some(Fix::new(replacement, description));
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}

fn hides(a: &DiagnosticMessage, b: &DiagnosticMessage) -> bool {
    if a.kind.is_syntax_error() && b.kind.is_shape_error() && overlaps(a.range, b.range) {
        return true;
    }
    if a.kind.suppresses(&b.kind) && strictly_contains(a.range, b.range) {
        return true;
    }
    if a.range.start() != b.range.start() {
        return false;
    }
    if a.kind.is_root_cause_error() && b.kind.is_structural_error() {
        return true;
    }
    !(a.kind.is_structural_error() && b.kind.is_root_cause_error()) && a.kind.suppresses(&b.kind)
}

fn strictly_contains(outer: TextRange, inner: TextRange) -> bool {
    outer.start() < inner.start() && inner.end() <= outer.end()
}

/// Empty spans count as overlapping the span they sit in.
fn overlaps(a: TextRange, b: TextRange) -> bool {
    if a.is_empty() {
        return b.contains(a.start());
    }
    if b.is_empty() {
        return a.contains(b.start());
    }
    a.start() < b.end() && b.start() < a.end()
}
