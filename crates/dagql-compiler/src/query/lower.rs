//! Lowering from the CST into a [`ParsedQuery`].
//!
//! Lowering is lenient: it walks whatever tree the parser produced and adds
//! shape diagnostics (arity, pairs vs. nodes, duplicates). The caller decides
//! whether the combined diagnostics make the query unusable.

use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::{ArgItem, Clause, Root};

use super::{ClauseKind, Cohort, DateRange, ExtraClause, ParsedQuery};

pub(super) struct Lowerer<'d> {
    query: ParsedQuery,
    diagnostics: &'d mut Diagnostics,
}

impl<'d> Lowerer<'d> {
    pub(super) fn lower(root: &Root, raw: &str, diagnostics: &'d mut Diagnostics) -> ParsedQuery {
        let mut lowerer = Self {
            query: ParsedQuery {
                raw: raw.to_owned(),
                ..ParsedQuery::default()
            },
            diagnostics,
        };
        for clause in root.clauses() {
            lowerer.lower_clause(&clause);
        }
        lowerer.query
    }

    fn lower_clause(&mut self, clause: &Clause) {
        // The parser already reported why this clause is broken; checking its
        // shape would only add follow-up errors.
        let Some(name) = clause.name() else {
            return;
        };
        if !clause.is_closed() || clause.args().is_none_or(|args| args.has_errors()) {
            return;
        }

        let items = clause.items();
        let Some(kind) = ClauseKind::from_name(name.text()) else {
            self.lower_unknown(name.text(), name.text_range(), &items);
            return;
        };

        if items.is_empty() {
            self.report(
                DiagnosticKind::WrongArity,
                clause.text_range(),
                format!("`{kind}` needs at least one argument"),
            );
            return;
        }

        match kind {
            ClauseKind::From | ClauseKind::To => self.lower_endpoint(kind, clause, &items),
            ClauseKind::Exclude => {
                let nodes = self.nodes(&items);
                extend_unique(&mut self.query.exclude, nodes);
            }
            ClauseKind::Visited => {
                let nodes = self.nodes(&items);
                extend_unique(&mut self.query.visited, nodes);
            }
            ClauseKind::VisitedAny => {
                let group = self.node_group(&items);
                self.query.visited_any.push(group);
            }
            ClauseKind::Minus => {
                let group = self.node_group(&items);
                self.query.minus.push(group);
            }
            ClauseKind::Plus => {
                let group = self.node_group(&items);
                self.query.plus.push(group);
            }
            ClauseKind::Case => {
                let pairs = self.pairs(&items);
                self.query.cases.extend(pairs);
            }
            ClauseKind::Context => {
                let pairs = self.pairs(&items);
                self.query.contexts.extend(pairs);
            }
            ClauseKind::ContextAny => {
                let mut group = Vec::new();
                for pair in self.pairs(&items) {
                    if !group.contains(&pair) {
                        group.push(pair);
                    }
                }
                self.query.context_any.push(group);
            }
            ClauseKind::Window => self.lower_window(clause, &items),
            ClauseKind::Cohort => self.lower_cohort(clause, &items),
        }
    }

    fn lower_endpoint(&mut self, kind: ClauseKind, clause: &Clause, items: &[ArgItem]) {
        let already_set = match kind {
            ClauseKind::From => self.query.from_node.is_some(),
            _ => self.query.to_node.is_some(),
        };
        if already_set {
            self.duplicate(kind, clause);
            return;
        }
        if items.len() != 1 {
            self.report(
                DiagnosticKind::WrongArity,
                clause.text_range(),
                format!("`{kind}` takes exactly one node"),
            );
            return;
        }

        let Some(node) = self.nodes(items).pop() else {
            return;
        };
        match kind {
            ClauseKind::From => self.query.from_node = Some(node),
            _ => self.query.to_node = Some(node),
        }
    }

    fn lower_window(&mut self, clause: &Clause, items: &[ArgItem]) {
        if self.query.window.is_some() {
            self.duplicate(ClauseKind::Window, clause);
            return;
        }
        if items.len() != 1 {
            self.report(
                DiagnosticKind::WrongArity,
                clause.text_range(),
                "`window` takes one `start:end` range",
            );
            return;
        }
        if let Some(range) = self.date_range(&items[0]) {
            self.query.window = Some(range);
        }
    }

    fn lower_cohort(&mut self, clause: &Clause, items: &[ArgItem]) {
        if self.query.cohort.is_some() {
            self.duplicate(ClauseKind::Cohort, clause);
            return;
        }

        let (anchor, range_item) = match items {
            [range] => (None, range),
            [anchor, range] => {
                let Some(anchor) = self.nodes(std::slice::from_ref(anchor)).pop() else {
                    return;
                };
                (Some(anchor), range)
            }
            _ => {
                self.report(
                    DiagnosticKind::WrongArity,
                    clause.text_range(),
                    "`cohort` takes an optional anchor node and one `start:end` range",
                );
                return;
            }
        };

        if let Some(range) = self.date_range(range_item) {
            self.query.cohort = Some(Cohort { anchor, range });
        }
    }

    fn lower_unknown(&mut self, name: &str, name_range: TextRange, items: &[ArgItem]) {
        let builder = self
            .diagnostics
            .report(DiagnosticKind::UnknownClause, name_range)
            .message(name);
        match ClauseKind::suggest(name) {
            Some(known) => builder
                .fix(format!("did you mean `{known}`?"), known.name())
                .emit(),
            None => builder.emit(),
        }

        self.query.extra.push(ExtraClause {
            name: name.to_owned(),
            args: items
                .iter()
                .map(|item| item.as_cst().text().to_string())
                .collect(),
        });
    }

    /// Plain node ids. Pairs are reported and skipped.
    fn nodes(&mut self, items: &[ArgItem]) -> Vec<String> {
        let mut nodes = Vec::with_capacity(items.len());
        for item in items {
            match item {
                ArgItem::Arg(arg) => {
                    if let Some(value) = arg.value() {
                        nodes.push(value.text().to_owned());
                    }
                }
                ArgItem::Pair(pair) => self.report(
                    DiagnosticKind::ExpectedNode,
                    pair.text_range(),
                    format!("found `{}`", pair.as_cst().text()),
                ),
            }
        }
        nodes
    }

    fn node_group(&mut self, items: &[ArgItem]) -> Vec<String> {
        let mut group = Vec::new();
        extend_unique(&mut group, self.nodes(items));
        group
    }

    /// `key:value` entries with both sides present.
    fn pairs(&mut self, items: &[ArgItem]) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(items.len());
        for item in items {
            let complete = match item {
                ArgItem::Pair(pair) => pair.key().zip(pair.value()),
                ArgItem::Arg(_) => None,
            };
            match complete {
                Some((key, value)) => pairs.push((key.text().to_owned(), value.text().to_owned())),
                None => self.report(
                    DiagnosticKind::ExpectedPair,
                    item.text_range(),
                    format!("found `{}`", item.as_cst().text()),
                ),
            }
        }
        pairs
    }

    /// `start:end` with either side optional.
    fn date_range(&mut self, item: &ArgItem) -> Option<DateRange> {
        match item {
            ArgItem::Pair(pair) => Some(DateRange {
                start: pair.key().map(|t| t.text().to_owned()),
                end: pair.value().map(|t| t.text().to_owned()),
            }),
            ArgItem::Arg(arg) => {
                self.report(
                    DiagnosticKind::InvalidDateRange,
                    arg.text_range(),
                    format!("found `{}`", arg.as_cst().text()),
                );
                None
            }
        }
    }

    fn duplicate(&mut self, kind: ClauseKind, clause: &Clause) {
        self.report(DiagnosticKind::DuplicateClause, clause.text_range(), kind.name());
    }

    fn report(&mut self, kind: DiagnosticKind, range: TextRange, message: impl Into<String>) {
        self.diagnostics.report(kind, range).message(message).emit();
    }
}

fn extend_unique(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}
