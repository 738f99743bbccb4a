use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::entities::{
    Direction, DirectionFilter, EntryKind, EntryStatus, LedgerEntry, LedgerQuery, LedgerView,
    QuickDate, Segment, Sort, SortColumn, SortDirection, StatusFilter, ALL_CATEGORIES,
};

use super::{
    taxonomy::contact_label,
    utils::{month_end_date, month_start_date, week_bounds},
};

/// Derives the ledger list view from the full entry array.
///
/// Every active dimension of the query must hold for an entry to be kept.
/// The view is recomputed from scratch on every call.
pub(crate) struct LedgerFilter<'a> {
    query: &'a LedgerQuery,
    today: NaiveDate,
    contact_aliases: &'a [(String, String)],
}

impl<'a> LedgerFilter<'a> {
    pub(crate) fn new(
        query: &'a LedgerQuery,
        today: NaiveDate,
        contact_aliases: &'a [(String, String)],
    ) -> Self {
        Self {
            query,
            today,
            contact_aliases,
        }
    }

    pub(crate) fn apply(&self, entries: &[LedgerEntry]) -> LedgerView {
        let range = self.date_range();
        let search = self.query.search.trim().to_lowercase();

        let mut unparseable_dates = 0;
        let mut kept: Vec<LedgerEntry> = entries
            .iter()
            .filter(|entry| {
                if !self.matches_attributes(entry) {
                    return false;
                }
                if let Some((from, to)) = range {
                    match entry.due() {
                        Some(due) => {
                            if from.map_or(false, |from| due < from) || to.map_or(false, |to| due > to) {
                                return false;
                            }
                        }
                        None => {
                            unparseable_dates += 1;
                            return false;
                        }
                    }
                }
                search.is_empty() || Self::matches_search(entry, &search)
            })
            .cloned()
            .collect();

        if let Some(sort) = self.query.sort {
            sort_entries(&mut kept, sort);
        }

        LedgerView {
            entries: kept,
            total_entries: entries.len(),
            unparseable_dates,
        }
    }

    /// Inclusive due-date bounds, if any. A quick bucket wins over the
    /// explicit range.
    pub(crate) fn date_range(&self) -> Option<(Option<NaiveDate>, Option<NaiveDate>)> {
        if let Some(quick) = self.query.quick {
            let (from, to) = quick_range(quick, self.today);
            return Some((Some(from), Some(to)));
        }
        let filters = &self.query.filters;
        match (filters.due_from, filters.due_to) {
            (None, None) => None,
            (from, to) => Some((from, to)),
        }
    }

    fn matches_attributes(&self, entry: &LedgerEntry) -> bool {
        let filters = &self.query.filters;

        let direction_ok = match filters.direction {
            DirectionFilter::All => true,
            DirectionFilter::Inflows => entry.direction() == Direction::Inflow,
            DirectionFilter::Outflows => entry.direction() == Direction::Outflow,
        };
        let status_ok = match filters.status {
            StatusFilter::All => true,
            StatusFilter::Open => entry.status == EntryStatus::Open,
            StatusFilter::Completed => entry.status == EntryStatus::Completed,
        };
        let category_ok = match filters.category.as_deref() {
            None | Some(ALL_CATEGORIES) | Some("") => true,
            Some(category) => entry.category == category,
        };
        let contact_ok = match filters.contact.as_deref() {
            None | Some("") => true,
            Some(key) => entry.contact == contact_label(key, self.contact_aliases),
        };
        let segment_ok = match self.query.segment {
            Segment::All => true,
            Segment::Entries => !matches!(entry.kind, EntryKind::Recurring | EntryKind::Installment),
            Segment::Recurring => entry.kind == EntryKind::Recurring,
            Segment::Installment => entry.kind == EntryKind::Installment,
        };
        let overdue_ok = !self.query.overdue || entry.is_overdue(self.today);

        direction_ok && status_ok && category_ok && contact_ok && segment_ok && overdue_ok
    }

    fn matches_search(entry: &LedgerEntry, search_lower: &str) -> bool {
        entry.description.to_lowercase().contains(search_lower)
            || entry.category.to_lowercase().contains(search_lower)
            || entry.contact.to_lowercase().contains(search_lower)
    }
}

/// Resolves a quick date bucket against the given day.
pub(crate) fn quick_range(quick: QuickDate, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match quick {
        QuickDate::Today => (today, today),
        QuickDate::ThisWeek => week_bounds(today),
        QuickDate::ThisMonth => (month_start_date(today), month_end_date(today)),
    }
}

/// Stable single-key sort. Entries with an unparseable due date go last
/// when sorting by due date, in either direction.
pub(crate) fn sort_entries(entries: &mut [LedgerEntry], sort: Sort) {
    let directed = |ordering: Ordering| match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };
    match sort.column {
        SortColumn::DueDate => entries.sort_by(|a, b| match (a.due(), b.due()) {
            (Some(a), Some(b)) => directed(a.cmp(&b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortColumn::Amount => entries.sort_by(|a, b| directed(a.amount.total_cmp(&b.amount))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EmptyReason, FilterState};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn entry(id: &str, kind: EntryKind, due: &str, amount: f64, category: &str) -> LedgerEntry {
        LedgerEntry::new(
            id,
            kind,
            format!("Lançamento {}", id),
            due,
            amount,
            EntryStatus::Completed,
            category,
            "Banco",
        )
    }

    fn scenario() -> Vec<LedgerEntry> {
        vec![
            entry("a", EntryKind::Incoming, "05/03/2025", 1000.0, "venda_servicos"),
            entry("b", EntryKind::Outgoing, "10/03/2025", -500.0, "software_ferramentas"),
            entry("c", EntryKind::Outgoing, "02/04/2025", -200.0, "tarifas_bancarias"),
        ]
    }

    fn run(entries: &[LedgerEntry], query: &LedgerQuery) -> LedgerView {
        LedgerFilter::new(query, today(), &[]).apply(entries)
    }

    fn ids(view: &LedgerView) -> Vec<&str> {
        view.entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn outflow_filter_keeps_only_outgoing_entries() {
        let query = LedgerQuery {
            filters: FilterState {
                direction: DirectionFilter::Outflows,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ids(&run(&scenario(), &query)), vec!["b", "c"]);
    }

    #[test]
    fn due_date_range_is_inclusive() {
        let query = LedgerQuery {
            filters: FilterState {
                due_from: Some(d(2025, 3, 1)),
                due_to: Some(d(2025, 3, 31)),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ids(&run(&scenario(), &query)), vec!["a", "b"]);

        let query = LedgerQuery {
            filters: FilterState {
                due_from: Some(d(2025, 3, 10)),
                due_to: Some(d(2025, 3, 10)),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ids(&run(&scenario(), &query)), vec!["b"]);
    }

    #[test]
    fn open_ended_range_only_applies_the_given_bound() {
        let query = LedgerQuery {
            filters: FilterState {
                due_from: Some(d(2025, 3, 6)),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ids(&run(&scenario(), &query)), vec!["b", "c"]);
    }

    #[test]
    fn unparseable_dates_are_counted_when_a_range_is_active() {
        let mut entries = scenario();
        entries.push(entry("bad", EntryKind::Outgoing, "março", -1.0, "tarifas_bancarias"));

        let unfiltered = run(&entries, &LedgerQuery::default());
        assert_eq!(unfiltered.entries.len(), 4);
        assert_eq!(unfiltered.unparseable_dates, 0);

        let query = LedgerQuery {
            filters: FilterState {
                due_to: Some(d(2025, 12, 31)),
                ..Default::default()
            },
            ..Default::default()
        };
        let view = run(&entries, &query);
        assert_eq!(view.entries.len(), 3);
        assert_eq!(view.unparseable_dates, 1);
    }

    #[test]
    fn quick_bucket_overrides_explicit_range() {
        let query = LedgerQuery {
            filters: FilterState {
                due_from: Some(d(2025, 4, 1)),
                due_to: Some(d(2025, 4, 30)),
                ..Default::default()
            },
            quick: Some(QuickDate::ThisMonth),
            ..Default::default()
        };
        assert_eq!(ids(&run(&scenario(), &query)), vec!["a", "b"]);
    }

    #[test]
    fn quick_ranges_resolve_against_today() {
        assert_eq!(quick_range(QuickDate::Today, today()), (today(), today()));
        assert_eq!(quick_range(QuickDate::ThisWeek, today()), (d(2025, 3, 17), d(2025, 3, 23)));
        assert_eq!(quick_range(QuickDate::ThisMonth, today()), (d(2025, 3, 1), d(2025, 3, 31)));
    }

    #[test]
    fn search_is_case_insensitive_across_description_category_and_contact() {
        let mut entries = scenario();
        entries[2].contact = "Operadora Vivo".to_string();
        let search = |term: &str| {
            let query = LedgerQuery {
                search: term.to_string(),
                ..Default::default()
            };
            run(&entries, &query).entries.into_iter().map(|e| e.id.0).collect::<Vec<_>>()
        };
        assert_eq!(search("LANÇAMENTO A"), vec!["a"]);
        assert_eq!(search("software"), vec!["b"]);
        assert_eq!(search("vivo"), vec!["c"]);
        assert!(search("inexistente").is_empty());
    }

    #[test]
    fn segments_exclude_by_kind() {
        let entries = vec![
            entry("in", EntryKind::Incoming, "01/01/2025", 10.0, "venda_servicos"),
            entry("rec", EntryKind::Recurring, "01/01/2025", 10.0, "venda_servicos"),
            entry("inst", EntryKind::Installment, "01/01/2025", -10.0, "aquisicao_tecnologias"),
        ];
        let segment = |segment: Segment| {
            let query = LedgerQuery {
                segment,
                ..Default::default()
            };
            run(&entries, &query).entries.into_iter().map(|e| e.id.0).collect::<Vec<_>>()
        };
        assert_eq!(segment(Segment::All), vec!["in", "rec", "inst"]);
        assert_eq!(segment(Segment::Entries), vec!["in"]);
        assert_eq!(segment(Segment::Recurring), vec!["rec"]);
        assert_eq!(segment(Segment::Installment), vec!["inst"]);
    }

    #[test]
    fn recurring_entries_take_their_direction_from_the_sign() {
        let entries = vec![
            entry("mrr", EntryKind::Recurring, "05/01/2025", 1490.0, "venda_servicos"),
            entry("cdn", EntryKind::Recurring, "08/01/2025", -210.0, "custo_servicos_prestados"),
        ];
        let query = LedgerQuery {
            filters: FilterState {
                direction: DirectionFilter::Inflows,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ids(&run(&entries, &query)), vec!["mrr"]);
    }

    #[test]
    fn category_sentinel_and_contact_mapping() {
        let mut entries = scenario();
        entries[0].contact = "Cliente X".to_string();

        let query = LedgerQuery {
            filters: FilterState {
                category: Some(ALL_CATEGORIES.to_string()),
                contact: Some("cliente-x".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ids(&run(&entries, &query)), vec!["a"]);

        let query = LedgerQuery {
            filters: FilterState {
                category: Some("tarifas_bancarias".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ids(&run(&entries, &query)), vec!["c"]);
    }

    #[test]
    fn overdue_uses_flag_or_open_past_due() {
        let mut entries = scenario();
        entries[1].status = EntryStatus::Open; // 10/03, before today.
        entries[2].status = EntryStatus::Open; // 02/04, after today.
        entries[0].overdue = Some(true);
        let query = LedgerQuery {
            overdue: true,
            ..Default::default()
        };
        assert_eq!(ids(&run(&entries, &query)), vec!["a", "b"]);
    }

    #[test]
    fn status_filter() {
        let mut entries = scenario();
        entries[1].status = EntryStatus::Open;
        let query = LedgerQuery {
            filters: FilterState {
                status: StatusFilter::Open,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ids(&run(&entries, &query)), vec!["b"]);
        let query = LedgerQuery {
            filters: FilterState {
                status: StatusFilter::Completed,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(ids(&run(&entries, &query)), vec!["a", "c"]);
    }

    #[test]
    fn sort_by_amount_reverses_between_directions() {
        let asc = LedgerQuery {
            sort: Some(Sort::asc(SortColumn::Amount)),
            ..Default::default()
        };
        let desc = LedgerQuery {
            sort: Some(Sort::desc(SortColumn::Amount)),
            ..Default::default()
        };
        let mut asc_ids = ids(&run(&scenario(), &asc)).into_iter().map(String::from).collect::<Vec<_>>();
        let desc_ids = ids(&run(&scenario(), &desc)).into_iter().map(String::from).collect::<Vec<_>>();
        assert_eq!(asc_ids, vec!["b", "c", "a"]);
        asc_ids.reverse();
        assert_eq!(asc_ids, desc_ids);
    }

    #[test]
    fn sort_by_due_date_puts_unparseable_last() {
        let mut entries = scenario();
        entries.insert(0, entry("bad", EntryKind::Outgoing, "", -1.0, "tarifas_bancarias"));
        let desc = LedgerQuery {
            sort: Some(Sort::desc(SortColumn::DueDate)),
            ..Default::default()
        };
        assert_eq!(ids(&run(&entries, &desc)), vec!["c", "b", "a", "bad"]);
    }

    #[test]
    fn no_sort_preserves_input_order() {
        let mut entries = scenario();
        entries.reverse();
        assert_eq!(ids(&run(&entries, &LedgerQuery::default())), vec!["c", "b", "a"]);
    }

    #[test]
    fn toggling_a_column_flips_direction() {
        let first = Sort::toggled(None, SortColumn::Amount);
        assert_eq!(first, Sort::asc(SortColumn::Amount));
        assert_eq!(Sort::toggled(Some(first), SortColumn::Amount), Sort::desc(SortColumn::Amount));
        assert_eq!(Sort::toggled(Some(first), SortColumn::DueDate), Sort::asc(SortColumn::DueDate));
    }

    #[test]
    fn filtering_is_idempotent_and_never_fabricates_entries() {
        let entries = scenario();
        let query = LedgerQuery {
            filters: FilterState {
                direction: DirectionFilter::Outflows,
                due_from: Some(d(2025, 3, 1)),
                ..Default::default()
            },
            search: "lançamento".to_string(),
            ..Default::default()
        };
        let once = run(&entries, &query);
        assert!(once.entries.iter().all(|e| entries.contains(e)));
        let twice = run(&once.entries, &query);
        assert_eq!(once.entries, twice.entries);
    }

    #[test]
    fn empty_states_are_distinguished() {
        let view = run(&[], &LedgerQuery::default());
        assert_eq!(view.empty_reason(), Some(EmptyReason::NoEntries));

        let query = LedgerQuery {
            search: "nada".to_string(),
            ..Default::default()
        };
        assert_eq!(run(&scenario(), &query).empty_reason(), Some(EmptyReason::NoMatches));
        assert_eq!(run(&scenario(), &LedgerQuery::default()).empty_reason(), None);
    }
}
