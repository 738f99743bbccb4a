use chrono::NaiveDate;

use super::ledger_entry::LedgerEntry;

/// Category filter value that matches every category.
pub const ALL_CATEGORIES: &str = "__all__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectionFilter {
    #[default]
    All,
    Inflows,
    Outflows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Completed,
}

/// Declared by the filter form, not applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconciliationFilter {
    #[default]
    All,
    Pending,
    Reconciled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segment {
    #[default]
    All,
    /// Everything except recurrences and installments.
    Entries,
    Recurring,
    Installment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickDate {
    Today,
    ThisWeek,
    ThisMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    DueDate,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// Advanced filter form state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub direction: DirectionFilter,
    pub status: StatusFilter,
    pub reconciliation: ReconciliationFilter,
    pub category: Option<String>,
    /// Contact filter key (see `taxonomy::contact_label`).
    pub contact: Option<String>,
    pub tags: Vec<String>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
    pub cash_from: Option<NaiveDate>,
    pub cash_to: Option<NaiveDate>,
}

/// Everything the ledger list needs to derive its view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerQuery {
    pub filters: FilterState,
    pub search: String,
    pub segment: Segment,
    pub overdue: bool,
    /// Overrides `filters.due_from..filters.due_to` when set.
    pub quick: Option<QuickDate>,
    pub sort: Option<Sort>,
}

/// Why a view came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoEntries,
    NoMatches,
}

/// Result of running a [`LedgerQuery`] over the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    pub entries: Vec<LedgerEntry>,
    pub total_entries: usize,
    /// Entries dropped because a date range was active and their due date
    /// could not be parsed.
    pub unparseable_dates: usize,
}

// --

impl Sort {
    pub fn asc(column: SortColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: SortColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }

    /// Column-header click: same column flips the direction, a new column
    /// starts ascending.
    pub fn toggled(current: Option<Sort>, column: SortColumn) -> Sort {
        match current {
            Some(sort) if sort.column == column => Sort {
                column,
                direction: match sort.direction {
                    SortDirection::Asc => SortDirection::Desc,
                    SortDirection::Desc => SortDirection::Asc,
                },
            },
            _ => Sort::asc(column),
        }
    }
}

impl LedgerQuery {
    /// Resets every filter, the segment and the search term. Sorting stays.
    pub fn cleared(&self) -> Self {
        Self {
            sort: self.sort,
            ..Self::default()
        }
    }

    pub fn has_date_range(&self) -> bool {
        self.quick.is_some() || self.filters.due_from.is_some() || self.filters.due_to.is_some()
    }
}

impl LedgerView {
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if !self.entries.is_empty() {
            None
        } else if self.total_entries == 0 {
            Some(EmptyReason::NoEntries)
        } else {
            Some(EmptyReason::NoMatches)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_keeps_only_the_sort() {
        let query = LedgerQuery {
            filters: FilterState {
                direction: DirectionFilter::Outflows,
                due_from: NaiveDate::from_ymd_opt(2025, 3, 1),
                ..Default::default()
            },
            search: "aws".to_string(),
            overdue: true,
            sort: Some(Sort::desc(SortColumn::Amount)),
            ..Default::default()
        };
        assert!(query.has_date_range());

        let cleared = query.cleared();
        assert_eq!(cleared.sort, Some(Sort::desc(SortColumn::Amount)));
        assert_eq!(cleared.filters, FilterState::default());
        assert!(cleared.search.is_empty());
        assert!(!cleared.has_date_range());

        let quick = LedgerQuery {
            quick: Some(QuickDate::ThisMonth),
            ..Default::default()
        };
        assert!(quick.has_date_range());
    }
}
