use chrono::NaiveDate;

use crate::entities::{EntryStatus, LedgerEntry, LedgerSummary};

/// Dashboard totals over a set of entries.
pub(crate) fn summarize(entries: &[LedgerEntry], today: NaiveDate) -> LedgerSummary {
    let mut summary = LedgerSummary::default();
    for entry in entries {
        if entry.amount > 0.0 {
            summary.inflows += entry.amount;
        } else {
            summary.outflows += entry.amount.abs();
        }
        match entry.status {
            EntryStatus::Open => summary.open += 1,
            EntryStatus::Completed => summary.completed += 1,
        }
        if entry.is_overdue(today) {
            summary.overdue += 1;
        }
    }
    summary.result = summary.inflows - summary.outflows;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EntryKind;

    #[test]
    fn totals_and_counts() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let mut flagged =
            LedgerEntry::new("c", EntryKind::Incoming, "", "20/03/2025", 50.0, EntryStatus::Completed, "", "");
        flagged.overdue = Some(true);
        let entries = vec![
            LedgerEntry::new("a", EntryKind::Incoming, "", "01/03/2025", 1000.0, EntryStatus::Open, "", ""),
            LedgerEntry::new("b", EntryKind::Outgoing, "", "15/03/2025", -300.5, EntryStatus::Open, "", ""),
            flagged,
        ];
        let summary = summarize(&entries, today);
        assert_eq!(summary.inflows, 1050.0);
        assert_eq!(summary.outflows, 300.5);
        assert_eq!(summary.result, 749.5);
        assert_eq!(summary.open, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.overdue, 2);
    }

    #[test]
    fn empty_input() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(summarize(&[], today), LedgerSummary::default());
    }
}
