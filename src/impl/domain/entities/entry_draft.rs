use chrono::NaiveDate;

use super::ledger_entry::{Direction, Frequency};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    #[default]
    Standard,
    Installment,
    Recurring,
}

/// Raw input of the "new entry" form, before validation.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub direction: Direction,
    pub mode: EntryMode,
    pub description: String,
    /// Defaults to the current date when absent.
    pub due_date: Option<NaiveDate>,
    /// Amount as typed, e.g. "1.234,56".
    pub amount: String,
    /// Contact picker key or free text.
    pub contact: String,
    pub category: String,
    pub completed: bool,
    pub installment_count: u32,
    pub frequency: Frequency,
    pub repeat_day: u32,
    pub auto_complete: bool,
    pub business_days_only: bool,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self {
            direction: Direction::Inflow,
            mode: EntryMode::Standard,
            description: String::new(),
            due_date: None,
            amount: String::new(),
            contact: String::new(),
            category: String::new(),
            completed: false,
            installment_count: 1,
            frequency: Frequency::Monthly,
            repeat_day: 24,
            auto_complete: false,
            business_days_only: false,
        }
    }
}
