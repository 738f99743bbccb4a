use chrono::NaiveDate;

use crate::domain::logic::utils::parse_br_date;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Incoming,
    Outgoing,
    Recurring,
    Installment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Inflow,
    Outflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryStatus {
    Open,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Monthly,
    Weekly,
    Biweekly,
    Quarterly,
}

/// A single lançamento.
///
/// The due date is kept as the `DD/MM/YYYY` text it was recorded with, and
/// only interpreted on demand through [`LedgerEntry::due`]. Entries whose due
/// date does not parse are tolerated in memory, but excluded from any
/// computation that needs the date.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub kind: EntryKind,
    pub description: String,
    pub due_date: String,
    /// Positive for inflows, negative for outflows.
    pub amount: f64,
    pub status: EntryStatus,
    pub category: String,
    pub contact: String,

    // Installment-only.
    pub installment: Option<String>,
    pub installment_count: Option<u32>,

    // Shared by installments and recurrences.
    pub frequency: Option<Frequency>,

    // Recurrence-only.
    pub repeat_day: Option<u32>,
    pub auto_complete: Option<bool>,
    pub business_days_only: Option<bool>,

    pub overdue: Option<bool>,
}

// --

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Incoming => "Entrada",
            EntryKind::Outgoing => "Saída",
            EntryKind::Recurring => "Recorrente",
            EntryKind::Installment => "Parcelado",
        }
    }
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Inflow => "entradas",
            Direction::Outflow => "saídas",
        }
    }
}

impl EntryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::Open => "Em aberto",
            EntryStatus::Completed => "Concluído",
        }
    }
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Monthly => "Mensal",
            Frequency::Weekly => "Semanal",
            Frequency::Biweekly => "Quinzenal",
            Frequency::Quarterly => "Trimestral",
        }
    }
}

impl LedgerEntry {
    /// Plain one-off entry, without any installment or recurrence fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        kind: EntryKind,
        description: impl Into<String>,
        due_date: impl Into<String>,
        amount: f64,
        status: EntryStatus,
        category: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(id),
            kind,
            description: description.into(),
            due_date: due_date.into(),
            amount,
            status,
            category: category.into(),
            contact: contact.into(),
            installment: None,
            installment_count: None,
            frequency: None,
            repeat_day: None,
            auto_complete: None,
            business_days_only: None,
            overdue: None,
        }
    }

    /// Parsed due date, or `None` if the stored text is not a valid
    /// `DD/MM/YYYY` calendar date.
    pub fn due(&self) -> Option<NaiveDate> {
        parse_br_date(&self.due_date)
    }

    /// Incoming and outgoing entries carry their direction in the kind;
    /// recurrences and installments only carry it in the sign of the amount.
    pub fn direction(&self) -> Direction {
        match self.kind {
            EntryKind::Incoming => Direction::Inflow,
            EntryKind::Outgoing => Direction::Outflow,
            EntryKind::Recurring | EntryKind::Installment => {
                if self.amount >= 0.0 {
                    Direction::Inflow
                } else {
                    Direction::Outflow
                }
            }
        }
    }

    /// Overdue when explicitly flagged, or still open after its due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        if self.overdue.unwrap_or(false) {
            return true;
        }
        self.status == EntryStatus::Open && self.due().map_or(false, |due| due < today)
    }

    pub fn description_with_installment(&self) -> String {
        match &self.installment {
            Some(installment) => format!("{} ({})", self.description, installment),
            None => self.description.clone(),
        }
    }
}
