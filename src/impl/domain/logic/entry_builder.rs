use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::{
    entities::{Direction, EntryDraft, EntryKind, EntryMode, EntryStatus, LedgerEntry},
    errors::{InvalidAmount, MissingRequiredFields},
};

use super::{taxonomy::form_contact_label, utils::format_br_date};

/// Turns the raw "new entry" form into a ledger entry.
pub(crate) struct EntryBuilder {
    today: NaiveDate,
}

impl EntryBuilder {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub(crate) fn build(&self, draft: &EntryDraft) -> Result<LedgerEntry, ServerError> {
        let mut missing = Vec::new();
        if draft.description.trim().is_empty() {
            missing.push("descrição");
        }
        if draft.amount.trim().is_empty() {
            missing.push("valor");
        }
        if draft.category.trim().is_empty() {
            missing.push("categoria");
        }
        if !missing.is_empty() {
            return Err(MissingRequiredFields::new(&missing.join(", ")));
        }

        let magnitude = parse_amount(&draft.amount)?;
        let amount = match draft.direction {
            Direction::Inflow => magnitude,
            Direction::Outflow => -magnitude,
        };
        let kind = match (draft.mode, draft.direction) {
            (EntryMode::Standard, Direction::Inflow) => EntryKind::Incoming,
            (EntryMode::Standard, Direction::Outflow) => EntryKind::Outgoing,
            (EntryMode::Installment, _) => EntryKind::Installment,
            (EntryMode::Recurring, _) => EntryKind::Recurring,
        };

        let mut entry = LedgerEntry::new(
            uuid::Uuid::new_v4().simple().to_string(),
            kind,
            draft.description.trim(),
            format_br_date(draft.due_date.unwrap_or(self.today)),
            amount,
            if draft.completed {
                EntryStatus::Completed
            } else {
                EntryStatus::Open
            },
            draft.category.trim(),
            form_contact_label(&draft.contact),
        );
        match draft.mode {
            EntryMode::Standard => {}
            EntryMode::Installment => {
                let count = draft.installment_count.max(1);
                entry.installment = Some(format!("1/{}", count));
                entry.installment_count = Some(count);
                entry.frequency = Some(draft.frequency);
            }
            EntryMode::Recurring => {
                entry.frequency = Some(draft.frequency);
                entry.repeat_day = Some(draft.repeat_day);
                entry.auto_complete = Some(draft.auto_complete);
                entry.business_days_only = Some(draft.business_days_only);
            }
        }
        Ok(entry)
    }
}

/// Parses an amount typed in pt-BR notation. Only digits and the decimal
/// comma are kept, so thousands dots and the currency symbol are ignored.
pub(crate) fn parse_amount(text: &str) -> Result<f64, ServerError> {
    let normalized: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InvalidAmount::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Frequency;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 13).unwrap()
    }

    fn draft() -> EntryDraft {
        EntryDraft {
            description: "Notebook dev".to_string(),
            amount: "5.200,00".to_string(),
            category: "aquisicao_tecnologias".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn parses_pt_br_amounts() {
        assert_eq!(parse_amount("1.234,56").unwrap(), 1234.56);
        assert_eq!(parse_amount("R$ 99").unwrap(), 99.0);
        assert_eq!(parse_amount("0,5").unwrap(), 0.5);
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("1,2,3").is_err());
    }

    #[test]
    fn required_fields_are_checked_before_the_amount() {
        let err = EntryBuilder::new(today())
            .build(&EntryDraft {
                amount: "x".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        let message = format!("{:?}", err);
        assert!(message.contains("descrição"));
        assert!(message.contains("categoria"));
        assert!(!message.contains("valor"));
    }

    #[test]
    fn standard_outflow_is_negative_and_defaults_to_today() {
        let entry = EntryBuilder::new(today())
            .build(&EntryDraft {
                direction: Direction::Outflow,
                ..draft()
            })
            .unwrap();
        assert_eq!(entry.kind, EntryKind::Outgoing);
        assert_eq!(entry.amount, -5200.0);
        assert_eq!(entry.due_date, "13/10/2025");
        assert_eq!(entry.status, EntryStatus::Open);
        assert_eq!(entry.contact, "Não identificado");
        assert!(!entry.id.as_str().is_empty());
    }

    #[test]
    fn installment_fields() {
        let entry = EntryBuilder::new(today())
            .build(&EntryDraft {
                direction: Direction::Outflow,
                mode: EntryMode::Installment,
                installment_count: 10,
                contact: "fornecedor_y".to_string(),
                ..draft()
            })
            .unwrap();
        assert_eq!(entry.kind, EntryKind::Installment);
        assert_eq!(entry.installment.as_deref(), Some("1/10"));
        assert_eq!(entry.installment_count, Some(10));
        assert_eq!(entry.frequency, Some(Frequency::Monthly));
        assert_eq!(entry.contact, "Fornecedor Y");
        assert_eq!(entry.repeat_day, None);
    }

    #[test]
    fn recurring_fields() {
        let entry = EntryBuilder::new(today())
            .build(&EntryDraft {
                mode: EntryMode::Recurring,
                frequency: Frequency::Weekly,
                auto_complete: true,
                completed: true,
                ..draft()
            })
            .unwrap();
        assert_eq!(entry.kind, EntryKind::Recurring);
        assert_eq!(entry.amount, 5200.0);
        assert_eq!(entry.frequency, Some(Frequency::Weekly));
        assert_eq!(entry.repeat_day, Some(24));
        assert_eq!(entry.auto_complete, Some(true));
        assert_eq!(entry.business_days_only, Some(false));
        assert_eq!(entry.status, EntryStatus::Completed);
        assert_eq!(entry.installment, None);
    }

    #[test]
    fn ids_are_unique() {
        let builder = EntryBuilder::new(today());
        assert_ne!(builder.build(&draft()).unwrap().id, builder.build(&draft()).unwrap().id);
    }
}
