use crate::{
    domain::logic::taxonomy::category_label_with_custom,
    entities::{CustomCategory, Direction, EmptyReason, LedgerEntry, LedgerSummary, LedgerView},
};

use super::currency_fmt::format_brl;

const WRAP_WIDTH: usize = 74;

pub(crate) struct LedgerPrinter<'a> {
    custom_categories: &'a [CustomCategory],
}

impl<'a> LedgerPrinter<'a> {
    pub(crate) fn new(custom_categories: &'a [CustomCategory]) -> Self {
        Self { custom_categories }
    }

    pub(crate) fn print_list(&self, view: &LedgerView) -> String {
        match view.empty_reason() {
            Some(EmptyReason::NoEntries) => {
                return "Nenhum lançamento encontrado\n\
                        Comece criando seu primeiro lançamento financeiro.\n"
                    .to_string()
            }
            Some(EmptyReason::NoMatches) => {
                return "Nenhum lançamento corresponde aos filtros selecionados\n\
                        Tente ajustar os filtros ou limpar a busca para ver mais resultados.\n"
                    .to_string()
            }
            None => {}
        }

        let mut out = format!(
            "{:<10}  {:<40}  {:<28}  {:<20}  {:<9}  {:>16}\n",
            "Vencimento", "Descrição", "Categoria", "Contato", "Status", "Valor"
        );
        for entry in &view.entries {
            out.push_str(&format!(
                "{:<10}  {:<40}  {:<28}  {:<20}  {:<9}  {:>16}\n",
                entry.due_date,
                clip(&entry.description_with_installment(), 40),
                clip(&self.category(entry), 28),
                clip(&entry.contact, 20),
                entry.status.label(),
                signed_amount(entry),
            ));
        }
        out.push_str(&format!(
            "\n{} de {} lançamentos\n",
            view.entries.len(),
            view.total_entries
        ));
        if view.unparseable_dates > 0 {
            out.push_str(&format!(
                "{} lançamento(s) com vencimento inválido fora do período filtrado.\n",
                view.unparseable_dates
            ));
        }
        out
    }

    pub(crate) fn print_details(&self, entry: &LedgerEntry) -> String {
        let mut out = String::new();
        for line in textwrap::wrap(&entry.description, WRAP_WIDTH) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
        out.push_str("Informações principais\n");
        out.push_str(&format!("  Valor:       {}\n", signed_amount(entry)));
        out.push_str(&format!("  Vencimento:  {}\n", entry.due_date));
        out.push_str(&format!("  Tipo:        {}\n", entry.kind.label()));
        out.push_str(&format!("  Status:      {}\n", entry.status.label()));
        if let Some(installment) = &entry.installment {
            out.push_str(&format!("  Parcela:     {}\n", installment));
        }
        if let Some(frequency) = entry.frequency {
            out.push_str(&format!("  Frequência:  {}\n", frequency.label()));
        }
        if let Some(day) = entry.repeat_day {
            out.push_str(&format!("  Repete dia:  {}\n", day));
        }
        out.push_str(&format!("Categoria:     {}\n", self.category(entry)));
        out.push_str(&format!("Contato:       {}\n", entry.contact));
        out.push_str(&format!("Id:            {}\n", entry.id));
        out
    }

    pub(crate) fn print_summary(&self, summary: &LedgerSummary) -> String {
        format!(
            "Entradas:   {:>18}\n\
             Saídas:     {:>18}\n\
             Resultado:  {:>18}\n\
             \n\
             Em aberto: {}  Concluídos: {}  Atrasados: {}\n",
            format_brl(summary.inflows),
            format_brl(summary.outflows),
            format_brl(summary.result),
            summary.open,
            summary.completed,
            summary.overdue,
        )
    }

    fn category(&self, entry: &LedgerEntry) -> String {
        category_label_with_custom(&entry.category, entry.direction(), self.custom_categories)
    }
}

/// The list shows magnitudes; the sign only tells inflow from outflow.
fn signed_amount(entry: &LedgerEntry) -> String {
    let sign = match entry.direction() {
        Direction::Inflow => '+',
        Direction::Outflow => '-',
    };
    format!("{} {}", sign, format_brl(entry.amount.abs()))
}

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut clipped: String = s.chars().take(width - 1).collect();
        clipped.push('…');
        clipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntryKind, EntryStatus};

    fn entry() -> LedgerEntry {
        LedgerEntry::new(
            "a",
            EntryKind::Outgoing,
            "Figma",
            "02/03/2025",
            -75.0,
            EntryStatus::Completed,
            "software_ferramentas",
            "Figma",
        )
    }

    #[test]
    fn empty_states_are_distinguished() {
        let printer = LedgerPrinter::new(&[]);
        let none = LedgerView {
            entries: vec![],
            total_entries: 0,
            unparseable_dates: 0,
        };
        assert!(printer.print_list(&none).starts_with("Nenhum lançamento encontrado"));
        let filtered = LedgerView {
            total_entries: 3,
            ..none
        };
        assert!(printer
            .print_list(&filtered)
            .starts_with("Nenhum lançamento corresponde aos filtros selecionados"));
    }

    #[test]
    fn list_rows_show_labels_and_magnitudes() {
        let view = LedgerView {
            entries: vec![entry()],
            total_entries: 10,
            unparseable_dates: 1,
        };
        let out = LedgerPrinter::new(&[]).print_list(&view);
        let row = out.lines().nth(1).unwrap();
        assert!(row.contains("Software e ferramentas"));
        assert!(row.ends_with("- R$ 75,00"));
        assert!(out.contains("1 de 10 lançamentos"));
        assert!(out.contains("1 lançamento(s) com vencimento inválido"));
    }

    #[test]
    fn details_wrap_long_descriptions() {
        let mut e = entry();
        e.description = "palavra ".repeat(30);
        let out = LedgerPrinter::new(&[]).print_details(&e);
        assert!(out.lines().take_while(|l| !l.is_empty()).all(|l| l.chars().count() <= WRAP_WIDTH));
        assert!(out.contains("Valor:       - R$ 75,00"));
    }

    #[test]
    fn summary() {
        let out = LedgerPrinter::new(&[]).print_summary(&LedgerSummary {
            inflows: 1000.0,
            outflows: 250.0,
            result: 750.0,
            open: 1,
            completed: 2,
            overdue: 0,
        });
        assert!(out.contains("R$ 1.000,00"));
        assert!(out.contains("Resultado:"));
        assert!(out.contains("Concluídos: 2"));
    }
}
