use crate::{
    domain::logic::dre_aggregator::{total, LAYOUT},
    entities::{DreExpandState, DreReport, DreRow, MonthlyValues},
};

use super::currency_fmt::{format_brl, format_percent};

const MONTHS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];
const LABEL_WIDTH: usize = 40;
const VALUE_WIDTH: usize = 16;

/// Plain-text rendering of the income statement: one column per month plus
/// a yearly total.
pub(crate) struct DrePrinter<'a> {
    expand: &'a DreExpandState,
}

impl<'a> DrePrinter<'a> {
    pub(crate) fn new(expand: &'a DreExpandState) -> Self {
        Self { expand }
    }

    pub(crate) fn print(&self, report: &DreReport) -> String {
        let mut out = String::new();

        let months: Vec<String> = month_labels(report.year).to_vec();
        push_row(&mut out, "", "Total", &months);
        out.push_str(&"-".repeat(LABEL_WIDTH + 13 * (VALUE_WIDTH + 1)));
        out.push('\n');

        for row in LAYOUT {
            let expanded = self.expand.is_expanded(row.title());
            let marker = if expanded { "▾" } else { "▸" };
            match row {
                DreRow::Group { group, title, lines } => {
                    let values = report.group(*group);
                    push_values(&mut out, &format!("{} {}", marker, title), &values);
                    if expanded {
                        for line in lines.iter() {
                            push_values(&mut out, &format!("    {}", line), &report.line(line));
                        }
                    }
                }
                DreRow::Metric { metric, title } => {
                    let values = report.metric(*metric);
                    push_values(&mut out, &format!("{} {}", marker, title), &values);
                    if expanded {
                        let percents: Vec<String> = (0..12)
                            .map(|m| format_percent(report.percent_of_revenue(&values, m)))
                            .collect();
                        push_row(
                            &mut out,
                            &format!("    {} %", title),
                            &format_percent(report.annual_percent_of_revenue(&values)),
                            &percents,
                        );
                    }
                }
            }
        }

        if report.unmapped_entries > 0 || report.invalid_dates > 0 {
            out.push('\n');
            if report.unmapped_entries > 0 {
                out.push_str(&format!(
                    "{} lançamento(s) sem linha correspondente no DRE.\n",
                    report.unmapped_entries
                ));
            }
            if report.invalid_dates > 0 {
                out.push_str(&format!(
                    "{} lançamento(s) com vencimento inválido ignorado(s).\n",
                    report.invalid_dates
                ));
            }
        }
        out
    }
}

/// Column headers, e.g. `Jan/2025`.
pub(crate) fn month_labels(year: i32) -> [String; 12] {
    MONTHS.map(|m| format!("{}/{}", m, year))
}

fn push_values(out: &mut String, label: &str, values: &MonthlyValues) {
    let cells: Vec<String> = values.iter().map(|v| format_brl(*v)).collect();
    push_row(out, label, &format_brl(total(values)), &cells);
}

fn push_row(out: &mut String, label: &str, total: &str, cells: &[String]) {
    let label: String = label.chars().take(LABEL_WIDTH).collect();
    out.push_str(&format!("{:<width$}", label, width = LABEL_WIDTH));
    for cell in cells {
        out.push_str(&format!(" {:>width$}", cell, width = VALUE_WIDTH));
    }
    out.push_str(&format!(" {:>width$}", total, width = VALUE_WIDTH));
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::logic::dre_aggregator::DreAggregator,
        entities::{EntryKind, EntryStatus, LedgerEntry},
    };

    fn report() -> DreReport {
        DreAggregator::new(2025).aggregate(&[
            LedgerEntry::new("a", EntryKind::Incoming, "", "05/01/2025", 1000.0, EntryStatus::Completed, "venda_servicos", ""),
            LedgerEntry::new("b", EntryKind::Outgoing, "", "10/01/2025", -250.0, EntryStatus::Completed, "software_ferramentas", ""),
        ])
    }

    #[test]
    fn month_headers() {
        let labels = month_labels(2025);
        assert_eq!(labels[0], "Jan/2025");
        assert_eq!(labels[11], "Dez/2025");
    }

    #[test]
    fn collapsed_report_shows_only_top_level_rows() {
        let out = DrePrinter::new(&DreExpandState::default()).print(&report());
        assert!(out.contains("▸ Receitas operacionais"));
        assert!(out.contains("▸ Lucro líquido"));
        assert!(!out.contains("Software e ferramentas digitais"));
        assert!(!out.contains("EBITDA %"));
        assert_eq!(out.lines().count(), 2 + LAYOUT.len());
    }

    #[test]
    fn expanded_rows_show_sublines_and_percentages() {
        let mut expand = DreExpandState::default();
        expand.toggle("Despesas administrativas");
        expand.toggle("EBITDA");
        let out = DrePrinter::new(&expand).print(&report());

        let software = out
            .lines()
            .find(|l| l.contains("Software e ferramentas digitais"))
            .unwrap();
        assert!(software.contains("-R$ 250,00"));
        let ebitda_percent = out.lines().find(|l| l.contains("EBITDA %")).unwrap();
        assert!(ebitda_percent.contains("75,0%"));

        expand.toggle("EBITDA");
        assert!(!DrePrinter::new(&expand).print(&report()).contains("EBITDA %"));
    }
}
