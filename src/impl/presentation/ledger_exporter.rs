use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use fractic_server_error::ServerError;

use crate::{
    domain::logic::{taxonomy::category_label_with_custom, utils::format_br_date},
    entities::{CustomCategory, ExportFile, ExportFormat, LedgerEntry},
    errors::ExportFailed,
};

use super::currency_fmt::format_brl;

const BOM: char = '\u{feff}';
const HEADERS: [&str; 7] = [
    "Tipo",
    "Descrição",
    "Vencimento",
    "Valor",
    "Status",
    "Categoria",
    "Contato",
];

/// Renders the filtered ledger list as a spreadsheet-friendly download.
pub(crate) struct LedgerExporter<'a> {
    custom_categories: &'a [CustomCategory],
}

impl<'a> LedgerExporter<'a> {
    pub(crate) fn new(custom_categories: &'a [CustomCategory]) -> Self {
        Self { custom_categories }
    }

    /// `range` is the due-date range shown above the list, and only ends up
    /// in the file name.
    pub(crate) fn export(
        &self,
        entries: &[LedgerEntry],
        format: ExportFormat,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<ExportFile, ServerError> {
        let (body, extension, mime_type) = match format {
            ExportFormat::Csv => (self.csv(entries)?, "csv", "text/csv;charset=utf-8"),
            ExportFormat::Excel => (
                self.excel(entries)?,
                "xls",
                "application/vnd.ms-excel;charset=utf-8",
            ),
        };
        Ok(ExportFile {
            file_name: format!("lancamentos_{}.{}", range_label(range), extension),
            mime_type,
            content: format!("{}{}", BOM, body),
        })
    }

    /// Comma-separated; the header is bare and every data cell is quoted.
    /// Amounts are formatted as displayed in the list.
    fn csv(&self, entries: &[LedgerEntry]) -> Result<String, ServerError> {
        let rows = entries.iter().map(|e| self.row(e, format_brl(e.amount.abs())));
        let body = write_delimited(b',', QuoteStyle::Always, rows, "CSV")?;
        Ok(join_lines(HEADERS.join(","), body))
    }

    /// Tab-separated, unquoted, with the raw signed amount.
    fn excel(&self, entries: &[LedgerEntry]) -> Result<String, ServerError> {
        let rows = entries.iter().map(|e| self.row(e, e.amount.to_string()));
        let body = write_delimited(b'\t', QuoteStyle::Never, rows, "Excel")?;
        Ok(join_lines(HEADERS.join("\t"), body))
    }

    fn row(&self, entry: &LedgerEntry, amount: String) -> [String; 7] {
        [
            entry.kind.label().to_string(),
            entry.description_with_installment(),
            entry.due_date.clone(),
            amount,
            entry.status.label().to_string(),
            category_label_with_custom(&entry.category, entry.direction(), self.custom_categories),
            entry.contact.clone(),
        ]
    }
}

fn write_delimited(
    delimiter: u8,
    quote_style: QuoteStyle,
    rows: impl Iterator<Item = [String; 7]>,
    format: &str,
) -> Result<String, ServerError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .quote_style(quote_style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer
            .write_record(&row)
            .map_err(|e| ExportFailed::with_debug(format, &e))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportFailed::with_debug(format, &e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportFailed::with_debug(format, &e))
}

/// Rows are separated by `\n`, without a trailing newline.
fn join_lines(header: String, body: String) -> String {
    let body = body.trim_end_matches('\n');
    if body.is_empty() {
        header
    } else {
        format!("{}\n{}", header, body)
    }
}

/// `dd/mm/yyyy_à_dd/mm/yyyy`, or empty when no range is active.
fn range_label(range: Option<(NaiveDate, NaiveDate)>) -> String {
    range
        .map(|(from, to)| format!("{} à {}", format_br_date(from), format_br_date(to)))
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
