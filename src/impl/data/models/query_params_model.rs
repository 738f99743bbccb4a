use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::{
    domain::logic::utils::parse_day_month_year,
    entities::{
        DirectionFilter, LedgerQuery, QuickDate, Segment, StatusFilter, ALL_CATEGORIES,
    },
    errors::InvalidQueryParameter,
};
use tracing::warn;

// Parameter names of the ledger list URL.
const SEARCH: &str = "q";
const SEGMENT: &str = "seg";
const DIRECTION: &str = "dir";
const STATUS: &str = "st";
const CATEGORY: &str = "cat";
const CONTACT: &str = "cont";
const FROM: &str = "from";
const TO: &str = "to";
const OVERDUE: &str = "atras";
const QUICK: &str = "quick";

/// `application/x-www-form-urlencoded` form of a [`LedgerQuery`], as kept in
/// the ledger list URL. Only the fields the list view syncs are carried:
/// tags, reconciliation, cash-date range and sorting are not.
pub(crate) struct QueryParamsModel;

impl QueryParamsModel {
    pub(crate) fn encode(query: &LedgerQuery) -> String {
        let filters = &query.filters;
        let mut params = form_urlencoded::Serializer::new(String::new());

        if !query.search.is_empty() {
            params.append_pair(SEARCH, &query.search);
        }
        match query.segment {
            Segment::All => {}
            Segment::Entries => {
                params.append_pair(SEGMENT, "lancamentos");
            }
            Segment::Recurring => {
                params.append_pair(SEGMENT, "recorrente");
            }
            Segment::Installment => {
                params.append_pair(SEGMENT, "parcelado");
            }
        }
        match filters.direction {
            DirectionFilter::All => {}
            DirectionFilter::Inflows => {
                params.append_pair(DIRECTION, "entradas");
            }
            DirectionFilter::Outflows => {
                params.append_pair(DIRECTION, "saidas");
            }
        }
        match filters.status {
            StatusFilter::All => {}
            StatusFilter::Open => {
                params.append_pair(STATUS, "em_aberto");
            }
            StatusFilter::Completed => {
                params.append_pair(STATUS, "concluidos");
            }
        }
        if let Some(category) = filters
            .category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
        {
            params.append_pair(CATEGORY, category);
        }
        if let Some(contact) = filters.contact.as_deref().filter(|c| !c.is_empty()) {
            params.append_pair(CONTACT, contact);
        }
        // The range is only shared when both ends are known.
        if let (Some(from), Some(to)) = (filters.due_from, filters.due_to) {
            params.append_pair(FROM, &format_dashed(from));
            params.append_pair(TO, &format_dashed(to));
        }
        params.append_pair(OVERDUE, if query.overdue { "1" } else { "0" });
        if let Some(quick) = query.quick {
            params.append_pair(
                QUICK,
                match quick {
                    QuickDate::Today => "hoje",
                    QuickDate::ThisWeek => "essa_semana",
                    QuickDate::ThisMonth => "esse_mes",
                },
            );
        }

        params.finish()
    }

    /// Parses a query string (with or without the leading `?`). Unknown
    /// parameters are ignored and empty values count as absent. Unknown
    /// values of the enumerated parameters fall back to "todos" (or no quick
    /// bucket); only malformed dates are an error.
    pub(crate) fn decode(s: &str) -> Result<LedgerQuery, ServerError> {
        let mut query = LedgerQuery::default();
        let mut from: Option<NaiveDate> = None;
        let mut to: Option<NaiveDate> = None;

        let s = s.strip_prefix('?').unwrap_or(s);
        for (key, value) in form_urlencoded::parse(s.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let value: &str = &value;
            match &*key {
                SEARCH => query.search = value.to_string(),
                SEGMENT => {
                    query.segment = match value {
                        "todos" => Segment::All,
                        "lancamentos" => Segment::Entries,
                        "recorrente" => Segment::Recurring,
                        "parcelado" => Segment::Installment,
                        _ => unknown_value(SEGMENT, value),
                    }
                }
                DIRECTION => {
                    query.filters.direction = match value {
                        "todos" => DirectionFilter::All,
                        "entradas" => DirectionFilter::Inflows,
                        "saidas" => DirectionFilter::Outflows,
                        _ => unknown_value(DIRECTION, value),
                    }
                }
                STATUS => {
                    query.filters.status = match value {
                        "todos" => StatusFilter::All,
                        "em_aberto" => StatusFilter::Open,
                        "concluidos" => StatusFilter::Completed,
                        _ => unknown_value(STATUS, value),
                    }
                }
                CATEGORY => query.filters.category = Some(value.to_string()),
                CONTACT => query.filters.contact = Some(value.to_string()),
                FROM => from = Some(parse_dashed(FROM, value)?),
                TO => to = Some(parse_dashed(TO, value)?),
                OVERDUE => query.overdue = value == "1",
                QUICK => {
                    query.quick = match value {
                        "hoje" => Some(QuickDate::Today),
                        "essa_semana" => Some(QuickDate::ThisWeek),
                        "esse_mes" => Some(QuickDate::ThisMonth),
                        _ => unknown_value(QUICK, value),
                    }
                }
                _ => {}
            }
        }

        if let (Some(from), Some(to)) = (from, to) {
            query.filters.due_from = Some(from);
            query.filters.due_to = Some(to);
        }
        Ok(query)
    }
}

fn format_dashed(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

fn unknown_value<T: Default>(param: &str, value: &str) -> T {
    warn!(param, value, "unknown query parameter value, using the default");
    T::default()
}

fn parse_dashed(param: &str, value: &str) -> Result<NaiveDate, ServerError> {
    parse_day_month_year(value, '-').ok_or_else(|| InvalidQueryParameter::new(param, value))
}
