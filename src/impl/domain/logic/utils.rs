use chrono::{Datelike, Duration, NaiveDate};

/// Parses a `DD/MM/YYYY` date. Returns `None` for anything that is not a
/// valid calendar date (missing components, 31/02, etc.).
pub(crate) fn parse_br_date(s: &str) -> Option<NaiveDate> {
    parse_day_month_year(s, '/')
}

/// Same as [`parse_br_date`], with an arbitrary separator (URL parameters use
/// `DD-MM-YYYY`).
pub(crate) fn parse_day_month_year(s: &str, separator: char) -> Option<NaiveDate> {
    let mut parts = s.trim().split(separator);
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

pub(crate) fn format_br_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Last day of the given month, or `None` for an invalid month.
pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|first| month_end_date(first).day())
}

/// Returns the first day of the month of the given date.
pub(crate) fn month_start_date(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns the last day of the month of the given date.
pub(crate) fn month_end_date(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|next_month| next_month - Duration::days(1))
        .unwrap_or(date)
}

/// Monday..Sunday week containing the given date.
pub(crate) fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_from_monday = date.weekday().num_days_from_monday() as i64;
    let start = date - Duration::days(days_from_monday);
    (start, start + Duration::days(6))
}
