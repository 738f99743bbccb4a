use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

/// Standard number decimal places for the given currency
/// (ex. JPY = 0, BRL = 2).
fn decimal_places(currency: Currency) -> usize {
    currency.exponent().unwrap_or(0) as usize
}

/// Format cash amount in pt-BR notation: symbol first, '.' as thousands
/// separator and ',' as decimal mark (R$ 1.234,56). Negative amounts get a
/// leading '-'.
pub(crate) fn format_amount(amount: f64, currency: Currency) -> String {
    let decimal_places = decimal_places(currency);
    let scale = 10_i64.pow(decimal_places as u32);
    let minor_units = (amount.abs() * scale as f64).round() as i64;
    let sign = if amount < 0.0 && minor_units != 0 { "-" } else { "" };
    let integer_part = (minor_units / scale).to_formatted_string(&Locale::pt);
    if decimal_places == 0 {
        format!("{}{} {}", sign, currency.symbol(), integer_part)
    } else {
        format!(
            "{}{} {},{:0decimal_places$}",
            sign,
            currency.symbol(),
            integer_part,
            minor_units % scale,
        )
    }
}

pub(crate) fn format_brl(amount: f64) -> String {
    format_amount(amount, Currency::BRL)
}

/// Ratio as a pt-BR percentage with one decimal (0.125 -> 12,5%).
pub(crate) fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brl_uses_pt_br_separators() {
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(199.9), "R$ 199,90");
        assert_eq!(format_brl(-3500.0), "-R$ 3.500,00");
        assert_eq!(format_brl(-0.001), "R$ 0,00");
    }

    #[test]
    fn rounding_carries_into_the_integer_part() {
        assert_eq!(format_brl(9.999), "R$ 10,00");
    }

    #[test]
    fn zero_decimal_currencies() {
        assert_eq!(format_amount(1234.6, Currency::JPY), format!("{} 1.235", Currency::JPY.symbol()));
    }

    #[test]
    fn percent() {
        assert_eq!(format_percent(0.125), "12,5%");
        assert_eq!(format_percent(-0.5), "-50,0%");
        assert_eq!(format_percent(0.0), "0,0%");
    }
}
