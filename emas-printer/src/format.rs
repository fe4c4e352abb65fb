//! id-ID presentation helpers
//!
//! Labels and receipts use the Indonesian conventions: Rupiah without
//! decimals, `.` as thousands separator, `dd/mm/yyyy, HH.MM.SS` timestamps.

use chrono::NaiveDateTime;

/// No-break space the id-ID currency pattern puts after the symbol
const NBSP: char = '\u{a0}';

/// Format an amount as Indonesian Rupiah with zero fraction digits
///
/// Rounds half away from zero.
///
/// ```
/// use emas_printer::format_currency;
///
/// assert_eq!(format_currency(1_500_000.0), "Rp\u{a0}1.500.000");
/// assert_eq!(format_currency(-5000.0), "-Rp\u{a0}5.000");
/// ```
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("Rp{}{}", NBSP, if amount.is_nan() { "NaN" } else { "∞" });
    }

    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let grouped = group_thousands(&digits);
    if negative {
        format!("-Rp{}{}", NBSP, grouped)
    } else {
        format!("Rp{}{}", NBSP, grouped)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `19/10/2026, 14.05.09`
pub fn format_date(date: &NaiveDateTime) -> String {
    date.format("%d/%m/%Y, %H.%M.%S").to_string()
}

/// Round half away from zero to `decimals` places
///
/// `{:.2}` alone rounds exact ties to even (`2.125` -> `2.12`).
fn round_half_away(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// `10.50g` - item and label weights
pub fn format_weight(grams: f64) -> String {
    format!("{:.2}g", round_half_away(grams, 2))
}

/// `10.50 g` - receipt weight summary
pub fn format_weight_spaced(grams: f64) -> String {
    format!("{:.2} g", round_half_away(grams, 2))
}

/// Purity fraction as a percentage: `0.75` -> `75.0%`
pub fn format_purity(purity: f64) -> String {
    format!("{:.1}%", round_half_away(purity * 100.0, 1))
}

/// Millimetre value as written into CSS (`33`, `9.5`)
pub fn mm(value: f64) -> String {
    format!("{}mm", value)
}

/// Escape text for HTML element and attribute content
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1_500_000.0), "Rp\u{a0}1.500.000");
        assert_eq!(format_currency(15_000.0), "Rp\u{a0}15.000");
        assert_eq!(format_currency(999.0), "Rp\u{a0}999");
        assert_eq!(format_currency(0.0), "Rp\u{a0}0");
        assert_eq!(format_currency(1000.0), "Rp\u{a0}1.000");
        assert_eq!(format_currency(123_456_789.0), "Rp\u{a0}123.456.789");
    }

    #[test]
    fn test_format_currency_rounding() {
        assert_eq!(format_currency(1499.5), "Rp\u{a0}1.500");
        assert_eq!(format_currency(1499.4), "Rp\u{a0}1.499");
        assert_eq!(format_currency(-2500.5), "-Rp\u{a0}2.501");
        assert_eq!(format_currency(-0.4), "Rp\u{a0}0");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap();
        assert_eq!(format_date(&date), "07/03/2026, 09.05.01");
    }

    #[test]
    fn test_weight_and_purity() {
        assert_eq!(format_weight(2.5), "2.50g");
        assert_eq!(format_weight_spaced(10.2), "10.20 g");
        assert_eq!(format_purity(0.75), "75.0%");
        assert_eq!(format_purity(0.0), "0.0%");
    }

    #[test]
    fn test_weight_ties_round_up() {
        assert_eq!(format_weight(2.125), "2.13g");
        assert_eq!(format_weight_spaced(10.125), "10.13 g");
        assert_eq!(format_weight(2.124), "2.12g");
        assert_eq!(format_purity(0.5625), "56.3%");
    }

    #[test]
    fn test_mm() {
        assert_eq!(mm(33.0), "33mm");
        assert_eq!(mm(9.5), "9.5mm");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Kalung" & 'Liontin'</b>"#),
            "&lt;b&gt;&quot;Kalung&quot; &amp; &#39;Liontin&#39;&lt;/b&gt;"
        );
    }
}
