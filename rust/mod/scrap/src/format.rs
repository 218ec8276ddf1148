//! Display formatting for amounts and quantities.

/// `1234.5, "CZK"` → `"1 234.50 CZK"`. Missing or non-finite values
/// format as zero.
pub fn format_currency(value: Option<f64>, currency: &str) -> String {
    let value = finite_or_zero(value);
    let fixed = format!("{:.2}", value.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{} {}", sign, group_thousands(int), frac, currency)
}

/// Three decimals: `2.0` → `"2.000"`.
pub fn format_quantity(value: Option<f64>) -> String {
    format!("{:.3}", finite_or_zero(value))
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
