//! User-facing message formatting.

/// Format a price with two decimals, `,` thousands separators and a trailing
/// currency symbol: `456789.126` → `456,789.13 €`.
pub fn format_price(value: f64, symbol: &str) -> String {
    let fixed = format!("{value:.2}");
    let (negative, digits) = match fixed.strip_prefix('-') {
        Some(rest) => (rest.bytes().any(|b| b.is_ascii_digit() && b != b'0'), rest),
        None => (false, fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if symbol.is_empty() {
        format!("{sign}{grouped}.{frac_part}")
    } else {
        format!("{sign}{grouped}.{frac_part} {symbol}")
    }
}

pub fn success_message(formatted: &str) -> String {
    format!("Predicted resale price: {formatted}")
}
