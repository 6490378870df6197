//! Text renderings of numbers as they appear once a numeric column holds strings.

/// Shortest round-trip decimal text, keeping one fractional digit on whole numbers
/// so untouched cells still read as floats (`280.0`, not `280`).
pub fn float_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Formats an amount as `$ 1,234.57`: two decimals with a thousands separator.
pub fn currency_text(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("$ {}{}.{}", sign, group_thousands(whole), fraction)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Reads a cell back as a number, accepting the currency and unit renderings.
/// Sentinels and free text yield `None`.
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text
        .trim()
        .trim_start_matches('$')
        .trim_end_matches("units")
        .trim();
    trimmed.replace(',', "").parse::<f64>().ok()
}
