//! Rupee amount formatting with comma-grouped thousands

/// Whole amount, e.g. `10000000` -> `10,000,000`
pub fn format_amount(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Two-decimal amount, e.g. `12345.678` -> `12,345.68`
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1_000), "1,000");
        assert_eq!(format_amount(100_000), "100,000");
        assert_eq!(format_amount(10_000_000), "10,000,000");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(1100.0), "1,100.00");
        assert_eq!(format_currency(12345.678), "12,345.68");
        assert_eq!(format_currency(-2500.5), "-2,500.50");
    }
}
