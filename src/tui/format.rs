//! Number formatting helpers shared by the TUI and table output

/// Insert thousands separators into a non-negative integer string
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Money with two decimals and thousands separators: `$1,234.56`
pub fn money(value: f64) -> String {
    let negative = value < 0.0;
    let value = value.abs();
    let whole = value.trunc() as u64;
    let cents = ((value - value.trunc()) * 100.0).round() as u64;
    // Carry when cents round up to a whole unit
    let (whole, cents) = if cents >= 100 { (whole + 1, 0) } else { (whole, cents) };
    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, group_thousands(&whole.to_string()), cents)
}

/// Percentage with two decimals: `1.50%`
pub fn pct(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Multiplier with two decimals: `3.25x`
pub fn times(value: f64) -> String {
    format!("{:.2}x", value)
}

/// Whole count with thousands separators: `12,345`
pub fn count(value: f64) -> String {
    group_thousands(&(value.round().max(0.0) as u64).to_string())
}

/// Compact count for tight columns: `950`, `12.5K`, `3.2M`
pub fn short(value: f64) -> String {
    let value = value.max(0.0);
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

/// Truncate to `max` characters with a trailing ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_groups_thousands() {
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(1_234_567.891), "$1,234,567.89");
    }

    #[test]
    fn test_money_rounds_cents() {
        assert_eq!(money(9.999), "$10.00");
        assert_eq!(money(0.005), "$0.01");
    }

    #[test]
    fn test_money_negative() {
        assert_eq!(money(-12.5), "-$12.50");
    }

    #[test]
    fn test_pct_and_times() {
        assert_eq!(pct(1.5), "1.50%");
        assert_eq!(times(3.0), "3.00x");
        assert_eq!(times(0.0), "0.00x");
    }

    #[test]
    fn test_count_rounds_to_whole() {
        assert_eq!(count(1234.4), "1,234");
        assert_eq!(count(0.0), "0");
    }

    #[test]
    fn test_short_scales() {
        assert_eq!(short(950.0), "950");
        assert_eq!(short(12_500.0), "12.5K");
        assert_eq!(short(3_200_000.0), "3.2M");
    }

    #[test]
    fn test_truncate_preserves_short_strings() {
        assert_eq!(truncate("Hook v3", 10), "Hook v3");
        assert_eq!(truncate("A very long ad name indeed", 10), "A very lo…");
    }
}
