//! Core type definitions used throughout the codebase

/// Simulated day counter (starts at 1)
pub type Day = u64;

/// Currency amounts. Signed: money may go negative through events.
pub type Money = i64;

/// Lower bound for happiness, energy and security
pub const STAT_MIN: i64 = 0;

/// Upper bound for happiness, energy and security
pub const STAT_MAX: i64 = 100;

/// Clamp a bounded stat into [STAT_MIN, STAT_MAX]
pub fn clamp_stat(value: i64) -> i64 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Add a delta to a bounded stat and clamp the result
pub fn apply_clamped(value: i64, delta: i64) -> i64 {
    clamp_stat(value.saturating_add(delta))
}

/// Format an amount with thousands separators (1234567 -> "1,234,567")
pub fn format_money(amount: Money) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if amount < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_stat_bounds() {
        assert_eq!(clamp_stat(-20), 0);
        assert_eq!(clamp_stat(50), 50);
        assert_eq!(clamp_stat(250), 100);
    }

    #[test]
    fn test_apply_clamped_saturates() {
        assert_eq!(apply_clamped(95, 10), 100);
        assert_eq!(apply_clamped(3, -10), 0);
        assert_eq!(apply_clamped(i64::MAX, 1), 100);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "0");
        assert_eq!(format_money(999), "999");
        assert_eq!(format_money(1000), "1,000");
        assert_eq!(format_money(1000000), "1,000,000");
        assert_eq!(format_money(-50000), "-50,000");
    }
}
