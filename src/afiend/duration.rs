//! Compact duration strings (`168h0m0s`, `1.5h`, `300ms`).
//!
//! The reminder window is persisted as text and accepted on the command line
//! in this format, so parsing and formatting have to agree exactly: whatever
//! [`format_duration`] writes, [`parse_duration`] reads back to the same value.
//! Values are whole nanoseconds bounded by `i64`.

use crate::error::{AfiendError, Result};
use chrono::TimeDelta;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

// Digits beyond this are dropped from a fraction; they are below nanosecond precision anyway.
const MAX_FRACTION_DIGITS: usize = 18;

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parses a signed sequence of decimal numbers with unit suffixes.
///
/// `"0"` is accepted without a unit; every other number needs one.
pub fn parse_duration(input: &str) -> Result<TimeDelta> {
    let fail = |reason: String| AfiendError::Parse {
        input: input.to_string(),
        reason,
    };

    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(TimeDelta::zero());
    }
    if s.is_empty() {
        return Err(fail("empty duration".to_string()));
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, rest) = s.split_at(int_len);
        s = rest;

        let mut frac_part = "";
        if let Some(rest) = s.strip_prefix('.') {
            let frac_len = rest.bytes().take_while(u8::is_ascii_digit).count();
            frac_part = &rest[..frac_len];
            s = &rest[frac_len..];
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(fail("expected a number".to_string()));
        }

        let unit_len = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        let (unit, rest) = s.split_at(unit_len);
        s = rest;
        if unit.is_empty() {
            return Err(fail("missing unit".to_string()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| fail(format!("unknown unit {:?}", unit)))?;

        let whole: u64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| fail("duration out of range".to_string()))?
        };
        let mut value = whole
            .checked_mul(scale)
            .ok_or_else(|| fail("duration out of range".to_string()))?;

        if !frac_part.is_empty() {
            let digits = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS)];
            let fraction: u64 = digits
                .parse()
                .map_err(|_| fail("invalid fraction".to_string()))?;
            let frac_scale = 10f64.powi(digits.len() as i32);
            let frac_nanos = (fraction as f64 * (scale as f64 / frac_scale)) as u64;
            value = value
                .checked_add(frac_nanos)
                .ok_or_else(|| fail("duration out of range".to_string()))?;
        }

        total = total
            .checked_add(value)
            .ok_or_else(|| fail("duration out of range".to_string()))?;
    }

    let nanos = if negative {
        if total > i64::MIN.unsigned_abs() {
            return Err(fail("duration out of range".to_string()));
        }
        0i64.checked_sub_unsigned(total).unwrap_or(i64::MIN)
    } else {
        i64::try_from(total).map_err(|_| fail("duration out of range".to_string()))?
    };

    Ok(TimeDelta::nanoseconds(nanos))
}

/// Formats a duration in its canonical compact form, e.g. `168h0m0s`.
pub fn format_duration(duration: TimeDelta) -> String {
    let nanos = duration
        .num_nanoseconds()
        .unwrap_or(if duration < TimeDelta::zero() {
            i64::MIN
        } else {
            i64::MAX
        });
    let magnitude = nanos.unsigned_abs();
    if magnitude == 0 {
        return "0s".to_string();
    }

    let body = if magnitude < SECOND {
        let (scale, unit) = if magnitude < MICROSECOND {
            (NANOSECOND, "ns")
        } else if magnitude < MILLISECOND {
            (MICROSECOND, "\u{b5}s")
        } else {
            (MILLISECOND, "ms")
        };
        format!("{}{}", with_fraction(magnitude, scale), unit)
    } else {
        let hours = magnitude / HOUR;
        let minutes = (magnitude % HOUR) / MINUTE;
        let seconds = magnitude % MINUTE;

        let mut out = String::new();
        if hours > 0 {
            out.push_str(&format!("{}h", hours));
        }
        if hours > 0 || minutes > 0 {
            out.push_str(&format!("{}m", minutes));
        }
        out.push_str(&format!("{}s", with_fraction(seconds, SECOND)));
        out
    };

    if nanos < 0 {
        format!("-{}", body)
    } else {
        body
    }
}

fn with_fraction(value: u64, scale: u64) -> String {
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{:0width$}", fraction, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_week() {
        assert_eq!(parse_duration("168h0m0s").unwrap(), TimeDelta::hours(168));
    }

    #[test]
    fn parses_mixed_units_and_fractions() {
        assert_eq!(parse_duration("1h30m").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_duration("1.5h").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_duration("300ms").unwrap(), TimeDelta::milliseconds(300));
        assert_eq!(parse_duration(".5s").unwrap(), TimeDelta::milliseconds(500));
        assert_eq!(parse_duration("2us").unwrap(), TimeDelta::microseconds(2));
        assert_eq!(parse_duration("2\u{b5}s").unwrap(), TimeDelta::microseconds(2));
        assert_eq!(parse_duration("7ns").unwrap(), TimeDelta::nanoseconds(7));
    }

    #[test]
    fn parses_sign_and_bare_zero() {
        assert_eq!(parse_duration("0").unwrap(), TimeDelta::zero());
        assert_eq!(parse_duration("-0").unwrap(), TimeDelta::zero());
        assert_eq!(parse_duration("+2m").unwrap(), TimeDelta::minutes(2));
        assert_eq!(parse_duration("-1h").unwrap(), TimeDelta::hours(-1));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "-", "10", "h", "1x", "1.h2", "..5s", "1h 2m", "week"] {
            let err = parse_duration(bad);
            assert!(
                matches!(err, Err(AfiendError::Parse { .. })),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(parse_duration("9999999999h").is_err());
        assert!(parse_duration("99999999999999999999ns").is_err());
    }

    #[test]
    fn formats_like_the_stored_setting() {
        assert_eq!(format_duration(TimeDelta::hours(168)), "168h0m0s");
        assert_eq!(format_duration(TimeDelta::minutes(90)), "1h30m0s");
        assert_eq!(format_duration(TimeDelta::seconds(150)), "2m30s");
        assert_eq!(format_duration(TimeDelta::milliseconds(1500)), "1.5s");
        assert_eq!(format_duration(TimeDelta::zero()), "0s");
        assert_eq!(format_duration(TimeDelta::hours(-1)), "-1h0m0s");
    }

    #[test]
    fn formats_sub_second_values() {
        assert_eq!(format_duration(TimeDelta::nanoseconds(250)), "250ns");
        assert_eq!(format_duration(TimeDelta::nanoseconds(1_500)), "1.5\u{b5}s");
        assert_eq!(format_duration(TimeDelta::microseconds(1_500)), "1.5ms");
    }

    #[test]
    fn formatted_values_parse_back() {
        for delta in [
            TimeDelta::hours(168),
            TimeDelta::milliseconds(1500),
            TimeDelta::nanoseconds(1_500),
            TimeDelta::seconds(-75),
        ] {
            assert_eq!(parse_duration(&format_duration(delta)).unwrap(), delta);
        }
    }
}
