use std::time::Duration;

use eventsweep_core::{AppError, AppResult};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

// Longest representable duration on the Go side (int64 nanoseconds).
const MAX_NANOS: u128 = i64::MAX as u128;

// Fraction digits past this point cannot change the nanosecond result.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parses a duration written in Go `time.ParseDuration` syntax.
///
/// Accepts a sequence of decimal numbers, each with an optional fraction and
/// a mandatory unit suffix, such as `300ms`, `1.5h` or `2h45m`. Valid units
/// are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare `0` is zero.
/// Negative durations are rejected because a retention window cannot point
/// into the future.
pub fn parse_go_duration(input: &str) -> AppResult<Duration> {
    let invalid = |detail: &str| {
        AppError::Validation(format!("invalid duration '{input}': {detail}"))
    };

    let mut rest = input.trim();
    if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    } else if rest.starts_with('-') {
        return Err(invalid("negative durations are not allowed"));
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("empty value"));
    }

    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|character: char| !(character.is_ascii_digit() || character == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            return Err(invalid("expected a decimal number"));
        }

        let unit_len = tail
            .find(|character: char| character.is_ascii_digit() || character == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let unit_nanos = match unit {
            "ns" => 1,
            "us" | "\u{b5}s" | "\u{3bc}s" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SECOND,
            "m" => NANOS_PER_MINUTE,
            "h" => NANOS_PER_HOUR,
            "" => return Err(invalid("missing unit")),
            other => return Err(invalid(&format!("unknown unit '{other}'"))),
        };

        let whole_value = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .map_err(|_| invalid("number out of range"))?
        };
        let mut component = whole_value
            .checked_mul(unit_nanos)
            .ok_or_else(|| invalid("value out of range"))?;

        let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
        if !fraction.is_empty() {
            let numerator = fraction
                .parse::<u128>()
                .map_err(|_| invalid("fraction out of range"))?;
            let denominator = 10_u128.pow(fraction.len() as u32);
            component = component
                .checked_add(numerator * unit_nanos / denominator)
                .ok_or_else(|| invalid("value out of range"))?;
        }

        total_nanos = total_nanos
            .checked_add(component)
            .filter(|total| *total <= MAX_NANOS)
            .ok_or_else(|| invalid("value out of range"))?;
        rest = tail;
    }

    // MAX_NANOS fits in u64, so the conversion cannot truncate.
    Ok(Duration::from_nanos(total_nanos as u64))
}
