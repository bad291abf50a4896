// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Scalar conversion primitives, `§4` component 2. These are free functions:
//! fallible ones return `Option`, never panic on malformed input, and never
//! raise [`crate::error::ConvertError`] — per `§7`, per-element failures are
//! the caller's job to turn into a null write.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::category::TypeCategory;
use crate::vector::Timestamp;

/// `i64::MIN` as an `f64`, used by [`double_fits_in_long`].
const MIN_LONG_AS_DOUBLE: f64 = i64::MIN as f64;
/// `2^63` as an `f64`: one past `i64::MAX` as a double (`i64::MAX as f64` rounds
/// up to `2^63` due to precision loss, so comparing directly against it would
/// admit values that don't actually fit; this is the Guava-style bound instead).
const MAX_LONG_AS_DOUBLE_PLUS_ONE: f64 = 9_223_372_036_854_775_808.0;

/// Strict decimal-integer parse. Rejects leading/trailing whitespace, `+`-prefixed
/// forms other than a bare sign, and anything with a fractional or exponent part.
pub fn parse_long(s: &str) -> Option<i64> {
    s.parse::<i64>().ok()
}

pub fn format_long(value: i64) -> String {
    value.to_string()
}

/// Strict double parse: signed decimal or scientific notation, plus `NaN`/`inf`/`infinity`
/// spellings (case-insensitive, per `f64`'s `FromStr`). Rejects surrounding whitespace.
pub fn parse_double(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}

/// Parses a decimal literal (`[+-]?\d+(\.\d+)?`, no exponent) into an unscaled `i128`
/// and the scale (digits after the decimal point) it was written at. The caller
/// rescales/range-checks against the target vector's fixed precision and scale.
pub fn parse_decimal(s: &str) -> Option<(i128, i8)> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut i = 0;
    let negative = match bytes[0] {
        b'-' => {
            i += 1;
            true
        }
        b'+' => {
            i += 1;
            false
        }
        _ => false,
    };
    let digits_start = i;
    let mut unscaled: i128 = 0;
    let mut scale: i8 = 0;
    let mut seen_dot = false;
    let mut any_digit = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => {
                any_digit = true;
                unscaled = unscaled.checked_mul(10)?.checked_add((bytes[i] - b'0') as i128)?;
                if seen_dot {
                    scale = scale.checked_add(1)?;
                }
            }
            b'.' if !seen_dot => {
                seen_dot = true;
            }
            _ => return None,
        }
        i += 1;
    }
    let _ = digits_start;
    if !any_digit {
        return None;
    }
    if negative {
        unscaled = -unscaled;
    }
    Some((unscaled, scale))
}

/// Strict `YYYY-MM-DD HH:MM:SS[.fffffffff]` parse (ORC/Hive timestamp literal form,
/// not full ISO-8601 — no `T` separator, no timezone offset: this layer never
/// localizes timestamps, per `§1` Non-goals).
pub fn parse_timestamp(s: &str) -> Option<Timestamp> {
    let parsed = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok()?;
    let seconds = parsed.and_utc().timestamp();
    let nanos = parsed.and_utc().timestamp_subsec_nanos();
    Some(Timestamp::new(seconds, nanos))
}

/// Strict `YYYY-MM-DD` parse, returning days since the Unix epoch (may be negative).
pub fn parse_date(s: &str) -> Option<i32> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date");
    Some((date - epoch).num_days() as i32)
}

/// Formats a timestamp the way `StringFromTimestamp` (`§4.5`) requires: the
/// fractional-second component is omitted entirely when zero. Returns `None`
/// (meaning: null the output slot) when `ts.seconds` falls outside chrono's
/// representable range rather than panicking.
pub fn format_timestamp(ts: Timestamp) -> Option<String> {
    let naive = chrono::DateTime::from_timestamp(ts.seconds, ts.nanos)?.naive_utc();
    Some(if ts.nanos == 0 {
        naive.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        naive.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    })
}

/// Formats a day count (days since Unix epoch) as `YYYY-MM-DD`. Returns `None`
/// (meaning: null the output slot) when `days` falls outside `NaiveDate`'s
/// representable range rather than panicking.
pub fn format_date(days: i32) -> Option<String> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date");
    let date = epoch.checked_add_signed(chrono::Duration::days(days as i64))?;
    Some(format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day()))
}

/// The Guava-style double-to-long fits check: true iff truncating `v` toward
/// zero yields a value representable as `i64`. Returns `false` for `NaN` (both
/// comparisons below are false for `NaN`, as required by IEEE 754 ordering).
pub fn double_fits_in_long(v: f64) -> bool {
    (MIN_LONG_AS_DOUBLE - v) < 1.0 && v < MAX_LONG_AS_DOUBLE_PLUS_ONE
}

/// Narrowing-range check for integer-family down-casts (`§4.2`/`§8`). Returns
/// `None` (meaning: null the output slot) iff `value` does not fit in `target`'s
/// range; otherwise returns the low-order `width(target)` bits reinterpreted as
/// signed `target`, widened back to `i64`. `TypeCategory::Boolean` is handled
/// specially per `§4.2`: any non-zero value maps to `1`, zero to `0`, never null.
pub fn down_cast_integer(value: i64, target: TypeCategory) -> Option<i64> {
    match target {
        TypeCategory::Boolean => Some(if value != 0 { 1 } else { 0 }),
        TypeCategory::Byte => {
            let narrowed = value as i8;
            (narrowed as i64 == value).then_some(narrowed as i64)
        }
        TypeCategory::Short => {
            let narrowed = value as i16;
            (narrowed as i64 == value).then_some(narrowed as i64)
        }
        TypeCategory::Int => {
            let narrowed = value as i32;
            (narrowed as i64 == value).then_some(narrowed as i64)
        }
        TypeCategory::Long => Some(value),
        _ => panic!("down_cast_integer called with non-integer-family target {target}"),
    }
}

/// UTF-8-safe truncator for the string group (`§4.5`/`§9`): never splits a
/// multi-byte code point. `max_length` counts Unicode scalar values (characters),
/// matching ORC/Hive `CHAR`/`VARCHAR` length semantics. `CHAR` right-trims
/// trailing ASCII spaces *before* truncating; `VARCHAR`/`STRING` do not trim.
pub fn string_group_truncate(value: &str, category: TypeCategory, max_length: Option<u32>) -> String {
    let trimmed = match category {
        TypeCategory::Char => value.trim_end_matches(' '),
        _ => value,
    };
    match (category, max_length) {
        (TypeCategory::Char, Some(max)) | (TypeCategory::Varchar, Some(max)) => {
            trimmed.chars().take(max as usize).collect()
        }
        _ => trimmed.to_string(),
    }
}

/// Lowercase hex dump, bytes separated by single spaces: `aa bb cc`. Exact output
/// length is `3*n - 1` for `n > 0`, empty for `n == 0`.
pub fn binary_to_hex_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().saturating_mul(3).saturating_sub(1));
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// UTF-8 decode; `None` on malformed input (the caller writes a null).
pub fn bytes_to_string(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes).ok()
}

/// An `i64` as an unscaled decimal at scale 0.
pub fn long_to_decimal(value: i64) -> (i128, i8) {
    (value as i128, 0)
}

/// Formats `value` via its canonical (shortest round-trippable) decimal string and
/// reparses it as a decimal literal, mirroring the teacher's "format then reparse as
/// HiveDecimal" pattern for double-to-decimal in spirit, without depending on a
/// big-decimal crate the teacher doesn't carry. Returns `None` for non-finite input.
pub fn double_to_decimal(value: f64) -> Option<(i128, i8)> {
    if !value.is_finite() {
        return None;
    }
    // `{:.N}` with a generous fixed precision avoids scientific notation, which
    // `parse_decimal` does not accept; trailing zeros are trimmed back off so the
    // resulting scale reflects the value's actual precision rather than always 17.
    let formatted = format!("{value:.17}");
    let (unscaled, scale) = parse_decimal(&formatted)?;
    Some(trim_trailing_zero_scale(unscaled, scale))
}

fn trim_trailing_zero_scale(mut unscaled: i128, mut scale: i8) -> (i128, i8) {
    while scale > 0 && unscaled % 10 == 0 {
        unscaled /= 10;
        scale -= 1;
    }
    (unscaled, scale)
}

/// Canonical textual form of an unscaled decimal at a fixed scale, e.g.
/// `(12345, 2) -> "123.45"`, `(-1, 2) -> "-0.01"`. Used by `StringFromDecimal`.
pub fn decimal_to_string(unscaled: i128, scale: u8) -> String {
    if scale == 0 {
        return unscaled.to_string();
    }
    let negative = unscaled < 0;
    let scale = scale as usize;
    let digits = unscaled.unsigned_abs().to_string();
    let digits = if digits.len() <= scale {
        format!("{}{digits}", "0".repeat(scale - digits.len() + 1))
    } else {
        digits
    };
    let split = digits.len() - scale;
    let (int_part, frac_part) = digits.split_at(split);
    format!("{}{int_part}.{frac_part}", if negative { "-" } else { "" })
}

pub fn decimal_to_double(unscaled: i128, scale: u8) -> f64 {
    unscaled as f64 / 10f64.powi(scale as i32)
}

pub fn days_to_millis(days: i32) -> i64 {
    days as i64 * 86_400_000
}

/// Whole seconds since epoch, flooring toward negative infinity for negative
/// instants (so `millis_to_seconds(-1)` is `-1`, not `0`).
pub fn millis_to_seconds(millis: i64) -> i64 {
    millis.div_euclid(1000)
}

pub fn timestamp_to_double(ts: Timestamp) -> f64 {
    ts.seconds as f64 + ts.nanos as f64 / 1_000_000_000.0
}

/// Treats `value` as seconds since epoch: the floor is the whole-seconds
/// component, the (always non-negative) remainder is the nanosecond component.
/// `None` for non-finite input.
pub fn double_to_timestamp(value: f64) -> Option<Timestamp> {
    if !value.is_finite() {
        return None;
    }
    let seconds = value.floor();
    let fraction = value - seconds;
    let nanos = (fraction * 1_000_000_000.0).round() as u32;
    // Rounding the fractional part can carry into the next second (e.g. 0.9999999996).
    let (seconds, nanos) = if nanos >= 1_000_000_000 {
        (seconds as i64 + 1, 0)
    } else {
        (seconds as i64, nanos)
    };
    Some(Timestamp::new(seconds, nanos))
}

pub fn decimal_to_timestamp(unscaled: i128, scale: u8) -> Option<Timestamp> {
    double_to_timestamp(decimal_to_double(unscaled, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_long_rejects_malformed_input() {
        assert_eq!(parse_long("nope"), None);
        assert_eq!(parse_long(""), None);
        assert_eq!(parse_long("  2"), None);
        assert_eq!(parse_long("3.14"), None);
        assert_eq!(parse_long("42"), Some(42));
        assert_eq!(parse_long("-42"), Some(-42));
    }

    #[test]
    fn parse_double_accepts_scientific_and_special_values_rejects_whitespace() {
        assert_eq!(parse_double("3.14"), Some(3.14));
        assert_eq!(parse_double("nope"), None);
        assert_eq!(parse_double(""), None);
        assert_eq!(parse_double("  2.0"), None);
        assert!(parse_double("NaN").unwrap().is_nan());
        assert_eq!(parse_double("1e10"), Some(1e10));
        assert_eq!(parse_double("-1.5e-3"), Some(-1.5e-3));
    }

    #[test]
    fn double_fits_in_long_boundaries() {
        assert!(double_fits_in_long(0.0));
        assert!(double_fits_in_long(9.2233720368547748e18)); // < 2^63, fits
        assert!(!double_fits_in_long(1e20));
        assert!(!double_fits_in_long(f64::NAN));
        assert!(!double_fits_in_long(f64::INFINITY));
        assert!(!double_fits_in_long(f64::NEG_INFINITY));
        assert!(double_fits_in_long(i64::MIN as f64));
    }

    #[test]
    fn down_cast_integer_byte_overflow_nulls() {
        assert_eq!(down_cast_integer(1, TypeCategory::Byte), Some(1));
        assert_eq!(down_cast_integer(300, TypeCategory::Byte), None);
        assert_eq!(down_cast_integer(-1, TypeCategory::Byte), Some(-1));
        assert_eq!(down_cast_integer(128, TypeCategory::Byte), None);
        assert_eq!(down_cast_integer(127, TypeCategory::Byte), Some(127));
    }

    #[test]
    fn down_cast_integer_boolean_never_nulls() {
        assert_eq!(down_cast_integer(0, TypeCategory::Boolean), Some(0));
        assert_eq!(down_cast_integer(-5, TypeCategory::Boolean), Some(1));
        assert_eq!(down_cast_integer(i64::MIN, TypeCategory::Boolean), Some(1));
    }

    #[test]
    fn string_group_truncate_char_trims_then_truncates() {
        assert_eq!(
            string_group_truncate("hi   ", TypeCategory::Char, Some(10)),
            "hi"
        );
        assert_eq!(
            string_group_truncate("hello world", TypeCategory::Varchar, Some(5)),
            "hello"
        );
        assert_eq!(
            string_group_truncate("  lead", TypeCategory::Varchar, Some(10)),
            "  lead"
        );
    }

    #[test]
    fn string_group_truncate_is_code_point_safe() {
        // "héllo": é is 2 bytes (U+00E9); truncating to 2 chars must keep 'h' + 'é' whole.
        let truncated = string_group_truncate("héllo", TypeCategory::Varchar, Some(2));
        assert_eq!(truncated, "h\u{e9}");
        assert_eq!(truncated.chars().count(), 2);
    }

    #[test]
    fn binary_to_hex_string_lengths_and_content() {
        assert_eq!(binary_to_hex_string(&[]), "");
        assert_eq!(binary_to_hex_string(&[0xde]), "de");
        assert_eq!(binary_to_hex_string(&[0xde, 0xad, 0xbe, 0xef]), "de ad be ef");
        let four = binary_to_hex_string(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(four.len(), 3 * 4 - 1);
    }

    #[test]
    fn parse_decimal_basic() {
        assert_eq!(parse_decimal("123.45"), Some((12345, 2)));
        assert_eq!(parse_decimal("-0.01"), Some((-1, 2)));
        assert_eq!(parse_decimal("99.99"), Some((9999, 2)));
        assert_eq!(parse_decimal("nope"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("5"), Some((5, 0)));
    }

    #[test]
    fn millis_to_seconds_floors_toward_negative_infinity() {
        assert_eq!(millis_to_seconds(1999), 1);
        assert_eq!(millis_to_seconds(-1), -1);
        assert_eq!(millis_to_seconds(-1000), -1);
        assert_eq!(millis_to_seconds(-1001), -2);
    }

    #[test]
    fn decimal_to_string_pads_leading_zeros() {
        assert_eq!(decimal_to_string(12345, 2), "123.45");
        assert_eq!(decimal_to_string(-1, 2), "-0.01");
        assert_eq!(decimal_to_string(9999, 2), "99.99");
        assert_eq!(decimal_to_string(5, 0), "5");
    }

    #[test]
    fn format_date_handles_pre_epoch_days() {
        assert_eq!(format_date(0), Some("1970-01-01".to_string()));
        assert_eq!(format_date(-1), Some("1969-12-31".to_string()));
        assert_eq!(parse_date("1969-12-31"), Some(-1));
    }

    #[test]
    fn format_date_nulls_out_of_chrono_range() {
        assert_eq!(format_date(i32::MAX), None);
        assert_eq!(format_date(i32::MIN), None);
    }

    #[test]
    fn format_timestamp_nulls_out_of_chrono_range() {
        assert_eq!(format_timestamp(Timestamp::new(i64::MAX, 0)), None);
        assert_eq!(format_timestamp(Timestamp::new(i64::MIN, 0)), None);
    }

    proptest! {
        #[test]
        fn format_long_parse_long_round_trip(n: i64) {
            prop_assert_eq!(parse_long(&format_long(n)), Some(n));
        }

        #[test]
        fn hex_string_length_matches_formula(bytes: Vec<u8>) {
            let hex = binary_to_hex_string(&bytes);
            let expected_len = if bytes.is_empty() { 0 } else { 3 * bytes.len() - 1 };
            prop_assert_eq!(hex.len(), expected_len);
        }

        #[test]
        fn date_round_trip(days in -40_000i32..40_000i32) {
            prop_assert_eq!(format_date(days).and_then(|s| parse_date(&s)), Some(days));
        }
    }
}
