//! Comparison rules, one per semantic type family. Every rule picks the
//! most precision-preserving equality available for its family: the two
//! stores serialize non-string types differently, so a generic
//! stringify-both-sides comparison is incorrect for numeric and binary
//! columns.

use std::cmp::Ordering;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

use rowparity_common::{ColumnDescriptor, MatchResult, SqlValue};

use crate::dialect::CompareRule;

/// Fixed textual pattern for timestamp columns on the target side.
pub const TIMESTAMP_PATTERN: &str = "%Y-%m-%dT%H:%M:%SZ";
pub const DATE_PATTERN: &str = "%Y-%m-%d";
pub const TIME_PATTERN: &str = "%H:%M:%S";

/// Compares one relational value against the target JSON field under
/// the given rule. `Skip` never reaches this function; the driving loop
/// filters skipped columns before key lookup.
pub fn compare(
    rule: CompareRule,
    descriptor: &ColumnDescriptor,
    source: &SqlValue,
    target: &JsonValue,
) -> MatchResult {
    // NULL is a value: it matches an equivalent null and nothing else.
    if source.is_null() || target.is_null() {
        return if source.is_null() && target.is_null() {
            MatchResult::matched(&descriptor.name, &descriptor.type_name)
        } else {
            mismatch(descriptor, source, target)
        };
    }

    match rule {
        CompareRule::Binary => compare_binary(descriptor, source, target),
        CompareRule::Decimal => compare_decimal(descriptor, source, target),
        CompareRule::Integral => compare_integral(descriptor, source, target),
        CompareRule::Float => compare_float(descriptor, source, target),
        CompareRule::Boolean => compare_boolean(descriptor, source, target),
        CompareRule::Date => compare_date(descriptor, source, target),
        CompareRule::Timestamp => compare_timestamp(descriptor, source, target),
        CompareRule::Time => compare_time(descriptor, source, target),
        CompareRule::Text => compare_text(descriptor, source, target),
        CompareRule::Skip => MatchResult::matched(&descriptor.name, &descriptor.type_name),
    }
}

fn mismatch(descriptor: &ColumnDescriptor, source: &SqlValue, target: &JsonValue) -> MatchResult {
    MatchResult::mismatch(
        &descriptor.name,
        &descriptor.type_name,
        format!(
            "Different values found for column {}: source={} target={}",
            descriptor.name, source, target
        ),
    )
}

fn bad_source_shape(descriptor: &ColumnDescriptor, source: &SqlValue, wanted: &str) -> MatchResult {
    MatchResult::mismatch(
        &descriptor.name,
        &descriptor.type_name,
        format!(
            "Column {}: source value is not {}: {:?}",
            descriptor.name, wanted, source
        ),
    )
}

fn bad_target_shape(descriptor: &ColumnDescriptor, target: &JsonValue, wanted: &str) -> MatchResult {
    MatchResult::parse_failure(
        &descriptor.name,
        &descriptor.type_name,
        format!(
            "Column {}: target value is not {}: {}",
            descriptor.name, wanted, target
        ),
    )
}

fn verdict(
    descriptor: &ColumnDescriptor,
    equal: bool,
    source: &SqlValue,
    target: &JsonValue,
) -> MatchResult {
    if equal {
        MatchResult::matched(&descriptor.name, &descriptor.type_name)
    } else {
        mismatch(descriptor, source, target)
    }
}

/// Raw bytes against base64 text, exact string equality. Holds for any
/// byte sequence, including empty.
fn compare_binary(
    descriptor: &ColumnDescriptor,
    source: &SqlValue,
    target: &JsonValue,
) -> MatchResult {
    let Some(bytes) = source.as_bytes() else {
        return bad_source_shape(descriptor, source, "bytes");
    };
    let Some(text) = target.as_str() else {
        return bad_target_shape(descriptor, target, "a base64 string");
    };
    verdict(descriptor, BASE64.encode(bytes) == text, source, target)
}

/// Exact arbitrary-precision equality. Scale is immaterial: 10.50 and
/// 10.5 are the same decimal.
fn compare_decimal(
    descriptor: &ColumnDescriptor,
    source: &SqlValue,
    target: &JsonValue,
) -> MatchResult {
    let Some(source_dec) = source.as_decimal() else {
        return bad_source_shape(descriptor, source, "a decimal");
    };
    let Some(target_dec) = json_decimal(target) else {
        return bad_target_shape(descriptor, target, "a decimal number");
    };
    verdict(descriptor, source_dec == target_dec, source, target)
}

/// Canonical decimal-string equality, immune to integer width
/// differences between the two drivers.
fn compare_integral(
    descriptor: &ColumnDescriptor,
    source: &SqlValue,
    target: &JsonValue,
) -> MatchResult {
    let Some(source_int) = source.as_int() else {
        return bad_source_shape(descriptor, source, "an integer");
    };
    let Some(target_int) = json_i64(target) else {
        return bad_target_shape(descriptor, target, "an integer");
    };
    verdict(
        descriptor,
        source_int.to_string() == target_int.to_string(),
        source,
        target,
    )
}

/// Bit-for-bit IEEE equality. Both stores are expected to echo the same
/// stored bits, so no epsilon is applied. `total_cmp` keeps NaN equal
/// to NaN and distinguishes the zero signs, like `Double.compare`.
fn compare_float(
    descriptor: &ColumnDescriptor,
    source: &SqlValue,
    target: &JsonValue,
) -> MatchResult {
    let Some(source_f) = source.as_float() else {
        return bad_source_shape(descriptor, source, "a float");
    };
    let Some(target_f) = json_f64(target) else {
        return bad_target_shape(descriptor, target, "a number");
    };
    verdict(
        descriptor,
        source_f.total_cmp(&target_f) == Ordering::Equal,
        source,
        target,
    )
}

fn compare_boolean(
    descriptor: &ColumnDescriptor,
    source: &SqlValue,
    target: &JsonValue,
) -> MatchResult {
    let Some(source_b) = source.as_bool() else {
        return bad_source_shape(descriptor, source, "a boolean");
    };
    let Some(target_b) = json_bool(target) else {
        return bad_target_shape(descriptor, target, "a boolean");
    };
    verdict(descriptor, source_b == target_b, source, target)
}

fn compare_date(
    descriptor: &ColumnDescriptor,
    source: &SqlValue,
    target: &JsonValue,
) -> MatchResult {
    let Some(source_date) = source.as_date() else {
        return bad_source_shape(descriptor, source, "a date");
    };
    let Some(text) = target.as_str() else {
        return bad_target_shape(descriptor, target, "a date string");
    };
    match chrono::NaiveDate::parse_from_str(text, DATE_PATTERN) {
        Ok(target_date) => verdict(descriptor, source_date == target_date, source, target),
        Err(e) => MatchResult::parse_failure(
            &descriptor.name,
            &descriptor.type_name,
            format!("Column {}: cannot parse date {:?}: {}", descriptor.name, text, e),
        ),
    }
}

/// Parses the target under the fixed pattern and compares as instants.
/// A parse failure is a validation failure, never a silent skip.
fn compare_timestamp(
    descriptor: &ColumnDescriptor,
    source: &SqlValue,
    target: &JsonValue,
) -> MatchResult {
    let Some(source_ts) = source.as_timestamp() else {
        return bad_source_shape(descriptor, source, "a timestamp");
    };
    let Some(text) = target.as_str() else {
        return bad_target_shape(descriptor, target, "a timestamp string");
    };
    match chrono::NaiveDateTime::parse_from_str(text, TIMESTAMP_PATTERN) {
        Ok(target_ts) => verdict(descriptor, source_ts == target_ts, source, target),
        Err(e) => MatchResult::parse_failure(
            &descriptor.name,
            &descriptor.type_name,
            format!(
                "Column {}: cannot parse timestamp {:?} with pattern {}: {}",
                descriptor.name, text, TIMESTAMP_PATTERN, e
            ),
        ),
    }
}

fn compare_time(
    descriptor: &ColumnDescriptor,
    source: &SqlValue,
    target: &JsonValue,
) -> MatchResult {
    let Some(source_time) = source.as_time() else {
        return bad_source_shape(descriptor, source, "a time");
    };
    let Some(text) = target.as_str() else {
        return bad_target_shape(descriptor, target, "a time string");
    };
    match chrono::NaiveTime::parse_from_str(text, TIME_PATTERN) {
        Ok(target_time) => verdict(descriptor, source_time == target_time, source, target),
        Err(e) => MatchResult::parse_failure(
            &descriptor.name,
            &descriptor.type_name,
            format!("Column {}: cannot parse time {:?}: {}", descriptor.name, text, e),
        ),
    }
}

/// Fallback: literal textual equality on the display form, preserving
/// leading zeros and formatting. Applies to character columns and any
/// unrecognized type.
fn compare_text(
    descriptor: &ColumnDescriptor,
    source: &SqlValue,
    target: &JsonValue,
) -> MatchResult {
    let source_text = source.to_string();
    let target_text = json_display(target);
    verdict(descriptor, source_text == target_text, source, target)
}

fn json_display(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Exact decimal out of a JSON number or numeric string. Numbers go
/// through their textual form so no precision is lost to f64.
fn json_decimal(value: &JsonValue) -> Option<Decimal> {
    let text = match value {
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn json_i64(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn json_f64(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn json_bool(value: &JsonValue) -> Option<bool> {
    match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}
