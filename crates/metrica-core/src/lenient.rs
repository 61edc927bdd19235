// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Number and string coercions matching how the native side reads JSON:
// integer fields accept any number and truncate toward zero, string-valued
// maps accept scalars and keep their textual form.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Truncate any JSON number toward zero. Out-of-range floats saturate.
pub fn truncate(number: &Number) -> i64 {
    match number.as_i64() {
        Some(n) => n,
        None => match number.as_u64() {
            Some(_) => i64::MAX,
            None => number.as_f64().map_or(0, |f| f as i64),
        },
    }
}

/// A non-negative count read from any JSON number, or `None` when the value
/// is not a number, is negative, or does not fit in `u32`.
pub fn non_negative_u32(value: &Value) -> Option<u32> {
    let Value::Number(number) = value else {
        return None;
    };
    if number.as_f64().is_some_and(|f| f < 0.0) {
        return None;
    }
    u32::try_from(truncate(number)).ok()
}

pub(crate) fn truncated_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(truncate(&n))),
        Some(other) => Err(D::Error::custom(format!("expected a number, got {other}"))),
    }
}

pub(crate) fn truncated_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => non_negative_u32(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a non-negative number, got {value}"))),
    }
}

/// String map whose values may also be numbers or booleans.
pub(crate) fn scalar_strings<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(map) = Option::<BTreeMap<String, Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    map.into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(D::Error::custom(format!(
                        "additional info `{key}` must be a scalar, got {other}"
                    )));
                }
            };
            Ok((key, text))
        })
        .collect::<Result<_, _>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn number(value: Value) -> Number {
        match value {
            Value::Number(n) => n,
            other => panic!("not a number: {other}"),
        }
    }

    #[test]
    fn fractions_truncate_toward_zero() {
        assert_eq!(truncate(&number(json!(30.7))), 30);
        assert_eq!(truncate(&number(json!(-2.9))), -2);
        assert_eq!(truncate(&number(json!(1e30))), i64::MAX);
    }

    #[test]
    fn counts_reject_negative_and_oversized() {
        assert_eq!(non_negative_u32(&json!(30.0)), Some(30));
        assert_eq!(non_negative_u32(&json!(0.5)), Some(0));
        assert_eq!(non_negative_u32(&json!(-5)), None);
        assert_eq!(non_negative_u32(&json!(-0.5)), None);
        assert_eq!(non_negative_u32(&json!(5_000_000_000u64)), None);
        assert_eq!(non_negative_u32(&json!("30")), None);
    }
}
