//! Coercion primitives turning raw JSON input into typed values.
//!
//! Every primitive separates "the client did not send this field" from "the
//! client sent something we cannot use", so one function serves both optional
//! and required fields. Requiredness is enforced elsewhere, by field lists.

use serde_json::{Number, Value};

/// Outcome of coercing a single raw field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<T> {
    /// Missing, `null`, or the empty string.
    Absent,
    /// Input was supplied but cannot be converted.
    Invalid,
    /// Successfully converted value.
    Value(T),
}

impl<T> Coerced<T> {
    /// Converted value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Coerced::Value(value) => Some(value),
            Coerced::Absent | Coerced::Invalid => None,
        }
    }

    /// True when the input was supplied but malformed.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Coerced::Invalid)
    }
}

/// Only `null` and `""` count as empty; `"   "` is supplied but malformed.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Convert a raw value to a finite number.
///
/// JSON numbers pass through, strings are trimmed and parsed as decimal floats.
/// Booleans, arrays, objects and whitespace-only strings are never numbers.
pub fn to_number(value: Option<&Value>) -> Coerced<f64> {
    let Some(value) = value.filter(|value| !is_empty(value)) else {
        return Coerced::Absent;
    };

    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(number) if number.is_finite() => Coerced::Value(number),
        _ => Coerced::Invalid,
    }
}

/// Convert a raw value to a boolean.
///
/// Accepts JSON booleans and the strings `"true"`/`"false"` in any casing.
pub fn to_boolean(value: Option<&Value>) -> Coerced<bool> {
    match value {
        None | Some(Value::Null) => Coerced::Absent,
        Some(Value::String(text)) if text.is_empty() => Coerced::Absent,
        Some(Value::Bool(flag)) => Coerced::Value(*flag),
        Some(Value::String(text)) if text.eq_ignore_ascii_case("true") => Coerced::Value(true),
        Some(Value::String(text)) if text.eq_ignore_ascii_case("false") => Coerced::Value(false),
        Some(_) => Coerced::Invalid,
    }
}

/// Trim strings; any other value is returned unchanged.
pub fn trim_string(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(text.trim().to_owned()),
        other => other.clone(),
    }
}

/// Store integral values as JSON integers so `20` does not come back as `20.0`.
pub(crate) fn number_from_f64(value: f64) -> Option<Number> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Some(Number::from(value as i64))
    } else {
        Number::from_f64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_null_and_empty_are_absent() {
        for raw in [None, Some(&Value::Null), Some(&json!(""))] {
            assert_eq!(to_number(raw), Coerced::Absent);
        }
        for raw in [None, Some(&Value::Null), Some(&json!(""))] {
            assert_eq!(to_boolean(raw), Coerced::Absent);
        }
    }

    #[test]
    fn numbers_and_numeric_strings_parse() {
        assert_eq!(to_number(Some(&json!(20))), Coerced::Value(20.0));
        assert_eq!(to_number(Some(&json!(2.54))), Coerced::Value(2.54));
        assert_eq!(to_number(Some(&json!(" 1.75 "))), Coerced::Value(1.75));
        assert_eq!(to_number(Some(&json!("-3"))), Coerced::Value(-3.0));
        assert_eq!(to_number(Some(&json!("1e3"))), Coerced::Value(1000.0));
    }

    #[test]
    fn non_numeric_strings_are_invalid() {
        for raw in ["abc", "12abc", "Infinity", "NaN", "inf", "1,000", "   ", "\t"] {
            assert_eq!(to_number(Some(&json!(raw))), Coerced::Invalid, "{raw}");
        }
    }

    #[test]
    fn structured_values_are_not_numbers() {
        assert!(to_number(Some(&json!(true))).is_invalid());
        assert!(to_number(Some(&json!([1]))).is_invalid());
        assert!(to_number(Some(&json!({"n": 1}))).is_invalid());
    }

    #[test]
    fn boolean_strings_ignore_case() {
        for raw in ["true", "TRUE", "True", "tRuE"] {
            assert_eq!(to_boolean(Some(&json!(raw))), Coerced::Value(true), "{raw}");
        }
        for raw in ["false", "FALSE", "False"] {
            assert_eq!(to_boolean(Some(&json!(raw))), Coerced::Value(false), "{raw}");
        }
        assert_eq!(to_boolean(Some(&json!(false))), Coerced::Value(false));
    }

    #[test]
    fn other_boolean_inputs_are_invalid() {
        for raw in [json!("yes"), json!(1), json!(" true"), json!([]), json!("0")] {
            assert!(to_boolean(Some(&raw)).is_invalid(), "{raw}");
        }
    }

    #[test]
    fn trim_string_only_touches_strings() {
        assert_eq!(trim_string(&json!("  Red Sox ")), json!("Red Sox"));
        assert_eq!(trim_string(&json!(42)), json!(42));
        assert_eq!(trim_string(&json!(["  a "])), json!(["  a "]));
    }

    #[test]
    fn integral_numbers_stay_integers() {
        assert_eq!(number_from_f64(20.0), Some(Number::from(20)));
        assert_eq!(number_from_f64(2.5).and_then(|n| n.as_f64()), Some(2.5));
    }
}
