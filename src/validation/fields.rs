//! List-driven field validators that collect human readable messages.

use serde_json::{Map, Number, Value};

use super::coerce::{Coerced, number_from_f64, trim_string};

/// True iff `value` is a string whose trimmed length is non-zero.
pub fn is_non_empty_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(text)) if !text.trim().is_empty())
}

/// Copy the listed fields out of `body`, trimming the strings among them.
pub fn trimmed_fields(body: &Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|field| {
            body.get(*field)
                .map(|value| ((*field).to_owned(), trim_string(value)))
        })
        .collect()
}

/// Read a sanitized text field; empty strings and non-strings yield `None`.
pub fn text(data: &Map<String, Value>, field: &str) -> Option<String> {
    match data.get(field) {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

/// Read a sanitized field as sent; only `null` is dropped.
pub fn passthrough(data: &Map<String, Value>, field: &str) -> Option<Value> {
    data.get(field).filter(|value| !value.is_null()).cloned()
}

/// Coerced values for a fixed list of fields, kept in list order.
#[derive(Debug, Clone)]
pub struct CoercedFields<T> {
    entries: Vec<(&'static str, Coerced<T>)>,
}

impl<T: Copy> CoercedFields<T> {
    /// Apply `coerce` to every listed field of `body`.
    pub fn coerce(
        body: &Map<String, Value>,
        fields: &[&'static str],
        coerce: impl Fn(Option<&Value>) -> Coerced<T>,
    ) -> Self {
        let entries = fields
            .iter()
            .map(|field| (*field, coerce(body.get(*field))))
            .collect();
        Self { entries }
    }

    /// Coerced state of `field`; unknown fields are treated as absent.
    pub fn get(&self, field: &str) -> Coerced<T> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, coerced)| *coerced)
            .unwrap_or(Coerced::Absent)
    }

    /// Usable value of `field`, if any.
    pub fn value(&self, field: &str) -> Option<T> {
        self.get(field).value()
    }
}

impl CoercedFields<f64> {
    /// Usable value of `field` as a JSON number.
    pub fn number(&self, field: &str) -> Option<Number> {
        self.value(field).and_then(number_from_f64)
    }
}

/// Append an error for every listed field that is not a non-empty string.
pub fn validate_required_strings(
    data: &Map<String, Value>,
    fields: &[&str],
    errors: &mut Vec<String>,
) {
    for field in fields {
        if !is_non_empty_string(data.get(*field)) {
            errors.push(format!("{field} is required and must be a non-empty string"));
        }
    }
}

/// Append an error for every listed field whose number was supplied but malformed.
pub fn validate_numeric_fields(
    numbers: &CoercedFields<f64>,
    fields: &[&str],
    errors: &mut Vec<String>,
) {
    for field in fields {
        if numbers.get(field).is_invalid() {
            errors.push(format!("{field} must be a valid number"));
        }
    }
}

/// Append an error for every listed field whose boolean was supplied but malformed.
pub fn validate_boolean_fields(
    flags: &CoercedFields<bool>,
    fields: &[&str],
    errors: &mut Vec<String>,
) {
    for field in fields {
        if flags.get(field).is_invalid() {
            errors.push(format!("{field} must be a boolean (true/false)"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::coerce::{to_boolean, to_number};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn non_empty_string_rejects_blank_and_non_strings() {
        assert!(is_non_empty_string(Some(&json!("AL"))));
        assert!(!is_non_empty_string(Some(&json!("   "))));
        assert!(!is_non_empty_string(Some(&json!(5))));
        assert!(!is_non_empty_string(None));
    }

    #[test]
    fn required_strings_report_each_missing_field() {
        let data = object(json!({"city": "Boston", "league": "  "}));
        let mut errors = Vec::new();
        validate_required_strings(&data, &["teamName", "city", "league"], &mut errors);
        assert_eq!(
            errors,
            vec![
                "teamName is required and must be a non-empty string",
                "league is required and must be a non-empty string",
            ]
        );
    }

    #[test]
    fn numeric_check_ignores_absent_values() {
        let body = object(json!({"wins": "20", "losses": "", "era": "low"}));
        let numbers = CoercedFields::coerce(&body, &["wins", "losses", "era", "war"], to_number);
        let mut errors = Vec::new();
        validate_numeric_fields(&numbers, &["wins", "losses", "era", "war"], &mut errors);
        assert_eq!(errors, vec!["era must be a valid number"]);
        assert_eq!(numbers.number("wins"), Some(Number::from(20)));
        assert_eq!(numbers.number("losses"), None);
    }

    #[test]
    fn boolean_check_flags_only_invalid_values() {
        let body = object(json!({"hallOfFame": "TRUE", "rookieOfTheYear": "maybe"}));
        let fields = ["hallOfFame", "rookieOfTheYear"];
        let flags = CoercedFields::coerce(&body, &fields, to_boolean);
        let mut errors = Vec::new();
        validate_boolean_fields(&flags, &fields, &mut errors);
        assert_eq!(errors, vec!["rookieOfTheYear must be a boolean (true/false)"]);
        assert_eq!(flags.value("hallOfFame"), Some(true));
    }

    #[test]
    fn trimmed_fields_keep_only_listed_keys() {
        let body = object(json!({"nickname": "  Sox ", "extra": "x", "state": 3}));
        let data = trimmed_fields(&body, &["nickname", "state", "owner"]);
        assert_eq!(data.get("nickname"), Some(&json!("Sox")));
        assert_eq!(data.get("state"), Some(&json!(3)));
        assert!(!data.contains_key("extra"));
        assert!(!data.contains_key("owner"));
    }

    #[test]
    fn passthrough_keeps_any_type_but_null() {
        let data = trimmed_fields(
            &object(json!({"nickname": 7, "owner": null, "mascot": " Wally ", "state": ""})),
            &["nickname", "owner", "mascot", "state"],
        );
        assert_eq!(passthrough(&data, "nickname"), Some(json!(7)));
        assert_eq!(passthrough(&data, "owner"), None);
        assert_eq!(passthrough(&data, "mascot"), Some(json!("Wally")));
        assert_eq!(passthrough(&data, "state"), Some(json!("")));
        assert_eq!(passthrough(&data, "website"), None);
    }
}
