//! Field validation for incoming drafts.
//!
//! Rules never stop at the first failure: each one records its violation and
//! returns `None`, and [`Violations::finish`] turns the collected list into a
//! single [`EngineError::Validation`].

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::{EngineError, FieldError, ResultEngine};

/// Upper bound for names and labels, in characters.
pub(crate) const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Default)]
pub(crate) struct Violations {
    errors: Vec<FieldError>,
}

impl Violations {
    pub(crate) fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub(crate) fn required(&mut self, field: &str) {
        self.add(field, format!("The {field} field is required."));
    }

    /// Reject a reference whose shape was fine but whose target is missing.
    pub(crate) fn unknown_reference(&mut self, field: &str) {
        self.add(field, format!("The selected {field} is invalid."));
    }

    fn not_a_string(&mut self, field: &str) {
        self.add(field, format!("The {field} field must be a string."));
    }

    /// Trimmed, non-empty string of at most [`MAX_NAME_LEN`] characters.
    pub(crate) fn name(&mut self, field: &str, value: Option<&Value>) -> Option<String> {
        let raw = match value {
            None | Some(Value::Null) => {
                self.required(field);
                return None;
            }
            Some(Value::String(raw)) => raw,
            Some(_) => {
                self.not_a_string(field);
                return None;
            }
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.required(field);
            return None;
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            self.add(
                field,
                format!("The {field} field must not be greater than {MAX_NAME_LEN} characters."),
            );
            return None;
        }
        Some(trimmed.to_string())
    }

    /// Like [`Violations::name`], but an absent value is accepted.
    pub(crate) fn optional_name(&mut self, field: &str, value: Option<&Value>) -> Option<String> {
        value.and_then(|v| self.name(field, Some(v)))
    }

    /// Optional free text. Absent stays `None`; `null` or blank text becomes
    /// `Some(None)`.
    pub(crate) fn text(
        &mut self,
        field: &str,
        value: Option<Option<&Value>>,
    ) -> Option<Option<String>> {
        match value? {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(raw)) => Some(normalize_optional_text(Some(raw))),
            Some(_) => {
                self.not_a_string(field);
                None
            }
        }
    }

    /// A positive integer id, given either as a JSON number or a numeric
    /// string.
    pub(crate) fn id(&mut self, field: &str, value: Option<&Value>) -> Option<i32> {
        let value = match value {
            None | Some(Value::Null) => {
                self.required(field);
                return None;
            }
            Some(value) => value,
        };
        let parsed = match value {
            Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        };
        match parsed {
            Some(id) if id > 0 => Some(id),
            _ => {
                self.add(field, format!("The {field} field must be an integer."));
                None
            }
        }
    }

    /// A finite number, given either as a JSON number or a numeric string.
    pub(crate) fn number(&mut self, field: &str, value: Option<&Value>) -> Option<f64> {
        let value = match value {
            None | Some(Value::Null) => {
                self.required(field);
                return None;
            }
            Some(value) => value,
        };
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(n) if n.is_finite() => Some(n),
            _ => {
                self.add(field, format!("The {field} field must be a number."));
                None
            }
        }
    }

    /// A calendar date as `YYYY-MM-DD`; an RFC 3339 timestamp is accepted and
    /// truncated to its date.
    pub(crate) fn date(&mut self, field: &str, value: Option<&Value>) -> Option<NaiveDate> {
        let value = match value {
            None | Some(Value::Null) => {
                self.required(field);
                return None;
            }
            Some(value) => value,
        };
        let parsed = value.as_str().map(str::trim).and_then(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .or_else(|| {
                    DateTime::parse_from_rfc3339(raw)
                        .ok()
                        .map(|dt| dt.date_naive())
                })
        });
        if parsed.is_none() {
            self.add(field, format!("The {field} field must be a valid date."));
        }
        parsed
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn finish(self) -> ResultEngine<()> {
        self.finish_with(Some(()))
    }

    /// Return `value` when nothing was rejected. Rules record a violation
    /// whenever they yield `None`, so a missing `value` with an empty list
    /// only happens on caller bugs and still reports a validation failure.
    pub(crate) fn finish_with<T>(self, value: Option<T>) -> ResultEngine<T> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            _ => Err(EngineError::Validation(self.errors)),
        }
    }
}

/// Trim free text; blank strings are stored as `NULL`.
fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(result: ResultEngine<()>) -> Vec<String> {
        match result {
            Err(EngineError::Validation(errors)) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn name_is_trimmed_and_bounded() {
        let mut v = Violations::default();
        assert_eq!(
            v.name("name", Some(&Value::from("  Salary "))),
            Some("Salary".to_string())
        );
        assert!(v.is_empty());

        assert_eq!(v.name("name", Some(&Value::from("   "))), None);
        let long = Value::from("x".repeat(MAX_NAME_LEN + 1));
        assert_eq!(v.name("title", Some(&long)), None);
        assert_eq!(fields(v.finish()), vec!["name", "title"]);
    }

    #[test]
    fn exactly_max_len_name_is_accepted() {
        let mut v = Violations::default();
        let name = "é".repeat(MAX_NAME_LEN);
        assert_eq!(v.name("name", Some(&Value::from(name.clone()))), Some(name));
        assert!(v.finish().is_ok());
    }

    #[test]
    fn optional_name_skips_absent_values() {
        let mut v = Violations::default();
        assert_eq!(v.optional_name("name", None), None);
        assert!(v.is_empty());
        assert_eq!(v.optional_name("name", Some(&Value::from(""))), None);
        assert_eq!(fields(v.finish()), vec!["name"]);
    }

    #[test]
    fn names_must_be_strings() {
        let mut v = Violations::default();
        assert_eq!(v.name("name", Some(&Value::from(5))), None);
        assert_eq!(v.optional_name("type", Some(&Value::Bool(true))), None);
        match v.finish() {
            Err(EngineError::Validation(errors)) => assert_eq!(
                errors,
                vec![
                    FieldError::new("name", "The name field must be a string."),
                    FieldError::new("type", "The type field must be a string."),
                ]
            ),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        let mut v = Violations::default();
        assert_eq!(v.id("party_id", Some(&Value::from(3))), Some(3));
        assert_eq!(v.id("party_id", Some(&Value::from("7"))), Some(7));
        assert!(v.is_empty());

        assert_eq!(v.id("wallet_id", Some(&Value::from(1.5))), None);
        assert_eq!(v.id("group_id", Some(&Value::from(-1))), None);
        assert_eq!(v.id("user_id", Some(&Value::Null)), None);
        assert_eq!(fields(v.finish()), vec!["wallet_id", "group_id", "user_id"]);
    }

    #[test]
    fn numbers_reject_non_numeric_input() {
        let mut v = Violations::default();
        assert_eq!(v.number("amount", Some(&Value::from(42.5))), Some(42.5));
        assert_eq!(v.number("amount", Some(&Value::from("10"))), Some(10.0));
        assert_eq!(v.number("amount", Some(&Value::from("ten"))), None);
        assert_eq!(v.number("amount", Some(&Value::Bool(true))), None);
        assert_eq!(fields(v.finish()), vec!["amount", "amount"]);
    }

    #[test]
    fn dates_must_be_calendar_dates() {
        let mut v = Violations::default();
        let expected = NaiveDate::from_ymd_opt(2024, 7, 20);
        assert_eq!(v.date("date", Some(&Value::from("2024-07-20"))), expected);
        assert_eq!(
            v.date("date", Some(&Value::from("2024-07-20T10:00:00+02:00"))),
            expected
        );
        assert!(v.is_empty());

        assert_eq!(v.date("date", Some(&Value::from("2024-02-30"))), None);
        assert_eq!(v.date("date", Some(&Value::from(20240720))), None);
        assert_eq!(v.date("date", None), None);
        assert_eq!(fields(v.finish()), vec!["date", "date", "date"]);
    }

    #[test]
    fn blank_text_normalizes_to_none() {
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(normalize_optional_text(Some(" note ")), Some("note".to_string()));
        assert_eq!(normalize_optional_text(None), None);
    }

    #[test]
    fn text_keeps_absent_and_clears_null() {
        let mut v = Violations::default();
        assert_eq!(v.text("description", None), None);
        assert_eq!(v.text("description", Some(None)), Some(None));
        assert_eq!(v.text("description", Some(Some(&Value::Null))), Some(None));
        assert_eq!(
            v.text("description", Some(Some(&Value::from(" rent ")))),
            Some(Some("rent".to_string()))
        );
        assert!(v.is_empty());

        assert_eq!(v.text("description", Some(Some(&Value::from(5)))), None);
        assert_eq!(fields(v.finish()), vec!["description"]);
    }
}
