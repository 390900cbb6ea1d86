//! Turns untyped request input into drafts and filters.
//!
//! Validation never stops at the first problem: every field is checked and
//! all of the messages are collected into a single [ValidationError].

use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use super::{
    core::{TransactionDraft, TransactionType},
    date_time::{from_unix_millis, normalize, parse_date_time},
    store::TransactionFilter,
};

/// The maximum number of characters in a transaction description.
pub const DESCRIPTION_MAX_LENGTH: usize = 500;
/// The maximum number of characters in a transaction category.
pub const CATEGORY_MAX_LENGTH: usize = 100;

const REQUIRED: &str = "Required";
const INVALID_TYPE: &str = "Invalid enum value. Expected 'income' | 'expense'";

/// Every problem found while validating a request.
///
/// Serializes as `{"formErrors": [...], "fieldErrors": {"amount": [...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Problems with the input as a whole, e.g. a body that is not an object.
    pub form_errors: Vec<String>,
    /// Problems with individual fields, keyed by the field's wire name.
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    /// Whether no problems have been recorded.
    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// Record a problem with the input as a whole.
    pub fn add_form_error(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    /// Record a problem with the field `field`.
    pub fn add_field_error(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// The messages recorded for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.field_errors.get(field).map(Vec::as_slice)
    }

    fn record<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        result
            .map_err(|message| self.add_field_error(field, message))
            .ok()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut problems = self.form_errors.clone();
        problems.extend(
            self.field_errors
                .iter()
                .map(|(field, messages)| format!("{field}: {}", messages.join(", "))),
        );

        write!(f, "{}", problems.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// The query string accepted when listing transactions, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransactionQuery {
    /// Only include transactions of this type.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Only include transactions in exactly this category.
    pub category: Option<String>,
    /// Only include transactions on or after this date-time.
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    /// Only include transactions on or before this date-time.
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

/// Validate a create or update request body.
///
/// `type`, `amount`, `description`, `category` and `date` are required, any
/// other fields are ignored. Text fields are trimmed before their length is
/// checked. `date` may be a date-time string accepted by
/// [parse_date_time] or a number of milliseconds since the Unix epoch.
///
/// # Errors
/// Returns a [ValidationError] listing every invalid or missing field.
pub fn validate_draft(body: &Value) -> Result<TransactionDraft, ValidationError> {
    let mut errors = ValidationError::default();

    let Some(fields) = body.as_object() else {
        errors.add_form_error(format!("Expected object, received {}", json_type(body)));
        return Err(errors);
    };

    let transaction_type = errors.record("type", parse_transaction_type(field(fields, "type")));
    let amount = errors.record("amount", parse_amount(field(fields, "amount")));
    let description = errors.record(
        "description",
        parse_text(field(fields, "description"), DESCRIPTION_MAX_LENGTH),
    );
    let category = errors.record(
        "category",
        parse_text(field(fields, "category"), CATEGORY_MAX_LENGTH),
    );
    let date = errors.record("date", parse_date(field(fields, "date")));

    match (transaction_type, amount, description, category, date) {
        (Some(transaction_type), Some(amount), Some(description), Some(category), Some(date)) => {
            Ok(TransactionDraft {
                transaction_type,
                amount,
                description,
                category,
                date,
            })
        }
        _ => Err(errors),
    }
}

/// Validate the query string for listing transactions.
///
/// Every field is optional and an empty `category` is treated as absent. No
/// check is made that `startDate` comes before `endDate`; a reversed range
/// simply matches nothing.
///
/// # Errors
/// Returns a [ValidationError] if `type` is not a transaction type or either
/// date is not a valid date-time.
pub fn validate_query(query: RawTransactionQuery) -> Result<TransactionFilter, ValidationError> {
    let mut errors = ValidationError::default();

    let transaction_type = match query.transaction_type {
        Some(text) => errors
            .record(
                "type",
                text.parse::<TransactionType>()
                    .map_err(|_| format!("{INVALID_TYPE}, received '{text}'")),
            )
            .map(Some),
        None => Some(None),
    };
    let start_date = errors.record("startDate", parse_optional_date_time(query.start_date));
    let end_date = errors.record("endDate", parse_optional_date_time(query.end_date));

    match (transaction_type, start_date, end_date) {
        (Some(transaction_type), Some(start_date), Some(end_date)) => Ok(TransactionFilter {
            transaction_type,
            category: query.category.filter(|category| !category.is_empty()),
            start_date,
            end_date,
        }),
        _ => Err(errors),
    }
}

/// Get a field, treating an explicit `null` the same as a missing field.
fn field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields.get(name).filter(|value| !value.is_null())
}

fn parse_transaction_type(value: Option<&Value>) -> Result<TransactionType, String> {
    match value {
        None => Err(REQUIRED.to_owned()),
        Some(Value::String(text)) => text
            .parse()
            .map_err(|_| format!("{INVALID_TYPE}, received '{text}'")),
        Some(other) => Err(format!(
            "Expected 'income' | 'expense', received {}",
            json_type(other)
        )),
    }
}

fn parse_amount(value: Option<&Value>) -> Result<f64, String> {
    match value {
        None => Err(REQUIRED.to_owned()),
        Some(Value::Number(number)) => match number.as_f64() {
            Some(amount) if !amount.is_finite() => Err("Number must be finite".to_owned()),
            Some(amount) if amount < 0.0 => {
                Err("Number must be greater than or equal to 0".to_owned())
            }
            Some(amount) => Ok(amount),
            None => Err("Number must be finite".to_owned()),
        },
        Some(other) => Err(format!("Expected number, received {}", json_type(other))),
    }
}

fn parse_text(value: Option<&Value>, max_length: usize) -> Result<String, String> {
    match value {
        None => Err(REQUIRED.to_owned()),
        Some(Value::String(text)) => {
            let text = text.trim();
            let length = text.chars().count();

            if length == 0 {
                Err("String must contain at least 1 character(s)".to_owned())
            } else if length > max_length {
                Err(format!(
                    "String must contain at most {max_length} character(s)"
                ))
            } else {
                Ok(text.to_owned())
            }
        }
        Some(other) => Err(format!("Expected string, received {}", json_type(other))),
    }
}

fn parse_date(value: Option<&Value>) -> Result<OffsetDateTime, String> {
    let invalid = || "Invalid date".to_owned();

    match value {
        None => Err(REQUIRED.to_owned()),
        Some(Value::String(text)) => parse_date_time(text).ok_or_else(invalid),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|millis| millis.is_finite())
                    .map(|millis| millis.trunc() as i64)
            })
            .and_then(|millis| from_unix_millis(millis).ok())
            .map(normalize)
            .ok_or_else(invalid),
        Some(other) => Err(format!("Expected date, received {}", json_type(other))),
    }
}

fn parse_optional_date_time(text: Option<String>) -> Result<Option<OffsetDateTime>, String> {
    match text {
        None => Ok(None),
        Some(text) => parse_date_time(&text)
            .map(Some)
            .ok_or_else(|| "Invalid datetime".to_owned()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
