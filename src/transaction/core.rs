//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, e.g. a salary payment.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The name used for the type on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// A string that is neither "income" nor "expense" was used as a transaction type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a transaction type, expected \"income\" or \"expense\"")]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(UnknownTransactionType(other.to_owned())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, build a [TransactionDraft] with
/// [Transaction::build] and insert it into a
/// [TransactionStore](crate::TransactionStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction, assigned by the store.
    #[serde(rename = "_id")]
    pub id: TransactionId,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned, never negative.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// A free-form category, e.g. "Food" or "Job".
    pub category: String,
    /// When the transaction happened.
    #[serde(with = "crate::transaction::date_time")]
    pub date: OffsetDateTime,
    /// When the transaction was first stored.
    #[serde(with = "crate::transaction::date_time")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last replaced.
    #[serde(with = "crate::transaction::date_time")]
    pub updated_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction draft.
    ///
    /// Shortcut for [TransactionDraft] for discoverability.
    pub fn build(
        transaction_type: TransactionType,
        amount: f64,
        description: &str,
        category: &str,
        date: OffsetDateTime,
    ) -> TransactionDraft {
        TransactionDraft {
            transaction_type,
            amount,
            description: description.to_owned(),
            category: category.to_owned(),
            date,
        }
    }

    /// The user-editable fields of the transaction.
    pub fn draft(&self) -> TransactionDraft {
        TransactionDraft {
            transaction_type: self.transaction_type,
            amount: self.amount,
            description: self.description.clone(),
            category: self.category.clone(),
            date: self.date,
        }
    }
}

/// A validated transaction that has not been stored yet.
///
/// Drafts are produced by [validate_draft](crate::transaction::validate_draft)
/// from request bodies and hold every field a client may set. Updating a
/// transaction replaces all of these fields at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned, never negative.
    pub amount: f64,
    /// Trimmed, non-empty description.
    pub description: String,
    /// Trimmed, non-empty category.
    pub category: String,
    /// When the transaction happened, in UTC with millisecond precision.
    #[serde(with = "crate::transaction::date_time")]
    pub date: OffsetDateTime,
}

/// Parse a transaction ID from a URL path segment.
///
/// A segment that is not an integer cannot name a stored transaction, so it
/// is reported the same way as an ID that does not exist.
///
/// # Errors
/// Returns [Error::NotFound] if `segment` is not a valid ID.
pub fn parse_transaction_id(segment: &str) -> Result<TransactionId, Error> {
    segment.parse().map_err(|error| {
        tracing::debug!("Could not parse transaction ID \"{segment}\": {error}");
        Error::NotFound
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use crate::Error;

    use super::{Transaction, TransactionType, UnknownTransactionType, parse_transaction_id};

    #[test]
    fn transaction_type_round_trips_through_str() {
        for transaction_type in [TransactionType::Income, TransactionType::Expense] {
            assert_eq!(transaction_type.as_str().parse(), Ok(transaction_type));
        }
    }

    #[test]
    fn unknown_transaction_type_is_rejected() {
        assert_eq!(
            "transfer".parse::<TransactionType>(),
            Err(UnknownTransactionType("transfer".to_owned()))
        );
        assert!("Income".parse::<TransactionType>().is_err());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let transaction = Transaction {
            id: 7,
            transaction_type: TransactionType::Expense,
            amount: 250.5,
            description: "Groceries".to_owned(),
            category: "Food".to_owned(),
            date: datetime!(2024-01-02 00:00 UTC),
            created_at: datetime!(2024-01-03 10:00 UTC),
            updated_at: datetime!(2024-01-04 11:30:00.250 UTC),
        };

        let got = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            got,
            json!({
                "_id": 7,
                "type": "expense",
                "amount": 250.5,
                "description": "Groceries",
                "category": "Food",
                "date": "2024-01-02T00:00:00.000Z",
                "createdAt": "2024-01-03T10:00:00.000Z",
                "updatedAt": "2024-01-04T11:30:00.250Z",
            })
        );
        assert_eq!(
            serde_json::from_value::<Transaction>(got).unwrap(),
            transaction
        );
    }

    #[test]
    fn parses_integer_ids() {
        assert_eq!(parse_transaction_id("42"), Ok(42));
    }

    #[test]
    fn malformed_id_is_not_found() {
        assert_eq!(
            parse_transaction_id("65a1b2c3d4e5f6a7b8c9d0e1"),
            Err(Error::NotFound)
        );
        assert_eq!(parse_transaction_id("1.5"), Err(Error::NotFound));
    }
}
