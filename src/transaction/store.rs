//! Defines the transaction store trait.

use time::OffsetDateTime;

use crate::Error;

use super::core::{Transaction, TransactionDraft, TransactionId, TransactionType};

/// Handles the persistence of transactions.
///
/// Handlers only ever talk to the store through this trait, so tests can swap
/// in a different implementation. Each method is a single operation against
/// the backing storage; no locking or retrying is layered on top.
pub trait TransactionStore: Clone + Send + Sync + 'static {
    /// Store a new transaction, assigning its ID and timestamps.
    fn insert(&self, draft: TransactionDraft) -> Result<Transaction, Error>;

    /// Retrieve the transactions matching every condition in `filter`.
    ///
    /// Implementers must order the result by date, newest first, breaking ties
    /// by creation time, newest first. An empty result is not an error.
    fn find_many(&self, filter: TransactionFilter) -> Result<Vec<Transaction>, Error>;

    /// Retrieve a transaction by its ID.
    ///
    /// # Errors
    /// Implementers must return [Error::NotFound] if there is no transaction with `id`.
    fn find_by_id(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Replace every user-editable field of a transaction.
    ///
    /// The ID and creation time are kept, the update time is refreshed.
    ///
    /// # Errors
    /// Implementers must return [Error::NotFound] if there is no transaction with `id`.
    fn update_by_id(&self, id: TransactionId, draft: TransactionDraft)
    -> Result<Transaction, Error>;

    /// Remove a transaction.
    ///
    /// # Errors
    /// Implementers must return [Error::NotFound] if there is no transaction with `id`.
    fn delete_by_id(&self, id: TransactionId) -> Result<(), Error>;

    /// The sum of the amounts of every transaction of type `transaction_type`,
    /// or zero if there are none.
    fn sum_by_type(&self, transaction_type: TransactionType) -> Result<f64, Error>;
}

/// Defines which transactions [TransactionStore::find_many] returns.
///
/// Conditions that are `None` are ignored, the rest must all hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Only include transactions of this type.
    pub transaction_type: Option<TransactionType>,
    /// Only include transactions whose category is exactly this string.
    pub category: Option<String>,
    /// Only include transactions dated on or after this instant.
    pub start_date: Option<OffsetDateTime>,
    /// Only include transactions dated on or before this instant.
    pub end_date: Option<OffsetDateTime>,
}
