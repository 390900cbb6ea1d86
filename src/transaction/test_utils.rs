//! Helpers shared by the transaction tests.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::Date;

use crate::{Error, initialize_db};

use super::{
    Transaction, TransactionDraft, TransactionFilter, TransactionId, TransactionStore,
    TransactionType, sqlite::SQLiteTransactionStore,
};

/// Create a store backed by a fresh in-memory SQLite database.
#[track_caller]
pub fn must_create_test_store() -> SQLiteTransactionStore {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    initialize_db(&connection).expect("could not initialize test DB");

    SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
}

/// An income draft dated midnight UTC on `date`.
pub fn income(amount: f64, description: &str, category: &str, date: Date) -> TransactionDraft {
    Transaction::build(
        TransactionType::Income,
        amount,
        description,
        category,
        date.midnight().assume_utc(),
    )
}

/// An expense draft dated midnight UTC on `date`.
pub fn expense(amount: f64, description: &str, category: &str, date: Date) -> TransactionDraft {
    Transaction::build(
        TransactionType::Expense,
        amount,
        description,
        category,
        date.midnight().assume_utc(),
    )
}

/// A store whose storage is always unavailable.
#[derive(Debug, Clone)]
pub struct FailingTransactionStore;

impl FailingTransactionStore {
    fn fail<T>() -> Result<T, Error> {
        Err(Error::SqlError(rusqlite::Error::InvalidQuery))
    }
}

impl TransactionStore for FailingTransactionStore {
    fn insert(&self, _: TransactionDraft) -> Result<Transaction, Error> {
        Self::fail()
    }

    fn find_many(&self, _: TransactionFilter) -> Result<Vec<Transaction>, Error> {
        Self::fail()
    }

    fn find_by_id(&self, _: TransactionId) -> Result<Transaction, Error> {
        Self::fail()
    }

    fn update_by_id(&self, _: TransactionId, _: TransactionDraft) -> Result<Transaction, Error> {
        Self::fail()
    }

    fn delete_by_id(&self, _: TransactionId) -> Result<(), Error> {
        Self::fail()
    }

    fn sum_by_type(&self, _: TransactionType) -> Result<f64, Error> {
        Self::fail()
    }
}
