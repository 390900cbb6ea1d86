//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    transaction::{SQLiteTransactionStore, TransactionStore},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S>
where
    S: TransactionStore,
{
    /// The store for managing [transactions](crate::Transaction).
    pub transaction_store: S,
}

impl<S> AppState<S>
where
    S: TransactionStore,
{
    /// Create a new [AppState] around an already initialized store.
    pub fn new(transaction_store: S) -> Self {
        Self { transaction_store }
    }
}

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLiteAppState = AppState<SQLiteTransactionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(db_connection: Connection) -> Result<SQLiteAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(SQLiteTransactionStore::new(connection)))
}

/// The state needed to create, read, update or delete transactions.
#[derive(Debug, Clone)]
pub struct TransactionState<S>
where
    S: TransactionStore,
{
    /// The store for managing [transactions](crate::Transaction).
    pub transaction_store: S,
}

impl<S> FromRef<AppState<S>> for TransactionState<S>
where
    S: TransactionStore,
{
    fn from_ref(state: &AppState<S>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The state needed for computing the summary.
pub type SummaryState<S> = TransactionState<S>;
