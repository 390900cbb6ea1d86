//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{
    Connection, Row, params, params_from_iter,
    types::{Type, Value},
};
use time::OffsetDateTime;

use crate::Error;

use super::{
    core::{Transaction, TransactionDraft, TransactionId, TransactionType},
    date_time::{from_unix_millis, normalize, to_unix_millis},
    store::{TransactionFilter, TransactionStore},
};

/// Stores transactions in a SQLite database.
///
/// The table must exist before the store is used, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("Could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is some SQL error.
    fn insert(&self, draft: TransactionDraft) -> Result<Transaction, Error> {
        let now = to_unix_millis(normalize(OffsetDateTime::now_utc()));
        let connection = self.lock()?;

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" \
                    (transaction_type, amount, description, category, date, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) \
                 RETURNING id, transaction_type, amount, description, category, date, created_at, updated_at",
            )?
            .query_row(
                params![
                    draft.transaction_type.as_str(),
                    draft.amount,
                    draft.description,
                    draft.category,
                    to_unix_millis(draft.date),
                    now,
                ],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Query for transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn find_many(&self, filter: TransactionFilter) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts = vec![
            "SELECT id, transaction_type, amount, description, category, date, created_at, updated_at \
            FROM \"transaction\""
                .to_owned(),
        ];
        let mut where_clause_parts = vec![];
        let mut query_parameters = vec![];

        if let Some(transaction_type) = filter.transaction_type {
            query_parameters.push(Value::Text(transaction_type.as_str().to_owned()));
            where_clause_parts.push(format!("transaction_type = ?{}", query_parameters.len()));
        }

        if let Some(category) = filter.category {
            query_parameters.push(Value::Text(category));
            where_clause_parts.push(format!("category = ?{}", query_parameters.len()));
        }

        if let Some(start_date) = filter.start_date {
            query_parameters.push(Value::Integer(to_unix_millis(start_date)));
            where_clause_parts.push(format!("date >= ?{}", query_parameters.len()));
        }

        if let Some(end_date) = filter.end_date {
            query_parameters.push(Value::Integer(to_unix_millis(end_date)));
            where_clause_parts.push(format!("date <= ?{}", query_parameters.len()));
        }

        if !where_clause_parts.is_empty() {
            query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        }

        // Sort by ID last to keep the order stable for transactions created in the same millisecond.
        query_string_parts.push("ORDER BY date DESC, created_at DESC, id DESC".to_owned());

        let query_string = query_string_parts.join(" ");
        let connection = self.lock()?;
        let mut statement = connection.prepare(&query_string)?;

        let transactions = statement
            .query_map(params_from_iter(query_parameters.iter()), map_transaction_row)?
            .map(|transaction_result| transaction_result.map_err(Error::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn find_by_id(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(
                "SELECT id, transaction_type, amount, description, category, date, created_at, updated_at \
                FROM \"transaction\" WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    /// Replace the fields of the transaction `id` with those in `draft`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn update_by_id(
        &self,
        id: TransactionId,
        draft: TransactionDraft,
    ) -> Result<Transaction, Error> {
        let now = to_unix_millis(normalize(OffsetDateTime::now_utc()));
        let connection = self.lock()?;

        let transaction = connection
            .prepare(
                "UPDATE \"transaction\" \
                SET \
                    transaction_type = ?1, \
                    amount = ?2, \
                    description = ?3, \
                    category = ?4, \
                    date = ?5, \
                    updated_at = ?6 \
                WHERE id = ?7 \
                RETURNING id, transaction_type, amount, description, category, date, created_at, updated_at",
            )?
            .query_row(
                params![
                    draft.transaction_type.as_str(),
                    draft.amount,
                    draft.description,
                    draft.category,
                    to_unix_millis(draft.date),
                    now,
                    id,
                ],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Delete the transaction `id` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn delete_by_id(&self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

        match rows_affected {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }

    /// Sum the amounts of all transactions of `transaction_type`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn sum_by_type(&self, transaction_type: TransactionType) -> Result<f64, Error> {
        let total = self.lock()?.query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM \"transaction\" WHERE transaction_type = ?1",
            [transaction_type.as_str()],
            |row| row.get(0),
        )?;

        Ok(total)
    }
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                transaction_type TEXT NOT NULL CHECK (transaction_type IN ('income', 'expense')),
                amount REAL NOT NULL CHECK (amount >= 0),
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                date INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
                )",
        (),
    )?;

    // Matches the sort order used when listing transactions.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_created_at \
        ON \"transaction\"(date DESC, created_at DESC);",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_type ON \"transaction\"(transaction_type);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns id, transaction_type, amount, description, category,
/// date, created_at and updated_at in that order.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let transaction_type = row
        .get::<usize, String>(1)?
        .parse::<TransactionType>()
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(error)))?;
    let amount = row.get(2)?;
    let description = row.get(3)?;
    let category = row.get(4)?;
    let date = get_date_time(row, 5)?;
    let created_at = get_date_time(row, 6)?;
    let updated_at = get_date_time(row, 7)?;

    Ok(Transaction {
        id,
        transaction_type,
        amount,
        description,
        category,
        date,
        created_at,
        updated_at,
    })
}

fn get_date_time(row: &Row, index: usize) -> Result<OffsetDateTime, rusqlite::Error> {
    let millis = row.get(index)?;

    from_unix_millis(millis).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Integer, Box::new(error))
    })
}
