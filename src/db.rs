/*! Opening and initializing the application's SQLite database. */

use rusqlite::Connection;

use crate::{Error, transaction::create_transaction_table};

/// The database URL used to open an in-memory database.
pub const IN_MEMORY_DATABASE_URL: &str = ":memory:";

/// Open the database at `database_url`.
///
/// `database_url` is either [IN_MEMORY_DATABASE_URL] or a path to a SQLite
/// database file, optionally prefixed with `sqlite://` or `sqlite:`. The file
/// is created if it does not exist.
///
/// # Errors
/// Returns an [Error::SqlError] if the database cannot be opened.
pub fn open_connection(database_url: &str) -> Result<Connection, Error> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);

    let connection = if path == IN_MEMORY_DATABASE_URL {
        Connection::open_in_memory()?
    } else {
        Connection::open(path)?
    };

    Ok(connection)
}

/// Create the tables for the domain models if they do not already exist.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_transaction_table(connection)?;

    Ok(())
}
