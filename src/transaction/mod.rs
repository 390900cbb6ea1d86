//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionDraft` for creating and replacing transactions
//! - Validation of request bodies and query strings
//! - The `TransactionStore` trait and its SQLite implementation
//! - The route handlers for the transaction endpoints

mod core;
mod create_endpoint;
pub(crate) mod date_time;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;
mod list_endpoint;
mod sqlite;
mod store;
mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use self::core::{
    Transaction, TransactionDraft, TransactionId, TransactionType, UnknownTransactionType,
    parse_transaction_id,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use sqlite::{SQLiteTransactionStore, create_transaction_table};
pub use store::{TransactionFilter, TransactionStore};
pub use validation::{
    CATEGORY_MAX_LENGTH, DESCRIPTION_MAX_LENGTH, RawTransactionQuery, ValidationError,
    validate_draft, validate_query,
};
