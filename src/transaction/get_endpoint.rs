//! Defines the endpoint for fetching a single transaction.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    Error,
    app_state::TransactionState,
    transaction::{Transaction, TransactionStore, parse_transaction_id},
};

/// A route handler for getting a transaction by its database ID.
///
/// This function will return the status code 404 if the requested resource
/// does not exist or if the ID is not a valid transaction ID.
pub async fn get_transaction_endpoint<S>(
    State(state): State<TransactionState<S>>,
    transaction_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Transaction>, Error>
where
    S: TransactionStore,
{
    let Path(transaction_id) = transaction_id?;
    let transaction_id = parse_transaction_id(&transaction_id)?;

    state
        .transaction_store
        .find_by_id(transaction_id)
        .map(Json)
}
