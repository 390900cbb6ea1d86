//! Defines the endpoint for listing and filtering transactions.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{
    Error,
    app_state::TransactionState,
    transaction::{RawTransactionQuery, Transaction, TransactionStore, validate_query},
};

/// A route handler for listing the transactions that match the query string,
/// newest first.
///
/// Supported query parameters are `type`, `category`, `startDate` and `endDate`.
pub async fn list_transactions_endpoint<S>(
    State(state): State<TransactionState<S>>,
    query: Result<Query<RawTransactionQuery>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    S: TransactionStore,
{
    let Query(query) = query?;
    let filter = validate_query(query)?;

    let transactions = state.transaction_store.find_many(filter)?;

    Ok(Json(transactions))
}
