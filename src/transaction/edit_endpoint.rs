//! Defines the endpoint for replacing a transaction.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde_json::Value;

use crate::{
    Error,
    app_state::TransactionState,
    transaction::{Transaction, TransactionStore, parse_transaction_id, validate_draft},
};

/// A route handler for replacing every user-editable field of a transaction,
/// responds with the updated transaction.
///
/// The body is validated before the ID is looked up, so an invalid body for a
/// missing transaction is reported as a bad request.
pub async fn edit_transaction_endpoint<S>(
    State(state): State<TransactionState<S>>,
    transaction_id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Transaction>, Error>
where
    S: TransactionStore,
{
    let Json(body) = body?;
    let draft = validate_draft(&body)?;
    let Path(transaction_id) = transaction_id?;
    let transaction_id = parse_transaction_id(&transaction_id)?;

    let transaction = state
        .transaction_store
        .update_by_id(transaction_id, draft)?;
    tracing::debug!("Updated transaction {transaction_id}");

    Ok(Json(transaction))
}
