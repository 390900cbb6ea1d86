use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use serde_json::{Value, json};

use crate::{
    Error,
    app_state::TransactionState,
    transaction::{TransactionStore, parse_transaction_id},
};

/// A route handler for deleting a transaction, responds with `{"ok": true}`.
pub async fn delete_transaction_endpoint<S>(
    State(state): State<TransactionState<S>>,
    transaction_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, Error>
where
    S: TransactionStore,
{
    let Path(transaction_id) = transaction_id?;
    let transaction_id = parse_transaction_id(&transaction_id)?;

    state.transaction_store.delete_by_id(transaction_id)?;
    tracing::debug!("Deleted transaction {transaction_id}");

    Ok(Json(json!({ "ok": true })))
}
