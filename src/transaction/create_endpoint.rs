//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    Error,
    app_state::TransactionState,
    transaction::{Transaction, TransactionStore, validate_draft},
};

/// A route handler for creating a new transaction, responds with the stored
/// transaction and the status code 201 Created.
pub async fn create_transaction_endpoint<S>(
    State(state): State<TransactionState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    S: TransactionStore,
{
    let Json(body) = body?;
    let draft = validate_draft(&body)?;

    let transaction = state.transaction_store.insert(draft)?;
    tracing::debug!("Created transaction {}", transaction.id);

    Ok((StatusCode::CREATED, Json(transaction)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use time::macros::datetime;

    use crate::{
        endpoints,
        test_utils::{must_create_failing_test_server, must_create_test_server},
        transaction::{Transaction, TransactionType},
    };

    #[tokio::test]
    async fn can_create_transaction() {
        let server = must_create_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "type": "income",
                "amount": 1000,
                "description": "Salary",
                "category": "Job",
                "date": "2024-01-01",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let transaction = response.json::<Transaction>();
        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.transaction_type, TransactionType::Income);
        assert_eq!(transaction.amount, 1000.0);
        assert_eq!(transaction.description, "Salary");
        assert_eq!(transaction.category, "Job");
        assert_eq!(transaction.date, datetime!(2024-01-01 00:00 UTC));
    }

    #[tokio::test]
    async fn created_transaction_can_be_fetched() {
        let server = must_create_test_server();
        let created = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "type": "expense",
                "amount": 250.50,
                "description": "Groceries",
                "category": "Food",
                "date": "2024-01-02T08:15:00.000Z",
            }))
            .await
            .json::<Transaction>();

        let fetched = server
            .get(&endpoints::format_endpoint(endpoints::TRANSACTION, created.id))
            .await
            .json::<Transaction>();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn negative_amount_is_rejected_and_not_stored() {
        let server = must_create_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "type": "expense",
                "amount": -5,
                "description": "Oops",
                "category": "Misc",
                "date": "2024-01-01",
            }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(
            body["error"]["fieldErrors"]["amount"],
            json!(["Number must be greater than or equal to 0"])
        );
        let stored = server
            .get(endpoints::TRANSACTIONS)
            .await
            .json::<Vec<Transaction>>();
        assert!(stored.is_empty(), "want no transactions, got {stored:?}");
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let server = must_create_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .text("{\"type\": ")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn store_failure_is_an_internal_server_error() {
        let server = must_create_failing_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "type": "income",
                "amount": 1,
                "description": "a",
                "category": "b",
                "date": "2024-01-01",
            }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "Internal Server Error" }));
    }
}
