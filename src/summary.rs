//! Income, expense and balance totals across all transactions.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    app_state::SummaryState,
    transaction::{TransactionStore, TransactionType},
};

/// Totals computed from every stored transaction.
///
/// The summary is never stored, it is recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of all income.
    pub income: f64,
    /// The sum of all expenses.
    pub expense: f64,
    /// Income minus expenses.
    pub balance: f64,
}

impl Summary {
    /// Create a summary from the income and expense totals.
    pub fn new(income: f64, expense: f64) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// Compute the summary of all transactions in `store`.
///
/// # Errors
/// Returns an error if either total cannot be read from the store.
pub fn get_summary<S>(store: &S) -> Result<Summary, Error>
where
    S: TransactionStore,
{
    let income = store.sum_by_type(TransactionType::Income)?;
    let expense = store.sum_by_type(TransactionType::Expense)?;

    Ok(Summary::new(income, expense))
}

/// A route handler for the income, expense and balance totals.
pub async fn get_summary_endpoint<S>(
    State(state): State<SummaryState<S>>,
) -> Result<Json<Summary>, Error>
where
    S: TransactionStore,
{
    get_summary(&state.transaction_store).map(Json)
}
