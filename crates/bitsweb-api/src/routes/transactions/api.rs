//! Transactions API endpoints - JSON API

use crate::{ApiError, AppState};
use axum::extract::State;
use axum::Json;
use bitsweb_core::{filter_transactions, DateRange, Owner, TransactionRecord, TransactionSummary};
use serde::Serialize;

/// Transactions for the current filters
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub range: DateRange,
    pub owner: Owner,
    pub summary: TransactionSummary,
    pub transactions: Vec<TransactionRecord>,
}

/// Fetch the current window from the backend and apply the owner filter
pub(crate) async fn load_transactions(state: &AppState) -> Result<TransactionsResponse, ApiError> {
    let range = state.context.date_range.snapshot();
    let owner = state.context.owner.get();
    let basic_auth = state.context.credential.basic_auth();

    let fetched = state.backend.fetch_transactions(&range, &basic_auth).await?;
    let transactions = filter_transactions(fetched, &range, owner);
    let summary = TransactionSummary::from_transactions(transactions.iter().map(TransactionRecord::transaction));

    Ok(TransactionsResponse {
        range,
        owner,
        summary,
        transactions,
    })
}

/// Get transactions and totals (JSON API)
pub async fn api_transactions(State(state): State<AppState>) -> Result<Json<TransactionsResponse>, ApiError> {
    let response = load_transactions(&state).await?;
    Ok(Json(response))
}
