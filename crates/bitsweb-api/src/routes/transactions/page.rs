//! Transaction page rendering - HTML and HTMX fragments

use super::api::load_transactions;
use crate::{page_response, ApiError, AppState};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use bitsweb_core::{format_currency, format_date, format_number, GasTransaction, TransactionRecord, TransactionSummary};
use bitsweb_utils::escape_html;

fn backend_error_html(err: &ApiError) -> String {
    let message = match err {
        ApiError::Unauthorized => "The backend rejected your credentials. Log out and sign in again.".to_string(),
        other => other.to_string(),
    };
    format!(
        "<div class='p-4 bg-red-50 text-red-700 rounded-lg'>Could not load transactions: {}</div>",
        escape_html(&message)
    )
}

fn fuel_metrics(gas: &GasTransaction) -> String {
    format!(
        "<div class='text-xs text-gray-500'>{} mi &middot; {} gal &middot; {} mpg &middot; ${}/mi &middot; {}/gal</div>",
        format_number(gas.miles, 0),
        format_number(gas.gallons, 1),
        format_number(gas.mpg, 1),
        format_number(gas.cost_per_mile, 3),
        format_currency(gas.cost_per_gallon),
    )
}

fn transaction_row(record: &TransactionRecord) -> String {
    let tx = record.transaction();
    let fuel = record.gas().map(fuel_metrics).unwrap_or_default();
    let amount_class = if tx.is_income() { "text-green-600" } else { "text-red-600" };
    let recurring = if tx.is_recurring() {
        " <span class='text-xs px-1 bg-gray-100 rounded'>recurring</span>"
    } else {
        ""
    };
    format!(
        r#"<tr class='border-b hover:bg-gray-50'>
    <td class='px-4 py-2 whitespace-nowrap'>{}</td>
    <td class='px-4 py-2'>{}{}{}</td>
    <td class='px-4 py-2'>{}</td>
    <td class='px-4 py-2'>{}</td>
    <td class='px-4 py-2 text-right font-mono {}'>{}</td>
</tr>"#,
        format_date(&tx.date),
        escape_html(&tx.location),
        recurring,
        fuel,
        escape_html(&tx.category),
        escape_html(&tx.owner),
        amount_class,
        format_currency(tx.signed_amount()),
    )
}

fn summary_cards(summary: &TransactionSummary) -> String {
    let net_class = if summary.net < 0.0 { "text-red-600" } else { "text-green-600" };
    format!(
        r#"<div class='grid grid-cols-4 gap-4'>
    <div class='bg-white rounded-xl shadow-sm p-4'><p class='text-sm text-gray-500'>Transactions</p><p class='text-2xl font-bold'>{}</p></div>
    <div class='bg-white rounded-xl shadow-sm p-4'><p class='text-sm text-gray-500'>Income</p><p class='text-2xl font-bold text-green-600'>{}</p></div>
    <div class='bg-white rounded-xl shadow-sm p-4'><p class='text-sm text-gray-500'>Expenses</p><p class='text-2xl font-bold text-red-600'>{}</p></div>
    <div class='bg-white rounded-xl shadow-sm p-4'><p class='text-sm text-gray-500'>Net</p><p class='text-2xl font-bold {}'>{}</p></div>
</div>"#,
        summary.count,
        format_currency(summary.income),
        format_currency(summary.expenses),
        net_class,
        format_currency(summary.net),
    )
}

/// Transactions page: filters on top, list reloaded on every refresh
pub async fn page_transactions(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let range = state.context.date_range.snapshot();
    let owner = state.context.owner.get();

    let inner_content = format!(
        r#"<div class='mb-6'>
            <h2 class='text-2xl font-bold'>Transactions</h2>
            <p class='text-sm text-gray-500'>{} &middot; {}</p>
        </div>
        <div id='filters' hx-get='/filters' hx-trigger='load' class='mb-6'></div>
        <div id='transactions-summary' hx-get='/transactions/summary' hx-trigger='load, refresh from:body' class='mb-6'></div>
        <div id='transactions-list' hx-get='/transactions/list' hx-trigger='load, refresh from:body'>
            <p class='text-gray-400 htmx-indicator'>Loading...</p>
        </div>"#,
        escape_html(&range.description()),
        owner,
    );

    Html(page_response(&headers, "Transactions", "/transactions", &inner_content))
}

/// Transaction table (HTMX fragment)
pub async fn htmx_transactions_list(State(state): State<AppState>) -> Html<String> {
    let loaded = match load_transactions(&state).await {
        Ok(loaded) => loaded,
        Err(e) => {
            log::warn!("Transactions unavailable: {}", e);
            return Html(backend_error_html(&e));
        }
    };

    if loaded.transactions.is_empty() {
        return Html(format!(
            "<div class='p-4 text-gray-500'>No transactions between {} and {}</div>",
            format_date(&loaded.range.start),
            format_date(&loaded.range.end)
        ));
    }

    let rows: String = loaded.transactions.iter().map(transaction_row).collect();
    Html(format!(
        r#"<div class='bg-white rounded-xl shadow-sm overflow-hidden'>
    <table class='w-full text-sm'>
        <thead class='bg-gray-50 text-gray-500'>
            <tr><th class='px-4 py-2 text-left'>Date</th><th class='px-4 py-2 text-left'>Location</th><th class='px-4 py-2 text-left'>Category</th><th class='px-4 py-2 text-left'>Owner</th><th class='px-4 py-2 text-right'>Amount</th></tr>
        </thead>
        <tbody>{}</tbody>
    </table>
</div>"#,
        rows
    ))
}

/// Income, expense and net cards (HTMX fragment)
pub async fn htmx_transactions_summary(State(state): State<AppState>) -> Html<String> {
    match load_transactions(&state).await {
        Ok(loaded) => Html(summary_cards(&loaded.summary)),
        Err(e) => {
            log::warn!("Summary unavailable: {}", e);
            Html(backend_error_html(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::api::tests::backend_url;
    use crate::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_transactions_page_has_refresh_targets() {
        let state = logged_in_state();
        let body = body_string(send(&state, get("/transactions")).await).await;
        assert!(body.contains("hx-get='/transactions/list'"));
        assert!(body.contains("refresh from:body"));
        assert!(body.contains("2024-01-01 to 2024-07-15"));
    }

    #[tokio::test]
    async fn test_list_renders_formatted_rows() {
        let url = backend_url().await;
        let state = state_with_backend(&url);
        state.context.credential.set_credential("user", "pass");

        let response = send(&state, get("/transactions/list")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("3/2/2024"));
        assert!(body.contains("-$1,234.50"));
        assert!(body.contains("$2,500.00"));
        assert!(body.contains("Landlord &lt;Apt 4&gt;"));
        assert!(body.contains("recurring"));
        assert!(body.contains("300 mi &middot; 10.0 gal &middot; 30.0 mpg &middot; $0.133/mi &middot; $4.00/gal"));
    }

    #[tokio::test]
    async fn test_summary_totals() {
        let url = backend_url().await;
        let state = state_with_backend(&url);
        state.context.credential.set_credential("user", "pass");

        let body = body_string(send(&state, get("/transactions/summary")).await).await;
        assert!(body.contains("$2,500.00"));
        assert!(body.contains("$1,274.50"));
        assert!(body.contains("$1,225.50"));
    }

    #[tokio::test]
    async fn test_list_shows_backend_failure_inline() {
        let state = logged_in_state();
        let response = send(&state, get("/transactions/list")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Could not load transactions"));
    }
}
