//! Settings page rendering - Full page endpoints

use super::api::redacted_config;
use crate::AppState;
use bitsweb_utils::escape_html;

pub async fn page_settings(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let config = redacted_config(&state.config);
    let range = state.context.date_range.snapshot();

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Settings</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Server</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Host</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Port</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Backend</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Transactions URL</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>API key ({})</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Timeout</p><p class='font-medium'>{}s</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-4'>Date range</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Default window</p><p class='font-medium'>{} months</p></div>
                <div><p class='text-sm text-gray-500'>Current window</p><p class='font-medium'>{}</p></div>
            </div>
        </div>"#,
        escape_html(&config.server.host),
        config.server.port,
        escape_html(&config.transactions_url()),
        escape_html(&config.backend.api_key_header),
        config.backend.api_key.as_deref().unwrap_or("Not set"),
        config.backend.timeout_secs,
        config.date_range.months_back,
        escape_html(&range.description()),
    );

    axum::response::Html(crate::page_response(&headers, "Settings", "/settings", &inner_content))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;

    #[tokio::test]
    async fn test_settings_page() {
        let state = logged_in_state();
        let body = body_string(send(&state, get("/settings")).await).await;
        assert!(body.contains("http://127.0.0.1:9/transactions"));
        assert!(body.contains("X-API-KEY"));
        assert!(body.contains("6 months"));
        assert!(!body.contains("k3y"));
    }
}
