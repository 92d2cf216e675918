//! HTTP front end with HTMX support
//!
//! Routes are organized into modules:
//! - routes::auth: Login form, login and logout
//! - routes::filters: Date range, owner filter, refresh broadcast
//! - routes::transactions: Transaction list and totals from the backend
//! - routes::settings: Configuration display
//!
//! Everything except `/login`, `/logout` and `/api/health` sits behind the
//! credential guard in `middleware`.

pub mod backend;
pub mod error;
pub mod middleware;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use bitsweb_config::Config;
use bitsweb_core::{format_date, AppContext};
use bitsweb_utils::escape_html;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

pub use backend::BackendClient;
pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<AppContext>,
    pub config: Config,
    pub backend: BackendClient,
    refresh_generation: Arc<AtomicU64>,
}

impl AppState {
    /// Build the state and hook the refresh counter into the date range store
    pub fn new(config: Config, context: Arc<AppContext>) -> Result<Self, ApiError> {
        let backend = BackendClient::new(&config)?;
        let refresh_generation = Arc::new(AtomicU64::new(0));

        let generation = Arc::clone(&refresh_generation);
        context.date_range.on_refresh(move || {
            let current = generation.fetch_add(1, Ordering::SeqCst) + 1;
            log::debug!("Refresh generation {}", current);
        });

        Ok(Self {
            context,
            config,
            backend,
            refresh_generation,
        })
    }

    /// Number of refresh broadcasts so far
    pub fn refresh_generation(&self) -> u64 {
        self.refresh_generation.load(Ordering::SeqCst)
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::auth::{api_login, api_logout, page_login};
    use routes::filters::{
        api_date_range, api_owner, api_refresh, api_reset_date_range, api_set_date_range, api_set_owner,
        htmx_filters_panel,
    };
    use routes::settings::{api_settings, page_settings};
    use routes::transactions::{api_transactions, htmx_transactions_list, htmx_transactions_summary, page_transactions};

    let protected = Router::new()
        // HTMX page routes
        .route("/", get(index_page))
        .route("/dashboard", get(index_page))
        .route("/transactions", get(page_transactions))
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/summary", get(htmx_transactions_summary))
        .route("/filters", get(htmx_filters_panel))
        .route("/settings", get(page_settings))
        // API endpoints
        .route("/api/transactions", get(api_transactions))
        .route("/api/date-range", get(api_date_range).post(api_set_date_range))
        .route("/api/date-range/reset", post(api_reset_date_range))
        .route("/api/refresh", post(api_refresh))
        .route("/api/owner", get(api_owner).post(api_set_owner))
        .route("/api/settings", get(api_settings))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_credential,
        ));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/login", get(page_login).post(api_login))
        .route("/logout", post(api_logout))
        .merge(protected)
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound { resource: uri.path().to_string() }
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Bits</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Navigation sidebar with the logout button
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/", "Dashboard"),
        ("/transactions", "Transactions"),
        ("/settings", "Settings"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Bits</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label) in &links {
        let is_active = if *path == "/" {
            current_path == "/" || current_path == "/dashboard"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'><span>{}</span></a></li>"#,
            path, active_class, label
        ));
    }
    nav.push_str(
        "</ul><form method='post' action='/logout' class='p-4 border-t'>\
         <button type='submit' class='w-full px-3 py-2 text-left text-gray-600 rounded-lg hover:bg-gray-50'>Log out</button>\
         </form></div>",
    );
    nav
}

/// Check if request is from HTMX (partial page update)
pub(crate) fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#, inner_content)
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Dashboard: filter controls plus totals for the current window
async fn index_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let range = state.context.date_range.snapshot();
    let credential = state.context.credential.get();
    let username = credential.username.as_deref().unwrap_or_default();

    let inner_content = format!(
        r#"<div class='mb-6'>
            <h2 class='text-2xl font-bold'>Dashboard</h2>
            <p class='text-sm text-gray-500'>Signed in as {} &middot; {} to {}</p>
        </div>
        <div id='filters' hx-get='/filters' hx-trigger='load' class='mb-6'></div>
        <div id='summary' hx-get='/transactions/summary' hx-trigger='load, refresh from:body'>
            <p class='text-gray-400 htmx-indicator'>Loading...</p>
        </div>"#,
        escape_html(username),
        format_date(&range.start),
        format_date(&range.end),
    );

    axum::response::Html(page_response(&headers, "Dashboard", "/", &inner_content))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

/// Start the HTTP server
///
/// Creates the router, binds to the configured address and serves until
/// Ctrl-C is received.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `context` - The shared front end state
pub async fn start_server(config: Config, context: Arc<AppContext>) -> Result<(), ApiError> {
    let addr = config.bind_address();
    if !config.is_local_only() {
        log::warn!("Listening on {}: the stored login is shared with every client that can reach it", addr);
    }
    let state = AppState::new(config, context)?;
    log::info!("Backend API at {}", state.backend.base_url());
    if !state.backend.has_api_key() {
        log::warn!("No API key configured; backend requests are sent without one");
    }

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /login (Sign in)");
    log::info!("  - / (Dashboard)");
    log::info!("  - /transactions (Transaction list)");
    log::info!("  - /settings (Configuration)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

// ==================== Tests ====================


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_is_public() {
        let state = state();
        let response = send(&state, get("/api/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn test_dashboard_renders_for_logged_in_user() {
        let state = logged_in_state();
        let response = send(&state, get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Signed in as user"));
        assert!(body.contains("1/1/2024 to 7/15/2024"));
        assert!(body.contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_htmx_request_gets_partial() {
        let state = logged_in_state();
        let request = axum::http::Request::builder()
            .uri("/dashboard")
            .header("hx-request", "true")
            .body(axum::body::Body::empty())
            .unwrap();
        let body = body_string(send(&state, request).await).await;
        assert!(!body.contains("<!DOCTYPE html>"));
        assert!(body.contains("Dashboard"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let state = state();
        let response = send(&state, get("/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_refresh_generation_counts_broadcasts() {
        let state = state();
        assert_eq!(state.refresh_generation(), 0);
        state.context.date_range.refresh();
        state.context.date_range.refresh();
        assert_eq!(state.refresh_generation(), 2);
    }
}
