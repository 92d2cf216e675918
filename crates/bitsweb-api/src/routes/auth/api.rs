//! Auth endpoints - Form posts for login and logout

use crate::{is_htmx_request, AppState};
use axum::extract::{Form, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use bitsweb_core::{NavigationLog, HOME_ROUTE, LOGIN_ROUTE};
use serde::Deserialize;

/// Login form body
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// 303 to `location`, plus `HX-Redirect` for HTMX callers
fn redirect_to(headers: &HeaderMap, location: &str) -> Response {
    let mut response = Redirect::to(location).into_response();
    if is_htmx_request(headers) {
        if let Ok(value) = HeaderValue::from_str(location) {
            response.headers_mut().insert("hx-redirect", value);
        }
    }
    response
}

/// Store the submitted credential and go to the dashboard.
///
/// Nothing is checked here; the backend rejects bad credentials when the
/// first request is made.
pub async fn api_login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    state.context.credential.set_credential(form.username, form.password);
    redirect_to(&headers, HOME_ROUTE)
}

/// Forget the credential and go back to the login form
pub async fn api_logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let navigator = NavigationLog::new();
    state.context.credential.logout(&navigator);
    let target = navigator.last().unwrap_or_else(|| LOGIN_ROUTE.to_string());
    redirect_to(&headers, &target)
}
