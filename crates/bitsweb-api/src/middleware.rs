//! Credential guard for the protected route group

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use bitsweb_core::{guard, GuardOutcome};

use crate::{is_htmx_request, AppState};

/// Read the credential once and either run the handler or redirect.
///
/// The redirect is a 307 so the request method is kept. HTMX requests also
/// get `HX-Redirect`, since HTMX swaps redirected bodies instead of navigating.
pub async fn require_credential(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let credential = state.context.credential.get();
    match guard(&credential) {
        GuardOutcome::Proceed => next.run(request).await,
        GuardOutcome::Redirect(location) => {
            log::debug!("Blocked {} {}", request.method(), request.uri().path());
            let htmx = is_htmx_request(request.headers());
            let mut response = Redirect::temporary(location).into_response();
            if htmx {
                response
                    .headers_mut()
                    .insert("hx-redirect", HeaderValue::from_static(location));
            }
            response
        }
    }
}
