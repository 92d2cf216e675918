//! Filter API endpoints - JSON API

use crate::{ApiError, AppState};
use axum::extract::{Form, State};
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bitsweb_core::{format_month, DateRange, Owner};
use serde::Deserialize;
use serde_json::{json, Value};

/// Date range form body. Missing ends keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeForm {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Owner form body
#[derive(Debug, Deserialize)]
pub struct OwnerForm {
    pub owner: String,
}

fn range_json(state: &AppState, range: &DateRange) -> Value {
    json!({
        "start": range.start,
        "end": range.end,
        "start_month": format_month(&range.start),
        "end_month": format_month(&range.end),
        "description": range.description(),
        "refresh_generation": state.refresh_generation(),
    })
}

/// Get the current reporting window
pub async fn api_date_range(State(state): State<AppState>) -> Json<Value> {
    let range = state.context.date_range.snapshot();
    Json(range_json(&state, &range))
}

/// Set one or both ends of the window. Inverted or malformed windows are rejected.
pub async fn api_set_date_range(
    State(state): State<AppState>,
    Form(form): Form<DateRangeForm>,
) -> Result<Json<Value>, ApiError> {
    let current = state.context.date_range.snapshot();
    let next = DateRange {
        start: form.start.map(|s| s.trim().to_string()).unwrap_or(current.start),
        end: form.end.map(|s| s.trim().to_string()).unwrap_or(current.end),
    };
    next.validate()?;

    state.context.date_range.set_range(next.clone());
    Ok(Json(range_json(&state, &next)))
}

/// Return to the default window ending today
pub async fn api_reset_date_range(State(state): State<AppState>) -> Json<Value> {
    state.context.date_range.reset(chrono::Local::now().date_naive());
    let range = state.context.date_range.snapshot();
    Json(range_json(&state, &range))
}

/// Broadcast a refresh to every registered listener
pub async fn api_refresh(State(state): State<AppState>) -> Response {
    let invoked = state.context.date_range.refresh();
    log::info!("Refresh requested, {} listener(s) notified", invoked);

    let mut response = Json(json!({
        "success": true,
        "listeners": invoked,
        "refresh_generation": state.refresh_generation(),
    }))
    .into_response();
    response
        .headers_mut()
        .insert("hx-trigger", HeaderValue::from_static("refresh"));
    response
}

/// Get the owner filter and its options
pub async fn api_owner(State(state): State<AppState>) -> Json<Value> {
    let options: Vec<&str> = Owner::VARIANTS.iter().map(|o| o.as_str()).collect();
    Json(json!({
        "owner": state.context.owner.get().as_str(),
        "options": options,
    }))
}

/// Change the owner filter
pub async fn api_set_owner(
    State(state): State<AppState>,
    Form(form): Form<OwnerForm>,
) -> Result<Json<Value>, ApiError> {
    let owner: Owner = form.owner.parse()?;
    state.context.owner.set(owner);
    log::debug!("Owner filter set to {}", owner);
    Ok(Json(json!({ "success": true, "owner": owner.as_str() })))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use bitsweb_core::{DateRange, Owner};

    async fn json(response: axum::response::Response) -> serde_json::Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_get_default_range() {
        let state = logged_in_state();
        let body = json(send(&state, get("/api/date-range")).await).await;
        assert_eq!(body["start"], "2024-01-01");
        assert_eq!(body["end"], "2024-07-15");
        assert_eq!(body["start_month"], "Jan 2024");
    }

    #[tokio::test]
    async fn test_set_one_end() {
        let state = logged_in_state();
        let response = send(&state, post_form("/api/date-range", "start=2024-03-01")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.context.date_range.snapshot(), DateRange::new("2024-03-01", "2024-07-15"));
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected() {
        let state = logged_in_state();
        let response = send(&state, post_form("/api/date-range", "start=2024-08-01&end=2024-07-01")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_DATE_RANGE");
        // store untouched
        assert_eq!(state.context.date_range.snapshot(), DateRange::new("2024-01-01", "2024-07-15"));
    }

    #[tokio::test]
    async fn test_malformed_date_is_rejected() {
        let state = logged_in_state();
        let response = send(&state, post_form("/api/date-range", "end=07%2F15%2F2024")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reset_restores_default_window() {
        let state = logged_in_state();
        state.context.date_range.set_range(DateRange::new("2020-01-01", "2020-02-01"));
        let body = json(send(&state, post_form("/api/date-range/reset", "")).await).await;
        let today = chrono::Local::now().date_naive();
        let expected = DateRange::default_for(today, 6);
        assert_eq!(body["start"], expected.start);
        assert_eq!(body["end"], expected.end);
    }

    #[tokio::test]
    async fn test_refresh_broadcasts_and_triggers_htmx() {
        let state = logged_in_state();
        let response = send(&state, post_form("/api/refresh", "")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("hx-trigger").unwrap(), "refresh");
        let body = json(response).await;
        assert_eq!(body["listeners"], 1);
        assert_eq!(state.refresh_generation(), 1);
    }

    #[tokio::test]
    async fn test_owner_filter() {
        let state = logged_in_state();
        let body = json(send(&state, get("/api/owner")).await).await;
        assert_eq!(body["owner"], "All");
        assert_eq!(body["options"].as_array().unwrap().len(), 3);

        let response = send(&state, post_form("/api/owner", "owner=dorothy")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.context.owner.get(), Owner::Dorothy);

        let response = send(&state, post_form("/api/owner", "owner=bob")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.context.owner.get(), Owner::Dorothy);
    }
}
