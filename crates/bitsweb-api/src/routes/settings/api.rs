//! Settings API endpoints - JSON API

use crate::AppState;
use axum::Json;
use bitsweb_config::Config;

/// Running configuration with the API key masked
pub(crate) fn redacted_config(config: &Config) -> Config {
    let mut shown = config.clone();
    if shown.backend.api_key.is_some() {
        shown.backend.api_key = Some("********".to_string());
    }
    shown
}

pub async fn api_settings(state: axum::extract::State<AppState>) -> Json<Config> {
    Json(redacted_config(&state.config))
}
