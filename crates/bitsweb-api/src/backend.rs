//! Client for the external transactions backend
//!
//! Every request carries the Basic-Auth value derived from the stored
//! credential and the configured API key.

use std::time::Duration;

use bitsweb_config::Config;
use bitsweb_core::{DateRange, TransactionRecord};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

use crate::error::ApiError;

/// HTTP client for the backend API
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    transactions_url: String,
    api_key_header: HeaderName,
    api_key: Option<String>,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let api_key_header = HeaderName::from_bytes(config.backend.api_key_header.trim().as_bytes())
            .map_err(|e| ApiError::Config {
                message: format!("backend.api_key_header: {}", e),
            })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.backend.timeout_secs))
            .build()
            .map_err(|e| ApiError::Config { message: e.to_string() })?;

        Ok(Self {
            client,
            base_url: config.backend.url.clone(),
            transactions_url: config.transactions_url(),
            api_key_header,
            api_key: config.backend.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Authorization and API key headers. Empty values are left out.
    pub fn auth_headers(&self, basic_auth: &str) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        if !basic_auth.is_empty() {
            let value = HeaderValue::from_str(&format!("Basic {}", basic_auth))
                .map_err(|_| ApiError::BadRequest { message: "Credential cannot be sent as a header".to_string() })?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(key) = &self.api_key {
            let mut value = HeaderValue::from_str(key)
                .map_err(|_| ApiError::Config { message: "API key cannot be sent as a header".to_string() })?;
            value.set_sensitive(true);
            headers.insert(self.api_key_header.clone(), value);
        }
        Ok(headers)
    }

    /// Transactions between `range.start` and `range.end`
    pub async fn fetch_transactions(&self, range: &DateRange, basic_auth: &str) -> Result<Vec<TransactionRecord>, ApiError> {
        log::debug!("Fetching transactions {} from {}", range.description(), self.transactions_url);
        let response = self
            .client
            .get(&self.transactions_url)
            .headers(self.auth_headers(basic_auth)?)
            .query(&[("start", range.start.as_str()), ("end", range.end.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let transactions: Vec<TransactionRecord> = response.json().await?;
        log::debug!("Backend returned {} transaction(s)", transactions.len());
        Ok(transactions)
    }
}
