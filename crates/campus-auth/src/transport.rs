//! reqwest-backed [`HttpTransport`].

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use campus_core::config::api::ApiConfig;
use campus_core::error::{AppError, ErrorKind};
use campus_core::result::AppResult;
use campus_core::traits::HttpTransport;
use campus_core::types::{ApiRequest, ApiResponse};

/// Sends requests to the configured API base URL over a pooled client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// Pooled HTTP client.
    client: reqwest::Client,
    /// Base URL and timeout.
    api: ApiConfig,
}

impl ReqwestTransport {
    /// Build a transport with the configured per-request timeout.
    pub fn new(api: &ApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;
        Ok(Self::with_client(client, api))
    }

    /// Use an existing client.
    pub fn with_client(client: reqwest::Client, api: &ApiConfig) -> Self {
        Self {
            client,
            api: api.clone(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let url = self.api.url(&request.path);
        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            "API response received"
        );
        Ok(ApiResponse::new(status, body))
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        format!("Request timed out: {err}")
    } else {
        format!("Request failed: {err}")
    };
    AppError::with_source(ErrorKind::Transport, message, err)
}
