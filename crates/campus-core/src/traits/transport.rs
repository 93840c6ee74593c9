//! HTTP transport trait used by the session core.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{ApiRequest, ApiResponse};

/// Sends API requests to the remote server.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; `Err` is reserved for requests that never got a
/// response (connection refused, timeout, TLS failure).
#[async_trait]
pub trait HttpTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Send one request and wait for its response.
    async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse>;
}
