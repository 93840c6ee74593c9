//! Test doubles shared by the unit tests of this crate.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use http::StatusCode;

use campus_core::config::api::ApiConfig;
use campus_core::result::AppResult;
use campus_core::traits::HttpTransport;
use campus_core::types::{ApiRequest, ApiResponse};
use campus_store::memory::MemoryCredentialStore;

use crate::routing::NavigationHistory;
use crate::session::{SessionService, SessionStore};

type Handler = Box<dyn Fn(&ApiRequest) -> AppResult<ApiResponse> + Send + Sync>;

/// Transport answering every request through a closure and recording it.
pub(crate) struct ScriptedTransport {
    handler: Handler,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&ApiRequest) -> AppResult<ApiResponse> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }
}

impl std::fmt::Debug for ScriptedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedTransport").finish()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        tokio::task::yield_now().await;
        (self.handler)(&request)
    }
}

/// A JSON response with the given status.
pub(crate) fn json(status: u16, body: serde_json::Value) -> AppResult<ApiResponse> {
    Ok(ApiResponse::new(
        StatusCode::from_u16(status).unwrap(),
        body.to_string(),
    ))
}

/// A login/refresh response body.
pub(crate) fn tokens_body(access: &str, refresh: Option<&str>) -> serde_json::Value {
    match refresh {
        Some(refresh) => serde_json::json!({"token": access, "refreshToken": refresh}),
        None => serde_json::json!({"token": access}),
    }
}

/// An unsigned compact token expiring `exp_offset` seconds from now.
pub(crate) fn token(exp_offset: i64, authorities: &[&str]) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = serde_json::json!({
        "name": "Test User",
        "authorities": authorities,
        "exp": Utc::now().timestamp() + exp_offset,
    });
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{payload}.")
}

pub(crate) fn memory_store() -> MemoryCredentialStore {
    MemoryCredentialStore::new()
}

pub(crate) struct Harness {
    pub(crate) session: Arc<SessionService>,
    pub(crate) transport: Arc<ScriptedTransport>,
    pub(crate) history: Arc<NavigationHistory>,
    pub(crate) store: SessionStore,
}

pub(crate) fn harness<F>(handler: F) -> Harness
where
    F: Fn(&ApiRequest) -> AppResult<ApiResponse> + Send + Sync + 'static,
{
    harness_with_store(memory_store(), handler)
}

pub(crate) fn harness_with_store<F>(backend: MemoryCredentialStore, handler: F) -> Harness
where
    F: Fn(&ApiRequest) -> AppResult<ApiResponse> + Send + Sync + 'static,
{
    let transport = ScriptedTransport::new(handler);
    let history = Arc::new(NavigationHistory::new());
    let store = SessionStore::new(Arc::new(backend));
    let session = Arc::new(SessionService::new(
        transport.clone(),
        store.clone(),
        history.clone(),
        ApiConfig::default(),
    ));
    Harness {
        session,
        transport,
        history,
        store,
    }
}
