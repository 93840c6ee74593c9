//! Shared test helpers for integration tests.
//!
//! Spins up an axum mock of the academic API (login, refresh, profile and
//! one protected resource) on a random local port, and wires the real
//! session core against it over reqwest.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use campus_auth::{
    FallbackRouter, NavigationHistory, ReqwestTransport, RequestAuthenticator, Router as NavRouter,
    SessionService, SessionStore,
};
use campus_core::config::AppConfig;
use campus_core::config::session::AuthoritySource;
use campus_core::traits::HttpTransport;
use campus_store::memory::MemoryCredentialStore;

const SECRET: &[u8] = b"integration-secret";

/// Access token lifetime handed out by the mock server.
pub const ACCESS_TTL: i64 = 3600;

#[derive(Debug, Serialize, Deserialize)]
struct MockClaims {
    sub: String,
    name: String,
    authorities: Vec<String>,
    exp: i64,
    jti: String,
}

/// A user known to the mock server.
#[derive(Debug, Clone)]
pub struct MockUser {
    pub email: &'static str,
    pub password: &'static str,
    pub authorities: Vec<String>,
}

/// Mutable state and call counters of the mock server.
#[derive(Debug, Default)]
pub struct MockState {
    users: Vec<MockUser>,
    /// Live refresh tokens and the user they belong to.
    refresh_tokens: Mutex<HashMap<String, String>>,
    /// Refresh endpoint rejects every exchange when set.
    pub reject_refresh: AtomicBool,
    /// Protected resource answers 403 when set.
    pub forbid_resource: AtomicBool,
    /// Refresh issues a new refresh token when set.
    pub rotate_refresh: AtomicBool,
    pub login_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub me_calls: AtomicUsize,
    pub resource_calls: AtomicUsize,
    issued: AtomicUsize,
    minted: AtomicUsize,
}

impl MockState {
    fn user(&self, email: &str) -> Option<&MockUser> {
        self.users.iter().find(|u| u.email == email)
    }

    /// Mint an access token for `email` expiring `ttl` seconds from now.
    pub fn access_token(&self, email: &str, ttl: i64) -> String {
        let authorities = self
            .user(email)
            .map(|u| u.authorities.clone())
            .unwrap_or_default();
        let claims = MockClaims {
            sub: email.to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            authorities,
            exp: Utc::now().timestamp() + ttl,
            jti: self.minted.fetch_add(1, Ordering::SeqCst).to_string(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET))
            .expect("encode token")
    }

    /// Register and return a new refresh token for `email`.
    pub fn refresh_token(&self, email: &str) -> String {
        let n = self.issued.fetch_add(1, Ordering::SeqCst);
        let token = format!("refresh-{n}");
        self.refresh_tokens
            .lock()
            .unwrap()
            .insert(token.clone(), email.to_string());
        token
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn verify(&self, headers: &HeaderMap) -> Option<MockClaims> {
        let token = headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        jsonwebtoken::decode::<MockClaims>(token, &DecodingKey::from_secret(SECRET), &validation)
            .ok()
            .map(|data| data.claims)
    }
}

type Reply = (StatusCode, Json<Value>);

fn unauthorized(message: &str) -> Reply {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": message })))
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Reply {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match state.user(email) {
        Some(user) if user.password == password => {
            let token = state.access_token(email, ACCESS_TTL);
            let refresh = state.refresh_token(email);
            (
                StatusCode::OK,
                Json(json!({ "token": token, "refreshToken": refresh })),
            )
        }
        _ => unauthorized("Credenciales inválidas"),
    }
}

async fn refresh(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Reply {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if state.reject_refresh.load(Ordering::SeqCst) {
        return unauthorized("Refresh token revocado");
    }

    let presented = body["refreshToken"].as_str().unwrap_or_default().to_string();
    let owner = state.refresh_tokens.lock().unwrap().get(&presented).cloned();
    let Some(email) = owner else {
        return unauthorized("Refresh token desconocido");
    };

    let token = state.access_token(&email, ACCESS_TTL);
    if state.rotate_refresh.load(Ordering::SeqCst) {
        state.refresh_tokens.lock().unwrap().remove(&presented);
        let next = state.refresh_token(&email);
        (
            StatusCode::OK,
            Json(json!({ "token": token, "refreshToken": next })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "token": token })))
    }
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.me_calls.fetch_add(1, Ordering::SeqCst);
    match state.verify(&headers) {
        Some(claims) => (
            StatusCode::OK,
            Json(json!({
                "name": claims.name,
                "email": claims.sub,
                "authorities": claims.authorities,
            })),
        ),
        None => unauthorized("Token inválido o expirado"),
    }
}

async fn gestion(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Reply {
    state.resource_calls.fetch_add(1, Ordering::SeqCst);
    if state.forbid_resource.load(Ordering::SeqCst) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "Acceso denegado" })),
        );
    }
    match state.verify(&headers) {
        Some(_) => (StatusCode::OK, Json(json!([{ "id": 1, "anio": 2025 }]))),
        None => unauthorized("Token inválido o expirado"),
    }
}

/// Default users: one per role plus a multi-role account and a guest.
pub fn default_users() -> Vec<MockUser> {
    fn user(email: &'static str, authorities: &[&str]) -> MockUser {
        MockUser {
            email,
            password: "123456",
            authorities: authorities.iter().map(|a| a.to_string()).collect(),
        }
    }
    vec![
        user("admin@mail.com", &["ROLE_ADMIN"]),
        user("docente1@mail.com", &["ROLE_DOCENTE"]),
        user("estudiante1@mail.com", &["ROLE_ESTUDIANTE"]),
        user("director@mail.com", &["ROLE_ADMIN", "ROLE_DOCENTE"]),
        user("guest@mail.com", &["ROLE_GUEST"]),
    ]
}

/// Mock server plus a session core wired against it.
pub struct TestApp {
    pub server: Arc<MockState>,
    pub session: Arc<SessionService>,
    pub authenticator: RequestAuthenticator,
    pub router: NavRouter,
    pub fallback: FallbackRouter,
    pub history: Arc<NavigationHistory>,
    pub store: SessionStore,
    pub config: AppConfig,
}

impl TestApp {
    /// Start with the default users and profile-based authority checks.
    pub async fn new() -> Self {
        Self::with_source(AuthoritySource::Profile).await
    }

    /// Start with the given authority source.
    pub async fn with_source(source: AuthoritySource) -> Self {
        let server = Arc::new(MockState {
            users: default_users(),
            rotate_refresh: AtomicBool::new(true),
            ..MockState::default()
        });

        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/refresh", post(refresh))
            .route("/auth/me", get(me))
            .route("/gestion", get(gestion))
            .with_state(server.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        let mut config = AppConfig::default();
        config.api.base_url = format!("http://{addr}");
        config.api.timeout_seconds = 5;
        config.storage.provider = "memory".to_string();
        config.session.authority_source = source;

        let transport: Arc<dyn HttpTransport> =
            Arc::new(ReqwestTransport::new(&config.api).expect("transport"));
        let history = Arc::new(NavigationHistory::new());
        let store = SessionStore::new(Arc::new(MemoryCredentialStore::new()));
        let session = Arc::new(SessionService::new(
            transport.clone(),
            store.clone(),
            history.clone(),
            config.api.clone(),
        ));
        let authenticator =
            RequestAuthenticator::new(session.clone(), transport, &config.session);
        let router = NavRouter::new(session.clone(), history.clone(), source);
        let fallback = FallbackRouter::new(session.clone());

        Self {
            server,
            session,
            authenticator,
            router,
            fallback,
            history,
            store,
            config,
        }
    }

    /// Store a token pair for `email` as if a login had happened earlier.
    /// `access_ttl` may be negative for an already expired access token.
    pub fn seed_session(&self, email: &str, access_ttl: i64) -> (String, String) {
        let access = self.server.access_token(email, access_ttl);
        let refresh = self.server.refresh_token(email);
        self.store
            .set_tokens(&access, &refresh)
            .expect("seed tokens");
        (access, refresh)
    }

    pub fn refresh_calls(&self) -> usize {
        MockState::count(&self.server.refresh_calls)
    }

    pub fn resource_calls(&self) -> usize {
        MockState::count(&self.server.resource_calls)
    }

    pub fn me_calls(&self) -> usize {
        MockState::count(&self.server.me_calls)
    }
}
