//! Session lifecycle service: login, refresh, logout and profile flows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, warn};

use campus_core::config::api::ApiConfig;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_core::traits::{HttpTransport, Navigator};
use campus_core::types::{ApiRequest, Area};

use crate::token::{self, AuthoritySet, RoleClaims};

use super::store::SessionStore;

/// Token pair returned by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// Fresh access token.
    pub access_token: String,
    /// Fresh refresh token.
    pub refresh_token: String,
}

/// Token pair stored after a successful refresh.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResult {
    /// Fresh access token.
    pub access_token: String,
    /// Refresh token now stored.
    pub refresh_token: String,
    /// Whether the server issued a new refresh token.
    pub rotated: bool,
}

/// Current user profile as reported by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    #[serde(default, alias = "nombre")]
    pub name: String,
    /// E-mail, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role-bearing fields.
    #[serde(flatten)]
    pub role_claims: RoleClaims,
}

impl Profile {
    /// The profile's authorities.
    pub fn authorities(&self) -> AuthoritySet {
        self.role_claims.authority_set()
    }
}

/// Wire shape of the login and refresh responses.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(alias = "token", alias = "accessToken")]
    access_token: String,
    #[serde(default, alias = "refreshToken")]
    refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Orchestrates the session against the remote API and owns the
/// authenticated signal.
///
/// Session states are `ANONYMOUS` and `AUTHENTICATED`; token freshness is
/// evaluated per request rather than tracked as a state.
pub struct SessionService {
    /// Raw transport, without bearer attachment or retry.
    transport: Arc<dyn HttpTransport>,
    /// Token persistence.
    store: SessionStore,
    /// Receives the redirect to the login screen on logout.
    navigator: Arc<dyn Navigator>,
    /// Endpoint paths.
    api: ApiConfig,
    /// Authenticated signal; receivers are read-only views.
    authenticated: watch::Sender<bool>,
    /// Serialises refresh-and-store.
    refresh_gate: Mutex<()>,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("api", &self.api)
            .field("authenticated", &*self.authenticated.borrow())
            .finish()
    }
}

impl SessionService {
    /// Create the service. The signal starts `true` only when both tokens
    /// are already stored.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: SessionStore,
        navigator: Arc<dyn Navigator>,
        api: ApiConfig,
    ) -> Self {
        let initial = match store.credentials() {
            Ok(creds) => creds.access_token.is_some() && creds.refresh_token.is_some(),
            Err(e) => {
                warn!(error = %e, "Could not read stored credentials; starting anonymous");
                false
            }
        };
        let (authenticated, _) = watch::channel(initial);

        Self {
            transport,
            store,
            navigator,
            api,
            authenticated,
            refresh_gate: Mutex::new(()),
        }
    }

    /// Token persistence.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Subscribe to the authenticated signal.
    pub fn authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    /// Current value of the authenticated signal.
    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    /// Whether `token` is absent, malformed, or at/after its `exp`.
    pub fn is_expired(token: Option<&str>) -> bool {
        token::is_expired(token)
    }

    /// Exchange credentials for a token pair.
    ///
    /// On success both tokens are stored and the session becomes
    /// authenticated. On failure nothing is written and the error carries
    /// the server's message.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult> {
        let body = serde_json::to_value(LoginRequest { email, password })?;
        let response = self
            .transport
            .send(ApiRequest::post(&self.api.login_path, body))
            .await?;

        let response = match response.error_for_status() {
            Ok(r) => r,
            Err(e) => {
                warn!(status = ?e.status, "Login rejected");
                return Err(e);
            }
        };

        let tokens: TokenResponse = response.json()?;
        let refresh_token = tokens
            .refresh_token
            .ok_or_else(|| AppError::validation("Login response carried no refresh token"))?;

        self.store.set_tokens(&tokens.access_token, &refresh_token)?;
        self.authenticated.send_replace(true);
        info!("Login successful");

        Ok(LoginResult {
            access_token: tokens.access_token,
            refresh_token,
        })
    }

    /// Exchange the stored refresh token for a new pair.
    ///
    /// On failure the stored tokens are left untouched; the caller decides
    /// whether to log out.
    pub async fn refresh(&self) -> AppResult<RefreshResult> {
        let _gate = self.refresh_gate.lock().await;
        self.exchange_refresh().await
    }

    /// Refresh unless another caller already replaced `stale`.
    ///
    /// Returns the access token to use. Callers racing on the same 401
    /// share one exchange: the first refreshes, the rest find a different
    /// token in the store and reuse it.
    pub async fn refresh_if_current(&self, stale: &str) -> AppResult<String> {
        let _gate = self.refresh_gate.lock().await;
        if let Some(current) = self.store.get_access()? {
            if current != stale {
                debug!("Access token already rotated by a concurrent refresh");
                return Ok(current);
            }
        }
        self.exchange_refresh().await.map(|r| r.access_token)
    }

    async fn exchange_refresh(&self) -> AppResult<RefreshResult> {
        let refresh_token = self
            .store
            .get_refresh()?
            .ok_or_else(AppError::no_refresh_token)?;

        let body = serde_json::to_value(RefreshRequest {
            refresh_token: &refresh_token,
        })?;
        let response = self
            .transport
            .send(ApiRequest::post(&self.api.refresh_path, body))
            .await
            .map_err(AppError::refresh_failed)?;

        let response = response.error_for_status().map_err(AppError::refresh_failed)?;
        let tokens: TokenResponse = response.json().map_err(AppError::refresh_failed)?;

        let rotated = tokens.refresh_token.is_some();
        let next_refresh = tokens.refresh_token.unwrap_or(refresh_token);
        self.store.set_tokens(&tokens.access_token, &next_refresh)?;
        self.authenticated.send_replace(true);
        info!(rotated, "Access token refreshed");

        Ok(RefreshResult {
            access_token: tokens.access_token,
            refresh_token: next_refresh,
            rotated,
        })
    }

    /// Clear both tokens and flip the signal to anonymous, without navigating.
    pub fn end_session(&self) -> AppResult<()> {
        let cleared = self.store.clear();
        self.authenticated.send_replace(false);
        if let Err(e) = &cleared {
            error!(error = %e, "Failed to clear stored credentials");
        }
        cleared
    }

    /// Terminate the session locally and navigate to the login screen.
    ///
    /// Idempotent: a second call leaves the same end state. The signal and
    /// navigation change even if clearing the store fails; that failure is
    /// still returned.
    pub fn logout(&self) -> AppResult<()> {
        let cleared = self.end_session();
        self.navigator.navigate(Area::Login.path());
        info!("Logged out");
        cleared
    }

    /// Fetch the current profile with the stored access token attached.
    ///
    /// No refresh is attempted here; a 401 surfaces as `Unauthorized`.
    pub async fn me(&self) -> AppResult<Profile> {
        let mut request = ApiRequest::get(&self.api.me_path);
        if let Some(access) = self.store.get_access()? {
            request = request.with_bearer(&access)?;
        }
        let response = self.transport.send(request).await?.error_for_status()?;
        response.json()
    }
}
