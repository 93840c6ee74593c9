//! Bearer attachment with a single refresh-and-retry on 401.
//!
//! Every outgoing request gets `Authorization: Bearer <access>` when an
//! access token is stored, stale or not. Freshness is corrected after the
//! fact: a 401 on a request that carried a token triggers one refresh and
//! one retry. A 403 never refreshes.

use std::sync::Arc;

use http::StatusCode;
use tracing::{debug, info, warn};
use uuid::Uuid;

use campus_core::config::session::SessionConfig;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_core::traits::HttpTransport;
use campus_core::types::{ApiRequest, ApiResponse};

use crate::session::SessionService;

/// Sends API requests on behalf of the current session.
#[derive(Debug, Clone)]
pub struct RequestAuthenticator {
    /// Session owning the token pair.
    session: Arc<SessionService>,
    /// Underlying transport.
    transport: Arc<dyn HttpTransport>,
    /// Share one refresh between concurrent 401s.
    coalesce_refresh: bool,
}

impl RequestAuthenticator {
    /// Create an authenticator over `transport`.
    pub fn new(
        session: Arc<SessionService>,
        transport: Arc<dyn HttpTransport>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            session,
            transport,
            coalesce_refresh: config.coalesce_refresh,
        }
    }

    /// The session this authenticator acts for.
    pub fn session(&self) -> &Arc<SessionService> {
        &self.session
    }

    /// Send `request`, refreshing and retrying once if it is rejected with 401.
    ///
    /// The retried response is final whatever its status. If the refresh
    /// itself fails the session is logged out and the original 401 is
    /// returned.
    pub async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let request_id = Uuid::new_v4();
        let access = self.session.store().get_access()?;

        let outgoing = match &access {
            Some(token) => request.with_bearer(token)?,
            None => request.clone(),
        };
        debug!(
            %request_id,
            method = %request.method,
            path = %request.path,
            bearer = access.is_some(),
            "Sending API request"
        );

        let response = self.transport.send(outgoing).await?;
        if response.status != StatusCode::UNAUTHORIZED {
            return response.error_for_status();
        }

        let original = AppError::from_status(response.status.as_u16(), &response.body);
        let Some(stale) = access else {
            debug!(%request_id, "401 on a request sent without a token");
            return Err(original);
        };
        if self.session.store().get_refresh()?.is_none() {
            debug!(%request_id, "401 with no refresh token stored");
            return Err(original);
        }

        let refreshed = if self.coalesce_refresh {
            self.session.refresh_if_current(&stale).await
        } else {
            self.session.refresh().await.map(|r| r.access_token)
        };

        match refreshed {
            Ok(fresh) => {
                info!(%request_id, path = %request.path, "Retrying request with refreshed token");
                let retry = request.with_bearer(&fresh)?;
                self.transport.send(retry).await?.error_for_status()
            }
            Err(e) => {
                warn!(%request_id, error = %e, "Refresh failed; ending session");
                if let Err(logout_err) = self.session.logout() {
                    warn!(%request_id, error = %logout_err, "Logout after refresh failure did not complete");
                }
                Err(original)
            }
        }
    }
}
