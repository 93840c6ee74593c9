//! A single admission check against the current session.

use std::sync::Arc;

use tracing::{debug, warn};

use campus_core::config::session::AuthoritySource;
use campus_core::types::{Area, Role};

use crate::session::SessionService;
use crate::token::{self, AuthoritySet};

use super::outcome::{GuardKind, GuardOutcome};

/// Admission check for one protected area.
///
/// 1. A stored, unexpired access token goes straight to the authority check.
/// 2. Otherwise a stored refresh token is exchanged once and the check runs
///    against the new access token. A failed exchange ends the session.
/// 3. With no tokens at all the route redirects to login.
///
/// Refreshes go through [`SessionService::refresh_if_current`] so a guard
/// racing a rejected request shares its exchange.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    kind: GuardKind,
    session: Arc<SessionService>,
    source: AuthoritySource,
}

impl RouteGuard {
    /// Create a guard of `kind` resolving authorities from `source`.
    pub fn new(kind: GuardKind, session: Arc<SessionService>, source: AuthoritySource) -> Self {
        Self {
            kind,
            session,
            source,
        }
    }

    /// Guard admitting any live session.
    pub fn authenticated(session: Arc<SessionService>) -> Self {
        Self::new(GuardKind::Authenticated, session, AuthoritySource::default())
    }

    /// Guard admitting sessions holding `role`.
    pub fn role(role: Role, session: Arc<SessionService>, source: AuthoritySource) -> Self {
        Self::new(GuardKind::Role(role), session, source)
    }

    /// What this guard checks.
    pub fn kind(&self) -> GuardKind {
        self.kind
    }

    /// Run the check. Never fails: any error closes the route towards login.
    pub async fn check(&self) -> GuardOutcome {
        let store = self.session.store();
        let credentials = match store.credentials() {
            Ok(c) => c,
            Err(e) => {
                warn!(guard = %self.kind, error = %e, "Could not read credentials");
                return GuardOutcome::RedirectTo(Area::Login);
            }
        };

        let stale = match credentials.access_token.as_deref() {
            Some(access) => match token::ensure_live(Some(access)) {
                Ok(_) => return self.admit(access, false).await,
                Err(e) => {
                    debug!(guard = %self.kind, kind = %e.kind, "Stored access token not usable");
                    Some(access)
                }
            },
            None => None,
        };

        if credentials.refresh_token.is_none() {
            debug!(guard = %self.kind, "No session; redirecting to login");
            return GuardOutcome::RedirectTo(Area::Login);
        }

        let Some(fresh) = self.refresh(stale).await else {
            return GuardOutcome::RedirectTo(Area::Login);
        };
        match token::ensure_live(Some(&fresh)) {
            Ok(_) => self.admit(&fresh, true).await,
            Err(e) => {
                warn!(guard = %self.kind, kind = %e.kind, "Refreshed access token not usable");
                GuardOutcome::RedirectTo(Area::Login)
            }
        }
    }

    /// Exchange the refresh token once. When `stale` was already replaced
    /// by a concurrent refresh the replacement is reused. A failed exchange
    /// ends the session.
    async fn refresh(&self, stale: Option<&str>) -> Option<String> {
        let refreshed = match stale {
            Some(stale) => self.session.refresh_if_current(stale).await,
            None => self.session.refresh().await.map(|r| r.access_token),
        };
        match refreshed {
            Ok(fresh) => Some(fresh),
            Err(e) => {
                warn!(guard = %self.kind, error = %e, "Refresh failed during admission");
                self.end_session();
                None
            }
        }
    }

    fn end_session(&self) {
        if let Err(e) = self.session.end_session() {
            warn!(guard = %self.kind, error = %e, "Could not clear credentials");
        }
    }

    async fn admit(&self, access: &str, refreshed: bool) -> GuardOutcome {
        let role = match self.kind {
            GuardKind::Authenticated => return GuardOutcome::Allow,
            GuardKind::Role(role) => role,
        };

        let authorities = match self.source {
            AuthoritySource::Claims => match token::decode(access) {
                Ok(claims) => claims.authorities(),
                Err(e) => {
                    warn!(guard = %self.kind, error = %e, "Access token claims unreadable");
                    return GuardOutcome::RedirectTo(Area::Login);
                }
            },
            AuthoritySource::Profile => match self.profile_authorities(access, refreshed).await {
                Some(a) => a,
                None => return GuardOutcome::RedirectTo(Area::Login),
            },
        };

        if authorities.contains_role(role) {
            GuardOutcome::Allow
        } else {
            let area = authorities.area();
            debug!(guard = %self.kind, area = %area, "Role missing; redirecting to own area");
            GuardOutcome::RedirectTo(area)
        }
    }

    /// Authorities from the server profile.
    ///
    /// A 401 on a token that has not been refreshed yet in this evaluation
    /// gets one refresh and one more lookup. A 401 that survives it ends
    /// the session.
    async fn profile_authorities(&self, access: &str, refreshed: bool) -> Option<AuthoritySet> {
        match self.session.me().await {
            Ok(profile) => return Some(profile.authorities()),
            Err(e) if e.is_unauthorized() && !refreshed => {
                debug!(guard = %self.kind, "Profile rejected the access token; refreshing");
            }
            Err(e) => {
                warn!(guard = %self.kind, error = %e, "Profile lookup failed");
                if e.is_unauthorized() {
                    self.end_session();
                }
                return None;
            }
        }

        self.refresh(Some(access)).await?;
        match self.session.me().await {
            Ok(profile) => Some(profile.authorities()),
            Err(e) => {
                warn!(guard = %self.kind, error = %e, "Profile lookup failed after refresh");
                if e.is_unauthorized() {
                    self.end_session();
                }
                None
            }
        }
    }
}
