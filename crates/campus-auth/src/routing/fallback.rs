//! Role-to-area decision table shared by the catch-all route and by every
//! role guard's wrong-role redirect.

use std::sync::Arc;

use tracing::{debug, warn};

use campus_core::types::Area;

use crate::session::SessionService;
use crate::token::{self, AuthoritySet};

/// The area for an authority set.
///
/// All authorities are joined into one lowercase string and tested in
/// fixed order: `admin`, then `docente`, then `estudiante`. Anything else
/// lands on login.
pub fn area_for(authorities: &AuthoritySet) -> Area {
    authorities.area()
}

/// Resolves where a user without a concrete destination belongs.
#[derive(Debug, Clone)]
pub struct FallbackRouter {
    session: Arc<SessionService>,
}

impl FallbackRouter {
    pub fn new(session: Arc<SessionService>) -> Self {
        Self { session }
    }

    /// Area for the current user according to the server profile.
    ///
    /// If the profile lookup fails and a refresh token is stored, one
    /// refresh is attempted followed by one more lookup. Any remaining
    /// failure lands on login.
    pub async fn resolve(&self) -> Area {
        let profile = match self.session.me().await {
            Ok(profile) => Some(profile),
            Err(e) => {
                debug!(error = %e, "Profile lookup failed; trying refresh");
                self.refresh_and_retry().await
            }
        };

        let area = profile.map_or(Area::Login, |p| area_for(&p.authorities()));
        debug!(area = %area, "Fallback area resolved");
        area
    }

    /// Area to land on right after login.
    ///
    /// Read from the access token's claims; when they name no known role
    /// the server profile decides.
    pub async fn landing_area(&self, access_token: &str) -> Area {
        let from_claims = token::decode(access_token)
            .map(|claims| area_for(&claims.authorities()))
            .unwrap_or(Area::Login);
        if from_claims != Area::Login {
            return from_claims;
        }
        self.resolve().await
    }

    async fn refresh_and_retry(&self) -> Option<crate::session::Profile> {
        match self.session.store().get_refresh() {
            Ok(Some(_)) => {}
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Could not read refresh token");
                return None;
            }
        }

        if let Err(e) = self.session.refresh().await {
            warn!(error = %e, "Refresh failed during fallback resolution");
            return None;
        }

        match self.session.me().await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "Profile lookup failed after refresh");
                None
            }
        }
    }
}
