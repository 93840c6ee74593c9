//! Cancellable navigation over the route table.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use campus_core::config::session::AuthoritySource;
use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_core::traits::Navigator;

use crate::guard::{GuardChain, GuardOutcome};
use crate::session::SessionService;

use super::fallback::FallbackRouter;
use super::routes::{RouteMatch, RouteTable};

/// Redirects followed before a navigation is abandoned as a loop.
const MAX_HOPS: usize = 8;

/// How a navigation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// The requested path was entered.
    Entered { path: String },
    /// A different path was entered.
    Redirected { from: String, to: String },
    /// A newer navigation superseded this one; nothing was committed.
    Abandoned { path: String },
}

impl NavigationOutcome {
    /// The committed path, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Entered { path } => Some(path),
            Self::Redirected { to, .. } => Some(to),
            Self::Abandoned { .. } => None,
        }
    }
}

/// Runs redirects, guards and the fallback for a path, then commits the
/// result to the navigator.
///
/// Starting a navigation cancels the one still pending, which then commits
/// nothing.
#[derive(Debug)]
pub struct Router {
    routes: RouteTable,
    session: Arc<SessionService>,
    fallback: FallbackRouter,
    navigator: Arc<dyn Navigator>,
    authority_source: AuthoritySource,
    pending: Mutex<CancellationToken>,
}

impl Router {
    pub fn new(
        session: Arc<SessionService>,
        navigator: Arc<dyn Navigator>,
        authority_source: AuthoritySource,
    ) -> Self {
        Self {
            routes: RouteTable::new(),
            fallback: FallbackRouter::new(session.clone()),
            session,
            navigator,
            authority_source,
            pending: Mutex::new(CancellationToken::new()),
        }
    }

    /// Navigate to `path`.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Internal` when redirects do not settle within a
    /// fixed number of hops.
    pub async fn navigate(&self, path: &str) -> AppResult<NavigationOutcome> {
        let cancel = self.begin()?;
        let mut current = path.to_string();

        for _ in 0..MAX_HOPS {
            let next = match self.routes.resolve(&current) {
                RouteMatch::Public => None,
                RouteMatch::Redirect(target) => Some(target),
                RouteMatch::Fallback => {
                    let area = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Ok(abandoned(path)),
                        area = self.fallback.resolve() => area,
                    };
                    Some(area.path().to_string())
                }
                RouteMatch::Guarded(kinds) => {
                    let chain = GuardChain::for_kinds(&kinds, &self.session, self.authority_source);
                    match chain.evaluate(&cancel).await {
                        GuardOutcome::Allow => None,
                        GuardOutcome::RedirectTo(area) => Some(area.path().to_string()),
                        GuardOutcome::Deny => return Ok(abandoned(path)),
                    }
                }
            };

            match next {
                Some(target) => {
                    debug!(from = %current, to = %target, "Redirect");
                    current = target;
                }
                None => return self.commit(&cancel, path, current),
            }
        }

        Err(AppError::internal(format!(
            "Navigation to '{path}' did not settle after {MAX_HOPS} redirects"
        )))
    }

    /// Cancel any pending navigation and start a new one.
    fn begin(&self) -> AppResult<CancellationToken> {
        let mut pending = self
            .pending
            .lock()
            .map_err(|_| AppError::internal("Navigation state poisoned"))?;
        pending.cancel();
        *pending = CancellationToken::new();
        Ok(pending.clone())
    }

    fn commit(
        &self,
        cancel: &CancellationToken,
        requested: &str,
        target: String,
    ) -> AppResult<NavigationOutcome> {
        let _pending = self
            .pending
            .lock()
            .map_err(|_| AppError::internal("Navigation state poisoned"))?;
        if cancel.is_cancelled() {
            return Ok(abandoned(requested));
        }

        self.navigator.navigate(&target);
        info!(path = %target, "Navigation committed");
        if target == requested {
            Ok(NavigationOutcome::Entered { path: target })
        } else {
            Ok(NavigationOutcome::Redirected {
                from: requested.to_string(),
                to: target,
            })
        }
    }
}

fn abandoned(path: &str) -> NavigationOutcome {
    debug!(path, "Navigation superseded");
    NavigationOutcome::Abandoned {
        path: path.to_string(),
    }
}
