//! Ordered guard composition with cancellation.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use campus_core::config::session::AuthoritySource;

use crate::session::SessionService;

use super::outcome::{GuardKind, GuardOutcome};
use super::route_guard::RouteGuard;

/// Guards applied in sequence to one route.
///
/// Each guard runs only once the previous one allowed; the first
/// non-`Allow` outcome is final.
#[derive(Debug, Clone, Default)]
pub struct GuardChain {
    guards: Vec<RouteGuard>,
}

impl GuardChain {
    /// An empty chain admits everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain for `kinds` sharing one session and authority source.
    pub fn for_kinds(
        kinds: &[GuardKind],
        session: &Arc<SessionService>,
        source: AuthoritySource,
    ) -> Self {
        kinds
            .iter()
            .fold(Self::new(), |chain, kind| {
                chain.with(RouteGuard::new(*kind, session.clone(), source))
            })
    }

    /// Append a guard.
    pub fn with(mut self, guard: RouteGuard) -> Self {
        self.guards.push(guard);
        self
    }

    /// Kinds of the guards in order.
    pub fn kinds(&self) -> Vec<GuardKind> {
        self.guards.iter().map(RouteGuard::kind).collect()
    }

    /// Evaluate the chain. Yields [`GuardOutcome::Deny`] once `cancel` fires.
    pub async fn evaluate(&self, cancel: &CancellationToken) -> GuardOutcome {
        for guard in &self.guards {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => GuardOutcome::Deny,
                outcome = guard.check() => outcome,
            };
            debug!(guard = %guard.kind(), ?outcome, "Guard evaluated");
            if !outcome.is_allowed() {
                return outcome;
            }
        }
        GuardOutcome::Allow
    }
}
