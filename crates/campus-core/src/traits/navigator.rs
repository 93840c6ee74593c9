//! Navigation sink driven by the session core's routing decisions.

/// Receives the paths the session core redirects to.
pub trait Navigator: Send + Sync + std::fmt::Debug + 'static {
    /// Navigate to the given route path.
    fn navigate(&self, path: &str);
}
