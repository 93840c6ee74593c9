//! Unified application error types for Campus.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The [`ErrorKind`] taxonomy keeps
//! "stale credentials" (401) apart from "wrong privilege" (403), which the
//! request authenticator relies on.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A token could not be decoded into claims.
    MalformedToken,
    /// A token's `exp` claim is missing or not in the future.
    Expired,
    /// The server rejected the credentials (HTTP 401).
    Unauthorized,
    /// The credentials are valid but lack the privilege (HTTP 403).
    Forbidden,
    /// The refresh endpoint rejected the exchange or could not be reached.
    RefreshFailed,
    /// A refresh was requested but no refresh token is stored.
    NoRefreshToken,
    /// Any other non-success HTTP status.
    Http,
    /// The request never produced a response (connection, timeout, TLS).
    Transport,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The credential store could not be read or written.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// Input validation failed.
    Validation,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedToken => write!(f, "MALFORMED_TOKEN"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::RefreshFailed => write!(f, "REFRESH_FAILED"),
            Self::NoRefreshToken => write!(f, "NO_REFRESH_TOKEN"),
            Self::Http => write!(f, "HTTP"),
            Self::Transport => write!(f, "TRANSPORT"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Campus.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// HTTP status that produced this error, when it came from a response.
    pub status: Option<u16>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach the HTTP status that produced this error.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Map a non-success HTTP response into an error.
    ///
    /// The message is taken from the server's `message`, `error` or `detail`
    /// JSON field when present, otherwise from the raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            _ => ErrorKind::Http,
        };
        let message = server_message(body).unwrap_or_else(|| format!("HTTP {status}"));
        Self::new(kind, message).with_status(status)
    }

    /// Create a malformed-token error.
    pub fn malformed_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedToken, message)
    }

    /// Create an expired-token error.
    pub fn expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Expired, message)
    }

    /// Create a refresh-failure error wrapping the cause.
    pub fn refresh_failed(cause: AppError) -> Self {
        let status = cause.status;
        Self {
            kind: ErrorKind::RefreshFailed,
            message: format!("Token refresh failed: {}", cause.message),
            status,
            source: Some(Box::new(cause)),
        }
    }

    /// Create a missing-refresh-token error.
    pub fn no_refresh_token() -> Self {
        Self::new(ErrorKind::NoRefreshToken, "No refresh token stored")
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error is an HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    /// Whether this error is an HTTP 403.
    pub fn is_forbidden(&self) -> bool {
        self.kind == ErrorKind::Forbidden
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            status: self.status,
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => ["message", "error", "detail"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
            .map(String::from),
        Err(_) => Some(trimmed.to_string()),
    }
}
