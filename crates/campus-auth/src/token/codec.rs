//! Structural decoding of compact `header.payload.signature` tokens.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;

use campus_core::error::AppError;
use campus_core::result::AppResult;

use super::claims::Claims;

/// Decode the payload segment of a compact token into [`Claims`].
///
/// The token must have exactly three dot-separated segments. The payload
/// may be base64url or standard base64, with or without padding; the
/// signature segment is not inspected and may be empty.
///
/// # Errors
///
/// Returns `ErrorKind::MalformedToken` if the structure, the base64 or the
/// JSON payload is invalid.
pub fn decode(token: &str) -> AppResult<Claims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(AppError::malformed_token(format!(
            "expected 3 segments, got {}",
            segments.len()
        )));
    }

    let payload = segments[1];
    if payload.is_empty() {
        return Err(AppError::malformed_token("empty payload segment"));
    }

    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|e| AppError::malformed_token(format!("payload is not base64: {e}")))?;

    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::malformed_token(format!("payload is not JSON: {e}")))?;
    if !value.is_object() {
        return Err(AppError::malformed_token("payload is not a JSON object"));
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::malformed_token(format!("payload has invalid claims: {e}")))
}

/// Decode `token` and require it to be live at `now` (seconds since epoch).
///
/// # Errors
///
/// `ErrorKind::Expired` when the token is absent, carries no usable `exp`,
/// or `exp <= now`; `ErrorKind::MalformedToken` when it cannot be decoded.
pub fn ensure_live_at(token: Option<&str>, now: i64) -> AppResult<Claims> {
    let token = token.ok_or_else(|| AppError::expired("no access token stored"))?;
    let claims = decode(token)?;
    if claims.is_expired_at(now) {
        return Err(AppError::expired(match claims.exp {
            Some(exp) if exp.is_finite() => format!("token expired at {exp}"),
            _ => "token carries no expiry".to_string(),
        }));
    }
    Ok(claims)
}

/// [`ensure_live_at`] against the wall clock. No clock skew is allowed.
pub fn ensure_live(token: Option<&str>) -> AppResult<Claims> {
    ensure_live_at(token, Utc::now().timestamp())
}

/// Whether `token` is absent, malformed, or expired at `now` (seconds since epoch).
pub fn is_expired_at(token: Option<&str>, now: i64) -> bool {
    ensure_live_at(token, now).is_err()
}

/// Whether `token` is absent, malformed, or expired now. No clock skew is allowed.
pub fn is_expired(token: Option<&str>) -> bool {
    ensure_live(token).is_err()
}
