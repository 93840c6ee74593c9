//! Session CLI commands: login, logout, whoami, status.

use chrono::Utc;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use campus_auth::token::{self, AuthoritySet};
use campus_core::error::AppError;
use campus_core::result::AppResult;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account e-mail; prompted for when omitted
    #[arg(long)]
    pub email: Option<String>,

    /// Password; prompted for when omitted
    #[arg(long)]
    pub password: Option<String>,
}

/// Token display row
#[derive(Debug, Serialize, Tabled)]
struct TokenRow {
    /// Token name
    token: &'static str,
    /// Whether it is stored
    stored: bool,
    /// Expiry from the claims
    expires_at: String,
    /// `yes`, `no`, or `unknown` for opaque tokens
    expired: &'static str,
}

#[derive(Debug, Serialize)]
struct LoginSummary {
    email: String,
    landing: String,
}

#[derive(Debug, Serialize)]
struct StatusSummary {
    authenticated: bool,
    authorities: AuthoritySet,
    area: String,
    tokens: Vec<TokenRow>,
}

/// Log in and report the landing area.
pub async fn login(ctx: &Context, args: &LoginArgs, format: OutputFormat) -> AppResult<()> {
    let email = match &args.email {
        Some(email) => email.clone(),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };
    let password = match &args.password {
        Some(password) => password.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let result = ctx.session.login(&email, &password).await?;
    let landing = ctx.fallback.landing_area(&result.access_token).await;

    match format {
        OutputFormat::Table => {
            output::print_success(&format!("Logged in as {email}"));
            output::print_kv("Landing area", landing.path());
        }
        OutputFormat::Json => output::print_item(
            &LoginSummary {
                email,
                landing: landing.path().to_string(),
            },
            format,
        ),
    }
    Ok(())
}

/// Clear the stored session.
pub fn logout(ctx: &Context) -> AppResult<()> {
    ctx.session.logout()?;
    output::print_success("Logged out");
    Ok(())
}

/// Print the server profile of the current user.
pub async fn whoami(ctx: &Context, format: OutputFormat) -> AppResult<()> {
    let profile = ctx.session.me().await?;
    output::print_item(&profile, format);
    if format == OutputFormat::Table {
        output::print_kv("Area", profile.authorities().area().path());
    }
    Ok(())
}

/// Print the stored tokens without contacting the server.
pub fn status(ctx: &Context, format: OutputFormat) -> AppResult<()> {
    let credentials = ctx.session.store().credentials()?;
    let authorities = credentials
        .access_token
        .as_deref()
        .and_then(|t| token::decode(t).ok())
        .map(|claims| claims.authorities())
        .unwrap_or_default();

    let tokens = vec![
        token_row("access", credentials.access_token.as_deref()),
        token_row("refresh", credentials.refresh_token.as_deref()),
    ];
    let summary = StatusSummary {
        authenticated: ctx.session.is_authenticated(),
        area: authorities.area().path().to_string(),
        authorities,
        tokens,
    };

    match format {
        OutputFormat::Table => {
            output::print_kv("Authenticated", &summary.authenticated.to_string());
            output::print_kv("Authorities", &summary.authorities.entries().join(", "));
            output::print_kv("Area", &summary.area);
            output::print_list(&summary.tokens, format);
            if !summary.authenticated {
                output::print_warning("No active session; run `campus login`");
            }
        }
        OutputFormat::Json => output::print_item(&summary, format),
    }
    Ok(())
}

fn token_row(name: &'static str, value: Option<&str>) -> TokenRow {
    let claims = value.and_then(|t| token::decode(t).ok());
    let expires_at = claims
        .as_ref()
        .and_then(|claims| claims.expires_at())
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string());
    let expired = match (value, &claims) {
        (None, _) => "yes",
        (Some(_), None) => "unknown",
        (Some(_), Some(claims)) if claims.is_expired_at(Utc::now().timestamp()) => "yes",
        (Some(_), Some(_)) => "no",
    };

    TokenRow {
        token: name,
        stored: value.is_some(),
        expires_at,
        expired,
    }
}
