//! `request`: send an API request through the request authenticator.

use clap::Args;
use http::Method;

use campus_core::error::AppError;
use campus_core::result::AppResult;
use campus_core::types::ApiRequest;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for `request`
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// HTTP method, case-insensitive
    pub method: String,

    /// Path relative to the API base URL
    pub path: String,

    /// JSON request body
    #[arg(long)]
    pub body: Option<String>,
}

/// Send the request and print the response body.
pub async fn execute(ctx: &Context, args: &RequestArgs, format: OutputFormat) -> AppResult<()> {
    let request = build_request(args)?;
    let response = ctx.authenticator.send(request).await?;

    let body = serde_json::from_str::<serde_json::Value>(&response.body)
        .unwrap_or(serde_json::Value::String(response.body.clone()));
    match format {
        OutputFormat::Table => {
            output::print_kv("Status", response.status.as_str());
            println!(
                "{}",
                serde_json::to_string_pretty(&body).unwrap_or(response.body)
            );
        }
        OutputFormat::Json => output::print_item(&body, format),
    }
    Ok(())
}

fn build_request(args: &RequestArgs) -> AppResult<ApiRequest> {
    let method = Method::from_bytes(args.method.to_uppercase().as_bytes())
        .map_err(|_| AppError::validation(format!("Invalid HTTP method: '{}'", args.method)))?;
    let mut request = ApiRequest::new(method, &args.path);
    if let Some(body) = &args.body {
        let body = serde_json::from_str(body)
            .map_err(|e| AppError::validation(format!("Body is not valid JSON: {e}")))?;
        request = request.with_body(body);
    }
    Ok(request)
}
