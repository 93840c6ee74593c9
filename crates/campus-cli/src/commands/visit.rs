//! `visit`: run route admission for a path.

use clap::Args;

use campus_auth::NavigationOutcome;
use campus_core::result::AppResult;

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for `visit`
#[derive(Debug, Args)]
pub struct VisitArgs {
    /// Route path, e.g. `/docentes/notas`
    pub path: String,
}

/// Navigate to the path and print where the session ends up.
pub async fn execute(ctx: &Context, args: &VisitArgs, format: OutputFormat) -> AppResult<()> {
    let outcome = ctx.router.navigate(&args.path).await?;

    match (format, &outcome) {
        (OutputFormat::Table, NavigationOutcome::Entered { path }) => {
            output::print_success(&format!("Admitted to {path}"));
        }
        (OutputFormat::Table, NavigationOutcome::Redirected { from, to }) => {
            output::print_warning(&format!("{from} is not available; redirected to {to}"));
        }
        (OutputFormat::Table, NavigationOutcome::Abandoned { path }) => {
            output::print_warning(&format!("Navigation to {path} was superseded"));
        }
        (OutputFormat::Json, _) => output::print_item(&outcome, format),
    }
    Ok(())
}
