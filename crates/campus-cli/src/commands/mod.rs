//! CLI command definitions and dispatch.

pub mod request;
pub mod session;
pub mod visit;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use campus_auth::{
    FallbackRouter, NavigationHistory, ReqwestTransport, RequestAuthenticator, Router,
    SessionService, SessionStore,
};
use campus_core::config::AppConfig;
use campus_core::result::AppResult;
use campus_core::traits::HttpTransport;
use campus_store::StoreManager;

use crate::output::OutputFormat;

/// Campus: session client for the academic-management API
#[derive(Debug, Parser)]
#[command(name = "campus", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file, extension optional
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from `config/<env>`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the token pair
    Login(session::LoginArgs),
    /// Clear the stored session
    Logout,
    /// Show the server profile of the current user
    Whoami,
    /// Show the stored tokens and their expiry
    Status,
    /// Run route admission for a path
    Visit(visit::VisitArgs),
    /// Send an authenticated API request
    Request(request::RequestArgs),
}

impl Cli {
    /// Load the configuration named by `--config` and `--env`.
    pub fn load_config(&self) -> AppResult<AppConfig> {
        AppConfig::load_from(&self.config, &self.env)
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        let ctx = Context::build(&config)?;
        match &self.command {
            Commands::Login(args) => session::login(&ctx, args, self.format).await,
            Commands::Logout => session::logout(&ctx),
            Commands::Whoami => session::whoami(&ctx, self.format).await,
            Commands::Status => session::status(&ctx, self.format),
            Commands::Visit(args) => visit::execute(&ctx, args, self.format).await,
            Commands::Request(args) => request::execute(&ctx, args, self.format).await,
        }
    }
}

/// Session core wired from configuration.
#[derive(Debug)]
pub struct Context {
    /// Session service.
    pub session: Arc<SessionService>,
    /// Authenticated request sender.
    pub authenticator: RequestAuthenticator,
    /// Guarded navigation.
    pub router: Router,
    /// Role-to-area resolution.
    pub fallback: FallbackRouter,
}

impl Context {
    /// Build the store, transport and session core.
    pub fn build(config: &AppConfig) -> AppResult<Self> {
        let store = StoreManager::new(&config.storage)?;
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(&config.api)?);
        Ok(Self::with_parts(config, Arc::new(store), transport))
    }

    /// Build from an existing store and transport.
    pub fn with_parts(
        config: &AppConfig,
        store: Arc<StoreManager>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let history = Arc::new(NavigationHistory::new());
        let session = Arc::new(SessionService::new(
            transport.clone(),
            SessionStore::new(store),
            history.clone(),
            config.api.clone(),
        ));
        let authenticator = RequestAuthenticator::new(session.clone(), transport, &config.session);
        let router = Router::new(
            session.clone(),
            history.clone(),
            config.session.authority_source,
        );
        let fallback = FallbackRouter::new(session.clone());

        Self {
            session,
            authenticator,
            router,
            fallback,
        }
    }
}
