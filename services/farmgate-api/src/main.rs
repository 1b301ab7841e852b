//! Farmgate API server.
//!
//! Commands:
//! - `farmgate-api serve` - Run the HTTP server
//! - `farmgate-api seed` - Insert the starter categories

mod dto;
mod error;
mod extract;
mod routes;
mod seed;
mod state;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use farmgate_auth::{JwksVerifier, KindeClient, NoProfiles, ProfileProvider};
use farmgate_db::Store;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Farmgate - marketplace API for farm products
#[derive(Parser)]
#[command(name = "farmgate-api")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Insert the starter categories
    Seed(SeedArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "FARMGATE_BIND", default_value = "0.0.0.0:4000")]
    bind: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Hosted identity issuer, e.g. https://tenant.kinde.com
    #[arg(long, env = "KINDE_ISSUER_URL")]
    kinde_issuer_url: String,

    /// Management-API client id (optional; owner profiles degrade without it)
    #[arg(long, env = "KINDE_M2M_CLIENT_ID")]
    kinde_client_id: Option<String>,

    /// Management-API client secret
    #[arg(long, env = "KINDE_M2M_CLIENT_SECRET")]
    kinde_client_secret: Option<String>,
}

#[derive(Args)]
struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Seed(args) => run_seed(args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let store = Store::connect(&args.database_url)
        .await
        .context("failed to connect to database")?;
    store.migrate().await.context("failed to run migrations")?;

    let profiles: Arc<dyn ProfileProvider> =
        match (args.kinde_client_id, args.kinde_client_secret) {
            (Some(client_id), Some(client_secret)) => Arc::new(KindeClient::new(
                &args.kinde_issuer_url,
                client_id,
                client_secret,
            )),
            _ => {
                tracing::warn!(
                    "no management-API credentials; owner profiles will be unavailable"
                );
                Arc::new(NoProfiles)
            }
        };

    let state = AppState {
        store,
        verifier: Arc::new(JwksVerifier::new(&args.kinde_issuer_url)),
        profiles,
    };

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    tracing::info!(addr = %args.bind, "farmgate API listening");

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}

async fn run_seed(args: SeedArgs) -> Result<()> {
    let store = Store::connect(&args.database_url)
        .await
        .context("failed to connect to database")?;
    store.migrate().await.context("failed to run migrations")?;

    let inserted = seed::seed_categories(&store).await?;
    tracing::info!(inserted, "seeding complete");
    Ok(())
}
