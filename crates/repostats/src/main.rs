use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use repostats::{config::AppConfig, router, AppState};
use repostats_core::Pipeline;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Repository dataset cleaning and statistics service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the cleaned dataset and analysis over HTTP
    Serve,
    /// Run the pipeline once and print the JSON payload
    Analyze,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => serve().await,
        Command::Analyze => {
            let pipeline = Pipeline::default();
            let response = pipeline.run().with_context(|| {
                format!("failed to analyse {}", pipeline.dataset_path().display())
            })?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
    }
}

async fn serve() -> Result<()> {
    let config = AppConfig::from_env()?;
    let pipeline = Pipeline::default();
    info!(dataset = %pipeline.dataset_path().display(), "serving repository statistics");

    let app = router(AppState::new(pipeline));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
