mod scheduler;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use newsfeed_core::{AppConfig, EnvSecretStore};
use newsfeed_newsapi::NewsApiClient;
use newsfeed_pipeline::{NewsPipeline, PipelineSettings};
use newsfeed_storage::ObjectStoreUploader;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newsfeed")]
#[command(about = "Fetch news articles, store them as Parquet, and upload to object storage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the pipeline once and print the storage URI.
    Run {
        /// Search query (defaults to `NEWSFEED_DEFAULT_QUERY`).
        #[arg(long)]
        query: Option<String>,
        /// Days of history to search (defaults to `NEWSFEED_DEFAULT_DAYS_BACK`).
        #[arg(long)]
        days_back: Option<u32>,
    },
    /// Run the pipeline on a cron schedule until interrupted.
    Schedule {
        /// Six-field cron expression (defaults to `NEWSFEED_SCHEDULE_CRON`).
        #[arg(long)]
        cron: Option<String>,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        days_back: Option<u32>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = newsfeed_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pipeline = Arc::new(build_pipeline(&config)?);

    match cli.command {
        Commands::Run { query, days_back } => {
            let query = query.unwrap_or_else(|| config.default_query.clone());
            let days_back = days_back.unwrap_or(config.default_days_back);

            match pipeline.run(&query, days_back).await? {
                Some(uri) => println!("{uri}"),
                None => println!("no articles found for '{query}'; nothing uploaded"),
            }
        }
        Commands::Schedule {
            cron,
            query,
            days_back,
        } => {
            let job = scheduler::ScheduledRun {
                cron: cron.unwrap_or_else(|| config.schedule_cron.clone()),
                query: query.unwrap_or_else(|| config.default_query.clone()),
                days_back: days_back.unwrap_or(config.default_days_back),
            };
            let mut scheduler = scheduler::build_scheduler(pipeline, job).await?;

            shutdown_signal().await;
            scheduler.shutdown().await?;
        }
    }

    Ok(())
}

fn build_pipeline(config: &AppConfig) -> anyhow::Result<NewsPipeline> {
    tracing::debug!(?config, "building pipeline");
    let source = NewsApiClient::from_config(config)?;
    Ok(NewsPipeline::new(
        Arc::new(EnvSecretStore),
        Arc::new(source),
        Arc::new(ObjectStoreUploader::from_config(config)),
        PipelineSettings::from_config(config),
    ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}
