use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use jemallocator::Jemalloc;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use pool_history::{export, services, Aggregator, IndexedQuery, Services, Settings, SubgraphClient};

#[derive(Debug, Parser)]
#[command(name = "pool-history")]
#[command(about = "Export and query the event history of a token's main pool", long_about = None)]
struct Cli {
    /// Minimum log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a zip archive of the pool's recent history
    Export {
        /// Token address; its highest-TVL pool is exported
        #[arg(short, long)]
        token: String,

        /// Window length in days
        #[arg(short, long, default_value_t = 7)]
        days: u32,

        /// Output directory (defaults to export.output_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Ask a question about the pool, answered with generated SQL
    Ask {
        #[arg(short, long)]
        token: String,

        #[arg(short, long)]
        question: String,
    },
    /// Print yield-rate records
    Yields {
        /// Only records for this pool id
        #[arg(short, long)]
        pool: Option<String>,
    },
}

#[tokio::main()]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(cli.log_level)
        .init()
        .context("Failed to install logger")?;

    let settings = Settings::new()
        .context("Failed to load config. Please ensure config.yaml or POOL_HISTORY__ variables are set")?;

    let client: Arc<dyn IndexedQuery> = Arc::new(
        SubgraphClient::new(&settings.subgraph).context("Failed to build subgraph client")?,
    );
    let services = Services::from_settings(&settings).context("Failed to build services")?;

    let work = run(cli.command, &settings, client, &services);

    tokio::select! {
        result = work => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal (Ctrl+C), nothing was written");
            Ok(())
        },
    }
}

async fn run(
    command: Command,
    settings: &Settings,
    client: Arc<dyn IndexedQuery>,
    services: &Services,
) -> anyhow::Result<()> {
    match command {
        Command::Export { token, days, out } => {
            let aggregator = Aggregator::new(client, &settings.export);
            let archive = export::export(&aggregator, &token, days)
                .await
                .with_context(|| format!("Export failed for token {}", token))?;

            let dir = out.unwrap_or_else(|| PathBuf::from(&settings.export.output_dir));
            let path = archive
                .write_to_dir(&dir)
                .with_context(|| format!("Failed to write archive into {}", dir.display()))?;

            println!("{}", path.display());
        },
        Command::Ask { token, question } => {
            let outcome = services::ask(client.as_ref(), services, &token, &question)
                .await
                .context("Question could not be answered")?;

            info!("SQL: {}", outcome.sql);
            for row in &outcome.rows {
                println!("{}", row);
            }
        },
        Command::Yields { pool } => {
            let yields = services.require_yields()?;
            let records = yields
                .fetch(pool.as_deref())
                .await
                .context("Failed to fetch yield records")?;

            for record in &records {
                println!("{}", record);
            }
        },
    }

    Ok(())
}
