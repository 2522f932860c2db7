use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use boardsync::config::SyncConfig;

#[derive(Parser)]
#[command(
    name = "boardsync",
    about = "Sync tasks from a monday.com board into a local SQLite database",
    version
)]
struct Args {
    /// SQLite database file to sync into
    #[arg(long, env = "BOARDSYNC_DB")]
    db: Option<std::path::PathBuf>,

    /// Board to sync
    #[arg(long, env = "BOARDSYNC_BOARD_ID")]
    board_id: Option<i64>,

    /// monday.com GraphQL endpoint
    #[arg(long, env = "BOARDSYNC_API_URL")]
    api_url: Option<String>,

    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long, env = "BOARDSYNC_LOG")]
    log: Option<String>,

    /// Config file path (default: ./boardsync.toml)
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Init once — must happen before any tracing calls.
    let log_level = args.log.as_deref().unwrap_or("info").to_owned();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();

    let config = SyncConfig::new(args.api_url, args.board_id, args.db, args.config);
    boardsync::run(&config).await.context("sync failed")?;
    Ok(())
}
