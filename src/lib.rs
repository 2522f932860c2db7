pub mod board;
pub mod config;
pub mod error;
pub mod storage;
pub mod task;

use tracing::info;

use board::BoardClient;
use config::SyncConfig;
use error::Result;
use storage::Storage;
use task::tasks_from_items;

/// Run one full sync: fetch every page of board items, normalize them,
/// and upsert each task into the database. Any failure aborts the run.
pub async fn run(config: &SyncConfig) -> Result<()> {
    let client = BoardClient::new(config);
    let items = client.fetch_all_items().await?;
    let tasks = tasks_from_items(&items)?;

    let storage = Storage::new(&config.db_path).await?;
    for task in &tasks {
        storage.upsert_task(task).await?;
    }
    storage.close().await;

    info!(
        board_id = config.board_id,
        tasks = tasks.len(),
        db = %config.db_path.display(),
        "sync complete"
    );
    Ok(())
}
