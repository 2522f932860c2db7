use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::task::Task;

/// A row from the `tasks` table. `date` is stored as ISO `YYYY-MM-DD` text.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TaskRow {
    pub id: i64,
    pub name: String,
    pub label: String,
    pub priority_text: String,
    pub people: String,
    pub date: Option<String>,
    pub project_status: String,
    pub effort: Option<i64>,
    pub relevant: bool,
}

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open (creating if missing) the database file and ensure the `tasks`
    /// table exists. Safe to invoke every run.
    pub async fn new(db_path: &Path) -> Result<Self> {
        let opts =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", db_path.display()))?
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .create_if_missing(true);
        let pool = SqlitePool::connect_with(opts).await?;
        Self::create_tables(&pool).await?;
        Ok(Self { pool })
    }

    async fn create_tables(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tasks (
                 id INTEGER PRIMARY KEY,
                 name TEXT NOT NULL,
                 label TEXT NOT NULL,
                 priority_text TEXT NOT NULL,
                 people TEXT NOT NULL,
                 date DATE,
                 project_status TEXT NOT NULL,
                 effort INTEGER,
                 relevant BOOLEAN NOT NULL
             )",
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Insert the task, or overwrite every non-key column if the id already
    /// exists (last-write-wins). Autocommit — each row is durable on its own.
    pub async fn upsert_task(&self, task: &Task) -> Result<()> {
        sqlx::query(
            "INSERT INTO tasks (id, name, label, priority_text, people, date, project_status, effort, relevant)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
               name = excluded.name,
               label = excluded.label,
               priority_text = excluded.priority_text,
               people = excluded.people,
               date = excluded.date,
               project_status = excluded.project_status,
               effort = excluded.effort,
               relevant = excluded.relevant",
        )
        .bind(task.id)
        .bind(&task.name)
        .bind(&task.label)
        .bind(&task.priority_text)
        .bind(&task.people)
        .bind(task.date.map(|d| d.format("%Y-%m-%d").to_string()))
        .bind(&task.project_status)
        .bind(task.effort)
        .bind(task.relevant)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_task(&self, id: i64) -> Result<Option<TaskRow>> {
        Ok(sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn list_tasks(&self) -> Result<Vec<TaskRow>> {
        Ok(sqlx::query_as("SELECT * FROM tasks ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn count_tasks(&self) -> Result<u64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0 as u64)
    }

    /// Close the connection pool after the final upsert.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
