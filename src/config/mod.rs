use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_API_KEY: &str = "API_KEY";
const DEFAULT_API_URL: &str = "https://api.monday.com/v2/";
const DEFAULT_BOARD_ID: i64 = 1385666653;
const DEFAULT_DB_PATH: &str = "tasks.db";
const CONFIG_FILE: &str = "boardsync.toml";

// ─── TOML config file ─────────────────────────────────────────────────────────

/// `./boardsync.toml` — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// monday.com API key. Prefer the MONDAY_API_KEY env var for secrets.
    api_key: Option<String>,
    /// GraphQL endpoint (default: https://api.monday.com/v2/).
    api_url: Option<String>,
    /// Board to sync (default: 1385666653).
    board_id: Option<i64>,
    /// SQLite database file (default: tasks.db).
    db_path: Option<PathBuf>,
}

fn load_toml(path: &Path) -> Option<TomlConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config file — using defaults");
            None
        }
    }
}

// ─── SyncConfig ───────────────────────────────────────────────────────────────

/// Resolved configuration handed to the board client and storage at
/// construction. Nothing reads the process environment after this point.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Authorization credential sent on every API request
    /// (MONDAY_API_KEY env var; placeholder "API_KEY" when unset).
    pub api_key: String,
    /// monday.com GraphQL endpoint.
    pub api_url: String,
    /// Board whose items are synced.
    pub board_id: i64,
    /// SQLite database file the tasks table lives in.
    pub db_path: PathBuf,
}

impl SyncConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file (`--config` path, or ./boardsync.toml)
    ///   3. Built-in defaults
    pub fn new(
        api_url: Option<String>,
        board_id: Option<i64>,
        db_path: Option<PathBuf>,
        config_file: Option<PathBuf>,
    ) -> Self {
        let config_file = config_file.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        let toml = load_toml(&config_file).unwrap_or_default();

        let api_key = resolve_api_key(
            std::env::var("MONDAY_API_KEY").ok().filter(|k| !k.is_empty()),
            toml.api_key,
        );
        let api_url = api_url
            .or(toml.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let board_id = board_id.or(toml.board_id).unwrap_or(DEFAULT_BOARD_ID);
        let db_path = db_path
            .or(toml.db_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        Self {
            api_key,
            api_url,
            board_id,
            db_path,
        }
    }
}

fn resolve_api_key(env_key: Option<String>, toml_key: Option<String>) -> String {
    env_key
        .or(toml_key)
        .unwrap_or_else(|| DEFAULT_API_KEY.to_string())
}
