//! monday.com board client.
//!
//! Fetches every item on a board over the GraphQL API, following the
//! `items_page` cursor until the server returns a null cursor. Both the
//! board id and the pagination cursor are passed as bound query variables,
//! never interpolated into the query text.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::task::COLUMN_IDS;

const API_VERSION: &str = "2023-07";

const FIRST_PAGE_QUERY: &str = r#"
query ($board_id: [ID!], $columns: [String!]) {
  boards (ids: $board_id) {
    items_page {
      cursor
      items {
        id
        name
        column_values (ids: $columns) { id text }
      }
    }
  }
}
"#;

const NEXT_PAGE_QUERY: &str = r#"
query ($cursor: String!, $columns: [String!]) {
  next_items_page (cursor: $cursor) {
    cursor
    items {
      id
      name
      column_values (ids: $columns) { id text }
    }
  }
}
"#;

// ─── Wire types (deserialize responses) ───────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct BoardsData {
    #[serde(default)]
    boards: Vec<Board>,
}

#[derive(Debug, Deserialize)]
struct Board {
    items_page: ItemsPage,
}

#[derive(Debug, Deserialize)]
struct NextPageData {
    next_items_page: ItemsPage,
}

/// One page of board items plus the cursor to the next page.
/// A null cursor means this was the last page.
#[derive(Debug, Deserialize)]
pub struct ItemsPage {
    pub cursor: Option<String>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A raw board item as returned by the API. Item ids arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub column_values: Vec<ColumnValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnValue {
    pub id: String,
    /// Display text of the column. The API sends JSON null for columns
    /// with no value.
    pub text: Option<String>,
}

impl BoardsData {
    fn into_page(self, board_id: i64) -> Result<ItemsPage> {
        self.boards
            .into_iter()
            .next()
            .map(|b| b.items_page)
            .ok_or_else(|| {
                SyncError::MalformedResponse(format!("board {board_id} missing from response"))
            })
    }
}

// ─── Client ───────────────────────────────────────────────────────────────────

pub struct BoardClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    board_id: i64,
}

impl BoardClient {
    /// No request timeout is configured; a hung request hangs the run.
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            board_id: config.board_id,
        }
    }

    /// Fetch every item on the board, in server order across all pages.
    pub async fn fetch_all_items(&self) -> Result<Vec<Item>> {
        let first: BoardsData = self
            .post_query(
                FIRST_PAGE_QUERY,
                serde_json::json!({
                    "board_id": [self.board_id],
                    "columns": COLUMN_IDS,
                }),
            )
            .await?;
        let page = first.into_page(self.board_id)?;
        debug!(
            items = page.items.len(),
            has_next = page.cursor.is_some(),
            "fetched first page"
        );

        let mut items = page.items;
        let mut cursor = page.cursor;
        while let Some(c) = cursor {
            let next: NextPageData = self
                .post_query(
                    NEXT_PAGE_QUERY,
                    serde_json::json!({
                        "cursor": c,
                        "columns": COLUMN_IDS,
                    }),
                )
                .await?;
            let page = next.next_items_page;
            debug!(
                items = page.items.len(),
                has_next = page.cursor.is_some(),
                "fetched next page"
            );
            items.extend(page.items);
            cursor = page.cursor;
        }

        Ok(items)
    }

    async fn post_query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let resp = self
            .client
            .post(&self.api_url)
            .header("Authorization", &self.api_key)
            .header("API-Version", API_VERSION)
            .json(&serde_json::json!({
                "query": query,
                "variables": variables,
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: GraphQlResponse<T> = resp.json().await.map_err(|e| {
            SyncError::MalformedResponse(format!("response body did not decode: {e}"))
        })?;
        into_data(body)
    }
}

fn into_data<T>(body: GraphQlResponse<T>) -> Result<T> {
    if !body.errors.is_empty() {
        return Err(SyncError::MalformedResponse(format!(
            "GraphQL errors: {}",
            serde_json::Value::Array(body.errors)
        )));
    }
    body.data
        .ok_or_else(|| SyncError::MalformedResponse("response missing data".to_string()))
}
