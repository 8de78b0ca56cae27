// src/api/mod.rs
//! Notion API interaction — retrieving pages, block children, and database
//! rows from a workspace.
//!
//! I/O, parsing, and tree assembly are kept separate: the HTTP client only
//! moves bytes, the parser only turns JSON into domain types, and the
//! fetcher only walks the tree.

pub mod client;
mod fetcher;
mod pagination;
pub mod parser;

use crate::error::AppError;
use crate::model::{Block, Page};
use crate::types::{BlockId, DatabaseId, PageId};
use serde::Serialize;

pub use client::NotionHttpClient;
pub use fetcher::fetch_content_tree;

/// One page of a paginated listing, in the order the source emitted it.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

impl<T> Paginated<T> {
    /// A single, final page of results.
    pub fn complete(results: Vec<T>) -> Self {
        Self {
            results,
            has_more: false,
            next_cursor: None,
        }
    }
}

/// Query sent to a database's query endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseQuery {
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<serde_json::Value>,
}

impl DatabaseQuery {
    /// Sort clause for "most recently edited first", the default ordering
    /// of every content listing.
    pub fn sorted_by_last_edited_desc(mut self) -> Self {
        self.sorts = vec![serde_json::json!({
            "timestamp": "last_edited_time",
            "direction": "descending",
        })];
        self
    }
}

/// The ability to retrieve content from a Notion workspace.
///
/// Business logic depends on this trait, never on HTTP details; tests
/// substitute in-memory sources.
#[async_trait::async_trait]
pub trait NotionSource: Send + Sync {
    /// One page of a block's ordered children.
    async fn list_children(
        &self,
        parent: &BlockId,
        cursor: Option<String>,
    ) -> Result<Paginated<Block>, AppError>;

    /// A page snapshot with its raw properties bag.
    async fn get_page(&self, id: &PageId) -> Result<Page, AppError>;

    /// One page of rows matching a database query.
    async fn query_database(
        &self,
        database: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<Paginated<Page>, AppError>;
}
