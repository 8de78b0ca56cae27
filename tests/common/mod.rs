// tests/common/mod.rs
//! In-memory `NotionSource` used by the integration tests.

use std::collections::{HashMap, HashSet};
use studyhall::{
    AppError, Block, BlockId, DatabaseId, DatabaseQuery, NotionSource, Page, PageId, Paginated,
};

/// Serves pre-seeded block batches and database rows without any I/O.
///
/// Children are stored as explicit batches so tests can exercise the
/// pagination loop; a parent listed in `failing` errors on every fetch.
#[derive(Default)]
pub struct MockSource {
    children: HashMap<String, Vec<Vec<Block>>>,
    pages: HashMap<String, Page>,
    rows: Vec<Page>,
    failing: HashSet<String>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a parent's children as one batch.
    pub fn with_children(mut self, parent: &BlockId, blocks: Vec<Block>) -> Self {
        self.children.insert(parent.as_str().to_string(), vec![blocks]);
        self
    }

    /// Seeds a parent's children as multiple paginated batches.
    pub fn with_child_batches(mut self, parent: &BlockId, batches: Vec<Vec<Block>>) -> Self {
        self.children.insert(parent.as_str().to_string(), batches);
        self
    }

    /// Makes every children-fetch for this parent fail.
    pub fn with_failing(mut self, parent: &BlockId) -> Self {
        self.failing.insert(parent.as_str().to_string());
        self
    }

    /// Seeds a page for lookup by ID.
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.insert(page.id.as_str().to_string(), page);
        self
    }

    /// Seeds the rows returned by every database query.
    pub fn with_rows(mut self, rows: Vec<Page>) -> Self {
        self.rows = rows;
        self
    }
}

#[async_trait::async_trait]
impl NotionSource for MockSource {
    async fn list_children(
        &self,
        parent: &BlockId,
        cursor: Option<String>,
    ) -> Result<Paginated<Block>, AppError> {
        if self.failing.contains(parent.as_str()) {
            return Err(AppError::MalformedResponse(format!(
                "seeded failure for {}",
                parent.as_str()
            )));
        }

        let batches = self
            .children
            .get(parent.as_str())
            .cloned()
            .unwrap_or_default();
        let index: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
        let results = batches.get(index).cloned().unwrap_or_default();
        let has_more = index + 1 < batches.len();

        Ok(Paginated {
            results,
            has_more,
            next_cursor: has_more.then(|| (index + 1).to_string()),
        })
    }

    async fn get_page(&self, id: &PageId) -> Result<Page, AppError> {
        self.pages
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| AppError::MalformedResponse(format!("no such page {}", id.as_str())))
    }

    async fn query_database(
        &self,
        _database: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<Paginated<Page>, AppError> {
        let rows = self
            .rows
            .iter()
            .take(query.page_size)
            .cloned()
            .collect::<Vec<_>>();
        Ok(Paginated::complete(rows))
    }
}
