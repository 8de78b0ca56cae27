// src/content/knowledge.rs
//! Knowledge cards: the flashcard-style study content.
//!
//! Each database row cleans into a [`KnowledgeCard`] whose text fields are
//! already HTML. The `detail` field prefers the `Detail` rich-text
//! property; when that is empty the card's detail is assumed to live in
//! the page body and is rendered from its block tree.

use super::{build_query, pick_random, Listing, QueryParams};
use crate::api::{fetch_content_tree, NotionSource};
use crate::constants::{DETAIL_FETCH_DEPTH, RANDOM_SAMPLE_SIZE};
use crate::error::AppError;
use crate::html::{render_blocks, render_runs};
use crate::model::Page;
use crate::types::DatabaseId;
use futures::future::join_all;
use serde::Serialize;

/// A cleaned knowledge card; every text field is an HTML fragment.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeCard {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub subject: Vec<String>,
    pub quick: String,
    pub definition: String,
    pub detail: String,
    pub pitfalls: String,
    pub examples: String,
    pub last_edited_time: Option<chrono::DateTime<chrono::Utc>>,
}

/// Lists knowledge cards matching the given subjects and title query,
/// newest-edited first.
pub async fn query_knowledge<S>(
    source: &S,
    database: &DatabaseId,
    params: &QueryParams,
) -> Result<Listing<KnowledgeCard>, AppError>
where
    S: NotionSource + ?Sized,
{
    let query = build_query(params, "Title");
    let page = source.query_database(database, &query).await?;

    log::debug!(
        "Knowledge query returned {} rows (has_more: {})",
        page.results.len(),
        page.has_more
    );

    // Cleans run concurrently because a card without a Detail property
    // fetches its page body; join_all keeps the listing order.
    let items = join_all(page.results.iter().map(|row| clean_card(source, row))).await;

    Ok(Listing {
        items,
        next_cursor: if page.has_more { page.next_cursor } else { None },
    })
}

/// Picks one card at random from a recent batch, or `None` when the
/// database has no matching rows.
pub async fn random_knowledge<S>(
    source: &S,
    database: &DatabaseId,
    subjects: Vec<String>,
) -> Result<Option<KnowledgeCard>, AppError>
where
    S: NotionSource + ?Sized,
{
    let params = QueryParams {
        subjects,
        ..QueryParams::with_limit(RANDOM_SAMPLE_SIZE)
    };
    let listing = query_knowledge(source, database, &params).await?;
    Ok(pick_random(listing.items))
}

async fn clean_card<S>(source: &S, page: &Page) -> KnowledgeCard
where
    S: NotionSource + ?Sized,
{
    let detail_runs = page.rich_text("Detail");
    let detail = if detail_runs.is_empty() {
        render_page_body(source, page).await
    } else {
        render_runs(&detail_runs)
    };

    KnowledgeCard {
        id: page.id.as_str().to_string(),
        slug: page
            .plain_text("Slug")
            .unwrap_or_else(|| page.id.as_str().to_string()),
        title: page
            .title_text("Title")
            .unwrap_or_else(|| "Untitled".to_string()),
        subject: page.multi_select_names("Subject"),
        quick: render_runs(&page.rich_text("Quick")),
        definition: render_runs(&page.rich_text("Definition")),
        detail,
        pitfalls: render_runs(&page.rich_text("Pitfalls")),
        examples: render_runs(&page.rich_text("Examples")),
        last_edited_time: page.last_edited_time,
    }
}

/// Renders a page's own blocks as the detail HTML; a failed fetch leaves
/// the detail empty rather than failing the whole listing.
pub(super) async fn render_page_body<S>(source: &S, page: &Page) -> String
where
    S: NotionSource + ?Sized,
{
    match fetch_content_tree(source, &page.id.cast(), DETAIL_FETCH_DEPTH).await {
        Ok(blocks) => render_blocks(&blocks),
        Err(e) => {
            log::warn!("Body render for page {} skipped: {}", page.id.as_str(), e);
            String::new()
        }
    }
}
