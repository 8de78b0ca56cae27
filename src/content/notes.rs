// src/content/notes.rs
//! Study notes: longer-form pages whose content is always the page body.

use super::knowledge::render_page_body;
use super::{build_query, Listing, QueryParams};
use crate::api::NotionSource;
use crate::error::AppError;
use crate::model::Page;
use crate::types::DatabaseId;
use futures::future::join_all;
use serde::Serialize;

/// A cleaned note; `content` is the rendered HTML of the page body.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub subject: Vec<String>,
    pub content: String,
    pub last_edited_time: Option<chrono::DateTime<chrono::Utc>>,
}

/// Lists notes matching the given subjects and title query, newest-edited
/// first. Every note's page body is fetched and rendered; bodies fetch
/// concurrently and reassemble in listing order.
pub async fn query_notes<S>(
    source: &S,
    database: &DatabaseId,
    params: &QueryParams,
) -> Result<Listing<Note>, AppError>
where
    S: NotionSource + ?Sized,
{
    let query = build_query(params, "Title");
    let page = source.query_database(database, &query).await?;

    let items = join_all(page.results.iter().map(|row| clean_note(source, row))).await;

    Ok(Listing {
        items,
        next_cursor: if page.has_more { page.next_cursor } else { None },
    })
}

async fn clean_note<S>(source: &S, page: &Page) -> Note
where
    S: NotionSource + ?Sized,
{
    Note {
        id: page.id.as_str().to_string(),
        slug: page
            .plain_text("Slug")
            .unwrap_or_else(|| page.id.as_str().to_string()),
        title: page
            .title_text("Title")
            .unwrap_or_else(|| "Untitled".to_string()),
        subject: page.multi_select_names("Subject"),
        content: render_page_body(source, page).await,
        last_edited_time: page.last_edited_time,
    }
}
