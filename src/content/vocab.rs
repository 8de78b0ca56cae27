// src/content/vocab.rs
//! Vocabulary entries: word, pronunciation, part of speech, usage.

use super::{build_query, pick_random, Listing, QueryParams};
use crate::api::NotionSource;
use crate::constants::RANDOM_SAMPLE_SIZE;
use crate::error::AppError;
use crate::html::render_runs;
use crate::model::Page;
use crate::types::DatabaseId;
use serde::Serialize;

/// A cleaned vocabulary entry; definition and examples are HTML fragments.
#[derive(Debug, Clone, Serialize)]
pub struct VocabEntry {
    pub id: String,
    pub slug: String,
    pub word: String,
    pub pronunciation: String,
    pub pos: String,
    pub definition: String,
    pub examples: String,
}

/// Lists vocabulary entries matching the title query, newest-edited first.
pub async fn query_vocab<S>(
    source: &S,
    database: &DatabaseId,
    params: &QueryParams,
) -> Result<Listing<VocabEntry>, AppError>
where
    S: NotionSource + ?Sized,
{
    // The vocab database titles rows by "Word", not "Title".
    let query = build_query(params, "Word");
    let page = source.query_database(database, &query).await?;

    let items = page.results.iter().map(clean_entry).collect();

    Ok(Listing {
        items,
        next_cursor: if page.has_more { page.next_cursor } else { None },
    })
}

/// Picks one entry at random from a recent batch.
pub async fn random_vocab<S>(
    source: &S,
    database: &DatabaseId,
) -> Result<Option<VocabEntry>, AppError>
where
    S: NotionSource + ?Sized,
{
    let params = QueryParams::with_limit(RANDOM_SAMPLE_SIZE);
    let listing = query_vocab(source, database, &params).await?;
    Ok(pick_random(listing.items))
}

fn clean_entry(page: &Page) -> VocabEntry {
    VocabEntry {
        id: page.id.as_str().to_string(),
        slug: page
            .plain_text("Slug")
            .unwrap_or_else(|| page.id.as_str().to_string()),
        word: page
            .title_text("Word")
            .unwrap_or_else(|| "Untitled".to_string()),
        pronunciation: page.plain_text("Pronunciation").unwrap_or_default(),
        pos: page.select_name("POS").unwrap_or_default(),
        definition: render_runs(&page.rich_text("Definition")),
        examples: render_runs(&page.rich_text("Examples")),
    }
}
