// src/content/mod.rs
//! Read-only content queries over the study databases.
//!
//! Each module mirrors one database (knowledge cards, vocabulary, notes):
//! it builds a Notion filter from the caller's parameters, pages through
//! the query endpoint, and cleans each row into a serializable item with
//! all rich text already rendered to HTML.

pub mod fuzzy;
pub mod knowledge;
pub mod notes;
pub mod vocab;

use crate::api::DatabaseQuery;
use crate::constants::QUERY_PAGE_SIZE_CEILING;
use serde::Serialize;
use serde_json::json;

/// Common listing parameters accepted by every content query.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// Restrict to rows whose Subject multi-select contains any of these.
    pub subjects: Vec<String>,
    /// Substring match against the title property.
    pub q: Option<String>,
    /// Requested row count; clamped to the API's query ceiling.
    pub limit: usize,
    /// Opaque continuation cursor from a previous listing.
    pub cursor: Option<String>,
}

impl QueryParams {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }
}

/// One page of cleaned content items plus the continuation cursor.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

impl<T> Listing<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }
}

/// Builds the database query shared by the content listings: subject OR
/// clauses, title substring match, newest-edited first.
fn build_query(params: &QueryParams, title_property: &str) -> DatabaseQuery {
    let mut clauses: Vec<serde_json::Value> = Vec::new();

    if !params.subjects.is_empty() {
        // The API has no multi-select "contains any" condition; expand the
        // subjects into an or-group.
        let or_group: Vec<_> = params
            .subjects
            .iter()
            .map(|s| json!({ "property": "Subject", "multi_select": { "contains": s } }))
            .collect();
        clauses.push(json!({ "or": or_group }));
    }

    if let Some(q) = params.q.as_deref().filter(|q| !q.is_empty()) {
        clauses.push(json!({ "property": title_property, "title": { "contains": q } }));
    }

    DatabaseQuery {
        page_size: params.limit.clamp(1, QUERY_PAGE_SIZE_CEILING),
        start_cursor: params.cursor.clone(),
        filter: if clauses.is_empty() {
            None
        } else {
            Some(json!({ "and": clauses }))
        },
        sorts: Vec::new(),
    }
    .sorted_by_last_edited_desc()
}

/// Uniform random pick from a cleaned batch; `None` on an empty batch.
fn pick_random<T>(mut items: Vec<T>) -> Option<T> {
    use rand::Rng;
    if items.is_empty() {
        return None;
    }
    let index = rand::rng().random_range(0..items.len());
    Some(items.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_params_build_unfiltered_query() {
        let query = build_query(&QueryParams::with_limit(10), "Title");
        assert_eq!(query.page_size, 10);
        assert!(query.filter.is_none());
        assert_eq!(query.sorts.len(), 1);
    }

    #[test]
    fn subjects_expand_to_or_group() {
        let params = QueryParams {
            subjects: vec!["Physics".to_string(), "EE".to_string()],
            q: Some("ohm".to_string()),
            limit: 10,
            cursor: None,
        };
        let query = build_query(&params, "Title");
        let filter = query.filter.unwrap();
        let and = filter.get("and").and_then(|v| v.as_array()).unwrap();
        assert_eq!(and.len(), 2);
        assert_eq!(and[0].get("or").and_then(|v| v.as_array()).unwrap().len(), 2);
        assert_eq!(
            and[1].pointer("/title/contains").and_then(|v| v.as_str()),
            Some("ohm")
        );
    }

    #[test]
    fn limit_is_clamped_to_ceiling() {
        let query = build_query(&QueryParams::with_limit(500), "Title");
        assert_eq!(query.page_size, QUERY_PAGE_SIZE_CEILING);
    }

    #[test]
    fn random_pick_of_empty_batch_is_none() {
        assert_eq!(pick_random(Vec::<u8>::new()), None);
    }
}
