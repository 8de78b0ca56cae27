// src/api/pagination.rs
//! Cursor loop over paginated Notion endpoints.

use super::Paginated;
use crate::error::AppError;

/// Fetches every page of a paginated listing, concatenating results in
/// returned order. Order is the document's reading order; nothing here may
/// reorder it.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_fn: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<Paginated<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;

    loop {
        let page = fetch_fn(cursor).await?;

        let has_more = page.has_more;
        cursor = page.next_cursor;
        all_items.extend(page.results);

        if !has_more || cursor.is_none() {
            break;
        }
    }

    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn concatenates_batches_in_order() {
        let fetched = fetch_all_pages(|cursor| async move {
            Ok(match cursor.as_deref() {
                None => Paginated {
                    results: vec![1, 2],
                    has_more: true,
                    next_cursor: Some("second".to_string()),
                },
                Some("second") => Paginated::complete(vec![3, 4]),
                Some(other) => panic!("unexpected cursor {}", other),
            })
        })
        .await
        .unwrap();
        assert_eq!(fetched, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn stops_when_cursor_absent_despite_has_more() {
        let fetched = fetch_all_pages(|_| async {
            Ok(Paginated {
                results: vec![1],
                has_more: true,
                next_cursor: None,
            })
        })
        .await
        .unwrap();
        assert_eq!(fetched, vec![1]);
    }
}
