// src/api/fetcher.rs
//! Recursive content-tree assembly with a bounded depth budget.
//!
//! Failure policy is asymmetric by design: a failed top-level fetch is
//! fatal to the request, while a failed children-fetch during recursion
//! degrades to an empty child list so one bad sub-branch yields a partial
//! render instead of aborting the whole page.

use super::{pagination, NotionSource};
use crate::constants::MAX_FETCH_DEPTH;
use crate::error::AppError;
use crate::model::Block;
use crate::types::BlockId;
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

/// Outcome of one children-fetch. The public contract always hands back a
/// plain child list, but internally the degraded case stays explicit so it
/// can be logged with its reason.
enum ChildFetch {
    Complete(Vec<Block>),
    Degraded { reason: String },
}

/// Fetches a page's block tree to the given depth.
///
/// Pages through the children listing batch by batch, preserving source
/// order, then recursively attaches children for every block that reports
/// them while depth budget remains. At depth 0 blocks stay leaves even
/// when `has_children` is true; the truncation is reproducible, not a
/// failure.
pub async fn fetch_content_tree<S>(
    source: &S,
    root: &BlockId,
    max_depth: u8,
) -> Result<Vec<Block>, AppError>
where
    S: NotionSource + ?Sized,
{
    let depth = max_depth.min(MAX_FETCH_DEPTH);
    if max_depth > depth {
        log::warn!(
            "Requested fetch depth {} clamped to {}",
            max_depth,
            MAX_FETCH_DEPTH
        );
    }

    let mut blocks = list_all_children(source, root).await?;
    attach_children(source, &mut blocks, depth).await;
    Ok(blocks)
}

async fn list_all_children<S>(source: &S, parent: &BlockId) -> Result<Vec<Block>, AppError>
where
    S: NotionSource + ?Sized,
{
    pagination::fetch_all_pages(|cursor| source.list_children(parent, cursor)).await
}

/// Attaches fetched children to every block in `blocks` that reports them.
///
/// Sibling fetches at one level run concurrently; `join_all` preserves
/// input order, so reassembly keeps the source's sibling order.
async fn attach_children<S>(source: &S, blocks: &mut [Block], depth: u8)
where
    S: NotionSource + ?Sized,
{
    if depth == 0 {
        return;
    }

    let pending: Vec<(usize, BlockId)> = blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| b.has_children())
        .map(|(i, b)| (i, b.id().clone()))
        .collect();
    if pending.is_empty() {
        return;
    }

    let fetched = join_all(
        pending
            .iter()
            .map(|(_, id)| fetch_subtree(source, id.clone(), depth - 1)),
    )
    .await;

    for ((index, id), result) in pending.into_iter().zip(fetched) {
        match result {
            ChildFetch::Complete(children) => blocks[index].set_children(children),
            ChildFetch::Degraded { reason } => {
                log::warn!(
                    "Children of block {} degraded to empty list: {}",
                    id.as_str(),
                    reason
                );
                blocks[index].set_children(Vec::new());
            }
        }
    }
}

/// Fetches one block's subtree; errors degrade instead of propagating.
fn fetch_subtree<'a, S>(source: &'a S, parent: BlockId, depth: u8) -> BoxFuture<'a, ChildFetch>
where
    S: NotionSource + ?Sized,
{
    async move {
        let mut children = match list_all_children(source, &parent).await {
            Ok(children) => children,
            Err(e) => {
                return ChildFetch::Degraded {
                    reason: e.to_string(),
                }
            }
        };
        attach_children(source, &mut children, depth).await;
        ChildFetch::Complete(children)
    }
    .boxed()
}
