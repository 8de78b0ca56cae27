// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these should tell you how the system operates: how much it fetches per
//! round-trip, how deep it recurses, how it sizes output buffers.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while paging through block children.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Hard cap on nesting depth when recursively fetching block children.
///
/// Callers pass their own `max_depth`; this clamps it so a pathological
/// request cannot recurse without bound.
pub const MAX_FETCH_DEPTH: u8 = 50;

/// Upper bound on rows requested from a single database query.
///
/// Query endpoints clamp caller-supplied limits to this value before
/// talking to the API.
pub const QUERY_PAGE_SIZE_CEILING: usize = 50;

/// How many recently edited rows the random-pick endpoints sample from.
pub const RANDOM_SAMPLE_SIZE: usize = 20;

/// Nesting depth fetched when a card's detail lives in its page body
/// rather than a rich-text property. Two levels covers a list with one
/// level of nesting, which is as deep as the study decks go.
pub const DETAIL_FETCH_DEPTH: u8 = 2;

// ---------------------------------------------------------------------------
// Rendering boundaries
// ---------------------------------------------------------------------------

/// Language tag emitted for code blocks that carry no language.
pub const DEFAULT_CODE_LANGUAGE: &str = "plain";

/// Estimated characters of HTML per block, used to pre-allocate output.
///
/// A performance hint, not a constraint. Over-estimating wastes a little
/// memory; under-estimating causes reallocation.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 128;
