// src/lib.rs
//! studyhall library — a study-content viewer backend over Notion.
//!
//! The core is a block-tree to HTML renderer with embedded-math markers
//! for a client-side KaTeX pass, fed by a bounded recursive fetcher over
//! the Notion block-children API. On top sit thin read-only queries for
//! the knowledge, vocabulary, and notes databases.
//!
//! # Public API
//!
//! - **Rendering** — [`render_blocks`], [`render_runs`], [`escape_html`]
//! - **Fetching** — [`fetch_content_tree`], the [`NotionSource`] seam,
//!   [`NotionHttpClient`]
//! - **Content queries** — [`content::knowledge`], [`content::vocab`],
//!   [`content::notes`], [`content::fuzzy`]
//! - **Domain model** — [`Block`], [`Page`], [`RichTextRun`]

mod api;
mod config;
mod constants;
pub mod content;
mod error;
mod html;
mod model;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::AppConfig;

// --- Domain Model ---
pub use crate::model::blocks::{
    BulletedListItemBlock, CalloutBlock, CodeBlock, DividerBlock, EquationBlock, Heading1Block,
    Heading2Block, Heading3Block, Icon, NumberedListItemBlock, ParagraphBlock, QuoteBlock,
    TextBlockContent, UnsupportedBlock,
};
pub use crate::model::{Block, BlockCommon, Page};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiKey, BlockId, DatabaseId, EquationData, Link, PageId, RichTextRun, RunKind,
    ValidatedUrl,
};

// --- API Client ---
pub use crate::api::{
    fetch_content_tree, parser, DatabaseQuery, NotionHttpClient, NotionSource, Paginated,
};

// --- Rendering ---
pub use crate::html::{escape_html, render_blocks, render_runs};

// --- Content Queries ---
pub use crate::content::{Listing, QueryParams};
