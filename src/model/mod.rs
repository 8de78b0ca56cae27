// src/model/mod.rs
//! Domain model: the block tree and page snapshots fetched per request.
//!
//! Both entities are read-only snapshots; nothing here mutates the remote
//! source of truth.

mod block;
pub mod blocks;
pub mod common;

pub use block::Block;
pub use blocks::*;
pub use common::BlockCommon;

use crate::types::{PageId, RichTextRun};
use serde::{Deserialize, Serialize};

/// A Notion page snapshot: identity plus its raw properties bag.
///
/// Properties stay as the API's JSON shape because every database defines
/// its own schema; the typed accessors below dig out the handful of
/// property shapes the content queries rely on. Absent or mistyped
/// properties read as empty, never as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub url: String,
    pub last_edited_time: Option<chrono::DateTime<chrono::Utc>>,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl Page {
    fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }

    /// Plain text of a title property's first run.
    pub fn title_text(&self, name: &str) -> Option<String> {
        self.property(name)?
            .pointer("/title/0/plain_text")?
            .as_str()
            .map(str::to_string)
    }

    /// Plain text of a rich-text property's first run.
    pub fn plain_text(&self, name: &str) -> Option<String> {
        self.property(name)?
            .pointer("/rich_text/0/plain_text")?
            .as_str()
            .map(str::to_string)
    }

    /// All runs of a rich-text property, empty when absent.
    pub fn rich_text(&self, name: &str) -> Vec<RichTextRun> {
        RichTextRun::from_json_array(self.property(name).and_then(|p| p.get("rich_text")))
    }

    /// Option names of a multi-select property, empty when absent.
    pub fn multi_select_names(&self, name: &str) -> Vec<String> {
        self.property(name)
            .and_then(|p| p.get("multi_select"))
            .and_then(|v| v.as_array())
            .map(|options| {
                options
                    .iter()
                    .filter_map(|o| o.get("name").and_then(|n| n.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Name of a select property's chosen option.
    pub fn select_name(&self, name: &str) -> Option<String> {
        self.property(name)?
            .pointer("/select/name")?
            .as_str()
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page_with_properties(props: serde_json::Value) -> Page {
        Page {
            id: PageId::new_v4(),
            url: "https://www.notion.so/test".to_string(),
            last_edited_time: None,
            properties: props.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn title_and_rich_text_accessors() {
        let page = page_with_properties(json!({
            "Title": { "title": [{ "plain_text": "Ohm's Law" }] },
            "Slug": { "rich_text": [{ "plain_text": "ohms-law" }] },
            "Subject": { "multi_select": [{ "name": "Physics" }, { "name": "EE" }] },
            "POS": { "select": { "name": "noun" } },
        }));

        assert_eq!(page.title_text("Title").as_deref(), Some("Ohm's Law"));
        assert_eq!(page.plain_text("Slug").as_deref(), Some("ohms-law"));
        assert_eq!(page.multi_select_names("Subject"), vec!["Physics", "EE"]);
        assert_eq!(page.select_name("POS").as_deref(), Some("noun"));
    }

    #[test]
    fn absent_properties_read_as_empty() {
        let page = page_with_properties(json!({}));
        assert_eq!(page.title_text("Title"), None);
        assert!(page.rich_text("Definition").is_empty());
        assert!(page.multi_select_names("Subject").is_empty());
    }

    #[test]
    fn mistyped_properties_read_as_empty() {
        let page = page_with_properties(json!({
            "Title": { "title": "not-an-array" },
            "Subject": { "multi_select": 42 },
        }));
        assert_eq!(page.title_text("Title"), None);
        assert!(page.multi_select_names("Subject").is_empty());
    }
}
