// tests/content_queries.rs
//! Cleaning semantics of the content-query layer over a mock source.

mod common;

use common::MockSource;
use pretty_assertions::assert_eq;
use serde_json::json;
use studyhall::content::{knowledge, notes, vocab};
use studyhall::{
    Block, BlockCommon, BlockId, DatabaseId, NotionSource, Page, PageId, ParagraphBlock,
    QueryParams, RichTextRun, TextBlockContent,
};

fn database() -> DatabaseId {
    DatabaseId::parse(&format!("{:032x}", 0xdb)).unwrap()
}

fn page(n: u8, properties: serde_json::Value) -> Page {
    Page {
        id: PageId::parse(&format!("{:032x}", n)).unwrap(),
        url: format!("https://www.notion.so/{:032x}", n),
        last_edited_time: None,
        properties: properties.as_object().cloned().unwrap(),
    }
}

fn rich_text_prop(text: &str) -> serde_json::Value {
    json!({ "rich_text": [{ "type": "text", "plain_text": text, "text": { "content": text } }] })
}

#[tokio::test]
async fn knowledge_rows_clean_into_cards() {
    let row = page(
        1,
        json!({
            "Title": { "title": [{ "plain_text": "Ohm's Law" }] },
            "Slug": rich_text_prop("ohms-law"),
            "Subject": { "multi_select": [{ "name": "Physics" }] },
            "Quick": { "rich_text": [{
                "type": "text",
                "plain_text": "V = IR",
                "annotations": { "bold": true }
            }] },
            "Detail": rich_text_prop("resistance is linear"),
        }),
    );
    let source = MockSource::new().with_rows(vec![row]);

    let listing = knowledge::query_knowledge(&source, &database(), &QueryParams::with_limit(10))
        .await
        .unwrap();

    assert_eq!(listing.items.len(), 1);
    let card = &listing.items[0];
    assert_eq!(card.title, "Ohm's Law");
    assert_eq!(card.slug, "ohms-law");
    assert_eq!(card.subject, vec!["Physics"]);
    assert_eq!(card.quick, "<strong>V = IR</strong>");
    assert_eq!(card.detail, "resistance is linear");
    assert!(listing.next_cursor.is_none());
}

#[tokio::test]
async fn knowledge_detail_falls_back_to_page_body() {
    let row = page(
        2,
        json!({ "Title": { "title": [{ "plain_text": "Notes in body" }] } }),
    );
    let body_parent: BlockId = row.id.cast();
    let body = Block::Paragraph(ParagraphBlock {
        common: BlockCommon::new(BlockId::parse(&format!("{:032x}", 3)).unwrap()),
        content: TextBlockContent::new(vec![RichTextRun::plain_text("from the body")]),
    });
    let source = MockSource::new()
        .with_rows(vec![row])
        .with_children(&body_parent, vec![body]);

    let listing = knowledge::query_knowledge(&source, &database(), &QueryParams::with_limit(5))
        .await
        .unwrap();

    assert_eq!(listing.items[0].detail, "<p>from the body</p>");
}

#[tokio::test]
async fn knowledge_detail_degrades_to_empty_on_body_fetch_failure() {
    let row = page(
        4,
        json!({ "Title": { "title": [{ "plain_text": "Broken body" }] } }),
    );
    let body_parent: BlockId = row.id.cast();
    let source = MockSource::new()
        .with_rows(vec![row])
        .with_failing(&body_parent);

    let listing = knowledge::query_knowledge(&source, &database(), &QueryParams::with_limit(5))
        .await
        .unwrap();

    assert_eq!(listing.items[0].detail, "");
}

#[tokio::test]
async fn missing_properties_get_defaults() {
    let source = MockSource::new().with_rows(vec![page(5, json!({}))]);

    let listing = knowledge::query_knowledge(&source, &database(), &QueryParams::with_limit(5))
        .await
        .unwrap();

    let card = &listing.items[0];
    assert_eq!(card.title, "Untitled");
    assert_eq!(card.slug, card.id);
    assert!(card.subject.is_empty());
    assert_eq!(card.quick, "");
}

#[tokio::test]
async fn vocab_rows_clean_into_entries() {
    let row = page(
        6,
        json!({
            "Word": { "title": [{ "plain_text": "sthenic" }] },
            "Pronunciation": rich_text_prop("/ˈsθenik/"),
            "POS": { "select": { "name": "adjective" } },
            "Definition": rich_text_prop("vigorous"),
        }),
    );
    let source = MockSource::new().with_rows(vec![row]);

    let listing = vocab::query_vocab(&source, &database(), &QueryParams::with_limit(20))
        .await
        .unwrap();

    let entry = &listing.items[0];
    assert_eq!(entry.word, "sthenic");
    assert_eq!(entry.pos, "adjective");
    assert_eq!(entry.definition, "vigorous");
}

#[tokio::test]
async fn random_pick_from_empty_database_is_none() {
    let source = MockSource::new();
    let pick = knowledge::random_knowledge(&source, &database(), Vec::new())
        .await
        .unwrap();
    assert!(pick.is_none());

    let pick = vocab::random_vocab(&source, &database()).await.unwrap();
    assert!(pick.is_none());
}

#[tokio::test]
async fn page_lookup_returns_seeded_properties() {
    let row = page(
        9,
        json!({ "Title": { "title": [{ "plain_text": "Kirchhoff" }] } }),
    );
    let id = row.id.clone();
    let source = MockSource::new().with_page(row);

    let found = source.get_page(&id).await.unwrap();
    assert_eq!(found.title_text("Title").as_deref(), Some("Kirchhoff"));

    let unknown = PageId::parse(&format!("{:032x}", 10)).unwrap();
    assert!(source.get_page(&unknown).await.is_err());
}

#[tokio::test]
async fn notes_render_their_page_bodies() {
    let row = page(
        7,
        json!({
            "Title": { "title": [{ "plain_text": "Lecture 3" }] },
            "Subject": { "multi_select": [{ "name": "DB" }] },
        }),
    );
    let body_parent: BlockId = row.id.cast();
    let body = Block::Paragraph(ParagraphBlock {
        common: BlockCommon::new(BlockId::parse(&format!("{:032x}", 8)).unwrap()),
        content: TextBlockContent::new(vec![RichTextRun::plain_text("normal forms")]),
    });
    let source = MockSource::new()
        .with_rows(vec![row])
        .with_children(&body_parent, vec![body]);

    let listing = notes::query_notes(&source, &database(), &QueryParams::with_limit(20))
        .await
        .unwrap();

    let note = &listing.items[0];
    assert_eq!(note.title, "Lecture 3");
    assert_eq!(note.subject, vec!["DB"]);
    assert_eq!(note.content, "<p>normal forms</p>");
}
