// src/api/parser.rs
//! Turns raw Notion API response bodies into domain types.
//!
//! Parsing is deliberately lenient about payload details: an unrecognized
//! block type becomes the fallback variant and missing text fields read as
//! empty. Structural problems (non-JSON bodies, missing envelopes) and API
//! error responses are real errors.

use super::Paginated;
use crate::error::{AppError, NotionErrorCode};
use crate::model::blocks::*;
use crate::model::{Block, BlockCommon, Page};
use crate::types::{BlockId, PageId, RichTextRun};
use reqwest::{Response, StatusCode};
use serde_json::Value;

/// Response body with the metadata needed for error reporting.
#[derive(Debug)]
pub struct ApiBody {
    pub status: StatusCode,
    pub url: String,
    pub text: String,
}

/// Drains a response into an [`ApiBody`].
pub async fn extract_body(response: Response) -> Result<ApiBody, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;
    Ok(ApiBody { status, url, text })
}

/// Parses the body as JSON, or classifies the API error it carries.
fn parse_json(body: ApiBody) -> Result<Value, AppError> {
    if !body.status.is_success() {
        return Err(parse_error_body(&body));
    }
    serde_json::from_str(&body.text).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", body.url, e);
        AppError::MalformedResponse(format!("{} (from {})", e, body.url))
    })
}

/// Builds a typed service error from a Notion error envelope, falling back
/// to the bare HTTP status when the body is unparseable.
fn parse_error_body(body: &ApiBody) -> AppError {
    let envelope: Option<Value> = serde_json::from_str(&body.text).ok();
    let code = envelope
        .as_ref()
        .and_then(|v| v.get("code"))
        .and_then(|v| v.as_str())
        .map(NotionErrorCode::from_api_response)
        .unwrap_or_else(|| NotionErrorCode::from_http_status(body.status.as_u16()));
    let message = envelope
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {} from {}", body.status, body.url));

    AppError::NotionService {
        code,
        message,
        status: body.status,
    }
}

/// Parses a paginated `blocks/{id}/children` response.
pub fn parse_blocks_page(body: ApiBody) -> Result<Paginated<Block>, AppError> {
    let json = parse_json(body)?;
    let results = json
        .get("results")
        .and_then(|v| v.as_array())
        .ok_or_else(|| AppError::MalformedResponse("Missing 'results' array".to_string()))?
        .iter()
        .map(parse_block)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Paginated {
        results,
        has_more: json
            .get("has_more")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        next_cursor: json
            .get("next_cursor")
            .and_then(|v| v.as_str())
            .map(str::to_string),
    })
}

/// Parses a paginated `databases/{id}/query` response.
pub fn parse_pages_page(body: ApiBody) -> Result<Paginated<Page>, AppError> {
    let json = parse_json(body)?;
    let results = json
        .get("results")
        .and_then(|v| v.as_array())
        .ok_or_else(|| AppError::MalformedResponse("Missing 'results' array".to_string()))?
        .iter()
        .map(parse_page)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Paginated {
        results,
        has_more: json
            .get("has_more")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        next_cursor: json
            .get("next_cursor")
            .and_then(|v| v.as_str())
            .map(str::to_string),
    })
}

/// Parses a `pages/{id}` response.
pub fn parse_page_response(body: ApiBody) -> Result<Page, AppError> {
    let json = parse_json(body)?;
    parse_page(&json)
}

/// Converts one page object into a [`Page`] snapshot.
pub fn parse_page(value: &Value) -> Result<Page, AppError> {
    let id = value
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::MalformedResponse("Page missing 'id'".to_string()))?;

    Ok(Page {
        id: PageId::parse(id)?,
        url: value
            .get("url")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        last_edited_time: value
            .get("last_edited_time")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok()),
        properties: value
            .get("properties")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default(),
    })
}

/// Converts one block object into the [`Block`] sum type.
///
/// Unrecognized types land in the `Unsupported` variant carrying whatever
/// rich text their payload exposed, so the renderer can still make a
/// best-effort paragraph out of them.
pub fn parse_block(value: &Value) -> Result<Block, AppError> {
    let id = value
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::MalformedResponse("Block missing 'id'".to_string()))?;
    let block_type = value
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::MalformedResponse("Block missing 'type'".to_string()))?;

    let mut common = BlockCommon::new(BlockId::parse(id)?);
    common.has_children = value
        .get("has_children")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let payload = value.get(block_type);
    let content = TextBlockContent::new(RichTextRun::from_json_array(
        payload.and_then(|p| p.get("rich_text")),
    ));

    let block = match block_type {
        "paragraph" => Block::Paragraph(ParagraphBlock { common, content }),
        "heading_1" => Block::Heading1(Heading1Block { common, content }),
        "heading_2" => Block::Heading2(Heading2Block { common, content }),
        "heading_3" => Block::Heading3(Heading3Block { common, content }),
        "bulleted_list_item" => Block::BulletedListItem(BulletedListItemBlock { common, content }),
        "numbered_list_item" => Block::NumberedListItem(NumberedListItemBlock { common, content }),
        "quote" => Block::Quote(QuoteBlock { common, content }),
        "callout" => Block::Callout(CalloutBlock {
            common,
            icon: parse_icon(payload),
            content,
        }),
        "code" => Block::Code(CodeBlock {
            common,
            language: payload
                .and_then(|p| p.get("language"))
                .and_then(|v| v.as_str())
                .map(str::to_string),
            content,
        }),
        "equation" => Block::Equation(EquationBlock {
            common,
            expression: payload
                .and_then(|p| p.get("expression"))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
        }),
        "divider" => Block::Divider(DividerBlock { common }),
        other => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: other.to_string(),
            content,
        }),
    };

    Ok(block)
}

fn parse_icon(payload: Option<&Value>) -> Option<Icon> {
    let icon = payload?.get("icon")?;
    match icon.get("type")?.as_str()? {
        "emoji" => Some(Icon::Emoji {
            emoji: icon.get("emoji")?.as_str()?.to_string(),
        }),
        "external" => Some(Icon::External {
            url: icon.pointer("/external/url")?.as_str()?.to_string(),
        }),
        _ => None,
    }
}
