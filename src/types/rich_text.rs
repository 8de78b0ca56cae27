// src/types/rich_text.rs
//! Rich-text runs: the atomic styled spans inside every text-bearing block.

use serde::{Deserialize, Serialize};

/// The kind of rich-text content — a typed vocabulary replacing
/// stringly-typed dispatch.
///
/// Each variant carries its specific data, making invalid states
/// unrepresentable: you can't have an "equation" run with no expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunKind {
    Text { content: String, link: Option<Link> },
    Equation(EquationData),
}

/// Inline equation payload; the expression is a raw LaTeX-like literal
/// handed unmodified (but escaped) to the downstream typesetting pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationData {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

/// Independent style flags on a run. Any subset may be set at once; the
/// renderer nests the corresponding tags in one fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

/// One annotated span of inline text or an inline equation.
///
/// `kind` carries the content variant and `plain_text` provides the
/// fallback rendering for any variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextRun {
    pub kind: RunKind,
    pub annotations: Annotations,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextRun {
    /// Create a plain text run — the most common variant.
    pub fn plain_text(text: &str) -> Self {
        Self {
            kind: RunKind::Text {
                content: text.to_string(),
                link: None,
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: None,
        }
    }

    /// Create a text run with the given annotations.
    pub fn styled(text: &str, annotations: Annotations) -> Self {
        Self {
            annotations,
            ..Self::plain_text(text)
        }
    }

    /// Create an inline equation run.
    pub fn equation(expression: &str) -> Self {
        Self {
            kind: RunKind::Equation(EquationData {
                expression: expression.to_string(),
            }),
            annotations: Annotations::default(),
            plain_text: expression.to_string(),
            href: None,
        }
    }

    /// Create a text run carrying a hyperlink.
    pub fn linked(text: &str, url: &str) -> Self {
        Self {
            kind: RunKind::Text {
                content: text.to_string(),
                link: Some(Link {
                    url: url.to_string(),
                }),
            },
            annotations: Annotations::default(),
            plain_text: text.to_string(),
            href: Some(url.to_string()),
        }
    }

    /// Lenient conversion from one element of a Notion `rich_text` array.
    ///
    /// Missing or mistyped fields read as absent/false; an element with no
    /// recognizable content degrades to a plain-text run of its
    /// `plain_text` field (possibly empty). Never fails.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let plain_text = value
            .get("plain_text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let annotations = value
            .get("annotations")
            .map(annotations_from_json)
            .unwrap_or_default();

        let href = value
            .get("href")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let kind = match value.get("type").and_then(|v| v.as_str()) {
            Some("equation") => RunKind::Equation(EquationData {
                expression: value
                    .pointer("/equation/expression")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
            }),
            _ => RunKind::Text {
                content: value
                    .pointer("/text/content")
                    .and_then(|v| v.as_str())
                    .unwrap_or(&plain_text)
                    .to_string(),
                link: value
                    .pointer("/text/link/url")
                    .and_then(|v| v.as_str())
                    .map(|url| Link {
                        url: url.to_string(),
                    }),
            },
        };

        Self {
            kind,
            annotations,
            plain_text,
            href,
        }
    }

    /// Convert a whole `rich_text` array; non-array input reads as empty.
    pub fn from_json_array(value: Option<&serde_json::Value>) -> Vec<Self> {
        value
            .and_then(|v| v.as_array())
            .map(|items| items.iter().map(Self::from_json).collect())
            .unwrap_or_default()
    }
}

fn annotations_from_json(value: &serde_json::Value) -> Annotations {
    let flag = |name: &str| value.get(name).and_then(|v| v.as_bool()).unwrap_or(false);
    Annotations {
        bold: flag("bold"),
        italic: flag("italic"),
        strikethrough: flag("strikethrough"),
        underline: flag("underline"),
        code: flag("code"),
    }
}
