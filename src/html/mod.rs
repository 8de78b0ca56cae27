// src/html/mod.rs
//! Block-tree to HTML rendering with embedded-math markers.
//!
//! This is the core of the system: a recursive converter from the fetched
//! block tree to semantic HTML. Two contracts matter here and must not
//! drift independently of the front end:
//!
//! - Math markers: inline equations become `$...$` inside a
//!   `<span class="math-inline">`, block equations `$$...$$` inside a
//!   `<div class="math-block">`. The client-side KaTeX pass looks for
//!   exactly these delimiters.
//! - Annotation nesting: style tags nest in one fixed order (code
//!   innermost, then strong, em, u, s, with a link anchor outermost) so
//!   re-rendering the same runs is byte-identical.

use crate::constants::{CHARS_PER_BLOCK_ESTIMATE, DEFAULT_CODE_LANGUAGE};
use crate::model::Block;
use crate::types::{RichTextRun, RunKind, ValidatedUrl};
use std::fmt::Write;

/// Escape the five HTML metacharacters in a literal.
///
/// Applied exactly once per literal, before any markup wraps it. Never
/// call this on a string that already contains emitted tags.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a sequence of rich-text runs to an inline HTML fragment.
///
/// An empty sequence renders to the empty string. Pure; no failure modes.
pub fn render_runs(runs: &[RichTextRun]) -> String {
    runs.iter().map(render_run).collect()
}

fn render_run(run: &RichTextRun) -> String {
    match &run.kind {
        RunKind::Equation(eq) => format!(
            "<span class=\"math-inline\">${}$</span>",
            escape_html(&eq.expression)
        ),
        RunKind::Text { link, .. } => {
            let mut html = escape_html(&run.plain_text);

            // Fixed nesting order, innermost first. The order is part of
            // the output contract: tests match the exact tag nesting.
            let a = &run.annotations;
            if a.code {
                html = format!("<code>{}</code>", html);
            }
            if a.bold {
                html = format!("<strong>{}</strong>", html);
            }
            if a.italic {
                html = format!("<em>{}</em>", html);
            }
            if a.underline {
                html = format!("<u>{}</u>", html);
            }
            if a.strikethrough {
                html = format!("<s>{}</s>", html);
            }

            let url = run
                .href
                .as_deref()
                .or_else(|| link.as_ref().map(|l| l.url.as_str()));
            // Scripting-scheme targets render as unlinked text.
            if let Some(valid) = url.and_then(|u| ValidatedUrl::parse(u).ok()) {
                html = format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
                    escape_html(valid.as_str()),
                    html
                );
            }

            html
        }
    }
}

/// The two list container tags the open-list stack tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListTag {
    Bulleted,
    Numbered,
}

impl ListTag {
    fn open(self) -> &'static str {
        match self {
            ListTag::Bulleted => "<ul>",
            ListTag::Numbered => "<ol>",
        }
    }

    fn close(self) -> &'static str {
        match self {
            ListTag::Bulleted => "</ul>",
            ListTag::Numbered => "</ol>",
        }
    }
}

fn close_lists(out: &mut String, open_lists: &mut Vec<ListTag>) {
    while let Some(tag) = open_lists.pop() {
        out.push_str(tag.close());
    }
}

/// Render a sequence of sibling blocks to HTML, recursively.
///
/// Adjacent list items of the same ordering type merge into one container;
/// any other block (dividers included) closes the open container first.
/// Children of a list item render inside its `<li>`, so nested lists land
/// where HTML expects them.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut out = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    // Open-list bookkeeping is a plain local stack: reentrant per call,
    // no state shared across renders.
    let mut open_lists: Vec<ListTag> = Vec::new();

    for block in blocks {
        // Anything that is not a list item forces an open container closed,
        // dividers included.
        if !block.is_list_item() {
            close_lists(&mut out, &mut open_lists);
        }

        match block {
            Block::Paragraph(b) => {
                let _ = write!(out, "<p>{}</p>", render_runs(&b.content.rich_text));
            }
            Block::Heading1(b) => {
                // Heading levels shift down one: <h1> is reserved for the
                // page title rendered elsewhere.
                let _ = write!(out, "<h2>{}</h2>", render_runs(&b.content.rich_text));
            }
            Block::Heading2(b) => {
                let _ = write!(out, "<h3>{}</h3>", render_runs(&b.content.rich_text));
            }
            Block::Heading3(b) => {
                let _ = write!(out, "<h4>{}</h4>", render_runs(&b.content.rich_text));
            }
            Block::BulletedListItem(b) => {
                render_list_item(&mut out, &mut open_lists, ListTag::Bulleted, block, b.content.rich_text.as_slice());
            }
            Block::NumberedListItem(b) => {
                render_list_item(&mut out, &mut open_lists, ListTag::Numbered, block, b.content.rich_text.as_slice());
            }
            Block::Quote(b) => {
                let _ = write!(
                    out,
                    "<blockquote>{}</blockquote>",
                    render_runs(&b.content.rich_text)
                );
            }
            Block::Callout(b) => {
                let _ = write!(
                    out,
                    "<div class=\"callout\">{}</div>",
                    render_runs(&b.content.rich_text)
                );
            }
            Block::Equation(b) => {
                let _ = write!(
                    out,
                    "<div class=\"math-block\">$${}$$</div>",
                    escape_html(&b.expression)
                );
            }
            Block::Code(b) => {
                let language = b.language.as_deref().unwrap_or(DEFAULT_CODE_LANGUAGE);
                // Code renders literally: annotations on the runs are
                // ignored, only the concatenated plain text survives.
                let _ = write!(
                    out,
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    escape_html(language),
                    escape_html(&block.plain_text())
                );
            }
            Block::Divider(_) => {}
            Block::Unsupported(_) => {
                let text = block.plain_text();
                if !text.is_empty() {
                    let _ = write!(out, "<p>{}</p>", escape_html(&text));
                }
            }
        }
    }

    close_lists(&mut out, &mut open_lists);
    out
}

fn render_list_item(
    out: &mut String,
    open_lists: &mut Vec<ListTag>,
    tag: ListTag,
    block: &Block,
    runs: &[RichTextRun],
) {
    if open_lists.last() != Some(&tag) {
        close_lists(out, open_lists);
        out.push_str(tag.open());
        open_lists.push(tag);
    }
    out.push_str("<li>");
    out.push_str(&render_runs(runs));
    if !block.children().is_empty() {
        // Nested children render inside the <li>, not as trailing siblings.
        out.push_str(&render_blocks(block.children()));
    }
    out.push_str("</li>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::blocks::*;
    use crate::model::BlockCommon;
    use crate::types::Annotations;
    use pretty_assertions::assert_eq;

    fn paragraph(text: &str) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextRun::plain_text(text)]),
        })
    }

    fn bullet(text: &str) -> Block {
        Block::BulletedListItem(BulletedListItemBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextRun::plain_text(text)]),
        })
    }

    fn numbered(text: &str) -> Block {
        Block::NumberedListItem(NumberedListItemBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextRun::plain_text(text)]),
        })
    }

    #[test]
    fn empty_inputs_render_empty() {
        assert_eq!(render_runs(&[]), "");
        assert_eq!(render_blocks(&[]), "");
    }

    #[test]
    fn unannotated_run_is_just_escaped_text() {
        let run = RichTextRun::plain_text("a < b & c");
        assert_eq!(render_runs(&[run]), "a &lt; b &amp; c");
    }

    #[test]
    fn inline_equation_markers() {
        let run = RichTextRun::equation("x^2 < y");
        assert_eq!(
            render_runs(&[run]),
            "<span class=\"math-inline\">$x^2 &lt; y$</span>"
        );
    }

    #[test]
    fn link_wraps_annotated_text_outermost() {
        let mut run = RichTextRun::linked("docs", "https://example.com/?a=1&b=2");
        run.annotations = Annotations {
            bold: true,
            ..Default::default()
        };
        assert_eq!(
            render_runs(&[run]),
            "<a href=\"https://example.com/?a=1&amp;b=2\" target=\"_blank\" rel=\"noopener\"><strong>docs</strong></a>"
        );
    }

    #[test]
    fn scripting_scheme_link_renders_unlinked() {
        let run = RichTextRun::linked("click", "javascript:alert(1)");
        assert_eq!(render_runs(&[run]), "click");
    }

    #[test]
    fn mailto_link_keeps_its_anchor() {
        let run = RichTextRun::linked("email me", "mailto:ta@example.edu");
        assert_eq!(
            render_runs(&[run]),
            "<a href=\"mailto:ta@example.edu\" target=\"_blank\" rel=\"noopener\">email me</a>"
        );
    }

    #[test]
    fn adjacent_same_type_items_share_one_container() {
        let html = render_blocks(&[bullet("A"), bullet("B")]);
        assert_eq!(html, "<ul><li>A</li><li>B</li></ul>");
    }

    #[test]
    fn list_type_change_closes_and_reopens() {
        let html = render_blocks(&[bullet("a"), bullet("b"), numbered("c"), bullet("d")]);
        assert_eq!(
            html,
            "<ul><li>a</li><li>b</li></ul><ol><li>c</li></ol><ul><li>d</li></ul>"
        );
    }

    #[test]
    fn divider_emits_nothing_but_closes_lists() {
        let divider = Block::Divider(DividerBlock::default());
        let html = render_blocks(&[bullet("a"), divider, bullet("b")]);
        assert_eq!(html, "<ul><li>a</li></ul><ul><li>b</li></ul>");
    }

    #[test]
    fn paragraph_closes_open_list() {
        let html = render_blocks(&[bullet("a"), paragraph("p"), bullet("b")]);
        assert_eq!(html, "<ul><li>a</li></ul><p>p</p><ul><li>b</li></ul>");
    }

    #[test]
    fn nested_children_render_inside_the_li() {
        let parent = Block::BulletedListItem(BulletedListItemBlock {
            common: BlockCommon::default().with_children(vec![bullet("child")]),
            content: TextBlockContent::new(vec![RichTextRun::plain_text("parent")]),
        });
        let html = render_blocks(&[parent, bullet("sibling")]);
        assert_eq!(
            html,
            "<ul><li>parent<ul><li>child</li></ul></li><li>sibling</li></ul>"
        );
    }

    #[test]
    fn code_block_ignores_annotations_and_escapes() {
        let code = Block::Code(CodeBlock {
            common: BlockCommon::default(),
            language: Some("rust".to_string()),
            content: TextBlockContent::new(vec![RichTextRun::styled(
                "if a < b { }",
                Annotations {
                    bold: true,
                    ..Default::default()
                },
            )]),
        });
        assert_eq!(
            render_blocks(&[code]),
            "<pre><code class=\"language-rust\">if a &lt; b { }</code></pre>"
        );
    }

    #[test]
    fn code_block_language_defaults_to_plain() {
        let code = Block::Code(CodeBlock {
            common: BlockCommon::default(),
            language: None,
            content: TextBlockContent::new(vec![RichTextRun::plain_text("x")]),
        });
        assert_eq!(
            render_blocks(&[code]),
            "<pre><code class=\"language-plain\">x</code></pre>"
        );
    }

    #[test]
    fn block_equation_markers() {
        let eq = Block::Equation(EquationBlock {
            common: BlockCommon::default(),
            expression: "\\sum_{i} x_i".to_string(),
        });
        assert_eq!(
            render_blocks(&[eq]),
            "<div class=\"math-block\">$$\\sum_{i} x_i$$</div>"
        );
    }

    #[test]
    fn unsupported_block_falls_back_to_plain_text() {
        let block = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: "toggle".to_string(),
            content: TextBlockContent::new(vec![RichTextRun::plain_text("hidden <stuff>")]),
        });
        assert_eq!(render_blocks(&[block]), "<p>hidden &lt;stuff&gt;</p>");
    }

    #[test]
    fn unsupported_block_with_no_text_emits_nothing() {
        let block = Block::Unsupported(UnsupportedBlock {
            block_type: "breadcrumb".to_string(),
            ..Default::default()
        });
        assert_eq!(render_blocks(&[block]), "");
    }
}
