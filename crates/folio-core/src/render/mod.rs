//! Server-side rendering of content blocks into HTML.
//!
//! Each recognised block becomes one HTML fragment and fragments are joined
//! with a newline. Paragraphs, quotes and list items go through
//! [`format_inline`]; headings and code are emitted as-is. Unknown blocks
//! produce nothing.

mod inline;

pub use inline::format_inline;

use crate::domain::{Block, ContentBlock};

/// Render an ordered sequence of blocks into a single HTML string.
pub fn render_blocks(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(ContentBlock::block)
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Heading1 { content } => format!("<h1>{}</h1>", text(content)),
        Block::Heading2 { content } => format!("<h2>{}</h2>", text(content)),
        Block::Paragraph { content } => format!("<p>{}</p>", format_inline(text(content))),
        Block::BulletList { items } => render_list("ul", items.as_deref()),
        Block::NumberedList { items } => render_list("ol", items.as_deref()),
        Block::CodeBlock { content, language } => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            text(language),
            text(content)
        ),
        Block::Blockquote { content } => {
            format!("<blockquote>{}</blockquote>", format_inline(text(content)))
        }
    }
}

fn render_list(tag: &str, items: Option<&[String]>) -> String {
    let mut html = format!("<{tag}>");
    for item in items.unwrap_or_default() {
        html.push_str("<li>");
        html.push_str(&format_inline(item));
        html.push_str("</li>");
    }
    html.push_str(&format!("</{tag}>"));
    html
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
