use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::block::{Block, ContentBlock};

/// Blocks considered when building a snippet.
const SNIPPET_BLOCKS: usize = 3;
/// Snippet length in characters before truncation kicks in.
const SNIPPET_MAX_CHARS: usize = 150;

/// Post entity - a titled document made of ordered content blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: Vec<ContentBlock>,
    /// Derived from `content`; rewritten whenever content changes.
    pub rendered_html: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new, not yet rendered post.
    pub fn new(title: String, slug: String, content: Vec<ContentBlock>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            content,
            rendered_html: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Plain-text preview for list views.
    ///
    /// Only paragraph blocks among the first three contribute; their text is
    /// joined with a space and cut at 150 characters with a trailing `...`.
    pub fn snippet(&self) -> String {
        let parts: Vec<&str> = self
            .content
            .iter()
            .take(SNIPPET_BLOCKS)
            .filter_map(|block| match block.block() {
                Some(Block::Paragraph { content: Some(text) }) if !text.is_empty() => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect();

        let snippet = parts.join(" ");
        if snippet.chars().count() > SNIPPET_MAX_CHARS {
            let truncated: String = snippet.chars().take(SNIPPET_MAX_CHARS).collect();
            format!("{truncated}...")
        } else {
            snippet
        }
    }
}
