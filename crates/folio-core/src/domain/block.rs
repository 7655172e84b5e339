use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// One structural unit of post content.
///
/// The mapping the client sent is stored and serialized back untouched.
/// When its `type` is recognised and its fields have the expected shape it
/// is also parsed into a [`Block`] for rendering; anything else renders to
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ContentBlock {
    raw: Map<String, Value>,
    block: Option<Block>,
}

/// Block variants understood by the renderer, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    #[serde(rename = "heading1")]
    Heading1 {
        #[serde(default)]
        content: Option<String>,
    },
    #[serde(rename = "heading2")]
    Heading2 {
        #[serde(default)]
        content: Option<String>,
    },
    #[serde(rename = "paragraph")]
    Paragraph {
        #[serde(default)]
        content: Option<String>,
    },
    #[serde(rename = "bullet_list")]
    BulletList {
        #[serde(default)]
        items: Option<Vec<String>>,
    },
    #[serde(rename = "numbered_list")]
    NumberedList {
        #[serde(default)]
        items: Option<Vec<String>>,
    },
    #[serde(rename = "code_block")]
    CodeBlock {
        #[serde(default)]
        content: Option<String>,
        #[serde(default)]
        language: Option<String>,
    },
    #[serde(rename = "blockquote")]
    Blockquote {
        #[serde(default)]
        content: Option<String>,
    },
}

impl From<Map<String, Value>> for ContentBlock {
    fn from(raw: Map<String, Value>) -> Self {
        let block = serde_json::from_value(Value::Object(raw.clone())).ok();
        Self { raw, block }
    }
}

impl From<ContentBlock> for Map<String, Value> {
    fn from(block: ContentBlock) -> Self {
        block.raw
    }
}

impl ContentBlock {
    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::typed("paragraph", content.into())
    }

    pub fn heading1(content: impl Into<String>) -> Self {
        Self::typed("heading1", content.into())
    }

    fn typed(kind: &str, content: String) -> Self {
        let mut raw = Map::new();
        raw.insert("type".to_string(), json!(kind));
        raw.insert("content".to_string(), json!(content));
        raw.into()
    }

    /// The parsed block, if the renderer understands this one.
    pub fn block(&self) -> Option<&Block> {
        self.block.as_ref()
    }

    /// The mapping as stored.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// The block's `type` tag, if it has a string one.
    pub fn kind(&self) -> Option<&str> {
        self.raw.get("type").and_then(Value::as_str)
    }
}

impl Block {
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading1 { .. } => "heading1",
            Block::Heading2 { .. } => "heading2",
            Block::Paragraph { .. } => "paragraph",
            Block::BulletList { .. } => "bullet_list",
            Block::NumberedList { .. } => "numbered_list",
            Block::CodeBlock { .. } => "code_block",
            Block::Blockquote { .. } => "blockquote",
        }
    }
}
