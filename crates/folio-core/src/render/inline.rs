//! Markdown-like inline formatting for prose blocks.
//!
//! Three substitutions run in a fixed order over the same string: bold,
//! then italics, then links. Bold must run first, otherwise `**x**` would be
//! read as two empty italic spans. Surrounding text is not HTML-escaped.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex literal"));

#[allow(clippy::expect_used)]
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex literal"));

#[allow(clippy::expect_used)]
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid regex literal"));

/// Apply inline formatting to raw block text.
pub fn format_inline(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = BOLD.replace_all(text, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");
    let text = LINK.replace_all(&text, "<a href=\"${2}\">${1}</a>");
    text.into_owned()
}
