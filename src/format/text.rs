//! Text helpers for rendering user-entered content.

use regex::Regex;
use std::sync::LazyLock;

static LINE_ENDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n?").expect("line ending pattern compiles"));
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("paragraph pattern compiles"));

/// Uppercase the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn plain text into paragraphs: blank lines split `<p>` blocks, single newlines
/// become `<br />`. Empty input stays empty. The text itself is not escaped.
pub fn simple_format(text: &str) -> String {
    let text = LINE_ENDING.replace_all(text, "\n");
    if text.is_empty() {
        return String::new();
    }

    let text = PARAGRAPH_BREAK.replace_all(&text, "</p><p>");
    let text = text.replace('\n', "<br />");
    format!("<p>{text}</p>")
}
