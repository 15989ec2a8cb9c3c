//! Markup utilities: plain-text projection and insert builders.
//!
//! # Responsibility
//! - Derive plain text and word/character statistics from page markup.
//! - Build the markup fragments for link/image/table insertion.
//!
//! # Invariants
//! - Builders reject missing required fields by returning `None`; they
//!   never emit partial markup.
//! - Statistics count words as whitespace-separated non-empty tokens.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Word and character counts for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub words: usize,
    pub chars: usize,
}

/// Strips tags and normalizes entities/whitespace out of markup.
pub fn plain_text(markup: &str) -> String {
    let without_tags = TAG_RE.replace_all(markup, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Counts words and characters of the plain-text projection.
pub fn text_stats(markup: &str) -> TextStats {
    let text = plain_text(markup);
    TextStats {
        words: text.split_whitespace().count(),
        chars: text.chars().count(),
    }
}

/// Builds an anchor fragment for link insertion.
///
/// Returns `None` when text or url is empty after trimming.
pub fn link_markup(text: &str, url: &str) -> Option<String> {
    let text = text.trim();
    let url = url.trim();
    if text.is_empty() || url.is_empty() {
        return None;
    }
    Some(format!("<a href=\"{url}\" target=\"_blank\">{text}</a>"))
}

/// Builds an image fragment for image insertion. Alt text is optional.
///
/// Returns `None` when the url is empty after trimming.
pub fn image_markup(url: &str, alt: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    Some(format!(
        "<img src=\"{url}\" alt=\"{}\" style=\"max-width: 100%; height: auto; margin: 10px 0;\">",
        alt.trim()
    ))
}

/// Builds a bordered table fragment with `&nbsp;` placeholder cells.
///
/// Returns `None` when either dimension is zero.
pub fn table_markup(rows: usize, cols: usize) -> Option<String> {
    if rows == 0 || cols == 0 {
        return None;
    }

    let mut table = String::from(
        "<table border=\"1\" style=\"border-collapse: collapse; width: 100%; margin: 10px 0;\">",
    );
    for _ in 0..rows {
        table.push_str("<tr>");
        for _ in 0..cols {
            table.push_str(
                "<td style=\"border: 1px solid #ddd; padding: 8px; min-width: 100px; min-height: 30px;\">&nbsp;</td>",
            );
        }
        table.push_str("</tr>");
    }
    table.push_str("</table>");
    Some(table)
}
