//! # Books Paste Import
//!
//! Copying a passage in Apple Books puts a fixed shape on the clipboard:
//!
//! ```text
//! “The quoted passage, possibly
//! spanning several lines.”
//! 摘录来自
//! Book Name
//! Author Name
//! 此材料受版权保护。
//! ```
//!
//! [`parse`] recognizes that shape with a single anchored pattern and hands back
//! the three captured fields verbatim. Trimming is the renderer's job, not ours.
//! [`apply_paste`] writes a successful parse into an [`Excerpt`].

use crate::error::{ExcerptError, Result};
use crate::model::Excerpt;
use regex_lite::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Marker line preceding the book name.
pub const EXCERPT_FROM_MARKER: &str = "摘录来自";

/// Boilerplate line that ends every Books excerpt.
pub const COPYRIGHT_NOTICE: &str = "此材料受版权保护。";

/// Unicode whitespace allowed between the closing quote and the marker.
/// Written out because `\s` in regex-lite only matches ASCII whitespace.
const QUOTE_TO_MARKER_GAP: &str = "[\t\n\u{0B}\u{0C}\r \u{85}\u{A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}]*";

/// Content is greedy, so it runs from the first `“` to the last `”`.
static BOOKS_EXCERPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^“([\s\S]*)”{}{}\n([^\n]+)\n([^\n]+)\n{}$",
        QUOTE_TO_MARKER_GAP, EXCERPT_FROM_MARKER, COPYRIGHT_NOTICE
    ))
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooksExcerpt {
    pub content: String,
    pub book: String,
    pub author: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteError {
    /// Nothing was pasted. Not worth interrupting the user over.
    Empty,
    NotRecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    Applied,
    Unchanged,
}

pub fn parse(raw: &str) -> std::result::Result<BooksExcerpt, PasteError> {
    if raw.is_empty() {
        return Err(PasteError::Empty);
    }

    let caps = BOOKS_EXCERPT_RE
        .captures(raw)
        .ok_or(PasteError::NotRecognized)?;
    let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());

    match (group(1), group(2), group(3)) {
        (Some(content), Some(book), Some(author)) => Ok(BooksExcerpt {
            content,
            book,
            author,
        }),
        _ => Err(PasteError::NotRecognized),
    }
}

/// Overwrites content, title and author on success. On any failure the
/// excerpt is left exactly as it was.
pub fn apply_paste(excerpt: &mut Excerpt, raw: &str) -> Result<PasteOutcome> {
    match parse(raw) {
        Ok(parsed) => {
            debug!(
                book = %parsed.book,
                author = %parsed.author,
                content_len = parsed.content.len(),
                "recognized Books excerpt"
            );
            excerpt.content = parsed.content;
            excerpt.title = parsed.book;
            excerpt.author = parsed.author;
            Ok(PasteOutcome::Applied)
        }
        Err(PasteError::Empty) => Ok(PasteOutcome::Unchanged),
        Err(PasteError::NotRecognized) => {
            debug!(len = raw.len(), "paste did not match the Books format");
            Err(ExcerptError::NotRecognized)
        }
    }
}
