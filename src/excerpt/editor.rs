use crate::error::{ExcerptError, Result};
use crate::model::{Excerpt, ExcerptKind};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

const BOOK_HEADER: &str = "Book:";
const AUTHOR_HEADER: &str = "Author:";

/// Represents the excerpt fields as laid out in an editor buffer.
/// Format: `Book: …` and `Author: …` header lines, a blank line, then content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContent {
    pub title: String,
    pub author: String,
    pub content: String,
}

impl EditorContent {
    pub fn from_excerpt(excerpt: &Excerpt) -> Self {
        Self {
            title: excerpt.title.clone(),
            author: excerpt.author.clone(),
            content: excerpt.content.clone(),
        }
    }

    pub fn into_excerpt(self, kind: ExcerptKind) -> Excerpt {
        Excerpt::new(kind, self.title, self.author, self.content)
    }

    /// Formats the fields for the editor buffer. Header values are kept on one line.
    pub fn to_buffer(&self) -> String {
        format!(
            "{} {}\n{} {}\n\n{}",
            BOOK_HEADER,
            self.title.replace('\n', " "),
            AUTHOR_HEADER,
            self.author.replace('\n', " "),
            self.content
        )
    }

    /// Parses an editor buffer back into fields.
    /// Header lines are optional; a buffer without them is all content.
    pub fn from_buffer(buffer: &str) -> Self {
        let mut title = String::new();
        let mut author = String::new();
        let mut rest = buffer;

        loop {
            let (line, remainder) = match rest.split_once('\n') {
                Some((line, remainder)) => (line, remainder),
                None => (rest, ""),
            };
            if let Some(value) = strip_header(line, BOOK_HEADER) {
                title = value;
            } else if let Some(value) = strip_header(line, AUTHOR_HEADER) {
                author = value;
            } else {
                break;
            }
            rest = remainder;
            if rest.is_empty() {
                break;
            }
        }

        Self {
            title,
            author,
            content: rest.trim_matches('\n').to_string(),
        }
    }
}

fn strip_header(line: &str, header: &str) -> Option<String> {
    let head = line.get(..header.len())?;
    if head.eq_ignore_ascii_case(header) {
        Some(line[header.len()..].trim().to_string())
    } else {
        None
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var)
            && !editor.is_empty()
        {
            return Ok(editor);
        }
    }

    // Try common fallbacks
    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(ExcerptError::Editor(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments, e.g. "code --wait".
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ExcerptError::Editor("Empty editor command".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| ExcerptError::Editor(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(ExcerptError::Editor(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Opens an editor with initial content and returns the edited content.
pub fn edit_content(initial: &EditorContent) -> Result<EditorContent> {
    let temp_file = env::temp_dir().join(format!("excerpt_edit_{}.txt", std::process::id()));

    fs::write(&temp_file, initial.to_buffer())?;
    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(EditorContent::from_buffer(&result?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(title: &str, author: &str, body: &str) -> EditorContent {
        EditorContent {
            title: title.to_string(),
            author: author.to_string(),
            content: body.to_string(),
        }
    }

    #[test]
    fn test_to_buffer() {
        let ec = content("My Book", "Jane Doe", "Some content.");
        assert_eq!(
            ec.to_buffer(),
            "Book: My Book\nAuthor: Jane Doe\n\nSome content."
        );
    }

    #[test]
    fn test_to_buffer_folds_header_newlines() {
        let ec = content("Two\nLines", "", "");
        assert_eq!(ec.to_buffer(), "Book: Two Lines\nAuthor: \n\n");
    }

    #[test]
    fn test_from_buffer_normal() {
        let ec = EditorContent::from_buffer("Book: My Book\nAuthor: Jane\n\nLine one\n\nLine two\n");
        assert_eq!(ec, content("My Book", "Jane", "Line one\n\nLine two"));
    }

    #[test]
    fn test_from_buffer_headers_case_insensitive() {
        let ec = EditorContent::from_buffer("book:  B \nAUTHOR: A\n\nText");
        assert_eq!(ec, content("B", "A", "Text"));
    }

    #[test]
    fn test_from_buffer_without_headers() {
        let ec = EditorContent::from_buffer("Just some text\nover two lines");
        assert_eq!(ec, content("", "", "Just some text\nover two lines"));
    }

    #[test]
    fn test_from_buffer_headers_only() {
        let ec = EditorContent::from_buffer("Book: B\nAuthor: A");
        assert_eq!(ec, content("B", "A", ""));
    }

    #[test]
    fn test_from_buffer_empty() {
        assert_eq!(EditorContent::from_buffer(""), content("", "", ""));
    }

    #[test]
    fn test_roundtrip() {
        let original = content("Book", "Author", "First\n\nSecond");
        assert_eq!(EditorContent::from_buffer(&original.to_buffer()), original);
    }

    #[test]
    fn test_into_excerpt_keeps_kind() {
        let excerpt = content("B", "A", "C").into_excerpt(ExcerptKind::Poem);
        assert_eq!(excerpt, Excerpt::new(ExcerptKind::Poem, "B", "A", "C"));
    }
}
