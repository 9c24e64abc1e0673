use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of an excerpt. The raw values are what the preferences store keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExcerptKind {
    #[default]
    General,
    Poem,
}

impl ExcerptKind {
    pub const ALL: [ExcerptKind; 2] = [ExcerptKind::General, ExcerptKind::Poem];

    pub fn raw_value(self) -> i64 {
        match self {
            ExcerptKind::General => 0,
            ExcerptKind::Poem => 1,
        }
    }

    pub fn from_raw(raw: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.raw_value() == raw)
    }

    pub fn is_poem(self) -> bool {
        matches!(self, ExcerptKind::Poem)
    }

    pub fn name(self) -> &'static str {
        match self {
            ExcerptKind::General => "general",
            ExcerptKind::Poem => "poem",
        }
    }
}

impl fmt::Display for ExcerptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExcerptKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" | "text" | "0" => Ok(ExcerptKind::General),
            "poem" | "1" => Ok(ExcerptKind::Poem),
            other => Err(format!(
                "Unknown excerpt kind: {} (expected general or poem)",
                other
            )),
        }
    }
}

/// One excerpt being edited. `title` holds the book name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Excerpt {
    pub kind: ExcerptKind,
    pub title: String,
    pub author: String,
    pub content: String,
}

impl Excerpt {
    pub fn new(
        kind: ExcerptKind,
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            author: author.into(),
            content: content.into(),
        }
    }

    pub fn empty(kind: ExcerptKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Sharing requires non-empty content. Whitespace counts and renders as a blank card.
    pub fn can_share(&self) -> bool {
        !self.content.is_empty()
    }

    /// Title used for the share preview: the book, else the first content line.
    pub fn share_title(&self) -> String {
        let book = single_line(&self.title);
        if !book.is_empty() {
            return book;
        }
        self.content
            .trim()
            .lines()
            .next()
            .map(|l| l.trim().to_string())
            .unwrap_or_default()
    }
}

/// Trims and folds embedded newlines into single spaces, for one-line fields.
pub fn single_line(s: &str) -> String {
    s.trim().replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_raw_values_round_trip() {
        for kind in ExcerptKind::ALL {
            assert_eq!(ExcerptKind::from_raw(kind.raw_value()), Some(kind));
        }
        assert_eq!(ExcerptKind::from_raw(42), None);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Poem".parse::<ExcerptKind>(), Ok(ExcerptKind::Poem));
        assert_eq!("general".parse::<ExcerptKind>(), Ok(ExcerptKind::General));
        assert!("novel".parse::<ExcerptKind>().is_err());
    }

    #[test]
    fn test_can_share_requires_content() {
        let mut excerpt = Excerpt::empty(ExcerptKind::General);
        assert!(!excerpt.can_share());
        excerpt.content = "  \n ".to_string();
        assert!(excerpt.can_share());
        excerpt.content = "Something".to_string();
        assert!(excerpt.can_share());
    }

    #[test]
    fn test_share_title_prefers_book() {
        let excerpt = Excerpt::new(ExcerptKind::General, " My\nBook ", "", "Line one\nLine two");
        assert_eq!(excerpt.share_title(), "My Book");
    }

    #[test]
    fn test_share_title_falls_back_to_content() {
        let excerpt = Excerpt::new(ExcerptKind::General, "", "", "\n  Line one \nLine two");
        assert_eq!(excerpt.share_title(), "Line one");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("  Jane\nDoe \n"), "Jane Doe");
    }
}
