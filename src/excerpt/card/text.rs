//! Text preparation for cards: normalization, paragraph splitting, glyph
//! placement and line wrapping.

use crate::card::font::em_scale;
use crate::model::{Excerpt, single_line};
use ab_glyph::{Font, FontArc, GlyphId, ScaleFont};
use unicode_width::UnicodeWidthChar;

/// Excerpt fields as they appear on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardText {
    pub content: String,
    pub author: String,
    pub book: String,
}

impl CardText {
    /// Author and book are one-line fields even though input may contain newlines.
    pub fn from_excerpt(excerpt: &Excerpt) -> Self {
        Self {
            content: excerpt.content.trim().to_string(),
            author: single_line(&excerpt.author),
            book: single_line(&excerpt.title),
        }
    }

    pub fn has_attribution(&self) -> bool {
        !(self.author.is_empty() && self.book.is_empty())
    }
}

/// Poems separate stanzas with a blank line; everything else breaks per line.
pub fn split_paragraphs(content: &str, is_poem: bool) -> Vec<String> {
    let delimiter = if is_poem { "\n\n" } else { "\n" };
    content
        .split(delimiter)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub id: GlyphId,
    /// Offset from the start of the line, in logical units.
    pub x: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapedLine {
    pub text: String,
    pub glyphs: Vec<PlacedGlyph>,
    pub width: f32,
}

/// Places glyphs left to right with kerning. No ligatures or bidi.
pub fn shape(font: &FontArc, size: f32, text: &str) -> ShapedLine {
    let scaled = font.as_scaled(em_scale(font, size));
    let mut glyphs = Vec::with_capacity(text.len());
    let mut cursor = 0.0;
    let mut previous: Option<GlyphId> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            cursor += scaled.kern(prev, id);
        }
        glyphs.push(PlacedGlyph { id, x: cursor });
        cursor += scaled.h_advance(id);
        previous = Some(id);
    }

    ShapedLine {
        text: text.to_string(),
        glyphs,
        width: cursor,
    }
}

fn is_wide(c: char) -> bool {
    c.width() == Some(2)
}

/// Splits a line into unbreakable pieces. Each piece carries its trailing
/// whitespace; wide characters stand alone since CJK text breaks anywhere.
fn segments(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space = false;

    for (i, c) in line.char_indices() {
        let boundary = if c.is_whitespace() {
            in_space = true;
            false
        } else if in_space || is_wide(c) {
            true
        } else {
            line[start..i].chars().next_back().is_some_and(is_wide)
        };
        if boundary && i > start {
            out.push(&line[start..i]);
            start = i;
        }
        if !c.is_whitespace() {
            in_space = false;
        }
    }
    if start < line.len() {
        out.push(&line[start..]);
    }
    out
}

/// Greedy wrap to `max_width`. Explicit newlines always break. A line always
/// holds at least one character, so a zero width still terminates.
pub fn wrap(font: &FontArc, size: f32, text: &str, max_width: f32) -> Vec<ShapedLine> {
    let mut lines = Vec::new();
    for hard_line in text.split('\n') {
        wrap_line(font, size, hard_line, max_width, &mut lines);
    }
    lines
}

fn wrap_line(font: &FontArc, size: f32, line: &str, max_width: f32, out: &mut Vec<ShapedLine>) {
    let mut current = String::new();

    for segment in segments(line) {
        let candidate = format!("{}{}", current, segment);
        if fits(font, size, candidate.trim_end(), max_width) {
            current = candidate;
            continue;
        }

        // Leading indentation that cannot share a line with the next word is dropped.
        if !current.trim_end().is_empty() {
            out.push(shape(font, size, current.trim_end()));
        }
        current.clear();

        if fits(font, size, segment.trim_end(), max_width) {
            current.push_str(segment);
        } else {
            // Too long for any line on its own: break between characters.
            for c in segment.chars() {
                let mut candidate = current.clone();
                candidate.push(c);
                if current.is_empty() || fits(font, size, candidate.trim_end(), max_width) {
                    current = candidate;
                } else {
                    out.push(shape(font, size, current.trim_end()));
                    current = c.to_string();
                }
            }
        }
    }

    out.push(shape(font, size, current.trim_end()));
}

fn fits(font: &FontArc, size: f32, text: &str, max_width: f32) -> bool {
    shape(font, size, text).width <= max_width
}
