//! Card composition.
//!
//! [`layout_card`] turns an excerpt into a [`CardLayout`]: a flat list of
//! border strokes and positioned text runs in logical units. Nothing here
//! touches pixels; the rasterizer only replays the list at a display scale.
//!
//! ```text
//!  ┌─ outer padding ────────────────────────────────┐
//!  │ ╔══════════════════════════════════════════╗   │
//!  │ ║  paragraph, left aligned                 ║   │
//!  │ ║                                          ║   │
//!  │ ║  paragraph                               ║   │
//!  │ ║                              — author    ║   │
//!  │ ║                                  book    ║   │
//!  │ ╚══════════════════════════════════════════╝   │
//!  │ Shared via Excerpt                             │
//!  └────────────────────────────────────────────────┘
//! ```

use crate::card::font::{CardFonts, LineMetrics};
use crate::card::text::{CardText, ShapedLine, shape, split_paragraphs, wrap};
use crate::card::{CardMetrics, CardOptions, Palette, style};
use crate::model::Excerpt;
use image::Rgba;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Paragraph(usize),
    Author,
    Book,
    SharedVia,
    AppName,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn inset(&self, by: f32) -> Rect {
        Rect {
            x: self.x + by,
            y: self.y + by,
            width: (self.width - 2.0 * by).max(0.0),
            height: (self.height - 2.0 * by).max(0.0),
        }
    }
}

/// A rectangle outline drawn inside its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderStroke {
    pub rect: Rect,
    pub stroke: f32,
    pub color: Rgba<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub role: TextRole,
    pub line: ShapedLine,
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
    pub color: Rgba<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: f32,
    pub height: f32,
    pub metrics: CardMetrics,
    pub background: Rgba<u8>,
    pub block: Rect,
    pub borders: Vec<BorderStroke>,
    pub runs: Vec<TextRun>,
    pub paragraph_count: usize,
}

impl CardLayout {
    pub fn has_attribution(&self) -> bool {
        self.runs
            .iter()
            .any(|r| matches!(r.role, TextRole::Author | TextRole::Book))
    }

    pub fn runs_with_role(&self, role: TextRole) -> impl Iterator<Item = &TextRun> {
        self.runs.iter().filter(move |r| r.role == role)
    }
}

struct LineStyle {
    size: f32,
    color: Rgba<u8>,
    metrics: LineMetrics,
    line_spacing: f32,
}

/// Vertical cursor that stacks lines top to bottom.
struct Stack<'a> {
    y: f32,
    runs: &'a mut Vec<TextRun>,
}

impl Stack<'_> {
    fn push_lines(
        &mut self,
        role: TextRole,
        lines: Vec<ShapedLine>,
        style: &LineStyle,
        place_x: impl Fn(&ShapedLine) -> f32,
    ) {
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                self.y += style.line_spacing;
            }
            self.runs.push(TextRun {
                role,
                x: place_x(&line),
                baseline: self.y + style.metrics.ascent,
                line,
                size: style.size,
                color: style.color,
            });
            self.y += style.metrics.height;
        }
    }
}

pub fn layout_card(excerpt: &Excerpt, options: &CardOptions, fonts: &CardFonts) -> CardLayout {
    let metrics = CardMetrics::new(options.width);
    let palette = Palette::default();
    let text = CardText::from_excerpt(excerpt);
    let paragraphs = split_paragraphs(&text.content, options.is_poem);

    let block_x = metrics.outer_padding;
    let block_y = metrics.outer_padding;
    let text_x = block_x + metrics.horizontal_padding;
    let right_edge = text_x + metrics.content_width;

    let body = &fonts.body.font;
    let paragraph_style = LineStyle {
        size: style::CONTENT_FONT_SIZE,
        color: palette.content,
        metrics: LineMetrics::of(body, style::CONTENT_FONT_SIZE),
        line_spacing: metrics.line_spacing,
    };
    // Attribution lines wrap with the font's own leading.
    let from_style = LineStyle {
        size: style::FROM_FONT_SIZE,
        color: palette.from,
        metrics: LineMetrics::of(body, style::FROM_FONT_SIZE),
        line_spacing: 0.0,
    };

    let mut runs = Vec::new();
    let mut stack = Stack {
        y: block_y + metrics.vertical_padding,
        runs: &mut runs,
    };

    for (i, paragraph) in paragraphs.iter().enumerate() {
        if i > 0 {
            stack.y += metrics.paragraph_spacing;
        }
        let lines = wrap(body, style::CONTENT_FONT_SIZE, paragraph, metrics.content_width);
        stack.push_lines(TextRole::Paragraph(i), lines, &paragraph_style, |_| text_x);
    }

    let mut attribution = Vec::new();
    if !text.author.is_empty() {
        attribution.push((TextRole::Author, format!("— {}", text.author)));
    }
    if !text.book.is_empty() {
        attribution.push((TextRole::Book, text.book.clone()));
    }

    if !attribution.is_empty() && !paragraphs.is_empty() {
        stack.y += metrics.from_spacing;
    }
    for (i, (role, line)) in attribution.into_iter().enumerate() {
        if i > 0 {
            stack.y += metrics.from_line_spacing;
        }
        let lines = wrap(body, style::FROM_FONT_SIZE, &line, metrics.content_width);
        stack.push_lines(role, lines, &from_style, |l| right_edge - l.width);
    }

    let block = Rect {
        x: block_x,
        y: block_y,
        width: metrics.inner_width,
        height: stack.y - block_y + metrics.vertical_padding,
    };
    let borders = vec![
        BorderStroke {
            rect: block,
            stroke: style::OUTER_BORDER_WIDTH,
            color: palette.border,
        },
        BorderStroke {
            rect: block.inset(style::INNER_BORDER_INSET),
            stroke: style::INNER_BORDER_WIDTH,
            color: palette.border,
        },
    ];

    let caption_y = block.y + block.height + style::BLOCK_BOTTOM_GAP;
    let caption_metrics = LineMetrics::of(&fonts.caption.font, style::WATERMARK_FONT_SIZE)
        .max_with(LineMetrics::of(&fonts.caption_bold.font, style::WATERMARK_FONT_SIZE));
    let shared_via = shape(
        &fonts.caption.font,
        style::WATERMARK_FONT_SIZE,
        &options.labels.shared_via,
    );
    let app_name_x = block_x + shared_via.width + style::WATERMARK_SPACING;
    runs.push(TextRun {
        role: TextRole::SharedVia,
        line: shared_via,
        x: block_x,
        baseline: caption_y + caption_metrics.ascent,
        size: style::WATERMARK_FONT_SIZE,
        color: palette.border,
    });
    runs.push(TextRun {
        role: TextRole::AppName,
        line: shape(
            &fonts.caption_bold.font,
            style::WATERMARK_FONT_SIZE,
            &options.labels.app_name,
        ),
        x: app_name_x,
        baseline: caption_y + caption_metrics.ascent,
        size: style::WATERMARK_FONT_SIZE,
        color: palette.watermark,
    });

    let height = caption_y + caption_metrics.height + metrics.outer_padding;

    debug!(
        width = options.width,
        height,
        paragraphs = paragraphs.len(),
        content_width = metrics.content_width,
        "laid out card"
    );

    CardLayout {
        width: options.width,
        height,
        metrics,
        background: palette.background,
        block,
        borders,
        runs,
        paragraph_count: paragraphs.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::WatermarkLabels;
    use crate::model::ExcerptKind;

    fn options(width: f32, is_poem: bool) -> CardOptions {
        CardOptions {
            width,
            scale: 1.0,
            is_poem,
            labels: WatermarkLabels::default(),
        }
    }

    fn layout(excerpt: &Excerpt, is_poem: bool) -> CardLayout {
        layout_card(excerpt, &options(390.0, is_poem), &CardFonts::bundled())
    }

    #[test]
    fn test_paragraph_count_general() {
        let excerpt = Excerpt::new(ExcerptKind::General, "", "", "One\n\nTwo\n  \nThree");
        assert_eq!(layout(&excerpt, false).paragraph_count, 3);
    }

    #[test]
    fn test_paragraph_count_poem() {
        let excerpt = Excerpt::new(ExcerptKind::Poem, "", "", "One\nTwo\n\nThree\n\n \n\n");
        let card = layout(&excerpt, true);
        assert_eq!(card.paragraph_count, 2);
        // Stanza lines stay separate lines inside one paragraph.
        assert_eq!(card.runs_with_role(TextRole::Paragraph(0)).count(), 2);
    }

    #[test]
    fn test_no_attribution_without_author_and_book() {
        let excerpt = Excerpt::new(ExcerptKind::General, "  ", "", "Hello");
        let card = layout(&excerpt, false);
        assert!(!card.has_attribution());
        assert_eq!(card.runs_with_role(TextRole::SharedVia).count(), 1);
        assert_eq!(card.runs_with_role(TextRole::AppName).count(), 1);
    }

    #[test]
    fn test_author_above_book_right_aligned() {
        let excerpt = Excerpt::new(ExcerptKind::General, "My Book", "Jane Doe", "Hello");
        let card = layout(&excerpt, false);

        let author = card.runs_with_role(TextRole::Author).next().unwrap();
        let book = card.runs_with_role(TextRole::Book).next().unwrap();
        assert_eq!(author.line.text, "— Jane Doe");
        assert_eq!(book.line.text, "My Book");
        assert!(author.baseline < book.baseline);

        let right = card.metrics.outer_padding
            + card.metrics.horizontal_padding
            + card.metrics.content_width;
        assert!((author.x + author.line.width - right).abs() < 0.01);
        assert!((book.x + book.line.width - right).abs() < 0.01);
    }

    #[test]
    fn test_only_book_line() {
        let excerpt = Excerpt::new(ExcerptKind::General, "My Book", "", "Hello");
        let card = layout(&excerpt, false);
        assert_eq!(card.runs_with_role(TextRole::Author).count(), 0);
        assert_eq!(card.runs_with_role(TextRole::Book).count(), 1);
    }

    #[test]
    fn test_paragraphs_left_aligned_inside_block() {
        let excerpt = Excerpt::new(ExcerptKind::General, "", "", "Hello\nWorld");
        let card = layout(&excerpt, false);
        let left = card.metrics.outer_padding + card.metrics.horizontal_padding;
        for run in card.runs.iter().filter(|r| matches!(r.role, TextRole::Paragraph(_))) {
            assert_eq!(run.x, left);
            assert!(run.baseline > card.block.y);
            assert!(run.baseline < card.block.y + card.block.height);
        }
    }

    #[test]
    fn test_empty_content_still_has_frame_and_watermark() {
        let excerpt = Excerpt::empty(ExcerptKind::General);
        let card = layout(&excerpt, false);
        assert_eq!(card.paragraph_count, 0);
        assert_eq!(card.borders.len(), 2);
        assert!((card.block.height - 2.0 * card.metrics.vertical_padding).abs() < 0.001);
        assert!(card.height > card.block.y + card.block.height);
    }

    #[test]
    fn test_double_border_geometry() {
        let excerpt = Excerpt::new(ExcerptKind::General, "", "", "Hello");
        let card = layout(&excerpt, false);
        let outer = card.borders[0];
        let inner = card.borders[1];
        assert_eq!(outer.rect, card.block);
        assert_eq!(outer.stroke, style::OUTER_BORDER_WIDTH);
        assert_eq!(inner.stroke, style::INNER_BORDER_WIDTH);
        assert_eq!(inner.rect.x, outer.rect.x + style::INNER_BORDER_INSET);
        assert_eq!(inner.rect.width, outer.rect.width - 2.0 * style::INNER_BORDER_INSET);
    }

    #[test]
    fn test_longer_content_is_taller() {
        let short = Excerpt::new(ExcerptKind::General, "", "", "Hello");
        let long = Excerpt::new(ExcerptKind::General, "", "", "Hello\nthere\nfriend");
        assert!(layout(&long, false).height > layout(&short, false).height);
    }

    #[test]
    fn test_watermark_follows_block() {
        let excerpt = Excerpt::new(ExcerptKind::General, "", "", "Hello");
        let card = layout(&excerpt, false);
        let shared = card.runs_with_role(TextRole::SharedVia).next().unwrap();
        let app = card.runs_with_role(TextRole::AppName).next().unwrap();
        assert_eq!(shared.x, card.metrics.outer_padding);
        assert!(app.x > shared.x + shared.line.width);
        assert!(shared.baseline > card.block.y + card.block.height);
    }
}
