//! # Cards
//!
//! A card is the shareable picture of an excerpt: the passage inside a
//! double-ruled frame, an optional right-aligned attribution, and a small
//! watermark underneath.
//!
//! Rendering is a pure function of its inputs and runs in two steps:
//!
//! 1. [`layout::layout_card`] computes a [`layout::CardLayout`] in logical units
//!    (points). Width is fixed by the caller; height follows from the content.
//! 2. [`raster::rasterize`] paints that layout into an RGBA bitmap at a display
//!    scale (pixels per point).
//!
//! [`render`] chains the two. Nothing is cached between calls, and the same
//! inputs always give the same pixels.
//!
//! ## Metrics
//!
//! All spacing derives from the card width and the body font size `S`:
//!
//! | Metric | Value |
//! |--------|-------|
//! | outer padding | 15 |
//! | inner width | `width - 2 * 15` |
//! | content width | `inner - 3S`, rounded down to a multiple of `S` |
//! | horizontal padding | `(inner - content) / 2` |
//! | vertical padding | `1.6 * horizontal padding` |
//! | paragraph spacing | `S` |
//! | attribution spacing | horizontal padding |

pub mod font;
pub mod layout;
pub mod raster;
pub mod text;

use crate::model::Excerpt;
use image::{Rgba, RgbaImage};

pub use font::{CardFonts, FontBook, FontChoice, FontSource};
pub use layout::{CardLayout, TextRole, layout_card};
pub use raster::rasterize;

pub mod style {
    pub const OUTER_PADDING: f32 = 15.0;
    pub const CONTENT_FONT_SIZE: f32 = 17.0;
    pub const FROM_FONT_SIZE: f32 = 14.0;
    pub const WATERMARK_FONT_SIZE: f32 = 10.0;

    /// Side margins reserved inside the frame, in multiples of the body size.
    pub const CONTENT_MARGIN_EMS: f32 = 3.0;
    pub const VERTICAL_PADDING_FACTOR: f32 = 1.6;
    pub const LINE_SPACING_FACTOR: f32 = 0.2;

    pub const OUTER_BORDER_WIDTH: f32 = 0.7;
    pub const INNER_BORDER_WIDTH: f32 = 0.5;
    pub const INNER_BORDER_INSET: f32 = 2.0;

    pub const BLOCK_BOTTOM_GAP: f32 = 3.0;
    pub const WATERMARK_SPACING: f32 = 2.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba<u8>,
    pub content: Rgba<u8>,
    pub from: Rgba<u8>,
    pub border: Rgba<u8>,
    pub watermark: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba([0xF9, 0xF9, 0xFB, 0xFF]),
            content: Rgba([0x27, 0x22, 0x20, 0xFF]),
            from: Rgba([0x51, 0x4A, 0x48, 0xFF]),
            border: Rgba([0xD0, 0xCD, 0xCF, 0xFF]),
            watermark: Rgba([0xD0, 0xCD, 0xCF, 0xFF]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkLabels {
    pub shared_via: String,
    pub app_name: String,
}

impl Default for WatermarkLabels {
    fn default() -> Self {
        Self {
            shared_via: "Shared via".to_string(),
            app_name: "Excerpt".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardOptions {
    /// Card width in points.
    pub width: f32,
    /// Pixels per point.
    pub scale: f32,
    pub is_poem: bool,
    pub labels: WatermarkLabels,
}

impl CardOptions {
    pub fn for_excerpt(excerpt: &Excerpt, width: f32, scale: f32) -> Self {
        Self {
            width,
            scale,
            is_poem: excerpt.kind.is_poem(),
            labels: WatermarkLabels::default(),
        }
    }

    pub fn with_labels(mut self, labels: WatermarkLabels) -> Self {
        self.labels = labels;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMetrics {
    pub width: f32,
    pub outer_padding: f32,
    pub inner_width: f32,
    pub content_width: f32,
    pub horizontal_padding: f32,
    pub vertical_padding: f32,
    pub from_spacing: f32,
    pub paragraph_spacing: f32,
    pub line_spacing: f32,
    pub from_line_spacing: f32,
}

impl CardMetrics {
    pub fn new(width: f32) -> Self {
        let size = style::CONTENT_FONT_SIZE;
        let inner_width = (width - 2.0 * style::OUTER_PADDING).max(0.0);
        let available = inner_width - style::CONTENT_MARGIN_EMS * size;
        // Snap to the body size grid so every card width looks alike.
        let content_width = ((available / size).floor() * size).max(0.0);
        let horizontal_padding = (inner_width - content_width) / 2.0;

        Self {
            width,
            outer_padding: style::OUTER_PADDING,
            inner_width,
            content_width,
            horizontal_padding,
            vertical_padding: horizontal_padding * style::VERTICAL_PADDING_FACTOR,
            from_spacing: horizontal_padding,
            paragraph_spacing: size,
            line_spacing: size * style::LINE_SPACING_FACTOR,
            from_line_spacing: style::FROM_FONT_SIZE * style::LINE_SPACING_FACTOR,
        }
    }
}

/// Lays out and paints a card.
pub fn render(excerpt: &Excerpt, options: &CardOptions, fonts: &CardFonts) -> RgbaImage {
    let layout = layout_card(excerpt, options, fonts);
    rasterize(&layout, fonts, options.scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExcerptKind;

    #[test]
    fn test_metrics_for_phone_width() {
        let m = CardMetrics::new(390.0);
        assert_eq!(m.inner_width, 360.0);
        assert_eq!(m.content_width, 306.0);
        assert_eq!(m.content_width % 17.0, 0.0);
        assert!(m.content_width < 390.0 - 30.0);
        assert_eq!(m.horizontal_padding, 27.0);
        assert!((m.vertical_padding - 43.2).abs() < 0.001);
        assert_eq!(m.from_spacing, m.horizontal_padding);
        assert_eq!(m.paragraph_spacing, 17.0);
        assert!((m.from_line_spacing - 2.8).abs() < 0.001);
    }

    #[test]
    fn test_metrics_grid_aligned_across_widths() {
        for width in [200.0, 320.0, 366.0, 414.0, 768.0, 1024.5] {
            let m = CardMetrics::new(width);
            assert_eq!(m.content_width % 17.0, 0.0, "width {}", width);
            assert!(m.content_width <= m.inner_width - 3.0 * 17.0);
            assert!(m.content_width > m.inner_width - 4.0 * 17.0);
        }
    }

    #[test]
    fn test_metrics_tiny_width_clamps() {
        let m = CardMetrics::new(40.0);
        assert_eq!(m.content_width, 0.0);
        assert_eq!(m.inner_width, 10.0);
        assert_eq!(m.horizontal_padding, 5.0);
    }

    #[test]
    fn test_options_follow_kind() {
        let poem = Excerpt::empty(ExcerptKind::Poem);
        assert!(CardOptions::for_excerpt(&poem, 390.0, 2.0).is_poem);
        let text = Excerpt::empty(ExcerptKind::General);
        assert!(!CardOptions::for_excerpt(&text, 390.0, 2.0).is_poem);
    }

    #[test]
    fn test_render_size_follows_width_and_scale() {
        let excerpt = Excerpt::new(ExcerptKind::General, "Book", "Author", "Hello world.");
        let options = CardOptions::for_excerpt(&excerpt, 390.0, 2.0);
        let fonts = CardFonts::bundled();
        let layout = layout_card(&excerpt, &options, &fonts);
        let image = render(&excerpt, &options, &fonts);
        assert_eq!(image.width(), 780);
        assert_eq!(image.height(), (layout.height * 2.0).ceil() as u32);
    }
}
