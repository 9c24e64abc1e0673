use crate::card::raster::pixel_size;
use crate::card::{self, CardFonts, CardOptions, FontChoice, FontSource, WatermarkLabels};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::{MAX_CARD_PIXELS, validate_card_size};
use crate::error::{ExcerptError, Result};
use crate::model::Excerpt;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Rendering settings for one card, after config and flags are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRequest {
    pub width: f32,
    pub scale: f32,
    pub labels: WatermarkLabels,
    pub font: FontChoice,
}

/// Checks the excerpt can be shared and renders it.
///
/// Long content can push the height past [`MAX_CARD_PIXELS`] even when the
/// width is fine, so the laid-out size is checked before any pixels are
/// allocated.
pub fn render(excerpt: &Excerpt, request: &CardRequest, fonts: &CardFonts) -> Result<RgbaImage> {
    if !excerpt.can_share() {
        return Err(ExcerptError::EmptyContent);
    }
    let (width, scale) = validate_card_size(request.width, request.scale)?;

    let options = CardOptions::for_excerpt(excerpt, width, scale).with_labels(request.labels.clone());
    let layout = card::layout_card(excerpt, &options, fonts);
    let (px_width, px_height) = pixel_size(&layout, scale);
    if px_width > MAX_CARD_PIXELS || px_height > MAX_CARD_PIXELS {
        return Err(ExcerptError::CardTooLarge {
            width: px_width,
            height: px_height,
            max: MAX_CARD_PIXELS,
        });
    }
    Ok(card::rasterize(&layout, fonts, scale))
}

fn font_fallback_warning(request: &CardRequest, fonts: &CardFonts) -> Option<CmdMessage> {
    let used = match (&request.font, fonts.body.source) {
        (FontChoice::Builtin, _) | (_, FontSource::Requested) => return None,
        (_, FontSource::SystemDefault) => "system default",
        (_, FontSource::Bundled) => "bundled",
    };
    Some(CmdMessage::warning(format!(
        "Font '{}' is not available, used the {} font",
        request.font, used
    )))
}

/// Renders the excerpt and writes it as a PNG to `output`.
pub fn run(
    excerpt: &Excerpt,
    request: &CardRequest,
    fonts: &CardFonts,
    output: &Path,
) -> Result<CmdResult> {
    let image = render(excerpt, request, fonts)?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    image.save_with_format(output, ImageFormat::Png)?;
    debug!(
        "wrote {}x{} card to {}",
        image.width(),
        image.height(),
        output.display()
    );

    let title = excerpt.share_title();
    let mut result = CmdResult::default()
        .with_excerpt(excerpt.clone())
        .with_card_path(output.to_path_buf())
        .with_share_title(title.clone());
    result.add_message(CmdMessage::success(format!(
        "Card saved to {} ({}x{})",
        output.display(),
        image.width(),
        image.height()
    )));
    if !title.is_empty() {
        result.add_message(CmdMessage::info(format!("Title: {}", title)));
    }
    if let Some(warning) = font_fallback_warning(request, fonts) {
        result.add_message(warning);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::ExcerptKind;

    fn request() -> CardRequest {
        CardRequest {
            width: 390.0,
            scale: 1.0,
            labels: WatermarkLabels::default(),
            font: FontChoice::Builtin,
        }
    }

    fn excerpt() -> Excerpt {
        Excerpt::new(ExcerptKind::General, "My Book", "Jane Doe", "Hello world.")
    }

    #[test]
    fn test_run_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cards").join("card.png");

        let result = run(&excerpt(), &request(), &CardFonts::bundled(), &output).unwrap();

        assert_eq!(result.card_paths, vec![output.clone()]);
        assert_eq!(result.share_title.as_deref(), Some("My Book"));
        let bytes = fs::read(&output).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::open(&output).unwrap();
        assert_eq!(decoded.width(), 390);
    }

    #[test]
    fn test_render_scales_pixels() {
        let mut req = request();
        req.scale = 2.0;
        let img = render(&excerpt(), &req, &CardFonts::bundled()).unwrap();
        assert_eq!(img.width(), 780);
    }

    #[test]
    fn test_empty_content_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("card.png");
        let blank = Excerpt::new(ExcerptKind::General, "Book", "Author", "");

        let result = run(&blank, &request(), &CardFonts::bundled(), &output);

        assert!(matches!(result, Err(ExcerptError::EmptyContent)));
        assert!(!output.exists());
    }

    #[test]
    fn test_whitespace_content_renders_blank_card() {
        let spaces = Excerpt::new(ExcerptKind::General, "Book", "Author", "  \n ");
        let img = render(&spaces, &request(), &CardFonts::bundled()).unwrap();
        assert_eq!(img.width(), 390);
    }

    #[test]
    fn test_invalid_width_and_scale() {
        let fonts = CardFonts::bundled();
        let mut req = request();
        req.width = 0.0;
        assert!(matches!(
            render(&excerpt(), &req, &fonts),
            Err(ExcerptError::InvalidWidth(_))
        ));

        let mut req = request();
        req.scale = f32::NAN;
        assert!(matches!(
            render(&excerpt(), &req, &fonts),
            Err(ExcerptError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_oversized_card_is_refused() {
        let fonts = CardFonts::bundled();

        let mut req = request();
        req.width = 100_000_000.0;
        assert!(matches!(
            render(&excerpt(), &req, &fonts),
            Err(ExcerptError::InvalidWidth(_))
        ));

        let mut req = request();
        req.width = 1e30;
        assert!(matches!(
            render(&excerpt(), &req, &fonts),
            Err(ExcerptError::InvalidWidth(_))
        ));

        let mut req = request();
        req.scale = 1000.0;
        assert!(matches!(
            render(&excerpt(), &req, &fonts),
            Err(ExcerptError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_too_tall_card_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("card.png");
        let content = vec!["A line of its own."; 2000].join("\n");
        let long = Excerpt::new(ExcerptKind::General, "Book", "Author", &content);
        let mut req = request();
        req.scale = 2.0;

        let result = run(&long, &req, &CardFonts::bundled(), &output);

        match result {
            Err(ExcerptError::CardTooLarge { width, height, max }) => {
                assert_eq!(width, 780);
                assert!(height > max);
            }
            other => panic!("expected CardTooLarge, got {:?}", other.map(|r| r.messages)),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_font_fallback_adds_warning() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("card.png");
        let mut req = request();
        req.font = FontChoice::Family("Missing Serif".to_string());

        let result = run(&excerpt(), &req, &CardFonts::bundled(), &output).unwrap();

        let warnings: Vec<_> = result
            .messages
            .iter()
            .filter(|m| m.level == MessageLevel::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].content,
            "Font 'Missing Serif' is not available, used the bundled font"
        );

        let result = run(&excerpt(), &request(), &CardFonts::bundled(), &output).unwrap();
        assert!(result.messages.iter().all(|m| m.level != MessageLevel::Warning));
    }
}
