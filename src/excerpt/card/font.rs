//! Font resolution for cards.
//!
//! A card must always render, so resolution never fails: the requested family
//! (or font file) is tried first, then the system serif and sans-serif
//! families, and finally the font bundled into the binary.

use crate::card::layout::TextRole;
use crate::error::{ExcerptError, Result};
use ab_glyph::{Font, FontArc, FontVec, PxScale, ScaleFont};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Last resort. Covers Latin text; CJK glyphs fall back to the notdef box.
static BUNDLED_FONT: LazyLock<FontArc> =
    LazyLock::new(|| FontArc::try_from_slice(epaint_default_fonts::UBUNTU_LIGHT).unwrap());

pub const BUILTIN_FONT_NAME: &str = "builtin";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontChoice {
    Family(String),
    File(PathBuf),
    Builtin,
}

impl FontChoice {
    /// Interprets a user-supplied font setting: `builtin`, a font file path, or a family name.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(BUILTIN_FONT_NAME) {
            return FontChoice::Builtin;
        }
        let lower = value.to_ascii_lowercase();
        if [".ttf", ".otf", ".ttc", ".otc"]
            .iter()
            .any(|ext| lower.ends_with(ext))
        {
            return FontChoice::File(PathBuf::from(value));
        }
        FontChoice::Family(value.to_string())
    }
}

impl fmt::Display for FontChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontChoice::Family(name) => f.write_str(name),
            FontChoice::File(path) => write!(f, "{}", path.display()),
            FontChoice::Builtin => f.write_str(BUILTIN_FONT_NAME),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSource {
    Requested,
    SystemDefault,
    Bundled,
}

#[derive(Clone)]
pub struct ResolvedFont {
    pub font: FontArc,
    pub source: FontSource,
    /// Set when a bold face was asked for but only a regular one was found.
    pub synthetic_bold: bool,
}

impl ResolvedFont {
    pub fn bundled(bold: bool) -> Self {
        Self {
            font: BUNDLED_FONT.clone(),
            source: FontSource::Bundled,
            synthetic_bold: bold,
        }
    }
}

/// Scale at which one em equals `size` units.
///
/// `PxScale` measures ascent to descent, not the em square.
pub fn em_scale(font: &FontArc, size: f32) -> PxScale {
    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    let height = font.height_unscaled();
    if height <= 0.0 {
        return PxScale::from(size);
    }
    PxScale::from(size * height / units_per_em)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub height: f32,
}

impl LineMetrics {
    pub fn of(font: &FontArc, size: f32) -> Self {
        let scaled = font.as_scaled(em_scale(font, size));
        let ascent = scaled.ascent();
        let height = ascent - scaled.descent() + scaled.line_gap();
        Self { ascent, height }
    }

    /// Metrics of a line mixing two faces.
    pub fn max_with(self, other: LineMetrics) -> Self {
        Self {
            ascent: self.ascent.max(other.ascent),
            height: self.height.max(other.height),
        }
    }
}

pub fn load_font_file(path: &Path) -> Result<FontArc> {
    let data = std::fs::read(path)?;
    let font = FontVec::try_from_vec(data).map_err(|e| {
        ExcerptError::Font(format!("Failed to load font {}: {}", path.display(), e))
    })?;
    Ok(FontArc::new(font))
}

/// Index of the fonts available for rendering.
pub struct FontBook {
    db: Database,
}

impl FontBook {
    /// Loads every font installed on the system.
    pub fn system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!(faces = db.len(), "loaded system fonts");
        Self { db }
    }

    /// A book with no system fonts: every lookup resolves to the bundled font.
    /// Output is then identical on every machine.
    pub fn bundled_only() -> Self {
        Self {
            db: Database::new(),
        }
    }

    pub fn resolve(&self, choice: &FontChoice, weight: Weight) -> ResolvedFont {
        let bold = weight.0 >= Weight::SEMIBOLD.0;

        let requested = match choice {
            FontChoice::Family(name) => self.query(Family::Name(name.as_str()), weight),
            FontChoice::File(path) => match load_font_file(path) {
                Ok(font) => Some((font, bold)),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            },
            FontChoice::Builtin => return ResolvedFont::bundled(bold),
        };
        if let Some((font, synthetic_bold)) = requested {
            return ResolvedFont {
                font,
                source: FontSource::Requested,
                synthetic_bold,
            };
        }

        warn!(font = %choice, "font not available, falling back to system default");
        self.system_default(weight)
    }

    pub fn system_default(&self, weight: Weight) -> ResolvedFont {
        let bold = weight.0 >= Weight::SEMIBOLD.0;
        for family in [Family::Serif, Family::SansSerif] {
            if let Some((font, synthetic_bold)) = self.query(family, weight) {
                return ResolvedFont {
                    font,
                    source: FontSource::SystemDefault,
                    synthetic_bold,
                };
            }
        }
        debug!("no system font available, using bundled font");
        ResolvedFont::bundled(bold)
    }

    pub fn sans_serif(&self, weight: Weight) -> ResolvedFont {
        let bold = weight.0 >= Weight::SEMIBOLD.0;
        match self.query(Family::SansSerif, weight) {
            Some((font, synthetic_bold)) => ResolvedFont {
                font,
                source: FontSource::SystemDefault,
                synthetic_bold,
            },
            None => ResolvedFont::bundled(bold),
        }
    }

    fn query(&self, family: Family<'_>, weight: Weight) -> Option<(FontArc, bool)> {
        let families = [family];
        let id = self.db.query(&Query {
            families: &families,
            weight,
            stretch: Stretch::Normal,
            style: Style::Normal,
        })?;
        let face_weight = self.db.face(id).map(|face| face.weight)?;
        let font = self
            .db
            .with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index).ok()
            })
            .flatten()?;
        let synthetic_bold = weight.0 >= Weight::SEMIBOLD.0 && face_weight.0 < Weight::SEMIBOLD.0;
        Some((FontArc::new(font), synthetic_bold))
    }
}

/// The three faces a card uses.
#[derive(Clone)]
pub struct CardFonts {
    pub body: ResolvedFont,
    pub caption: ResolvedFont,
    pub caption_bold: ResolvedFont,
}

impl CardFonts {
    pub fn resolve(book: &FontBook, choice: &FontChoice) -> Self {
        Self {
            body: book.resolve(choice, Weight::NORMAL),
            caption: book.sans_serif(Weight::NORMAL),
            caption_bold: book.sans_serif(Weight::BOLD),
        }
    }

    pub fn bundled() -> Self {
        Self {
            body: ResolvedFont::bundled(false),
            caption: ResolvedFont::bundled(false),
            caption_bold: ResolvedFont::bundled(true),
        }
    }

    pub fn for_role(&self, role: TextRole) -> &ResolvedFont {
        match role {
            TextRole::Paragraph(_) | TextRole::Author | TextRole::Book => &self.body,
            TextRole::SharedVia => &self.caption,
            TextRole::AppName => &self.caption_bold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_choice_parse() {
        assert_eq!(FontChoice::parse("builtin"), FontChoice::Builtin);
        assert_eq!(FontChoice::parse("  "), FontChoice::Builtin);
        assert_eq!(
            FontChoice::parse("fonts/Serif.TTF"),
            FontChoice::File(PathBuf::from("fonts/Serif.TTF"))
        );
        assert_eq!(
            FontChoice::parse("Source Han Serif SC"),
            FontChoice::Family("Source Han Serif SC".to_string())
        );
    }

    #[test]
    fn test_missing_family_falls_back_to_bundled() {
        let book = FontBook::bundled_only();
        let resolved = book.resolve(
            &FontChoice::Family("Definitely Not Installed".to_string()),
            Weight::NORMAL,
        );
        assert_eq!(resolved.source, FontSource::Bundled);
        assert!(!resolved.synthetic_bold);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let book = FontBook::bundled_only();
        let resolved = book.resolve(
            &FontChoice::File(PathBuf::from("/nonexistent/font.ttf")),
            Weight::NORMAL,
        );
        assert_eq!(resolved.source, FontSource::Bundled);
    }

    #[test]
    fn test_font_file_is_used_when_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Ubuntu-Light.ttf");
        std::fs::write(&path, epaint_default_fonts::UBUNTU_LIGHT).unwrap();

        let fonts = CardFonts::resolve(&FontBook::bundled_only(), &FontChoice::File(path));
        assert_eq!(fonts.body.source, FontSource::Requested);
        assert_eq!(fonts.caption.source, FontSource::Bundled);
    }

    #[test]
    fn test_load_font_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(matches!(load_font_file(&path), Err(ExcerptError::Font(_))));
    }

    #[test]
    fn test_bundled_bold_is_synthetic() {
        let fonts = CardFonts::bundled();
        assert!(fonts.for_role(TextRole::AppName).synthetic_bold);
        assert!(!fonts.for_role(TextRole::SharedVia).synthetic_bold);
    }

    #[test]
    fn test_em_scale_matches_size_in_em() {
        let font = ResolvedFont::bundled(false).font;
        let scale = em_scale(&font, 17.0);
        let upem = font.units_per_em().unwrap();
        let em = scale.y * upem / font.height_unscaled();
        assert!((em - 17.0).abs() < 0.001);
    }

    #[test]
    fn test_line_metrics_positive() {
        let font = ResolvedFont::bundled(false).font;
        let metrics = LineMetrics::of(&font, 17.0);
        assert!(metrics.ascent > 0.0);
        assert!(metrics.height > metrics.ascent);
    }
}
