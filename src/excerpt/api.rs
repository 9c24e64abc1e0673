//! # API Facade
//!
//! `ExcerptApi` is the single entry point for excerpt operations. It
//! dispatches to `commands/*.rs`, merges stored configuration with per-call
//! overrides, and resolves fonts. It never prints; every method returns a
//! [`CmdResult`](crate::commands::CmdResult) for the UI to present.
//!
//! The facade is generic over [`PreferencesStore`]:
//! - Production: `ExcerptApi<FilePreferences>`
//! - Testing: `ExcerptApi<InMemoryPreferences>`

use crate::card::{CardFonts, FontBook, FontChoice};
use crate::commands;
use crate::commands::card::CardRequest;
use crate::config::ExcerptConfig;
use crate::error::Result;
use crate::model::{Excerpt, ExcerptKind};
use crate::prefs::{self, PreferencesStore};
use image::RgbaImage;
use std::path::Path;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, ExcerptPaths, MessageLevel};

/// Per-invocation overrides for card rendering. `None` falls back to config.
#[derive(Debug, Clone, Default)]
pub struct CardOverrides {
    pub width: Option<f32>,
    pub scale: Option<f32>,
    pub font: Option<String>,
}

pub struct ExcerptApi<P: PreferencesStore> {
    prefs: P,
    paths: ExcerptPaths,
    fonts: FontBook,
}

impl<P: PreferencesStore> ExcerptApi<P> {
    pub fn new(prefs: P, paths: ExcerptPaths, fonts: FontBook) -> Self {
        Self {
            prefs,
            paths,
            fonts,
        }
    }

    /// A blank excerpt whose kind is the one last chosen.
    pub fn new_excerpt(&self) -> Result<Excerpt> {
        Ok(Excerpt::empty(prefs::initial_kind(&self.prefs)?))
    }

    pub fn paste(&self, excerpt: &mut Excerpt, raw: &str) -> Result<CmdResult> {
        commands::paste::run(excerpt, raw)
    }

    pub fn kind(&self) -> Result<CmdResult> {
        commands::kind::show(&self.prefs)
    }

    pub fn set_kind(&mut self, excerpt: &mut Excerpt, kind: ExcerptKind) -> Result<CmdResult> {
        commands::kind::set(&mut self.prefs, excerpt, kind)
    }

    pub fn render_card(&self, excerpt: &Excerpt, overrides: &CardOverrides) -> Result<RgbaImage> {
        let (request, fonts) = self.card_setup(overrides)?;
        commands::card::render(excerpt, &request, &fonts)
    }

    pub fn write_card(
        &self,
        excerpt: &Excerpt,
        overrides: &CardOverrides,
        output: &Path,
    ) -> Result<CmdResult> {
        let (request, fonts) = self.card_setup(overrides)?;
        commands::card::run(excerpt, &request, &fonts, output)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    fn card_setup(&self, overrides: &CardOverrides) -> Result<(CardRequest, CardFonts)> {
        let config = ExcerptConfig::load(&self.paths.home)?;
        let choice = match &overrides.font {
            Some(font) => FontChoice::parse(font),
            None => config.font_choice(),
        };
        let request = CardRequest {
            width: overrides.width.unwrap_or(config.width),
            scale: overrides.scale.unwrap_or(config.scale),
            labels: config.labels(),
            font: choice.clone(),
        };
        Ok((request, CardFonts::resolve(&self.fonts, &choice)))
    }
}
