//! # Configuration
//!
//! Rendering defaults live in `config.json` inside the excerpt home directory
//! (`$EXCERPT_HOME`, or the platform data directory). Command-line flags
//! override them per invocation.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `width` | `366` | Card width in points |
//! | `scale` | `3` | Pixels per point |
//! | `font` | `Source Han Serif SC` | Family name, font file path, or `builtin` |
//! | `shared-via` | `Shared via` | Light watermark label |
//! | `app-name` | `Excerpt` | Bold watermark label |

use crate::card::{FontChoice, WatermarkLabels};
use crate::error::{ExcerptError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

const CONFIG_FILENAME: &str = "config.json";

/// A 390pt wide phone screen minus 12pt on either side.
const DEFAULT_WIDTH: f32 = 366.0;
const DEFAULT_SCALE: f32 = 3.0;
const DEFAULT_FONT: &str = "Source Han Serif SC";

/// Largest card side in pixels, after scaling.
pub const MAX_CARD_PIXELS: u32 = 16384;

pub const KEYS: [&str; 5] = ["width", "scale", "font", "shared-via", "app-name"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExcerptConfig {
    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default = "default_scale")]
    pub scale: f32,

    #[serde(default = "default_font")]
    pub font: String,

    #[serde(default = "default_shared_via")]
    pub shared_via_label: String,

    #[serde(default = "default_app_name")]
    pub app_name: String,
}

fn default_width() -> f32 {
    DEFAULT_WIDTH
}

fn default_scale() -> f32 {
    DEFAULT_SCALE
}

fn default_font() -> String {
    DEFAULT_FONT.to_string()
}

fn default_shared_via() -> String {
    WatermarkLabels::default().shared_via
}

fn default_app_name() -> String {
    WatermarkLabels::default().app_name
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            scale: default_scale(),
            font: default_font(),
            shared_via_label: default_shared_via(),
            app_name: default_app_name(),
        }
    }
}

pub fn validate_width(width: f32) -> Result<f32> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(ExcerptError::InvalidWidth(width))
    }
}

pub fn validate_scale(scale: f32) -> Result<f32> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(ExcerptError::InvalidScale(scale))
    }
}

fn fits_pixel_limit(width: f32, scale: f32) -> bool {
    width * scale <= MAX_CARD_PIXELS as f32
}

/// Checks width and scale together; the scaled width must stay within
/// [`MAX_CARD_PIXELS`].
pub fn validate_card_size(width: f32, scale: f32) -> Result<(f32, f32)> {
    let width = validate_width(width)?;
    let scale = validate_scale(scale)?;
    if fits_pixel_limit(width, scale) {
        Ok((width, scale))
    } else if width > MAX_CARD_PIXELS as f32 {
        Err(ExcerptError::InvalidWidth(width))
    } else {
        Err(ExcerptError::InvalidScale(scale))
    }
}

fn parse_number(key: &str, value: &str) -> Result<f32> {
    value
        .trim()
        .parse::<f32>()
        .map_err(|_| ExcerptError::Config(format!("{} must be a number, got '{}'", key, value)))
}

impl ExcerptConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ExcerptConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        info!("Config saved to {:?}", config_path);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "width" => Some(self.width.to_string()),
            "scale" => Some(self.scale.to_string()),
            "font" => Some(self.font.clone()),
            "shared-via" => Some(self.shared_via_label.clone()),
            "app-name" => Some(self.app_name.clone()),
            _ => None,
        }
    }

    /// Every key with its current value, in display order.
    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "width" => {
                let width = validate_width(parse_number(key, value)?)?;
                if !fits_pixel_limit(width, self.scale) {
                    return Err(ExcerptError::InvalidWidth(width));
                }
                self.width = width;
            }
            "scale" => {
                let scale = validate_scale(parse_number(key, value)?)?;
                if !fits_pixel_limit(self.width, scale) {
                    return Err(ExcerptError::InvalidScale(scale));
                }
                self.scale = scale;
            }
            "font" => self.font = value.trim().to_string(),
            "shared-via" => self.shared_via_label = value.to_string(),
            "app-name" => self.app_name = value.to_string(),
            other => {
                return Err(ExcerptError::Config(format!(
                    "Unknown config key: {} (expected one of {})",
                    other,
                    KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    pub fn font_choice(&self) -> FontChoice {
        FontChoice::parse(&self.font)
    }

    pub fn labels(&self) -> WatermarkLabels {
        WatermarkLabels {
            shared_via: self.shared_via_label.clone(),
            app_name: self.app_name.clone(),
        }
    }
}
