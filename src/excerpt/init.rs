use crate::api::{ExcerptApi, ExcerptPaths};
use crate::card::FontBook;
use crate::error::{ExcerptError, Result};
use crate::prefs::fs::FilePreferences;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use tracing::debug;

/// Overrides the home directory; used by tests and portable setups.
pub const HOME_ENV: &str = "EXCERPT_HOME";

pub struct ExcerptContext {
    pub api: ExcerptApi<FilePreferences>,
}

/// `$EXCERPT_HOME` if set, else the platform data directory.
pub fn resolve_home() -> Result<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV)
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "excerpt", "excerpt")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ExcerptError::Config("Could not determine data directory".to_string()))
}

/// Builds the production context. `load_system_fonts` is off when the caller
/// knows only the bundled font will be used.
pub fn initialize(load_system_fonts: bool) -> Result<ExcerptContext> {
    let home = resolve_home()?;
    debug!("excerpt home: {}", home.display());

    let fonts = if load_system_fonts {
        FontBook::system()
    } else {
        FontBook::bundled_only()
    };
    let prefs = FilePreferences::new(home.clone());
    let api = ExcerptApi::new(prefs, ExcerptPaths::new(home), fonts);
    Ok(ExcerptContext { api })
}
