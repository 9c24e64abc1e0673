//! # Preferences
//!
//! The only state excerpt keeps between sessions is the excerpt kind the user
//! chose last. It sits behind the [`PreferencesStore`] trait so the facade can
//! be driven by a file in production and by memory in tests.
//!
//! ## Implementations
//!
//! - [`fs::FilePreferences`]: `prefs.json` in the excerpt home directory
//! - [`memory::InMemoryPreferences`]: no persistence, for tests
//!
//! ```text
//! ~/.local/share/excerpt/
//! ├── prefs.json     # {"initialExcerptType": 1}
//! └── config.json    # rendering defaults, see config.rs
//! ```

use crate::error::Result;
use crate::model::ExcerptKind;
use tracing::{debug, info};

pub mod fs;
pub mod memory;

/// Key under which the last chosen [`ExcerptKind`] is stored.
pub const INITIAL_EXCERPT_TYPE: &str = "initialExcerptType";

/// Get/set access to integer preferences by key.
pub trait PreferencesStore {
    /// Returns `Ok(None)` when the key was never written.
    fn get_int(&self, key: &str) -> Result<Option<i64>>;

    fn set_int(&mut self, key: &str, value: i64) -> Result<()>;
}

/// Kind to start a new session with. Missing or unknown values give the default.
pub fn initial_kind<P: PreferencesStore + ?Sized>(prefs: &P) -> Result<ExcerptKind> {
    let raw = prefs.get_int(INITIAL_EXCERPT_TYPE)?;
    let kind = raw.and_then(ExcerptKind::from_raw).unwrap_or_default();
    debug!(?raw, %kind, "loaded initial excerpt kind");
    Ok(kind)
}

pub fn remember_kind<P: PreferencesStore + ?Sized>(prefs: &mut P, kind: ExcerptKind) -> Result<()> {
    prefs.set_int(INITIAL_EXCERPT_TYPE, kind.raw_value())?;
    info!(%kind, "remembered excerpt kind");
    Ok(())
}
