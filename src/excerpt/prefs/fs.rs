use super::PreferencesStore;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const PREFS_FILENAME: &str = "prefs.json";

/// Preferences kept as a flat JSON object in `prefs.json`.
pub struct FilePreferences {
    root: PathBuf,
}

impl FilePreferences {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(PREFS_FILENAME)
    }

    fn load(&self) -> Result<BTreeMap<String, i64>> {
        let path = self.path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, values: &BTreeMap<String, i64>) -> Result<()> {
        ensure_dir(&self.root)?;
        let content = serde_json::to_string_pretty(values)?;
        // Readers only ever see a complete file.
        let tmp = self.root.join(format!("{}.tmp", PREFS_FILENAME));
        fs::write(&tmp, content)?;
        fs::rename(tmp, self.path())?;
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

impl PreferencesStore for FilePreferences {
    fn get_int(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.load()?.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value);
        self.save(&values)
    }
}
