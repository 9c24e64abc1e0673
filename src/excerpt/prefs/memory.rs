use super::PreferencesStore;
use crate::error::{ExcerptError, Result};
use std::collections::HashMap;

/// In-memory preferences for testing.
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    values: HashMap<String, i64>,
    simulate_write_error: bool,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: i64) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }
}

impl PreferencesStore for InMemoryPreferences {
    fn get_int(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<()> {
        if self.simulate_write_error {
            return Err(ExcerptError::Io(std::io::Error::other(
                "Simulated write error",
            )));
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
