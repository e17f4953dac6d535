use super::{Settings, SettingsStore};
use crate::Result;
use std::sync::{Arc, Mutex};

/// In-memory settings for tests and harnesses.
#[derive(Clone, Default)]
pub struct MemorySettingsStore {
    settings: Arc<Mutex<Settings>>,
    save_count: Arc<Mutex<usize>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(self, api_key: &str) -> Self {
        self.settings.lock().unwrap().api_key = Some(api_key.to_string());
        self
    }

    pub fn with_primary(self, primary: &str) -> Self {
        self.settings.lock().unwrap().primary = Some(primary.to_string());
        self
    }

    pub fn get_save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Settings {
        self.settings.lock().unwrap().clone()
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        *self.settings.lock().unwrap() = settings.clone();
        *self.save_count.lock().unwrap() += 1;
        Ok(())
    }
}
