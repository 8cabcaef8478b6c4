// Persistence of saved connection profiles

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::SavedProfile;

#[cfg(debug_assertions)]
const APP_NAME: &str = "clickbridge-dev";

#[cfg(not(debug_assertions))]
const APP_NAME: &str = "clickbridge";

/// Manages persistent configuration files
#[derive(Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager, initializing the config directory if needed
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        Ok(Self { config_dir })
    }

    /// Get the platform-specific config directory
    fn get_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .ok_or_else(|| Error::Config("could not determine config directory".to_string()))
    }

    /// Get path to a specific config file
    fn file_path(&self, filename: &str) -> PathBuf {
        self.config_dir.join(filename)
    }

    /// Load data from a JSON file
    fn load_json<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.file_path(filename);

        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path)?;
        let value: T = serde_json::from_str(&data)?;
        Ok(Some(value))
    }

    /// Save data to a JSON file (atomic via temp + rename).
    fn save_json<T: Serialize + ?Sized>(&self, filename: &str, data: &T) -> Result<()> {
        let path = self.file_path(filename);
        let json = serde_json::to_string_pretty(data)?;
        atomic_write(&path, json.as_bytes())?;
        Ok(())
    }

    // =========================================================================
    // Profiles
    // =========================================================================

    const PROFILES_FILE: &'static str = "profiles.json";

    /// Load saved profiles from disk
    pub fn load_profiles(&self) -> Result<Vec<SavedProfile>> {
        Ok(self.load_json(Self::PROFILES_FILE)?.unwrap_or_default())
    }

    /// Save profiles to disk. Passwords never touch the file.
    pub fn save_profiles(&self, profiles: &[SavedProfile]) -> Result<()> {
        let stripped: Vec<SavedProfile> = profiles
            .iter()
            .map(|profile| {
                let mut profile = profile.clone();
                profile.config.password.clear();
                profile
            })
            .collect();
        self.save_json(Self::PROFILES_FILE, &stripped)
    }

    /// Insert or update one profile, matched by id.
    pub fn save_profile(&self, profile: &SavedProfile) -> Result<()> {
        let mut profiles = self.load_profiles()?;
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile.clone(),
            None => profiles.push(profile.clone()),
        }
        self.save_profiles(&profiles)
    }

    pub fn delete_profile(&self, id: Uuid) -> Result<()> {
        let mut profiles = self.load_profiles()?;
        profiles.retain(|p| p.id != id);
        self.save_profiles(&profiles)
    }

    /// Stamp a profile with the current time after a successful connect.
    pub fn mark_connected(&self, id: Uuid) -> Result<()> {
        let mut profiles = self.load_profiles()?;
        if let Some(profile) = profiles.iter_mut().find(|p| p.id == id) {
            profile.last_connected = Some(Utc::now());
            return self.save_profiles(&profiles);
        }
        Ok(())
    }
}

/// Write `data` to `path` atomically: write to a sibling temp file first, then
/// rename. Readers get either the old content or the new content, never a
/// corrupt intermediate.
fn atomic_write(path: &std::path::Path, data: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(path);
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    std::io::Write::write_all(&mut tmp, data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
