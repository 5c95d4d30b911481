//! Settings persistence.
//!
//! The store is the only shared mutable resource between the three surfaces.
//! There is no read-modify-write transaction support; correctness comes from
//! every scheduling decision re-reading a fresh snapshot instead of
//! accumulating in-memory deltas.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use super::Settings;

/// Storage seam between the surfaces and the persisted settings snapshot.
///
/// `load` is infallible by design: persistence read failures degrade to
/// defaults rather than surfacing to the scheduler.
pub trait SettingsStore: Send + Sync {
    /// Read the current snapshot, substituting defaults for anything missing
    /// or unreadable.
    fn load(&self) -> Settings;

    /// Persist a full snapshot.
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// Default on-disk location: `<config_dir>/walkr/walkr.toml`.
pub fn settings_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("walkr").join("walkr.toml"))
}

/// TOML-file-backed store used by the real application.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at the default settings path.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: settings_path()?,
        })
    }

    /// Create a store at an explicit path.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn load(&self) -> Settings {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            // Missing file is the normal first-run case
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Settings::default(),
            Err(e) => {
                log_pipe!();
                log_warning!("Could not read {}: {e}", self.path.display());
                log_indented!("Continuing with default settings");
                return Settings::default();
            }
        };

        match toml::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                log_pipe!();
                log_warning!("Could not parse {}: {e}", self.path.display());
                log_indented!("Continuing with default settings");
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents =
            toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

/// In-memory store for tests and simulation runs.
pub struct MemoryStore {
    inner: Mutex<Settings>,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Mutex::new(settings),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Settings {
        self.inner.lock().unwrap().clone()
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        *self.inner.lock().unwrap() = settings.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Log;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at_path(dir.path().join("walkr.toml"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn garbled_file_degrades_to_defaults() {
        Log::set_enabled(false);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walkr.toml");
        fs::write(&path, "start_time = [this is not toml").unwrap();

        let store = FileStore::at_path(path);
        assert_eq!(store.load(), Settings::default());
        Log::set_enabled(true);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at_path(dir.path().join("nested").join("walkr.toml"));

        let settings = Settings {
            start_time: Some("22:00".into()),
            end_time: Some("06:00".into()),
            active: Some(true),
            interval_minutes: Some(45),
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn partial_file_leaves_unset_fields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walkr.toml");
        fs::write(&path, "active = true\n").unwrap();

        let loaded = FileStore::at_path(path).load();
        assert_eq!(loaded.active, Some(true));
        assert_eq!(loaded.start_time, None);
        assert!(loaded.is_active());
    }
}
