use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::{AppError, AppResult};
use crate::models::ThemePreference;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Theme,
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKey::Theme => write!(f, "movie-app-theme"),
        }
    }
}

/// Process-wide string key-value store for UI preferences
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &StoreKey) -> AppResult<Option<String>>;

    fn set(&self, key: &StoreKey, value: &str) -> AppResult<()>;
}

/// Preferences kept as a flat JSON object in a file
///
/// A missing file reads as empty; it is created on the first write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> AppResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let entries = serde_json::from_str(&content)?;
        Ok(entries)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &StoreKey) -> AppResult<Option<String>> {
        Ok(self.read_all()?.remove(&key.to_string()))
    }

    fn set(&self, key: &StoreKey, value: &str) -> AppResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::Store("Preference file lock poisoned".to_string()))?;

        // An unreadable file is replaced rather than blocking every later write
        let mut entries = self.read_all().unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %self.path.display(), "Discarding unreadable preference file");
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// In-process preference store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &StoreKey) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AppError::Store("Memory store lock poisoned".to_string()))?;
        Ok(entries.get(&key.to_string()).cloned())
    }

    fn set(&self, key: &StoreKey, value: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AppError::Store("Memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed access to the persisted theme preference
#[derive(Clone)]
pub struct ThemeStore {
    store: Arc<dyn PreferenceStore>,
}

impl ThemeStore {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Reads the stored theme; absent, invalid or unreadable values mean dark
    pub fn load(&self) -> ThemePreference {
        match self.store.get(&StoreKey::Theme) {
            Ok(stored) => ThemePreference::from_stored(stored.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read theme preference, using default");
                ThemePreference::default()
            }
        }
    }

    pub fn save(&self, theme: ThemePreference) -> AppResult<()> {
        self.store.set(&StoreKey::Theme, theme.as_str())?;
        tracing::debug!(theme = %theme, "Theme preference saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_key_display() {
        assert_eq!(format!("{}", StoreKey::Theme), "movie-app-theme");
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(&StoreKey::Theme).unwrap(), None);

        store.set(&StoreKey::Theme, "light").unwrap();
        assert_eq!(store.get(&StoreKey::Theme).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_theme_defaults_to_dark_when_absent() {
        let themes = ThemeStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(themes.load(), ThemePreference::Dark);
    }

    #[test]
    fn test_theme_defaults_to_dark_when_corrupted() {
        let store = MemoryStore::new();
        store.set(&StoreKey::Theme, "purple").unwrap();

        let themes = ThemeStore::new(Arc::new(store));
        assert_eq!(themes.load(), ThemePreference::Dark);
    }

    #[test]
    fn test_theme_roundtrip_through_memory_store() {
        let store = Arc::new(MemoryStore::new());
        ThemeStore::new(store.clone())
            .save(ThemePreference::Light)
            .unwrap();

        let reloaded = ThemeStore::new(store);
        assert_eq!(reloaded.load(), ThemePreference::Light);
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.get(&StoreKey::Theme).unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        ThemeStore::new(Arc::new(FileStore::new(&path)))
            .save(ThemePreference::Light)
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"movie-app-theme\": \"light\""));

        let reloaded = ThemeStore::new(Arc::new(FileStore::new(&path)));
        assert_eq!(reloaded.load(), ThemePreference::Light);
    }

    #[test]
    fn test_file_store_corrupted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get(&StoreKey::Theme), Err(AppError::Store(_))));

        let themes = ThemeStore::new(Arc::new(FileStore::new(&path)));
        assert_eq!(themes.load(), ThemePreference::Dark);

        // Writing recovers the file
        themes.save(ThemePreference::Light).unwrap();
        assert_eq!(themes.load(), ThemePreference::Light);
    }
}
