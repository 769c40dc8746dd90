//! Key-value storage backends.
//!
//! Provides the `StorageBackend` trait and its implementations: a JSON file
//! on disk and an in-memory map. The store keeps its user records under a
//! single key, so backends only need string get/set/remove.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from storage backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BackendError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Trait for string key-value stores (JSON file, memory, ...).
pub trait StorageBackend {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), BackendError>;

    /// Get the backend name for logging.
    fn name(&self) -> &'static str;
}

/// JSON file backend configuration.
#[derive(Debug, Clone)]
pub struct JsonFileConfig {
    /// Path of the data file
    pub path: PathBuf,
    /// Pretty-print the file on write
    pub pretty: bool,
}

impl Default for JsonFileConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("bitelist.json"),
            pretty: true,
        }
    }
}

impl JsonFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// A JSON object of string values, rewritten whole on every change.
///
/// Writes go to a sibling temp file that is then renamed over the data file,
/// so a crash leaves either the old or the new contents.
#[derive(Debug)]
pub struct JsonFileBackend {
    config: JsonFileConfig,
    entries: BTreeMap<String, String>,
}

impl JsonFileBackend {
    /// Open the data file. A missing file starts empty; an unreadable one is
    /// logged and replaced on the next write.
    pub fn open(config: JsonFileConfig) -> Result<Self, BackendError> {
        let entries = match fs::read_to_string(&config.path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => match serde_json::from_str(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %config.path.display(), error = %e, "Discarding unreadable data file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(BackendError::io(&config.path, e)),
        };

        tracing::debug!(path = %config.path.display(), keys = entries.len(), "Opened data file");
        Ok(Self { config, entries })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .config
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.config.path.with_file_name(name)
    }

    fn flush(&self) -> Result<(), BackendError> {
        let path = &self.config.path;
        let json = if self.config.pretty {
            serde_json::to_string_pretty(&self.entries)?
        } else {
            serde_json::to_string(&self.entries)?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| BackendError::io(parent, e))?;
        }

        let temp_path = self.temp_path();
        write_synced(&temp_path, json.as_bytes()).map_err(|e| BackendError::io(&temp_path, e))?;

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            BackendError::io(path, e)
        })?;

        tracing::debug!(path = %path.display(), keys = self.entries.len(), "Wrote data file");
        Ok(())
    }
}

/// Write, flush and fsync a whole file.
fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

impl StorageBackend for JsonFileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        if let Some(old) = self.entries.remove(key) {
            if let Err(e) = self.flush() {
                self.entries.insert(key.to_string(), old);
                return Err(e);
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json-file"
    }
}

/// In-memory backend; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), BackendError> {
        self.entries.remove(key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bitelist.json");
        let backend = JsonFileBackend::open(JsonFileConfig::new(&path)).unwrap();

        assert_eq!(backend.get("userRestaurants").unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bitelist.json");

        let mut backend = JsonFileBackend::open(JsonFileConfig::new(&path)).unwrap();
        backend.set("userRestaurants", "[]").unwrap();
        backend.set("other", "x").unwrap();

        let reopened = JsonFileBackend::open(JsonFileConfig::new(&path)).unwrap();
        assert_eq!(reopened.get("userRestaurants").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bitelist.json");

        let mut backend = JsonFileBackend::open(JsonFileConfig::new(&path)).unwrap();
        backend.set("userRestaurants", "[]").unwrap();
        backend.remove("userRestaurants").unwrap();
        backend.remove("never-set").unwrap();

        let reopened = JsonFileBackend::open(JsonFileConfig::new(&path)).unwrap();
        assert_eq!(reopened.get("userRestaurants").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_discarded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bitelist.json");
        fs::write(&path, "{not json").unwrap();

        let mut backend = JsonFileBackend::open(JsonFileConfig::new(&path)).unwrap();
        assert_eq!(backend.get("userRestaurants").unwrap(), None);

        backend.set("userRestaurants", "[]").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("bitelist.json");

        let mut backend = JsonFileBackend::open(JsonFileConfig::new(&path)).unwrap();
        backend.set("k", "v").unwrap();

        assert!(path.exists());
        assert!(!backend.temp_path().exists());
    }

    #[test]
    fn test_memory_backend() {
        let mut backend = MemoryBackend::new().with_entry("a", "1");
        assert_eq!(backend.get("a").unwrap().as_deref(), Some("1"));

        backend.set("b", "2").unwrap();
        backend.remove("a").unwrap();
        assert!(!backend.contains_key("a"));
        assert!(backend.contains_key("b"));
        assert_eq!(backend.name(), "memory");
    }

    #[test]
    fn test_failed_write_keeps_previous_entries() {
        let dir = tempdir().unwrap();
        let blocked = dir.path().join("sub");
        let mut backend = JsonFileBackend::open(JsonFileConfig::new(blocked.join("bitelist.json"))).unwrap();
        // a plain file where the parent directory should be
        fs::write(&blocked, "not a directory").unwrap();

        assert!(backend.set("userRestaurants", "[]").is_err());
        assert_eq!(backend.get("userRestaurants").unwrap(), None);
    }
}
