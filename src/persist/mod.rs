//! Durable persistence module.
//!
//! This module implements the whitelist-based snapshot codec shared by the
//! state containers. Each container declares a snapshot type holding only
//! the fields that survive a restart; everything else resets to its
//! compile-time default. Storage is plain key-value: one YAML file per key
//! under the application config directory.
//!
//! The codec fails closed in both directions. Unreadable or unparsable
//! content is discarded with a warning and the container keeps its
//! defaults; a failed write is logged and dropped without disturbing the
//! in-memory state.

mod error;

pub use error::PersistError;

use log::*;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const DEFAULT_DIRECTORY_PATH: &str = ".config/pulse-tui";

/// A state container with a declared persisted subset.
///
pub trait Persistable {
    /// The whitelisted projection written to storage. Every field carries
    /// `#[serde(default)]` so entries written by older versions still load.
    type Snapshot: Serialize + DeserializeOwned + Default;

    /// Fixed storage key for this container. Keys are never shared.
    const STORAGE_KEY: &'static str;

    /// Project the persisted subset out of the container.
    fn snapshot(&self) -> Self::Snapshot;

    /// Merge a recovered snapshot into the container's defaults.
    fn restore(&mut self, snapshot: Self::Snapshot);
}

/// Key-value access to durable storage.
///
pub trait Storage: Send + Sync {
    /// Return the stored contents for the key, or None if absent/unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Replace the stored contents for the key.
    fn write(&self, key: &str, contents: &str) -> Result<(), PersistError>;
}

/// Read, parse, and merge the stored snapshot for a container. Returns true
/// only if a snapshot was recovered; on any failure the container keeps its
/// defaults and startup proceeds.
///
pub fn rehydrate<P: Persistable>(store: &mut P, storage: &dyn Storage) -> bool {
    match storage.read(P::STORAGE_KEY) {
        None => {
            debug!("No stored snapshot for '{}'; using defaults.", P::STORAGE_KEY);
            false
        }
        Some(contents) => match serde_yaml::from_str::<P::Snapshot>(&contents) {
            Ok(snapshot) => {
                store.restore(snapshot);
                debug!("Recovered stored snapshot for '{}'.", P::STORAGE_KEY);
                true
            }
            Err(e) => {
                warn!(
                    "Discarding unparsable snapshot for '{}': {}",
                    P::STORAGE_KEY,
                    e
                );
                false
            }
        },
    }
}

/// Serialize the container's persisted subset and write it under its key.
/// Failures are logged and dropped; the triggering action is never rolled
/// back.
///
pub fn persist<P: Persistable>(store: &P, storage: &dyn Storage) {
    let contents = match serde_yaml::to_string(&store.snapshot()) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(
                "Dropping snapshot write for '{}': serialization failed: {}",
                P::STORAGE_KEY,
                e
            );
            return;
        }
    };
    if let Err(e) = storage.write(P::STORAGE_KEY, &contents) {
        warn!("Dropping snapshot write for '{}': {}", P::STORAGE_KEY, e);
    }
}

/// File-backed storage keeping one `<key>.yml` entry per container under
/// the config directory.
///
pub struct FileStorage {
    dir_path: PathBuf,
}

impl FileStorage {
    /// Return an instance rooted at the custom directory if provided, or at
    /// the default path under the home directory. The directory is created
    /// if missing.
    ///
    pub fn new(custom_path: Option<&str>) -> Result<FileStorage, PersistError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(path).to_path_buf(),
            None => FileStorage::default_path()?,
        };
        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| PersistError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }
        Ok(FileStorage { dir_path })
    }

    /// Returns the path buffer for the default storage directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, PersistError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(PersistError::HomeDirectoryNotFound),
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir_path.join(format!("{}.yml", key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.entry_path(key)).ok()
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), PersistError> {
        let file_path = self.entry_path(key);
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| PersistError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }
        let mut file = fs::File::create(&file_path).map_err(|e| PersistError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", contents).map_err(|e| PersistError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| PersistError::WriteFailed {
            path: file_path,
            source: e,
        })?;
        Ok(())
    }
}

/// In-memory storage for simulated-reload tests.
///
#[cfg(test)]
pub struct MemStorage {
    entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemStorage {
    pub fn new() -> MemStorage {
        MemStorage {
            entries: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    /// Seed an entry directly, bypassing the codec (e.g. corrupted content).
    pub fn seed(&self, key: &str, contents: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), contents.to_string());
    }
}

#[cfg(test)]
impl Storage for MemStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), PersistError> {
        self.seed(key, contents);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Default)]
    struct Counter {
        count: u32,
        ephemeral: u32,
    }

    #[derive(Serialize, Deserialize, Default)]
    struct CounterSnapshot {
        #[serde(default)]
        count: u32,
    }

    impl Persistable for Counter {
        type Snapshot = CounterSnapshot;
        const STORAGE_KEY: &'static str = "counter";

        fn snapshot(&self) -> CounterSnapshot {
            CounterSnapshot { count: self.count }
        }

        fn restore(&mut self, snapshot: CounterSnapshot) {
            self.count = snapshot.count;
        }
    }

    #[test]
    fn round_trip_whitelisted_fields() {
        let storage = MemStorage::new();
        let counter = Counter {
            count: 42,
            ephemeral: 7,
        };
        persist(&counter, &storage);

        let mut recovered = Counter::default();
        assert!(rehydrate(&mut recovered, &storage));
        assert_eq!(recovered.count, 42);
        // Non-whitelisted fields reset to their compile-time default.
        assert_eq!(recovered.ephemeral, 0);
    }

    #[test]
    fn rehydrate_missing_entry_keeps_defaults() {
        let storage = MemStorage::new();
        let mut counter = Counter::default();
        assert!(!rehydrate(&mut counter, &storage));
        assert_eq!(counter.count, 0);
    }

    #[test]
    fn rehydrate_unparsable_entry_keeps_defaults() {
        let storage = MemStorage::new();
        storage.seed("counter", "{{{ not yaml");
        let mut counter = Counter::default();
        assert!(!rehydrate(&mut counter, &storage));
        assert_eq!(counter.count, 0);
    }

    #[test]
    fn rehydrate_entry_missing_fields_uses_defaults() {
        let storage = MemStorage::new();
        storage.seed("counter", "{}");
        let mut counter = Counter::default();
        assert!(rehydrate(&mut counter, &storage));
        assert_eq!(counter.count, 0);
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = std::env::temp_dir().join(format!("pulse-tui-test-{}", std::process::id()));
        let storage = FileStorage::new(Some(dir.to_str().unwrap())).unwrap();
        storage.write("counter", "count: 3\n").unwrap();
        assert_eq!(storage.read("counter").unwrap(), "count: 3\n");
        assert!(storage.read("missing").is_none());
        std::fs::remove_dir_all(dir).ok();
    }
}
