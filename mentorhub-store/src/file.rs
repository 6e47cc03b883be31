use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::{SettingsStore, StoreError};

/// A store persisted as one JSON object in a file.
///
/// Every write replaces the whole file: the new content goes to a temporary
/// file next to the target which is then renamed over it. Two stores opened
/// on the same path do not see each other's writes, the last one to write wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(content) => serde_json::from_slice(&content).map_err(StoreError::Corrupt)?,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("no store at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(error) => return Err(StoreError::Read(error)),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file = NamedTempFile::new_in(directory).map_err(StoreError::Write)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush().map_err(StoreError::Write)?;
        let file = writer
            .into_inner()
            .map_err(|error| StoreError::Write(error.into_error()))?;
        file.persist(&self.path)
            .map_err(|error| StoreError::Write(error.error))?;
        trace!("wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }

    fn update(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        let mut next = entries.clone();
        change(&mut next);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::FileStore;
    use crate::{SettingsStore as _, StoreError};

    #[test]
    fn values_survive_reopening() -> Result<(), StoreError> {
        let dir = tempdir().map_err(StoreError::Write)?;
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path)?;
        assert_eq!(store.get("currentRole")?, None);
        store.set("currentRole", "mentor")?;
        store.set("theme", "dark")?;
        store.remove("theme")?;
        drop(store);

        let store = FileStore::open(&path)?;
        assert_eq!(store.get("currentRole")?.as_deref(), Some("mentor"));
        assert_eq!(store.get("theme")?, None);
        Ok(())
    }

    #[test]
    fn corrupt_file_is_rejected() -> Result<(), StoreError> {
        let dir = tempdir().map_err(StoreError::Write)?;
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2").map_err(StoreError::Write)?;

        assert!(matches!(FileStore::open(&path), Err(StoreError::Corrupt(_))));
        Ok(())
    }

    #[test]
    fn last_writer_wins() -> Result<(), StoreError> {
        let dir = tempdir().map_err(StoreError::Write)?;
        let path = dir.path().join("store.json");

        let first = FileStore::open(&path)?;
        let second = FileStore::open(&path)?;
        first.set("profileData", "{\"regions\":[\"europe\"]}")?;
        second.set("theme", "light")?;

        let reopened = FileStore::open(&path)?;
        assert_eq!(reopened.get("profileData")?, None);
        assert_eq!(reopened.get("theme")?.as_deref(), Some("light"));
        Ok(())
    }
}
