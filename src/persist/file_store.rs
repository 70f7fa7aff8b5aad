// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key-value store backed by a single JSON object file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::StoreError;

use super::store::KeyValueStore;

const APP_DIR: &str = "lumihub";
const FILE_NAME: &str = "store.json";

/// Stores every key in one pretty-printed JSON object on disk.
///
/// The file is read on every `get` and rewritten on every `set`, so several
/// processes sharing it see each other's last completed write. Writes from
/// one process are serialized.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    ///
    /// The file does not need to exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a store in the user's config directory
    /// (`<config_dir>/lumihub/store.json`).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the platform has no config directory.
    pub fn default_location() -> Result<Self, StoreError> {
        let Some(mut path) = dirs::config_dir() else {
            return Err(StoreError::Unavailable(
                "could not determine config directory".into(),
            ));
        };
        path.push(APP_DIR);
        path.push(FILE_NAME);
        Ok(Self::new(path))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                tracing::error!(path = %self.path.display(), "Failed to read store file: {e}");
                return Err(e.into());
            }
        };

        serde_json::from_str(&contents).map_err(|e| {
            tracing::error!(path = %self.path.display(), "Failed to parse store file: {e}");
            e.into()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)?;

        tracing::debug!(key, path = %self.path.display(), "Wrote store entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}
