// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Saving and loading a hub's lights through a key-value store.

use parking_lot::Mutex;

use crate::error::Result;
use crate::hub::LightHub;
use crate::light::{Light, LightSnapshot};
use crate::observer::{ChangeObserver, ObserverError};

use super::record::{decode_lights, encode_lights};
use super::store::KeyValueStore;

/// Key the lights are stored under unless configured otherwise.
pub const DEFAULT_KEY: &str = "lights";

/// Moves a hub's lights in and out of a [`KeyValueStore`].
///
/// The bridge never decides when to persist: call [`save`](Self::save) after
/// the changes you want kept, and [`load`](Self::load) once at startup. To
/// save after every change, register [`SaveOnChange`] as an observer.
#[derive(Debug)]
pub struct PersistenceBridge<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    /// Creates a bridge storing under [`DEFAULT_KEY`].
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_KEY.to_string(),
        }
    }

    /// Sets the key the lights are stored under.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Returns the storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes every light currently in `hub`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the store rejects the write.
    pub fn save(&self, hub: &LightHub) -> Result<()> {
        self.save_snapshot(&hub.snapshot())
    }

    /// Writes the lights of a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the store rejects the write.
    pub fn save_snapshot(&self, lights: &LightSnapshot) -> Result<()> {
        let json = encode_lights(lights)?;
        self.store.set(&self.key, &json)?;
        tracing::info!(key = %self.key, count = lights.len(), "Saved lights");
        Ok(())
    }

    /// Reads the stored lights without touching any hub.
    ///
    /// Returns an empty list if nothing is stored. Malformed records are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the stored value is
    /// not a JSON array.
    pub fn read(&self) -> Result<Vec<Light>> {
        match self.store.get(&self.key)? {
            Some(json) => Ok(decode_lights(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the lights in `hub` with the stored ones.
    ///
    /// Observers are notified once. If nothing is stored under the key the
    /// hub is left untouched and 0 is returned; otherwise the number of
    /// lights now in the hub is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the stored value is
    /// not a JSON array. The hub is unchanged in that case.
    pub fn load(&self, hub: &LightHub) -> Result<usize> {
        let Some(json) = self.store.get(&self.key)? else {
            tracing::info!(key = %self.key, "No stored lights");
            return Ok(0);
        };

        let lights = decode_lights(&json)?;
        let count = hub.replace_all(lights);
        tracing::info!(key = %self.key, count, "Loaded lights");
        Ok(count)
    }

    /// Loads like [`load`](Self::load), but never fails.
    ///
    /// A store that cannot be read or a stored value that cannot be decoded
    /// is logged at error level and the hub is left as it was, so a damaged
    /// store never prevents startup. Returns the number of lights loaded.
    pub fn restore(&self, hub: &LightHub) -> usize {
        match self.load(hub) {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(key = %self.key, "Failed to load stored lights: {e}");
                0
            }
        }
    }

    /// Turns the bridge into an observer that saves every snapshot.
    #[must_use]
    pub fn save_on_change(self) -> SaveOnChange<S> {
        SaveOnChange::new(self)
    }
}

/// Observer that saves every snapshot it receives.
///
/// Snapshots older than the last one saved are skipped, so the store always
/// ends up with the hub's newest state even when notification passes
/// overlap. Register one `SaveOnChange` per hub.
///
/// Store failures are returned as [`ObserverError`]s, so the hub's failure
/// policy decides what happens to the rest of the notification pass.
#[derive(Debug)]
pub struct SaveOnChange<S> {
    bridge: PersistenceBridge<S>,
    /// Revision of the last snapshot written; held for the whole save.
    saved: Mutex<u64>,
}

impl<S: KeyValueStore> SaveOnChange<S> {
    /// Wraps a bridge.
    #[must_use]
    pub fn new(bridge: PersistenceBridge<S>) -> Self {
        Self {
            bridge,
            saved: Mutex::new(0),
        }
    }

    /// Returns the wrapped bridge.
    #[must_use]
    pub fn bridge(&self) -> &PersistenceBridge<S> {
        &self.bridge
    }
}

impl<S: KeyValueStore> ChangeObserver for SaveOnChange<S> {
    fn update(&self, lights: &LightSnapshot) -> std::result::Result<(), ObserverError> {
        let mut saved = self.saved.lock();
        if lights.is_older_than(*saved) {
            tracing::debug!(
                revision = lights.revision(),
                saved = *saved,
                "Skipping stale snapshot"
            );
            return Ok(());
        }

        self.bridge
            .save_snapshot(lights)
            .map_err(|e| ObserverError::with_source("failed to save lights", e))?;
        *saved = lights.revision();
        Ok(())
    }
}
