// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for saving and loading lights.

#[cfg(feature = "file-store")]
use std::fs;
#[cfg(feature = "file-store")]
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "file-store")]
use lumihub::persist::JsonFileStore;
use lumihub::persist::{
    DEFAULT_KEY, KeyValueStore, LightRecord, MemoryStore, PersistenceBridge, decode_lights,
    deserialize_lights, serialize_lights,
};
use lumihub::{Brightness, Error, Light, LightHub, LightState, PersistError};

/// Temporary store file, deleted with its directory on drop.
#[cfg(feature = "file-store")]
struct TempStore {
    dir: PathBuf,
}

#[cfg(feature = "file-store")]
impl TempStore {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("lumihub-test-{}", uuid::Uuid::new_v4()));
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join("store.json")
    }

    fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.path())
    }
}

#[cfg(feature = "file-store")]
impl Drop for TempStore {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

fn populated_hub() -> LightHub {
    let hub = LightHub::new();
    hub.add_light(Light::new("Living Room").unwrap()).unwrap();
    hub.add_light(
        Light::new("Kitchen")
            .unwrap()
            .with_state(LightState::On)
            .with_brightness(Brightness::new(75).unwrap()),
    )
    .unwrap();
    hub.add_light(
        Light::new("Bedroom")
            .unwrap()
            .with_brightness(Brightness::new(30).unwrap()),
    )
    .unwrap();
    hub
}

fn count_notifications(hub: &LightHub) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    hub.on_change(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    count
}

// ============================================================================
// Records
// ============================================================================

mod records {
    use super::*;

    #[test]
    fn deserialize_of_serialize_is_identity() {
        let hub = populated_hub();
        let snapshot = hub.snapshot();

        let restored = deserialize_lights(serialize_lights(&snapshot));

        assert_eq!(restored, snapshot.into_lights());
    }

    #[test]
    fn records_survive_a_json_trip() {
        let records = serialize_lights(&populated_hub().snapshot());

        let json = serde_json::to_string(&records).unwrap();
        let parsed: Vec<LightRecord> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, records);
    }

    #[test]
    fn legacy_records_without_brightness_load() {
        let json = r#"[{"name":"Living Room","state":"ON"},{"name":"Kitchen","state":"OFF"}]"#;

        let lights = decode_lights(json).unwrap();

        assert_eq!(lights.len(), 2);
        assert!(lights[0].state().is_on());
        assert!(lights.iter().all(|l| l.brightness() == Brightness::MIN));
    }

    #[test]
    fn unnamed_records_are_skipped() {
        let json = r#"[{"state":"ON"},{"name":""},{"name":"Hall"}]"#;

        let lights = decode_lights(json).unwrap();

        assert_eq!(lights.len(), 1);
        assert_eq!(lights[0].name(), "Hall");
    }
}

// ============================================================================
// Bridge
// ============================================================================

mod bridge {
    use super::*;

    #[test]
    fn save_then_load_into_fresh_hub() {
        let bridge = PersistenceBridge::new(MemoryStore::new());
        let original = populated_hub();
        bridge.save(&original).unwrap();

        let restored = LightHub::new();
        let notifications = count_notifications(&restored);

        assert_eq!(bridge.load(&restored).unwrap(), 3);
        assert_eq!(restored.snapshot(), original.snapshot());
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn load_keeps_first_of_duplicate_names() {
        let store = MemoryStore::new();
        store
            .set(
                DEFAULT_KEY,
                r#"[{"name":"Hall","state":"ON"},{"name":"Hall","state":"OFF"}]"#,
            )
            .unwrap();
        let hub = LightHub::new();

        assert_eq!(PersistenceBridge::new(store).load(&hub).unwrap(), 1);
        assert!(hub.light("Hall").unwrap().state().is_on());
    }

    #[test]
    fn load_with_nothing_stored_does_not_notify() {
        let hub = populated_hub();
        let notifications = count_notifications(&hub);

        let loaded = PersistenceBridge::new(MemoryStore::new())
            .load(&hub)
            .unwrap();

        assert_eq!(loaded, 0);
        assert_eq!(hub.light_count(), 3);
        assert_eq!(notifications.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn corrupt_value_is_reported() {
        let store = MemoryStore::new();
        store.set(DEFAULT_KEY, "lights: none").unwrap();

        let err = PersistenceBridge::new(store)
            .load(&LightHub::new())
            .unwrap_err();

        assert!(matches!(err, Error::Persist(PersistError::Json(_))));
    }

    #[test]
    fn save_on_change_tracks_the_hub() {
        let store = Arc::new(MemoryStore::new());
        let hub = LightHub::new();
        hub.add_observer(Arc::new(
            PersistenceBridge::new(store.clone()).save_on_change(),
        ));

        hub.add_light(Light::new("Porch").unwrap()).unwrap();
        hub.add_light(Light::new("Garage").unwrap()).unwrap();
        hub.remove_light("Porch");

        let names: Vec<String> = PersistenceBridge::new(store)
            .read()
            .unwrap()
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(names, vec!["Garage"]);
    }
}

// ============================================================================
// File Store
// ============================================================================

#[cfg(feature = "file-store")]
mod file_store {
    use super::*;

    #[test]
    fn lights_survive_a_restart() {
        let temp = TempStore::new();

        PersistenceBridge::new(temp.store())
            .save(&populated_hub())
            .unwrap();

        let hub = LightHub::new();
        let loaded = PersistenceBridge::new(temp.store()).load(&hub).unwrap();

        assert_eq!(loaded, 3);
        let kitchen = hub.light("Kitchen").unwrap();
        assert_eq!(kitchen.state(), LightState::On);
        assert_eq!(kitchen.brightness().value(), 75);
    }

    #[test]
    fn file_holds_lights_under_their_key() {
        let temp = TempStore::new();
        PersistenceBridge::new(temp.store())
            .with_key("upstairs")
            .save(&populated_hub())
            .unwrap();

        let contents = fs::read_to_string(temp.path()).unwrap();
        let file: serde_json::Value = serde_json::from_str(&contents).unwrap();

        let stored = file["upstairs"].as_str().unwrap();
        let lights: serde_json::Value = serde_json::from_str(stored).unwrap();
        assert_eq!(lights.as_array().unwrap().len(), 3);
        assert_eq!(
            lights[1],
            serde_json::json!({"name": "Kitchen", "state": "ON", "brightness": 75})
        );
    }

    #[test]
    fn corrupt_file_restores_to_an_empty_hub() {
        let temp = TempStore::new();
        fs::create_dir_all(&temp.dir).unwrap();
        fs::write(temp.path(), r#"{"lights": "lights: none"}"#).unwrap();
        let bridge = PersistenceBridge::new(temp.store());
        let hub = LightHub::new();

        assert!(bridge.load(&hub).is_err());
        assert_eq!(bridge.restore(&hub), 0);
        assert_eq!(hub.light_count(), 0);

        fs::write(temp.path(), "not json").unwrap();
        assert_eq!(bridge.restore(&hub), 0);

        // The file store refuses to overwrite a file it cannot parse.
        assert!(bridge.save(&hub).is_err());
        fs::remove_file(temp.path()).unwrap();
        hub.add_light(Light::new("Desk").unwrap()).unwrap();
        bridge.save(&hub).unwrap();
        assert_eq!(bridge.restore(&LightHub::new()), 1);
    }

    #[test]
    fn missing_file_loads_nothing() {
        let temp = TempStore::new();
        let hub = populated_hub();

        assert_eq!(PersistenceBridge::new(temp.store()).load(&hub).unwrap(), 0);
        assert_eq!(hub.light_count(), 3);
    }

    #[test]
    fn save_on_change_writes_the_file() {
        let temp = TempStore::new();
        let hub = LightHub::new();
        hub.add_observer(Arc::new(
            PersistenceBridge::new(temp.store()).save_on_change(),
        ));

        hub.add_light(Light::new("Desk").unwrap()).unwrap();
        hub.toggle_light("Desk").unwrap();

        let lights = PersistenceBridge::new(temp.store()).read().unwrap();
        assert_eq!(lights.len(), 1);
        assert!(lights[0].state().is_on());
    }
}
