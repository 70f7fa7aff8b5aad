// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persistence of the light set in a key-value store.
//!
//! Lights are stored as one JSON array under a single key (`"lights"` by
//! default):
//!
//! ```json
//! [{"name": "Kitchen", "state": "ON", "brightness": 75}]
//! ```
//!
//! Loading is forgiving: records without a usable name, with the wrong
//! field types or with a brightness above 100 are skipped with a warning,
//! and missing `state`/`brightness` fields default to `OFF`/0.
//!
//! # Examples
//!
//! ```
//! use lumihub::{Light, LightHub};
//! use lumihub::persist::{MemoryStore, PersistenceBridge};
//!
//! # fn main() -> lumihub::Result<()> {
//! let bridge = PersistenceBridge::new(MemoryStore::new());
//!
//! let hub = LightHub::new();
//! hub.add_light(Light::new("Porch")?)?;
//! bridge.save(&hub)?;
//!
//! let restored = LightHub::new();
//! assert_eq!(bridge.load(&restored)?, 1);
//! assert!(restored.contains("Porch"));
//! # Ok(())
//! # }
//! ```

mod bridge;
#[cfg(feature = "file-store")]
mod file_store;
mod record;
mod store;

pub use bridge::{DEFAULT_KEY, PersistenceBridge, SaveOnChange};
#[cfg(feature = "file-store")]
pub use file_store::JsonFileStore;
pub use record::{LightRecord, decode_lights, deserialize_lights, encode_lights, serialize_lights};
pub use store::{KeyValueStore, MemoryStore};
