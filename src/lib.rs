// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `LumiHub` - A registry of smart-home lights with change notification.
//!
//! The library keeps a set of named lights, lets callers switch them and
//! dim them, and pushes the full set of lights to every registered observer
//! after each change.
//!
//! # Supported Features
//!
//! - **Light management**: Add, remove, switch, toggle and dim lights by name
//! - **Observers**: Synchronous full-snapshot notification, in subscription order
//! - **Async fan-out**: A tokio broadcast bus that follows the hub (`broadcast` feature)
//! - **Persistence**: JSON save/load through any key-value store, with a
//!   file-backed store in the user's config directory (`file-store` feature)
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use lumihub::{Light, LightHub};
//! use lumihub::types::{Brightness, LightState};
//!
//! # fn main() -> lumihub::Result<()> {
//! let hub = Arc::new(LightHub::new());
//!
//! // Redraw whenever anything changes
//! hub.on_change(|lights| {
//!     for light in lights {
//!         println!("{light}");
//!     }
//! });
//!
//! hub.add_light(Light::new("Kitchen")?)?;
//! hub.control_light("Kitchen", LightState::On)?;
//! hub.set_brightness("Kitchen", Brightness::new(75)?)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Persisting Lights
//!
//! ```no_run
//! use lumihub::LightHub;
//! use lumihub::persist::{JsonFileStore, PersistenceBridge};
//!
//! # fn main() -> lumihub::Result<()> {
//! let hub = LightHub::new();
//! let bridge = PersistenceBridge::new(JsonFileStore::default_location()?);
//!
//! bridge.load(&hub)?;
//! // ... mutate the hub ...
//! bridge.save(&hub)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
#[cfg(feature = "broadcast")]
pub mod event;
pub mod hub;
pub mod light;
pub mod observer;
pub mod persist;
pub mod types;

pub use error::{Error, PersistError, Result, StoreError, ValueError};
pub use hub::{HubConfig, LightHub};
pub use light::{Light, LightSnapshot};
pub use observer::{ChangeObserver, FailurePolicy, NotifyReport, ObserverError, ObserverId};
pub use persist::{KeyValueStore, MemoryStore, PersistenceBridge, SaveOnChange};
pub use types::{Brightness, LightState};
