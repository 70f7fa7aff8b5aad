// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Async distribution of hub snapshots.
//!
//! The hub itself is synchronous. [`SnapshotBus`] bridges it to async code:
//! register the bus as an observer and hand out receivers to tasks that
//! want to follow the lights.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use lumihub::LightHub;
//! use lumihub::event::SnapshotBus;
//!
//! # async fn example() {
//! let hub = Arc::new(LightHub::new());
//! let bus = Arc::new(SnapshotBus::new());
//! hub.add_observer(bus.clone());
//!
//! let mut lights = bus.subscribe();
//! tokio::spawn(async move {
//!     while let Ok(snapshot) = lights.recv().await {
//!         println!("{} lights", snapshot.len());
//!     }
//! });
//! # }
//! ```

mod snapshot_bus;

pub use snapshot_bus::SnapshotBus;
