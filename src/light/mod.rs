// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light entities and snapshots.
//!
//! A [`Light`] is the only kind of device the hub manages. A
//! [`LightSnapshot`] is what observers receive: every light, in the order it
//! was registered.
//!
//! # Examples
//!
//! ```
//! use lumihub::light::Light;
//! use lumihub::types::LightState;
//!
//! let light = Light::new("Kitchen").unwrap().with_state(LightState::On);
//! assert!(light.state().is_on());
//! ```

mod entity;
mod snapshot;

pub use entity::Light;
pub use snapshot::LightSnapshot;
