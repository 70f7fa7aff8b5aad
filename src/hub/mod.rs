// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The light hub: a registry of named lights with change notification.
//!
//! # Overview
//!
//! The [`LightHub`] is the central component. It provides:
//!
//! - **Light management**: Add, remove and replace lights by name
//! - **Control**: Switch lights on/off, toggle them, set their brightness
//! - **Notification**: Every change pushes a full [`LightSnapshot`](crate::light::LightSnapshot)
//!   to every registered observer, in subscription order
//!
//! Failed lookups are reported as errors and logged; they never change the
//! registry and never notify.
//!
//! # Examples
//!
//! ## Rendering on every change
//!
//! ```
//! use std::sync::Arc;
//! use lumihub::{Light, LightHub};
//! use lumihub::types::LightState;
//!
//! # fn main() -> lumihub::Result<()> {
//! let hub = Arc::new(LightHub::new());
//!
//! hub.on_change(|lights| {
//!     for light in lights {
//!         println!("{}: {}", light.name(), light.state());
//!     }
//! });
//!
//! hub.add_light(Light::new("Living Room")?)?;
//! hub.control_light("Living Room", LightState::On)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Missing lights
//!
//! ```
//! use lumihub::{Error, LightHub};
//! use lumihub::types::LightState;
//!
//! let hub = LightHub::new();
//! let result = hub.control_light("Garage", LightState::On);
//! assert!(matches!(result, Err(Error::LightNotFound(_))));
//! assert_eq!(hub.light_count(), 0);
//! ```

mod config;
mod light_hub;

pub use config::HubConfig;
pub use light_hub::LightHub;
