// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change notification for the light hub.
//!
//! Every mutation of a [`LightHub`](crate::LightHub) pushes the *entire*
//! current set of lights to each observer. There are no deltas: an observer
//! that renders the lights can simply redraw from the snapshot it receives.
//!
//! # Overview
//!
//! - [`ChangeObserver`] - Trait implemented by anything that wants snapshots
//! - [`ObserverId`] - Identifier returned on registration, used to unsubscribe
//! - [`FailurePolicy`] - Whether a failing observer stops the fan-out
//! - [`NotifyReport`] - Counts of delivered, failed and skipped observers
//!
//! # Usage
//!
//! ```
//! use lumihub::LightHub;
//!
//! let hub = LightHub::new();
//! let id = hub.on_change(|lights| {
//!     println!("{} lights registered", lights.len());
//! });
//!
//! // Later
//! hub.unsubscribe(id);
//! ```

mod change_observer;
mod registry;

pub use change_observer::{ChangeObserver, ObserverError};
pub use registry::{FailurePolicy, NotifyReport, ObserverId};

pub(crate) use registry::ObserverRegistry;
