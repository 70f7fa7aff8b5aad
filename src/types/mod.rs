// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types with built-in validation.
//!
//! These types ensure values are valid at construction time, so an invalid
//! brightness can never reach the registry.

mod brightness;
mod light_state;

pub use brightness::Brightness;
pub use light_state::LightState;
