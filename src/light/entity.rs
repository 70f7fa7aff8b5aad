// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The light entity.

use std::fmt;

use crate::error::ValueError;
use crate::types::{Brightness, LightState};

/// A named light with an on/off state and a brightness level.
///
/// The name is the light's identity in a [`LightHub`](crate::LightHub) and
/// cannot change once the light exists. Renaming is done by removing the
/// light and adding a new one.
///
/// Outside of the hub a `Light` is configured with the consuming
/// `with_*` methods; once registered it is only changed through hub
/// operations, which always notify observers.
///
/// # Examples
///
/// ```
/// use lumihub::Light;
/// use lumihub::types::{Brightness, LightState};
///
/// let light = Light::new("Kitchen")?
///     .with_state(LightState::On)
///     .with_brightness(Brightness::new(40)?);
///
/// assert_eq!(light.name(), "Kitchen");
/// assert!(light.state().is_on());
/// assert_eq!(light.brightness().value(), 40);
/// # Ok::<(), lumihub::ValueError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Light {
    name: String,
    state: LightState,
    brightness: Brightness,
}

impl Light {
    /// Creates a light that is off with brightness 0.
    ///
    /// Leading and trailing whitespace is stripped from the name.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyName` if the name is empty after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, ValueError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValueError::EmptyName);
        }
        let name = if trimmed.len() == name.len() {
            name
        } else {
            trimmed.to_string()
        };

        Ok(Self {
            name,
            state: LightState::Off,
            brightness: Brightness::MIN,
        })
    }

    /// Sets the initial state.
    #[must_use]
    pub fn with_state(mut self, state: LightState) -> Self {
        self.state = state;
        self
    }

    /// Sets the initial brightness.
    #[must_use]
    pub fn with_brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = brightness;
        self
    }

    /// Returns the light's name, which is also its registry key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the on/off state.
    #[must_use]
    pub fn state(&self) -> LightState {
        self.state
    }

    /// Returns the stored brightness, whether or not the light is on.
    #[must_use]
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Returns the brightness that is actually visible: 0 while off.
    #[must_use]
    pub fn effective_brightness(&self) -> Brightness {
        if self.state.is_on() {
            self.brightness
        } else {
            Brightness::MIN
        }
    }

    pub(crate) fn set_state(&mut self, state: LightState) {
        self.state = state;
    }

    pub(crate) fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
    }
}

impl fmt::Display for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} {}]", self.name, self.state, self.brightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_light_defaults() {
        let light = Light::new("Hall").unwrap();
        assert_eq!(light.state(), LightState::Off);
        assert_eq!(light.brightness(), Brightness::MIN);
    }

    #[test]
    fn new_light_trims_name() {
        let light = Light::new("  Living Room  ").unwrap();
        assert_eq!(light.name(), "Living Room");
    }

    #[test]
    fn new_light_rejects_blank_name() {
        assert_eq!(Light::new("").unwrap_err(), ValueError::EmptyName);
        assert_eq!(Light::new(" \t ").unwrap_err(), ValueError::EmptyName);
    }

    #[test]
    fn brightness_while_off_is_kept_but_inert() {
        let light = Light::new("Desk")
            .unwrap()
            .with_brightness(Brightness::new(60).unwrap());

        assert_eq!(light.brightness().value(), 60);
        assert_eq!(light.effective_brightness(), Brightness::MIN);

        let light = light.with_state(LightState::On);
        assert_eq!(light.effective_brightness().value(), 60);
    }

    #[test]
    fn light_display() {
        let light = Light::new("Porch")
            .unwrap()
            .with_state(LightState::On)
            .with_brightness(Brightness::MAX);
        assert_eq!(light.to_string(), "Porch [ON 100%]");
    }
}
