// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-in-time copy of every registered light.

use super::Light;

/// The complete set of lights at one instant, in registration order.
///
/// Observers receive a snapshot after every hub mutation. It is an owned
/// copy: nothing done to it reaches the hub.
///
/// # Revisions
///
/// Every mutation of a hub stamps its snapshot with the next revision
/// number. Notification passes may overlap (an observer that mutates the
/// hub, or mutations from several threads), so an observer can receive an
/// older snapshot after a newer one; comparing [`revision`](Self::revision)s
/// tells them apart. Equality compares the lights only.
#[derive(Debug, Clone, Default)]
pub struct LightSnapshot {
    lights: Vec<Light>,
    revision: u64,
}

impl LightSnapshot {
    pub(crate) fn new(lights: Vec<Light>, revision: u64) -> Self {
        Self { lights, revision }
    }

    /// Returns the hub revision this snapshot was taken at.
    ///
    /// Revisions of one hub only grow; a snapshot not produced by a hub
    /// has revision 0.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if this snapshot was taken before `other`.
    #[must_use]
    pub fn is_older_than(&self, other: u64) -> bool {
        self.revision < other
    }

    /// Looks up a light by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Light> {
        self.lights.iter().find(|l| l.name() == name)
    }

    /// Returns `true` if a light with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over the lights in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Light> {
        self.lights.iter()
    }

    /// Returns the light names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.lights.iter().map(Light::name).collect()
    }

    /// Returns the number of lights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Returns `true` if no lights are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Consumes the snapshot, returning the lights.
    #[must_use]
    pub fn into_lights(self) -> Vec<Light> {
        self.lights
    }
}

impl PartialEq for LightSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.lights == other.lights
    }
}

impl Eq for LightSnapshot {}

impl<'a> IntoIterator for &'a LightSnapshot {
    type Item = &'a Light;
    type IntoIter = std::slice::Iter<'a, Light>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LightSnapshot {
        LightSnapshot::new(
            vec![
                Light::new("Living Room").unwrap(),
                Light::new("Kitchen").unwrap(),
            ],
            4,
        )
    }

    #[test]
    fn snapshot_keeps_order() {
        assert_eq!(sample().names(), vec!["Living Room", "Kitchen"]);
    }

    #[test]
    fn snapshot_lookup() {
        let snapshot = sample();
        assert!(snapshot.contains("Kitchen"));
        assert!(snapshot.get("Garage").is_none());
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = LightSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.iter().count(), 0);
    }

    #[test]
    fn equality_ignores_revision() {
        let older = sample();
        let newer = LightSnapshot::new(older.clone().into_lights(), 9);

        assert_eq!(older, newer);
        assert!(older.is_older_than(newer.revision()));
        assert!(!newer.is_older_than(older.revision()));
    }
}
