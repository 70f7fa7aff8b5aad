// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of lights with snapshot notification.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::light::{Light, LightSnapshot};
use crate::observer::{ChangeObserver, NotifyReport, ObserverError, ObserverId, ObserverRegistry};
use crate::types::{Brightness, LightState};

use super::HubConfig;

/// Registry of named lights that notifies observers after every change.
///
/// The hub owns the lights; callers refer to them by name. Each successful
/// mutation produces a [`LightSnapshot`] of *all* lights which is delivered,
/// synchronously and in subscription order, to every observer before the
/// method returns.
///
/// # Sharing
///
/// Construct one hub and hand an `Arc<LightHub>` to whatever needs it. For
/// code that cannot be given a handle, [`LightHub::process_wide`] returns a
/// lazily created hub that lives for the rest of the process.
///
/// # Thread Safety
///
/// Lights and observers each sit behind a `parking_lot::RwLock`. A mutation
/// and the snapshot it produces are taken under one write lock, and the lock
/// is released before any observer runs, so observers may call back into the
/// hub.
///
/// Passes are not serialized: a pass started by a nested or concurrent
/// mutation can reach an observer before an older one does. Each snapshot
/// carries the [revision](LightSnapshot::revision) it was taken at, and
/// observers that keep state (such as `SaveOnChange` and `SnapshotBus`)
/// ignore snapshots older than the newest one they have handled.
///
/// # Examples
///
/// ```
/// use lumihub::{Light, LightHub};
/// use lumihub::types::{Brightness, LightState};
///
/// # fn main() -> lumihub::Result<()> {
/// let hub = LightHub::new();
/// hub.on_change(|lights| println!("now {} lights", lights.len()));
///
/// hub.add_light(Light::new("Kitchen")?)?;
/// hub.control_light("Kitchen", LightState::On)?;
/// hub.set_brightness("Kitchen", Brightness::new(75)?)?;
///
/// let kitchen = hub.light("Kitchen").unwrap();
/// assert!(kitchen.state().is_on());
/// assert_eq!(kitchen.brightness().value(), 75);
/// # Ok(())
/// # }
/// ```
pub struct LightHub {
    /// Registered lights, in insertion order. Names are unique.
    lights: RwLock<Vec<Light>>,
    /// Bumped under the `lights` write lock by every mutation.
    revision: AtomicU64,
    observers: ObserverRegistry,
    config: HubConfig,
}

impl LightHub {
    /// Creates an empty hub with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HubConfig::default())
    }

    /// Creates an empty hub with the given configuration.
    #[must_use]
    pub fn with_config(config: HubConfig) -> Self {
        Self {
            lights: RwLock::new(Vec::new()),
            revision: AtomicU64::new(0),
            observers: ObserverRegistry::new(),
            config,
        }
    }

    /// Returns the hub shared by the whole process.
    ///
    /// The hub is created on the first call; later calls return the same
    /// instance with its lights and observers intact.
    #[must_use]
    pub fn process_wide() -> Arc<Self> {
        static HUB: OnceLock<Arc<LightHub>> = OnceLock::new();
        Arc::clone(HUB.get_or_init(|| {
            tracing::debug!("Creating process-wide light hub");
            Arc::new(LightHub::new())
        }))
    }

    /// Returns the hub configuration.
    #[must_use]
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Registers an observer at the end of the notification order.
    ///
    /// The same observer may be registered more than once; it is then
    /// notified once per registration.
    pub fn add_observer(&self, observer: Arc<dyn ChangeObserver>) -> ObserverId {
        let id = self.observers.add(observer);
        tracing::debug!(observer = %id, "Observer added");
        id
    }

    /// Registers an infallible closure as an observer.
    pub fn on_change<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(&LightSnapshot) + Send + Sync + 'static,
    {
        let observer = move |lights: &LightSnapshot| -> std::result::Result<(), ObserverError> {
            callback(lights);
            Ok(())
        };
        self.add_observer(Arc::new(observer))
    }

    /// Removes every registration of this exact observer.
    ///
    /// Observers are compared by identity (the same `Arc` allocation), not by
    /// value. Returns the number of registrations removed.
    pub fn remove_observer(&self, observer: &Arc<dyn ChangeObserver>) -> usize {
        let removed = self.observers.remove(observer);
        tracing::debug!(removed, "Observer removed");
        removed
    }

    /// Removes the registration with this ID.
    ///
    /// Returns `true` if it was found.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Returns the number of observer registrations.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Sends the current snapshot to every observer.
    ///
    /// Mutating operations call this themselves; use it directly to make a
    /// newly added observer render the current state.
    pub fn notify_observers(&self) -> NotifyReport {
        let snapshot = self.snapshot();
        self.dispatch(&snapshot)
    }

    fn dispatch(&self, snapshot: &LightSnapshot) -> NotifyReport {
        let report = self.observers.dispatch(snapshot, self.config.failure_policy);
        tracing::debug!(
            lights = snapshot.len(),
            delivered = report.delivered,
            failed = report.failed,
            skipped = report.skipped,
            "Notified observers"
        );
        report
    }

    // =========================================================================
    // Light Management
    // =========================================================================

    /// Registers a new light under its name and notifies observers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if a light with the same name is
    /// already registered. The existing light is left untouched and no
    /// notification is sent.
    pub fn add_light(&self, light: Light) -> Result<()> {
        let snapshot = {
            let mut lights = self.lights.write();
            if lights.iter().any(|l| l.name() == light.name()) {
                tracing::warn!(light = light.name(), "Rejected duplicate light name");
                return Err(Error::DuplicateName(light.name().to_string()));
            }

            tracing::debug!(
                light = light.name(),
                state = %light.state(),
                brightness = %light.brightness(),
                "Adding light"
            );
            lights.push(light);
            self.stamp(&lights)
        };

        self.dispatch(&snapshot);
        Ok(())
    }

    /// Removes a light and notifies observers.
    ///
    /// Removing a name that is not registered is not an error: observers are
    /// still notified, with an unchanged snapshot. Returns `true` if a light
    /// was removed.
    pub fn remove_light(&self, name: &str) -> bool {
        let (removed, snapshot) = {
            let mut lights = self.lights.write();
            let before = lights.len();
            lights.retain(|l| l.name() != name);
            (lights.len() != before, self.stamp(&lights))
        };

        tracing::debug!(light = name, removed, "Removing light");
        self.dispatch(&snapshot);
        removed
    }

    /// Sets a light's on/off state and notifies observers.
    ///
    /// Setting the state the light already has still notifies. Brightness is
    /// not changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LightNotFound`] if no light has this name. Nothing is
    /// created and no notification is sent.
    pub fn control_light(&self, name: &str, state: LightState) -> Result<()> {
        self.modify(name, |light| {
            tracing::debug!(light = name, %state, "Controlling light");
            light.set_state(state);
        })
    }

    /// Flips a light between on and off and notifies observers.
    ///
    /// Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LightNotFound`] if no light has this name.
    pub fn toggle_light(&self, name: &str) -> Result<LightState> {
        self.modify(name, |light| {
            let state = light.state().toggle();
            tracing::debug!(light = name, %state, "Toggling light");
            light.set_state(state);
            state
        })
    }

    /// Sets a light's brightness and notifies observers.
    ///
    /// The brightness is stored even if the light is off. Out-of-range values
    /// cannot reach this method: [`Brightness::new`] rejects them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LightNotFound`] if no light has this name.
    pub fn set_brightness(&self, name: &str, brightness: Brightness) -> Result<()> {
        self.modify(name, |light| {
            tracing::debug!(light = name, %brightness, "Setting brightness");
            light.set_brightness(brightness);
        })
    }

    /// Replaces every light at once and notifies observers a single time.
    ///
    /// Used when loading from storage. If several lights share a name the
    /// first one is kept and the others are skipped with a warning. Returns
    /// the number of lights now registered.
    pub fn replace_all(&self, lights: impl IntoIterator<Item = Light>) -> usize {
        let mut unique: Vec<Light> = Vec::new();
        for light in lights {
            if unique.iter().any(|l| l.name() == light.name()) {
                tracing::warn!(light = light.name(), "Skipping duplicate light name");
                continue;
            }
            unique.push(light);
        }

        let count = unique.len();
        let snapshot = {
            let mut current = self.lights.write();
            *current = unique;
            self.stamp(&current)
        };

        tracing::debug!(count, "Replaced all lights");
        self.dispatch(&snapshot);
        count
    }

    /// Removes every light and notifies observers.
    pub fn clear(&self) {
        self.replace_all(Vec::new());
    }

    /// Takes a snapshot at the next revision. The `lights` write lock must be held.
    fn stamp(&self, lights: &[Light]) -> LightSnapshot {
        let revision = self.revision.fetch_add(1, Ordering::Relaxed) + 1;
        LightSnapshot::new(lights.to_vec(), revision)
    }

    /// Applies `apply` to the named light, then notifies with the new snapshot.
    fn modify<R>(&self, name: &str, apply: impl FnOnce(&mut Light) -> R) -> Result<R> {
        let (result, snapshot) = {
            let mut lights = self.lights.write();
            let Some(light) = lights.iter_mut().find(|l| l.name() == name) else {
                tracing::warn!(light = name, "Light not found");
                return Err(Error::LightNotFound(name.to_string()));
            };
            let result = apply(light);
            (result, self.stamp(&lights))
        };

        self.dispatch(&snapshot);
        Ok(result)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns a copy of the named light.
    #[must_use]
    pub fn light(&self, name: &str) -> Option<Light> {
        self.lights.read().iter().find(|l| l.name() == name).cloned()
    }

    /// Returns `true` if a light with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lights.read().iter().any(|l| l.name() == name)
    }

    /// Returns the number of registered lights.
    #[must_use]
    pub fn light_count(&self) -> usize {
        self.lights.read().len()
    }

    /// Returns a snapshot of every registered light.
    #[must_use]
    pub fn snapshot(&self) -> LightSnapshot {
        let lights = self.lights.read();
        LightSnapshot::new(lights.clone(), self.revision.load(Ordering::Relaxed))
    }
}

impl Default for LightHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LightHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightHub")
            .field("light_count", &self.light_count())
            .field("observer_count", &self.observer_count())
            .field("revision", &self.revision.load(Ordering::Relaxed))
            .field("config", &self.config)
            .finish()
    }
}
