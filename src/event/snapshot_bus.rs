// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast channel that forwards hub snapshots to async consumers.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::light::LightSnapshot;
use crate::observer::{ChangeObserver, ObserverError};

/// Default channel capacity for the snapshot bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Fans hub snapshots out to any number of async receivers.
///
/// The bus is itself a [`ChangeObserver`]: register it with a hub and every
/// snapshot is sent on a tokio broadcast channel. Sending never blocks, so
/// the hub's notification pass stays synchronous.
///
/// # Capacity
///
/// A receiver that falls more than `capacity` snapshots behind loses the
/// oldest ones (`RecvError::Lagged`). Since each snapshot is complete, the
/// next one received is still a correct picture of the hub.
///
/// # Ordering
///
/// As an observer, the bus forwards a snapshot only if it is not older than
/// the last one it forwarded, so receivers never see the hub go back in
/// time. Register a bus with one hub only.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use lumihub::LightHub;
/// use lumihub::event::SnapshotBus;
///
/// let hub = LightHub::new();
/// let bus = Arc::new(SnapshotBus::new());
/// let mut rx = bus.subscribe();
///
/// hub.add_observer(bus.clone());
/// hub.notify_observers();
///
/// assert!(rx.try_recv().unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotBus {
    sender: broadcast::Sender<LightSnapshot>,
    /// Revision of the newest snapshot forwarded, shared by clones.
    latest: Arc<Mutex<u64>>,
}

impl SnapshotBus {
    /// Creates a new bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new bus with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            latest: Arc::new(Mutex::new(0)),
        }
    }

    /// Subscribes to snapshots published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LightSnapshot> {
        self.sender.subscribe()
    }

    /// Returns the number of active receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes a snapshot and returns how many receivers got it.
    ///
    /// Returns 0 if there are no receivers; the snapshot is dropped.
    pub fn publish(&self, lights: LightSnapshot) -> usize {
        self.sender.send(lights).unwrap_or(0)
    }
}

impl Default for SnapshotBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeObserver for SnapshotBus {
    fn update(&self, lights: &LightSnapshot) -> Result<(), ObserverError> {
        let mut latest = self.latest.lock();
        if lights.is_older_than(*latest) {
            tracing::trace!(revision = lights.revision(), "Dropped stale snapshot");
            return Ok(());
        }

        *latest = lights.revision();
        let receivers = self.publish(lights.clone());
        tracing::trace!(receivers, revision = *latest, "Published light snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LightHub;
    use crate::light::Light;
    use crate::types::LightState;

    #[test]
    fn new_bus_has_no_subscribers() {
        let bus = SnapshotBus::new();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn drop_subscriber_decrements_count() {
        let bus = SnapshotBus::new();
        let rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        drop(rx);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn publish_without_subscribers_returns_zero() {
        let bus = SnapshotBus::new();
        assert_eq!(bus.publish(LightSnapshot::default()), 0);
    }

    #[test]
    fn clone_shares_same_channel() {
        let bus1 = SnapshotBus::new();
        let bus2 = bus1.clone();

        let _rx = bus1.subscribe();
        assert_eq!(bus2.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn hub_changes_reach_every_receiver() {
        let hub = LightHub::new();
        let bus = Arc::new(SnapshotBus::with_capacity(8));
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        hub.add_observer(bus.clone());

        hub.add_light(Light::new("Kitchen").unwrap()).unwrap();
        hub.control_light("Kitchen", LightState::On).unwrap();

        for rx in [&mut rx1, &mut rx2] {
            let added = rx.recv().await.unwrap();
            assert_eq!(added.get("Kitchen").unwrap().state(), LightState::Off);

            let switched = rx.recv().await.unwrap();
            assert_eq!(switched.get("Kitchen").unwrap().state(), LightState::On);
        }
    }

    #[tokio::test]
    async fn failed_lookup_publishes_nothing() {
        let hub = LightHub::new();
        let bus = Arc::new(SnapshotBus::new());
        let mut rx = bus.subscribe();
        hub.add_observer(bus.clone());

        assert!(hub.control_light("Garage", LightState::On).is_err());

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn receivers_never_see_an_older_snapshot() {
        let hub = Arc::new(LightHub::new());
        hub.add_light(Light::new("Porch").unwrap()).unwrap();

        // Switching the porch on from inside the first observer makes the
        // nested pass reach the bus before the outer one.
        {
            let hub_handle = Arc::clone(&hub);
            hub.on_change(move |lights| {
                let porch_on = hub_handle.light("Porch").is_some_and(|l| l.state().is_on());
                if lights.contains("Doorbell") && !porch_on {
                    hub_handle.control_light("Porch", LightState::On).unwrap();
                }
            });
        }
        let bus = Arc::new(SnapshotBus::new());
        let mut rx = bus.subscribe();
        hub.add_observer(bus.clone());

        hub.add_light(Light::new("Doorbell").unwrap()).unwrap();

        let newest = rx.recv().await.unwrap();
        assert_eq!(newest.get("Porch").unwrap().state(), LightState::On);
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }
}
