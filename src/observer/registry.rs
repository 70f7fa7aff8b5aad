// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observer bookkeeping and fan-out.
//!
//! - [`ObserverId`] - Unique identifier for unsubscribing
//! - [`ObserverRegistry`] - Ordered list of observers and the dispatch loop

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::light::LightSnapshot;

use super::ChangeObserver;

/// Unique identifier for a registered observer.
///
/// Returned when an observer is added; registering the same observer twice
/// yields two different IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Obs({})", self.0)
    }
}

/// What a notification pass does when an observer returns an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and keep delivering to the remaining observers.
    #[default]
    Isolate,
    /// Stop the pass; observers after the failing one are not called.
    Abort,
}

/// Outcome of one notification pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    /// Observers that handled the snapshot successfully.
    pub delivered: usize,
    /// Observers that returned an error.
    pub failed: usize,
    /// Observers not called because an earlier one failed under
    /// [`FailurePolicy::Abort`].
    pub skipped: usize,
}

impl NotifyReport {
    /// Returns `true` if every observer handled the snapshot.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}

type Entry = (ObserverId, Arc<dyn ChangeObserver>);

/// Ordered list of observers.
///
/// Duplicates are allowed: the same observer registered twice is called
/// twice per pass.
pub(crate) struct ObserverRegistry {
    next_id: AtomicU64,
    observers: RwLock<Vec<Entry>>,
}

impl ObserverRegistry {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            observers: RwLock::new(Vec::new()),
        }
    }

    fn next_id(&self) -> ObserverId {
        ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Appends an observer to the end of the list.
    pub(crate) fn add(&self, observer: Arc<dyn ChangeObserver>) -> ObserverId {
        let id = self.next_id();
        self.observers.write().push((id, observer));
        id
    }

    /// Removes every entry that is the same allocation as `observer`.
    ///
    /// Returns the number of entries removed.
    pub(crate) fn remove(&self, observer: &Arc<dyn ChangeObserver>) -> usize {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(_, entry)| {
            !std::ptr::addr_eq(Arc::as_ptr(entry), Arc::as_ptr(observer))
        });
        before - observers.len()
    }

    /// Removes the entry with this ID.
    pub(crate) fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(entry_id, _)| *entry_id != id);
        observers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// Delivers `lights` to every observer registered when the call starts.
    ///
    /// The list is copied before the first call, so observers added or
    /// removed by an observer during the pass do not change who receives
    /// this snapshot. No lock is held while observers run.
    pub(crate) fn dispatch(&self, lights: &LightSnapshot, policy: FailurePolicy) -> NotifyReport {
        let targets: Vec<Entry> = self.observers.read().clone();
        let mut report = NotifyReport::default();

        for (position, (id, observer)) in targets.iter().enumerate() {
            match observer.update(lights) {
                Ok(()) => report.delivered += 1,
                Err(error) => {
                    report.failed += 1;
                    tracing::warn!(observer = %id, %error, "Observer failed to handle snapshot");
                    if policy == FailurePolicy::Abort {
                        report.skipped = targets.len() - position - 1;
                        break;
                    }
                }
            }
        }

        report
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observer_count", &self.len())
            .finish()
    }
}
