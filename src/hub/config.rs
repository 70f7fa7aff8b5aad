// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub configuration.

use crate::observer::FailurePolicy;

/// Configuration for a [`LightHub`](super::LightHub).
///
/// # Examples
///
/// ```
/// use lumihub::hub::{HubConfig, LightHub};
/// use lumihub::observer::FailurePolicy;
///
/// let hub = LightHub::with_config(
///     HubConfig::default().with_failure_policy(FailurePolicy::Abort),
/// );
/// assert_eq!(hub.config().failure_policy, FailurePolicy::Abort);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubConfig {
    /// What a notification pass does when an observer fails.
    pub failure_policy: FailurePolicy,
}

impl HubConfig {
    /// Sets the observer failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}
