// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The observer trait and its error type.

use std::error::Error as StdError;

use thiserror::Error;

use crate::light::LightSnapshot;

/// Boxed error carried as the cause of an [`ObserverError`].
type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Receives the full set of lights after every hub mutation.
///
/// `update` is called synchronously on the thread that mutated the hub, after
/// the hub's internal locks have been released. An observer may therefore
/// read from or even mutate the hub from inside `update`; a mutation made
/// there triggers a nested notification pass.
///
/// Any `Fn(&LightSnapshot) -> Result<(), ObserverError>` closure is an
/// observer.
///
/// # Examples
///
/// ```
/// use lumihub::light::LightSnapshot;
/// use lumihub::observer::{ChangeObserver, ObserverError};
///
/// struct Printer;
///
/// impl ChangeObserver for Printer {
///     fn update(&self, lights: &LightSnapshot) -> Result<(), ObserverError> {
///         for light in lights {
///             println!("{light}");
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait ChangeObserver: Send + Sync {
    /// Handles a snapshot of every registered light.
    ///
    /// # Errors
    ///
    /// Returning an error marks this delivery as failed. What happens to
    /// the remaining observers depends on the hub's
    /// [`FailurePolicy`](super::FailurePolicy).
    fn update(&self, lights: &LightSnapshot) -> Result<(), ObserverError>;
}

impl<F> ChangeObserver for F
where
    F: Fn(&LightSnapshot) -> Result<(), ObserverError> + Send + Sync,
{
    fn update(&self, lights: &LightSnapshot) -> Result<(), ObserverError> {
        self(lights)
    }
}

/// Failure reported by a [`ChangeObserver`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ObserverError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ObserverError {
    /// Creates an error with a message only.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping an underlying cause.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn closure_is_an_observer() {
        let observer = |lights: &LightSnapshot| {
            if lights.is_empty() {
                Err(ObserverError::new("nothing to render"))
            } else {
                Ok(())
            }
        };

        let err = observer.update(&LightSnapshot::default()).unwrap_err();
        assert_eq!(err.to_string(), "nothing to render");
    }

    #[test]
    fn observer_error_keeps_source() {
        let err = ObserverError::with_source(
            "save failed",
            StoreError::Unavailable("no config dir".to_string()),
        );

        assert_eq!(err.message(), "save failed");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "store unavailable: no config dir");
    }
}
