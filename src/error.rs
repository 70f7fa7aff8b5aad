// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `lumihub` library.
//!
//! This module provides the error hierarchy used across the crate: value
//! validation, registry lookups, persisted-record decoding and key-value
//! store access.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while encoding or decoding persisted lights.
    #[error("persistence error: {0}")]
    Persist(#[from] PersistError),

    /// Error occurred while accessing the key-value store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// No light is registered under the given name.
    #[error("light not found: {0}")]
    LightNotFound(String),

    /// A light is already registered under the given name.
    #[error("a light named {0:?} already exists")]
    DuplicateName(String),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A light name was empty or only whitespace.
    #[error("light name must not be empty")]
    EmptyName,

    /// An invalid light state string was provided.
    #[error("invalid light state: {0}")]
    InvalidLightState(String),
}

/// Errors related to the persisted light array.
#[derive(Debug, Error)]
pub enum PersistError {
    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored payload is valid JSON but not an array of records.
    #[error("stored lights payload is not an array")]
    NotAnArray,

    /// A single record could not be turned into a light.
    ///
    /// Loading never fails with this variant: it is produced per record,
    /// logged and the record is skipped.
    #[error("malformed record at index {index}: {reason}")]
    MalformedRecord {
        /// Position of the record in the stored array.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// Errors raised by [`KeyValueStore`](crate::persist::KeyValueStore) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a JSON object of strings.
    #[error("corrupt store file: {0}")]
    Json(#[from] serde_json::Error),

    /// The store cannot be used at all (e.g. no config directory).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::EmptyName.into();
        assert!(matches!(err, Error::Value(ValueError::EmptyName)));
    }

    #[test]
    fn not_found_display() {
        let err = Error::LightNotFound("Porch".to_string());
        assert_eq!(err.to_string(), "light not found: Porch");
    }

    #[test]
    fn duplicate_name_display() {
        let err = Error::DuplicateName("Kitchen".to_string());
        assert_eq!(err.to_string(), "a light named \"Kitchen\" already exists");
    }

    #[test]
    fn malformed_record_display() {
        let err = PersistError::MalformedRecord {
            index: 2,
            reason: "missing name".to_string(),
        };
        assert_eq!(err.to_string(), "malformed record at index 2: missing name");
    }
}
