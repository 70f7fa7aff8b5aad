// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted form of a light and the array codec.

use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::light::{Light, LightSnapshot};
use crate::types::{Brightness, LightState};

/// One stored light: `{"name": ..., "state": "ON"|"OFF", "brightness": 0-100}`.
///
/// Every field is optional on the way in, because older stored arrays lack
/// `brightness` and hand-edited ones may lack anything. Records written by
/// this crate always carry all three.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightRecord {
    /// The light's name. Records without one are skipped on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// On/off state; `OFF` when missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<LightState>,
    /// Brightness percentage; 0 when missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
}

impl From<&Light> for LightRecord {
    fn from(light: &Light) -> Self {
        Self {
            name: Some(light.name().to_string()),
            state: Some(light.state()),
            brightness: Some(light.brightness().value()),
        }
    }
}

impl LightRecord {
    /// Builds the light this record describes.
    ///
    /// # Errors
    ///
    /// Returns `PersistError::MalformedRecord` if the name is missing or
    /// blank, or the brightness is above 100.
    pub fn into_light(self, index: usize) -> Result<Light, PersistError> {
        let malformed = |reason: String| PersistError::MalformedRecord { index, reason };

        let name = self.name.ok_or_else(|| malformed("missing name".to_string()))?;
        let brightness = Brightness::new(self.brightness.unwrap_or(0))
            .map_err(|e| malformed(e.to_string()))?;
        let light = Light::new(name).map_err(|e| malformed(e.to_string()))?;

        Ok(light
            .with_state(self.state.unwrap_or_default())
            .with_brightness(brightness))
    }
}

/// Converts every light in a snapshot to its stored form, in order.
#[must_use]
pub fn serialize_lights(lights: &LightSnapshot) -> Vec<LightRecord> {
    lights.iter().map(LightRecord::from).collect()
}

/// Rebuilds lights from stored records.
///
/// Malformed records are skipped with a warning; the rest are returned in
/// order. Duplicate names are passed through: the hub decides which wins.
#[must_use]
pub fn deserialize_lights(records: impl IntoIterator<Item = LightRecord>) -> Vec<Light> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match record.into_light(index) {
            Ok(light) => Some(light),
            Err(error) => {
                tracing::warn!(%error, "Skipping stored light");
                None
            }
        })
        .collect()
}

/// Encodes a snapshot as the JSON array text stored under the lights key.
///
/// # Errors
///
/// Returns `PersistError::Json` if serialization fails.
pub fn encode_lights(lights: &LightSnapshot) -> Result<String, PersistError> {
    Ok(serde_json::to_string(&serialize_lights(lights))?)
}

/// Decodes the JSON array text stored under the lights key.
///
/// Each element is decoded on its own: an element with the wrong shape is
/// skipped with a warning, like any other malformed record.
///
/// # Errors
///
/// Returns `PersistError::Json` if the text is not JSON at all, and
/// `PersistError::NotAnArray` if it is JSON but not an array.
pub fn decode_lights(json: &str) -> Result<Vec<Light>, PersistError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(items) = value else {
        return Err(PersistError::NotAnArray);
    };

    let records = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<LightRecord>(item) {
            Ok(record) => Some((index, record)),
            Err(e) => {
                let error = PersistError::MalformedRecord {
                    index,
                    reason: e.to_string(),
                };
                tracing::warn!(%error, "Skipping stored light");
                None
            }
        });

    Ok(records
        .filter_map(|(index, record)| match record.into_light(index) {
            Ok(light) => Some(light),
            Err(error) => {
                tracing::warn!(%error, "Skipping stored light");
                None
            }
        })
        .collect())
}
