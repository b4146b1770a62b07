// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tunable settings for quaternion interpolation.

use serde::{Deserialize, Serialize};

use super::error::SettingsError;
use super::EPSILON;

/// Settings that control [`Quaternion::slerp_with`](super::Quaternion::slerp_with).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpolationSettings {
    /// When the cosine of the angle between the endpoints exceeds
    /// `1.0 - linear_threshold`, slerp falls back to normalized linear
    /// interpolation instead of dividing by a near-zero `sin(theta)`.
    pub linear_threshold: f32,
    /// If `true`, the interpolation factor is clamped to `[0.0, 1.0]`.
    pub clamp_t: bool,
}

impl Default for InterpolationSettings {
    fn default() -> Self {
        Self {
            linear_threshold: EPSILON,
            clamp_t: true,
        }
    }
}

impl InterpolationSettings {
    /// Parses settings from a JSON document and validates them.
    ///
    /// Missing fields take their default value.
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] for malformed JSON and
    /// [`SettingsError::InvalidThreshold`] if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::debug!("Loaded interpolation settings: {settings:?}");
        Ok(settings)
    }

    /// Checks that the threshold lies in `(0, 1)`.
    ///
    /// A zero threshold would let identical endpoints reach the division by
    /// `sin(theta) = 0`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidThreshold`] if the threshold is zero,
    /// negative, NaN, or not below `1.0`.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let threshold = self.linear_threshold;
        if !((0.0..1.0).contains(&threshold) && threshold > 0.0) {
            log::warn!(
                "Rejecting interpolation settings: linear_threshold = {}",
                self.linear_threshold
            );
            return Err(SettingsError::InvalidThreshold(self.linear_threshold));
        }
        Ok(())
    }
}
