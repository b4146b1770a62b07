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

//! Error types returned by the checked math operations.
//!
//! The unchecked operations never fail: numeric degeneracies surface as NaN or
//! infinity in the result. The `try_*` variants detect the same degeneracies up
//! front and report them through these types instead.

use std::fmt;

/// An error raised by a checked quaternion operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuaternionError {
    /// The quaternion has (near) zero length, so it cannot be normalized or inverted.
    ZeroLength,
    /// The matrix trace is too close to -1 for the trace-based conversion.
    ///
    /// This happens near 180° rotations, or when the matrix is not a rotation at all.
    DegenerateMatrix {
        /// The sum of the diagonal of the rotation block.
        trace: f32,
    },
}

impl fmt::Display for QuaternionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuaternionError::ZeroLength => {
                write!(f, "Quaternion has zero length")
            }
            QuaternionError::DegenerateMatrix { trace } => {
                write!(
                    f,
                    "Matrix with trace {trace} cannot be converted to a quaternion (1 + trace <= 0)"
                )
            }
        }
    }
}

impl std::error::Error for QuaternionError {}

/// An error raised while loading or validating math settings.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// The settings document could not be parsed.
    Parse(String),
    /// The linear interpolation threshold is outside `(0, 1)`.
    InvalidThreshold(f32),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(details) => {
                write!(f, "Failed to parse interpolation settings: {details}")
            }
            SettingsError::InvalidThreshold(value) => {
                write!(
                    f,
                    "Invalid linear interpolation threshold {value}: expected a value in (0, 1)"
                )
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err.to_string())
    }
}
