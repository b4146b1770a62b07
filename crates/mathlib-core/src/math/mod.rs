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

//! Provides the quaternion algebra used to represent 3D rotations.
//!
//! The centerpiece is [`Quaternion`]: arithmetic, normalization, inversion,
//! spherical interpolation, and conversions to and from rotation matrices and
//! Euler angles. [`Vec3`] and [`Mat4`] are the thin value types it works with.
//!
//! All angular functions in this module operate in **radians**.

// --- Fundamental Constants ---

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

// --- Declare Sub-Modules ---

pub mod error;
pub mod matrix;
pub mod quaternion;
pub mod settings;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::error::{QuaternionError, SettingsError};
pub use self::matrix::Mat4;
pub use self::quaternion::Quaternion;
pub use self::settings::InterpolationSettings;
pub use self::vector::Vec3;

// --- Utility Functions ---

/// Performs an approximate equality comparison between two floats with a custom tolerance.
///
/// # Examples
///
/// ```
/// use mathlib_core::math::approx_eq_eps;
/// assert!(approx_eq_eps(0.001, 0.002, 1e-2));
/// assert!(!approx_eq_eps(0.001, 0.002, 1e-4));
/// ```
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Performs an approximate equality comparison using the module's default [`EPSILON`].
///
/// # Examples
///
/// ```
/// use mathlib_core::math::{approx_eq, EPSILON};
/// assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
/// assert!(!approx_eq(1.0, 1.0 + EPSILON * 2.0));
/// ```
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}
