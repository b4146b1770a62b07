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

//! # MathLib Core
//!
//! Rotation math for a 3D engine: a quaternion type with its algebra,
//! interpolation, and matrix and Euler-angle conversions.
//!
//! ```
//! use mathlib_core::math::{Quaternion, Vec3, FRAC_PI_2};
//!
//! let quarter_turn = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2);
//! let halfway = Quaternion::slerp(Quaternion::IDENTITY, quarter_turn, 0.5);
//! assert!(halfway.is_normalized());
//! ```

#![warn(missing_docs)]

pub mod math;

pub use math::{Mat4, Quaternion, Vec3};
