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

//! Defines the `Mat4` type used as the target of quaternion-to-matrix conversions.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::{Quaternion, Vec3};
use std::ops::{Index, IndexMut, Mul};

/// A 4x4 matrix backed by 16 floats in row-major order.
///
/// Element `(row, col)` lives at `array[row * 4 + col]`. Vectors are treated as
/// columns, so a transform is applied as `M * v`. The upper-left 3x3 block holds
/// rotation and scale; indices 3, 7 and 11 hold the translation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Mat4 {
    /// The backing store, row after row.
    pub array: [f32; 16],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        array: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// A 4x4 matrix with all elements set to 0.
    pub const ZERO: Self = Self { array: [0.0; 16] };

    /// Creates a matrix from 16 floats laid out row after row.
    #[inline]
    pub const fn from_row_major(array: [f32; 16]) -> Self {
        Self { array }
    }

    /// Returns the element at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row` or `col` is greater than 3.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < 4 && col < 4, "Index out of bounds for Mat4");
        self.array[row * 4 + col]
    }

    /// Creates a matrix for a right-handed rotation around the X-axis.
    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_row_major([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, -s, 0.0, //
            0.0, s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Creates a matrix for a right-handed rotation around the Y-axis.
    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_row_major([
            c, 0.0, s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Creates a matrix for a right-handed rotation around the Z-axis.
    #[inline]
    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_row_major([
            c, -s, 0.0, 0.0, //
            s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Creates a rotation matrix from a unit quaternion.
    ///
    /// Only the rotation block (indices 0-2, 4-6, 8-10) and the homogeneous
    /// scale at index 15 are written; every other element keeps the value of
    /// [`Mat4::default`]. The quaternion is used as given, so a non-unit input
    /// produces a scaled, skewed block.
    pub fn from_quat(q: Quaternion) -> Self {
        let (w, x, y, z) = (q.w, q.v.x, q.v.y, q.v.z);
        let mut m = Self::default();

        m.array[0] = 1.0 - 2.0 * y * y - 2.0 * z * z;
        m.array[1] = 2.0 * x * y - 2.0 * w * z;
        m.array[2] = 2.0 * x * z + 2.0 * w * y;

        m.array[4] = 2.0 * x * y + 2.0 * w * z;
        m.array[5] = 1.0 - 2.0 * x * x - 2.0 * z * z;
        m.array[6] = 2.0 * y * z - 2.0 * w * x;

        m.array[8] = 2.0 * x * z - 2.0 * w * y;
        m.array[9] = 2.0 * y * z + 2.0 * w * x;
        m.array[10] = 1.0 - 2.0 * x * x - 2.0 * y * y;

        m.array[15] = 1.0;
        m
    }

    /// Returns the sum of the diagonal of the upper-left 3x3 block.
    #[inline]
    pub fn trace3(&self) -> f32 {
        self.array[0] + self.array[5] + self.array[10]
    }

    /// Applies the upper-left 3x3 block to a direction vector, ignoring translation.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.array;
        Vec3::new(
            m[0] * v.x + m[1] * v.y + m[2] * v.z,
            m[4] * v.x + m[5] * v.y + m[6] * v.z,
            m[8] * v.x + m[9] * v.y + m[10] * v.z,
        )
    }
}

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    /// Multiplies two matrices. `(a * b) * v` applies `b` first, then `a`.
    fn mul(self, rhs: Self) -> Self::Output {
        let mut out = Self::ZERO;
        for row in 0..4 {
            for col in 0..4 {
                out.array[row * 4 + col] = (0..4)
                    .map(|k| self.array[row * 4 + k] * rhs.array[k * 4 + col])
                    .sum();
            }
        }
        out
    }
}

impl Index<usize> for Mat4 {
    type Output = f32;
    /// Indexes the row-major backing store directly.
    ///
    /// # Panics
    /// Panics if `index` is greater than 15.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.array[index]
    }
}

impl IndexMut<usize> for Mat4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.array[index]
    }
}
