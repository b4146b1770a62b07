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

//! Provides a Quaternion type for representing 3D rotations.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::error::QuaternionError;
use super::settings::InterpolationSettings;
use super::{Mat4, Vec3, EPSILON, FRAC_PI_2};
use std::fmt;
use std::ops::{Add, Mul, MulAssign, Neg, Sub};

/// Represents a quaternion, either as a general 4D hypercomplex number or as a 3D rotation.
///
/// A quaternion is stored as a scalar part `w` followed by a vector part `v`.
/// It represents a rotation when it is a "unit quaternion", i.e. when
/// `w² + v·v = 1`. Raw arithmetic (`+`, `-`, scaling) does not preserve unit
/// length; call [`Quaternion::normalize`] when it matters.
///
/// `q` and `-q` represent the same rotation.
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
pub struct Quaternion {
    /// The scalar (real) part.
    pub w: f32,
    /// The vector (imaginary) part.
    pub v: Vec3,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        w: 1.0,
        v: Vec3::ZERO,
    };

    /// The additive zero quaternion. It does not represent a rotation.
    pub const ZERO: Quaternion = Quaternion {
        w: 0.0,
        v: Vec3::ZERO,
    };

    /// Creates a quaternion from a scalar part and a vector part.
    ///
    /// The components are stored as given; no normalization is performed.
    #[inline]
    pub const fn new(w: f32, v: Vec3) -> Self {
        Self { w, v }
    }

    /// Creates a quaternion from its four raw components, scalar first.
    #[inline]
    pub const fn from_wxyz(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self {
            w,
            v: Vec3::new(x, y, z),
        }
    }

    /// Creates a quaternion representing a rotation around a given axis by a given angle.
    ///
    /// # Arguments
    ///
    /// * `axis`: The axis of rotation. It is normalized before use.
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self {
            w: c,
            v: axis.normalize() * s,
        }
    }

    /// Creates a quaternion from Euler angles in radians.
    ///
    /// The angles are applied about the fixed X, Y and Z axes, in that order:
    /// first `euler.x` about X, then `euler.y` about Y, then `euler.z` about Z.
    /// The result equals `qz * qy * qx`, and its matrix equals
    /// `Rz * Ry * Rx`.
    pub fn from_euler(euler: Vec3) -> Self {
        let (sx, cx) = (euler.x * 0.5).sin_cos();
        let (sy, cy) = (euler.y * 0.5).sin_cos();
        let (sz, cz) = (euler.z * 0.5).sin_cos();

        Self::from_wxyz(
            cx * cy * cz + sx * sy * sz,
            sx * cy * cz - cx * sy * sz,
            cx * sy * cz + sx * cy * sz,
            cx * cy * sz - sx * sy * cz,
        )
    }

    /// Extracts Euler angles in radians, using the convention of [`Quaternion::from_euler`].
    ///
    /// The Y angle is confined to `[-π/2, π/2]`. At exactly ±π/2 (gimbal lock)
    /// the X and Z angles are not unique and one valid pair is returned.
    pub fn to_euler(&self) -> Vec3 {
        let (w, x, y, z) = (self.w, self.v.x, self.v.y, self.v.z);

        let sin_x_cos_y = 2.0 * (w * x + y * z);
        let cos_x_cos_y = 1.0 - 2.0 * (x * x + y * y);
        let angle_x = sin_x_cos_y.atan2(cos_x_cos_y);

        let sin_y = 2.0 * (w * y - z * x);
        let angle_y = if sin_y.abs() >= 1.0 {
            FRAC_PI_2.copysign(sin_y)
        } else {
            sin_y.asin()
        };

        let sin_z_cos_y = 2.0 * (w * z + x * y);
        let cos_z_cos_y = 1.0 - 2.0 * (y * y + z * z);
        let angle_z = sin_z_cos_y.atan2(cos_z_cos_y);

        Vec3::new(angle_x, angle_y, angle_z)
    }

    /// Creates a quaternion from the rotation block of a matrix using its trace.
    ///
    /// `w = sqrt(1 + m00 + m11 + m22) / 2`, and the vector part is recovered from
    /// the off-diagonal differences divided by `4w`. When `1 + trace <= 0`
    /// (rotations close to 180°) the result contains NaN or infinity. Use
    /// [`Quaternion::try_from_rotation_matrix`] to detect that case, or
    /// [`Quaternion::from_rotation_matrix_stable`] to handle every rotation.
    pub fn from_rotation_matrix(m: &Mat4) -> Self {
        let a = &m.array;
        let w = (1.0 + a[0] + a[5] + a[10]).sqrt() / 2.0;
        let four_w = 4.0 * w;
        Self::from_wxyz(
            w,
            (a[9] - a[6]) / four_w,
            (a[2] - a[8]) / four_w,
            (a[4] - a[1]) / four_w,
        )
    }

    /// Checked variant of [`Quaternion::from_rotation_matrix`].
    ///
    /// # Errors
    /// Returns [`QuaternionError::DegenerateMatrix`] when `1 + trace <= EPSILON`.
    pub fn try_from_rotation_matrix(m: &Mat4) -> Result<Self, QuaternionError> {
        let trace = m.trace3();
        if 1.0 + trace <= EPSILON {
            log::trace!("Refusing trace-based conversion of matrix with trace {trace}");
            return Err(QuaternionError::DegenerateMatrix { trace });
        }
        Ok(Self::from_rotation_matrix(m))
    }

    /// Creates a unit quaternion from the rotation block of a matrix using Shepperd's method.
    ///
    /// Picks the largest of `w`, `x`, `y`, `z` to divide by, so it stays accurate
    /// for every rotation angle, including 180°.
    pub fn from_rotation_matrix_stable(m: &Mat4) -> Self {
        let a = &m.array;
        let (m00, m01, m02) = (a[0], a[1], a[2]);
        let (m10, m11, m12) = (a[4], a[5], a[6]);
        let (m20, m21, m22) = (a[8], a[9], a[10]);

        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = 2.0 * (trace + 1.0).sqrt();
            Self::from_wxyz(
                0.25 * s,
                (m21 - m12) / s,
                (m02 - m20) / s,
                (m10 - m01) / s,
            )
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            Self::from_wxyz(
                (m21 - m12) / s,
                0.25 * s,
                (m01 + m10) / s,
                (m02 + m20) / s,
            )
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            Self::from_wxyz(
                (m02 - m20) / s,
                (m01 + m10) / s,
                0.25 * s,
                (m12 + m21) / s,
            )
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            Self::from_wxyz(
                (m10 - m01) / s,
                (m02 + m20) / s,
                (m12 + m21) / s,
                0.25 * s,
            )
        };
        q.normalize()
    }

    /// Converts this quaternion to a rotation matrix. See [`Mat4::from_quat`].
    #[inline]
    pub fn to_rotation_matrix(&self) -> Mat4 {
        Mat4::from_quat(*self)
    }

    /// Sets every component to zero, turning `self` into [`Quaternion::ZERO`].
    #[inline]
    pub fn set_zero(&mut self) {
        *self = Self::ZERO;
    }

    /// Returns the quaternion with every component multiplied by `s`.
    #[inline]
    pub fn scale(&self, s: f32) -> Self {
        Self {
            w: self.w * s,
            v: self.v * s,
        }
    }

    /// Computes the Hamilton product `self * rhs`.
    ///
    /// For rotations, the result applies `rhs` first, then `self`.
    /// The product is associative but not commutative.
    #[inline]
    pub fn hamilton(&self, rhs: Self) -> Self {
        let (w1, x1, y1, z1) = (self.w, self.v.x, self.v.y, self.v.z);
        let (w2, x2, y2, z2) = (rhs.w, rhs.v.x, rhs.v.y, rhs.v.z);
        Self::from_wxyz(
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
        )
    }

    /// Computes the 4D dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.w * other.w + self.v.dot(other.v)
    }

    /// Flips the sign of every component in place.
    #[inline]
    pub fn negate(&mut self) {
        *self = self.negated();
    }

    /// Returns a copy with every component sign-flipped.
    #[inline]
    pub fn negated(&self) -> Self {
        Self {
            w: -self.w,
            v: -self.v,
        }
    }

    /// Computes the conjugate `(w, -v)`.
    ///
    /// For a unit quaternion, the conjugate is also the inverse.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            w: self.w,
            v: -self.v,
        }
    }

    /// Calculates the squared length `w² + v·v`.
    ///
    /// This is the scalar part of `self * self.conjugate()`.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the 4D Euclidean length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the quaternion scaled to unit length.
    ///
    /// The zero quaternion has no direction: normalizing it yields NaN
    /// components. Use [`Quaternion::try_normalize`] when the input may be zero.
    #[inline]
    pub fn normalize(&self) -> Self {
        self.scale(1.0 / self.length())
    }

    /// Checked variant of [`Quaternion::normalize`].
    ///
    /// # Errors
    /// Returns [`QuaternionError::ZeroLength`] if the squared length is below `EPSILON²`.
    pub fn try_normalize(&self) -> Result<Self, QuaternionError> {
        if self.length_squared() <= EPSILON * EPSILON {
            log::trace!("Refusing to normalize near-zero quaternion {self}");
            return Err(QuaternionError::ZeroLength);
        }
        Ok(self.normalize())
    }

    /// Returns `true` if the quaternion has unit length, within `1e-4` on the squared length.
    #[inline]
    pub fn is_normalized(&self) -> bool {
        approx::abs_diff_eq!(self.length_squared(), 1.0, epsilon = 1e-4)
    }

    /// Returns `true` if every component is neither infinite nor NaN.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.v.is_finite()
    }

    /// Computes the multiplicative inverse `conjugate / length²`.
    ///
    /// `q * q.inverse()` is the identity for any non-zero `q`. The zero
    /// quaternion yields NaN components.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate().scale(1.0 / self.length_squared())
    }

    /// Checked variant of [`Quaternion::inverse`].
    ///
    /// # Errors
    /// Returns [`QuaternionError::ZeroLength`] if the squared length is below `EPSILON²`.
    pub fn try_inverse(&self) -> Result<Self, QuaternionError> {
        if self.length_squared() <= EPSILON * EPSILON {
            log::trace!("Refusing to invert near-zero quaternion {self}");
            return Err(QuaternionError::ZeroLength);
        }
        Ok(self.inverse())
    }

    /// Rotates a 3D vector by this quaternion, which must be of unit length.
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let u = self.v;
        let s = self.w;
        2.0 * u.dot(v) * u + (s * s - u.dot(u)) * v + 2.0 * s * u.cross(v)
    }

    /// Normalized linear interpolation between two quaternions.
    ///
    /// No shortest-path correction is applied; interpolating between
    /// antipodal quaternions at `t = 0.5` gives the zero quaternion and
    /// therefore NaN.
    #[inline]
    pub fn nlerp(start: Self, end: Self, t: f32) -> Self {
        (start * (1.0 - t) + end * t).normalize()
    }

    /// Performs a Spherical Linear Interpolation (Slerp) between two quaternions.
    ///
    /// Slerp provides a smooth, constant-speed interpolation between two rotations,
    /// following the shortest path on the surface of a 4D sphere. Uses the
    /// default [`InterpolationSettings`]: `t` is clamped to `[0.0, 1.0]`.
    ///
    /// If the endpoints lie in opposite hemispheres, `start` is negated, so
    /// `t = 0` may return `-start` (the same rotation).
    #[inline]
    pub fn slerp(start: Self, end: Self, t: f32) -> Self {
        Self::slerp_with(start, end, t, &InterpolationSettings::default())
    }

    /// Slerp from `self` toward `end`. Same math as [`Quaternion::slerp`].
    #[inline]
    pub fn slerp_to(&self, end: Self, t: f32) -> Self {
        Self::slerp(*self, end, t)
    }

    /// Slerp with explicit settings.
    pub fn slerp_with(start: Self, end: Self, t: f32, settings: &InterpolationSettings) -> Self {
        let t = if settings.clamp_t {
            t.clamp(0.0, 1.0)
        } else {
            t
        };

        let mut start = start;
        let mut cos_theta = start.dot(end);

        // Opposite hemispheres: flip `start` to take the shorter arc.
        if cos_theta < 0.0 {
            start.negate();
            cos_theta = -cos_theta;
        }

        // sin(theta) is close to zero here; dividing by it is unstable.
        if cos_theta > 1.0 - settings.linear_threshold {
            return Self::nlerp(start, end, t);
        }

        let theta = cos_theta.acos();
        let sin_theta = theta.sin();
        if sin_theta <= f32::EPSILON {
            return Self::nlerp(start, end, t);
        }
        let inv_sin_theta = 1.0 / sin_theta;
        let scale_start = ((1.0 - t) * theta).sin() * inv_sin_theta;
        let scale_end = (t * theta).sin() * inv_sin_theta;
        (start * scale_start + end * scale_end).normalize()
    }
}

// --- Operator Overloads ---

impl Default for Quaternion {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Combines two rotations using the Hamilton product.
    /// Note that quaternion multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.hamilton(rhs)
    }
}

impl MulAssign<Quaternion> for Quaternion {
    /// Combines this rotation with another.
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    /// Rotates a `Vec3` by this quaternion.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.normalize().rotate_vec3(rhs)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    /// Scales all components of the quaternion by a scalar.
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        self.scale(scalar)
    }
}

impl Mul<Quaternion> for f32 {
    type Output = Quaternion;
    #[inline]
    fn mul(self, rhs: Quaternion) -> Self::Output {
        rhs.scale(self)
    }
}

impl Add<Quaternion> for Quaternion {
    type Output = Self;
    /// Adds two quaternions component-wise.
    /// Note: This is not a standard rotation operation.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            w: self.w + rhs.w,
            v: self.v + rhs.v,
        }
    }
}

impl Sub<Quaternion> for Quaternion {
    type Output = Self;
    /// Subtracts two quaternions component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            w: self.w - rhs.w,
            v: self.v - rhs.v,
        }
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates all components of the quaternion.
    #[inline]
    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Quaternion {
    /// Renders the quaternion as `"<w>, <x>, <y>, <z>"`, six decimals per component.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {}", self.w, self.v)
    }
}
