//! Three-component vector.

use serde::{Deserialize, Serialize};

use super::{LiveLanes, Vector4f, impl_vector_ops, live_only};
use crate::lane::{Lane4, Vec4};
use crate::ops;

/// A 3D vector or point. The W lane is always zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vector3f(pub(crate) Vec4);

impl LiveLanes for Vector3f {
    const LIVE: usize = 3;
}

impl Vector3f {
    /// Create a new vector
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec4::create(x, y, z, 0.0))
    }

    /// All three components set to `xyz`
    #[inline]
    pub fn splat(xyz: f32) -> Self {
        Self::new(xyz, xyz, xyz)
    }

    /// Zero vector
    #[inline]
    pub fn zero() -> Self {
        Self(Vec4::zero())
    }

    /// X component
    #[inline]
    pub fn x(&self) -> f32 {
        self.0.get_x()
    }

    /// Y component
    #[inline]
    pub fn y(&self) -> f32 {
        self.0.get_y()
    }

    /// Z component
    #[inline]
    pub fn z(&self) -> f32 {
        self.0.get_z()
    }

    /// Dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        ops::dot::<3, Vec4>(self.0, other.0).get_x()
    }

    /// Euclidean length
    #[inline]
    pub fn length(&self) -> f32 {
        ops::length::<3, Vec4>(self.0).get_x()
    }

    /// Returns `1 / length()`.
    ///
    /// The name is kept for compatibility; see [`Vector3f::dot_squared`] for
    /// the squared length.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        ops::length_squared::<3, Vec4>(self.0).get_x()
    }

    /// `1 / length()`
    #[inline]
    pub fn inverse_length(&self) -> f32 {
        ops::inverse_length::<3, Vec4>(self.0).get_x()
    }

    /// Squared length `x² + y² + z²`
    #[inline]
    pub fn dot_squared(&self) -> f32 {
        ops::dot_squared::<3, Vec4>(self.0).get_x()
    }

    /// Unit vector in the same direction. A zero vector yields NaN.
    #[inline]
    pub fn normalize(&self) -> Self {
        Self(live_only::<Self>(ops::normalize::<3, Vec4>(self.0)))
    }

    /// Cross product
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self(self.0.cross3(other.0))
    }

    /// Component-wise minimum
    #[inline]
    pub fn min(&self, other: &Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max(&self, other: &Self) -> Self {
        Self(self.0.max(other.0))
    }

    /// Homogeneous form with the given W.
    #[inline]
    pub fn extend(&self, w: f32) -> Vector4f {
        Vector4f::new(self.x(), self.y(), self.z(), w)
    }

    /// Components as `[x, y, z]`
    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.x(), self.y(), self.z()]
    }
}

impl Default for Vector3f {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f32; 3]> for Vector3f {
    fn from(v: [f32; 3]) -> Self {
        Self(Vec4::load::<3>(&v))
    }
}

impl From<Vector3f> for [f32; 3] {
    fn from(v: Vector3f) -> Self {
        v.to_array()
    }
}

impl_vector_ops!(Vector3f);
