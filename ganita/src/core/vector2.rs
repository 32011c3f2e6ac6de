//! Two-component vector.

use serde::{Deserialize, Serialize};

use super::{LiveLanes, impl_vector_ops, live_only};
use crate::lane::{Lane4, Vec4};
use crate::ops;

/// A 2D vector. Lanes Z and W are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Vector2f(pub(crate) Vec4);

impl LiveLanes for Vector2f {
    const LIVE: usize = 2;
}

impl Vector2f {
    /// Create a new vector
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec4::create(x, y, 0.0, 0.0))
    }

    /// Both components set to `xy`
    #[inline]
    pub fn splat(xy: f32) -> Self {
        Self::new(xy, xy)
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

    /// Dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        ops::dot::<2, Vec4>(self.0, other.0).get_x()
    }

    /// Euclidean length
    #[inline]
    pub fn length(&self) -> f32 {
        ops::length::<2, Vec4>(self.0).get_x()
    }

    /// Returns `1 / length()`; the historical name is kept.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        ops::length_squared::<2, Vec4>(self.0).get_x()
    }

    /// `1 / length()`
    #[inline]
    pub fn inverse_length(&self) -> f32 {
        ops::inverse_length::<2, Vec4>(self.0).get_x()
    }

    /// Squared length `x² + y²`
    #[inline]
    pub fn dot_squared(&self) -> f32 {
        ops::dot_squared::<2, Vec4>(self.0).get_x()
    }

    /// Unit vector in the same direction
    #[inline]
    pub fn normalize(&self) -> Self {
        Self(live_only::<Self>(ops::normalize::<2, Vec4>(self.0)))
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

    /// Components as `[x, y]`
    #[inline]
    pub fn to_array(&self) -> [f32; 2] {
        [self.x(), self.y()]
    }
}

impl Default for Vector2f {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f32; 2]> for Vector2f {
    fn from(v: [f32; 2]) -> Self {
        Self(Vec4::load::<2>(&v))
    }
}

impl From<Vector2f> for [f32; 2] {
    fn from(v: Vector2f) -> Self {
        v.to_array()
    }
}

impl_vector_ops!(Vector2f);
