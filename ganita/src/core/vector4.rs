//! Four-component vector.

use serde::{Deserialize, Serialize};

use super::{LiveLanes, Vector3f, impl_vector_ops};
use crate::lane::{Lane4, Vec4};
use crate::ops;

/// A homogeneous 4D vector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Vector4f(pub(crate) Vec4);

impl LiveLanes for Vector4f {
    const LIVE: usize = 4;
}

impl Vector4f {
    /// Create a new vector
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self(Vec4::create(x, y, z, w))
    }

    /// All components set to `s`
    #[inline]
    pub fn splat(s: f32) -> Self {
        Self(Vec4::single(s))
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

    /// W component
    #[inline]
    pub fn w(&self) -> f32 {
        self.0.get_w()
    }

    /// Dot product over all four components
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        ops::dot::<4, Vec4>(self.0, other.0).get_x()
    }

    /// Euclidean length
    #[inline]
    pub fn length(&self) -> f32 {
        ops::length::<4, Vec4>(self.0).get_x()
    }

    /// Returns `1 / length()`; the historical name is kept.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        ops::length_squared::<4, Vec4>(self.0).get_x()
    }

    /// `1 / length()`
    #[inline]
    pub fn inverse_length(&self) -> f32 {
        ops::inverse_length::<4, Vec4>(self.0).get_x()
    }

    /// Squared length
    #[inline]
    pub fn dot_squared(&self) -> f32 {
        ops::dot_squared::<4, Vec4>(self.0).get_x()
    }

    /// Unit vector in the same direction
    #[inline]
    pub fn normalize(&self) -> Self {
        Self(ops::normalize::<4, Vec4>(self.0))
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

    /// Drops W.
    #[inline]
    pub fn truncate(&self) -> Vector3f {
        Vector3f::new(self.x(), self.y(), self.z())
    }

    /// Components as `[x, y, z, w]`
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        self.0.to_array()
    }
}

impl Default for Vector4f {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f32; 4]> for Vector4f {
    fn from(v: [f32; 4]) -> Self {
        Self(Vec4::from_array(v))
    }
}

impl From<Vector4f> for [f32; 4] {
    fn from(v: Vector4f) -> Self {
        v.to_array()
    }
}

impl_vector_ops!(Vector4f);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dot_length() {
        let v = Vector4f::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.dot(&v), 30.0);
        assert_relative_eq!(
            Vector4f::new(1.0, 1.02, 3.04, 4.0).length(),
            5.223217,
            max_relative = 1e-6
        );
        assert_relative_eq!(v.length_squared(), 0.182574, max_relative = 1e-5);
        assert_eq!(v.dot_squared(), 30.0);
    }

    #[test]
    fn test_normalize() {
        let n = Vector4f::new(1.0, 2.0, 3.0, 4.0).normalize();
        let expected = [0.182574, 0.365148, 0.547723, 0.730297];
        for (got, want) in n.to_array().iter().zip(expected) {
            assert_relative_eq!(*got, want, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_scalar_ops_touch_every_lane() {
        let v = Vector4f::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((v + 1.0).to_array(), [2.0, 3.0, 4.0, 5.0]);
        assert_eq!((v / 2.0).to_array(), [0.5, 1.0, 1.5, 2.0]);
        assert_eq!((v * v).to_array(), [1.0, 4.0, 9.0, 16.0]);

        let mut acc = Vector4f::zero();
        acc += v;
        acc /= Vector4f::splat(4.0);
        assert_eq!(acc.to_array(), [0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_truncate_and_extend() {
        let v = Vector4f::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.truncate(), Vector3f::new(1.0, 2.0, 3.0));
        assert_eq!(v.truncate().extend(4.0), v);
    }
}
