//! Value types over the active backend.
//!
//! - [`Vector2f`], [`Vector3f`], [`Vector4f`]: vectors with named accessors
//!   and arithmetic operators
//! - [`Mat4f`]: 4x4 transform with named constructors
//!
//! Each owns exactly one lane-vector (or [`Mat4`](crate::lane::Mat4)) by
//! value. Lanes a wrapper does not expose ("dead" lanes) are zero after
//! construction and stay zero through every operator and through
//! `normalize`, even when the live lanes go non-finite, so equality and
//! serialization only ever see the live components.

use crate::lane::{Lane4, Vec4};

mod mat4;
mod vector2;
mod vector3;
mod vector4;

pub use mat4::Mat4f;
pub use vector2::Vector2f;
pub use vector3::Vector3f;
pub use vector4::Vector4f;

/// Number of lanes a wrapper exposes.
pub(crate) trait LiveLanes {
    const LIVE: usize;
}

/// `s` in the live lanes of `T`, `dead` elsewhere.
#[inline]
pub(crate) fn scalar_operand<T: LiveLanes>(s: f32, dead: f32) -> Vec4 {
    match T::LIVE {
        2 => Vec4::create(s, s, dead, dead),
        3 => Vec4::create(s, s, s, dead),
        _ => Vec4::single(s),
    }
}

/// `v` with the lanes `T` does not expose reset to zero.
#[inline]
pub(crate) fn live_only<T: LiveLanes>(v: Vec4) -> Vec4 {
    match T::LIVE {
        2 => Vec4::create(v.get_x(), v.get_y(), 0.0, 0.0),
        3 => Vec4::create(v.get_x(), v.get_y(), v.get_z(), 0.0),
        _ => v,
    }
}

/// `rhs` with its dead lanes set to one, so dividing leaves them at zero.
#[inline]
pub(crate) fn divisor<T: LiveLanes>(rhs: Vec4) -> Vec4 {
    match T::LIVE {
        2 => rhs.add(Vec4::create(0.0, 0.0, 1.0, 1.0)),
        3 => rhs.add(Vec4::create(0.0, 0.0, 0.0, 1.0)),
        _ => rhs,
    }
}

/// Implements `Neg`, vector/vector and vector/scalar `+ - * /` and the
/// compound assignment forms for a newtype over [`Vec4`].
macro_rules! impl_vector_ops {
    ($ty:ident) => {
        impl std::ops::Neg for $ty {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self(Lane4::sub(Vec4::zero(), self.0))
            }
        }

        impl_vector_ops!(@binary $ty, Add, add, AddAssign, add_assign, 0.0, |v| v);
        impl_vector_ops!(@binary $ty, Sub, sub, SubAssign, sub_assign, 0.0, |v| v);
        impl_vector_ops!(@binary $ty, Mul, mul, MulAssign, mul_assign, 1.0, |v| v);
        impl_vector_ops!(
            @binary $ty, Div, div, DivAssign, div_assign, 1.0,
            |v| $crate::core::divisor::<$ty>(v)
        );
    };

    (@binary $ty:ident, $op:ident, $method:ident, $op_assign:ident, $method_assign:ident,
     $dead:expr, $rhs:expr) => {
        impl std::ops::$op for $ty {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                let prepare: fn(Vec4) -> Vec4 = $rhs;
                Self(Lane4::$method(self.0, prepare(rhs.0)))
            }
        }

        impl std::ops::$op<f32> for $ty {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: f32) -> Self {
                let rhs = $crate::core::scalar_operand::<$ty>(rhs, $dead);
                Self(Lane4::$method(self.0, rhs))
            }
        }

        impl std::ops::$op_assign for $ty {
            #[inline]
            fn $method_assign(&mut self, rhs: Self) {
                *self = std::ops::$op::$method(*self, rhs);
            }
        }

        impl std::ops::$op_assign<f32> for $ty {
            #[inline]
            fn $method_assign(&mut self, rhs: f32) {
                *self = std::ops::$op::$method(*self, rhs);
            }
        }
    };
}

pub(crate) use impl_vector_ops;
