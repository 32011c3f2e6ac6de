//! Derived vector operations.
//!
//! Built only from [`Lane4`] primitives, so the same code runs on every
//! backend. Results are broadcast into all four lanes; read any lane
//! (conventionally X) to get the scalar.
//!
//! The component count `N` (2, 3 or 4) selects how many leading lanes take
//! part. Lanes past `N` are ignored.

use crate::lane::{Lane4, Width};

/// `x + y + z + w`, broadcast.
#[inline(always)]
pub fn sum<V: Lane4>(v: V) -> V {
    v.splat_x().add(v.splat_y()).add(v.splat_z()).add(v.splat_w())
}

/// Dot product of the first `N` lanes, broadcast.
#[inline(always)]
pub fn dot<const N: usize, V: Lane4>(a: V, b: V) -> V {
    let () = Width::<N>::CHECK;
    let product = a.mul(b);
    match N {
        2 => product.splat_x().add(product.splat_y()),
        3 => product
            .splat_x()
            .add(product.splat_y())
            .add(product.splat_z()),
        _ => sum(product),
    }
}

/// Euclidean length of the first `N` lanes, broadcast.
#[inline(always)]
pub fn length<const N: usize, V: Lane4>(v: V) -> V {
    dot::<N, V>(v, v).sqrt()
}

/// Squared length of the first `N` lanes, broadcast.
#[inline(always)]
pub fn dot_squared<const N: usize, V: Lane4>(v: V) -> V {
    dot::<N, V>(v, v)
}

/// Reciprocal length `1 / |v|` of the first `N` lanes, broadcast.
///
/// A zero vector yields infinity (or NaN on backends whose rsqrt estimate
/// does not handle zero).
#[inline(always)]
pub fn inverse_length<const N: usize, V: Lane4>(v: V) -> V {
    dot::<N, V>(v, v).rsqrt()
}

/// Historical name for [`inverse_length`].
///
/// Despite the name this returns `1 / |v|`, not `|v|²`. Use
/// [`dot_squared`] for the squared length.
#[inline(always)]
pub fn length_squared<const N: usize, V: Lane4>(v: V) -> V {
    inverse_length::<N, V>(v)
}

/// `v` scaled to unit length over its first `N` lanes.
///
/// Lanes past `N` are scaled too. A zero vector produces NaN or infinity.
#[inline(always)]
pub fn normalize<const N: usize, V: Lane4>(v: V) -> V {
    v.mul(inverse_length::<N, V>(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane::Vec4;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 16.0 * f32::EPSILON;

    fn v(x: f32, y: f32, z: f32, w: f32) -> Vec4 {
        Vec4::create(x, y, z, w)
    }

    #[test]
    fn test_sum_broadcasts() {
        assert_eq!(sum(v(1.0, 2.0, 3.0, 4.0)).to_array(), [10.0; 4]);
    }

    #[test]
    fn test_dot() {
        let a = v(1.0, 2.0, 3.0, 4.0);
        assert_eq!(dot::<4, _>(a, a).get_x(), 30.0);
        assert_eq!(dot::<3, _>(a, a).get_x(), 14.0);
        assert_eq!(dot::<2, _>(a, a).get_x(), 5.0);
        assert_eq!(dot::<3, _>(a, a).get_w(), 14.0);
    }

    #[test]
    fn test_length() {
        let a = v(1.0, 1.02, 3.04, 4.0);
        assert_relative_eq!(length::<4, _>(a).get_x(), 5.223217, max_relative = 1e-6);
        assert_relative_eq!(length::<3, _>(a).get_x(), 3.358869, max_relative = 1e-6);
        assert_relative_eq!(length::<2, _>(a).get_x(), 1.428426, max_relative = 1e-6);
    }

    #[test]
    fn test_inverse_length_matches_historical_name() {
        let a = v(1.0, 2.0, 3.0, 4.0);
        assert_relative_eq!(length_squared::<4, _>(a).get_x(), 0.182574, max_relative = 1e-5);
        assert_relative_eq!(length_squared::<3, _>(a).get_x(), 0.267261, max_relative = 1e-5);
        assert_relative_eq!(length_squared::<2, _>(a).get_x(), 0.447214, max_relative = 1e-5);
        assert_eq!(dot_squared::<3, _>(a).get_x(), 14.0);
    }

    #[test]
    fn test_normalize() {
        let a = v(1.0, 2.0, 3.0, 4.0);
        let n4 = normalize::<4, _>(a).to_array();
        let expected = [0.182574, 0.365148, 0.547723, 0.730297];
        for (got, want) in n4.iter().zip(expected) {
            assert_relative_eq!(*got, want, max_relative = 1e-5);
        }

        let n3 = normalize::<3, _>(a);
        assert_relative_eq!(n3.get_x(), 0.267261, max_relative = 1e-5);
        assert_relative_eq!(n3.get_y(), 0.534522, max_relative = 1e-5);
        assert_relative_eq!(n3.get_z(), 0.801784, max_relative = 1e-5);

        let n2 = normalize::<2, _>(a);
        assert_relative_eq!(n2.get_x(), 0.447214, max_relative = 1e-5);
        assert_relative_eq!(n2.get_y(), 0.894427, max_relative = 1e-5);
    }

    #[test]
    fn test_normalize_unit_length() {
        let a = v(-3.5, 0.25, 7.0, 2.0);
        assert_relative_eq!(
            dot::<4, _>(normalize::<4, _>(a), normalize::<4, _>(a)).get_x(),
            1.0,
            max_relative = TOLERANCE
        );
        assert_relative_eq!(
            dot::<3, _>(normalize::<3, _>(a), normalize::<3, _>(a)).get_x(),
            1.0,
            max_relative = TOLERANCE
        );
        assert_relative_eq!(
            dot::<2, _>(normalize::<2, _>(a), normalize::<2, _>(a)).get_x(),
            1.0,
            max_relative = TOLERANCE
        );
    }
}
