//! AltiVec backend for big-endian powerpc64.
//!
//! AltiVec has no float multiply, divide or square root. Multiplication is
//! `vec_madd` with a `-0.0` addend, division multiplies by the refined
//! reciprocal, and square root is `v * rsqrt(v)` with zero lanes patched
//! back to zero. `vec_re` and `vec_rsqrte` are 12-bit estimates refined by
//! one Newton-Raphson step.
//!
//! `min`/`max` compare and select rather than use `vminfp`/`vmaxfp`, so an
//! unordered lane yields `rhs` as on the other backends.
//!
//! Byte-permute masks assume big-endian element order.

#![allow(unused_unsafe)]

use std::arch::powerpc64::*;
use std::fmt;
use std::mem::transmute;

use super::{Backend, Lane4, Matrix4, Width};

/// Lane-vector held in one `vector_float` register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct AltivecVec4(vector_float);

const PERM_YZX: [u8; 16] = [4, 5, 6, 7, 8, 9, 10, 11, 0, 1, 2, 3, 12, 13, 14, 15];
const PERM_ZXY: [u8; 16] = [8, 9, 10, 11, 0, 1, 2, 3, 4, 5, 6, 7, 12, 13, 14, 15];
const PERM_MERGE_HIGH: [u8; 16] = [
    8, 9, 10, 11, 12, 13, 14, 15, 24, 25, 26, 27, 28, 29, 30, 31,
];
const SIGN_BIT: u32 = 0x8000_0000;

impl AltivecVec4 {
    #[inline(always)]
    fn from_lanes(lanes: [f32; 4]) -> Self {
        Self(unsafe { transmute::<[f32; 4], vector_float>(lanes) })
    }

    #[inline(always)]
    fn lanes(self) -> [f32; 4] {
        unsafe { transmute::<vector_float, [f32; 4]>(self.0) }
    }

    #[inline(always)]
    fn permute(self, rhs: Self, mask: [u8; 16]) -> Self {
        unsafe {
            let mask = transmute::<[u8; 16], vector_unsigned_char>(mask);
            Self(vec_perm(self.0, rhs.0, mask))
        }
    }

    #[inline(always)]
    fn xor_bits(self, bits: [u32; 4]) -> Self {
        unsafe {
            let v = transmute::<vector_float, vector_unsigned_int>(self.0);
            let bits = transmute::<[u32; 4], vector_unsigned_int>(bits);
            Self(transmute::<vector_unsigned_int, vector_float>(vec_xor(v, bits)))
        }
    }

    #[inline(always)]
    fn and_bits(self, bits: [u32; 4]) -> Self {
        unsafe {
            let v = transmute::<vector_float, vector_unsigned_int>(self.0);
            let bits = transmute::<[u32; 4], vector_unsigned_int>(bits);
            Self(transmute::<vector_unsigned_int, vector_float>(vec_and(v, bits)))
        }
    }
}

impl fmt::Debug for AltivecVec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AltivecVec4").field(&self.lanes()).finish()
    }
}

impl PartialEq for AltivecVec4 {
    fn eq(&self, other: &Self) -> bool {
        self.lanes() == other.lanes()
    }
}

impl Lane4 for AltivecVec4 {
    const BACKEND: Backend = Backend::AltiVec;

    #[inline(always)]
    fn create(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::from_lanes([x, y, z, w])
    }

    #[inline(always)]
    fn zero() -> Self {
        Self(unsafe { vec_splats(0.0f32) })
    }

    #[inline(always)]
    fn single(s: f32) -> Self {
        Self(unsafe { vec_splats(s) })
    }

    #[inline(always)]
    fn load<const N: usize>(src: &[f32]) -> Self {
        let () = Width::<N>::CHECK;
        let mut lanes = [0.0; 4];
        lanes[..N].copy_from_slice(&src[..N]);
        Self::from_lanes(lanes)
    }

    #[inline(always)]
    fn store<const N: usize>(self, dst: &mut [f32]) {
        let () = Width::<N>::CHECK;
        dst[..N].copy_from_slice(&self.lanes()[..N]);
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { vec_add(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { vec_sub(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        // -0.0 keeps the sign of a zero product.
        Self(unsafe { vec_madd(self.0, rhs.0, vec_splats(-0.0f32)) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.mul(rhs.reciprocal())
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        Self(unsafe { vec_madd(self.0, b.0, c.0) })
    }

    #[inline(always)]
    fn reciprocal(self) -> Self {
        unsafe {
            let one = vec_splats(1.0f32);
            let estimate = vec_re(self.0);
            // e' = e + e * (1 - v * e)
            let error = vec_nmsub(self.0, estimate, one);
            Self(vec_madd(estimate, error, estimate))
        }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        let root = self.mul(self.rsqrt());
        unsafe {
            let is_zero = vec_cmpeq(self.0, vec_splats(0.0f32));
            Self(vec_sel(root.0, self.0, is_zero))
        }
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        unsafe {
            let zero = vec_splats(-0.0f32);
            let one = vec_splats(1.0f32);
            let half = vec_splats(0.5f32);
            let estimate = vec_rsqrte(self.0);
            // e' = e + 0.5 * e * (1 - v * e * e)
            let ve = vec_madd(self.0, estimate, zero);
            let error = vec_nmsub(ve, estimate, one);
            let half_e = vec_madd(estimate, half, zero);
            Self(vec_madd(half_e, error, estimate))
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self(unsafe { vec_sel(rhs.0, self.0, vec_cmplt(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self(unsafe { vec_sel(rhs.0, self.0, vec_cmpgt(self.0, rhs.0)) })
    }

    #[inline(always)]
    fn cross3(self, rhs: Self) -> Self {
        let lhs_yzx = self.permute(self, PERM_YZX);
        let lhs_zxy = self.permute(self, PERM_ZXY);
        let rhs_yzx = rhs.permute(rhs, PERM_YZX);
        let rhs_zxy = rhs.permute(rhs, PERM_ZXY);
        let cross = lhs_yzx.mul(rhs_zxy).sub(lhs_zxy.mul(rhs_yzx));
        cross.and_bits([u32::MAX, u32::MAX, u32::MAX, 0])
    }

    #[inline(always)]
    fn get_x(self) -> f32 {
        self.lanes()[0]
    }

    #[inline(always)]
    fn get_y(self) -> f32 {
        self.lanes()[1]
    }

    #[inline(always)]
    fn get_z(self) -> f32 {
        self.lanes()[2]
    }

    #[inline(always)]
    fn get_w(self) -> f32 {
        self.lanes()[3]
    }

    #[inline(always)]
    fn splat_x(self) -> Self {
        Self(unsafe { vec_splat::<_, 0>(self.0) })
    }

    #[inline(always)]
    fn splat_y(self) -> Self {
        Self(unsafe { vec_splat::<_, 1>(self.0) })
    }

    #[inline(always)]
    fn splat_z(self) -> Self {
        Self(unsafe { vec_splat::<_, 2>(self.0) })
    }

    #[inline(always)]
    fn splat_w(self) -> Self {
        Self(unsafe { vec_splat::<_, 3>(self.0) })
    }

    #[inline(always)]
    fn shuffle_wxyz(self) -> Self {
        Self(unsafe { vec_sld::<_, 12>(self.0, self.0) })
    }

    #[inline(always)]
    fn shuffle_zwxy(self) -> Self {
        Self(unsafe { vec_sld::<_, 8>(self.0, self.0) })
    }

    #[inline(always)]
    fn shuffle_yzwx(self) -> Self {
        Self(unsafe { vec_sld::<_, 4>(self.0, self.0) })
    }

    #[inline(always)]
    fn flip_sign_yw(self) -> Self {
        self.xor_bits([0, SIGN_BIT, 0, SIGN_BIT])
    }

    #[inline(always)]
    fn flip_sign_xz(self) -> Self {
        self.xor_bits([SIGN_BIT, 0, SIGN_BIT, 0])
    }

    #[inline(always)]
    fn merge(self, rhs: Self) -> Self {
        self.permute(rhs, PERM_MERGE_HIGH)
    }

    #[inline(always)]
    fn transpose(m: &mut Matrix4<Self>) {
        unsafe {
            let xz_hi = vec_mergeh(m.x.0, m.z.0);
            let xz_lo = vec_mergel(m.x.0, m.z.0);
            let yw_hi = vec_mergeh(m.y.0, m.w.0);
            let yw_lo = vec_mergel(m.y.0, m.w.0);
            m.x = Self(vec_mergeh(xz_hi, yw_hi));
            m.y = Self(vec_mergel(xz_hi, yw_hi));
            m.z = Self(vec_mergeh(xz_lo, yw_lo));
            m.w = Self(vec_mergel(xz_lo, yw_lo));
        }
    }

    #[inline(always)]
    fn from_array(a: [f32; 4]) -> Self {
        Self::from_lanes(a)
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        self.lanes()
    }
}
