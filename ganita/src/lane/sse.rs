//! SSE backend for x86 and x86_64.
//!
//! Reciprocal and reciprocal square root start from the 12-bit hardware
//! estimates (`rcpps`, `rsqrtps`) and apply one Newton-Raphson step, which
//! lands within a couple of ulp of the exact result. Both return NaN for a
//! zero input where the exact operation returns infinity.
//!
//! `mul_add` is fused only when the crate is built with the `fma` target
//! feature; otherwise it is a separate multiply and add.

#![allow(unused_unsafe)]

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::fmt;

use super::{Backend, Lane4, Matrix4, Width};

/// Lane-vector held in one `__m128` register.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct SseVec4(__m128);

/// `_MM_SHUFFLE(d, c, b, a)`: lane 0 takes `a`, lane 3 takes `d`.
const fn mm_shuffle(a: i32, b: i32, c: i32, d: i32) -> i32 {
    a | (b << 2) | (c << 4) | (d << 6)
}

const SPLAT_X: i32 = mm_shuffle(0, 0, 0, 0);
const SPLAT_Y: i32 = mm_shuffle(1, 1, 1, 1);
const SPLAT_Z: i32 = mm_shuffle(2, 2, 2, 2);
const SPLAT_W: i32 = mm_shuffle(3, 3, 3, 3);
const ROT_WXYZ: i32 = mm_shuffle(3, 0, 1, 2);
const ROT_ZWXY: i32 = mm_shuffle(2, 3, 0, 1);
const ROT_YZWX: i32 = mm_shuffle(1, 2, 3, 0);
const PERM_YZX: i32 = mm_shuffle(1, 2, 0, 3);
const PERM_ZXY: i32 = mm_shuffle(2, 0, 1, 3);

impl SseVec4 {
    /// Wraps a raw register.
    #[inline(always)]
    pub fn from_raw(v: __m128) -> Self {
        Self(v)
    }

    /// The underlying register.
    #[inline(always)]
    pub fn raw(self) -> __m128 {
        self.0
    }

    #[inline(always)]
    fn sign_mask(x: f32, y: f32, z: f32, w: f32) -> __m128 {
        unsafe { _mm_set_ps(w, z, y, x) }
    }
}

impl fmt::Debug for SseVec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SseVec4").field(&self.to_array()).finish()
    }
}

impl PartialEq for SseVec4 {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl Lane4 for SseVec4 {
    const BACKEND: Backend = Backend::Sse;

    #[inline(always)]
    fn create(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self(unsafe { _mm_set_ps(w, z, y, x) })
    }

    #[inline(always)]
    fn zero() -> Self {
        Self(unsafe { _mm_setzero_ps() })
    }

    #[inline(always)]
    fn single(s: f32) -> Self {
        Self(unsafe { _mm_set1_ps(s) })
    }

    #[inline(always)]
    fn load<const N: usize>(src: &[f32]) -> Self {
        let () = Width::<N>::CHECK;
        let src = &src[..N];
        let ptr = src.as_ptr();
        // SAFETY: `src` holds at least N floats and every load below is unaligned.
        unsafe {
            match N {
                2 => Self(_mm_castpd_ps(_mm_load_sd(ptr.cast::<f64>()))),
                3 => {
                    let xy = _mm_castpd_ps(_mm_load_sd(ptr.cast::<f64>()));
                    let z = _mm_load_ss(ptr.add(2));
                    Self(_mm_movelh_ps(xy, z))
                }
                _ => Self(_mm_loadu_ps(ptr)),
            }
        }
    }

    #[inline(always)]
    fn store<const N: usize>(self, dst: &mut [f32]) {
        let () = Width::<N>::CHECK;
        let dst = &mut dst[..N];
        let ptr = dst.as_mut_ptr();
        // SAFETY: `dst` holds at least N floats and every store below is unaligned.
        unsafe {
            match N {
                2 => _mm_store_sd(ptr.cast::<f64>(), _mm_castps_pd(self.0)),
                3 => {
                    _mm_store_sd(ptr.cast::<f64>(), _mm_castps_pd(self.0));
                    _mm_store_ss(ptr.add(2), _mm_movehl_ps(self.0, self.0));
                }
                _ => _mm_storeu_ps(ptr, self.0),
            }
        }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm_add_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(unsafe { _mm_sub_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(unsafe { _mm_mul_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(unsafe { _mm_div_ps(self.0, rhs.0) })
    }

    #[cfg(target_feature = "fma")]
    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        Self(unsafe { _mm_fmadd_ps(self.0, b.0, c.0) })
    }

    #[cfg(not(target_feature = "fma"))]
    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        Self(unsafe { _mm_add_ps(_mm_mul_ps(self.0, b.0), c.0) })
    }

    #[inline(always)]
    fn reciprocal(self) -> Self {
        unsafe {
            let estimate = _mm_rcp_ps(self.0);
            // e' = e * (2 - v * e)
            let correction = _mm_sub_ps(_mm_set1_ps(2.0), _mm_mul_ps(self.0, estimate));
            Self(_mm_mul_ps(estimate, correction))
        }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        Self(unsafe { _mm_sqrt_ps(self.0) })
    }

    #[inline(always)]
    fn rsqrt(self) -> Self {
        unsafe {
            let estimate = _mm_rsqrt_ps(self.0);
            // e' = 0.5 * e * (3 - v * e * e)
            let vee = _mm_mul_ps(_mm_mul_ps(self.0, estimate), estimate);
            let half_e = _mm_mul_ps(_mm_set1_ps(0.5), estimate);
            Self(_mm_mul_ps(half_e, _mm_sub_ps(_mm_set1_ps(3.0), vee)))
        }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        Self(unsafe { _mm_min_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self(unsafe { _mm_max_ps(self.0, rhs.0) })
    }

    #[inline(always)]
    fn cross3(self, rhs: Self) -> Self {
        unsafe {
            let lhs_yzx = _mm_shuffle_ps::<PERM_YZX>(self.0, self.0);
            let lhs_zxy = _mm_shuffle_ps::<PERM_ZXY>(self.0, self.0);
            let rhs_yzx = _mm_shuffle_ps::<PERM_YZX>(rhs.0, rhs.0);
            let rhs_zxy = _mm_shuffle_ps::<PERM_ZXY>(rhs.0, rhs.0);
            let cross = _mm_sub_ps(_mm_mul_ps(lhs_yzx, rhs_zxy), _mm_mul_ps(lhs_zxy, rhs_yzx));
            // Clear W; w*w - w*w is NaN for infinite inputs.
            let keep_xyz = _mm_castsi128_ps(_mm_set_epi32(0, -1, -1, -1));
            Self(_mm_and_ps(cross, keep_xyz))
        }
    }

    #[inline(always)]
    fn get_x(self) -> f32 {
        unsafe { _mm_cvtss_f32(self.0) }
    }

    #[inline(always)]
    fn get_y(self) -> f32 {
        unsafe { _mm_cvtss_f32(_mm_shuffle_ps::<SPLAT_Y>(self.0, self.0)) }
    }

    #[inline(always)]
    fn get_z(self) -> f32 {
        unsafe { _mm_cvtss_f32(_mm_movehl_ps(self.0, self.0)) }
    }

    #[inline(always)]
    fn get_w(self) -> f32 {
        unsafe { _mm_cvtss_f32(_mm_shuffle_ps::<SPLAT_W>(self.0, self.0)) }
    }

    #[inline(always)]
    fn splat_x(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<SPLAT_X>(self.0, self.0) })
    }

    #[inline(always)]
    fn splat_y(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<SPLAT_Y>(self.0, self.0) })
    }

    #[inline(always)]
    fn splat_z(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<SPLAT_Z>(self.0, self.0) })
    }

    #[inline(always)]
    fn splat_w(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<SPLAT_W>(self.0, self.0) })
    }

    #[inline(always)]
    fn shuffle_wxyz(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<ROT_WXYZ>(self.0, self.0) })
    }

    #[inline(always)]
    fn shuffle_zwxy(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<ROT_ZWXY>(self.0, self.0) })
    }

    #[inline(always)]
    fn shuffle_yzwx(self) -> Self {
        Self(unsafe { _mm_shuffle_ps::<ROT_YZWX>(self.0, self.0) })
    }

    #[inline(always)]
    fn flip_sign_yw(self) -> Self {
        Self(unsafe { _mm_xor_ps(self.0, Self::sign_mask(0.0, -0.0, 0.0, -0.0)) })
    }

    #[inline(always)]
    fn flip_sign_xz(self) -> Self {
        Self(unsafe { _mm_xor_ps(self.0, Self::sign_mask(-0.0, 0.0, -0.0, 0.0)) })
    }

    #[inline(always)]
    fn merge(self, rhs: Self) -> Self {
        Self(unsafe { _mm_movehl_ps(rhs.0, self.0) })
    }

    #[inline(always)]
    fn transpose(m: &mut Matrix4<Self>) {
        unsafe {
            // _MM_TRANSPOSE4_PS
            let t0 = _mm_unpacklo_ps(m.x.0, m.y.0);
            let t1 = _mm_unpacklo_ps(m.z.0, m.w.0);
            let t2 = _mm_unpackhi_ps(m.x.0, m.y.0);
            let t3 = _mm_unpackhi_ps(m.z.0, m.w.0);
            m.x = Self(_mm_movelh_ps(t0, t1));
            m.y = Self(_mm_movehl_ps(t1, t0));
            m.z = Self(_mm_movelh_ps(t2, t3));
            m.w = Self(_mm_movehl_ps(t3, t2));
        }
    }
}
