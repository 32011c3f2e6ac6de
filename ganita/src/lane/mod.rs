//! Backend primitive layer.
//!
//! Every backend exposes one opaque 4-lane `f32` vector type implementing
//! [`Lane4`]. Higher layers are written once against the trait and the
//! concrete backend is chosen at compile time through the [`Vec4`] alias.
//!
//! # Backends
//!
//! | Backend | Type | Selected when |
//! |---------|------|---------------|
//! | Scalar | [`ScalarVec4`] | feature `scalar`, or no SIMD backend applies |
//! | Auto-vectorized | [`Float4`] | feature `autovec` |
//! | SSE | `SseVec4` | x86/x86_64 with `sse2` |
//! | NEON | `NeonVec4` | aarch64 with `neon` |
//! | AltiVec | `AltivecVec4` | feature `altivec` on big-endian powerpc64 |
//!
//! # Lane order
//!
//! Lanes are addressed positionally as X, Y, Z, W. Loads and stores read
//! and write contiguous floats in that order.
//!
//! Lane-selecting operations (splat, shuffle, sign flip) are picked by
//! zero-sized marker types so each call resolves to one fixed instruction
//! sequence after monomorphization.

use std::fmt;

use crate::error::{MathError, Result};

pub mod float4;
pub mod scalar;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
))]
pub mod sse;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub mod neon;

#[cfg(all(
    feature = "altivec",
    target_arch = "powerpc64",
    target_endian = "big",
    target_feature = "altivec"
))]
pub mod altivec;

pub use float4::Float4;
pub use scalar::ScalarVec4;

#[cfg(all(feature = "scalar", feature = "autovec"))]
compile_error!("features `scalar` and `autovec` are mutually exclusive");

// ============================================================================
// Backend selection
// ============================================================================

/// The lane-vector type of the compiled-in backend.
#[cfg(feature = "scalar")]
pub type Vec4 = ScalarVec4;

/// The lane-vector type of the compiled-in backend.
#[cfg(all(not(feature = "scalar"), feature = "autovec"))]
pub type Vec4 = Float4;

/// The lane-vector type of the compiled-in backend.
#[cfg(all(
    not(any(feature = "scalar", feature = "autovec")),
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse2"
))]
pub type Vec4 = sse::SseVec4;

/// The lane-vector type of the compiled-in backend.
#[cfg(all(
    not(any(feature = "scalar", feature = "autovec")),
    target_arch = "aarch64",
    target_feature = "neon"
))]
pub type Vec4 = neon::NeonVec4;

/// The lane-vector type of the compiled-in backend.
#[cfg(all(
    not(any(feature = "scalar", feature = "autovec")),
    feature = "altivec",
    target_arch = "powerpc64",
    target_endian = "big",
    target_feature = "altivec"
))]
pub type Vec4 = altivec::AltivecVec4;

/// The lane-vector type of the compiled-in backend.
#[cfg(not(any(
    feature = "scalar",
    feature = "autovec",
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse2"
    ),
    all(target_arch = "aarch64", target_feature = "neon"),
    all(
        feature = "altivec",
        target_arch = "powerpc64",
        target_endian = "big",
        target_feature = "altivec"
    )
)))]
pub type Vec4 = ScalarVec4;

/// Matrix of the compiled-in backend.
pub type Mat4 = Matrix4<Vec4>;

/// Backend actually compiled into this build.
pub const ACTIVE_BACKEND: Backend = <Vec4 as Lane4>::BACKEND;

/// Identifies one implementation of the primitive contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Plain four-field struct, exact arithmetic.
    Scalar,
    /// Aligned array relying on LLVM auto-vectorization.
    AutoVec,
    /// x86 SSE intrinsics.
    Sse,
    /// ARM NEON intrinsics.
    Neon,
    /// PowerPC AltiVec intrinsics.
    AltiVec,
}

impl Backend {
    /// Short human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::AutoVec => "autovec",
            Backend::Sse => "sse",
            Backend::Neon => "neon",
            Backend::AltiVec => "altivec",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Primitive contract
// ============================================================================

/// Primitive operation set every backend implements.
///
/// All operations are pure and return new values. Division by zero, NaN and
/// infinities follow IEEE-754; nothing here reports errors.
pub trait Lane4: Copy + fmt::Debug + PartialEq {
    /// Which backend this type belongs to.
    const BACKEND: Backend;

    /// Builds a vector from four scalars.
    fn create(x: f32, y: f32, z: f32, w: f32) -> Self;

    /// All lanes zero.
    fn zero() -> Self;

    /// Broadcasts `s` into every lane.
    fn single(s: f32) -> Self;

    /// Loads the first `N` floats of `src`, zero-filling the remaining lanes.
    ///
    /// `N` must be 2, 3 or 4.
    ///
    /// # Panics
    ///
    /// Panics if `src.len() < N`.
    fn load<const N: usize>(src: &[f32]) -> Self;

    /// Writes the first `N` lanes to `dst`, leaving the rest of `dst` untouched.
    ///
    /// # Panics
    ///
    /// Panics if `dst.len() < N`.
    fn store<const N: usize>(self, dst: &mut [f32]);

    /// Lane-wise `self + rhs`.
    fn add(self, rhs: Self) -> Self;
    /// Lane-wise `self - rhs`.
    fn sub(self, rhs: Self) -> Self;
    /// Lane-wise `self * rhs`.
    fn mul(self, rhs: Self) -> Self;
    /// Lane-wise `self / rhs`.
    fn div(self, rhs: Self) -> Self;

    /// Lane-wise `self * b + c`.
    fn mul_add(self, b: Self, c: Self) -> Self;

    /// Approximate `1 / self`.
    fn reciprocal(self) -> Self;
    /// Approximate square root.
    fn sqrt(self) -> Self;
    /// Approximate `1 / sqrt(self)`.
    fn rsqrt(self) -> Self;

    /// Lane-wise `if self < rhs { self } else { rhs }`.
    ///
    /// Every backend follows `minps`: when either lane is NaN, or both are
    /// zeros of either sign, the result is the `rhs` lane.
    fn min(self, rhs: Self) -> Self;
    /// Lane-wise `if self > rhs { self } else { rhs }`, with the same
    /// unordered rule as [`Lane4::min`].
    fn max(self, rhs: Self) -> Self;

    /// Cross product of the X/Y/Z lanes. The W lane is zero.
    fn cross3(self, rhs: Self) -> Self;

    /// Lane X.
    fn get_x(self) -> f32;
    /// Lane Y.
    fn get_y(self) -> f32;
    /// Lane Z.
    fn get_z(self) -> f32;
    /// Lane W.
    fn get_w(self) -> f32;

    /// Broadcasts lane X.
    fn splat_x(self) -> Self;
    /// Broadcasts lane Y.
    fn splat_y(self) -> Self;
    /// Broadcasts lane Z.
    fn splat_z(self) -> Self;
    /// Broadcasts lane W.
    fn splat_w(self) -> Self;

    /// `(w, x, y, z)`
    fn shuffle_wxyz(self) -> Self;
    /// `(z, w, x, y)`
    fn shuffle_zwxy(self) -> Self;
    /// `(y, z, w, x)`
    fn shuffle_yzwx(self) -> Self;

    /// Negates lanes Y and W (pattern 0101).
    fn flip_sign_yw(self) -> Self;
    /// Negates lanes X and Z (pattern 1010).
    fn flip_sign_xz(self) -> Self;

    /// `(self.z, self.w, rhs.z, rhs.w)`
    fn merge(self, rhs: Self) -> Self;

    /// Transposes `m` in place.
    fn transpose(m: &mut Matrix4<Self>);

    /// Writes the transpose of `src` into `dst`.
    fn transpose_into(src: &Matrix4<Self>, dst: &mut Matrix4<Self>) {
        *dst = *src;
        Self::transpose(dst);
    }

    /// Builds a vector from `[x, y, z, w]`.
    #[inline(always)]
    fn from_array(a: [f32; 4]) -> Self {
        Self::load::<4>(&a)
    }

    /// Extracts `[x, y, z, w]`.
    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut out = [0.0; 4];
        self.store::<4>(&mut out);
        out
    }
}

/// Rejects load/store widths outside 2..=4 at compile time.
pub(crate) struct Width<const N: usize>;

impl<const N: usize> Width<N> {
    pub(crate) const CHECK: () = assert!(N >= 2 && N <= 4, "lane width must be 2, 3 or 4");
}

/// Loads `N` floats, reporting a short slice as an error instead of panicking.
pub fn try_load<const N: usize, V: Lane4>(src: &[f32]) -> Result<V> {
    if src.len() < N {
        return Err(MathError::SliceTooShort {
            needed: N,
            got: src.len(),
        });
    }
    Ok(V::load::<N>(src))
}

/// Stores `N` lanes, reporting a short slice as an error instead of panicking.
pub fn try_store<const N: usize, V: Lane4>(v: V, dst: &mut [f32]) -> Result<()> {
    if dst.len() < N {
        return Err(MathError::SliceTooShort {
            needed: N,
            got: dst.len(),
        });
    }
    v.store::<N>(dst);
    Ok(())
}

// ============================================================================
// Compile-time lane selectors
// ============================================================================

/// Lane X selector.
#[derive(Clone, Copy, Debug)]
pub struct X;
/// Lane Y selector.
#[derive(Clone, Copy, Debug)]
pub struct Y;
/// Lane Z selector.
#[derive(Clone, Copy, Debug)]
pub struct Z;
/// Lane W selector.
#[derive(Clone, Copy, Debug)]
pub struct W;

/// A lane that can be broadcast with [`splat`].
pub trait Lane {
    /// Broadcasts this lane of `v`.
    fn splat<V: Lane4>(v: V) -> V;
    /// Reads this lane of `v`.
    fn get<V: Lane4>(v: V) -> f32;
}

impl Lane for X {
    #[inline(always)]
    fn splat<V: Lane4>(v: V) -> V {
        v.splat_x()
    }
    #[inline(always)]
    fn get<V: Lane4>(v: V) -> f32 {
        v.get_x()
    }
}

impl Lane for Y {
    #[inline(always)]
    fn splat<V: Lane4>(v: V) -> V {
        v.splat_y()
    }
    #[inline(always)]
    fn get<V: Lane4>(v: V) -> f32 {
        v.get_y()
    }
}

impl Lane for Z {
    #[inline(always)]
    fn splat<V: Lane4>(v: V) -> V {
        v.splat_z()
    }
    #[inline(always)]
    fn get<V: Lane4>(v: V) -> f32 {
        v.get_z()
    }
}

impl Lane for W {
    #[inline(always)]
    fn splat<V: Lane4>(v: V) -> V {
        v.splat_w()
    }
    #[inline(always)]
    fn get<V: Lane4>(v: V) -> f32 {
        v.get_w()
    }
}

/// Rotation `(w, x, y, z)`.
#[derive(Clone, Copy, Debug)]
pub struct Wxyz;
/// Rotation `(z, w, x, y)`.
#[derive(Clone, Copy, Debug)]
pub struct Zwxy;
/// Rotation `(y, z, w, x)`.
#[derive(Clone, Copy, Debug)]
pub struct Yzwx;

/// One of the three lane rotations used by the matrix inverse.
pub trait Rotation {
    /// Applies the rotation.
    fn shuffle<V: Lane4>(v: V) -> V;
}

impl Rotation for Wxyz {
    #[inline(always)]
    fn shuffle<V: Lane4>(v: V) -> V {
        v.shuffle_wxyz()
    }
}

impl Rotation for Zwxy {
    #[inline(always)]
    fn shuffle<V: Lane4>(v: V) -> V {
        v.shuffle_zwxy()
    }
}

impl Rotation for Yzwx {
    #[inline(always)]
    fn shuffle<V: Lane4>(v: V) -> V {
        v.shuffle_yzwx()
    }
}

/// Negate Y and W.
#[derive(Clone, Copy, Debug)]
pub struct Flip0101;
/// Negate X and Z.
#[derive(Clone, Copy, Debug)]
pub struct Flip1010;

/// Sign flip pattern.
pub trait SignPattern {
    /// Applies the pattern.
    fn flip<V: Lane4>(v: V) -> V;
}

impl SignPattern for Flip0101 {
    #[inline(always)]
    fn flip<V: Lane4>(v: V) -> V {
        v.flip_sign_yw()
    }
}

impl SignPattern for Flip1010 {
    #[inline(always)]
    fn flip<V: Lane4>(v: V) -> V {
        v.flip_sign_xz()
    }
}

/// Broadcasts lane `L` of `v` into all four lanes.
#[inline(always)]
pub fn splat<L: Lane, V: Lane4>(v: V) -> V {
    L::splat(v)
}

/// Rotates the lanes of `v` by pattern `R`.
#[inline(always)]
pub fn shuffle<R: Rotation, V: Lane4>(v: V) -> V {
    R::shuffle(v)
}

/// Negates the lanes of `v` selected by `P`.
#[inline(always)]
pub fn flip_sign<P: SignPattern, V: Lane4>(v: V) -> V {
    P::flip(v)
}

// ============================================================================
// Matrix aggregate
// ============================================================================

/// Four lane-vectors, conventionally the X, Y, Z basis rows and the W
/// (translation) row.
///
/// The struct does not enforce the affine convention; the constructors in
/// [`crate::matrix`] do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4<V> {
    /// Row X
    pub x: V,
    /// Row Y
    pub y: V,
    /// Row Z
    pub z: V,
    /// Row W
    pub w: V,
}
