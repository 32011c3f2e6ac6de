//! Algebraic laws of the matrix layer on the active backend.

mod common;

use common::{
    ITERATIONS, assert_close, assert_rows_near, max_abs, random_axis, random_lanes, random_rows,
    random_well_conditioned, reference_mul, rng,
};
use ganita::lane::{Flip0101, Lane4, Mat4, Vec4, Wxyz, Yzwx, Zwxy, flip_sign, shuffle};
use ganita::ops;

const IDENTITY: [[f32; 4]; 4] = Mat4::IDENTITY_ROWS;

fn v3(a: [f32; 4]) -> Vec4 {
    Vec4::create(a[0], a[1], a[2], 0.0)
}

// ============================================================================
// Identity and transpose
// ============================================================================

#[test]
fn test_identity_law() {
    let mut rng = rng(10);
    let identity = Mat4::identity();
    for _ in 0..ITERATIONS {
        let rows = random_rows(&mut rng);
        let m = Mat4::from_rows(rows);
        assert_eq!(identity.mul(&m).to_rows(), rows);
        assert_eq!(m.mul(&identity).to_rows(), rows);

        let v = random_lanes(&mut rng);
        assert_eq!(identity.vec4_mul(Vec4::from_array(v)).to_array(), v);
    }
}

#[test]
fn test_transpose_involution() {
    let mut rng = rng(11);
    for _ in 0..ITERATIONS {
        let rows = random_rows(&mut rng);
        let m = Mat4::from_rows(rows);
        assert_eq!(m.transposed().transposed().to_rows(), rows);

        let t = m.transposed().to_rows();
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(t[r][c], rows[c][r]);
            }
        }

        let mut in_place = m;
        in_place.transpose_in_place();
        assert_eq!(in_place.to_rows(), t);
    }
}

// ============================================================================
// Products
// ============================================================================

#[test]
fn test_mul_matches_reference() {
    let mut rng = rng(12);
    for _ in 0..ITERATIONS {
        let a = random_rows(&mut rng);
        let b = random_rows(&mut rng);
        let got = Mat4::from_rows(a).mul(&Mat4::from_rows(b)).to_rows();
        assert_rows_near(got, reference_mul(a, b), 1e-3, "mul");
    }
}

#[test]
fn test_mul_associates_with_vec4_mul() {
    let mut rng = rng(13);
    for _ in 0..ITERATIONS {
        let a = Mat4::from_rows(random_rows(&mut rng));
        let b = Mat4::from_rows(random_rows(&mut rng));
        let v = Vec4::from_array(random_lanes(&mut rng));
        let combined = a.mul(&b).vec4_mul(v).to_array();
        let stepwise = a.vec4_mul(b.vec4_mul(v)).to_array();
        for i in 0..4 {
            assert!(
                (combined[i] - stepwise[i]).abs() <= 0.1,
                "lane {}: {} vs {}",
                i,
                combined[i],
                stepwise[i]
            );
        }
    }
}

#[test]
fn test_matrix_vector_example() {
    let row = Vec4::create(1.0, 2.0, 3.0, 4.0);
    let m = Mat4::create(row, row, row, row);
    assert_eq!(m.vec4_mul(row).to_array(), [10.0, 20.0, 30.0, 40.0]);
    assert_eq!(m.vec3_mul(row).to_array(), [6.0, 12.0, 18.0, 24.0]);
    assert_eq!(m.point3_mul(row).to_array(), [7.0, 14.0, 21.0, 28.0]);
}

// ============================================================================
// Inverse
// ============================================================================

#[test]
fn test_inverse_law() {
    let mut rng = rng(14);
    for _ in 0..ITERATIONS {
        let m = Mat4::from_rows(random_well_conditioned(&mut rng));
        let inv = m.inverse();
        assert_rows_near(m.mul(&inv).to_rows(), IDENTITY, 1e-4, "m * inv");
        assert_rows_near(inv.mul(&m).to_rows(), IDENTITY, 1e-4, "inv * m");

        let back = inv.inverse().to_rows();
        let scale = max_abs(m.to_rows());
        assert_rows_near(back, m.to_rows(), 1e-4 * scale, "inverse twice");
    }
}

#[test]
fn test_inverse_of_affine_transforms() {
    let mut rng = rng(15);
    for _ in 0..32 {
        let axis = random_axis(&mut rng);
        let t = random_lanes(&mut rng);
        let rotation = Mat4::axis_rotation(0.7, v3([axis[0], axis[1], axis[2], 0.0]));
        let rigid = Mat4::translation(t[0], t[1], t[2]).mul(&rotation);

        let general = rigid.inverse();
        let p = Vec4::from_array(random_lanes(&mut rng));
        let moved = rigid.point3_mul(p);
        let a = general.point3_mul(moved).to_array();
        let b = rigid.inverse_orthographic_point3_mul(moved).to_array();
        for i in 0..3 {
            assert!((a[i] - p.to_array()[i]).abs() < 1e-4);
            assert!((b[i] - p.to_array()[i]).abs() < 1e-4);
        }
    }

    let scale = Mat4::scale(2.0, 4.0, 8.0).inverse().to_rows();
    assert_rows_near(
        scale,
        Mat4::scale(0.5, 0.25, 0.125).to_rows(),
        1e-6,
        "inverse scale",
    );
}

#[test]
fn test_singular_inverse_is_not_finite() {
    let row = Vec4::create(1.0, 2.0, 3.0, 4.0);
    let singular = Mat4::create(row, row, row, Vec4::create(0.0, 0.0, 0.0, 1.0));
    let inv = singular.inverse().to_rows();
    assert!(inv.iter().flatten().any(|v| !v.is_finite()));
}

// ============================================================================
// Vector laws
// ============================================================================

#[test]
fn test_cross_orthogonality() {
    let mut rng = rng(16);
    for _ in 0..ITERATIONS {
        let a = v3(random_lanes(&mut rng));
        let b = v3(random_lanes(&mut rng));
        let c = a.cross3(b);
        let scale = ops::length::<3, Vec4>(a).get_x()
            * ops::length::<3, Vec4>(b).get_x()
            * ops::length::<3, Vec4>(a).get_x().max(ops::length::<3, Vec4>(b).get_x());
        assert!(ops::dot::<3, Vec4>(c, a).get_x().abs() <= 1e-5 * scale.max(1.0));
        assert!(ops::dot::<3, Vec4>(c, b).get_x().abs() <= 1e-5 * scale.max(1.0));
    }
}

#[test]
fn test_normalize_unit_length() {
    let mut rng = rng(17);
    for _ in 0..ITERATIONS {
        let v = Vec4::from_array(random_lanes(&mut rng));
        let n2 = ops::normalize::<2, Vec4>(v);
        let n3 = ops::normalize::<3, Vec4>(v);
        let n4 = ops::normalize::<4, Vec4>(v);
        assert!((ops::dot::<2, Vec4>(n2, n2).get_x() - 1.0).abs() < 2e-6);
        assert!((ops::dot::<3, Vec4>(n3, n3).get_x() - 1.0).abs() < 2e-6);
        assert!((ops::dot::<4, Vec4>(n4, n4).get_x() - 1.0).abs() < 2e-6);
    }
}

#[test]
fn test_dot_and_length_examples() {
    let v = Vec4::create(1.0, 2.0, 3.0, 4.0);
    assert_eq!(ops::dot::<4, Vec4>(v, v).get_x(), 30.0);
    assert_eq!(ops::dot::<3, Vec4>(v, v).get_x(), 14.0);
    assert_eq!(ops::dot::<2, Vec4>(v, v).get_x(), 5.0);

    let v = Vec4::create(1.0, 1.02, 3.04, 4.0);
    assert_close(ops::length::<4, Vec4>(v).get_x(), 5.223217, "length4");
    assert_close(ops::length::<3, Vec4>(v).get_x(), 3.358869, "length3");
    assert_close(ops::length::<2, Vec4>(v).get_x(), 1.428426, "length2");
}

#[test]
fn test_lane_selector_examples() {
    let v = Vec4::create(1.0, 2.0, 3.0, 4.0);
    assert_eq!(flip_sign::<Flip0101, Vec4>(v).to_array(), [1.0, -2.0, 3.0, -4.0]);
    assert_eq!(shuffle::<Wxyz, Vec4>(v).to_array(), [4.0, 1.0, 2.0, 3.0]);
    assert_eq!(shuffle::<Zwxy, Vec4>(v).to_array(), [3.0, 4.0, 1.0, 2.0]);
    assert_eq!(shuffle::<Yzwx, Vec4>(v).to_array(), [2.0, 3.0, 4.0, 1.0]);
}

// ============================================================================
// Projections
// ============================================================================

#[test]
fn test_perspective_maps_depth_range() {
    let (near, far) = (0.5, 20.0);
    let p = Mat4::perspective(std::f32::consts::FRAC_PI_2, 2.0, near, far);
    let rows = p.to_rows();
    assert_close(rows[0][0], 0.5, "cot / aspect");
    assert!((rows[1][1] - 1.0).abs() < 1e-6);
    assert_eq!(rows[2][3], -1.0);

    let ndc_z = |z: f32| {
        let clip = p.vec4_mul(Vec4::create(0.0, 0.0, z, 1.0)).to_array();
        clip[2] / clip[3]
    };
    assert!((ndc_z(-near) + 1.0).abs() < 1e-5);
    assert!((ndc_z(-far) - 1.0).abs() < 1e-4);
}

#[test]
fn test_orthographic_maps_box() {
    // width equals depth, so the depth offset is the textbook value
    let o = Mat4::orthographic(-2.0, 2.0, -1.0, 1.0, 1.0, 5.0);
    let map = |x: f32, y: f32, z: f32| o.point3_mul(Vec4::create(x, y, z, 0.0)).to_array();
    let corner = map(2.0, 1.0, 5.0);
    assert!((corner[0] - 1.0).abs() < 1e-6);
    assert!((corner[1] - 1.0).abs() < 1e-6);
    assert!((corner[2] - 1.0).abs() < 1e-6);
    let corner = map(-2.0, -1.0, 1.0);
    assert!((corner[0] + 1.0).abs() < 1e-6);
    assert!((corner[1] + 1.0).abs() < 1e-6);
    assert!((corner[2] + 1.0).abs() < 1e-6);
}
