use ctm_geom::{BlockPos, Vec3};
use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn vapprox_abs_rel(a: Vec3, b: Vec3, atol: f32, rtol: f32) -> bool {
    let close = |x: f32, y: f32| (x - y).abs() <= atol + rtol * x.abs().max(y.abs());
    close(a.x, b.x) && close(a.y, b.y) && close(a.z, b.z)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e6)
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn small_i32() -> impl Strategy<Value = i32> {
    -1_000_000i32..=1_000_000
}

proptest! {
    // Addition commutativity: a + b == b + a (element-wise)
    #[test]
    fn vec3_add_commutative(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox_abs_rel(a + b, b + a, 1e-6, 1e-6));
    }

    // Cross anti-commutativity: a×b + b×a ≈ 0
    #[test]
    fn vec3_cross_anticommutative(a in arb_vec3(), b in arb_vec3()) {
        let sum = a.cross(b) + b.cross(a);
        let scale = a.length() * b.length();
        prop_assert!(sum.length() <= 1e-6 + 1e-5 * scale);
    }

    // Scalar distributivity: k*(a + b) = k*a + k*b
    #[test]
    fn vec3_scalar_distributivity(a in arb_vec3(), b in arb_vec3(), k in bounded_f32()) {
        let left = (a + b) * k;
        let right = (a * k) + (b * k);
        let slack = (a.length() + b.length()) * k.abs() * 1e-5;
        prop_assert!((left - right).length() <= 1e-6 + slack);
    }

    // offset_by composes additively
    #[test]
    fn block_pos_offset_by_composes(
        x in small_i32(), y in small_i32(), z in small_i32(),
        a in -8i32..=8, b in -8i32..=8, c in -8i32..=8,
    ) {
        let p = BlockPos::new(x, y, z);
        prop_assert_eq!(p.offset_by(a, b, c).offset_by(-a, -b, -c), p);
        prop_assert_eq!(p.offset_by(a, 0, 0).offset_by(0, b, c), p.offset_by(a, b, c));
    }
}
