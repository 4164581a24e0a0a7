use ctm_geom::{BlockPos, Face, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_add_sub_neg() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(c - a, b, 1e-6));
    assert!(vec3_approx_eq(-a + a, Vec3::ZERO, 1e-6));
}

#[test]
fn vec3_add_assign_sub_assign() {
    let mut v = Vec3::ONE;
    v += Vec3::new(2.0, 3.0, 4.0);
    assert!(vec3_approx_eq(v, Vec3::new(3.0, 4.0, 5.0), 1e-6));

    v -= Vec3::new(1.0, 2.0, 3.0);
    assert!(vec3_approx_eq(v, Vec3::new(2.0, 2.0, 2.0), 1e-6));
}

#[test]
fn vec3_scalar_mul_div() {
    let v = Vec3::new(1.5, -2.0, 4.0);
    let m = v * 2.0;
    assert!(vec3_approx_eq(m, Vec3::new(3.0, -4.0, 8.0), 1e-6));
    assert!(vec3_approx_eq(m / 2.0, v, 1e-6));
    assert!(vec3_approx_eq(Vec3::ONE * 0.5, Vec3::HALF, 1e-6));
}

#[test]
fn face_normals_form_right_handed_basis() {
    // Basis cross products
    assert!(vec3_approx_eq(
        Face::PosX.normal().cross(Face::PosY.normal()),
        Face::PosZ.normal(),
        1e-6
    ));
    assert!(vec3_approx_eq(
        Face::PosY.normal().cross(Face::PosZ.normal()),
        Face::PosX.normal(),
        1e-6
    ));
    assert!(vec3_approx_eq(
        Face::PosZ.normal().cross(Face::PosX.normal()),
        Face::PosY.normal(),
        1e-6
    ));
}

#[test]
fn block_pos_offset_follows_face_delta() {
    let p = BlockPos::new(3, -2, 7);
    assert_eq!(p.offset(Face::PosY), BlockPos::new(3, -1, 7));
    assert_eq!(p.offset(Face::NegX), BlockPos::new(2, -2, 7));
    assert_eq!(p.offset(Face::NegZ), BlockPos::new(3, -2, 6));
    for face in Face::ALL {
        assert_eq!(p.offset(face).offset(face.opposite()), p);
    }
}

#[test]
fn block_pos_conversions_and_corner() {
    assert_eq!(BlockPos::from((1, 2, 3)), BlockPos::new(1, 2, 3));
    assert_eq!(BlockPos::from([-1, 0, 9]), BlockPos::new(-1, 0, 9));
    assert!(vec3_approx_eq(
        BlockPos::new(-1, 0, 9).corner(),
        Vec3::new(-1.0, 0.0, 9.0),
        1e-6
    ));
    assert_eq!(BlockPos::new(1, 2, 3).to_string(), "(1, 2, 3)");
}
