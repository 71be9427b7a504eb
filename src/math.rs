use cgmath::{EuclideanSpace, Matrix4 as Mat4, Point3, Rad, SquareMatrix, Vector3 as Vec3};

/// 行列式绝对值低于该阈值的矩阵按奇异矩阵处理
pub const INVERT_EPSILON: f32 = 1.19e-7;

/// 透视投影矩阵（右手系，NDC z 范围 [-1, 1]）
#[rustfmt::skip]
pub fn perspective(fovy: Rad<f32>, aspect: f32, near: f32, far: f32) -> Mat4<f32> {
    let tan_half_fovy = (fovy.0 / 2.0).tan();
    let a = 1.0 / (aspect * tan_half_fovy);
    let b = 1.0 / tan_half_fovy;
    let c = -(far + near) / (far - near);
    let d = -2.0 * far * near / (far - near);

    // projection
    Mat4::new(
        a,    0.0,   0.0,   0.0,
        0.0,  b,     0.0,   0.0,
        0.0,  0.0,   c,    -1.0,
        0.0,  0.0,   d,     0.0,
    )
}

/// 正交投影，以原点为中心、宽高给定
pub fn orthographic(width: f32, height: f32, near: f32, far: f32) -> Mat4<f32> {
    orthographic_bounds(
        -width / 2.0,
        width / 2.0,
        -height / 2.0,
        height / 2.0,
        near,
        far,
    )
}

/// 显式边界的正交投影
#[rustfmt::skip]
pub fn orthographic_bounds(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Mat4<f32> {
    let a = 2.0 / (right - left);
    let b = 2.0 / (top - bottom);
    let c = -2.0 / (far - near);
    let tx = -(right + left) / (right - left);
    let ty = -(top + bottom) / (top - bottom);
    let tz = -(far + near) / (far - near);

    Mat4::new(
        a,    0.0,  0.0,  0.0,
        0.0,  b,    0.0,  0.0,
        0.0,  0.0,  c,    0.0,
        tx,   ty,   tz,   1.0,
    )
}

pub fn look_at(eye: Vec3<f32>, at: Vec3<f32>, up: Vec3<f32>) -> Mat4<f32> {
    Mat4::look_at_rh(Point3::from_vec(eye), Point3::from_vec(at), up)
}

/// 伴随矩阵法求逆；行列式接近零时视为奇异，返回 None 而不产出坏矩阵
pub fn invert(m: &Mat4<f32>) -> Option<Mat4<f32>> {
    let det = m.determinant();
    if det.abs() < INVERT_EPSILON {
        return None;
    }
    m.invert()
}

/// 点变换（w = 1）。返回新值，源与目标不可能别名
pub fn transform_point(m: &Mat4<f32>, p: Vec3<f32>) -> Vec3<f32> {
    (m * p.extend(1.0)).truncate()
}

/// 方向向量变换（w = 0），不受平移影响
pub fn transform_vector(m: &Mat4<f32>, v: Vec3<f32>) -> Vec3<f32> {
    (m * v.extend(0.0)).truncate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Vector4 as Vec4;

    #[test]
    fn invert_round_trips() {
        let m = Mat4::from_translation(Vec3::new(1.0, -2.0, 3.0))
            * Mat4::from_angle_y(Rad(0.7))
            * Mat4::from_scale(2.0);
        let inv = invert(&m).unwrap();
        assert_relative_eq!(m * inv, Mat4::identity(), epsilon = 1e-5);
    }

    #[test]
    fn singular_matrix_reports_failure() {
        // 秩亏矩阵：一整行为零
        let m = Mat4::from_nonuniform_scale(1.0, 1.0, 0.0);
        assert!(invert(&m).is_none());
    }

    #[test]
    fn point_transform_applies_translation_vector_does_not() {
        let m = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        let p = transform_point(&m, Vec3::new(1.0, 2.0, 3.0));
        let v = transform_vector(&m, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(p, Vec3::new(6.0, 2.0, 3.0));
        assert_relative_eq!(v, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn perspective_maps_near_and_far_planes() {
        let proj = perspective(Rad(std::f32::consts::FRAC_PI_2), 1.0, 1.0, 5.0);
        // 近平面上的点 -> NDC z = -1，远平面 -> +1
        let near = proj * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, -5.0, 1.0);
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn orthographic_maps_bounds_to_unit_cube() {
        let proj = orthographic(4.0, 2.0, 1.0, 10.0);
        let corner = proj * Vec4::new(2.0, 1.0, -1.0, 1.0);
        assert_relative_eq!(corner.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(corner.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(corner.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn look_at_from_z_axis_is_view_translation() {
        let view = look_at(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let origin = transform_point(&view, Vec3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(origin, Vec3::new(0.0, 0.0, -5.0), epsilon = 1e-5);
    }
}
