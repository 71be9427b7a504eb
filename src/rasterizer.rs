use cgmath::Vector2 as Vec2;

/// 有向面积的两倍（edge function）：p 在 ab 左侧为正
pub fn edge(a: Vec2<f32>, b: Vec2<f32>, p: Vec2<f32>) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// 三个屏幕坐标的整数像素包围盒
pub fn get_box(vertices: &[Vec2<f32>; 3]) -> (i32, i32, i32, i32) {
    let mut min_x = vertices[0].x;
    let mut max_x = vertices[0].x;
    let mut min_y = vertices[0].y;
    let mut max_y = vertices[0].y;

    for v in vertices.iter().skip(1) {
        if v.x < min_x {
            min_x = v.x;
        }
        if v.x > max_x {
            max_x = v.x;
        }
        if v.y < min_y {
            min_y = v.y;
        }
        if v.y > max_y {
            max_y = v.y;
        }
    }

    (
        min_x.floor() as i32,
        min_y.floor() as i32,
        max_x.ceil() as i32,
        max_y.ceil() as i32,
    )
}

/// 重心坐标。三角形面积为零（顶点共线）时返回 None。
/// 面积为负（另一种绕向）时除法会把符号归一，内部点的三个权重仍然非负。
pub fn barycentric(vertices: &[Vec2<f32>; 3], p: Vec2<f32>) -> Option<[f32; 3]> {
    let area = edge(vertices[0], vertices[1], vertices[2]);
    if area.abs() < 1e-6 {
        return None;
    }

    let w0 = edge(vertices[1], vertices[2], p) / area;
    let w1 = edge(vertices[2], vertices[0], p) / area;
    let w2 = edge(vertices[0], vertices[1], p) / area;
    Some([w0, w1, w2])
}

/// 透视校正权重：原始重心权重除以各自顶点的 clip w，再归一化到和为 1。
/// 之后所有属性插值（深度、颜色、UV、法线）都用这组权重。
pub fn perspective_weights(bary: [f32; 3], clip_w: [f32; 3]) -> Option<[f32; 3]> {
    let q = [
        bary[0] / clip_w[0],
        bary[1] / clip_w[1],
        bary[2] / clip_w[2],
    ];
    let sum = q[0] + q[1] + q[2];
    if !sum.is_finite() || sum.abs() < 1e-12 {
        return None;
    }
    Some([q[0] / sum, q[1] / sum, q[2] / sum])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri() -> [Vec2<f32>; 3] {
        [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 4.0),
        ]
    }

    #[test]
    fn barycentric_sums_to_one_inside() {
        let w = barycentric(&tri(), Vec2::new(1.0, 1.0)).unwrap();
        assert_relative_eq!(w[0] + w[1] + w[2], 1.0, epsilon = 1e-6);
        assert!(w.iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn barycentric_is_negative_outside() {
        let w = barycentric(&tri(), Vec2::new(5.0, 5.0)).unwrap();
        assert!(w.iter().any(|&x| x < 0.0));
    }

    #[test]
    fn opposite_winding_keeps_interior_weights_non_negative() {
        let flipped = [tri()[0], tri()[2], tri()[1]];
        let w = barycentric(&flipped, Vec2::new(1.0, 1.0)).unwrap();
        assert!(w.iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn collinear_triangle_has_no_barycentric_coords() {
        let degenerate = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(4.0, 4.0),
        ];
        assert!(barycentric(&degenerate, Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn perspective_weights_sum_to_one() {
        // 三个顶点 w 各不相同，权重归一化后仍然和为 1
        let bary = [0.2, 0.3, 0.5];
        let w = perspective_weights(bary, [1.0, 2.0, 4.0]).unwrap();
        assert_relative_eq!(w[0] + w[1] + w[2], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn equal_w_leaves_weights_unchanged() {
        let bary = [0.25, 0.25, 0.5];
        let w = perspective_weights(bary, [2.0, 2.0, 2.0]).unwrap();
        assert_relative_eq!(w[0], 0.25, epsilon = 1e-6);
        assert_relative_eq!(w[2], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn bounding_box_rounds_outward() {
        let (min_x, min_y, max_x, max_y) = get_box(&[
            Vec2::new(0.3, 0.7),
            Vec2::new(3.2, 1.1),
            Vec2::new(1.5, 2.9),
        ]);
        assert_eq!((min_x, min_y, max_x, max_y), (0, 0, 4, 3));
    }
}
