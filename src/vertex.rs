use crate::color::Color;
use cgmath::{Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4};

/// 渲染器输入顶点：齐次位置 + 可插值属性（颜色、两组纹理坐标、法线）
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec4<f32>,
    pub color: Color,
    pub tex_coords: [Vec2<f32>; 2],
    pub normal: Vec3<f32>,
}

impl Vertex {
    pub fn new(position: Vec4<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// w = 1 的便捷构造
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self::new(Vec4::new(x, y, z, 1.0))
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.tex_coords[0] = Vec2::new(u, v);
        self
    }

    pub fn with_normal(mut self, normal: Vec3<f32>) -> Self {
        self.normal = normal;
        self
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Vertex {
            position: Vec4::new(0.0, 0.0, 0.0, 1.0),
            color: Color::WHITE,
            tex_coords: [Vec2::new(0.0, 0.0); 2],
            normal: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}
