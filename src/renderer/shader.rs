use crate::color::Color;
use crate::texture::Sampler;
use crate::vertex::Vertex;
use cgmath::{InnerSpace, Matrix4 as Mat4, Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4};

/// 顶点阶段输出：裁剪空间位置 + 待插值属性
#[derive(Debug, Clone, Copy)]
pub struct ShadedVertex {
    pub clip_position: Vec4<f32>,
    pub color: Color,
    pub tex_coords: [Vec2<f32>; 2],
    pub normal: Vec3<f32>,
}

/// 片元阶段输入，属性均为透视校正插值结果
#[derive(Debug, Clone, Copy)]
pub struct FragmentInput {
    pub color: Color,
    pub tex_coords: [Vec2<f32>; 2],
    pub normal: Vec3<f32>,
}

// 两阶段着色器能力。每次 draw 恰好绑定一个实现到 Renderer。
pub trait Shader {
    // 应用变换得到裁剪空间位置，其余属性可以透传或计算派生值
    fn vertex(&self, transform: &Mat4<f32>, vertex: &Vertex) -> ShadedVertex;

    // 输入插值后的片元数据和至多两个采样器，输出最终颜色
    fn fragment(&self, input: &FragmentInput, samplers: &[Option<Sampler<'_>>; 2]) -> Color;
}

/// 标准顶点阶段：变换位置，属性原样透传
fn transform_vertex(transform: &Mat4<f32>, vertex: &Vertex) -> ShadedVertex {
    ShadedVertex {
        clip_position: transform * vertex.position,
        color: vertex.color,
        tex_coords: vertex.tex_coords,
        normal: vertex.normal,
    }
}

/// 直接输出插值后的顶点颜色
pub struct VertexColorShader;

impl Shader for VertexColorShader {
    fn vertex(&self, transform: &Mat4<f32>, vertex: &Vertex) -> ShadedVertex {
        transform_vertex(transform, vertex)
    }

    fn fragment(&self, input: &FragmentInput, _samplers: &[Option<Sampler<'_>>; 2]) -> Color {
        input.color
    }
}

/// 无光照纹理：顶点颜色调制 0 号采样器的采样结果
pub struct UnlitTextureShader;

impl Shader for UnlitTextureShader {
    fn vertex(&self, transform: &Mat4<f32>, vertex: &Vertex) -> ShadedVertex {
        transform_vertex(transform, vertex)
    }

    fn fragment(&self, input: &FragmentInput, samplers: &[Option<Sampler<'_>>; 2]) -> Color {
        match &samplers[0] {
            Some(sampler) => input.color * sampler.sample(input.tex_coords[0]),
            None => input.color,
        }
    }
}

#[derive(Clone, Copy)]
pub struct Light {
    pub direction: Vec3<f32>,
    pub color: Vec3<f32>,
    pub intensity: f32,
    pub ambient_strength: f32,
    pub ambient_color: Vec3<f32>,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: Vec3::new(1., -0.2, -0.1).normalize(),
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            ambient_strength: 0.5,
            ambient_color: Vec3::new(1.0, 1.0, 1.0), // 白色环境光
        }
    }
}

impl Light {
    pub fn set_light(&mut self, color: [f32; 3], direction: [f32; 3]) {
        self.color = Vec3::new(color[0], color[1], color[2]);
        self.direction = Vec3::new(direction[0], direction[1], direction[2]).normalize();
    }
}

/// 朗伯漫反射：环境光 + 方向光，作用在插值法线上
pub struct LambertShader {
    pub light: Light,
}

impl Shader for LambertShader {
    fn vertex(&self, transform: &Mat4<f32>, vertex: &Vertex) -> ShadedVertex {
        transform_vertex(transform, vertex)
    }

    fn fragment(&self, input: &FragmentInput, samplers: &[Option<Sampler<'_>>; 2]) -> Color {
        let base = match &samplers[0] {
            Some(sampler) => input.color * sampler.sample(input.tex_coords[0]),
            None => input.color,
        };

        // 环境光分量
        let ambient = self.light.ambient_color * self.light.ambient_strength;

        // 漫反射分量
        let light_dir = self.light.direction.normalize();
        let normal = input.normal.normalize();
        let diff = normal.dot(-light_dir).max(0.0);
        let diffuse = self.light.color * self.light.intensity * diff;

        let lighting = ambient + diffuse;
        Color::new(
            base.r * lighting.x,
            base.g * lighting.y,
            base.b * lighting.z,
            base.a,
        )
        .clamped()
    }
}
