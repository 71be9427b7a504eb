pub mod shader;

use crate::color::Color;
use crate::error::RenderError;
use crate::rasterizer;
use crate::target::RenderTarget;
use crate::texture::Sampler;
use crate::vertex::Vertex;
use cgmath::{Matrix4 as Mat4, Vector2 as Vec2, Vector3 as Vec3};
use shader::{FragmentInput, ShadedVertex, Shader};
use tracing::{debug, warn};

/// NDC 映射到的像素矩形
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// 以视口分数表示的裁剪区域，默认覆盖整个视口
#[derive(Debug, Clone, Copy)]
pub struct Scissor {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Default for Scissor {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 1.0,
            max_y: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlendState {
    pub enabled: bool,
}

/// 深度测试约定：新深度 <= 已存深度时通过（后画的三角形赢得平局）
#[derive(Debug, Clone, Copy)]
pub struct DepthState {
    pub read: bool,
    pub write: bool,
}

impl Default for DepthState {
    fn default() -> Self {
        Self {
            read: true,
            write: true,
        }
    }
}

/// 光栅化阶段顶点：屏幕坐标、NDC 深度、clip w 和待插值属性
#[derive(Debug, Clone, Copy)]
struct RasterVertex {
    screen: Vec2<f32>,
    ndc_z: f32,
    clip_w: f32,
    color: Color,
    tex_coords: [Vec2<f32>; 2],
    normal: Vec3<f32>,
}

/// 软件光栅化渲染器。持有对当前渲染目标和着色器的非占有引用，
/// 其余为逐 draw 的值状态，通过显式 setter 修改并跨 draw 保持。
pub struct Renderer<'a> {
    target: Option<&'a mut RenderTarget>,
    shader: Option<&'a dyn Shader>,
    samplers: [Option<Sampler<'a>>; 2],
    viewport: Viewport,
    scissor: Scissor,
    blend: BlendState,
    depth: DepthState,
}

impl Default for Renderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Renderer<'a> {
    pub fn new() -> Self {
        Self {
            target: None,
            shader: None,
            samplers: [None, None],
            viewport: Viewport {
                x: 0,
                y: 0,
                w: 0,
                h: 0,
            },
            scissor: Scissor::default(),
            blend: BlendState::default(),
            depth: DepthState::default(),
        }
    }

    /// 绑定渲染目标，同时把视口重置为覆盖整个目标
    pub fn bind_target(&mut self, target: &'a mut RenderTarget) {
        self.viewport = Viewport {
            x: 0,
            y: 0,
            w: target.width() as i32,
            h: target.height() as i32,
        };
        self.target = Some(target);
    }

    pub fn bind_shader(&mut self, shader: &'a dyn Shader) {
        self.shader = Some(shader);
    }

    /// 绑定纹理单元。slot 只有 0 和 1，越界的 slot 忽略不生效
    pub fn bind_sampler(&mut self, slot: usize, sampler: Sampler<'a>) {
        match self.samplers.get_mut(slot) {
            Some(bound) => *bound = Some(sampler),
            None => warn!(slot, "采样器槽位越界，忽略"),
        }
    }

    pub fn unbind_sampler(&mut self, slot: usize) {
        if let Some(bound) = self.samplers.get_mut(slot) {
            *bound = None;
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_scissor(&mut self, scissor: Scissor) {
        self.scissor = scissor;
    }

    pub fn set_blend_state(&mut self, blend: BlendState) {
        self.blend = blend;
    }

    pub fn set_depth_state(&mut self, depth: DepthState) {
        self.depth = depth;
    }

    /// 无条件覆写整个帧缓冲和深度缓冲
    pub fn clear(&mut self, color: Color, depth: f32) -> Result<(), RenderError> {
        let target = self
            .target
            .as_deref_mut()
            .ok_or(RenderError::NoRenderTarget)?;
        let packed = color.to_argb();
        let (color_buf, depth_buf) = target.buffers_mut();
        color_buf.packed_mut()?.fill(packed);
        depth_buf.floats_mut()?.fill(depth);
        Ok(())
    }

    /// 按索引三元组逐三角形执行完整光栅化管线。
    /// 三角形严格按索引顺序处理，同像素冲突由绘制顺序加深度测试决定。
    pub fn draw_triangles(
        &mut self,
        vertices: &[Vertex],
        indices: &[u32],
        transform: &Mat4<f32>,
    ) -> Result<(), RenderError> {
        if self.target.is_none() {
            return Err(RenderError::NoRenderTarget);
        }
        let shader = self.shader.ok_or(RenderError::NoShader)?;

        // 越界索引在动任何像素之前拒绝整个 draw
        for &index in indices {
            if index as usize >= vertices.len() {
                return Err(RenderError::IndexOutOfBounds {
                    index,
                    len: vertices.len(),
                });
            }
        }
        if indices.len() % 3 != 0 {
            warn!(rest = indices.len() % 3, "索引数量不是 3 的倍数，忽略末尾残余");
        }
        debug!(triangles = indices.len() / 3, "draw_triangles");

        let samplers = self.samplers;
        let viewport = self.viewport;
        let scissor = scissor_pixel_rect(self.scissor, viewport);
        let blend = self.blend;
        let depth_state = self.depth;

        let target = self
            .target
            .as_deref_mut()
            .ok_or(RenderError::NoRenderTarget)?;
        let fb_w = target.width();
        let fb_h = target.height();
        let (color_buf, depth_buf) = target.buffers_mut();
        let color_px = color_buf.packed_mut()?;
        let depth_px = depth_buf.floats_mut()?;

        for tri in indices.chunks_exact(3) {
            // 管线阶段 1: 顶点着色
            let shaded = [
                shader.vertex(transform, &vertices[tri[0] as usize]),
                shader.vertex(transform, &vertices[tri[1] as usize]),
                shader.vertex(transform, &vertices[tri[2] as usize]),
            ];
            raster_triangle(
                &shaded, shader, &samplers, viewport, scissor, blend, depth_state, fb_w, fb_h,
                color_px, depth_px,
            );
        }
        Ok(())
    }
}

/// 裁剪区域换算成整数像素矩形（闭区间）
fn scissor_pixel_rect(scissor: Scissor, viewport: Viewport) -> (i32, i32, i32, i32) {
    let vx = viewport.x as f32;
    let vy = viewport.y as f32;
    let vw = viewport.w as f32;
    let vh = viewport.h as f32;
    (
        (vx + scissor.min_x * vw).floor() as i32,
        (vy + scissor.min_y * vh).floor() as i32,
        (vx + scissor.max_x * vw).ceil() as i32 - 1,
        (vy + scissor.max_y * vh).ceil() as i32 - 1,
    )
}

#[allow(clippy::too_many_arguments)]
fn raster_triangle(
    shaded: &[ShadedVertex; 3],
    shader: &dyn Shader,
    samplers: &[Option<Sampler<'_>>; 2],
    viewport: Viewport,
    scissor: (i32, i32, i32, i32),
    blend: BlendState,
    depth_state: DepthState,
    fb_w: usize,
    fb_h: usize,
    color_px: &mut [u32],
    depth_px: &mut [f32],
) {
    let mut raster = [None; 3];
    for (slot, v) in raster.iter_mut().zip(shaded) {
        let w = v.clip_position.w;
        if w == 0.0 || !w.is_finite() {
            return; // 退化裁剪位置，零覆盖
        }

        // 管线阶段 2: 透视除法
        let ndc = v.clip_position.truncate() / w;

        // 管线阶段 3: 视口映射
        let screen = Vec2::new(
            ndc.x * viewport.w as f32 / 2.0 + viewport.x as f32 + viewport.w as f32 / 2.0,
            ndc.y * viewport.h as f32 / 2.0 + viewport.y as f32 + viewport.h as f32 / 2.0,
        );
        if !screen.x.is_finite() || !screen.y.is_finite() || !ndc.z.is_finite() {
            return;
        }

        *slot = Some(RasterVertex {
            screen,
            ndc_z: ndc.z,
            clip_w: w,
            color: v.color,
            tex_coords: v.tex_coords,
            normal: v.normal,
        });
    }
    let [Some(v0), Some(v1), Some(v2)] = raster else {
        return;
    };

    let points = [v0.screen, v1.screen, v2.screen];

    // 零面积（共线）三角形直接拒绝，不进入像素循环
    if rasterizer::edge(points[0], points[1], points[2]).abs() < 1e-6 {
        return;
    }

    // 管线阶段 4: 包围盒与帧缓冲、裁剪矩形求交
    let (bb_min_x, bb_min_y, bb_max_x, bb_max_y) = rasterizer::get_box(&points);
    let min_x = bb_min_x.max(0).max(scissor.0);
    let min_y = bb_min_y.max(0).max(scissor.1);
    let max_x = bb_max_x.min(fb_w as i32 - 1).min(scissor.2);
    let max_y = bb_max_y.min(fb_h as i32 - 1).min(scissor.3);
    if min_x > max_x || min_y > max_y {
        return;
    }

    let clip_w = [v0.clip_w, v1.clip_w, v2.clip_w];

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            // 管线阶段 5: 像素中心的重心权重，三个都非负才在三角形内
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let Some(bary) = rasterizer::barycentric(&points, p) else {
                continue;
            };
            if bary[0] < 0.0 || bary[1] < 0.0 || bary[2] < 0.0 {
                continue;
            }

            // 管线阶段 6: 透视校正权重
            let Some(w) = rasterizer::perspective_weights(bary, clip_w) else {
                continue;
            };

            // 管线阶段 7: 深度测试（<= 通过）与条件写回
            let z = v0.ndc_z * w[0] + v1.ndc_z * w[1] + v2.ndc_z * w[2];
            let idx = y as usize * fb_w + x as usize;
            if depth_state.read && z > depth_px[idx] {
                continue;
            }
            if depth_state.write {
                depth_px[idx] = z;
            }

            // 管线阶段 8: 属性插值与片元着色
            let input = FragmentInput {
                color: v0.color * w[0] + v1.color * w[1] + v2.color * w[2],
                tex_coords: [
                    v0.tex_coords[0] * w[0] + v1.tex_coords[0] * w[1] + v2.tex_coords[0] * w[2],
                    v0.tex_coords[1] * w[0] + v1.tex_coords[1] * w[1] + v2.tex_coords[1] * w[2],
                ],
                normal: v0.normal * w[0] + v1.normal * w[1] + v2.normal * w[2],
            };
            let src = shader.fragment(&input, samplers);

            // 管线阶段 9: over 混合或直接写入
            let out = if blend.enabled {
                let dst = Color::from_argb(color_px[idx]);
                let mut blended = src * src.a + dst * (1.0 - src.a);
                blended.a = 1.0; // 输出强制不透明
                blended
            } else {
                src
            };
            color_px[idx] = out.to_argb();
        }
    }
}
