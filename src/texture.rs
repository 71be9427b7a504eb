use crate::buffer::{Buffer, PixelFormat};
use crate::color::Color;
use crate::error::RenderError;
use cgmath::Vector2 as Vec2;
use std::path::Path;

/// 由若干级 Buffer 组成的纹理，0 级为原始图像
#[derive(Debug, Clone)]
pub struct Texture {
    levels: Vec<Buffer>,
}

impl Texture {
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Result<Self, RenderError> {
        // 零尺寸纹理无法寻址，在构造时就拒绝
        if width == 0 || height == 0 {
            return Err(RenderError::Allocation { width, height });
        }
        Ok(Self {
            levels: vec![Buffer::new(width, height, format)?],
        })
    }

    /// 通过 image crate 解码图片，打包为单级 ARGB 纹理
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = (img.width() as usize, img.height() as usize);
        if width == 0 || height == 0 {
            return Err(RenderError::Allocation { width, height });
        }
        let mut level = Buffer::new(width, height, PixelFormat::Rgba8)?;

        let data = level.packed_mut()?;
        for (i, pixel) in img.pixels().enumerate() {
            data[i] = (pixel[3] as u32) << 24
                | (pixel[0] as u32) << 16
                | (pixel[1] as u32) << 8
                | pixel[2] as u32;
        }
        Ok(Self {
            levels: vec![level],
        })
    }

    pub fn width(&self) -> usize {
        self.levels[0].width()
    }

    pub fn height(&self) -> usize {
        self.levels[0].height()
    }

    pub fn format(&self) -> PixelFormat {
        self.levels[0].format()
    }

    pub fn level(&self, i: usize) -> Option<&Buffer> {
        self.levels.get(i)
    }

    pub fn level_mut(&mut self, i: usize) -> Option<&mut Buffer> {
        self.levels.get_mut(i)
    }

    pub fn levels(&self) -> &[Buffer] {
        &self.levels
    }

    pub fn push_level(&mut self, level: Buffer) {
        self.levels.push(level);
    }
}

/// 超出 [0,1] 的纹理坐标如何映射到有效纹素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// 饱和到边缘纹素
    Clamp,
    /// 按纹理尺寸取模回绕
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
}

/// 纹理单元配置：每轴寻址模式 + 过滤方式。只引用纹理，不拥有它。
#[derive(Debug, Clone, Copy)]
pub struct Sampler<'a> {
    pub texture: &'a Texture,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub filter: Filter,
}

impl<'a> Sampler<'a> {
    pub fn new(texture: &'a Texture) -> Self {
        Self {
            texture,
            address_u: AddressMode::Clamp,
            address_v: AddressMode::Clamp,
            filter: Filter::Nearest,
        }
    }

    pub fn with_address(mut self, u: AddressMode, v: AddressMode) -> Self {
        self.address_u = u;
        self.address_v = v;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// 按 0 级采样。UV 原点在左上，v 向下增长。
    pub fn sample(&self, uv: Vec2<f32>) -> Color {
        match self.filter {
            Filter::Nearest => self.sample_nearest(uv),
            Filter::Linear => self.sample_linear(uv),
        }
    }

    fn sample_nearest(&self, uv: Vec2<f32>) -> Color {
        let level = &self.texture.levels()[0];
        let tx = (uv.x * level.width() as f32).floor() as i64;
        let ty = (uv.y * level.height() as f32).floor() as i64;
        let x = address(tx, level.width(), self.address_u);
        let y = address(ty, level.height(), self.address_v);
        level.texel_color(x, y)
    }

    // 双线性：四个邻近纹素按小数偏移加权
    fn sample_linear(&self, uv: Vec2<f32>) -> Color {
        let level = &self.texture.levels()[0];
        let fx = uv.x * level.width() as f32 - 0.5;
        let fy = uv.y * level.height() as f32 - 0.5;
        let x0 = fx.floor() as i64;
        let y0 = fy.floor() as i64;
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let fetch = |xi: i64, yi: i64| {
            let x = address(xi, level.width(), self.address_u);
            let y = address(yi, level.height(), self.address_v);
            level.texel_color(x, y)
        };

        let top = fetch(x0, y0) * (1.0 - tx) + fetch(x0 + 1, y0) * tx;
        let bottom = fetch(x0, y0 + 1) * (1.0 - tx) + fetch(x0 + 1, y0 + 1) * tx;
        top * (1.0 - ty) + bottom * ty
    }
}

fn address(i: i64, n: usize, mode: AddressMode) -> usize {
    match mode {
        AddressMode::Clamp => i.clamp(0, n as i64 - 1) as usize,
        AddressMode::Repeat => i.rem_euclid(n as i64) as usize,
    }
}
