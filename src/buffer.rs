use crate::color::Color;
use crate::error::RenderError;

/// 像素格式标签，元素大小完全由标签决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 单通道 8 位
    Gray8,
    /// 打包 ARGB8888
    Rgba8,
    /// 32 位浮点（深度缓冲）
    Float32,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgba8 | PixelFormat::Float32 => 4,
        }
    }
}

// 按格式分开持有存储，访问前校验标签，杜绝静默重解释
#[derive(Debug, Clone)]
enum PixelStore {
    Gray8(Vec<u8>),
    Rgba8(Vec<u32>),
    Float32(Vec<f32>),
}

/// 固定格式、固定尺寸的连续像素存储
#[derive(Debug, Clone)]
pub struct Buffer {
    width: usize,
    height: usize,
    store: PixelStore,
}

impl Buffer {
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Result<Self, RenderError> {
        let store = alloc_store(width, height, format)?;
        Ok(Self {
            width,
            height,
            store,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        match self.store {
            PixelStore::Gray8(_) => PixelFormat::Gray8,
            PixelStore::Rgba8(_) => PixelFormat::Rgba8,
            PixelStore::Float32(_) => PixelFormat::Float32,
        }
    }

    /// 重新分配存储，丢弃原有内容
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), RenderError> {
        self.store = alloc_store(width, height, self.format())?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn gray8(&self) -> Result<&[u8], RenderError> {
        match &self.store {
            PixelStore::Gray8(v) => Ok(v),
            _ => Err(self.mismatch(PixelFormat::Gray8)),
        }
    }

    pub fn gray8_mut(&mut self) -> Result<&mut [u8], RenderError> {
        let actual = self.format();
        match &mut self.store {
            PixelStore::Gray8(v) => Ok(v),
            _ => Err(RenderError::FormatMismatch {
                expected: PixelFormat::Gray8,
                actual,
            }),
        }
    }

    /// 打包 ARGB 视图（帧缓冲）
    pub fn packed(&self) -> Result<&[u32], RenderError> {
        match &self.store {
            PixelStore::Rgba8(v) => Ok(v),
            _ => Err(self.mismatch(PixelFormat::Rgba8)),
        }
    }

    pub fn packed_mut(&mut self) -> Result<&mut [u32], RenderError> {
        let actual = self.format();
        match &mut self.store {
            PixelStore::Rgba8(v) => Ok(v),
            _ => Err(RenderError::FormatMismatch {
                expected: PixelFormat::Rgba8,
                actual,
            }),
        }
    }

    /// 浮点视图（深度缓冲）
    pub fn floats(&self) -> Result<&[f32], RenderError> {
        match &self.store {
            PixelStore::Float32(v) => Ok(v),
            _ => Err(self.mismatch(PixelFormat::Float32)),
        }
    }

    pub fn floats_mut(&mut self) -> Result<&mut [f32], RenderError> {
        let actual = self.format();
        match &mut self.store {
            PixelStore::Float32(v) => Ok(v),
            _ => Err(RenderError::FormatMismatch {
                expected: PixelFormat::Float32,
                actual,
            }),
        }
    }

    /// 按格式读取一个像素并解为归一化颜色（纹理采样路径）
    pub fn texel_color(&self, x: usize, y: usize) -> Color {
        let idx = y * self.width + x;
        match &self.store {
            PixelStore::Gray8(v) => {
                let g = v[idx] as f32 / 255.0;
                Color::new(g, g, g, 1.0)
            }
            PixelStore::Rgba8(v) => Color::from_argb(v[idx]),
            PixelStore::Float32(v) => {
                let g = v[idx];
                Color::new(g, g, g, 1.0)
            }
        }
    }

    fn mismatch(&self, expected: PixelFormat) -> RenderError {
        RenderError::FormatMismatch {
            expected,
            actual: self.format(),
        }
    }
}

fn alloc_store(
    width: usize,
    height: usize,
    format: PixelFormat,
) -> Result<PixelStore, RenderError> {
    let fail = || RenderError::Allocation { width, height };
    let len = width.checked_mul(height).ok_or_else(fail)?;

    fn filled<T: Clone>(len: usize, zero: T, width: usize, height: usize) -> Result<Vec<T>, RenderError> {
        let mut v = Vec::new();
        v.try_reserve_exact(len)
            .map_err(|_| RenderError::Allocation { width, height })?;
        v.resize(len, zero);
        Ok(v)
    }

    Ok(match format {
        PixelFormat::Gray8 => PixelStore::Gray8(filled(len, 0u8, width, height)?),
        PixelFormat::Rgba8 => PixelStore::Rgba8(filled(len, 0u32, width, height)?),
        PixelFormat::Float32 => PixelStore::Float32(filled(len, 0.0f32, width, height)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_size_follows_tag() {
        assert_eq!(PixelFormat::Gray8.bytes_per_pixel(), 1);
        assert_eq!(PixelFormat::Rgba8.bytes_per_pixel(), 4);
        assert_eq!(PixelFormat::Float32.bytes_per_pixel(), 4);
    }

    #[test]
    fn typed_access_validates_tag() {
        let buf = Buffer::new(2, 2, PixelFormat::Rgba8).unwrap();
        assert_eq!(buf.packed().unwrap().len(), 4);
        assert!(matches!(
            buf.floats(),
            Err(RenderError::FormatMismatch {
                expected: PixelFormat::Float32,
                actual: PixelFormat::Rgba8,
            })
        ));
        assert!(matches!(buf.gray8(), Err(RenderError::FormatMismatch { .. })));
    }

    #[test]
    fn resize_discards_contents() {
        let mut buf = Buffer::new(2, 2, PixelFormat::Rgba8).unwrap();
        buf.packed_mut().unwrap().fill(0xFFFF0000);
        buf.resize(3, 3).unwrap();
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 3);
        assert!(buf.packed().unwrap().iter().all(|&p| p == 0));
    }

    #[test]
    fn oversized_allocation_is_an_error() {
        assert!(matches!(
            Buffer::new(usize::MAX, 2, PixelFormat::Float32),
            Err(RenderError::Allocation { .. })
        ));
    }
}
