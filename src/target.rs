use crate::buffer::{Buffer, PixelFormat};
use crate::error::RenderError;

/// 帧缓冲（打包 ARGB）与深度缓冲（f32）配对，始终同尺寸创建/调整
#[derive(Debug, Clone)]
pub struct RenderTarget {
    color: Buffer,
    depth: Buffer,
}

impl RenderTarget {
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        Ok(Self {
            color: Buffer::new(width, height, PixelFormat::Rgba8)?,
            depth: Buffer::new(width, height, PixelFormat::Float32)?,
        })
    }

    /// 两个缓冲一起重建；任一分配失败则保持原状
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), RenderError> {
        let color = Buffer::new(width, height, PixelFormat::Rgba8)?;
        let depth = Buffer::new(width, height, PixelFormat::Float32)?;
        self.color = color;
        self.depth = depth;
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.color.width()
    }

    pub fn height(&self) -> usize {
        self.color.height()
    }

    /// 帧缓冲，供呈现方按行主序读取
    pub fn color(&self) -> &Buffer {
        &self.color
    }

    /// 深度缓冲，主要用于诊断和测试
    pub fn depth(&self) -> &Buffer {
        &self.depth
    }

    pub(crate) fn buffers_mut(&mut self) -> (&mut Buffer, &mut Buffer) {
        (&mut self.color, &mut self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_share_dimensions() {
        let target = RenderTarget::new(8, 6).unwrap();
        assert_eq!(target.color().width(), target.depth().width());
        assert_eq!(target.color().height(), target.depth().height());
        assert_eq!(target.width(), 8);
        assert_eq!(target.height(), 6);
    }

    #[test]
    fn resize_keeps_buffers_paired() {
        let mut target = RenderTarget::new(4, 4).unwrap();
        target.resize(16, 9).unwrap();
        assert_eq!(target.color().packed().unwrap().len(), 16 * 9);
        assert_eq!(target.depth().floats().unwrap().len(), 16 * 9);
    }
}
