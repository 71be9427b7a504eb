use crate::buffer::PixelFormat;
use thiserror::Error;

/// 渲染管线的错误类型
#[derive(Debug, Error)]
pub enum RenderError {
    // draw / clear 时没有绑定渲染目标
    #[error("没有绑定渲染目标")]
    NoRenderTarget,

    #[error("没有绑定着色器")]
    NoShader,

    /// 索引超出顶点数组范围，整个 draw 调用被拒绝
    #[error("顶点索引越界: {index}（顶点数量 {len}）")]
    IndexOutOfBounds { index: u32, len: usize },

    #[error("无法分配 {width}x{height} 的像素缓冲")]
    Allocation { width: usize, height: usize },

    /// 以错误的元素类型访问缓冲，不做静默重解释
    #[error("像素格式不匹配: 期望 {expected:?}，实际 {actual:?}")]
    FormatMismatch {
        expected: PixelFormat,
        actual: PixelFormat,
    },

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
