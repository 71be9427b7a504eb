pub mod buffer;
pub mod color;
pub mod config;
pub mod error;
pub mod math;
pub mod rasterizer;
pub mod renderer;
pub mod target;
pub mod texture;
pub mod vertex;

pub use buffer::{Buffer, PixelFormat};
pub use color::Color;
pub use error::RenderError;
pub use renderer::shader::{
    FragmentInput, LambertShader, Light, ShadedVertex, Shader, UnlitTextureShader,
    VertexColorShader,
};
pub use renderer::{BlendState, DepthState, Renderer, Scissor, Viewport};
pub use target::RenderTarget;
pub use texture::{AddressMode, Filter, Sampler, Texture};
pub use vertex::Vertex;
