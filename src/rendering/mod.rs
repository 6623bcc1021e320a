pub mod framebuffer;
/// Software rasterization pipeline
pub mod rasterizer;
pub mod shading;
pub mod texture;

pub use framebuffer::{FrameSlice, Framebuffer, SKY_COLOR};
pub use rasterizer::{PixelTarget, Prepared, Rasterizer, ScreenTriangle};
pub use shading::ShadingConfig;
pub use texture::{Texture, TextureAtlas};
