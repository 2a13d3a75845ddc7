//! Triangle rendering: buffers, the render context and the rasterizer.

mod context;
pub mod debug;
pub mod framebuffer;
pub mod rasterizer;

pub use context::RenderContext;
pub use framebuffer::{FrameBuffer, DEPTH_CLEAR};
pub use rasterizer::{interpolate, BoundingBox, EdgeFunctionRasterizer, FlatShader, Shader};
