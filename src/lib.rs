//! A CPU-based software rasterizer.
//!
//! Triangles go through a programmable two-stage [`Shader`]: a vertex stage
//! projecting each corner, and a fragment stage colouring each covered pixel
//! that passed the depth test. Everything runs on the CPU into owned colour
//! and depth buffers.
//!
//! # Quick Start
//!
//! ```ignore
//! use softgl::prelude::*;
//!
//! let model = Model::from_obj("head", "obj/african_head.obj")?;
//! let mut engine = Engine::new(RenderConfig::default());
//! engine.render(&model, ShadingMode::Gouraud)?;
//! engine.save_color("output.tga")?;
//! ```
//!
//! Drawing single triangles without the engine:
//!
//! ```ignore
//! let mut ctx = RenderContext::new(20, 20);
//! let tri = [Vertex::at(0.0, 0.0, 0.0), Vertex::at(10.0, 0.0, 0.0), Vertex::at(0.0, 10.0, 0.0)];
//! ctx.draw_triangle(tri, &mut FlatShader::new(colors::RED));
//! ```

pub mod colors;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod model;
pub mod render;
pub mod shaders;
pub mod texture;
pub mod transform;
pub mod vertex;

// Re-export commonly needed types at crate root for convenience
pub use config::{RenderConfig, ShadingMode};
pub use engine::{Engine, EngineError, RenderStats};
pub use mesh::{LoadError, Mesh};
pub use model::Model;
pub use render::{FrameBuffer, RenderContext, Shader};
pub use texture::{Texture, TextureError};
pub use transform::TransformStack;
pub use vertex::Vertex;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softgl::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::config::{RenderConfig, ShadingMode};
    pub use crate::engine::{Engine, RenderStats};

    // Model
    pub use crate::mesh::Mesh;
    pub use crate::model::Model;
    pub use crate::texture::Texture;
    pub use crate::vertex::Vertex;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::colors;
    pub use crate::light::DirectionalLight;
    pub use crate::render::{interpolate, FlatShader, FrameBuffer, RenderContext, Shader};
    pub use crate::shaders::{BandedShader, GouraudShader, PhongShader, TexturedShader};
    pub use crate::transform::{look_at, projection, viewport, TransformStack};
}
