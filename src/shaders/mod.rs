//! Shaders for lit models.
//!
//! Every shader here projects with the full transform stack of the render
//! context and keeps per-vertex varyings for the triangle being drawn.

mod banded;
mod gouraud;
mod phong;
mod textured;

pub use banded::BandedShader;
pub use gouraud::GouraudShader;
pub use phong::PhongShader;
pub use textured::TexturedShader;
