use crate::colors;
use crate::light::DirectionalLight;
use crate::math::vec4::Vec4;
use crate::render::rasterizer::{interpolate, Shader};
use crate::transform::TransformStack;
use crate::vertex::Vertex;

/// Gouraud shader - lights each vertex and interpolates the intensity.
///
/// Used for smooth shading where lighting is computed per-vertex from
/// vertex normals and then blended across the triangle. Output is white
/// scaled by the interpolated intensity.
#[derive(Clone, Debug)]
pub struct GouraudShader {
    light: DirectionalLight,
    intensities: [f32; 3],
}

impl GouraudShader {
    pub fn new(light: DirectionalLight) -> Self {
        Self {
            light,
            intensities: [0.0; 3],
        }
    }

    /// Interpolated light intensity in [0.0, 1.0].
    #[inline]
    pub fn intensity(&self, lambda: [f32; 3]) -> f32 {
        interpolate(&self.intensities, lambda)
    }
}

impl Shader for GouraudShader {
    fn vertex(&mut self, vertex: &Vertex, index: usize, transforms: &TransformStack) -> Vec4 {
        self.intensities[index] = self.light.intensity(vertex.normal);
        transforms.project(vertex.position)
    }

    #[inline]
    fn fragment(&self, lambda: [f32; 3]) -> Option<u32> {
        Some(colors::modulate(colors::WHITE, self.intensity(lambda)))
    }
}
