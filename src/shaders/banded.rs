use super::GouraudShader;
use crate::colors;
use crate::math::vec4::Vec4;
use crate::render::rasterizer::Shader;
use crate::transform::TransformStack;
use crate::vertex::Vertex;

/// Toon shader - posterises the Gouraud intensity into a few flat bands.
pub struct BandedShader {
    lighting: GouraudShader,
}

impl BandedShader {
    pub fn new(lighting: GouraudShader) -> Self {
        Self { lighting }
    }

    /// Snap an intensity down to its band level.
    pub fn band(intensity: f32) -> f32 {
        match intensity {
            i if i > 0.85 => 1.0,
            i if i > 0.60 => 0.80,
            i if i > 0.45 => 0.60,
            i if i > 0.30 => 0.45,
            i if i > 0.15 => 0.30,
            _ => 0.0,
        }
    }
}

impl Shader for BandedShader {
    fn vertex(&mut self, vertex: &Vertex, index: usize, transforms: &TransformStack) -> Vec4 {
        self.lighting.vertex(vertex, index, transforms)
    }

    #[inline]
    fn fragment(&self, lambda: [f32; 3]) -> Option<u32> {
        let level = Self::band(self.lighting.intensity(lambda));
        Some(colors::modulate(colors::WHITE, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::DirectionalLight;
    use crate::math::vec3::Vec3;

    #[test]
    fn band_thresholds() {
        assert_eq!(BandedShader::band(1.0), 1.0);
        assert_eq!(BandedShader::band(0.86), 1.0);
        assert_eq!(BandedShader::band(0.85), 0.80);
        assert_eq!(BandedShader::band(0.61), 0.80);
        assert_eq!(BandedShader::band(0.5), 0.60);
        assert_eq!(BandedShader::band(0.31), 0.45);
        assert_eq!(BandedShader::band(0.2), 0.30);
        assert_eq!(BandedShader::band(0.15), 0.0);
        assert_eq!(BandedShader::band(f32::NAN), 0.0);
    }

    #[test]
    fn fragment_uses_banded_intensity() {
        let mut shader = BandedShader::new(GouraudShader::new(DirectionalLight::new(Vec3::FORWARD)));
        let stack = TransformStack::new();
        // Normal at 60 degrees to the light: intensity 0.5.
        let normal = Vec3::new(0.0, 3.0f32.sqrt(), 1.0);
        for i in 0..3 {
            let vertex = Vertex {
                normal,
                ..Vertex::at(i as f32, 0.0, 0.0)
            };
            shader.vertex(&vertex, i, &stack);
        }
        assert_eq!(shader.fragment([0.2, 0.3, 0.5]), Some(0xFF999999));
    }
}
