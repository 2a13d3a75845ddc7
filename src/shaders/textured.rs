use super::GouraudShader;
use crate::colors;
use crate::light::DirectionalLight;
use crate::math::{vec2::Vec2, vec4::Vec4};
use crate::render::rasterizer::{interpolate, Shader};
use crate::texture::Texture;
use crate::transform::TransformStack;
use crate::vertex::Vertex;

/// Modulated texture shader - diffuse texture colour multiplied by the
/// Gouraud lighting intensity.
///
/// With an alpha cutoff set, fragments whose texel alpha is below it are
/// discarded, leaving the pixel free for triangles drawn later.
pub struct TexturedShader<'a> {
    lighting: GouraudShader,
    texture: &'a Texture,
    uvs: [Vec2; 3],
    alpha_cutoff: Option<u8>,
}

impl<'a> TexturedShader<'a> {
    pub fn new(light: DirectionalLight, texture: &'a Texture) -> Self {
        Self {
            lighting: GouraudShader::new(light),
            texture,
            uvs: [Vec2::ZERO; 3],
            alpha_cutoff: None,
        }
    }

    pub fn with_alpha_cutoff(mut self, cutoff: u8) -> Self {
        self.alpha_cutoff = Some(cutoff);
        self
    }
}

impl Shader for TexturedShader<'_> {
    fn vertex(&mut self, vertex: &Vertex, index: usize, transforms: &TransformStack) -> Vec4 {
        self.uvs[index] = vertex.uv;
        self.lighting.vertex(vertex, index, transforms)
    }

    #[inline]
    fn fragment(&self, lambda: [f32; 3]) -> Option<u32> {
        let uv = interpolate(&self.uvs, lambda);
        let texel = self.texture.sample(uv.x, uv.y);
        if self
            .alpha_cutoff
            .is_some_and(|cutoff| colors::alpha(texel) < cutoff)
        {
            return None;
        }
        Some(colors::modulate(texel, self.lighting.intensity(lambda)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Vec3;

    const TRANSPARENT: u32 = 0x00FFFFFF;

    // 2x1: left texel opaque red, right texel fully transparent.
    fn texture() -> Texture {
        Texture::from_pixels(2, 1, vec![colors::RED, TRANSPARENT]).unwrap()
    }

    fn prime(shader: &mut TexturedShader, u: f32) {
        let stack = TransformStack::new();
        for i in 0..3 {
            let vertex = Vertex::new(Vec3::ZERO, Vec3::FORWARD, Vec2::new(u, 0.5));
            shader.vertex(&vertex, i, &stack);
        }
    }

    #[test]
    fn samples_texture_at_interpolated_uv() {
        let tex = texture();
        let mut shader = TexturedShader::new(DirectionalLight::new(Vec3::FORWARD), &tex);
        prime(&mut shader, 0.25);
        assert_eq!(shader.fragment([0.2, 0.3, 0.5]), Some(colors::RED));
    }

    #[test]
    fn lighting_scales_texel() {
        let tex = texture();
        let mut shader = TexturedShader::new(DirectionalLight::new(-Vec3::FORWARD), &tex);
        prime(&mut shader, 0.25);
        assert_eq!(shader.fragment([0.2, 0.3, 0.5]), Some(colors::BLACK));
    }

    #[test]
    fn alpha_cutoff_discards_transparent_texels() {
        let tex = texture();
        let mut shader =
            TexturedShader::new(DirectionalLight::new(Vec3::FORWARD), &tex).with_alpha_cutoff(128);
        prime(&mut shader, 0.75);
        assert_eq!(shader.fragment([0.2, 0.3, 0.5]), None);

        prime(&mut shader, 0.25);
        assert_eq!(shader.fragment([0.2, 0.3, 0.5]), Some(colors::RED));
    }

    #[test]
    fn without_cutoff_transparent_texels_are_kept() {
        let tex = texture();
        let mut shader = TexturedShader::new(DirectionalLight::new(Vec3::FORWARD), &tex);
        prime(&mut shader, 0.75);
        assert_eq!(shader.fragment([0.2, 0.3, 0.5]), Some(TRANSPARENT));
    }
}
