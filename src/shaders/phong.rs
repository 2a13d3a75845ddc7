use crate::colors;
use crate::light::DirectionalLight;
use crate::math::{mat4::Mat4, vec2::Vec2, vec3::Vec3, vec4::Vec4};
use crate::render::rasterizer::{interpolate, Shader};
use crate::texture::Texture;
use crate::transform::TransformStack;
use crate::vertex::Vertex;

const SPECULAR_WEIGHT: f32 = 0.7;

/// Per-pixel Phong shader driven by a diffuse map, a normal map and a
/// specular exponent map.
///
/// Normals come from the normal map and are carried into clip space by the
/// inverse transpose of `projection * view`; the light direction goes through
/// `projection * view` itself and is not renormalized afterwards. Both matrices
/// are captured when the shader is built, so rebuild it after changing the view
/// or projection.
///
/// The highlight exponent is applied to the `y` component of the reflected
/// light, so highlights sit where the reflection points up the screen.
pub struct PhongShader<'a> {
    diffuse: &'a Texture,
    normal_map: &'a Texture,
    specular: &'a Texture,
    light: Vec3,
    normal_transform: Mat4,
    uvs: [Vec2; 3],
}

impl<'a> PhongShader<'a> {
    pub fn new(
        light: DirectionalLight,
        transforms: &TransformStack,
        diffuse: &'a Texture,
        normal_map: &'a Texture,
        specular: &'a Texture,
    ) -> Self {
        let mvp = transforms.model_view_projection();
        Self {
            diffuse,
            normal_map,
            specular,
            light: (mvp * Vec4::from(light.direction)).to_vec3(),
            normal_transform: mvp.inverse_transpose(),
            uvs: [Vec2::ZERO; 3],
        }
    }

    /// Diffuse and specular terms for a clip-space normal.
    fn lighting(&self, normal: Vec3, shininess: f32) -> (f32, f32) {
        let n_dot_l = normal.dot(self.light);
        let reflected = (normal * (n_dot_l * 2.0) - self.light).normalize();
        let specular = reflected.y.max(0.0).powf(shininess);
        (n_dot_l.max(0.0), specular)
    }
}

impl Shader for PhongShader<'_> {
    fn vertex(&mut self, vertex: &Vertex, index: usize, transforms: &TransformStack) -> Vec4 {
        self.uvs[index] = vertex.uv;
        transforms.project(vertex.position)
    }

    fn fragment(&self, lambda: [f32; 3]) -> Option<u32> {
        let uv = interpolate(&self.uvs, lambda);
        let sampled = self.normal_map.sample_normal(uv.x, uv.y);
        let normal = (self.normal_transform * Vec4::from(sampled))
            .to_vec3()
            .normalize();

        let (diffuse, specular) = self.lighting(normal, self.specular.sample_scalar(uv.x, uv.y));
        let texel = self.diffuse.sample(uv.x, uv.y);
        Some(colors::modulate(texel, diffuse + SPECULAR_WEIGHT * specular))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn solid(color: u32) -> Texture {
        Texture::from_pixels(1, 1, vec![color]).unwrap()
    }

    // Normal map texel pointing at +Z: (0.5, 0.5, 1.0) in RGB.
    const NORMAL_PLUS_Z: u32 = 0xFF8080FF;

    #[test]
    fn light_head_on_saturates() {
        let diffuse = solid(0xFF808080);
        let normals = solid(NORMAL_PLUS_Z);
        let specular = solid(0xFF010101);
        let stack = TransformStack::new();
        let shader = PhongShader::new(
            DirectionalLight::new(Vec3::FORWARD),
            &stack,
            &diffuse,
            &normals,
            &specular,
        );

        let normal = Vec3::FORWARD;
        let (diff, spec) = shader.lighting(normal, 1.0);
        assert_relative_eq!(diff, 1.0);
        // Reflection points straight back along +Z, so no highlight.
        assert_relative_eq!(spec, 0.0);

        let color = shader.fragment([0.2, 0.3, 0.5]).unwrap();
        let [a, r, g, b] = colors::to_argb_bytes(color);
        assert_eq!(a, 255);
        assert!((127..=129).contains(&r));
        assert_eq!((r, r), (g, b));
    }

    #[test]
    fn light_behind_surface_is_dark() {
        let diffuse = solid(colors::WHITE);
        let normals = solid(NORMAL_PLUS_Z);
        let specular = solid(0xFF0A0A0A);
        let stack = TransformStack::new();
        let shader = PhongShader::new(
            DirectionalLight::new(-Vec3::FORWARD),
            &stack,
            &diffuse,
            &normals,
            &specular,
        );
        assert_eq!(shader.fragment([1.0, 0.0, 0.0]), Some(colors::BLACK));
    }

    #[test]
    fn grazing_light_has_no_specular_highlight() {
        let diffuse = solid(colors::WHITE);
        let normals = solid(NORMAL_PLUS_Z);
        let specular = solid(0xFF101010);
        let stack = TransformStack::new();
        let shader = PhongShader::new(
            DirectionalLight::new(Vec3::new(1.0, 0.0, 1.0)),
            &stack,
            &diffuse,
            &normals,
            &specular,
        );
        let (diff, spec) = shader.lighting(Vec3::FORWARD, 16.0);
        assert_relative_eq!(diff, std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-5);
        // Reflection is (-1, 0, 1) / sqrt(2), with no upward component.
        assert_relative_eq!(spec, 0.0);
    }

    #[test]
    fn highlight_follows_upward_reflection() {
        let tex = solid(colors::WHITE);
        let stack = TransformStack::new();
        let from_below = PhongShader::new(
            DirectionalLight::new(Vec3::new(0.0, -1.0, 1.0)),
            &stack,
            &tex,
            &tex,
            &tex,
        );
        // Reflection is (0, 1, 1) / sqrt(2).
        let (_, spec) = from_below.lighting(Vec3::FORWARD, 1.0);
        assert_relative_eq!(spec, std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-5);

        let from_above = PhongShader::new(
            DirectionalLight::new(Vec3::new(0.0, 1.0, 1.0)),
            &stack,
            &tex,
            &tex,
            &tex,
        );
        let (_, spec) = from_above.lighting(Vec3::FORWARD, 1.0);
        assert_relative_eq!(spec, 0.0);
    }

    #[test]
    fn transformed_light_keeps_its_length() {
        let tex = solid(colors::WHITE);
        let mut stack = TransformStack::new();
        // The view translates +1 along z, which a w = 1 light picks up.
        stack.set_view(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), Vec3::UP);
        let shader = PhongShader::new(
            DirectionalLight::new(Vec3::FORWARD),
            &stack,
            &tex,
            &tex,
            &tex,
        );
        assert_relative_eq!(shader.light, Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-6);
        let (diff, _) = shader.lighting(Vec3::FORWARD, 1.0);
        assert_relative_eq!(diff, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn vertex_stage_projects_and_records_uv() {
        let tex = solid(colors::WHITE);
        let mut stack = TransformStack::new();
        stack.set_viewport(0.0, 0.0, 100.0, 100.0, 255.0);
        let mut shader = PhongShader::new(
            DirectionalLight::new(Vec3::FORWARD),
            &stack,
            &tex,
            &tex,
            &tex,
        );
        let clip = shader.vertex(
            &Vertex::new(Vec3::ZERO, Vec3::ZERO, Vec2::new(0.25, 0.75)),
            2,
            &stack,
        );
        assert_eq!(clip, Vec4::point(50.0, 50.0, 127.5));
        assert_eq!(shader.uvs[2], Vec2::new(0.25, 0.75));
    }
}
