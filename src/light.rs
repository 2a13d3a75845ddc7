//! Lighting types for the shaders.

use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// All rays are parallel, so intensity depends only on the surface normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Normalized direction pointing from the surface towards the light.
    pub direction: Vec3,
}

impl DirectionalLight {
    /// Create a new directional light shining from the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
        }
    }

    /// Lambertian intensity in [0.0, 1.0] for a surface normal.
    /// Surfaces facing away from the light get 0.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        self.direction.dot(normal.normalize()).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn direction_is_normalized() {
        let light = DirectionalLight::new(Vec3::new(1.0, -1.0, 1.0));
        assert_relative_eq!(light.direction.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn normal_facing_the_light_is_fully_lit() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 2.0));
        assert_relative_eq!(light.intensity(Vec3::new(0.0, 0.0, 5.0)), 1.0);
        assert_eq!(light.intensity(Vec3::new(0.0, 0.0, -1.0)), 0.0);
    }

    #[test]
    fn intensity_is_cosine_of_angle() {
        let light = DirectionalLight::new(Vec3::UP);
        let intensity = light.intensity(Vec3::new(0.0, 1.0, 1.0));
        assert_relative_eq!(intensity, std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn zero_normal_is_unlit() {
        let light = DirectionalLight::new(Vec3::UP);
        assert_eq!(light.intensity(Vec3::ZERO), 0.0);
    }
}
