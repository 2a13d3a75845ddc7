use crate::math::{vec2::Vec2, vec3::Vec3};

/// One corner of a triangle as handed to a shader's vertex stage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub const fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// A vertex with only a position; normal and UV are zero.
    pub const fn at(x: f32, y: f32, z: f32) -> Self {
        Self::new(Vec3::new(x, y, z), Vec3::ZERO, Vec2::ZERO)
    }
}
