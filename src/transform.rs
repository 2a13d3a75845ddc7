//! Builders for the viewport, projection and view matrices, and the
//! [`TransformStack`] that holds them for a render context.
//!
//! Composition order is the caller's responsibility:
//! `viewport * projection * view * model`.

use crate::math::{mat4::Mat4, vec3::Vec3, vec4::Vec4};

/// Maps normalized device coordinates in `[-1, 1]` to the pixel box at
/// `(x, y)` of size `(w, h)`, and depth to `[0, depth]`.
pub fn viewport(x: f32, y: f32, w: f32, h: f32, depth: f32) -> Mat4 {
    Mat4::new([
        [w / 2.0, 0.0, 0.0, x + w / 2.0],
        [0.0, h / 2.0, 0.0, y + h / 2.0],
        [0.0, 0.0, depth / 2.0, depth / 2.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Single-parameter pinhole projection.
///
/// Leaves x, y, z untouched and sets `w = 1 - z / eye_distance`, so the
/// perspective divide shrinks points further from the eye. `eye_distance`
/// must be non-zero.
pub fn projection(eye_distance: f32) -> Mat4 {
    let mut m = Mat4::identity();
    m.set(3, 2, -1.0 / eye_distance);
    m
}

/// Builds a view matrix looking from `eye` towards `target`.
///
/// # Arguments
///
/// * `eye` - The position of the camera.
/// * `target` - The point the camera is looking at.
/// * `up` - Approximate up direction. Must not be parallel to `eye - target`.
///
/// The camera basis (right, true up, forward) fills the upper-left 3x3 block and
/// the translation re-expresses world points relative to `target`.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let forward = (eye - target).normalize();
    let right = up.cross(forward).normalize();
    let up = forward.cross(right).normalize();

    Mat4::new([
        [right.x, right.y, right.z, -right.dot(target)],
        [up.x, up.y, up.z, -up.dot(target)],
        [forward.x, forward.y, forward.z, -forward.dot(target)],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// The view, projection and viewport matrices of a render context.
///
/// All three default to identity, so a shader projecting with the full stack
/// passes positions through unchanged until the stack is configured.
///
/// Setters return `&mut Self` for chaining:
///
/// ```ignore
/// transforms
///     .set_view(eye, Vec3::ZERO, Vec3::UP)
///     .set_projection(3.0)
///     .set_viewport(100.0, 100.0, 600.0, 600.0, 255.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformStack {
    view: Mat4,
    projection: Mat4,
    viewport: Mat4,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn viewport(&self) -> Mat4 {
        self.viewport
    }

    pub fn set_view(&mut self, eye: Vec3, target: Vec3, up: Vec3) -> &mut Self {
        self.view = look_at(eye, target, up);
        self
    }

    pub fn set_projection(&mut self, eye_distance: f32) -> &mut Self {
        self.projection = projection(eye_distance);
        self
    }

    pub fn set_viewport(&mut self, x: f32, y: f32, w: f32, h: f32, depth: f32) -> &mut Self {
        self.viewport = viewport(x, y, w, h, depth);
        self
    }

    /// `projection * view`: model space to clip space (before the viewport).
    pub fn model_view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// `viewport * projection * view`: model space to homogeneous pixel space.
    pub fn screen_matrix(&self) -> Mat4 {
        self.viewport * self.model_view_projection()
    }

    /// Carries a model-space position through the whole stack.
    /// The result still needs its perspective divide.
    pub fn project(&self, position: Vec3) -> Vec4 {
        self.screen_matrix() * Vec4::from(position)
    }
}
