//! The render context: a frame buffer plus the transform stack shaders project with.

use super::framebuffer::FrameBuffer;
use super::rasterizer::{EdgeFunctionRasterizer, Shader};
use crate::math::vec3::Vec3;
use crate::transform::TransformStack;
use crate::vertex::Vertex;

/// Owns the colour and depth buffers and the view, projection and viewport
/// matrices. All drawing goes through [`RenderContext::draw_triangle`].
#[derive(Clone, Debug)]
pub struct RenderContext {
    framebuffer: FrameBuffer,
    transforms: TransformStack,
}

impl RenderContext {
    /// A cleared `width` x `height` context with identity transforms.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height),
            transforms: TransformStack::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    /// Reset colours to the background and depths to the far clear value.
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    pub fn set_viewport(&mut self, x: f32, y: f32, w: f32, h: f32, depth: f32) {
        self.transforms.set_viewport(x, y, w, h, depth);
        log::debug!("viewport matrix:\n{}", self.transforms.viewport());
    }

    pub fn set_projection(&mut self, eye_distance: f32) {
        self.transforms.set_projection(eye_distance);
        log::debug!("projection matrix:\n{}", self.transforms.projection());
    }

    pub fn set_view(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.transforms.set_view(eye, target, up);
        log::debug!("view matrix:\n{}", self.transforms.view());
    }

    pub fn transforms(&self) -> &TransformStack {
        &self.transforms
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.framebuffer
    }

    /// Run one triangle through the shader and rasterize it.
    ///
    /// The vertex stage is called once per corner, in order, then each result is
    /// perspective divided. Covered pixels that pass the depth test go to the
    /// fragment stage. Returns the number of pixels written.
    ///
    /// A triangle whose first and last vertex share a y coordinate has its
    /// first two vertices swapped before shading, so shaders see them in that
    /// order.
    pub fn draw_triangle<S: Shader + ?Sized>(
        &mut self,
        mut vertices: [Vertex; 3],
        shader: &mut S,
    ) -> usize {
        if vertices[2].position.y == vertices[0].position.y {
            vertices.swap(0, 1);
        }

        let mut points = [Vec3::ZERO; 3];
        for (index, (vertex, point)) in vertices.iter().zip(points.iter_mut()).enumerate() {
            *point = shader
                .vertex(vertex, index, &self.transforms)
                .perspective_divide();
        }

        EdgeFunctionRasterizer::fill_triangle(&points, &mut self.framebuffer, shader)
    }
}
