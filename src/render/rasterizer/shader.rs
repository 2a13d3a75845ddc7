//! Programmable shading stages for triangle rasterization.
//!
//! This module provides a trait-based abstraction for per-vertex and per-pixel
//! computations, similar to how GPUs separate the fixed-function rasterizer
//! from programmable vertex and fragment shaders.
//!
//! # Architecture
//!
//! The rasterizer handles:
//! - Perspective divide of the vertex stage output
//! - Bounding box computation
//! - Edge function evaluation and inside/outside testing
//! - Barycentric coordinate calculation
//! - Depth testing and buffer writes
//!
//! The shader handles:
//! - Projecting vertices and stashing per-vertex varyings
//! - Attribute interpolation (intensities, UVs, normals)
//! - Texture sampling
//! - Final color computation, or discarding the fragment

use std::ops::{Add, Mul};

use crate::math::vec4::Vec4;
use crate::transform::TransformStack;
use crate::vertex::Vertex;

/// Trait for a two-stage shading program.
///
/// For every triangle the rasterizer calls `vertex()` exactly once per corner,
/// in order 0, 1, 2, and then `fragment()` for each covered pixel that passed
/// the depth test.
///
/// # Barycentric Coordinates
///
/// The `lambda` parameter contains three weights [λ₀, λ₁, λ₂] that:
/// - Sum to 1.0 for any point inside the triangle
/// - Represent the "influence" of each vertex on the current pixel
/// - Can be used to interpolate any per-vertex attribute:
///   `attr_at_pixel = λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`
pub trait Shader {
    /// Project one vertex and record its varyings in slot `index` (0, 1 or 2).
    ///
    /// Returns the homogeneous position in pixel space, typically
    /// `viewport * projection * view * position`. The rasterizer performs the
    /// perspective divide.
    fn vertex(&mut self, vertex: &Vertex, index: usize, transforms: &TransformStack) -> Vec4;

    /// Compute the color for a pixel given its barycentric coordinates.
    ///
    /// Returning `None` discards the fragment: neither the color nor the depth
    /// buffer is touched, so a later triangle can still claim the pixel.
    fn fragment(&self, lambda: [f32; 3]) -> Option<u32>;
}

/// Blend three per-vertex values with barycentric weights.
#[inline]
pub fn interpolate<T>(values: &[T; 3], lambda: [f32; 3]) -> T
where
    T: Copy + Add<Output = T> + Mul<f32, Output = T>,
{
    values[0] * lambda[0] + values[1] * lambda[1] + values[2] * lambda[2]
}

/// Flat shader - returns a constant color for all pixels.
///
/// Projects vertices through the whole transform stack and accepts every
/// fragment. With an untouched (identity) stack, positions are used as pixel
/// coordinates directly.
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }
}

impl Shader for FlatShader {
    #[inline]
    fn vertex(&mut self, vertex: &Vertex, _index: usize, transforms: &TransformStack) -> Vec4 {
        transforms.project(vertex.position)
    }

    #[inline]
    fn fragment(&self, _lambda: [f32; 3]) -> Option<u32> {
        Some(self.color)
    }
}
