//! Edge function-based triangle rasterization with depth testing.
//!
//! # Algorithm Overview
//!
//! 1. Compute the triangle's bounding box, clamped to the frame buffer
//! 2. For each pixel in the bounding box, evaluate three edge functions
//! 3. Divide by the signed area to get barycentric weights
//! 4. A pixel is inside the triangle if all weights are >= 0 (edges included)
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is the 2D
//! cross product (B - A) × (P - A):
//!
//! ```text
//! E(A, B, P) = (B.x - A.x) * (P.y - A.y) - (B.y - A.y) * (P.x - A.x)
//! ```
//!
//! `E(A, B, C)` is twice the signed area of the triangle. The weight of each
//! vertex is the edge function of the opposite edge divided by that area:
//!
//! ```text
//! lambda_0 = E(B, C, P) / E(A, B, C)
//! lambda_1 = E(C, A, P) / E(A, B, C)
//! lambda_2 = E(A, B, P) / E(A, B, C)
//! ```
//!
//! Dividing by the signed area makes the weights positive inside for either
//! winding order. Pixels are sampled at integer coordinates, so for integer
//! vertex positions the edge functions are exact and pixels lying on an edge
//! get a weight of exactly zero.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::shader::Shader;
use super::BoundingBox;
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;

/// Triangle rasterizer using the edge function algorithm.
///
/// Iterates over all pixels in the triangle's bounding box, keeps those whose
/// barycentric weights are all non-negative, depth tests them and hands the
/// survivors to the shader's fragment stage.
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    /// Computes the edge function value for point P relative to edge (A -> B).
    ///
    /// # Returns
    ///
    /// - Positive: P is to the left of edge AB (counter-clockwise winding)
    /// - Negative: P is to the right of edge AB (clockwise winding)
    /// - Zero: P lies exactly on the edge AB
    #[inline]
    pub fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f32 {
        (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
    }

    /// Barycentric weights of `p` with respect to the screen triangle.
    ///
    /// Returns `None` when twice the signed area is not a normal float (zero,
    /// subnormal, NaN or infinite): the triangle has no usable screen area.
    #[inline]
    pub fn barycentric(points: &[Vec3; 3], p: Vec3) -> Option<[f32; 3]> {
        let [a, b, c] = *points;
        let area = Self::edge_function(a, b, c);
        if !area.is_normal() {
            return None;
        }
        Some([
            Self::edge_function(b, c, p) / area,
            Self::edge_function(c, a, p) / area,
            Self::edge_function(a, b, p) / area,
        ])
    }

    /// Fill a screen-space triangle, returning the number of pixels written.
    ///
    /// `points` are perspective-divided positions: x and y in pixels, z the
    /// value compared against the depth buffer (larger is closer).
    ///
    /// Degenerate triangles are skipped without touching the buffers. A pixel
    /// is written only if its interpolated depth is strictly greater than the
    /// stored one and the shader accepts the fragment.
    pub fn fill_triangle<S: Shader + ?Sized>(
        points: &[Vec3; 3],
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> usize {
        // ─────────────────────────────────────────────────────────────────────
        // Step 1: Reject triangles without screen area
        // ─────────────────────────────────────────────────────────────────────
        let area = Self::edge_function(points[0], points[1], points[2]);
        if !area.is_normal() {
            log::trace!("skipping degenerate triangle {points:?} (area {area})");
            return 0;
        }

        // ─────────────────────────────────────────────────────────────────────
        // Step 2: Compute bounding box, clipped to the frame buffer
        // ─────────────────────────────────────────────────────────────────────
        let Some(bbox) = BoundingBox::around(points, buffer.width(), buffer.height()) else {
            return 0;
        };

        // ─────────────────────────────────────────────────────────────────────
        // Step 3: Iterate over all pixels in bounding box
        // ─────────────────────────────────────────────────────────────────────
        let z = [points[0].z, points[1].z, points[2].z];
        let mut written = 0;
        for y in bbox.min_y..=bbox.max_y {
            for x in bbox.min_x..=bbox.max_x {
                let p = Vec3::new(x as f32, y as f32, 0.0);
                let Some(lambda) = Self::barycentric(points, p) else {
                    continue;
                };

                // Closed fill rule: pixels on an edge belong to the triangle.
                if lambda[0] < 0.0 || lambda[1] < 0.0 || lambda[2] < 0.0 {
                    continue;
                }

                let depth = lambda[0] * z[0] + lambda[1] * z[1] + lambda[2] * z[2];
                if !buffer.passes_depth_test(x, y, depth) {
                    continue;
                }

                if let Some(color) = shader.fragment(lambda) {
                    buffer.write_fragment(x, y, depth, color);
                    written += 1;
                }
            }
        }
        written
    }
}
