//! Triangle rasterization.
//!
//! - [`EdgeFunctionRasterizer`]: bounding box iteration with edge function tests
//! - [`Shader`]: the programmable vertex and fragment stages it drives

mod edgefunction;
pub mod shader;

pub use edgefunction::EdgeFunctionRasterizer;
pub use shader::{interpolate, FlatShader, Shader};

use crate::math::vec3::Vec3;

/// Inclusive pixel bounds of a screen triangle, clamped to a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Floor of the minimum and ceiling of the maximum corner, clamped to
    /// `[0, width - 1] x [0, height - 1]`.
    ///
    /// Returns `None` if the box misses the buffer entirely, the buffer is
    /// empty, or a coordinate is NaN.
    pub fn around(points: &[Vec3; 3], width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 || points.iter().any(|p| p.x.is_nan() || p.y.is_nan()) {
            return None;
        }

        let min_x = points[0].x.min(points[1].x).min(points[2].x).floor();
        let min_y = points[0].y.min(points[1].y).min(points[2].y).floor();
        let max_x = points[0].x.max(points[1].x).max(points[2].x).ceil();
        let max_y = points[0].y.max(points[1].y).max(points[2].y).ceil();

        let (w, h) = ((width - 1) as f32, (height - 1) as f32);
        if max_x < 0.0 || max_y < 0.0 || min_x > w || min_y > h {
            return None;
        }

        Some(Self {
            min_x: min_x.max(0.0) as i32,
            min_y: min_y.max(0.0) as i32,
            max_x: max_x.min(w) as i32,
            max_y: max_y.min(h) as i32,
        })
    }
}
