//! Colour and depth buffers owned by a render context.
//!
//! Both buffers are row-major with row 0 at the bottom of the picture (the
//! viewport maps +Y upwards). The image exports flip rows so the written files
//! come out upright.

use image::{GrayImage, Luma, Rgba, RgbaImage};

use crate::colors;

/// Depth value of a pixel nothing has been drawn to. Every finite depth is in
/// front of it.
pub const DEPTH_CLEAR: f32 = f32::MIN;

/// Owned colour and depth buffers with bounds-checked 2D access.
///
/// # Depth Buffer
///
/// Larger depth values are closer to the viewer. The buffer is only written
/// through [`FrameBuffer::write_fragment`], which the rasterizer calls after a
/// fragment passed the depth test and the shader accepted it.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![DEPTH_CLEAR; size],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset colours to the background and depths to [`DEPTH_CLEAR`].
    pub fn clear(&mut self) {
        self.color_buffer.fill(colors::BACKGROUND);
        self.depth_buffer.fill(DEPTH_CLEAR);
    }

    /// Row-major offset, computed in `usize` so large buffers cannot wrap.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| self.offset(x, y))
    }

    /// Set a pixel without depth testing (for overlays and debug drawing).
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    /// True if `depth` is strictly closer than what is stored at (x, y).
    /// Ties keep the earlier fragment. Out-of-bounds pixels never pass.
    #[inline]
    pub fn passes_depth_test(&self, x: i32, y: i32, depth: f32) -> bool {
        self.index(x, y)
            .is_some_and(|idx| depth > self.depth_buffer[idx])
    }

    /// Store an accepted fragment's colour and depth.
    #[inline]
    pub(crate) fn write_fragment(&mut self, x: i32, y: i32, depth: f32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.depth_buffer[idx] = depth;
            self.color_buffer[idx] = color;
        }
    }

    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// The colour buffer as an upright RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let idx = self.offset(x, self.height - 1 - y);
            let [a, r, g, b] = colors::to_argb_bytes(self.color_buffer[idx]);
            Rgba([r, g, b, a])
        })
    }

    /// The depth buffer as an upright grey image.
    ///
    /// Depths in `[0, depth_range]` map linearly to grey levels; untouched pixels
    /// are black.
    pub fn depth_image(&self, depth_range: f32) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let idx = self.offset(x, self.height - 1 - y);
            let depth = self.depth_buffer[idx];
            let level = if depth == DEPTH_CLEAR || !depth.is_finite() {
                0
            } else {
                ((depth / depth_range).clamp(0.0, 1.0) * 255.0) as u8
            };
            Luma([level])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_cleared() {
        let fb = FrameBuffer::new(4, 3);
        assert_eq!(fb.color_buffer().len(), 12);
        assert!(fb.color_buffer().iter().all(|&c| c == colors::BACKGROUND));
        assert!(fb.depth_buffer().iter().all(|&d| d == DEPTH_CLEAR));
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.set_pixel(-1, 0, colors::RED);
        fb.set_pixel(4, 0, colors::RED);
        fb.set_pixel(0, 3, colors::RED);
        assert!(fb.color_buffer().iter().all(|&c| c == colors::BACKGROUND));
        assert_eq!(fb.get_pixel(4, 0), None);
        assert!(!fb.passes_depth_test(0, 3, 0.0));
    }

    #[test]
    fn depth_test_is_strict() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(fb.passes_depth_test(1, 1, -1000.0));
        fb.write_fragment(1, 1, 5.0, colors::RED);
        assert!(!fb.passes_depth_test(1, 1, 5.0));
        assert!(!fb.passes_depth_test(1, 1, 4.0));
        assert!(fb.passes_depth_test(1, 1, 5.5));
        assert!(!fb.passes_depth_test(1, 1, f32::NAN));
    }

    #[test]
    fn clear_resets_both_buffers() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.write_fragment(0, 0, 1.0, colors::RED);
        fb.clear();
        assert_eq!(fb.get_pixel(0, 0), Some(colors::BACKGROUND));
        assert_eq!(fb.depth(0, 0), Some(DEPTH_CLEAR));
    }

    #[test]
    fn images_are_flipped_upright() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.write_fragment(0, 0, 255.0, colors::RED);

        let color = fb.to_image();
        assert_eq!(color.get_pixel(0, 1).0, [255, 0, 0, 255]);
        assert_eq!(color.get_pixel(0, 0).0, [0, 0, 0, 255]);

        let depth = fb.depth_image(255.0);
        assert_eq!(depth.get_pixel(0, 1).0, [255]);
        assert_eq!(depth.get_pixel(1, 1).0, [0]);
    }
}
