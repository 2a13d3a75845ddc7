//! Textures sampled by fragment stages: diffuse colour, tangent-free normal
//! maps and specular exponent maps.

use std::path::Path;

use thiserror::Error;

use crate::colors;
use crate::math::vec3::Vec3;

/// Errors that can occur while building a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Texture has {actual} pixels, expected {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },

    #[error("Texture must be at least 1x1")]
    Empty,
}

/// Represents a 2D texture for texture mapping.
#[derive(Clone, Debug)]
pub struct Texture {
    data: Vec<u32>, // The pixel data of the texture in ARGB format.
    width: u32,     // The width of the texture in pixels.
    height: u32,    // The height of the texture in pixels.
}

impl Texture {
    /// Build a texture from ARGB pixels stored row-major, top row first.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        if data.len() != width as usize * height as usize {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Load a texture from an image file (PNG, TGA, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                colors::from_argb_bytes(a, r, g, b)
            })
            .collect();

        Self::from_pixels(width, height, data)
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// # UV Coordinate Convention
    /// - UV coordinates are in [0,1] range
    /// - (0,0) = bottom-left in OBJ convention, but textures are stored top-left origin
    /// - We flip V to correct for this: v_corrected = 1.0 - v
    ///
    /// # Wrapping
    /// Uses repeat/wrap mode via rem_euclid for UVs outside [0,1]
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let u = u.rem_euclid(1.0);
        let v = (1.0 - v).rem_euclid(1.0);

        // Convert normalized [0,1) UV to pixel coordinates [0, width-1]
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);

        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Decode an RGB texel into a direction with components in [-1, 1].
    pub fn sample_normal(&self, u: f32, v: f32) -> Vec3 {
        let (r, g, b) = colors::unpack_color(self.sample(u, v));
        Vec3::new(r * 2.0 - 1.0, g * 2.0 - 1.0, b * 2.0 - 1.0)
    }

    /// The first colour channel as an integer-valued scalar in [0, 255].
    pub fn sample_scalar(&self, u: f32, v: f32) -> f32 {
        colors::to_argb_bytes(self.sample(u, v))[1] as f32
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Top row red/green, bottom row blue/white.
    fn checker() -> Texture {
        Texture::from_pixels(
            2,
            2,
            vec![colors::RED, colors::GREEN, colors::BLUE, colors::WHITE],
        )
        .unwrap()
    }

    #[test]
    fn sample_flips_v() {
        let tex = checker();
        assert_eq!(tex.sample(0.25, 0.25), colors::BLUE);
        assert_eq!(tex.sample(0.75, 0.25), colors::WHITE);
        assert_eq!(tex.sample(0.25, 0.75), colors::RED);
        assert_eq!(tex.sample(0.75, 0.75), colors::GREEN);
    }

    #[test]
    fn sample_wraps_out_of_range_uv() {
        let tex = checker();
        assert_eq!(tex.sample(1.25, -0.75), tex.sample(0.25, 0.25));
    }

    #[test]
    fn sample_normal_decodes_to_unit_range() {
        let tex = Texture::from_pixels(1, 1, vec![0xFF_80_80_FF]).unwrap();
        let n = tex.sample_normal(0.5, 0.5);
        assert_relative_eq!(n.x, 0.0, epsilon = 0.01);
        assert_relative_eq!(n.y, 0.0, epsilon = 0.01);
        assert_relative_eq!(n.z, 1.0);
    }

    #[test]
    fn sample_scalar_reads_first_channel() {
        let tex = Texture::from_pixels(1, 1, vec![0xFF_20_00_00]).unwrap();
        assert_eq!(tex.sample_scalar(0.0, 0.0), 32.0);
    }

    #[test]
    fn from_pixels_checks_size_of_huge_textures() {
        assert!(matches!(
            Texture::from_pixels(70_000, 70_000, vec![0; 4]),
            Err(TextureError::SizeMismatch {
                width: 70_000,
                height: 70_000,
                actual: 4
            })
        ));
    }

    #[test]
    fn from_pixels_rejects_wrong_size() {
        assert!(matches!(
            Texture::from_pixels(2, 2, vec![0; 3]),
            Err(TextureError::SizeMismatch { actual: 3, .. })
        ));
        assert!(matches!(
            Texture::from_pixels(0, 2, vec![]),
            Err(TextureError::Empty)
        ));
    }
}
