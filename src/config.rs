//! Scene and output settings for the [`Engine`](crate::engine::Engine).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::math::vec3::Vec3;

/// Which shader the engine draws a model with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Per-vertex diffuse lighting on white.
    #[default]
    Gouraud,
    /// Per-vertex lighting modulating the diffuse texture.
    Textured,
    /// Per-vertex lighting snapped to a handful of flat bands.
    Banded,
    /// Per-pixel lighting from normal and specular maps.
    Phong,
}

impl ShadingMode {
    pub const ALL: [ShadingMode; 4] = [
        ShadingMode::Gouraud,
        ShadingMode::Textured,
        ShadingMode::Banded,
        ShadingMode::Phong,
    ];
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadingMode::Gouraud => write!(f, "gouraud"),
            ShadingMode::Textured => write!(f, "textured"),
            ShadingMode::Banded => write!(f, "banded"),
            ShadingMode::Phong => write!(f, "phong"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown shading mode '{0}' (expected gouraud, textured, banded or phong)")]
pub struct ParseShadingModeError(String);

impl FromStr for ShadingMode {
    type Err = ParseShadingModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gouraud" => Ok(ShadingMode::Gouraud),
            "textured" => Ok(ShadingMode::Textured),
            "banded" | "toon" => Ok(ShadingMode::Banded),
            "phong" => Ok(ShadingMode::Phong),
            _ => Err(ParseShadingModeError(s.to_string())),
        }
    }
}

/// Output size, camera and light for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Direction towards the light. Normalized when the light is built.
    pub light_direction: Vec3,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Viewport depth: projected depths land in `[0, depth_range]`.
    pub depth_range: f32,
    /// Draw triangle edges over the shaded image.
    pub wireframe: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            light_direction: Vec3::new(1.0, -1.0, 1.0).normalize(),
            eye: Vec3::new(1.0, 1.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            depth_range: 255.0,
            wireframe: false,
        }
    }
}

impl RenderConfig {
    /// Viewport `(x, y, w, h)`: the central three quarters of the output.
    pub fn viewport(&self) -> (f32, f32, f32, f32) {
        let (w, h) = (self.width as f32, self.height as f32);
        (w / 8.0, h / 8.0, w * 3.0 / 4.0, h * 3.0 / 4.0)
    }

    /// Distance from the eye to the target, used as the projection parameter.
    pub fn eye_distance(&self) -> f32 {
        (self.eye - self.target).magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn shading_mode_round_trips_through_strings() {
        for mode in ShadingMode::ALL {
            assert_eq!(mode.to_string().parse::<ShadingMode>(), Ok(mode));
        }
        assert_eq!("PHONG".parse::<ShadingMode>(), Ok(ShadingMode::Phong));
        assert_eq!("toon".parse::<ShadingMode>(), Ok(ShadingMode::Banded));
        assert!("flat".parse::<ShadingMode>().is_err());
    }

    #[test]
    fn default_scene() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (800, 800));
        assert_relative_eq!(config.light_direction.magnitude(), 1.0, epsilon = 1e-6);
        assert_eq!(config.viewport(), (100.0, 100.0, 600.0, 600.0));
        assert_relative_eq!(config.eye_distance(), 11.0f32.sqrt());
        assert!(!config.wireframe);
    }
}
