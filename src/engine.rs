//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. It sets up
//! a [`RenderContext`] from a [`RenderConfig`], picks a shader for the
//! requested [`ShadingMode`] and feeds it every triangle of a [`Model`].

use std::fmt;
use std::path::Path;
use std::time::Instant;

use thiserror::Error;

use crate::colors;
use crate::config::{RenderConfig, ShadingMode};
use crate::light::DirectionalLight;
use crate::model::Model;
use crate::render::debug::draw_triangle_wireframe;
use crate::render::{FrameBuffer, RenderContext, Shader};
use crate::shaders::{BandedShader, GouraudShader, PhongShader, TexturedShader};
use crate::texture::Texture;

/// Errors that can occur while rendering or writing results.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{mode} shading needs a {texture} texture, but the model has none")]
    MissingTexture {
        mode: ShadingMode,
        texture: &'static str,
    },

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Counters from one [`Engine::render`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Triangles handed to the rasterizer.
    pub triangles: usize,
    /// Triangles that wrote no pixel: degenerate, off-screen, hidden or discarded.
    pub empty_triangles: usize,
    pub pixels_written: usize,
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} triangles ({} empty), {} pixels written",
            self.triangles, self.empty_triangles, self.pixels_written
        )
    }
}

pub struct Engine {
    config: RenderConfig,
    context: RenderContext,
    light: DirectionalLight,
}

impl Engine {
    pub fn new(config: RenderConfig) -> Self {
        let mut context = RenderContext::new(config.width, config.height);
        let (x, y, w, h) = config.viewport();
        context.set_viewport(x, y, w, h, config.depth_range);
        context.set_projection(config.eye_distance());
        context.set_view(config.eye, config.target, config.up);

        log::info!(
            "engine {}x{}, eye {:?} looking at {:?}",
            config.width,
            config.height,
            config.eye,
            config.target
        );

        Self {
            light: DirectionalLight::new(config.light_direction),
            config,
            context,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        self.context.framebuffer()
    }

    /// Reset both buffers. [`Engine::render`] draws on top of whatever is
    /// already there, so several models can share one frame.
    pub fn clear(&mut self) {
        self.context.clear();
    }

    /// Draw every triangle of `model` with the shader for `mode`.
    ///
    /// Fails before drawing anything if the mode needs a texture the model
    /// lacks.
    pub fn render(&mut self, model: &Model, mode: ShadingMode) -> Result<RenderStats, EngineError> {
        let start = Instant::now();
        let light = self.light;

        let stats = match mode {
            ShadingMode::Gouraud => self.draw_model(model, &mut GouraudShader::new(light)),
            ShadingMode::Textured => {
                let diffuse = require(model.diffuse(), mode, "diffuse")?;
                self.draw_model(model, &mut TexturedShader::new(light, diffuse))
            }
            ShadingMode::Banded => {
                self.draw_model(model, &mut BandedShader::new(GouraudShader::new(light)))
            }
            ShadingMode::Phong => {
                let diffuse = require(model.diffuse(), mode, "diffuse")?;
                let normal_map = require(model.normal_map(), mode, "normal map")?;
                let specular = require(model.specular(), mode, "specular")?;
                let mut shader = PhongShader::new(
                    light,
                    self.context.transforms(),
                    diffuse,
                    normal_map,
                    specular,
                );
                self.draw_model(model, &mut shader)
            }
        };

        if self.config.wireframe {
            self.draw_wireframe(model);
        }

        log::info!(
            "rendered '{}' with {mode} shading in {:.2?}: {stats}",
            model.name(),
            start.elapsed()
        );
        Ok(stats)
    }

    fn draw_model<S: Shader>(&mut self, model: &Model, shader: &mut S) -> RenderStats {
        let mut stats = RenderStats::default();
        for mesh in model.meshes() {
            for triangle in mesh.triangles() {
                let written = self.context.draw_triangle(triangle, shader);
                stats.triangles += 1;
                stats.pixels_written += written;
                if written == 0 {
                    stats.empty_triangles += 1;
                }
            }
        }
        stats
    }

    /// Outline every triangle, ignoring depth. Edges are clipped to the
    /// buffer; an edge with a corner on the eye plane is dropped.
    fn draw_wireframe(&mut self, model: &Model) {
        let transforms = *self.context.transforms();
        let framebuffer = self.context.framebuffer_mut();
        for mesh in model.meshes() {
            for triangle in mesh.triangles() {
                let points =
                    triangle.map(|v| transforms.project(v.position).perspective_divide());
                draw_triangle_wireframe(framebuffer, &points, colors::WIREFRAME);
            }
        }
    }

    /// Write the colour buffer, upright. The format follows the extension.
    pub fn save_color<P: AsRef<Path>>(&self, path: P) -> Result<(), EngineError> {
        let path = path.as_ref();
        self.framebuffer().to_image().save(path)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }

    /// Write the depth buffer as a grey image, upright.
    pub fn save_depth<P: AsRef<Path>>(&self, path: P) -> Result<(), EngineError> {
        let path = path.as_ref();
        self.framebuffer()
            .depth_image(self.config.depth_range)
            .save(path)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

fn require<'a>(
    texture: Option<&'a Texture>,
    mode: ShadingMode,
    name: &'static str,
) -> Result<&'a Texture, EngineError> {
    texture.ok_or(EngineError::MissingTexture {
        mode,
        texture: name,
    })
}
