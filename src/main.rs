use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use softgl::{Engine, Model, RenderConfig, ShadingMode};

const USAGE: &str = "usage: softgl [-m model.obj] [-s gouraud|textured|banded|phong] \
[-o output.tga] [-d depth.tga] [-W width] [-H height] [--wireframe]";

/// Largest accepted output side, in pixels.
const MAX_DIMENSION: u32 = 16_384;

#[derive(Debug, PartialEq)]
struct Options {
    model: PathBuf,
    shading: ShadingMode,
    output: PathBuf,
    depth: Option<PathBuf>,
    width: u32,
    height: u32,
    wireframe: bool,
}

impl Default for Options {
    fn default() -> Self {
        let config = RenderConfig::default();
        Self {
            model: PathBuf::from("obj/african_head.obj"),
            shading: ShadingMode::Phong,
            output: PathBuf::from("output.tga"),
            depth: None,
            width: config.width,
            height: config.height,
            wireframe: false,
        }
    }
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .with_context(|| format!("{flag} expects a value\n{USAGE}"))
        };
        match flag.as_str() {
            "-m" => options.model = value()?.into(),
            "-s" => options.shading = value()?.parse()?,
            "-o" => options.output = value()?.into(),
            "-d" => options.depth = Some(value()?.into()),
            "-W" => options.width = value()?.parse().context("invalid width")?,
            "-H" => options.height = value()?.parse().context("invalid height")?,
            "--wireframe" => options.wireframe = true,
            other => bail!("unknown argument '{other}'\n{USAGE}"),
        }
    }

    if options.width == 0 || options.height == 0 {
        bail!("output size must be at least 1x1");
    }
    if options.width > MAX_DIMENSION || options.height > MAX_DIMENSION {
        bail!(
            "output size {}x{} exceeds the {MAX_DIMENSION}x{MAX_DIMENSION} limit",
            options.width,
            options.height
        );
    }
    Ok(options)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args(env::args().skip(1))?;
    log::debug!("{options:?}");

    let name = options
        .model
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());
    let model = Model::from_obj(name, &options.model)
        .with_context(|| format!("loading {}", options.model.display()))?;

    let mut engine = Engine::new(RenderConfig {
        width: options.width,
        height: options.height,
        wireframe: options.wireframe,
        ..RenderConfig::default()
    });
    engine.render(&model, options.shading)?;

    engine.save_color(&options.output)?;
    if let Some(depth) = &options.depth {
        engine.save_depth(depth)?;
    }
    Ok(())
}
