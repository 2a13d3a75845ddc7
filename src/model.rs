//! 3D model representation: meshes plus the textures the shaders read.
//!
//! A [`Model`] is a collection of [`Mesh`] instances loaded from a single file,
//! with optional diffuse, normal and specular maps found next to it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::mesh::{LoadError, Mesh};
use crate::texture::Texture;

/// Image extensions tried, in order, for companion textures.
const TEXTURE_EXTENSIONS: [&str; 2] = ["tga", "png"];

/// A 3D model containing one or more meshes.
pub struct Model {
    name: String,
    meshes: Vec<Mesh>,
    mesh_names: HashMap<String, usize>,
    diffuse: Option<Texture>,
    normal_map: Option<Texture>,
    specular: Option<Texture>,
}

impl Model {
    /// Create a new empty model with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meshes: Vec::new(),
            mesh_names: HashMap::new(),
            diffuse: None,
            normal_map: None,
            specular: None,
        }
    }

    /// Load a model from an OBJ file.
    ///
    /// All objects/groups in the OBJ file become separate meshes within this
    /// model. Textures named `<stem>_diffuse`, `<stem>_nm` and `<stem>_spec`
    /// (`.tga` or `.png`) beside the file are loaded when present. A missing
    /// texture is logged and left empty; a texture that exists but fails to
    /// decode is an error.
    pub fn from_obj<P: AsRef<Path>>(name: impl Into<String>, file_path: P) -> Result<Self, LoadError> {
        let file_path = file_path.as_ref();
        let mut model = Self::new(name);
        for mesh in Mesh::load_all_from_obj(file_path)? {
            model.add_mesh(mesh);
        }

        model.diffuse = load_companion(file_path, "diffuse")?;
        model.normal_map = load_companion(file_path, "nm")?;
        model.specular = load_companion(file_path, "spec")?;

        log::info!(
            "model '{}': {} triangles, diffuse {}, normal map {}, specular {}",
            model.name,
            model.triangle_count(),
            loaded(&model.diffuse),
            loaded(&model.normal_map),
            loaded(&model.specular)
        );
        Ok(model)
    }

    /// Get the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ============ Mesh Access ============

    /// Get a mesh by name.
    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.mesh_names.get(name).map(|&i| &self.meshes[i])
    }

    /// Get all meshes as a slice.
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Add a mesh to this model. A mesh with the same name as an earlier one
    /// shadows it in name lookups.
    pub fn add_mesh(&mut self, mesh: Mesh) {
        let name = mesh.name().to_string();
        let index = self.meshes.len();
        self.meshes.push(mesh);
        self.mesh_names.insert(name, index);
    }

    /// Total triangles over all meshes.
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    // ============ Textures ============

    pub fn set_diffuse(&mut self, texture: Texture) {
        self.diffuse = Some(texture);
    }

    pub fn set_normal_map(&mut self, texture: Texture) {
        self.normal_map = Some(texture);
    }

    pub fn set_specular(&mut self, texture: Texture) {
        self.specular = Some(texture);
    }

    pub fn diffuse(&self) -> Option<&Texture> {
        self.diffuse.as_ref()
    }

    pub fn normal_map(&self) -> Option<&Texture> {
        self.normal_map.as_ref()
    }

    pub fn specular(&self) -> Option<&Texture> {
        self.specular.as_ref()
    }
}

fn loaded(texture: &Option<Texture>) -> &'static str {
    if texture.is_some() {
        "yes"
    } else {
        "no"
    }
}

/// Candidate paths for `<dir>/<stem>_<suffix>.<ext>`.
fn companion_paths(obj_path: &Path, suffix: &str) -> Vec<PathBuf> {
    let stem = obj_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    TEXTURE_EXTENSIONS
        .iter()
        .map(|ext| obj_path.with_file_name(format!("{stem}_{suffix}.{ext}")))
        .collect()
}

fn load_companion(obj_path: &Path, suffix: &str) -> Result<Option<Texture>, LoadError> {
    let candidates = companion_paths(obj_path, suffix);
    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => {
            log::debug!("loading texture {}", path.display());
            Ok(Some(Texture::from_file(path)?))
        }
        None => {
            log::warn!(
                "no {suffix} texture found for {} (tried {})",
                obj_path.display(),
                candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use std::fs;

    #[test]
    fn add_mesh_indexes_by_name() {
        let mut model = Model::new("test");
        model.add_mesh(Mesh::cube());
        assert_eq!(model.name(), "test");
        assert_eq!(model.meshes().len(), 1);
        assert_eq!(model.triangle_count(), 12);
        assert!(model.mesh("cube").is_some());
        assert!(model.mesh("sphere").is_none());
    }

    #[test]
    fn companion_paths_follow_naming_convention() {
        let paths = companion_paths(Path::new("obj/head.obj"), "nm");
        assert_eq!(
            paths,
            vec![
                PathBuf::from("obj/head_nm.tga"),
                PathBuf::from("obj/head_nm.png")
            ]
        );
    }

    #[test]
    fn from_obj_loads_companion_textures_when_present() {
        let dir = std::env::temp_dir().join(format!("softgl_model_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let obj = dir.join("tri.obj");
        fs::write(&obj, "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n").unwrap();
        image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]))
            .save(dir.join("tri_diffuse.png"))
            .unwrap();

        let model = Model::from_obj("tri", &obj).unwrap();
        fs::remove_dir_all(&dir).ok();

        assert_eq!(model.triangle_count(), 1);
        let diffuse = model.diffuse().unwrap();
        assert_eq!(diffuse.sample(0.5, 0.5), colors::RED);
        assert!(model.normal_map().is_none());
        assert!(model.specular().is_none());
    }
}
