//! Indexed triangle meshes and OBJ loading.

use std::path::Path;

use thiserror::Error;

use crate::math::{vec2::Vec2, vec3::Vec3};
use crate::texture::TextureError;
use crate::vertex::Vertex;

/// Errors that can occur while loading geometry and its textures.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("OBJ parse error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("No triangles found in {0}")]
    NoGeometry(String),

    #[error("Index {index} out of range for mesh with {count} vertices")]
    IndexOutOfRange { index: u32, count: usize },

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),
}

/// A named triangle list over a shared vertex array.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    name: String,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Build a mesh from vertices and a flat index list, three per triangle.
    /// A trailing partial triangle is dropped.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vertex>,
        mut indices: Vec<u32>,
    ) -> Result<Self, LoadError> {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(LoadError::IndexOutOfRange {
                index,
                count: vertices.len(),
            });
        }
        indices.truncate(indices.len() - indices.len() % 3);
        Ok(Self {
            name: name.into(),
            vertices,
            indices,
        })
    }

    /// Load every object in an OBJ file as a separate mesh.
    ///
    /// Faces are triangulated and positions, normals and texture coordinates
    /// share one index. Missing normals or texture coordinates become zero.
    pub fn load_all_from_obj<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>, LoadError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;

        let meshes = models
            .into_iter()
            .filter(|model| !model.mesh.indices.is_empty())
            .map(|model| Self::from_tobj(model.name, &model.mesh))
            .collect::<Result<Vec<_>, _>>()?;

        if meshes.is_empty() {
            return Err(LoadError::NoGeometry(path.display().to_string()));
        }
        log::info!(
            "loaded {} mesh(es), {} triangles from {}",
            meshes.len(),
            meshes.iter().map(Mesh::triangle_count).sum::<usize>(),
            path.display()
        );
        Ok(meshes)
    }

    fn from_tobj(name: String, mesh: &tobj::Mesh) -> Result<Self, LoadError> {
        let count = mesh.positions.len() / 3;
        let vec3_at = |data: &[f32], i: usize| {
            data.get(i * 3..i * 3 + 3)
                .map_or(Vec3::ZERO, |c| Vec3::new(c[0], c[1], c[2]))
        };
        let vec2_at = |data: &[f32], i: usize| {
            data.get(i * 2..i * 2 + 2)
                .map_or(Vec2::ZERO, |c| Vec2::new(c[0], c[1]))
        };

        let vertices = (0..count)
            .map(|i| {
                Vertex::new(
                    vec3_at(&mesh.positions, i),
                    vec3_at(&mesh.normals, i),
                    vec2_at(&mesh.texcoords, i),
                )
            })
            .collect();

        Self::new(name, vertices, mesh.indices.clone())
    }

    /// A 2x2x2 cube centred on the origin with flat face normals.
    pub fn cube() -> Self {
        const CORNERS: [Vec3; 8] = [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
        ];
        // Two triangles per face: corner indices a, b, c, d as (a, b, c), (a, c, d).
        const FACES: [([usize; 4], Vec3); 6] = [
            ([0, 1, 2, 3], Vec3::new(0.0, 0.0, -1.0)), // front
            ([3, 2, 4, 5], Vec3::new(1.0, 0.0, 0.0)),  // right
            ([5, 4, 6, 7], Vec3::new(0.0, 0.0, 1.0)),  // back
            ([7, 6, 1, 0], Vec3::new(-1.0, 0.0, 0.0)), // left
            ([1, 6, 4, 2], Vec3::new(0.0, 1.0, 0.0)),  // top
            ([5, 7, 0, 3], Vec3::new(0.0, -1.0, 0.0)), // bottom
        ];
        const UVS: [Vec2; 4] = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (corners, normal) in FACES {
            let base = vertices.len() as u32;
            for (corner, uv) in corners.into_iter().zip(UVS) {
                vertices.push(Vertex::new(CORNERS[corner], normal, uv));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            name: "cube".to_string(),
            vertices,
            indices,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The mesh's triangles, three resolved vertices each.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }
}
