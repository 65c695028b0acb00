//! In-memory model assembled from an OBJ source

pub mod material;
pub mod mesh;

pub use material::Material;
pub use mesh::{Face, Mesh, Vertex};

use std::fmt;

/// Ordered list of meshes from one source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    /// Meshes in file order
    pub meshes: Vec<Mesh>,
}

impl Model {
    /// Create a model from meshes
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self { meshes }
    }

    /// Look up a mesh by name (first match)
    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|mesh| mesh.name == name)
    }

    /// Total number of faces across all meshes
    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.faces.len()).sum()
    }
}

/// Tree dump of every mesh, face and corner
impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (mesh_index, mesh) in self.meshes.iter().enumerate() {
            writeln!(f, "  Mesh ( {}, {} )", mesh.name, mesh_index)?;
            for (face_index, face) in mesh.faces.iter().enumerate() {
                writeln!(f, "  Face: {face_index}")?;
                let Some(corners) = mesh.face_vertices(face) else {
                    continue;
                };
                for vertex in corners {
                    let p = vertex.position;
                    let n = vertex.normal;
                    let t = vertex.tex_coord;
                    writeln!(f, "     ├─Vertex : {}, {}, {}, {}", p.x, p.y, p.z, p.w)?;
                    writeln!(f, "     ├─Normal : {}, {}, {}", n.x, n.y, n.z)?;
                    writeln!(f, "     └─UV     : {}, {}", t.x, t.y)?;
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}
