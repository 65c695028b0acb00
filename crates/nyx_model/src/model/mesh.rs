//! Mesh representation produced by the OBJ parser
//!
//! A mesh keeps the position pool as written in the source file. Normals and
//! texture coordinates are folded onto position slots as faces reference
//! them, so a slot shared by several corners ends up with whichever
//! normal/UV was resolved last. Sources that need per-corner attributes must
//! split shared positions before conversion.

use super::Material;
use crate::foundation::math::{Vec2, Vec3, Vec4};

/// Position slot with the normal and UV most recently attached to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Homogeneous position, w defaults to 1.0
    pub position: Vec4,
    /// Attached normal, zero until a face corner sets it
    pub normal: Vec3,
    /// Attached texture coordinate, zero until a face corner sets it
    pub tex_coord: Vec2,
}

impl Vertex {
    /// Create a slot at `(x, y, z)` with w = 1.0
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self::with_w(x, y, z, 1.0)
    }

    /// Create a slot with an explicit w component
    pub fn with_w(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            position: Vec4::new(x, y, z, w),
            normal: Vec3::zeros(),
            tex_coord: Vec2::zeros(),
        }
    }

    /// Overwrite the attached normal
    pub fn set_normal(&mut self, normal: Vec3) {
        self.normal = normal;
    }

    /// Overwrite the attached texture coordinate
    pub fn set_tex_coord(&mut self, tex_coord: Vec2) {
        self.tex_coord = tex_coord;
    }
}

/// Triangle referencing three slots of its mesh's position pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// 0-based position pool indices
    pub indices: [usize; 3],
    /// Index into the mesh's material list that was active when the face
    /// was parsed. Not part of the encoded document.
    pub material: Option<usize>,
}

impl Face {
    /// Create a face with no active material
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { indices: [a, b, c], material: None }
    }
}

/// Named mesh: position pool, faces, and bound materials
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Mesh name (from `o`, or the configured default)
    pub name: String,
    /// Position pool with attached normals/UVs
    pub vertices: Vec<Vertex>,
    /// Triangles in file order
    pub faces: Vec<Face>,
    /// Materials in `usemtl` encounter order
    pub materials: Vec<Material>,
}

impl Mesh {
    /// Resolve the three slots a face references
    ///
    /// Returns `None` if any index is outside the pool; meshes built by the
    /// parser never contain such faces.
    pub fn face_vertices(&self, face: &Face) -> Option<[&Vertex; 3]> {
        let [a, b, c] = face.indices;
        Some([self.vertices.get(a)?, self.vertices.get(b)?, self.vertices.get(c)?])
    }
}
