//! Nyx model document encoder
//!
//! Turns an assembled [`Model`] into the interchange document read by the
//! runtime. The layout is fixed:
//!
//! ```text
//! {
//!   "<mesh name>": {
//!     "num_vertices": 3 * faces,
//!     "num_faces": faces,
//!     "vertices": [ { x, y, z, w, nx, ny, nz, u, v }, ... ],   // 3 per face
//!     "faces": [ i0, i1, i2, ... ],                           // pool indices
//!     "material": [ { name, ambient, diffuse, ... }, ... ]
//!   }
//! }
//! ```
//!
//! `vertices` is triangle soup: every face contributes its own copy of the
//! three slots it references.

use std::io::Write;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::model::{Material, Mesh, Model, Vertex};

/// One corner of a face as written to the document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    /// Position x
    pub x: f32,
    /// Position y
    pub y: f32,
    /// Position z
    pub z: f32,
    /// Position w
    pub w: f32,
    /// Normal x
    pub nx: f32,
    /// Normal y
    pub ny: f32,
    /// Normal z
    pub nz: f32,
    /// Texture u
    pub u: f32,
    /// Texture v
    pub v: f32,
}

impl From<&Vertex> for VertexRecord {
    fn from(vertex: &Vertex) -> Self {
        Self {
            x: vertex.position.x,
            y: vertex.position.y,
            z: vertex.position.z,
            w: vertex.position.w,
            nx: vertex.normal.x,
            ny: vertex.normal.y,
            nz: vertex.normal.z,
            u: vertex.tex_coord.x,
            v: vertex.tex_coord.y,
        }
    }
}

/// Material as written to the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct MaterialRecord {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub reflective: f32,
    pub shininess: f32,
    pub transparency: f32,
    pub refractiveness: f32,
    pub ambient_tex: String,
    pub diffuse_tex: String,
    pub specular_tex: String,
    pub reflective_tex: String,
    pub shininess_tex: String,
    pub displacement_tex: String,
    pub alpha_tex: String,
    pub bump_tex: String,
    pub highlight_tex: String,
}

impl From<&Material> for MaterialRecord {
    fn from(material: &Material) -> Self {
        Self {
            name: material.name.clone(),
            ambient: material.ambient,
            diffuse: material.diffuse,
            specular: material.specular,
            reflective: material.reflective,
            shininess: material.shininess,
            transparency: material.transparency,
            refractiveness: material.refractiveness,
            ambient_tex: material.ambient_tex.clone(),
            diffuse_tex: material.diffuse_tex.clone(),
            specular_tex: material.specular_tex.clone(),
            reflective_tex: material.reflective_tex.clone(),
            shininess_tex: material.shininess_tex.clone(),
            displacement_tex: material.displacement_tex.clone(),
            alpha_tex: material.alpha_tex.clone(),
            bump_tex: material.bump_tex.clone(),
            highlight_tex: material.highlight_tex.clone(),
        }
    }
}

/// Per-mesh record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshRecord {
    /// Number of entries in `vertices`
    pub num_vertices: usize,
    /// Number of triangles
    pub num_faces: usize,
    /// Corner-expanded vertex list, three per face
    pub vertices: Vec<VertexRecord>,
    /// Position pool indices, three per face
    pub faces: Vec<usize>,
    /// Bound materials in binding order
    pub material: Vec<MaterialRecord>,
}

impl MeshRecord {
    /// Encode one mesh
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut vertices = Vec::with_capacity(mesh.faces.len() * 3);
        let mut faces = Vec::with_capacity(mesh.faces.len() * 3);
        let mut num_faces = 0;

        for face in &mesh.faces {
            let Some(corners) = mesh.face_vertices(face) else {
                log::warn!("Mesh '{}': dropping face {:?} with an out-of-range index", mesh.name, face.indices);
                continue;
            };
            vertices.extend(corners.into_iter().map(VertexRecord::from));
            faces.extend_from_slice(&face.indices);
            num_faces += 1;
        }

        Self {
            num_vertices: vertices.len(),
            num_faces,
            vertices,
            faces,
            material: mesh.materials.iter().map(MaterialRecord::from).collect(),
        }
    }
}

/// Encoded model: mesh name -> record, in model order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    meshes: Vec<(String, MeshRecord)>,
}

impl Document {
    /// Insert a record; an existing name keeps its position but takes the
    /// new record
    pub fn insert(&mut self, name: impl Into<String>, record: MeshRecord) {
        let name = name.into();
        match self.meshes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => {
                log::warn!("Duplicate mesh name '{}', keeping the last definition", name);
                *slot = record;
            }
            None => self.meshes.push((name, record)),
        }
    }

    /// Record for a mesh name
    pub fn get(&self, name: &str) -> Option<&MeshRecord> {
        self.meshes.iter().find(|(existing, _)| existing == name).map(|(_, record)| record)
    }

    /// Mesh names in document order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.meshes.iter().map(|(name, _)| name.as_str())
    }

    /// Number of mesh records
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the document holds no meshes
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Serialize to a JSON string (2-space indentation when `pretty`)
    pub fn to_json(&self, pretty: bool) -> ModelResult<String> {
        let json = if pretty { serde_json::to_string_pretty(self)? } else { serde_json::to_string(self)? };
        Ok(json)
    }

    /// Serialize as JSON into `writer`
    pub fn write_to(&self, writer: impl Write, pretty: bool) -> ModelResult<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_json::to_writer(writer, self)?;
        }
        Ok(())
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.meshes.len()))?;
        for (name, record) in &self.meshes {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

/// Encode a fully assembled model
pub fn encode(model: &Model) -> Document {
    let mut document = Document::default();
    for mesh in &model.meshes {
        document.insert(mesh.name.clone(), MeshRecord::from_mesh(mesh));
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec2, Vec3};
    use crate::model::Face;

    fn shared_corner_mesh() -> Mesh {
        let mut vertices = vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
            Vertex::new(1.0, 1.0, 0.0),
        ];
        vertices[1].set_normal(Vec3::new(0.0, 0.0, 1.0));
        vertices[2].set_tex_coord(Vec2::new(0.5, 0.5));

        Mesh {
            name: "Quad".to_string(),
            vertices,
            faces: vec![Face::new(0, 1, 2), Face::new(1, 3, 2)],
            materials: vec![Material::new("Red").with_diffuse(1.0, 0.0, 0.0)],
        }
    }

    #[test]
    fn test_corner_expansion() {
        let record = MeshRecord::from_mesh(&shared_corner_mesh());

        assert_eq!(record.num_faces, 2);
        assert_eq!(record.num_vertices, 6);
        assert_eq!(record.vertices.len(), 6);
        assert_eq!(record.faces, vec![0, 1, 2, 1, 3, 2]);
        assert_eq!(record.vertices[1], record.vertices[3]);
        assert_eq!(record.vertices[1].nz, 1.0);
        assert_eq!(record.vertices[5].u, 0.5);
        assert_eq!(record.vertices[4].w, 1.0);
    }

    #[test]
    fn test_face_outside_pool_is_dropped_whole() {
        let mut mesh = shared_corner_mesh();
        mesh.faces.push(Face::new(0, 1, 9));
        let record = MeshRecord::from_mesh(&mesh);

        assert_eq!(record.num_faces, 2);
        assert_eq!(record.num_vertices, 3 * record.num_faces);
        assert_eq!(record.faces.len(), record.vertices.len());
        assert_eq!(record.faces, vec![0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn test_vertex_fields_always_present_in_order() {
        let document = encode(&Model::new(vec![shared_corner_mesh()]));
        let json = document.to_json(false).unwrap();

        assert!(json.contains(r#"{"x":0.0,"y":0.0,"z":0.0,"w":1.0,"nx":0.0,"ny":0.0,"nz":0.0,"u":0.0,"v":0.0}"#));
    }

    #[test]
    fn test_material_full_field_set() {
        let document = encode(&Model::new(vec![shared_corner_mesh()]));
        let value: serde_json::Value = serde_json::from_str(&document.to_json(true).unwrap()).unwrap();
        let material = &value["Quad"]["material"][0];

        assert_eq!(material.as_object().unwrap().len(), 17);
        assert_eq!(material["name"], "Red");
        assert_eq!(material["diffuse"], serde_json::json!([1.0, 0.0, 0.0]));
        assert_eq!(material["transparency"], 1.0);
        assert_eq!(material["bump_tex"], "");
    }

    #[test]
    fn test_record_key_order() {
        let json = encode(&Model::new(vec![shared_corner_mesh()])).to_json(false).unwrap();
        let keys = ["\"num_vertices\"", "\"num_faces\"", "\"vertices\"", "\"faces\"", "\"material\""];
        let positions: Vec<usize> = keys.iter().map(|key| json.find(key).unwrap()).collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_meshes_keep_model_order_and_last_duplicate_wins() {
        let mut first = shared_corner_mesh();
        first.name = "B".to_string();
        let mut second = shared_corner_mesh();
        second.name = "A".to_string();
        let mut duplicate = shared_corner_mesh();
        duplicate.name = "B".to_string();
        duplicate.faces.truncate(1);

        let document = encode(&Model::new(vec![first, second, duplicate]));
        assert_eq!(document.names().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(document.get("B").unwrap().num_faces, 1);

        let json = document.to_json(false).unwrap();
        assert!(json.find("\"B\"").unwrap() < json.find("\"A\"").unwrap());
    }

    #[test]
    fn test_empty_model() {
        let document = encode(&Model::default());
        assert!(document.is_empty());
        assert_eq!(document.to_json(false).unwrap(), "{}");
    }

    #[test]
    fn test_write_to_pretty_uses_two_spaces() {
        let mut out = Vec::new();
        encode(&Model::new(vec![shared_corner_mesh()])).write_to(&mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("{\n  \"Quad\": {\n    \"num_vertices\": 6"));
    }
}
