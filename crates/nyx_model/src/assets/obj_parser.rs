//! OBJ geometry parser
//!
//! Consumes tokenized OBJ directives one at a time and accumulates the mesh
//! under construction in a [`MeshBuilder`]. Only triangulated input with
//! positive 1-based indices is accepted.
//!
//! Normals and texture coordinates are written onto the referenced position
//! slot when a face corner names them. A slot shared by corners with
//! different normal/UV indices keeps the last one resolved.
//!
//! A lossless variant would key emitted vertices by the full
//! (position, uv, normal) index tuple with a dedup map; the document format
//! would not change, only the slot pool would grow.

use crate::assets::materials::MaterialLibrary;
use crate::assets::tokenizer::Directive;
use crate::error::{ModelError, ModelResult, Pool};
use crate::foundation::math::{Vec2, Vec3};
use crate::model::{Face, Material, Mesh, Vertex};

/// Accumulator for the mesh currently being parsed
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    name: String,
    positions: Vec<Vertex>,
    normals: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    faces: Vec<Face>,
    materials: Vec<Material>,
    active_material: Option<usize>,
}

impl MeshBuilder {
    /// Create an empty builder for a mesh called `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Name the finished mesh will carry
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the mesh under construction
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether any position has been added since the last reset
    pub fn has_geometry(&self) -> bool {
        !self.positions.is_empty()
    }

    /// Finish the current mesh and reset every pool, starting `next_name`
    pub fn take(&mut self, next_name: impl Into<String>) -> Mesh {
        let builder = std::mem::replace(self, Self::new(next_name));
        builder.build()
    }

    /// Consume the builder into a mesh
    pub fn build(self) -> Mesh {
        Mesh {
            name: self.name,
            vertices: self.positions,
            faces: self.faces,
            materials: self.materials,
        }
    }
}

/// Stateful OBJ directive consumer
pub struct ObjParser {
    builder: MeshBuilder,
}

impl ObjParser {
    /// Create a parser whose first mesh is called `default_name`
    pub fn new(default_name: impl Into<String>) -> Self {
        Self { builder: MeshBuilder::new(default_name) }
    }

    /// Mesh under construction
    pub fn builder(&self) -> &MeshBuilder {
        &self.builder
    }

    /// Process one directive
    ///
    /// Returns the finished mesh when an `o` directive closes a mesh that has
    /// geometry. `mtllib` is the assembler's business and is ignored here, as
    /// is any directive the converter does not understand.
    pub fn process(
        &mut self,
        directive: &Directive<'_>,
        materials: &MaterialLibrary,
    ) -> ModelResult<Option<Mesh>> {
        match directive.keyword {
            "o" => return Ok(self.begin_object(directive.arg(0)?)),
            "v" => {
                let [x, y, z] = directive.vec3_args(0)?;
                let w = match directive.args.get(3) {
                    Some(_) => directive.f32_arg(3)?,
                    None => 1.0,
                };
                self.builder.positions.push(Vertex::with_w(x, y, z, w));
            }
            "vt" => {
                let u = directive.f32_arg(0)?;
                let v = directive.f32_arg(1)?;
                self.builder.tex_coords.push(Vec2::new(u, v));
            }
            "vn" => {
                let [x, y, z] = directive.vec3_args(0)?;
                self.builder.normals.push(Vec3::new(x, y, z));
            }
            "usemtl" => self.bind_material(directive.arg(0)?, materials),
            "f" => self.parse_face(directive)?,
            _ => {}
        }
        Ok(None)
    }

    /// Close the parser, returning the last mesh if it has geometry
    pub fn finish(self) -> Option<Mesh> {
        if self.builder.has_geometry() {
            let mesh = self.builder.build();
            log::debug!("Finished mesh '{}' ({} positions, {} faces)", mesh.name, mesh.vertices.len(), mesh.faces.len());
            Some(mesh)
        } else {
            None
        }
    }

    fn begin_object(&mut self, name: &str) -> Option<Mesh> {
        if !self.builder.has_geometry() {
            self.builder.set_name(name);
            return None;
        }
        let mesh = self.builder.take(name);
        log::debug!("Finished mesh '{}' ({} positions, {} faces)", mesh.name, mesh.vertices.len(), mesh.faces.len());
        Some(mesh)
    }

    fn bind_material(&mut self, name: &str, materials: &MaterialLibrary) {
        match materials.get(name) {
            Some(material) => {
                self.builder.materials.push(material.clone());
                self.builder.active_material = Some(self.builder.materials.len() - 1);
            }
            None => log::debug!("usemtl '{}' not found in loaded libraries, skipping", name),
        }
    }

    fn parse_face(&mut self, directive: &Directive<'_>) -> ModelResult<()> {
        let line = directive.line;
        if directive.args.len() != 3 {
            return Err(ModelError::format(
                line,
                format!("face has {} corners, only triangles are supported", directive.args.len()),
            ));
        }

        let mut indices = [0usize; 3];
        for (slot, token) in indices.iter_mut().zip(&directive.args) {
            *slot = self.resolve_corner(line, token)?;
        }

        let mut face = Face::new(indices[0], indices[1], indices[2]);
        face.material = self.builder.active_material;
        self.builder.faces.push(face);
        Ok(())
    }

    /// Resolve `p[/t[/n]]`, attaching UV and normal to the position slot
    fn resolve_corner(&mut self, line: usize, token: &str) -> ModelResult<usize> {
        let parts: Vec<&str> = token.split('/').collect();
        if parts.len() > 3 {
            return Err(ModelError::format(line, format!("malformed face corner '{token}'")));
        }

        let position = match parse_index(line, parts[0])? {
            Some(index) => to_offset(line, Pool::Position, index, self.builder.positions.len())?,
            None => return Err(ModelError::format(line, format!("face corner '{token}' has no position index"))),
        };

        if let Some(index) = parts.get(1).map(|part| parse_index(line, part)).transpose()?.flatten() {
            let offset = to_offset(line, Pool::TexCoord, index, self.builder.tex_coords.len())?;
            let tex_coord = self.builder.tex_coords[offset];
            self.builder.positions[position].set_tex_coord(tex_coord);
        }

        if let Some(index) = parts.get(2).map(|part| parse_index(line, part)).transpose()?.flatten() {
            let offset = to_offset(line, Pool::Normal, index, self.builder.normals.len())?;
            let normal = self.builder.normals[offset];
            self.builder.positions[position].set_normal(normal);
        }

        Ok(position)
    }
}

/// Parse one 1-based index component; an empty component means "absent"
fn parse_index(line: usize, part: &str) -> ModelResult<Option<usize>> {
    if part.is_empty() {
        return Ok(None);
    }
    if part.starts_with('-') {
        return Err(ModelError::unsupported(line, format!("relative index '{part}'")));
    }
    part.parse::<usize>()
        .map(Some)
        .map_err(|_| ModelError::format(line, format!("invalid index '{part}'")))
}

/// Convert a 1-based index into a checked 0-based offset
fn to_offset(line: usize, pool: Pool, index: usize, len: usize) -> ModelResult<usize> {
    if index == 0 || index > len {
        return Err(ModelError::Reference { line, pool, index, len });
    }
    Ok(index - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tokenizer::tokenize;
    use approx::assert_relative_eq;

    fn run(source: &str, materials: &MaterialLibrary) -> ModelResult<Vec<Mesh>> {
        let mut parser = ObjParser::new("unnamed");
        let mut meshes = Vec::new();
        for (i, line) in source.lines().enumerate() {
            if let Some(directive) = tokenize(i + 1, line) {
                meshes.extend(parser.process(&directive, materials)?);
            }
        }
        meshes.extend(parser.finish());
        Ok(meshes)
    }

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\n";

    #[test]
    fn test_positions_default_w() {
        let meshes = run("v 1 2 3\nv 4 5 6 0.5\n", &MaterialLibrary::new()).unwrap();
        let vertices = &meshes[0].vertices;
        assert_relative_eq!(vertices[0].position.w, 1.0);
        assert_relative_eq!(vertices[1].position.w, 0.5);
        assert_relative_eq!(vertices[1].position.z, 6.0);
    }

    #[test]
    fn test_face_resolves_uv_and_normal() {
        let source = format!("{TRIANGLE}vt 0.25 0.75\nvn 0 0 1\nf 1/1/1 2 3//1\n");
        let meshes = run(&source, &MaterialLibrary::new()).unwrap();
        let mesh = &meshes[0];

        assert_eq!(mesh.faces, vec![Face::new(0, 1, 2)]);
        assert_relative_eq!(mesh.vertices[0].tex_coord, Vec2::new(0.25, 0.75));
        assert_relative_eq!(mesh.vertices[0].normal, Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(mesh.vertices[1].normal, Vec3::zeros());
        assert_relative_eq!(mesh.vertices[2].tex_coord, Vec2::zeros());
        assert_relative_eq!(mesh.vertices[2].normal, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_shared_slot_last_write_wins() {
        let source = format!("{TRIANGLE}v 1 1 0\nvn 0 0 1\nvn 0 0 -1\nf 1//1 2//1 3//1\nf 2//2 4//2 3//2\n");
        let meshes = run(&source, &MaterialLibrary::new()).unwrap();
        let mesh = &meshes[0];

        assert_relative_eq!(mesh.vertices[0].normal, Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(mesh.vertices[1].normal, Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(mesh.vertices[2].normal, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_object_boundaries_split_pools() {
        let source = format!("o First\n{TRIANGLE}f 1 2 3\no Second\nv 5 5 5\nv 6 6 6\nv 7 7 7\nf 3 2 1\n");
        let meshes = run(&source, &MaterialLibrary::new()).unwrap();

        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].name, "First");
        assert_eq!(meshes[1].name, "Second");
        assert_eq!(meshes[1].vertices.len(), 3);
        assert_eq!(meshes[1].faces, vec![Face::new(2, 1, 0)]);
        assert_relative_eq!(meshes[1].vertices[0].position.x, 5.0);
    }

    #[test]
    fn test_leading_geometry_uses_default_name() {
        let source = format!("{TRIANGLE}f 1 2 3\no Named\n{TRIANGLE}");
        let meshes = run(&source, &MaterialLibrary::new()).unwrap();
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].name, "unnamed");
        assert_eq!(meshes[1].name, "Named");
    }

    #[test]
    fn test_empty_objects_are_not_emitted() {
        let meshes = run("o Ghost\no Real\nv 0 0 0\no Trailing\n", &MaterialLibrary::new()).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].name, "Real");
    }

    #[test]
    fn test_reset_makes_indices_mesh_local() {
        let source = format!("o A\n{TRIANGLE}o B\nv 0 0 0\nf 1 2 3\n");
        let err = run(&source, &MaterialLibrary::new()).unwrap_err();
        assert!(matches!(err, ModelError::Reference { pool: Pool::Position, index: 2, len: 1, .. }));
    }

    #[test]
    fn test_usemtl_binds_known_materials_only() {
        let mut materials = MaterialLibrary::new();
        materials.merge_str("newmtl Red\nKd 1 0 0\n").unwrap();

        let source = format!("{TRIANGLE}f 1 2 3\nusemtl Missing\nusemtl Red\nf 3 2 1\n");
        let meshes = run(&source, &materials).unwrap();
        let mesh = &meshes[0];

        assert_eq!(mesh.materials.len(), 1);
        assert_eq!(mesh.materials[0].name, "Red");
        assert_eq!(mesh.faces[0].material, None);
        assert_eq!(mesh.faces[1].material, Some(0));
    }

    #[test]
    fn test_position_out_of_range() {
        let err = run("v 0 0 0\nv 1 0 0\nf 1 2 3\n", &MaterialLibrary::new()).unwrap_err();
        assert!(matches!(err, ModelError::Reference { line: 3, pool: Pool::Position, index: 3, len: 2 }));
    }

    #[test]
    fn test_zero_index_is_reference_error() {
        let source = format!("{TRIANGLE}f 0 1 2\n");
        let err = run(&source, &MaterialLibrary::new()).unwrap_err();
        assert!(matches!(err, ModelError::Reference { index: 0, .. }));
    }

    #[test]
    fn test_uv_and_normal_out_of_range() {
        let source = format!("{TRIANGLE}f 1/1 2 3\n");
        let err = run(&source, &MaterialLibrary::new()).unwrap_err();
        assert!(matches!(err, ModelError::Reference { pool: Pool::TexCoord, .. }));

        let source = format!("{TRIANGLE}vn 0 1 0\nf 1//2 2 3\n");
        let err = run(&source, &MaterialLibrary::new()).unwrap_err();
        assert!(matches!(err, ModelError::Reference { pool: Pool::Normal, index: 2, len: 1, .. }));
    }

    #[test]
    fn test_quad_is_rejected() {
        let source = format!("{TRIANGLE}v 1 1 0\nf 1 2 4 3\n");
        let err = run(&source, &MaterialLibrary::new()).unwrap_err();
        assert!(matches!(err, ModelError::Format { line: 5, .. }));
    }

    #[test]
    fn test_negative_index_is_unsupported() {
        let source = format!("{TRIANGLE}f -3 -2 -1\n");
        let err = run(&source, &MaterialLibrary::new()).unwrap_err();
        assert!(matches!(err, ModelError::Unsupported { .. }));
    }

    #[test]
    fn test_malformed_numbers() {
        let err = run("v 0 zero 0\n", &MaterialLibrary::new()).unwrap_err();
        assert!(matches!(err, ModelError::Format { line: 1, .. }));

        let source = format!("{TRIANGLE}f 1 a 3\n");
        let err = run(&source, &MaterialLibrary::new()).unwrap_err();
        assert!(matches!(err, ModelError::Format { .. }));

        let source = format!("{TRIANGLE}f 1/1/1/1 2 3\n");
        let err = run(&source, &MaterialLibrary::new()).unwrap_err();
        assert!(matches!(err, ModelError::Format { .. }));
    }

    #[test]
    fn test_unknown_directives_ignored() {
        let source = format!("g group\ns off\n{TRIANGLE}l 1 2\nf 1 2 3\n");
        let meshes = run(&source, &MaterialLibrary::new()).unwrap();
        assert_eq!(meshes[0].faces.len(), 1);
    }

    #[test]
    fn test_builder_take_resets_everything() {
        let mut builder = MeshBuilder::new("first");
        builder.positions.push(Vertex::new(0.0, 0.0, 0.0));
        builder.normals.push(Vec3::z());
        builder.active_material = Some(0);

        let mesh = builder.take("second");
        assert_eq!(mesh.name, "first");
        assert_eq!(mesh.vertices.len(), 1);
        assert_eq!(builder.name(), "second");
        assert!(!builder.has_geometry());
        assert!(builder.normals.is_empty());
        assert!(builder.active_material.is_none());
    }
}
