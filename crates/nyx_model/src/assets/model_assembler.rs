//! Model assembly from an OBJ file
//!
//! Drives [`ObjParser`] over every line of a source file, loading `mtllib`
//! libraries relative to the source's directory as they are encountered.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::materials::MaterialLibrary;
use super::obj_parser::ObjParser;
use super::tokenizer::tokenize;
use crate::config::ConverterConfig;
use crate::error::{ModelError, ModelResult};
use crate::model::Model;

/// Builds a [`Model`] from one OBJ source
///
/// Owns the conversion's material table; a new assembler starts with an
/// empty one.
pub struct ModelAssembler {
    default_mesh_name: String,
    materials: MaterialLibrary,
}

impl ModelAssembler {
    /// Create an assembler using the config's default mesh name
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            default_mesh_name: config.default_mesh_name.clone(),
            materials: MaterialLibrary::new(),
        }
    }

    /// Assemble a model from an OBJ file on disk
    pub fn assemble(mut self, path: impl AsRef<Path>) -> ModelResult<Model> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ModelError::io(path, e))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        let model = self.assemble_lines(BufReader::new(file), &base_dir, path)?;
        log::info!(
            "Assembled {:?}: {} mesh(es), {} face(s)",
            path,
            model.meshes.len(),
            model.face_count()
        );
        Ok(model)
    }

    /// Assemble a model from any line source
    ///
    /// `mtllib` paths are resolved against `base_dir`.
    pub fn assemble_from_reader(mut self, reader: impl BufRead, base_dir: impl AsRef<Path>) -> ModelResult<Model> {
        let base_dir = base_dir.as_ref();
        self.assemble_lines(reader, base_dir, base_dir)
    }

    fn assemble_lines(&mut self, reader: impl BufRead, base_dir: &Path, source: &Path) -> ModelResult<Model> {
        let mut parser = ObjParser::new(self.default_mesh_name.clone());
        let mut meshes = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| ModelError::io(source, e))?;
            let Some(directive) = tokenize(line_num + 1, &line) else {
                continue;
            };

            if directive.keyword == "mtllib" {
                if directive.args.is_empty() {
                    return Err(ModelError::format(directive.line, "mtllib missing file name"));
                }
                for file_name in &directive.args {
                    self.materials.load(base_dir.join(file_name))?;
                }
                continue;
            }

            if let Some(mesh) = parser.process(&directive, &self.materials)? {
                meshes.push(mesh);
            }
        }

        meshes.extend(parser.finish());
        Ok(Model::new(meshes))
    }
}
