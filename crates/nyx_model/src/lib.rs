//! # Nyx Model
//!
//! Converts Wavefront OBJ meshes (with their MTL material libraries) into the
//! Nyx model interchange document, a JSON file keyed by mesh name.
//!
//! ## Pipeline
//!
//! - **Tokenizer**: splits source lines into directives
//! - **Material library parser**: `.mtl` -> name/material table
//! - **OBJ parser**: pools, faces and material bindings per mesh
//! - **Model assembler**: drives the parser, loads `mtllib`, splits meshes
//! - **Encoder**: model -> document
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nyx_model::{convert_to_file, ConverterConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     convert_to_file("models/cube.obj", "cube.nmp", &ConverterConfig::default())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod encoder;
pub mod error;
pub mod foundation;
pub mod model;

pub use assets::{parse_materials, MaterialLibrary, ModelAssembler};
pub use config::{Config, ConfigError, ConverterConfig};
pub use encoder::{encode, Document, MeshRecord};
pub use error::{ModelError, ModelResult};
pub use model::{Face, Material, Mesh, Model, Vertex};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Assemble and encode one OBJ file
pub fn convert(input: impl AsRef<Path>, config: &ConverterConfig) -> ModelResult<Document> {
    let model = ModelAssembler::new(config).assemble(input)?;
    Ok(encode(&model))
}

/// Assemble, encode and write one OBJ file
///
/// The output file is only created once the whole model has been assembled
/// and encoded, so a failed conversion leaves nothing behind.
pub fn convert_to_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConverterConfig,
) -> ModelResult<Document> {
    let document = convert(input, config)?;
    write_document(&document, output, config.pretty)?;
    Ok(document)
}

/// Write an encoded document as JSON
pub fn write_document(document: &Document, output: impl AsRef<Path>, pretty: bool) -> ModelResult<()> {
    let output = output.as_ref();
    let json = document.to_json(pretty)?;

    let file = File::create(output).map_err(|e| ModelError::io(output, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(json.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| ModelError::io(output, e))?;

    log::info!("Wrote {} mesh(es) to {:?}", document.len(), output);
    Ok(())
}

/// Common imports for converter users
pub mod prelude {
    pub use crate::{
        assets::{MaterialLibrary, ModelAssembler},
        config::{Config, ConverterConfig},
        convert, convert_to_file, write_document,
        encoder::{encode, Document},
        error::{ModelError, ModelResult},
        model::{Face, Material, Mesh, Model, Vertex},
    };
}
