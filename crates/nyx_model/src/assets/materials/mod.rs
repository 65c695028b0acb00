//! Material library loading
//!
//! - `mtl_parser`: MTL text -> materials
//! - `material_library`: per-conversion name -> material table

pub mod material_library;
pub mod mtl_parser;

pub use material_library::MaterialLibrary;
pub use mtl_parser::{texture_stem, MtlParser};

use std::path::Path;

use crate::error::ModelResult;

/// Load an MTL file into a fresh table
///
/// A missing file yields an empty table.
pub fn parse_materials(mtl_path: impl AsRef<Path>) -> ModelResult<MaterialLibrary> {
    let mut library = MaterialLibrary::new();
    library.load(mtl_path)?;
    Ok(library)
}
