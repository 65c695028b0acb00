//! Per-conversion material table
//!
//! Each conversion owns one `MaterialLibrary`. Libraries pulled in by
//! `mtllib` are merged into it and `usemtl` resolves against it; nothing
//! is shared between conversions.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::mtl_parser::MtlParser;
use crate::error::{ModelError, ModelResult};
use crate::model::Material;

/// Name -> material table scoped to a single source file
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: HashMap<String, Material>,
}

impl MaterialLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an MTL file and merge its materials into this library
    ///
    /// A missing or unreadable file is not an error: it contributes nothing
    /// and `Ok(0)` is returned. Malformed contents are an error naming the
    /// file. Bytes that are not UTF-8 are decoded lossily; they only ever
    /// appear in comments and names.
    ///
    /// # Returns
    /// The number of entries committed from the file
    pub fn load(&mut self, mtl_path: impl AsRef<Path>) -> ModelResult<usize> {
        let mtl_path = mtl_path.as_ref();

        let bytes = match fs::read(mtl_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Skipping material library {:?}: {}", mtl_path, e);
                return Ok(0);
            }
        };

        let contents = String::from_utf8_lossy(&bytes);
        let count = self.merge_str(&contents).map_err(|e| ModelError::library(mtl_path, e))?;
        log::info!("Loaded {} material(s) from {:?}", count, mtl_path);
        Ok(count)
    }

    /// Parse MTL text and merge its materials into this library
    pub fn merge_str(&mut self, contents: &str) -> ModelResult<usize> {
        let parsed = MtlParser::parse(contents)?;
        let count = parsed.len();
        for material in parsed {
            self.insert(material);
        }
        Ok(count)
    }

    /// Add a material, replacing any existing entry with the same name
    pub fn insert(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Look up a material by name
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Number of distinct material names
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the library holds no materials
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
