//! Source asset loading
//!
//! OBJ geometry and MTL material parsing, plus the assembler that ties the
//! two together into a [`Model`](crate::model::Model).

pub mod materials;
pub mod model_assembler;
pub mod obj_parser;
pub mod tokenizer;

pub use materials::{parse_materials, MaterialLibrary, MtlParser};
pub use model_assembler::ModelAssembler;
pub use obj_parser::{MeshBuilder, ObjParser};
pub use tokenizer::{tokenize, Directive};
