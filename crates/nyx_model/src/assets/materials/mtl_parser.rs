//! MTL (Material Template Library) file parser
//!
//! Parses Wavefront .mtl text into [`Material`] entries. Colors, transparency,
//! refraction and texture references are recognized; everything else is
//! skipped so newer exporters keep working.
//!
//! Entries are committed the way the Nyx toolchain always has: a `newmtl`
//! only closes the previous block if that block set at least one attribute,
//! and the block open at end of input is always committed, even when empty.

use crate::assets::tokenizer::{tokenize, Directive};
use crate::error::ModelResult;
use crate::model::Material;

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL file contents into materials, in commit order
    ///
    /// A name committed twice appears twice; callers that build a table let
    /// the later entry win.
    pub fn parse(contents: &str) -> ModelResult<Vec<Material>> {
        let mut committed = Vec::new();
        let mut material = Material::default();
        let mut dirty = false;

        for (line_num, line) in contents.lines().enumerate() {
            let Some(directive) = tokenize(line_num + 1, line) else {
                continue;
            };

            if directive.keyword == "newmtl" {
                let name = directive.arg(0)?;
                if dirty {
                    committed.push(std::mem::take(&mut material));
                    dirty = false;
                }
                material.name = name.to_string();
                continue;
            }

            if Self::apply(&mut material, &directive)? {
                dirty = true;
            }
        }

        committed.push(material);
        Ok(committed)
    }

    /// Apply one attribute directive; returns whether it was recognized
    fn apply(material: &mut Material, directive: &Directive<'_>) -> ModelResult<bool> {
        match directive.keyword {
            "Ka" => material.ambient = directive.vec3_args(0)?,
            "Kd" => material.diffuse = directive.vec3_args(0)?,
            "Ks" => material.specular = directive.vec3_args(0)?,
            "d" | "Tr" => material.transparency = directive.f32_arg(0)?,
            "Ni" => material.refractiveness = directive.f32_arg(0)?,
            "map_Ka" => material.ambient_tex = texture_stem(directive.last_arg()?),
            "map_Kd" => material.diffuse_tex = texture_stem(directive.last_arg()?),
            "map_Ks" => material.specular_tex = texture_stem(directive.last_arg()?),
            "map_Ns" => material.highlight_tex = texture_stem(directive.last_arg()?),
            "map_d" => material.alpha_tex = texture_stem(directive.last_arg()?),
            "map_bump" => material.bump_tex = texture_stem(directive.last_arg()?),
            "disp" => material.displacement_tex = texture_stem(directive.last_arg()?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Strip directory and every extension from a texture path
///
/// `textures/brick.diffuse.png` becomes `brick`. A leading dot is part of the
/// name, not an extension.
pub fn texture_stem(path: &str) -> String {
    let file_name = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path);
    let stem = match file_name.char_indices().skip(1).find(|&(_, c)| c == '.') {
        Some((dot, _)) => &file_name[..dot],
        None => file_name,
    };
    stem.to_string()
}
