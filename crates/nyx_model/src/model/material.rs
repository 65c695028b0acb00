//! Material description tracked per mesh

/// Surface material parsed from an MTL library
///
/// Texture fields hold bare file stems (no directory, no extension); the
/// converter only tracks references, never pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name (from `newmtl`)
    pub name: String,

    /// Ambient color (Ka)
    pub ambient: [f32; 3],
    /// Diffuse color (Kd)
    pub diffuse: [f32; 3],
    /// Specular color (Ks)
    pub specular: [f32; 3],

    /// Reflectiveness scalar
    pub reflective: f32,
    /// Shininess scalar
    pub shininess: f32,
    /// Transparency (d / Tr)
    pub transparency: f32,
    /// Index of refraction (Ni)
    pub refractiveness: f32,

    /// Ambient texture (map_Ka)
    pub ambient_tex: String,
    /// Diffuse texture (map_Kd)
    pub diffuse_tex: String,
    /// Specular texture (map_Ks)
    pub specular_tex: String,
    /// Reflection texture
    pub reflective_tex: String,
    /// Shininess texture
    pub shininess_tex: String,
    /// Displacement texture (disp)
    pub displacement_tex: String,
    /// Alpha texture (map_d)
    pub alpha_tex: String,
    /// Bump texture (map_bump)
    pub bump_tex: String,
    /// Specular highlight texture (map_Ns)
    pub highlight_tex: String,
}

impl Material {
    /// Create a material with default properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: [0.0; 3],
            diffuse: [0.0; 3],
            specular: [0.0; 3],
            reflective: 0.0,
            shininess: 0.0,
            transparency: 1.0,
            refractiveness: 0.0,
            ambient_tex: String::new(),
            diffuse_tex: String::new(),
            specular_tex: String::new(),
            reflective_tex: String::new(),
            shininess_tex: String::new(),
            displacement_tex: String::new(),
            alpha_tex: String::new(),
            bump_tex: String::new(),
            highlight_tex: String::new(),
        }
    }

    /// Set the diffuse color
    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse = [r, g, b];
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(String::new())
    }
}
