//! Math types for vertex attributes

pub use nalgebra::{Vector2, Vector3, Vector4};

/// 2D vector type (texture coordinates)
pub type Vec2 = Vector2<f32>;

/// 3D vector type (normals)
pub type Vec3 = Vector3<f32>;

/// 4D vector type (homogeneous positions)
pub type Vec4 = Vector4<f32>;
