//! Mesh import: OBJ parsing and per-vertex expansion.
//! The output is a non-indexed triangle list ready for vertex buffer upload.

pub mod error;
pub mod mesh;
pub mod obj;

pub use error::{MeshErrorKind, MeshImportError, MeshResult};
pub use mesh::{GpuVertex, StructuredMesh, import_model};
