//! Scene-side types: math re-exports, Transform, Camera, the transform
//! hierarchy and the airport scene state.

pub use glam::{Mat4, Quat, Vec3, vec3};

pub mod camera;
pub mod error;
pub mod hierarchy;
pub mod scene;
pub mod transform;

pub use error::{CoreError, CoreResult};
