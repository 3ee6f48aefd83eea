//! Small linear-algebra kit used by the pipeline.

pub mod mat3;
pub mod vec2;
pub mod vec3;

pub use mat3::Mat3;
pub use vec2::Vec2;
pub use vec3::Vec3;
