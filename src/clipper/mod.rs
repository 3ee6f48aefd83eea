//! Polygon clipping against the view frustum.
//!
//! Clipping happens in world space, before the view transform, using the
//! Sutherland-Hodgman algorithm:
//!
//! - [`plane`]: clips one convex polygon against one half-space.
//! - [`frustum`]: builds the four side planes for a camera and chains
//!   [`clip_to_plane`] across them.
//!
//! There is no near or far plane. The side planes all pass just in front of
//! the eye, so anything that survives them has positive view-space depth.

pub mod frustum;
pub mod plane;

pub use frustum::{Frustum, CLIP_PLANE_EPSILON};
pub use plane::clip_to_plane;
