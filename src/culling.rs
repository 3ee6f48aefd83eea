//! Back-face culling for world-space polygons.

use crate::geometry::Polygon;
use crate::math::Vec3;

/// Returns true if the front of `polygon` faces `eye`.
///
/// Polygons are wound clockwise as seen from the front. The face normal is
/// built from the two edges meeting at the second vertex, so only the first
/// three vertices are read. A degenerate polygon has a zero normal and is
/// treated as facing away.
pub fn faces_viewer(polygon: &Polygon, eye: Vec3) -> bool {
    let [v0, v1, v2] = match polygon.vertices.as_slice() {
        [v0, v1, v2, ..] => [*v0, *v1, *v2],
        _ => return false,
    };

    let edge1 = v0 - v1;
    let edge2 = v2 - v1;
    let normal = edge1.cross(edge2);
    let view = v0 - eye;

    view.dot(normal) > 0.0
}
