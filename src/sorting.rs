//! Painter's-algorithm ordering of scene objects.
//!
//! Objects are drawn back to front by the distance from the eye to their
//! centers. This is only an approximation of visibility: it is exact for the
//! convex, non-interpenetrating objects the demo scene uses, and makes no
//! attempt to split or reorder polygons beyond that.

use crate::math::Vec3;
use crate::scene::SceneObject;

/// One object's place in the draw order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthEntry {
    /// Index into the scene's object list.
    pub index: usize,
    /// Euclidean distance from the eye to the object's center.
    pub distance: f64,
}

/// Sorts objects farthest first.
///
/// Each object is inserted in front of the first entry that is no farther
/// than itself, so among objects at equal distance the later one is drawn
/// first.
pub fn depth_sort(objects: &[SceneObject], eye: Vec3) -> Vec<DepthEntry> {
    let mut entries = Vec::with_capacity(objects.len());
    depth_sort_into(objects, eye, &mut entries);
    entries
}

/// Same as [`depth_sort`], reusing `entries` as storage.
pub fn depth_sort_into(objects: &[SceneObject], eye: Vec3, entries: &mut Vec<DepthEntry>) {
    entries.clear();
    for (index, object) in objects.iter().enumerate() {
        let distance = object.center.distance(eye);
        let at = entries.partition_point(|e| e.distance > distance);
        entries.insert(at, DepthEntry { index, distance });
    }
}
