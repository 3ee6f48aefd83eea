//! Polygon and plane value types shared by every pipeline stage.
//!
//! A [`Polygon`] has the same shape in local, world and view space; only the
//! coordinate space differs, and callers keep track of which one they hold.
//! Vertex storage is a fixed-capacity [`ArrayVec`] sized for the worst case
//! growth of four clip passes.

use arrayvec::ArrayVec;

use crate::math::{Vec2, Vec3};

pub type Point3 = Vec3;

/// Capacity of every polygon vertex buffer.
pub const MAX_POLY_VERTS: usize = 8;

/// Side planes of the view frustum (left, right, bottom, top).
pub const NUM_FRUSTUM_PLANES: usize = 4;

/// Largest polygon a scene may contain. Clipping a convex polygon against one
/// plane adds at most one vertex, so this leaves room for every frustum plane.
pub const MAX_TEMPLATE_VERTS: usize = MAX_POLY_VERTS - NUM_FRUSTUM_PLANES;

pub const MIN_POLY_VERTS: usize = 3;

const _: () = assert!(MAX_TEMPLATE_VERTS + NUM_FRUSTUM_PLANES <= MAX_POLY_VERTS);
const _: () = assert!(MAX_TEMPLATE_VERTS >= MIN_POLY_VERTS);

/// A half-space `dot(p, normal) >= offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub offset: f64,
}

impl Plane {
    pub fn new(normal: Vec3, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// Projection of `point` onto the plane normal.
    #[inline]
    pub fn dot(&self, point: Vec3) -> f64 {
        point.dot(self.normal)
    }

    /// Returns true if `point` lies in the kept half-space.
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        self.dot(point) >= self.offset
    }
}

/// A convex, flat-colored polygon, wound clockwise as seen from its front.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub color: u8,
    pub vertices: ArrayVec<Point3, MAX_POLY_VERTS>,
}

impl Polygon {
    /// Builds a polygon from a vertex slice.
    ///
    /// # Panics
    /// Panics if `vertices` holds more than [`MAX_POLY_VERTS`] points. Scene
    /// templates are checked against [`MAX_TEMPLATE_VERTS`] at setup instead.
    pub fn new(color: u8, vertices: &[Point3]) -> Self {
        Self {
            color,
            vertices: vertices.iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns a copy moved by `offset`, keeping color and winding.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            color: self.color,
            vertices: self.vertices.iter().map(|&v| v + offset).collect(),
        }
    }

    /// Returns a copy with `f` applied to every vertex.
    pub fn map_vertices(&self, f: impl Fn(Point3) -> Point3) -> Self {
        Self {
            color: self.color,
            vertices: self.vertices.iter().map(|&v| f(v)).collect(),
        }
    }
}

/// A polygon after projection, in real-valued screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenPolygon {
    pub color: u8,
    pub vertices: ArrayVec<Vec2, MAX_POLY_VERTS>,
}

impl ScreenPolygon {
    /// # Panics
    /// Panics if `vertices` holds more than [`MAX_POLY_VERTS`] points.
    pub fn new(color: u8, vertices: &[Vec2]) -> Self {
        Self {
            color,
            vertices: vertices.iter().copied().collect(),
        }
    }
}
