//! Sutherland-Hodgman clipping against a single plane.

use arrayvec::ArrayVec;

use crate::geometry::{Plane, Point3, Polygon, MAX_POLY_VERTS, MIN_POLY_VERTS};

/// Clips `polygon` to the half-space `dot(p, plane.normal) >= plane.offset`.
///
/// Vertices are walked in order. Inside vertices are kept as they are, and
/// every edge whose endpoints fall on different sides contributes the point
/// where it crosses the plane, emitted right after the edge's first vertex.
/// Winding and color are preserved.
///
/// Returns `None` when fewer than three vertices remain. A convex input gains
/// at most one vertex; if the output would still not fit in the vertex buffer
/// the polygon is rejected as well.
pub fn clip_to_plane(polygon: &Polygon, plane: &Plane) -> Option<Polygon> {
    let vertices = polygon.vertices.as_slice();
    let (&first, _) = vertices.split_first()?;

    let mut output: ArrayVec<Point3, MAX_POLY_VERTS> = ArrayVec::new();

    let mut current = first;
    let mut current_dot = plane.dot(current);
    let mut current_inside = current_dot >= plane.offset;

    for i in 0..vertices.len() {
        if current_inside {
            output.try_push(current).ok()?;
        }

        let next = vertices[(i + 1) % vertices.len()];
        let next_dot = plane.dot(next);
        let next_inside = next_dot >= plane.offset;

        if current_inside != next_inside {
            let t = (plane.offset - current_dot) / (next_dot - current_dot);
            output.try_push(current.lerp(next, t)).ok()?;
        }

        current = next;
        current_dot = next_dot;
        current_inside = next_inside;
    }

    if output.len() < MIN_POLY_VERTS {
        return None;
    }

    Some(Polygon {
        color: polygon.color,
        vertices: output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use approx::assert_relative_eq;

    fn square(z: f64) -> Polygon {
        Polygon::new(
            4,
            &[
                Vec3::new(-1.0, 1.0, z),
                Vec3::new(1.0, 1.0, z),
                Vec3::new(1.0, -1.0, z),
                Vec3::new(-1.0, -1.0, z),
            ],
        )
    }

    // Keeps x >= 0
    fn right_half() -> Plane {
        Plane::new(Vec3::RIGHT, 0.0)
    }

    #[test]
    fn fully_inside_is_unchanged() {
        let plane = Plane::new(Vec3::FORWARD, 1.0);
        let poly = square(5.0);
        assert_eq!(clip_to_plane(&poly, &plane), Some(poly));
    }

    #[test]
    fn fully_outside_is_rejected() {
        let plane = Plane::new(Vec3::FORWARD, 10.0);
        assert_eq!(clip_to_plane(&square(5.0), &plane), None);
    }

    #[test]
    fn vertices_on_the_plane_count_as_inside() {
        let plane = Plane::new(Vec3::FORWARD, 5.0);
        let clipped = clip_to_plane(&square(5.0), &plane).unwrap();
        assert_eq!(clipped.len(), 4);
    }

    #[test]
    fn halving_a_square_keeps_order_and_color() {
        let clipped = clip_to_plane(&square(3.0), &right_half()).unwrap();
        assert_eq!(clipped.color, 4);

        let expected = [
            Vec3::new(0.0, 1.0, 3.0),
            Vec3::new(1.0, 1.0, 3.0),
            Vec3::new(1.0, -1.0, 3.0),
            Vec3::new(0.0, -1.0, 3.0),
        ];
        assert_eq!(clipped.len(), expected.len());
        for (got, want) in clipped.vertices.iter().zip(expected) {
            assert_relative_eq!(got.x, want.x, epsilon = 1e-12);
            assert_relative_eq!(got.y, want.y, epsilon = 1e-12);
            assert_relative_eq!(got.z, want.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn cutting_a_corner_adds_one_vertex() {
        // Keeps x + y <= 1.5, which removes only the (1, 1) corner
        let plane = Plane::new(Vec3::new(-1.0, -1.0, 0.0), -1.5);
        let clipped = clip_to_plane(&square(0.0), &plane).unwrap();
        assert_eq!(clipped.len(), 5);
        for v in &clipped.vertices {
            assert!(v.x + v.y <= 1.5 + 1e-12);
        }
    }

    #[test]
    fn output_count_is_zero_or_between_three_and_n_plus_one() {
        let poly = square(0.0);
        for step in -30..=30 {
            let offset = f64::from(step) * 0.1;
            for normal in [
                Vec3::RIGHT,
                Vec3::UP,
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-0.3, 0.7, 0.0),
            ] {
                let count = clip_to_plane(&poly, &Plane::new(normal, offset)).map_or(0, |p| p.len());
                assert!(
                    count == 0 || (3..=poly.len() + 1).contains(&count),
                    "{count} vertices for normal {normal:?} offset {offset}"
                );
            }
        }
    }

    #[test]
    fn two_point_input_is_rejected() {
        let segment = Polygon::new(1, &[Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)]);
        assert_eq!(clip_to_plane(&segment, &right_half()), None);
    }

    #[test]
    fn empty_polygon_is_rejected() {
        let empty = Polygon::new(1, &[]);
        assert_eq!(clip_to_plane(&empty, &right_half()), None);
    }
}
