//! World-space view frustum.

use crate::camera::Camera;
use crate::geometry::{Plane, Polygon, NUM_FRUSTUM_PLANES};
use crate::math::Vec3;
use crate::projection::Projection;

use super::plane::clip_to_plane;

/// Pushes every plane slightly in front of the eye, keeping clipped vertices
/// off the `z = 0` singularity of the projector.
pub const CLIP_PLANE_EPSILON: f64 = 0.0001;

/// The four side planes of the view volume, in world space.
///
/// Planes are stored in the order left, right, bottom, top. Each normal points
/// into the visible region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    planes: [Plane; NUM_FRUSTUM_PLANES],
}

impl Frustum {
    /// Builds the frustum for the camera's current basis and position.
    ///
    /// The plane normals are derived in view space from the projection's
    /// scale factors, then rotated into world space with the transpose of
    /// the camera basis.
    pub fn new(camera: &Camera, projection: &Projection) -> Self {
        let (sx, cx) = projection.horizontal_plane_angle().sin_cos();
        let (sy, cy) = projection.vertical_plane_angle().sin_cos();

        let view_normals = [
            Vec3::new(sx, 0.0, cx),
            Vec3::new(-sx, 0.0, cx),
            Vec3::new(0.0, sy, cy),
            Vec3::new(0.0, -sy, cy),
        ];

        let eye = camera.position();
        let planes = view_normals.map(|n| {
            let normal = camera.back_rotate(n);
            Plane::new(normal, eye.dot(normal) + CLIP_PLANE_EPSILON)
        });

        Self { planes }
    }

    pub fn planes(&self) -> &[Plane; NUM_FRUSTUM_PLANES] {
        &self.planes
    }

    /// Clips a world-space polygon to all four planes in order.
    ///
    /// Returns `None` as soon as one plane rejects the polygon.
    pub fn clip(&self, polygon: &Polygon) -> Option<Polygon> {
        let (first, rest) = self.planes.split_first()?;
        let mut clipped = clip_to_plane(polygon, first)?;
        for plane in rest {
            clipped = clip_to_plane(&clipped, plane)?;
        }
        Some(clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Control;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn projection() -> Projection {
        Projection::new(320, 240, 2.0)
    }

    fn quad_at(z: f64, half: f64) -> Polygon {
        Polygon::new(
            6,
            &[
                Vec3::new(-half, half, z),
                Vec3::new(half, half, z),
                Vec3::new(half, -half, z),
                Vec3::new(-half, -half, z),
            ],
        )
    }

    #[test]
    fn side_planes_of_an_unrotated_camera() {
        let frustum = Frustum::new(&Camera::default(), &projection());
        let [left, right, bottom, top] = frustum.planes();

        assert_relative_eq!(left.normal.x, FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(left.normal.z, FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(right.normal.x, -FRAC_1_SQRT_2, epsilon = 1e-12);
        assert!(bottom.normal.y > 0.0);
        assert!(top.normal.y < 0.0);

        for plane in frustum.planes() {
            assert_relative_eq!(plane.normal.magnitude(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(plane.offset, CLIP_PLANE_EPSILON, epsilon = 1e-15);
        }
    }

    #[test]
    fn offsets_follow_the_camera_position() {
        let mut camera = Camera::new(Vec3::new(5.0, -3.0, 12.0));
        camera.update(&[Control::YawRight, Control::PitchUp]);
        let frustum = Frustum::new(&camera, &projection());

        for plane in frustum.planes() {
            assert_relative_eq!(
                plane.offset,
                camera.position().dot(plane.normal) + CLIP_PLANE_EPSILON,
                epsilon = 1e-12
            );
            assert_relative_eq!(plane.normal.magnitude(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn polygon_inside_the_view_is_unchanged() {
        let frustum = Frustum::new(&Camera::default(), &projection());
        let poly = quad_at(50.0, 5.0);
        assert_eq!(frustum.clip(&poly), Some(poly));
    }

    #[test]
    fn polygon_behind_the_eye_is_rejected() {
        let frustum = Frustum::new(&Camera::default(), &projection());
        assert_eq!(frustum.clip(&quad_at(-50.0, 5.0)), None);
    }

    #[test]
    fn polygon_off_to_one_side_is_rejected() {
        let frustum = Frustum::new(&Camera::default(), &projection());
        let poly = quad_at(10.0, 2.0).translated(Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(frustum.clip(&poly), None);
    }

    #[test]
    fn clipped_vertices_have_positive_depth() {
        let mut camera = Camera::new(Vec3::new(3.0, 2.0, -4.0));
        camera.update(&[Control::YawLeft, Control::RollLeft]);
        let frustum = Frustum::new(&camera, &projection());

        // A wall that passes through the eye's plane and beyond every side
        let wall = Polygon::new(
            2,
            &[
                Vec3::new(-500.0, 500.0, -20.0),
                Vec3::new(500.0, 500.0, 300.0),
                Vec3::new(500.0, -500.0, 300.0),
                Vec3::new(-500.0, -500.0, -20.0),
            ],
        );

        let clipped = frustum.clip(&wall).expect("wall crosses the view");
        assert!(clipped.len() <= wall.len() + NUM_FRUSTUM_PLANES);
        for &v in &clipped.vertices {
            assert!(camera.to_view(v).z > 0.0, "{v:?}");
        }
    }

    #[test]
    fn clipped_polygon_projects_onto_the_screen() {
        let proj = projection();
        let frustum = Frustum::new(&Camera::default(), &proj);
        let big = quad_at(10.0, 1000.0);

        let clipped = frustum.clip(&big).expect("quad covers the view");
        let screen = proj.project(&clipped);
        for v in &screen.vertices {
            assert!((-0.5 - 1e-6..=319.5 + 1e-6).contains(&v.x), "{v:?}");
            assert!((-0.5 - 1e-6..=239.5 + 1e-6).contains(&v.y), "{v:?}");
        }
    }
}
