//! Perspective projection from view space to the screen.
//!
//! [`Projection`] is the single source of truth for the screen scale factors
//! and projection center. It is derived from the framebuffer size and the
//! camera's field-of-view scale, and rebuilt every frame so that resizes and
//! zooms need no extra bookkeeping.

use crate::geometry::{Polygon, ScreenPolygon};
use crate::math::{Vec2, Vec3};

/// Screen scale factors and center for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    width: f64,
    height: f64,
    field_of_view: f64,
    x_screen_scale: f64,
    y_screen_scale: f64,
    max_scale: f64,
    x_center: f64,
    y_center: f64,
}

impl Projection {
    /// Creates a projection for a `width` x `height` framebuffer.
    ///
    /// # Arguments
    /// * `field_of_view` - Field-of-view scale (2.0 maps a 90° cone onto the
    ///   wider screen axis); must be positive
    pub fn new(width: u32, height: u32, field_of_view: f64) -> Self {
        let width = f64::from(width);
        let height = f64::from(height);
        let x_screen_scale = width / field_of_view;
        let y_screen_scale = height / field_of_view;

        Self {
            width,
            height,
            field_of_view,
            x_screen_scale,
            y_screen_scale,
            max_scale: x_screen_scale.max(y_screen_scale),
            x_center: width / 2.0 - 0.5,
            y_center: height / 2.0 + 0.5,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn x_screen_scale(&self) -> f64 {
        self.x_screen_scale
    }

    pub fn y_screen_scale(&self) -> f64 {
        self.y_screen_scale
    }

    /// Scale applied to both axes when projecting.
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Angle between the left/right clip plane normals and the view axis.
    /// The visible half-angle is its complement, so larger means narrower.
    pub fn horizontal_plane_angle(&self) -> f64 {
        (2.0 / self.field_of_view * self.max_scale / self.x_screen_scale).atan()
    }

    /// Angle between the bottom/top clip plane normals and the view axis.
    pub fn vertical_plane_angle(&self) -> f64 {
        (2.0 / self.field_of_view * self.max_scale / self.y_screen_scale).atan()
    }

    /// Projects a view-space point. World Y goes up, screen Y goes down.
    #[inline]
    pub fn project_point(&self, v: Vec3) -> Vec2 {
        debug_assert!(v.z > 0.0, "vertex at z = {} reached the projector", v.z);
        let z_recip = 1.0 / v.z;
        Vec2::new(
            v.x * z_recip * self.max_scale + self.x_center,
            self.height - (v.y * z_recip * self.max_scale + self.y_center),
        )
    }

    /// Projects a frustum-clipped view-space polygon onto the screen.
    pub fn project(&self, polygon: &Polygon) -> ScreenPolygon {
        ScreenPolygon {
            color: polygon.color,
            vertices: polygon
                .vertices
                .iter()
                .map(|&v| self.project_point(v))
                .collect(),
        }
    }
}
