//! First-person walking camera
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! Orientation is stored as roll/pitch/yaw angles, each kept in `[0, 2π)`.
//! Every frame the world-to-view rotation is rebuilt from the angles as
//! `pitch * (roll * yaw)` and its rows are read off as the right, up and
//! forward basis vectors.
//!
//! # Motion
//!
//! The camera walks: forward speed moves it along the forward vector with the
//! vertical component dropped, so looking up or down slows horizontal motion.
//! Speed decays toward zero every frame (crude friction).

use std::f64::consts::{PI, TAU};

use log::debug;

use crate::config::DEFAULT_FIELD_OF_VIEW;
use crate::math::{Mat3, Vec3};

pub const MOVEMENT_SPEED: f64 = 3.0;
pub const VERTICAL_MOVEMENT_SPEED: f64 = 3.0;
pub const MAX_MOVEMENT_SPEED: f64 = 30.0;
pub const ROLL_SPEED: f64 = PI / 20.0;
pub const PITCH_SPEED: f64 = PI / 20.0;
pub const YAW_SPEED: f64 = PI / 20.0;

/// Limit on every world coordinate of the camera position.
pub const MAX_COORD: f64 = 16384.0;

const ZOOM_IN_FACTOR: f64 = 0.9;
const ZOOM_OUT_FACTOR: f64 = 1.1;
const SPEED_UP_FACTOR: f64 = 1.1;
const SLOW_DOWN_FACTOR: f64 = 0.9;

/// One discrete control event. Each maps to a single fixed increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Accelerate,
    Decelerate,
    RollLeft,
    RollRight,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    MoveUp,
    MoveDown,
    /// Shrinks the field-of-view scale.
    ZoomIn,
    /// Grows the field-of-view scale.
    ZoomOut,
    /// Scales every movement and turn increment up.
    SpeedUp,
    /// Scales every movement and turn increment down.
    SlowDown,
}

/// Orthonormal view basis in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl Basis {
    pub const IDENTITY: Self = Self {
        right: Vec3::RIGHT,
        up: Vec3::UP,
        forward: Vec3::FORWARD,
    };

    /// Reads the basis off the rows of a world-to-view rotation.
    pub fn from_rows(rotation: &Mat3) -> Self {
        Self {
            right: rotation.row(0),
            up: rotation.row(1),
            forward: rotation.row(2),
        }
    }

    /// Rotates a world-space vector into view space.
    #[inline]
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.dot(self.right), v.dot(self.up), v.dot(self.forward))
    }

    /// Rotates a view-space vector back into world space (transpose rotation).
    #[inline]
    pub fn back_rotate(&self, v: Vec3) -> Vec3 {
        self.right * v.x + self.up * v.y + self.forward * v.z
    }
}

/// First-person camera with position, roll/pitch/yaw orientation and speed.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    roll: f64,
    pitch: f64,
    yaw: f64,
    basis: Basis,

    speed: f64,
    speed_scale: f64,
    field_of_view: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

/// Wraps an angle into `[0, 2π)`.
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

impl Camera {
    /// Creates a stationary camera at `position`, looking along +Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            basis: Basis::IDENTITY,
            speed: 0.0,
            speed_scale: 1.0,
            field_of_view: DEFAULT_FIELD_OF_VIEW,
        }
    }

    pub fn with_field_of_view(mut self, field_of_view: f64) -> Self {
        self.field_of_view = field_of_view;
        self
    }

    // =========================================================================
    // Controls
    // =========================================================================

    /// Applies one control increment.
    pub fn apply_control(&mut self, control: Control) {
        let scale = self.speed_scale;
        match control {
            Control::Accelerate => {
                self.speed = (self.speed + MOVEMENT_SPEED * scale).min(MAX_MOVEMENT_SPEED * scale);
            }
            Control::Decelerate => {
                self.speed =
                    (self.speed - MOVEMENT_SPEED * scale).max(-(MAX_MOVEMENT_SPEED * scale));
            }
            Control::RollLeft => self.roll = wrap_angle(self.roll + ROLL_SPEED * scale),
            Control::RollRight => self.roll = wrap_angle(self.roll - ROLL_SPEED * scale),
            Control::PitchDown => self.pitch = wrap_angle(self.pitch + PITCH_SPEED * scale),
            Control::PitchUp => self.pitch = wrap_angle(self.pitch - PITCH_SPEED * scale),
            Control::YawRight => self.yaw = wrap_angle(self.yaw + YAW_SPEED * scale),
            Control::YawLeft => self.yaw = wrap_angle(self.yaw - YAW_SPEED * scale),
            Control::MoveUp => self.position.y += VERTICAL_MOVEMENT_SPEED,
            Control::MoveDown => self.position.y -= VERTICAL_MOVEMENT_SPEED,
            Control::ZoomIn => self.field_of_view *= ZOOM_IN_FACTOR,
            Control::ZoomOut => self.field_of_view *= ZOOM_OUT_FACTOR,
            Control::SpeedUp => self.speed_scale *= SPEED_UP_FACTOR,
            Control::SlowDown => self.speed_scale *= SLOW_DOWN_FACTOR,
        }
        debug!("applied {control:?}; speed {:.2}", self.speed);
    }

    /// Advances the camera by one frame.
    ///
    /// Controls are applied first, then the camera walks along the forward
    /// vector of the previous frame, then the basis is rebuilt from the new
    /// angles, and finally friction is applied to the speed.
    pub fn update(&mut self, controls: &[Control]) {
        for &control in controls {
            self.apply_control(control);
        }

        let direction = Vec3::new(self.basis.forward.x, 0.0, self.basis.forward.z);
        self.position = (self.position + direction * self.speed).clamp_components(MAX_COORD);

        self.basis = Basis::from_rows(&self.rotation_matrix());

        let half_step = MOVEMENT_SPEED * self.speed_scale / 2.0;
        if self.speed > half_step {
            self.speed -= half_step;
        } else if self.speed < -half_step {
            self.speed += half_step;
        } else {
            self.speed = 0.0;
        }
    }

    // =========================================================================
    // Core: Rotation Matrix
    // =========================================================================

    /// Builds the world-to-view rotation: roll then yaw, then pitch applied to
    /// the roll-yaw product.
    pub fn rotation_matrix(&self) -> Mat3 {
        Mat3::pitch(self.pitch) * (Mat3::roll(self.roll) * Mat3::yaw(self.yaw))
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// Transforms a world-space point into view space.
    #[inline]
    pub fn to_view(&self, point: Vec3) -> Vec3 {
        self.basis.rotate(point - self.position)
    }

    /// Rotates a view-space direction into world space.
    #[inline]
    pub fn back_rotate(&self, v: Vec3) -> Vec3 {
        self.basis.back_rotate(v)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleports the camera without changing orientation or speed.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    pub fn roll(&self) -> f64 {
        self.roll
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn speed_scale(&self) -> f64 {
        self.speed_scale
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }
}

// =============================================================================
// Tests
// =============================================================================
