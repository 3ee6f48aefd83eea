//! 3x3 rotation matrix.
//!
//! # Convention
//! - Stored as `data[row][col]`
//! - A world-to-view rotation keeps the view axes in its **rows**: row 0 is
//!   right, row 1 is up, row 2 is forward
//! - `A * B` is the ordinary matrix product, so `A * B * v` applies B first
//!
//! Every constructor is a pure function of its angle; nothing here is cached
//! between frames.

use std::ops::Mul;

use super::vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    data: [[f64; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Self = Mat3 {
        data: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub const fn new(data: [[f64; 3]; 3]) -> Self {
        Mat3 { data }
    }

    /// Creates a rotation around the view (Z) axis.
    pub fn roll(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Mat3::new([[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Creates a rotation around the right (X) axis. Positive angles tip the
    /// forward axis downward.
    pub fn pitch(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Mat3::new([[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]])
    }

    /// Creates a rotation around the up (Y) axis. Positive angles turn the
    /// forward axis toward +X.
    pub fn yaw(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Mat3::new([[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]])
    }

    /// Returns row `index` as a vector.
    #[inline]
    pub fn row(&self, index: usize) -> Vec3 {
        let [x, y, z] = self.data[index];
        Vec3::new(x, y, z)
    }

    pub fn transpose(&self) -> Self {
        let m = &self.data;
        Mat3::new([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Matrix multiplication: Mat3 * Mat3.
impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut result = [[0.0f64; 3]; 3];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col];
            }
        }

        Mat3::new(result)
    }
}

/// Rotate a vector: Mat3 * Vec3 (column vector).
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        Vec3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }
}
