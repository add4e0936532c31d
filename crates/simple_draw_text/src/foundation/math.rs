//! Math utilities and types
//!
//! Matrix conventions follow the fixed-function OpenGL pipeline: column vectors,
//! right-handed eye space, clip-space depth in `[-1, 1]`.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// RGB color with float channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// Pure red
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Pure green
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Pure blue
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    /// Yellow
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);

    /// Create a color from float channels
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Clamp every channel into `[0, 1]`
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(self.r.clamp(0.0, 1.0), self.g.clamp(0.0, 1.0), self.b.clamp(0.0, 1.0))
    }

    /// Convert to 8-bit RGBA with the given alpha
    pub fn to_rgba8(self, alpha: f32) -> [u8; 4] {
        let c = self.clamped();
        [
            channel_to_u8(c.r),
            channel_to_u8(c.g),
            channel_to_u8(c.b),
            channel_to_u8(alpha.clamp(0.0, 1.0)),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for [f32; 3] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b]
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_to_u8(value: f32) -> u8 {
    (value * 255.0).round() as u8
}

/// Orthographic projection, same layout as `glOrtho`
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    Mat4::new_orthographic(left, right, bottom, top, near, far)
}

/// Perspective projection, same layout as `gluPerspective`
pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::new_perspective(aspect, fov_y_degrees.to_radians(), near, far)
}

/// View matrix, same layout as `gluLookAt`
pub fn look_at(eye: Point3, target: Point3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(&eye, &target, &up)
}

/// Rotation of `angle_degrees` around `axis`, same layout as `glRotatef`
pub fn rotation(angle_degrees: f32, axis: Vec3) -> Mat4 {
    Mat4::from_axis_angle(&Unit::new_normalize(axis), angle_degrees.to_radians())
}
