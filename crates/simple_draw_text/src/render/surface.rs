//! Draw-call surface consumed by the text renderer
//!
//! The trait mirrors the small slice of the fixed-function pipeline that bitmap
//! text needs. Calls are infallible the way GL calls are; a surface that detects
//! misuse (stack overflow, popping an empty stack) latches the error and carries on.

use crate::font::Glyph;
use crate::foundation::math::{orthographic, Color, Mat4};

/// Which matrix stack subsequent matrix calls apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixMode {
    /// Object-to-eye transform
    #[default]
    Modelview,
    /// Eye-to-clip transform
    Projection,
}

/// Target of immediate-mode overlay drawing
pub trait DrawSurface {
    /// Select the matrix stack that following matrix calls modify
    fn matrix_mode(&mut self, mode: MatrixMode);

    /// Duplicate the top of the current stack
    fn push_matrix(&mut self);

    /// Discard the top of the current stack
    fn pop_matrix(&mut self);

    /// Replace the top of the current stack with the identity
    fn load_identity(&mut self);

    /// Post-multiply the top of the current stack by `matrix`
    fn mult_matrix(&mut self, matrix: &Mat4);

    /// Post-multiply the top of the current stack by an orthographic projection
    fn ortho(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.mult_matrix(&orthographic(left, right, bottom, top, near, far));
    }

    /// Set the current color
    fn set_color(&mut self, color: Color);

    /// Transform `(x, y, 0, 1)` into window space and make it the raster position
    ///
    /// The current color is latched as the raster color.
    fn raster_pos(&mut self, x: i32, y: i32);

    /// Blit `glyph` at the raster position and advance it
    fn bitmap_glyph(&mut self, glyph: Glyph);
}
