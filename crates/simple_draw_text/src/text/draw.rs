//! Immediate screen-space text drawing

use crate::font::BitmapFont;
use crate::foundation::math::Color;
use crate::render::{DrawSurface, MatrixMode};

/// Draws single strings of bitmap glyphs in pixel coordinates over a 3D scene
///
/// Holds only the projection size and font; nothing carries over between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderer {
    screen_width: u32,
    screen_height: u32,
    font: BitmapFont,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl TextRenderer {
    /// Renderer projecting onto a `screen_width` x `screen_height` pixel space
    pub const fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            font: BitmapFont::FIXED_8X8,
        }
    }

    /// Replace the font
    #[must_use]
    pub const fn with_font(mut self, font: BitmapFont) -> Self {
        self.font = font;
        self
    }

    /// Pixel-space size used for the overlay projection
    pub const fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    /// Change the pixel-space size, typically after a window resize
    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Current font
    pub const fn font(&self) -> BitmapFont {
        self.font
    }

    /// Replace the font
    pub fn set_font(&mut self, font: BitmapFont) {
        self.font = font;
    }

    /// Width of `text` in pixels
    pub fn text_width(&self, text: &str) -> u32 {
        self.font.text_width(text)
    }

    /// Draw `text` with its first glyph's bottom-left corner at pixel (`x`, `y`)
    ///
    /// `y` grows upwards from the bottom of the screen. Both matrix stacks are
    /// pushed before and popped after, so the caller's projection and modelview
    /// matrices are untouched and the modelview stack is left selected.
    #[allow(clippy::cast_precision_loss)]
    pub fn draw_text<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
    ) {
        surface.matrix_mode(MatrixMode::Projection);
        surface.push_matrix();
        surface.load_identity();
        surface.ortho(0.0, self.screen_width as f32, 0.0, self.screen_height as f32, 0.0, 1.0);
        surface.matrix_mode(MatrixMode::Modelview);
        surface.push_matrix();
        surface.load_identity();

        surface.set_color(color);
        surface.raster_pos(x, y);
        for glyph in text.chars().filter_map(|ch| self.font.glyph(ch)) {
            surface.bitmap_glyph(glyph);
        }

        surface.pop_matrix();
        surface.matrix_mode(MatrixMode::Projection);
        surface.pop_matrix();
        surface.matrix_mode(MatrixMode::Modelview);
    }
}
