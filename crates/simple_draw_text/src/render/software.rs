//! CPU framebuffer surface
//!
//! Rows are stored bottom-up in RGBA8, so `(0, 0)` is the bottom-left pixel and the
//! byte buffer can be uploaded as a texture without flipping.

use super::fixed_function::{FixedFunctionState, StackError, StackResult};
use super::surface::{DrawSurface, MatrixMode};
use crate::font::Glyph;
use crate::foundation::math::{Color, Mat4};

const BYTES_PER_PIXEL: usize = 4;

/// RGBA framebuffer that rasterizes bitmap glyphs on the CPU
#[derive(Debug, Clone)]
pub struct SoftwareSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    state: FixedFunctionState,
    error: Option<StackError>,
}

impl SoftwareSurface {
    /// Create a fully transparent `width` x `height` surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; buffer_len(width, height)],
            state: FixedFunctionState::new(width, height),
            error: None,
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Resize the framebuffer and viewport; contents are cleared
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        log::debug!("Software surface resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
        self.pixels = vec![0; buffer_len(width, height)];
        self.state.set_viewport(width, height);
    }

    /// Fill every pixel with `color` at `alpha`
    pub fn clear(&mut self, color: Color, alpha: f32) {
        let rgba = color.to_rgba8(alpha);
        for pixel in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Pixel at window coordinates (origin bottom-left)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let offset = self.offset(x, y)?;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    /// Number of pixels exactly equal to `rgba`
    pub fn count_pixels(&self, rgba: [u8; 4]) -> usize {
        self.pixels
            .chunks_exact(BYTES_PER_PIXEL)
            .filter(|pixel| *pixel == rgba)
            .count()
    }

    /// Raw RGBA bytes, bottom row first
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Transform state (matrix stacks, color, raster position)
    pub const fn state(&self) -> &FixedFunctionState {
        &self.state
    }

    /// Mutable transform state, for hosts that drive the scene matrices directly
    pub fn state_mut(&mut self) -> &mut FixedFunctionState {
        &mut self.state
    }

    /// Return and reset the first error latched since the last call
    pub fn take_error(&mut self) -> Option<StackError> {
        self.error.take()
    }

    fn latch(&mut self, result: StackResult<()>) {
        if let Err(err) = result {
            log::warn!("Software surface: {}", err);
            self.error.get_or_insert(err);
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }

    fn put(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&rgba);
        }
    }
}

fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

impl DrawSurface for SoftwareSurface {
    fn matrix_mode(&mut self, mode: MatrixMode) {
        self.state.set_mode(mode);
    }

    fn push_matrix(&mut self) {
        let result = self.state.push();
        self.latch(result);
    }

    fn pop_matrix(&mut self) {
        let result = self.state.pop();
        self.latch(result);
    }

    fn load_identity(&mut self) {
        self.state.load_identity();
    }

    fn mult_matrix(&mut self, matrix: &Mat4) {
        self.state.mult(matrix);
    }

    fn set_color(&mut self, color: Color) {
        self.state.set_color(color);
    }

    fn raster_pos(&mut self, x: i32, y: i32) {
        self.state.set_raster_pos(x, y);
    }

    #[allow(clippy::cast_possible_wrap)]
    fn bitmap_glyph(&mut self, glyph: Glyph) {
        if let Some((origin_x, origin_y)) = self.state.raster_pixel() {
            let rgba = self.state.raster().color.to_rgba8(1.0);
            for (dx, dy) in glyph.lit_pixels() {
                self.put(origin_x + dx as i32, origin_y + dy as i32, rgba);
            }
        }
        self.state.advance_raster(glyph.advance());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BitmapFont;

    fn pixel_projection(surface: &mut SoftwareSurface) {
        surface.matrix_mode(MatrixMode::Projection);
        surface.ortho(0.0, 32.0, 0.0, 16.0, 0.0, 1.0);
        surface.matrix_mode(MatrixMode::Modelview);
    }

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = SoftwareSurface::new(4, 2);
        assert_eq!(surface.as_bytes().len(), 4 * 2 * 4);
        assert_eq!(surface.count_pixels([0, 0, 0, 0]), 8);
    }

    #[test]
    fn test_clear_and_pixel_lookup() {
        let mut surface = SoftwareSurface::new(4, 2);
        surface.clear(Color::BLUE, 1.0);
        assert_eq!(surface.pixel(3, 1), Some([0, 0, 255, 255]));
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn test_glyph_blit_matches_font_bitmap() {
        let mut surface = SoftwareSurface::new(32, 16);
        pixel_projection(&mut surface);
        surface.set_color(Color::RED);
        surface.raster_pos(2, 3);

        let glyph = BitmapFont::FIXED_8X8.glyph('H').unwrap();
        surface.bitmap_glyph(glyph);

        let red = [255, 0, 0, 255];
        assert_eq!(surface.count_pixels(red) as u32, glyph.coverage());
        for (dx, dy) in glyph.lit_pixels() {
            assert_eq!(surface.pixel(2 + dx, 3 + dy), Some(red));
        }
    }

    #[test]
    fn test_glyphs_advance_raster() {
        let mut surface = SoftwareSurface::new(32, 16);
        pixel_projection(&mut surface);
        surface.raster_pos(0, 0);

        let glyph = BitmapFont::FIXED_8X8.glyph('I').unwrap();
        surface.bitmap_glyph(glyph);
        surface.bitmap_glyph(glyph);

        assert_eq!(surface.state().raster_pixel(), Some((16, 0)));
        assert_eq!(surface.count_pixels([255, 255, 255, 255]) as u32, glyph.coverage() * 2);
    }

    #[test]
    fn test_glyphs_clip_at_edges() {
        let mut surface = SoftwareSurface::new(32, 16);
        pixel_projection(&mut surface);
        surface.raster_pos(28, 12);

        let glyph = BitmapFont::FIXED_8X8.glyph('#').unwrap();
        surface.bitmap_glyph(glyph);

        let drawn = surface.count_pixels([255, 255, 255, 255]) as u32;
        assert!(drawn > 0 && drawn < glyph.coverage());
    }

    #[test]
    fn test_invalid_raster_skips_glyphs() {
        let mut surface = SoftwareSurface::new(32, 16);
        pixel_projection(&mut surface);
        surface.raster_pos(0, -8);
        surface.bitmap_glyph(BitmapFont::FIXED_8X8.glyph('X').unwrap());
        assert_eq!(surface.count_pixels([0, 0, 0, 0]), 32 * 16);
    }

    #[test]
    fn test_stack_errors_are_latched_once() {
        let mut surface = SoftwareSurface::new(8, 8);
        surface.pop_matrix();
        surface.matrix_mode(MatrixMode::Projection);
        surface.pop_matrix();

        assert_eq!(surface.take_error(), Some(StackError::Underflow(MatrixMode::Modelview)));
        assert_eq!(surface.take_error(), None);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut surface = SoftwareSurface::new(8, 8);
        surface.resize(16, 4);
        assert_eq!(surface.state().viewport(), (16, 4));
        assert_eq!(surface.as_bytes().len(), 16 * 4 * 4);
    }
}
