//! Surface that records draw calls

use super::fixed_function::{FixedFunctionState, StackError};
use super::surface::{DrawSurface, MatrixMode};
use crate::font::Glyph;
use crate::foundation::math::{orthographic, Color, Mat4};

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Matrix mode switch
    MatrixMode(MatrixMode),
    /// Push of the current stack
    PushMatrix,
    /// Pop of the current stack
    PopMatrix,
    /// Identity load
    LoadIdentity,
    /// Arbitrary matrix multiply
    MultMatrix(Mat4),
    /// Orthographic multiply
    Ortho {
        /// Left plane
        left: f32,
        /// Right plane
        right: f32,
        /// Bottom plane
        bottom: f32,
        /// Top plane
        top: f32,
        /// Near plane
        near: f32,
        /// Far plane
        far: f32,
    },
    /// Current color change
    SetColor(Color),
    /// Raster position in object coordinates
    RasterPos {
        /// Object x
        x: i32,
        /// Object y
        y: i32,
    },
    /// Glyph blit
    Bitmap(Glyph),
}

/// Records every call while keeping a live transform state
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    state: FixedFunctionState,
    error: Option<StackError>,
}

impl RecordingSurface {
    /// Create an empty recorder with a `width` x `height` viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            commands: Vec::new(),
            state: FixedFunctionState::new(width, height),
            error: None,
        }
    }

    /// Recorded calls in order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget recorded calls; transform state is kept
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Transform state after the recorded calls
    pub const fn state(&self) -> &FixedFunctionState {
        &self.state
    }

    /// Mutable transform state
    pub fn state_mut(&mut self) -> &mut FixedFunctionState {
        &mut self.state
    }

    /// Return and reset the first stack error seen
    pub fn take_error(&mut self) -> Option<StackError> {
        self.error.take()
    }

    /// Number of glyph blits
    pub fn glyph_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Bitmap(_)))
            .count()
    }

    /// Raster positions in call order
    pub fn raster_positions(&self) -> Vec<(i32, i32)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::RasterPos { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    fn latch(&mut self, result: Result<(), StackError>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }
}

impl DrawSurface for RecordingSurface {
    fn matrix_mode(&mut self, mode: MatrixMode) {
        self.commands.push(DrawCommand::MatrixMode(mode));
        self.state.set_mode(mode);
    }

    fn push_matrix(&mut self) {
        self.commands.push(DrawCommand::PushMatrix);
        let result = self.state.push();
        self.latch(result);
    }

    fn pop_matrix(&mut self) {
        self.commands.push(DrawCommand::PopMatrix);
        let result = self.state.pop();
        self.latch(result);
    }

    fn load_identity(&mut self) {
        self.commands.push(DrawCommand::LoadIdentity);
        self.state.load_identity();
    }

    fn mult_matrix(&mut self, matrix: &Mat4) {
        self.commands.push(DrawCommand::MultMatrix(*matrix));
        self.state.mult(matrix);
    }

    fn ortho(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.commands.push(DrawCommand::Ortho { left, right, bottom, top, near, far });
        self.state.mult(&orthographic(left, right, bottom, top, near, far));
    }

    fn set_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetColor(color));
        self.state.set_color(color);
    }

    fn raster_pos(&mut self, x: i32, y: i32) {
        self.commands.push(DrawCommand::RasterPos { x, y });
        self.state.set_raster_pos(x, y);
    }

    fn bitmap_glyph(&mut self, glyph: Glyph) {
        self.commands.push(DrawCommand::Bitmap(glyph));
        self.state.advance_raster(glyph.advance());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BitmapFont;

    #[test]
    fn test_records_calls_in_order() {
        let mut surface = RecordingSurface::new(800, 600);
        surface.matrix_mode(MatrixMode::Projection);
        surface.push_matrix();
        surface.ortho(0.0, 800.0, 0.0, 600.0, 0.0, 1.0);
        surface.raster_pos(10, 20);
        surface.bitmap_glyph(BitmapFont::FIXED_8X8.glyph('a').unwrap());
        surface.pop_matrix();

        assert_eq!(surface.commands().len(), 6);
        assert_eq!(surface.commands()[0], DrawCommand::MatrixMode(MatrixMode::Projection));
        assert_eq!(surface.glyph_count(), 1);
        assert_eq!(surface.raster_positions(), vec![(10, 20)]);
        assert_eq!(surface.take_error(), None);
    }

    #[test]
    fn test_tracks_stack_errors() {
        let mut surface = RecordingSurface::new(800, 600);
        surface.matrix_mode(MatrixMode::Projection);
        surface.push_matrix();
        surface.push_matrix();
        assert_eq!(surface.take_error(), Some(StackError::Overflow(MatrixMode::Projection)));
    }
}
