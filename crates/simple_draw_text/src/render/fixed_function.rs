//! CPU model of fixed-function transform state
//!
//! Tracks the modelview and projection matrix stacks, the current color and the
//! current raster position the same way the fixed-function pipeline does. Software
//! and recording surfaces build on this so that text drawing can be checked without
//! a GPU.

use thiserror::Error;

use super::surface::MatrixMode;
use crate::foundation::math::{Color, Mat4, Vec4};

/// Modelview stack depth (the minimum the fixed-function pipeline guarantees)
pub const MODELVIEW_STACK_DEPTH: usize = 32;

/// Projection stack depth (the minimum the fixed-function pipeline guarantees)
pub const PROJECTION_STACK_DEPTH: usize = 2;

/// Result type for matrix stack operations
pub type StackResult<T> = Result<T, StackError>;

/// Matrix stack misuse
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// Push on a full stack
    #[error("{0:?} matrix stack overflow")]
    Overflow(MatrixMode),

    /// Pop with only the base matrix left
    #[error("{0:?} matrix stack underflow")]
    Underflow(MatrixMode),
}

/// Bounded stack of 4x4 matrices that always holds at least one entry
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixStack {
    mode: MatrixMode,
    entries: Vec<Mat4>,
    max_depth: usize,
}

impl MatrixStack {
    /// Create a stack holding a single identity matrix
    pub fn new(mode: MatrixMode, max_depth: usize) -> Self {
        Self {
            mode,
            entries: vec![Mat4::identity()],
            max_depth: max_depth.max(1),
        }
    }

    /// Current top matrix
    pub fn top(&self) -> &Mat4 {
        // Never empty: pop refuses to remove the base entry
        &self.entries[self.entries.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    /// Number of entries, including the base matrix
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Duplicate the top entry
    pub fn push(&mut self) -> StackResult<()> {
        if self.entries.len() >= self.max_depth {
            return Err(StackError::Overflow(self.mode));
        }
        let top = *self.top();
        self.entries.push(top);
        Ok(())
    }

    /// Remove the top entry
    pub fn pop(&mut self) -> StackResult<()> {
        if self.entries.len() <= 1 {
            return Err(StackError::Underflow(self.mode));
        }
        self.entries.pop();
        Ok(())
    }

    /// Replace the top entry with the identity
    pub fn load_identity(&mut self) {
        *self.top_mut() = Mat4::identity();
    }

    /// Replace the top entry
    pub fn load(&mut self, matrix: &Mat4) {
        *self.top_mut() = *matrix;
    }

    /// Post-multiply the top entry
    pub fn mult(&mut self, matrix: &Mat4) {
        let top = self.top_mut();
        *top *= matrix;
    }
}

/// Window-space raster position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterPosition {
    /// Window x, origin at the left edge
    pub x: f32,
    /// Window y, origin at the bottom edge
    pub y: f32,
    /// Window depth in `[0, 1]`
    pub z: f32,
    /// Color latched when the position was set
    pub color: Color,
    /// False when the position fell outside the view volume; bitmaps are then skipped
    pub valid: bool,
}

impl Default for RasterPosition {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            color: Color::WHITE,
            valid: true,
        }
    }
}

/// Transform and color state of an immediate-mode surface
#[derive(Debug, Clone)]
pub struct FixedFunctionState {
    mode: MatrixMode,
    modelview: MatrixStack,
    projection: MatrixStack,
    color: Color,
    raster: RasterPosition,
    viewport: (u32, u32),
}

impl FixedFunctionState {
    /// Fresh state with identity matrices and a `width` x `height` viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            mode: MatrixMode::Modelview,
            modelview: MatrixStack::new(MatrixMode::Modelview, MODELVIEW_STACK_DEPTH),
            projection: MatrixStack::new(MatrixMode::Projection, PROJECTION_STACK_DEPTH),
            color: Color::WHITE,
            raster: RasterPosition::default(),
            viewport: (width, height),
        }
    }

    /// Current matrix mode
    pub const fn mode(&self) -> MatrixMode {
        self.mode
    }

    /// Select the stack that matrix operations apply to
    pub fn set_mode(&mut self, mode: MatrixMode) {
        self.mode = mode;
    }

    /// Stack for `mode`
    pub const fn stack(&self, mode: MatrixMode) -> &MatrixStack {
        match mode {
            MatrixMode::Modelview => &self.modelview,
            MatrixMode::Projection => &self.projection,
        }
    }

    fn current_stack_mut(&mut self) -> &mut MatrixStack {
        match self.mode {
            MatrixMode::Modelview => &mut self.modelview,
            MatrixMode::Projection => &mut self.projection,
        }
    }

    /// Push the current stack
    pub fn push(&mut self) -> StackResult<()> {
        self.current_stack_mut().push()
    }

    /// Pop the current stack
    pub fn pop(&mut self) -> StackResult<()> {
        self.current_stack_mut().pop()
    }

    /// Load identity into the current stack
    pub fn load_identity(&mut self) {
        self.current_stack_mut().load_identity();
    }

    /// Replace the top of the current stack
    pub fn load(&mut self, matrix: &Mat4) {
        self.current_stack_mut().load(matrix);
    }

    /// Post-multiply the current stack
    pub fn mult(&mut self, matrix: &Mat4) {
        self.current_stack_mut().mult(matrix);
    }

    /// Top of the modelview stack
    pub fn modelview(&self) -> &Mat4 {
        self.modelview.top()
    }

    /// Top of the projection stack
    pub fn projection(&self) -> &Mat4 {
        self.projection.top()
    }

    /// Projection times modelview
    pub fn model_view_projection(&self) -> Mat4 {
        self.projection() * self.modelview()
    }

    /// Current color
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Set the current color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Viewport size in pixels
    pub const fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Resize the viewport
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Current raster position
    pub const fn raster(&self) -> RasterPosition {
        self.raster
    }

    /// Project object-space `(x, y, 0, 1)` into window space
    #[allow(clippy::cast_precision_loss)]
    pub fn set_raster_pos(&mut self, x: i32, y: i32) {
        let clip = self.model_view_projection() * Vec4::new(x as f32, y as f32, 0.0, 1.0);
        let w = clip.w;
        let tolerance = w.abs() * 1e-5;
        let inside = w > 0.0
            && clip.x.abs() <= w + tolerance
            && clip.y.abs() <= w + tolerance
            && clip.z.abs() <= w + tolerance;

        if !inside {
            self.raster = RasterPosition {
                color: self.color,
                valid: false,
                ..self.raster
            };
            return;
        }

        let (width, height) = self.viewport;
        let ndc = clip.xyz() / w;
        self.raster = RasterPosition {
            x: (ndc.x + 1.0) * 0.5 * width as f32,
            y: (ndc.y + 1.0) * 0.5 * height as f32,
            z: (ndc.z + 1.0) * 0.5,
            color: self.color,
            valid: true,
        };
    }

    /// Move the raster position right by `dx` pixels
    #[allow(clippy::cast_precision_loss)]
    pub fn advance_raster(&mut self, dx: u32) {
        if self.raster.valid {
            self.raster.x += dx as f32;
        }
    }

    /// Integer pixel where the next bitmap's origin lands, if the raster position is valid
    #[allow(clippy::cast_possible_truncation)]
    pub fn raster_pixel(&self) -> Option<(i32, i32)> {
        // Pixel-aligned projections land on integers; rounding absorbs float error
        self.raster
            .valid
            .then(|| (self.raster.x.round() as i32, self.raster.y.round() as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{orthographic, perspective};
    use approx::assert_relative_eq;

    #[test]
    fn test_stack_never_pops_base() {
        let mut stack = MatrixStack::new(MatrixMode::Modelview, 4);
        assert_eq!(stack.pop(), Err(StackError::Underflow(MatrixMode::Modelview)));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_stack_overflow_reports_mode() {
        let mut stack = MatrixStack::new(MatrixMode::Projection, PROJECTION_STACK_DEPTH);
        assert!(stack.push().is_ok());
        assert_eq!(stack.push(), Err(StackError::Overflow(MatrixMode::Projection)));
    }

    #[test]
    fn test_push_pop_restores_matrix() {
        let mut state = FixedFunctionState::new(800, 600);
        state.set_mode(MatrixMode::Projection);
        let persp = perspective(45.0, 800.0 / 600.0, 1.0, 50.0);
        state.load(&persp);

        state.push().unwrap();
        state.load_identity();
        state.mult(&orthographic(0.0, 800.0, 0.0, 600.0, 0.0, 1.0));
        state.pop().unwrap();

        assert_eq!(*state.projection(), persp);
    }

    #[test]
    fn test_raster_pos_in_pixel_projection() {
        let mut state = FixedFunctionState::new(800, 600);
        state.set_mode(MatrixMode::Projection);
        state.mult(&orthographic(0.0, 800.0, 0.0, 600.0, 0.0, 1.0));
        state.set_mode(MatrixMode::Modelview);
        state.set_color(Color::GREEN);

        state.set_raster_pos(250, 550);
        let raster = state.raster();
        assert!(raster.valid);
        assert_relative_eq!(raster.x, 250.0, epsilon = 1e-3);
        assert_relative_eq!(raster.y, 550.0, epsilon = 1e-3);
        assert_eq!(raster.color, Color::GREEN);
        assert_eq!(state.raster_pixel(), Some((250, 550)));
    }

    #[test]
    fn test_raster_pos_on_left_edge_is_valid() {
        let mut state = FixedFunctionState::new(800, 600);
        state.set_mode(MatrixMode::Projection);
        state.mult(&orthographic(0.0, 800.0, 0.0, 600.0, 0.0, 1.0));

        state.set_raster_pos(0, 585);
        assert_eq!(state.raster_pixel(), Some((0, 585)));
    }

    #[test]
    fn test_raster_pos_outside_volume_is_invalid() {
        let mut state = FixedFunctionState::new(800, 600);
        state.set_mode(MatrixMode::Projection);
        state.mult(&orthographic(0.0, 800.0, 0.0, 600.0, 0.0, 1.0));

        state.set_raster_pos(0, -15);
        assert!(!state.raster().valid);
        assert_eq!(state.raster_pixel(), None);

        state.advance_raster(8);
        assert_eq!(state.raster_pixel(), None);
    }

    #[test]
    fn test_color_latched_at_raster_pos() {
        let mut state = FixedFunctionState::new(800, 600);
        state.set_color(Color::RED);
        state.set_raster_pos(0, 0);
        state.set_color(Color::BLUE);
        assert_eq!(state.raster().color, Color::RED);
    }
}
