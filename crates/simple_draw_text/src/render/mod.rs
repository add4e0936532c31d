//! Rendering surfaces
//!
//! Text is drawn through [`DrawSurface`]; this module provides the trait, the CPU
//! model of fixed-function transform state shared by the built-in surfaces, a
//! software framebuffer and a call recorder.

pub mod fixed_function;
pub mod recording;
pub mod software;
pub mod surface;

pub use fixed_function::{FixedFunctionState, MatrixStack, RasterPosition, StackError, StackResult};
pub use recording::{DrawCommand, RecordingSurface};
pub use software::SoftwareSurface;
pub use surface::{DrawSurface, MatrixMode};
