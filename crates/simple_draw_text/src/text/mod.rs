//! Text drawing
//!
//! [`TextRenderer`] draws a single string immediately; with the `timing` feature,
//! [`SimpleDrawText`] keeps a list of lines that expire on their own.

pub mod draw;
#[cfg(feature = "timing")]
pub mod lines;

pub use draw::TextRenderer;
#[cfg(feature = "timing")]
pub use lines::{LineDuration, SimpleDrawText, TextLine};
