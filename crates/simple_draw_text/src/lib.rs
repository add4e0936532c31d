//! # Simple Draw Text
//!
//! Bitmap-font text overlay for 3D scenes, plus a small registry of timed
//! on-screen text lines.
//!
//! ## Features
//!
//! - **Immediate Renderer**: draws one string of bitmap glyphs at a pixel position,
//!   leaving the 3D projection exactly as it found it
//! - **Timed Lines**: a scrolling list of lines that expire after a display duration
//! - **Backend Agnostic**: everything draws through the [`render::DrawSurface`] trait
//! - **Software Surface**: a CPU framebuffer backend usable without a GPU
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # #[cfg(feature = "timing")]
//! # {
//! use simple_draw_text::prelude::*;
//!
//! let mut overlay = SimpleDrawText::new(TextOverlayConfig::default());
//! overlay.add_text("Always here", LineDuration::Forever);
//! overlay.add_colored_text("Gone in a second", Color::RED, 1000);
//!
//! let mut surface = SoftwareSurface::new(800, 600);
//! loop {
//!     surface.clear(Color::BLACK, 0.0);
//!     overlay.render(&mut surface);
//!     # break;
//! }
//! # }
//! ```
//!
//! ## Cargo Features
//!
//! - `timing` (default): the timed line registry, `SimpleDrawText`
//!   and `LineDuration`. Without it only the immediate
//!   [`TextRenderer`](text::TextRenderer) and the surfaces are built:
//!
//! ```rust
//! use simple_draw_text::prelude::*;
//!
//! let mut surface = RecordingSurface::new(800, 600);
//! TextRenderer::new(800, 600).draw_text(&mut surface, "Hello", 250, 550, Color::RED);
//! assert_eq!(surface.glyph_count(), 5);
//! ```

pub mod config;
pub mod font;
pub mod foundation;
pub mod render;
pub mod text;

/// Common imports for overlay users
pub mod prelude {
    #[cfg(feature = "timing")]
    pub use crate::text::{LineDuration, SimpleDrawText, TextLine};
    pub use crate::{
        config::{Config, ConfigError, TextOverlayConfig},
        font::BitmapFont,
        foundation::{
            math::{Color, Mat4, Vec3},
            time::{Clock, FrameTimer, ManualClock, SystemClock},
        },
        render::{DrawCommand, DrawSurface, MatrixMode, RecordingSurface, SoftwareSurface},
        text::TextRenderer,
    };
}
