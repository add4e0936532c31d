//! Foundation module - Core utilities and types
//!
//! - Math types, colors and projection builders
//! - Monotonic clocks and frame pacing
//! - Logging utilities

pub mod logging;
pub mod math;
pub mod time;
