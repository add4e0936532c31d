//! Text overlay demo
//!
//! Draws bitmap text over a rotating 3D cube. Settings are read from
//! `text_demo.toml` (or the file named by `TEXT_DEMO_CONFIG`) when present.

mod app;
mod cube;
mod error;
mod gl_util;
mod overlay_pass;
mod window;

use std::path::PathBuf;

use simple_draw_text::config::{Config, TextOverlayConfig};
use simple_draw_text::foundation::logging;

use crate::app::TextDemoApp;
use crate::error::DemoResult;

const DEFAULT_CONFIG_PATH: &str = "text_demo.toml";

fn load_config() -> DemoResult<TextOverlayConfig> {
    let path = std::env::var_os("TEXT_DEMO_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if path.exists() {
        log::info!("Loading overlay config from {}", path.display());
        Ok(TextOverlayConfig::load_from_file(&path)?)
    } else {
        log::info!("No config at {}, using defaults", path.display());
        Ok(TextOverlayConfig::default())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    log::info!("Starting text overlay demo");

    let config = load_config()?;
    let mut app = TextDemoApp::new(config)?;

    match app.run() {
        Ok(()) => {
            log::info!("Text demo finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Application error: {}", e);
            Err(e.into())
        }
    }
}
