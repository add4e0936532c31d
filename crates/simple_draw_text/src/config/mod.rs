//! Configuration system
//!
//! Overlay settings can be loaded from TOML or RON; the format is chosen by the
//! file extension.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::Color;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A field holds a value the overlay cannot work with
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Text overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOverlayConfig {
    /// Width of the pixel-space projection
    pub screen_width: u32,
    /// Height of the pixel-space projection
    pub screen_height: u32,
    /// Color used by lines added without an explicit color
    pub text_color: Color,
    /// Integer scale of the 8x8 bitmap font
    pub font_scale: u32,
    /// Vertical distance between timed lines, in pixels
    pub line_height: u32,
}

impl Default for TextOverlayConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            text_color: Color::WHITE,
            font_scale: 1,
            line_height: 15,
        }
    }
}

impl Config for TextOverlayConfig {}

impl TextOverlayConfig {
    /// Check that every dimension is usable
    pub fn validate(&self) -> ConfigResult<()> {
        let non_zero = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("font_scale", self.font_scale),
            ("line_height", self.line_height),
        ];
        for (field, value) in non_zero {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Set the projection size
    #[must_use]
    pub const fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set the default line color
    #[must_use]
    pub const fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Set the line height
    #[must_use]
    pub const fn with_line_height(mut self, line_height: u32) -> Self {
        self.line_height = line_height;
        self
    }
}
