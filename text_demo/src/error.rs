//! Demo error types

use simple_draw_text::config::ConfigError;
use thiserror::Error;

pub type DemoResult<T> = Result<T, DemoError>;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("GLFW initialization failed: {0}")]
    WindowInit(String),

    #[error("Window creation failed")]
    WindowCreation,

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("Shader program failed to link: {0}")]
    ProgramLink(String),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
