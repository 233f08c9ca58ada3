//! OpenGL runtime errors.
use thiserror::Error;

/// Cumulative error type for OpenGL filter groups.
#[derive(Error, Debug)]
pub enum FilterChainError {
    /// A framebuffer could not be completed after attaching its texture.
    #[error("fbo initialization error {0:x}")]
    FramebufferInit(u32),
    /// The driver failed to create a GL object.
    #[error("opengl error: {0}")]
    GlError(String),
    /// A shader stage failed to compile.
    #[error("shader compile error: {0}")]
    GlCompileError(String),
    /// The shader program failed to link.
    #[error("program link error: {0}")]
    GlLinkError(String),
}

/// Result type for OpenGL filter groups.
pub type Result<T> = std::result::Result<T, FilterChainError>;
