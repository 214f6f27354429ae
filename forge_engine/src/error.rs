//! Error types for the Forge engine
//!
//! This module defines the error types used throughout the engine,
//! including shader compilation, texture creation and driver failures.
//!
//! Programmer errors (using an invalid resource, initializing a resource twice)
//! are not represented here: they panic at the call site.

use std::fmt;
use crate::graphics_device::ShaderStage;

/// Result type for Forge engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Forge engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Backend-specific error (OpenGL, lock poisoning, etc.)
    BackendError(String),

    /// Invalid resource argument (texture size, pixel data, file format)
    InvalidResource(String),

    /// Shader source text is empty
    EmptySource,

    /// A file could not be read
    IoFailure(String),

    /// The driver refused to create a shader object, program or texture
    AllocationFailure(String),

    /// A shader stage failed to compile
    CompileFailure {
        /// Stage that failed
        stage: ShaderStage,
        /// Driver info log (may be empty)
        log: String,
    },

    /// The shader program failed to link
    LinkFailure {
        /// Driver info log (may be empty)
        log: String,
    },

    /// Shader source contains none of the known stage markers
    NoStagesFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::EmptySource => write!(f, "Shader code cannot be empty"),
            Error::IoFailure(path) => write!(f, "Could not read file: {}", path),
            Error::AllocationFailure(msg) => write!(f, "Allocation failed: {}", msg),
            Error::CompileFailure { stage, log } => {
                if log.is_empty() {
                    write!(f, "Could not compile {} shader", stage)
                } else {
                    write!(f, "Could not compile {} shader: {}", stage, log)
                }
            }
            Error::LinkFailure { log } => {
                if log.is_empty() {
                    write!(f, "Could not link shader program")
                } else {
                    write!(f, "Could not link shader program: {}", log)
                }
            }
            Error::NoStagesFound => write!(f, "Could not find any shader objects"),
        }
    }
}

impl std::error::Error for Error {}
