/*!
# Forge Engine

Core traits and types for the Forge rendering engine.

This crate provides the platform-agnostic GPU resource layer. All driver work goes
through the [`GraphicsDevice`](graphics_device::GraphicsDevice) trait, which backend
crates (OpenGL via glow, etc.) implement for a concrete rendering context.

## Architecture

- **GraphicsDevice**: Driver capability trait (shader objects, programs, textures, samplers, buffers)
- **ShaderProgram**: Combined-source shader loader, compiler and linker
- **Texture**: 2D texture creation, PNG loading and updates
- **Sampler**: Texture sampling state
- **Buffer**: Vertex, index and instance buffers
- **Engine**: Global logger management
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod resource;
pub mod utils;

// Main forge namespace module
pub mod forge {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Graphics device trait
    pub use crate::graphics_device::GraphicsDevice;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module with all device-level types
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Utilities sub-module
    pub mod utils {
        pub use crate::utils::*;
    }
}
