/*!
# Forge Engine - OpenGL Backend

OpenGL implementation of the Forge engine graphics device.

This crate implements the forge_engine `GraphicsDevice` trait on top of a
[`glow::Context`]. The context is created by the application (from its window
or windowing library) and handed over together with a device configuration.
*/

mod gl_graphics_device;
mod gl_format;
#[cfg(feature = "gl-debug-output")]
mod debug;

pub use gl_graphics_device::GlGraphicsDevice;

/// Minimum OpenGL version required by the device (geometry shaders)
pub const MIN_GL_VERSION: (u32, u32) = (3, 2);
