/// Graphics device module - driver capability trait and device-level types

// Module declarations
pub mod graphics_device;
pub mod handle;
pub mod config;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use handle::*;
pub use config::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
