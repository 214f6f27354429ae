/// GraphicsDevice trait - driver capability interface

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use crate::graphics_device::{
    ShaderObjectHandle, ProgramHandle, TextureHandle, SamplerHandle, BufferHandle,
};

// ============================================================================
// Common types
// ============================================================================

/// Location returned by attribute/uniform queries when the name is not active
pub const INVALID_LOCATION: i32 = -1;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Geometry shader
    Geometry,
    /// Fragment/Pixel shader
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Geometry => write!(f, "geometry"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Pixel layout of 8-bit-per-channel texture data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single red channel
    R,
    /// Red and green channels
    RG,
    /// Red, green and blue channels
    RGB,
    /// Red, green, blue and alpha channels
    RGBA,
}

impl PixelFormat {
    /// Number of 8-bit channels per pixel
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::R => 1,
            PixelFormat::RG => 2,
            PixelFormat::RGB => 3,
            PixelFormat::RGBA => 4,
        }
    }

    /// Pixel format for a channel count, `None` outside 1..=4
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(PixelFormat::R),
            2 => Some(PixelFormat::RG),
            3 => Some(PixelFormat::RGB),
            4 => Some(PixelFormat::RGBA),
            _ => None,
        }
    }
}

// ============================================================================
// Sampler state
// ============================================================================

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl TextureFilter {
    /// Whether the filter reads from the mipmap chain
    ///
    /// Only non-mipmapped filters are valid for magnification.
    pub fn uses_mipmaps(self) -> bool {
        !matches!(self, TextureFilter::Nearest | TextureFilter::Linear)
    }
}

/// Texture coordinate wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureWrap {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
}

/// Depth comparison mode of a sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareMode {
    /// Sample the texture value as-is
    None,
    /// Compare the reference coordinate with the depth texture value
    RefToTexture,
}

/// Comparison function used when [`CompareMode::RefToTexture`] is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// One sampler parameter together with its value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplerParameter {
    MinFilter(TextureFilter),
    MagFilter(TextureFilter),
    WrapS(TextureWrap),
    WrapT(TextureWrap),
    WrapR(TextureWrap),
    MinLod(f32),
    MaxLod(f32),
    LodBias(f32),
    CompareMode(CompareMode),
    CompareFunc(CompareFunc),
    /// Requires anisotropic filtering support; ignored by drivers without it
    MaxAnisotropy(f32),
    BorderColor([f32; 4]),
}

// ============================================================================
// Buffer state
// ============================================================================

/// Binding point of a buffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data
    Array,
    /// Vertex indices
    ElementArray,
}

/// Expected update frequency of buffer data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferUsage {
    /// Written once, drawn many times
    #[default]
    StaticDraw,
    /// Rewritten occasionally
    DynamicDraw,
    /// Rewritten for (almost) every draw
    StreamDraw,
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Driver capability trait
///
/// A thin, synchronous view of the GPU driver bound to one rendering context.
/// Every call must happen on the thread that owns that context. Object
/// creation reports refusal with `None`; status queries report compile/link
/// outcomes; info logs are returned as text (empty when the driver has nothing
/// to say).
///
/// Implemented by backend-specific devices (e.g., GlGraphicsDevice).
pub trait GraphicsDevice {
    // ===== SHADER OBJECTS =====

    /// Create a shader object for one stage
    fn create_shader_object(&mut self, stage: ShaderStage) -> Option<ShaderObjectHandle>;

    /// Replace the source of a shader object with the ordered concatenation of `segments`
    fn shader_source(&mut self, shader: ShaderObjectHandle, segments: &[&str]);

    /// Compile the current source of a shader object
    fn compile_shader(&mut self, shader: ShaderObjectHandle);

    /// Whether the last compilation succeeded
    fn shader_compile_status(&self, shader: ShaderObjectHandle) -> bool;

    /// Compiler diagnostics for a shader object
    fn shader_info_log(&self, shader: ShaderObjectHandle) -> String;

    /// Delete a shader object
    fn delete_shader_object(&mut self, shader: ShaderObjectHandle);

    // ===== PROGRAMS =====

    /// Create an empty program object
    fn create_program(&mut self) -> Option<ProgramHandle>;

    /// Attach a shader object to a program
    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderObjectHandle);

    /// Detach a shader object from a program
    fn detach_shader(&mut self, program: ProgramHandle, shader: ShaderObjectHandle);

    /// Link all attached shader objects
    fn link_program(&mut self, program: ProgramHandle);

    /// Whether the last link succeeded
    fn program_link_status(&self, program: ProgramHandle) -> bool;

    /// Linker diagnostics for a program
    fn program_info_log(&self, program: ProgramHandle) -> String;

    /// Delete a program object
    fn delete_program(&mut self, program: ProgramHandle);

    /// Location of a vertex attribute, or [`INVALID_LOCATION`]
    fn attribute_location(&self, program: ProgramHandle, name: &str) -> i32;

    /// Location of a uniform, or [`INVALID_LOCATION`]
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> i32;

    // ===== TEXTURES =====

    /// Create a texture object
    fn create_texture(&mut self) -> Option<TextureHandle>;

    /// Delete a texture object
    fn delete_texture(&mut self, texture: TextureHandle);

    /// Bind a texture (or nothing) to the 2D texture target
    fn bind_texture_2d(&mut self, texture: Option<TextureHandle>);

    /// Texture currently bound to the 2D texture target
    fn texture_binding_2d(&self) -> Option<TextureHandle>;

    /// Current row alignment for pixel uploads
    fn unpack_alignment(&self) -> i32;

    /// Set the row alignment for pixel uploads
    fn set_unpack_alignment(&mut self, alignment: i32);

    /// Allocate level 0 of the bound 2D texture, optionally filling it with `data`
    fn tex_image_2d(&mut self, width: u32, height: u32, format: PixelFormat, data: Option<&[u8]>);

    /// Overwrite the whole level 0 of the bound 2D texture
    fn tex_sub_image_2d(&mut self, width: u32, height: u32, format: PixelFormat, data: &[u8]);

    /// Generate the mipmap chain of the bound 2D texture
    fn generate_mipmap_2d(&mut self);

    // ===== SAMPLERS =====

    /// Create a sampler object
    fn create_sampler(&mut self) -> Option<SamplerHandle>;

    /// Delete a sampler object
    fn delete_sampler(&mut self, sampler: SamplerHandle);

    /// Set one parameter of a sampler object
    fn sampler_parameter(&mut self, sampler: SamplerHandle, parameter: SamplerParameter);

    // ===== BUFFERS =====

    /// Create a buffer object
    fn create_buffer(&mut self) -> Option<BufferHandle>;

    /// Delete a buffer object
    fn delete_buffer(&mut self, buffer: BufferHandle);

    /// Bind a buffer (or nothing) to a target
    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferHandle>);

    /// Buffer currently bound to a target
    fn buffer_binding(&self, target: BufferTarget) -> Option<BufferHandle>;

    /// (Re)allocate the store of the buffer bound to `target` with `size` bytes,
    /// optionally filled with `data`
    fn buffer_data(&mut self, target: BufferTarget, size: usize, data: Option<&[u8]>, usage: BufferUsage);

    /// Overwrite the start of the store of the buffer bound to `target`
    fn buffer_sub_data(&mut self, target: BufferTarget, data: &[u8]);
}

// ============================================================================
// Shared device access
// ============================================================================

/// Graphics device shared between the resources created on it
pub type SharedGraphicsDevice = Arc<Mutex<dyn GraphicsDevice>>;

/// Lock a shared device for the duration of one resource operation
///
/// A panic while the device was locked does not corrupt driver state, so a
/// poisoned lock is recovered rather than reported.
pub fn lock_device(device: &SharedGraphicsDevice) -> MutexGuard<'_, dyn GraphicsDevice + 'static> {
    device.lock().unwrap_or_else(PoisonError::into_inner)
}
