//! GPU resource module
//!
//! Resources own driver objects created on a shared graphics device and
//! release them when destroyed or dropped.

pub mod shader_source;
pub mod shader;
pub mod texture;
pub mod sampler;
pub mod buffer;
mod png_image;

pub use shader_source::{
    StageDescriptor, SourceParts,
    SHADER_STAGES, SHADER_STAGE_COUNT, VERSION_DIRECTIVE,
    split_version_directive,
};
pub use shader::ShaderProgram;
pub use texture::{Texture, TextureCreateInfo, TextureLoadInfo};
pub use sampler::{Sampler, SamplerInfo};
pub use buffer::{Buffer, BufferInfo, BufferKind, IndexType};
