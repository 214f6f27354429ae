/// Engine enum to OpenGL constant conversion

use forge_engine::forge::render::{
    BufferTarget, BufferUsage, CompareFunc, CompareMode, PixelFormat, SamplerParameter, ShaderStage,
    TextureFilter, TextureWrap,
};

/// `GL_TEXTURE_MAX_ANISOTROPY` (core in 4.6, EXT/ARB extension before)
pub(crate) const TEXTURE_MAX_ANISOTROPY: u32 = 0x84FE;

/// Convert a shader stage to its OpenGL shader type
pub(crate) fn shader_stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

/// Convert a pixel format to its OpenGL pixel data format
pub(crate) fn pixel_format_to_gl(format: PixelFormat) -> u32 {
    match format {
        PixelFormat::R => glow::RED,
        PixelFormat::RG => glow::RG,
        PixelFormat::RGB => glow::RGB,
        PixelFormat::RGBA => glow::RGBA,
    }
}

/// Convert a texture size to the signed size OpenGL expects, saturating
pub(crate) fn gl_size(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Convert a byte count to the signed size OpenGL expects, saturating
pub(crate) fn gl_byte_size(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

// ===== SAMPLERS =====

/// Value of a sampler parameter in the form glSamplerParameter takes it
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum GlSamplerValue {
    Int(i32),
    Float(f32),
    Color([f32; 4]),
}

pub(crate) fn texture_filter_to_gl(filter: TextureFilter) -> u32 {
    match filter {
        TextureFilter::Nearest => glow::NEAREST,
        TextureFilter::Linear => glow::LINEAR,
        TextureFilter::NearestMipmapNearest => glow::NEAREST_MIPMAP_NEAREST,
        TextureFilter::LinearMipmapNearest => glow::LINEAR_MIPMAP_NEAREST,
        TextureFilter::NearestMipmapLinear => glow::NEAREST_MIPMAP_LINEAR,
        TextureFilter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR,
    }
}

pub(crate) fn texture_wrap_to_gl(wrap: TextureWrap) -> u32 {
    match wrap {
        TextureWrap::Repeat => glow::REPEAT,
        TextureWrap::MirroredRepeat => glow::MIRRORED_REPEAT,
        TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE,
        TextureWrap::ClampToBorder => glow::CLAMP_TO_BORDER,
    }
}

pub(crate) fn compare_mode_to_gl(mode: CompareMode) -> u32 {
    match mode {
        CompareMode::None => glow::NONE,
        CompareMode::RefToTexture => glow::COMPARE_REF_TO_TEXTURE,
    }
}

pub(crate) fn compare_func_to_gl(func: CompareFunc) -> u32 {
    match func {
        CompareFunc::Never => glow::NEVER,
        CompareFunc::Less => glow::LESS,
        CompareFunc::Equal => glow::EQUAL,
        CompareFunc::LessEqual => glow::LEQUAL,
        CompareFunc::Greater => glow::GREATER,
        CompareFunc::NotEqual => glow::NOTEQUAL,
        CompareFunc::GreaterEqual => glow::GEQUAL,
        CompareFunc::Always => glow::ALWAYS,
    }
}

/// Split a sampler parameter into its OpenGL name and value
pub(crate) fn sampler_parameter_to_gl(parameter: SamplerParameter) -> (u32, GlSamplerValue) {
    use GlSamplerValue::{Color, Float, Int};

    // Enum values always fit in a GLint
    let int = |value: u32| Int(value as i32);

    match parameter {
        SamplerParameter::MinFilter(filter) => (glow::TEXTURE_MIN_FILTER, int(texture_filter_to_gl(filter))),
        SamplerParameter::MagFilter(filter) => (glow::TEXTURE_MAG_FILTER, int(texture_filter_to_gl(filter))),
        SamplerParameter::WrapS(wrap) => (glow::TEXTURE_WRAP_S, int(texture_wrap_to_gl(wrap))),
        SamplerParameter::WrapT(wrap) => (glow::TEXTURE_WRAP_T, int(texture_wrap_to_gl(wrap))),
        SamplerParameter::WrapR(wrap) => (glow::TEXTURE_WRAP_R, int(texture_wrap_to_gl(wrap))),
        SamplerParameter::MinLod(value) => (glow::TEXTURE_MIN_LOD, Float(value)),
        SamplerParameter::MaxLod(value) => (glow::TEXTURE_MAX_LOD, Float(value)),
        SamplerParameter::LodBias(value) => (glow::TEXTURE_LOD_BIAS, Float(value)),
        SamplerParameter::CompareMode(mode) => (glow::TEXTURE_COMPARE_MODE, int(compare_mode_to_gl(mode))),
        SamplerParameter::CompareFunc(func) => (glow::TEXTURE_COMPARE_FUNC, int(compare_func_to_gl(func))),
        SamplerParameter::MaxAnisotropy(value) => (TEXTURE_MAX_ANISOTROPY, Float(value)),
        SamplerParameter::BorderColor(color) => (glow::TEXTURE_BORDER_COLOR, Color(color)),
    }
}

// ===== BUFFERS =====

pub(crate) fn buffer_target_to_gl(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

/// Query name of the buffer bound to a target
pub(crate) fn buffer_binding_to_gl(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER_BINDING,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER_BINDING,
    }
}

pub(crate) fn buffer_usage_to_gl(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::StaticDraw => glow::STATIC_DRAW,
        BufferUsage::DynamicDraw => glow::DYNAMIC_DRAW,
        BufferUsage::StreamDraw => glow::STREAM_DRAW,
    }
}

#[cfg(test)]
#[path = "gl_format_tests.rs"]
mod tests;
