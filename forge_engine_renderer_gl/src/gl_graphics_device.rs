/// OpenGL graphics device implementation

use forge_engine::forge::render::{
    BufferHandle, BufferTarget, BufferUsage, Config, GraphicsDevice, PixelFormat, ProgramHandle,
    SamplerHandle, SamplerParameter, ShaderObjectHandle, ShaderStage, TextureHandle, INVALID_LOCATION,
};
use forge_engine::forge::Result;
use forge_engine::{engine_bail, engine_debug, engine_info};
use glow::HasContext;

use crate::gl_format::{
    buffer_binding_to_gl, buffer_target_to_gl, buffer_usage_to_gl, gl_byte_size, gl_size,
    pixel_format_to_gl, sampler_parameter_to_gl, shader_stage_to_gl, GlSamplerValue,
};
use crate::MIN_GL_VERSION;

// ===== HANDLE CONVERSION =====

fn native_shader(shader: ShaderObjectHandle) -> glow::NativeShader {
    glow::NativeShader(shader.into())
}

fn native_program(program: ProgramHandle) -> glow::NativeProgram {
    glow::NativeProgram(program.into())
}

fn native_texture(texture: TextureHandle) -> glow::NativeTexture {
    glow::NativeTexture(texture.into())
}

fn native_sampler(sampler: SamplerHandle) -> glow::NativeSampler {
    glow::NativeSampler(sampler.into())
}

fn native_buffer(buffer: BufferHandle) -> glow::NativeBuffer {
    glow::NativeBuffer(buffer.into())
}

/// Whether a context can take `GL_TEXTURE_MAX_ANISOTROPY`
fn supports_anisotropy(version: (u32, u32), extensions: &std::collections::HashSet<String>) -> bool {
    version >= (4, 6)
        || extensions.contains("GL_EXT_texture_filter_anisotropic")
        || extensions.contains("GL_ARB_texture_filter_anisotropic")
}

/// Graphics device backed by an OpenGL context
///
/// Owns the [`glow::Context`]. Every method must be called on the thread the
/// context is current on.
pub struct GlGraphicsDevice {
    gl: glow::Context,
    config: Config,
    anisotropy_supported: bool,
}

impl GlGraphicsDevice {
    /// Wrap a current OpenGL context
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the context is older than [`MIN_GL_VERSION`]
    /// or is an OpenGL ES context.
    pub fn new(gl: glow::Context, config: Config) -> Result<Self> {
        let version = gl.version();
        if version.is_embedded {
            engine_bail!("forge::gl", "OpenGL ES contexts are not supported ({})", version.vendor_info);
        }
        if (version.major, version.minor) < MIN_GL_VERSION {
            engine_bail!(
                "forge::gl",
                "OpenGL {}.{} is required, context provides {}.{}",
                MIN_GL_VERSION.0,
                MIN_GL_VERSION.1,
                version.major,
                version.minor
            );
        }

        engine_info!(
            "forge::gl",
            "Created OpenGL {}.{} device ({})",
            version.major,
            version.minor,
            version.vendor_info
        );

        let anisotropy_supported = supports_anisotropy((version.major, version.minor), gl.supported_extensions());
        if !anisotropy_supported {
            engine_debug!("forge::gl", "Anisotropic filtering is not supported, sampler anisotropy is ignored");
        }

        #[allow(unused_mut)]
        let mut gl = gl;

        if config.enable_debug_output {
            #[cfg(feature = "gl-debug-output")]
            crate::debug::install(&mut gl, &config);

            #[cfg(not(feature = "gl-debug-output"))]
            forge_engine::engine_warn!("forge::gl", "Debug output requested but the gl-debug-output feature is disabled");
        }

        Ok(Self {
            gl,
            config,
            anisotropy_supported,
        })
    }

    /// Underlying OpenGL context
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Configuration the device was created with
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl GraphicsDevice for GlGraphicsDevice {
    // ===== SHADER OBJECTS =====

    fn create_shader_object(&mut self, stage: ShaderStage) -> Option<ShaderObjectHandle> {
        match unsafe { self.gl.create_shader(shader_stage_to_gl(stage)) } {
            Ok(shader) => Some(ShaderObjectHandle::from(shader.0)),
            Err(e) => {
                engine_debug!("forge::gl", "glCreateShader({}) failed: {}", stage, e);
                None
            }
        }
    }

    fn shader_source(&mut self, shader: ShaderObjectHandle, segments: &[&str]) {
        let source = segments.concat();
        unsafe { self.gl.shader_source(native_shader(shader), &source) }
    }

    fn compile_shader(&mut self, shader: ShaderObjectHandle) {
        unsafe { self.gl.compile_shader(native_shader(shader)) }
    }

    fn shader_compile_status(&self, shader: ShaderObjectHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(native_shader(shader)) }
    }

    fn shader_info_log(&self, shader: ShaderObjectHandle) -> String {
        unsafe { self.gl.get_shader_info_log(native_shader(shader)) }
    }

    fn delete_shader_object(&mut self, shader: ShaderObjectHandle) {
        unsafe { self.gl.delete_shader(native_shader(shader)) }
    }

    // ===== PROGRAMS =====

    fn create_program(&mut self) -> Option<ProgramHandle> {
        match unsafe { self.gl.create_program() } {
            Ok(program) => Some(ProgramHandle::from(program.0)),
            Err(e) => {
                engine_debug!("forge::gl", "glCreateProgram failed: {}", e);
                None
            }
        }
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderObjectHandle) {
        unsafe { self.gl.attach_shader(native_program(program), native_shader(shader)) }
    }

    fn detach_shader(&mut self, program: ProgramHandle, shader: ShaderObjectHandle) {
        unsafe { self.gl.detach_shader(native_program(program), native_shader(shader)) }
    }

    fn link_program(&mut self, program: ProgramHandle) {
        unsafe { self.gl.link_program(native_program(program)) }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        unsafe { self.gl.get_program_link_status(native_program(program)) }
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        unsafe { self.gl.get_program_info_log(native_program(program)) }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        unsafe { self.gl.delete_program(native_program(program)) }
    }

    fn attribute_location(&self, program: ProgramHandle, name: &str) -> i32 {
        unsafe { self.gl.get_attrib_location(native_program(program), name) }
            .and_then(|location| i32::try_from(location).ok())
            .unwrap_or(INVALID_LOCATION)
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> i32 {
        unsafe { self.gl.get_uniform_location(native_program(program), name) }
            .and_then(|location| i32::try_from(location.0).ok())
            .unwrap_or(INVALID_LOCATION)
    }

    // ===== TEXTURES =====

    fn create_texture(&mut self) -> Option<TextureHandle> {
        match unsafe { self.gl.create_texture() } {
            Ok(texture) => Some(TextureHandle::from(texture.0)),
            Err(e) => {
                engine_debug!("forge::gl", "glGenTextures failed: {}", e);
                None
            }
        }
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        unsafe { self.gl.delete_texture(native_texture(texture)) }
    }

    fn bind_texture_2d(&mut self, texture: Option<TextureHandle>) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture.map(native_texture)) }
    }

    fn texture_binding_2d(&self) -> Option<TextureHandle> {
        let raw = unsafe { self.gl.get_parameter_i32(glow::TEXTURE_BINDING_2D) };
        u32::try_from(raw).ok().and_then(TextureHandle::new)
    }

    fn unpack_alignment(&self) -> i32 {
        unsafe { self.gl.get_parameter_i32(glow::UNPACK_ALIGNMENT) }
    }

    fn set_unpack_alignment(&mut self, alignment: i32) {
        unsafe { self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, alignment) }
    }

    fn tex_image_2d(&mut self, width: u32, height: u32, format: PixelFormat, data: Option<&[u8]>) {
        let gl_format = pixel_format_to_gl(format);
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                gl_format as i32,
                gl_size(width),
                gl_size(height),
                0,
                gl_format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(data),
            );
        }
    }

    fn tex_sub_image_2d(&mut self, width: u32, height: u32, format: PixelFormat, data: &[u8]) {
        unsafe {
            self.gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                gl_size(width),
                gl_size(height),
                pixel_format_to_gl(format),
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            );
        }
    }

    fn generate_mipmap_2d(&mut self) {
        unsafe { self.gl.generate_mipmap(glow::TEXTURE_2D) }
    }

    // ===== SAMPLERS =====

    fn create_sampler(&mut self) -> Option<SamplerHandle> {
        match unsafe { self.gl.create_sampler() } {
            Ok(sampler) => Some(SamplerHandle::from(sampler.0)),
            Err(e) => {
                engine_debug!("forge::gl", "glGenSamplers failed: {}", e);
                None
            }
        }
    }

    fn delete_sampler(&mut self, sampler: SamplerHandle) {
        unsafe { self.gl.delete_sampler(native_sampler(sampler)) }
    }

    fn sampler_parameter(&mut self, sampler: SamplerHandle, parameter: SamplerParameter) {
        if matches!(parameter, SamplerParameter::MaxAnisotropy(_)) && !self.anisotropy_supported {
            return;
        }

        let sampler = native_sampler(sampler);
        let (name, value) = sampler_parameter_to_gl(parameter);
        unsafe {
            match value {
                GlSamplerValue::Int(value) => self.gl.sampler_parameter_i32(sampler, name, value),
                GlSamplerValue::Float(value) => self.gl.sampler_parameter_f32(sampler, name, value),
                GlSamplerValue::Color(color) => self.gl.sampler_parameter_f32_slice(sampler, name, &color),
            }
        }
    }

    // ===== BUFFERS =====

    fn create_buffer(&mut self) -> Option<BufferHandle> {
        match unsafe { self.gl.create_buffer() } {
            Ok(buffer) => Some(BufferHandle::from(buffer.0)),
            Err(e) => {
                engine_debug!("forge::gl", "glGenBuffers failed: {}", e);
                None
            }
        }
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        unsafe { self.gl.delete_buffer(native_buffer(buffer)) }
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferHandle>) {
        unsafe { self.gl.bind_buffer(buffer_target_to_gl(target), buffer.map(native_buffer)) }
    }

    fn buffer_binding(&self, target: BufferTarget) -> Option<BufferHandle> {
        let raw = unsafe { self.gl.get_parameter_i32(buffer_binding_to_gl(target)) };
        u32::try_from(raw).ok().and_then(BufferHandle::new)
    }

    fn buffer_data(&mut self, target: BufferTarget, size: usize, data: Option<&[u8]>, usage: BufferUsage) {
        let target = buffer_target_to_gl(target);
        let usage = buffer_usage_to_gl(usage);
        unsafe {
            match data {
                Some(data) => self.gl.buffer_data_u8_slice(target, data, usage),
                None => self.gl.buffer_data_size(target, gl_byte_size(size), usage),
            }
        }
    }

    fn buffer_sub_data(&mut self, target: BufferTarget, data: &[u8]) {
        unsafe { self.gl.buffer_sub_data_u8_slice(buffer_target_to_gl(target), 0, data) }
    }
}

#[cfg(test)]
#[path = "gl_graphics_device_tests.rs"]
mod tests;
