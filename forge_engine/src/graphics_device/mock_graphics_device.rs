/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every driver call as a string, tracks which objects are alive so
/// tests can detect leaks, and lets tests inject driver failures (refused
/// allocations, compile errors, link errors).

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::graphics_device::{
    GraphicsDevice, ShaderStage, PixelFormat, INVALID_LOCATION,
    ShaderObjectHandle, ProgramHandle, TextureHandle, SamplerHandle, BufferHandle,
    SamplerParameter, BufferTarget, BufferUsage,
};

// ============================================================================
// Mock Texture storage
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MockTextureData {
    pub width: u32,
    pub height: u32,
    pub format: Option<PixelFormat>,
    pub data: Vec<u8>,
    pub mipmaps_generated: bool,
    pub upload_alignment: i32,
}

// ============================================================================
// Mock Buffer storage
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MockBufferData {
    pub size: usize,
    pub data: Vec<u8>,
    pub usage: BufferUsage,
    /// Number of buffer_data calls (store reallocations)
    pub allocations: usize,
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

#[derive(Debug)]
pub struct MockGraphicsDevice {
    /// Every call made on the device, in order
    pub calls: Vec<String>,
    next_name: u32,

    pub live_shaders: BTreeSet<ShaderObjectHandle>,
    pub live_programs: BTreeSet<ProgramHandle>,
    pub live_textures: BTreeSet<TextureHandle>,
    pub live_samplers: BTreeSet<SamplerHandle>,
    pub live_buffers: BTreeSet<BufferHandle>,

    pub shader_stages: HashMap<ShaderObjectHandle, ShaderStage>,
    pub shader_sources: HashMap<ShaderObjectHandle, String>,
    compiled: HashMap<ShaderObjectHandle, bool>,
    attachments: HashMap<ProgramHandle, Vec<ShaderObjectHandle>>,
    linked: HashMap<ProgramHandle, bool>,
    /// Stages that took part in each successful link
    pub linked_stages: HashMap<ProgramHandle, Vec<ShaderStage>>,

    // Failure injection
    pub refused_stages: HashSet<ShaderStage>,
    pub refuse_programs: bool,
    pub refuse_textures: bool,
    pub refuse_samplers: bool,
    pub refuse_buffers: bool,
    pub compile_errors: HashMap<ShaderStage, String>,
    pub link_error: Option<String>,

    // Active program interface (shared by all linked programs)
    pub attributes: HashMap<String, i32>,
    pub uniforms: HashMap<String, i32>,

    // Texture state
    bound_texture: Option<TextureHandle>,
    unpack_alignment: i32,
    pub textures: HashMap<TextureHandle, MockTextureData>,

    // Sampler state, parameters in the order they were set
    pub sampler_parameters: HashMap<SamplerHandle, Vec<SamplerParameter>>,

    // Buffer state
    bound_buffers: HashMap<BufferTarget, BufferHandle>,
    pub buffers: HashMap<BufferHandle, MockBufferData>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            next_name: 1,
            live_shaders: BTreeSet::new(),
            live_programs: BTreeSet::new(),
            live_textures: BTreeSet::new(),
            live_samplers: BTreeSet::new(),
            live_buffers: BTreeSet::new(),
            shader_stages: HashMap::new(),
            shader_sources: HashMap::new(),
            compiled: HashMap::new(),
            attachments: HashMap::new(),
            linked: HashMap::new(),
            linked_stages: HashMap::new(),
            refused_stages: HashSet::new(),
            refuse_programs: false,
            refuse_textures: false,
            refuse_samplers: false,
            refuse_buffers: false,
            compile_errors: HashMap::new(),
            link_error: None,
            attributes: HashMap::new(),
            uniforms: HashMap::new(),
            bound_texture: None,
            unpack_alignment: 4,
            textures: HashMap::new(),
            sampler_parameters: HashMap::new(),
            bound_buffers: HashMap::new(),
            buffers: HashMap::new(),
        }
    }

    fn allocate_name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }

    /// Number of shader objects and programs still alive
    pub fn live_shader_object_count(&self) -> usize {
        self.live_shaders.len() + self.live_programs.len()
    }

    /// Index of the first call equal to `call`
    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    /// Number of calls starting with `prefix`
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Source submitted for the (last created) shader object of a stage
    pub fn source_for_stage(&self, stage: ShaderStage) -> Option<&str> {
        self.shader_stages
            .iter()
            .filter(|(_, s)| **s == stage)
            .map(|(handle, _)| *handle)
            .max()
            .and_then(|handle| self.shader_sources.get(&handle))
            .map(String::as_str)
    }

    /// Override the current unpack alignment (simulates prior global state)
    pub fn set_initial_unpack_alignment(&mut self, alignment: i32) {
        self.unpack_alignment = alignment;
    }

    /// Last value set for a sampler parameter of the same kind as `parameter`
    pub fn sampler_parameter_value(&self, sampler: SamplerHandle, parameter: SamplerParameter) -> Option<SamplerParameter> {
        self.sampler_parameters
            .get(&sampler)?
            .iter()
            .rev()
            .find(|p| std::mem::discriminant(*p) == std::mem::discriminant(&parameter))
            .copied()
    }

    /// Buffer object bound to a target before a resource touches it
    pub fn set_initial_buffer_binding(&mut self, target: BufferTarget, buffer: BufferHandle) {
        self.bound_buffers.insert(target, buffer);
    }

    fn bound_buffer_data(&mut self, target: BufferTarget) -> Option<&mut MockBufferData> {
        let buffer = self.bound_buffers.get(&target)?;
        self.buffers.get_mut(buffer)
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_shader_object(&mut self, stage: ShaderStage) -> Option<ShaderObjectHandle> {
        if self.refused_stages.contains(&stage) {
            self.calls.push(format!("create_shader_object({}) -> none", stage));
            return None;
        }
        let handle = ShaderObjectHandle::new(self.allocate_name())?;
        self.live_shaders.insert(handle);
        self.shader_stages.insert(handle, stage);
        self.calls.push(format!("create_shader_object({}) -> {}", stage, handle));
        Some(handle)
    }

    fn shader_source(&mut self, shader: ShaderObjectHandle, segments: &[&str]) {
        self.calls.push(format!("shader_source({}, {} segments)", shader, segments.len()));
        self.shader_sources.insert(shader, segments.concat());
    }

    fn compile_shader(&mut self, shader: ShaderObjectHandle) {
        self.calls.push(format!("compile_shader({})", shader));
        let ok = self.shader_stages
            .get(&shader)
            .map(|stage| !self.compile_errors.contains_key(stage))
            .unwrap_or(false);
        self.compiled.insert(shader, ok);
    }

    fn shader_compile_status(&self, shader: ShaderObjectHandle) -> bool {
        self.compiled.get(&shader).copied().unwrap_or(false)
    }

    fn shader_info_log(&self, shader: ShaderObjectHandle) -> String {
        self.shader_stages
            .get(&shader)
            .and_then(|stage| self.compile_errors.get(stage))
            .cloned()
            .unwrap_or_default()
    }

    fn delete_shader_object(&mut self, shader: ShaderObjectHandle) {
        self.calls.push(format!("delete_shader_object({})", shader));
        self.live_shaders.remove(&shader);
    }

    fn create_program(&mut self) -> Option<ProgramHandle> {
        if self.refuse_programs {
            self.calls.push("create_program -> none".to_string());
            return None;
        }
        let handle = ProgramHandle::new(self.allocate_name())?;
        self.live_programs.insert(handle);
        self.calls.push(format!("create_program -> {}", handle));
        Some(handle)
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderObjectHandle) {
        self.calls.push(format!("attach_shader({}, {})", program, shader));
        self.attachments.entry(program).or_default().push(shader);
    }

    fn detach_shader(&mut self, program: ProgramHandle, shader: ShaderObjectHandle) {
        self.calls.push(format!("detach_shader({}, {})", program, shader));
        if let Some(attached) = self.attachments.get_mut(&program) {
            attached.retain(|s| *s != shader);
        }
    }

    fn link_program(&mut self, program: ProgramHandle) {
        self.calls.push(format!("link_program({})", program));
        let attached = self.attachments.get(&program).cloned().unwrap_or_default();
        let ok = self.link_error.is_none()
            && !attached.is_empty()
            && attached.iter().all(|s| self.compiled.get(s).copied().unwrap_or(false));
        if ok {
            let stages = attached
                .iter()
                .filter_map(|s| self.shader_stages.get(s).copied())
                .collect();
            self.linked_stages.insert(program, stages);
        }
        self.linked.insert(program, ok);
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        self.linked.get(&program).copied().unwrap_or(false)
    }

    fn program_info_log(&self, _program: ProgramHandle) -> String {
        self.link_error.clone().unwrap_or_default()
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.calls.push(format!("delete_program({})", program));
        self.live_programs.remove(&program);
    }

    fn attribute_location(&self, program: ProgramHandle, name: &str) -> i32 {
        if !self.program_link_status(program) {
            return INVALID_LOCATION;
        }
        self.attributes.get(name).copied().unwrap_or(INVALID_LOCATION)
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> i32 {
        if !self.program_link_status(program) {
            return INVALID_LOCATION;
        }
        self.uniforms.get(name).copied().unwrap_or(INVALID_LOCATION)
    }

    fn create_texture(&mut self) -> Option<TextureHandle> {
        if self.refuse_textures {
            self.calls.push("create_texture -> none".to_string());
            return None;
        }
        let handle = TextureHandle::new(self.allocate_name())?;
        self.live_textures.insert(handle);
        self.textures.insert(handle, MockTextureData::default());
        self.calls.push(format!("create_texture -> {}", handle));
        Some(handle)
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        self.calls.push(format!("delete_texture({})", texture));
        self.live_textures.remove(&texture);
        if self.bound_texture == Some(texture) {
            self.bound_texture = None;
        }
    }

    fn bind_texture_2d(&mut self, texture: Option<TextureHandle>) {
        match texture {
            Some(handle) => self.calls.push(format!("bind_texture_2d({})", handle)),
            None => self.calls.push("bind_texture_2d(none)".to_string()),
        }
        self.bound_texture = texture;
    }

    fn texture_binding_2d(&self) -> Option<TextureHandle> {
        self.bound_texture
    }

    fn unpack_alignment(&self) -> i32 {
        self.unpack_alignment
    }

    fn set_unpack_alignment(&mut self, alignment: i32) {
        self.calls.push(format!("set_unpack_alignment({})", alignment));
        self.unpack_alignment = alignment;
    }

    fn tex_image_2d(&mut self, width: u32, height: u32, format: PixelFormat, data: Option<&[u8]>) {
        self.calls.push(format!("tex_image_2d({}x{}, {:?})", width, height, format));
        let alignment = self.unpack_alignment;
        if let Some(texture) = self.bound_texture.and_then(|t| self.textures.get_mut(&t)) {
            texture.width = width;
            texture.height = height;
            texture.format = Some(format);
            texture.data = data.map(<[u8]>::to_vec).unwrap_or_default();
            texture.upload_alignment = alignment;
        }
    }

    fn tex_sub_image_2d(&mut self, width: u32, height: u32, format: PixelFormat, data: &[u8]) {
        self.calls.push(format!("tex_sub_image_2d({}x{}, {:?})", width, height, format));
        if let Some(texture) = self.bound_texture.and_then(|t| self.textures.get_mut(&t)) {
            texture.data = data.to_vec();
        }
    }

    fn generate_mipmap_2d(&mut self) {
        self.calls.push("generate_mipmap_2d".to_string());
        if let Some(texture) = self.bound_texture.and_then(|t| self.textures.get_mut(&t)) {
            texture.mipmaps_generated = true;
        }
    }

    fn create_sampler(&mut self) -> Option<SamplerHandle> {
        if self.refuse_samplers {
            self.calls.push("create_sampler -> none".to_string());
            return None;
        }
        let handle = SamplerHandle::new(self.allocate_name())?;
        self.live_samplers.insert(handle);
        self.sampler_parameters.insert(handle, Vec::new());
        self.calls.push(format!("create_sampler -> {}", handle));
        Some(handle)
    }

    fn delete_sampler(&mut self, sampler: SamplerHandle) {
        self.calls.push(format!("delete_sampler({})", sampler));
        self.live_samplers.remove(&sampler);
    }

    fn sampler_parameter(&mut self, sampler: SamplerHandle, parameter: SamplerParameter) {
        self.calls.push(format!("sampler_parameter({}, {:?})", sampler, parameter));
        if let Some(parameters) = self.sampler_parameters.get_mut(&sampler) {
            parameters.push(parameter);
        }
    }

    fn create_buffer(&mut self) -> Option<BufferHandle> {
        if self.refuse_buffers {
            self.calls.push("create_buffer -> none".to_string());
            return None;
        }
        let handle = BufferHandle::new(self.allocate_name())?;
        self.live_buffers.insert(handle);
        self.buffers.insert(handle, MockBufferData::default());
        self.calls.push(format!("create_buffer -> {}", handle));
        Some(handle)
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        self.calls.push(format!("delete_buffer({})", buffer));
        self.live_buffers.remove(&buffer);
        self.bound_buffers.retain(|_, bound| *bound != buffer);
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferHandle>) {
        match buffer {
            Some(handle) => {
                self.calls.push(format!("bind_buffer({:?}, {})", target, handle));
                self.bound_buffers.insert(target, handle);
            }
            None => {
                self.calls.push(format!("bind_buffer({:?}, none)", target));
                self.bound_buffers.remove(&target);
            }
        }
    }

    fn buffer_binding(&self, target: BufferTarget) -> Option<BufferHandle> {
        self.bound_buffers.get(&target).copied()
    }

    fn buffer_data(&mut self, target: BufferTarget, size: usize, data: Option<&[u8]>, usage: BufferUsage) {
        self.calls.push(format!("buffer_data({:?}, {} bytes, {:?})", target, size, usage));
        if let Some(buffer) = self.bound_buffer_data(target) {
            buffer.size = size;
            buffer.data = data.map(<[u8]>::to_vec).unwrap_or_else(|| vec![0; size]);
            buffer.usage = usage;
            buffer.allocations += 1;
        }
    }

    fn buffer_sub_data(&mut self, target: BufferTarget, data: &[u8]) {
        self.calls.push(format!("buffer_sub_data({:?}, {} bytes)", target, data.len()));
        if let Some(store) = self.bound_buffer_data(target).and_then(|b| b.data.get_mut(..data.len())) {
            store.copy_from_slice(data);
        }
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
