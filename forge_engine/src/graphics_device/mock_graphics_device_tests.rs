/// Unit tests for MockGraphicsDevice.
///
/// The shader and texture tests rely on the mock behaving like a driver, so its
/// bookkeeping is checked on its own here.

use super::*;

// ============================================================================
// Shader object tests
// ============================================================================

#[test]
fn test_mock_shader_object_lifecycle() {
    let mut device = MockGraphicsDevice::new();

    let shader = device.create_shader_object(ShaderStage::Vertex).unwrap();
    assert!(device.live_shaders.contains(&shader));

    device.shader_source(shader, &["#version 330\n", "#define VERTEX_SHADER\n", "void main() {}"]);
    assert_eq!(
        device.source_for_stage(ShaderStage::Vertex),
        Some("#version 330\n#define VERTEX_SHADER\nvoid main() {}")
    );

    device.compile_shader(shader);
    assert!(device.shader_compile_status(shader));
    assert!(device.shader_info_log(shader).is_empty());

    device.delete_shader_object(shader);
    assert!(device.live_shaders.is_empty());
}

#[test]
fn test_mock_refused_stage() {
    let mut device = MockGraphicsDevice::new();
    device.refused_stages.insert(ShaderStage::Geometry);

    assert!(device.create_shader_object(ShaderStage::Geometry).is_none());
    assert!(device.create_shader_object(ShaderStage::Fragment).is_some());
}

#[test]
fn test_mock_compile_error_reports_log() {
    let mut device = MockGraphicsDevice::new();
    device.compile_errors.insert(ShaderStage::Fragment, "0:3: syntax error".to_string());

    let shader = device.create_shader_object(ShaderStage::Fragment).unwrap();
    device.compile_shader(shader);

    assert!(!device.shader_compile_status(shader));
    assert_eq!(device.shader_info_log(shader), "0:3: syntax error");
}

// ============================================================================
// Program tests
// ============================================================================

#[test]
fn test_mock_link_requires_compiled_attachments() {
    let mut device = MockGraphicsDevice::new();
    let program = device.create_program().unwrap();

    device.link_program(program);
    assert!(!device.program_link_status(program));

    let shader = device.create_shader_object(ShaderStage::Vertex).unwrap();
    device.compile_shader(shader);
    device.attach_shader(program, shader);
    device.link_program(program);

    assert!(device.program_link_status(program));
    assert_eq!(device.linked_stages[&program], vec![ShaderStage::Vertex]);
}

#[test]
fn test_mock_link_error() {
    let mut device = MockGraphicsDevice::new();
    device.link_error = Some("unresolved varying".to_string());

    let program = device.create_program().unwrap();
    let shader = device.create_shader_object(ShaderStage::Vertex).unwrap();
    device.compile_shader(shader);
    device.attach_shader(program, shader);
    device.link_program(program);

    assert!(!device.program_link_status(program));
    assert_eq!(device.program_info_log(program), "unresolved varying");
}

#[test]
fn test_mock_locations() {
    let mut device = MockGraphicsDevice::new();
    device.attributes.insert("position".to_string(), 0);
    device.uniforms.insert("color".to_string(), 2);

    let program = device.create_program().unwrap();
    // Unlinked programs expose nothing
    assert_eq!(device.attribute_location(program, "position"), INVALID_LOCATION);

    let shader = device.create_shader_object(ShaderStage::Vertex).unwrap();
    device.compile_shader(shader);
    device.attach_shader(program, shader);
    device.link_program(program);

    assert_eq!(device.attribute_location(program, "position"), 0);
    assert_eq!(device.uniform_location(program, "color"), 2);
    assert_eq!(device.uniform_location(program, "missing"), INVALID_LOCATION);
}

#[test]
fn test_mock_call_log() {
    let mut device = MockGraphicsDevice::new();
    let program = device.create_program().unwrap();
    device.delete_program(program);

    assert_eq!(device.calls, vec!["create_program -> program#1", "delete_program(program#1)"]);
    assert_eq!(device.count_calls("delete_"), 1);
    assert_eq!(device.live_shader_object_count(), 0);
}

// ============================================================================
// Texture tests
// ============================================================================

#[test]
fn test_mock_texture_upload() {
    let mut device = MockGraphicsDevice::new();
    let texture = device.create_texture().unwrap();

    device.bind_texture_2d(Some(texture));
    assert_eq!(device.texture_binding_2d(), Some(texture));

    device.set_unpack_alignment(1);
    device.tex_image_2d(2, 1, PixelFormat::RGB, Some(&[1, 2, 3, 4, 5, 6]));
    device.generate_mipmap_2d();

    let data = &device.textures[&texture];
    assert_eq!((data.width, data.height), (2, 1));
    assert_eq!(data.format, Some(PixelFormat::RGB));
    assert_eq!(data.data, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(data.upload_alignment, 1);
    assert!(data.mipmaps_generated);

    device.tex_sub_image_2d(2, 1, PixelFormat::RGB, &[6, 5, 4, 3, 2, 1]);
    assert_eq!(device.textures[&texture].data, vec![6, 5, 4, 3, 2, 1]);
}

#[test]
fn test_mock_delete_bound_texture_unbinds() {
    let mut device = MockGraphicsDevice::new();
    let texture = device.create_texture().unwrap();
    device.bind_texture_2d(Some(texture));

    device.delete_texture(texture);

    assert_eq!(device.texture_binding_2d(), None);
    assert!(device.live_textures.is_empty());
}

// ============================================================================
// Sampler tests
// ============================================================================

#[test]
fn test_mock_sampler_parameters() {
    let mut device = MockGraphicsDevice::new();
    let sampler = device.create_sampler().unwrap();

    device.sampler_parameter(sampler, SamplerParameter::MinLod(-2.0));
    device.sampler_parameter(sampler, SamplerParameter::MinLod(1.5));

    assert_eq!(
        device.sampler_parameter_value(sampler, SamplerParameter::MinLod(0.0)),
        Some(SamplerParameter::MinLod(1.5))
    );
    assert_eq!(device.sampler_parameter_value(sampler, SamplerParameter::LodBias(0.0)), None);

    device.delete_sampler(sampler);
    assert!(device.live_samplers.is_empty());
}

#[test]
fn test_mock_refused_sampler() {
    let mut device = MockGraphicsDevice::new();
    device.refuse_samplers = true;

    assert_eq!(device.create_sampler(), None);
    assert_eq!(device.calls, vec!["create_sampler -> none".to_string()]);
}

// ============================================================================
// Buffer tests
// ============================================================================

#[test]
fn test_mock_buffer_store() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device.create_buffer().unwrap();

    device.bind_buffer(BufferTarget::Array, Some(buffer));
    assert_eq!(device.buffer_binding(BufferTarget::Array), Some(buffer));
    assert_eq!(device.buffer_binding(BufferTarget::ElementArray), None);

    device.buffer_data(BufferTarget::Array, 4, None, BufferUsage::StreamDraw);
    assert_eq!(device.buffers[&buffer].data, vec![0; 4]);

    device.buffer_sub_data(BufferTarget::Array, &[9, 8]);
    let store = &device.buffers[&buffer];
    assert_eq!(store.data, vec![9, 8, 0, 0]);
    assert_eq!(store.usage, BufferUsage::StreamDraw);
    assert_eq!(store.allocations, 1);
}

#[test]
fn test_mock_delete_bound_buffer_unbinds() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device.create_buffer().unwrap();
    device.bind_buffer(BufferTarget::ElementArray, Some(buffer));

    device.delete_buffer(buffer);

    assert_eq!(device.buffer_binding(BufferTarget::ElementArray), None);
    assert!(device.live_buffers.is_empty());
}
