/// Shader program resource
///
/// Builds one linked program from a combined source text: the version
/// directive is split off, every stage whose marker appears in the source is
/// compiled with its `#define` injected, and the compiled stages are linked
/// together.
///
/// Stage objects only live for the duration of a compile call. They are
/// released by [`CompileScope`] on every exit path, and the program object is
/// released with them unless linking succeeded.

use std::path::Path;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, SharedGraphicsDevice, ProgramHandle, ShaderObjectHandle, lock_device,
};
use crate::resource::shader_source::{split_version_directive, SHADER_STAGES, SHADER_STAGE_COUNT};
use crate::utils::{TextFileReader, FileSystemReader};
use crate::{engine_debug, engine_info};

const SOURCE: &str = "forge::ShaderProgram";

#[track_caller]
fn log_and_return_error(error: Error) -> Error {
    Engine::log_and_return_error(SOURCE, error)
}

// ===== COMPILE SCOPE =====

/// Driver objects created while compiling, released when the scope ends
struct CompileScope<'a> {
    device: &'a mut dyn GraphicsDevice,
    /// One slot per entry of `SHADER_STAGES`
    shader_objects: [Option<ShaderObjectHandle>; SHADER_STAGE_COUNT],
    /// Program under construction, cleared once it is handed to the caller
    program: Option<ProgramHandle>,
}

impl<'a> CompileScope<'a> {
    fn new(device: &'a mut dyn GraphicsDevice) -> Self {
        Self {
            device,
            shader_objects: [None; SHADER_STAGE_COUNT],
            program: None,
        }
    }
}

impl Drop for CompileScope<'_> {
    fn drop(&mut self) {
        for shader in self.shader_objects.iter_mut().filter_map(Option::take) {
            self.device.delete_shader_object(shader);
        }
        if let Some(program) = self.program.take() {
            self.device.delete_program(program);
        }
    }
}

// ===== SHADER PROGRAM =====

/// A linked shader program
///
/// The instance is either invalid (never compiled, failed, or destroyed) or
/// owns a program the driver linked successfully.
///
/// # Example
///
/// ```no_run
/// use forge_engine::forge::resource::ShaderProgram;
/// # fn example(device: forge_engine::forge::render::SharedGraphicsDevice) -> forge_engine::forge::Result<()> {
/// let mut shader = ShaderProgram::new(device);
/// shader.load("Data/Shaders/Color.shader")?;
///
/// let position = shader.attribute("vertexPosition");
/// let transform = shader.uniform("viewTransform");
/// # Ok(())
/// # }
/// ```
pub struct ShaderProgram {
    device: SharedGraphicsDevice,
    handle: Option<ProgramHandle>,
}

impl ShaderProgram {
    /// Create an invalid shader program bound to a device
    pub fn new(device: SharedGraphicsDevice) -> Self {
        Self {
            device,
            handle: None,
        }
    }

    /// Load and compile a combined shader source file
    ///
    /// # Errors
    ///
    /// - `IoFailure` if the file cannot be read or is empty
    /// - any error of [`compile`](Self::compile)
    pub fn load(&mut self, file_path: impl AsRef<Path>) -> Result<()> {
        self.load_with(&FileSystemReader, file_path.as_ref())
    }

    /// Load through a custom reader and compile a combined shader source
    pub fn load_with(&mut self, reader: &dyn TextFileReader, file_path: &Path) -> Result<()> {
        engine_debug!(SOURCE, "Loading shader from \"{}\" file...", file_path.display());

        let shader_code = reader.read(file_path);
        if shader_code.is_empty() {
            return Err(log_and_return_error(Error::IoFailure(file_path.display().to_string())));
        }

        self.compile(&shader_code)?;

        engine_info!(SOURCE, "Loaded shader from \"{}\".", file_path.display());
        Ok(())
    }

    /// Compile and link a combined shader source
    ///
    /// On failure the instance stays invalid and every driver object created
    /// on the way is released.
    ///
    /// # Errors
    ///
    /// - `EmptySource` for an empty source
    /// - `AllocationFailure` if the driver refuses a shader object or program
    /// - `CompileFailure` with the driver log of the first stage that failed
    /// - `NoStagesFound` if no stage marker appears in the source
    /// - `LinkFailure` with the driver link log
    ///
    /// # Panics
    ///
    /// Panics if the instance already holds a linked program.
    pub fn compile(&mut self, shader_code: &str) -> Result<()> {
        engine_debug!(SOURCE, "Compiling shader code...");

        assert!(self.handle.is_none(), "Shader instance has been already initialized!");

        if shader_code.is_empty() {
            return Err(log_and_return_error(Error::EmptySource));
        }

        let mut device = lock_device(&self.device);
        let program = compile_program(&mut *device, shader_code)?;
        drop(device);

        self.handle = Some(program);

        engine_info!(SOURCE, "Linked a shader program ({}).", program);
        Ok(())
    }

    /// Location of a vertex attribute, or `INVALID_LOCATION` if the program has none by that name
    ///
    /// # Panics
    ///
    /// Panics if the program is invalid or `name` is empty.
    pub fn attribute(&self, name: &str) -> i32 {
        let program = self.handle();
        assert!(!name.is_empty(), "Attribute name cannot be empty!");

        lock_device(&self.device).attribute_location(program, name)
    }

    /// Location of a uniform, or `INVALID_LOCATION` if the program has none by that name
    ///
    /// # Panics
    ///
    /// Panics if the program is invalid or `name` is empty.
    pub fn uniform(&self, name: &str) -> i32 {
        let program = self.handle();
        assert!(!name.is_empty(), "Uniform name cannot be empty!");

        lock_device(&self.device).uniform_location(program, name)
    }

    /// Driver program handle
    ///
    /// # Panics
    ///
    /// Panics if the program is invalid.
    pub fn handle(&self) -> ProgramHandle {
        match self.handle {
            Some(handle) => handle,
            None => panic!("Shader program handle has not been created!"),
        }
    }

    /// Whether the instance owns a linked program
    pub fn is_valid(&self) -> bool {
        self.handle.is_some()
    }

    /// Release the program, returning the instance to the invalid state
    pub fn destroy(&mut self) {
        if let Some(program) = self.handle.take() {
            lock_device(&self.device).delete_program(program);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.destroy();
    }
}

// ===== COMPILE PIPELINE =====

fn compile_program(device: &mut dyn GraphicsDevice, shader_code: &str) -> Result<ProgramHandle> {
    let parts = split_version_directive(shader_code);
    let mut scope = CompileScope::new(device);

    // Compile every stage the source asks for
    let mut stages_found = false;

    for (slot, stage) in SHADER_STAGES.iter().enumerate() {
        if !stage.is_requested(&parts.body) {
            continue;
        }
        stages_found = true;

        let Some(shader) = scope.device.create_shader_object(stage.stage()) else {
            return Err(log_and_return_error(Error::AllocationFailure(
                "Could not create a shader object".to_string(),
            )));
        };
        scope.shader_objects[slot] = Some(shader);

        let define = stage.define_line();
        scope.device.shader_source(shader, &[parts.version, define.as_str(), &*parts.body]);
        scope.device.compile_shader(shader);

        if !scope.device.shader_compile_status(shader) {
            let log = scope.device.shader_info_log(shader);
            return Err(log_and_return_error(Error::CompileFailure {
                stage: stage.stage(),
                log: log.trim_end().to_string(),
            }));
        }

        engine_info!(SOURCE, "Compiled a {}.", stage.name());
    }

    if !stages_found {
        return Err(log_and_return_error(Error::NoStagesFound));
    }

    // Link compiled stages into one program
    let Some(program) = scope.device.create_program() else {
        return Err(log_and_return_error(Error::AllocationFailure(
            "Could not create a shader program".to_string(),
        )));
    };
    scope.program = Some(program);

    let shader_objects = scope.shader_objects;

    for shader in shader_objects.iter().flatten() {
        scope.device.attach_shader(program, *shader);
    }

    scope.device.link_program(program);

    // Attachments are only needed by the link itself
    for shader in shader_objects.iter().flatten() {
        scope.device.detach_shader(program, *shader);
    }

    if !scope.device.program_link_status(program) {
        let log = scope.device.program_info_log(program);
        return Err(log_and_return_error(Error::LinkFailure {
            log: log.trim_end().to_string(),
        }));
    }

    // Keep the program; stage objects are still released with the scope
    scope.program = None;
    Ok(program)
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
