/// Vertex, index and instance buffer resource
///
/// A buffer is a typed array of fixed-size elements stored in one driver
/// buffer object. The buffer kind picks the binding target the store is
/// written through; every write restores the binding that was current
/// before it.

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::graphics_device::{
    BufferHandle, BufferTarget, BufferUsage, GraphicsDevice, SharedGraphicsDevice, lock_device,
};
use crate::{engine_debug, engine_info};

const SOURCE: &str = "forge::Buffer";

#[track_caller]
fn log_and_return_error(error: Error) -> Error {
    Engine::log_and_return_error(SOURCE, error)
}

// ===== BUFFER KIND =====

/// What the elements of a buffer describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Per-vertex attributes
    Vertex,
    /// Vertex indices (element size 1, 2 or 4)
    Index,
    /// Per-instance attributes
    Instance,
}

impl BufferKind {
    /// Binding target the buffer is written through
    pub fn target(self) -> BufferTarget {
        match self {
            BufferKind::Vertex | BufferKind::Instance => BufferTarget::Array,
            BufferKind::Index => BufferTarget::ElementArray,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BufferKind::Vertex => "Vertex Buffer",
            BufferKind::Index => "Index Buffer",
            BufferKind::Instance => "Instance Buffer",
        }
    }

    /// Whether elements advance per instance rather than per vertex
    pub fn is_instanced(self) -> bool {
        self == BufferKind::Instance
    }
}

/// Integer type of index buffer elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    U8,
    U16,
    U32,
}

impl IndexType {
    /// Index type stored in elements of `element_size` bytes
    pub fn from_element_size(element_size: usize) -> Option<Self> {
        match element_size {
            1 => Some(IndexType::U8),
            2 => Some(IndexType::U16),
            4 => Some(IndexType::U32),
            _ => None,
        }
    }
}

// ===== DESCRIPTOR =====

/// Parameters for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferInfo<'a> {
    pub usage: BufferUsage,
    /// Size of one element in bytes (must be > 0)
    pub element_size: usize,
    /// Number of elements allocated up front, may be 0
    pub element_count: usize,
    /// `element_size * element_count` bytes; `None` leaves the store undefined
    pub data: Option<&'a [u8]>,
}

impl<'a> BufferInfo<'a> {
    /// Describe an empty static buffer of `element_size`-byte elements
    pub fn new(element_size: usize) -> Self {
        Self {
            usage: BufferUsage::StaticDraw,
            element_size,
            element_count: 0,
            data: None,
        }
    }
}

// ===== BIND SCOPE =====

/// Binds a buffer to a target and rebinds the previous buffer on drop
struct BindScope<'a> {
    device: &'a mut dyn GraphicsDevice,
    target: BufferTarget,
    previous_binding: Option<BufferHandle>,
}

impl<'a> BindScope<'a> {
    fn begin(device: &'a mut dyn GraphicsDevice, target: BufferTarget, buffer: BufferHandle) -> Self {
        let previous_binding = device.buffer_binding(target);
        device.bind_buffer(target, Some(buffer));
        Self {
            device,
            target,
            previous_binding,
        }
    }
}

impl Drop for BindScope<'_> {
    fn drop(&mut self) {
        self.device.bind_buffer(self.target, self.previous_binding);
    }
}

// ===== BUFFER =====

/// A GPU buffer of fixed-size elements
///
/// # Example
///
/// ```no_run
/// use forge_engine::forge::render::BufferUsage;
/// use forge_engine::forge::resource::{Buffer, BufferInfo, BufferKind};
/// # fn example(device: forge_engine::forge::render::SharedGraphicsDevice, vertices: &[u8]) -> forge_engine::forge::Result<()> {
/// let mut buffer = Buffer::new(device, BufferKind::Vertex);
/// buffer.initialize(&BufferInfo {
///     usage: BufferUsage::StreamDraw,
///     ..BufferInfo::new(20)
/// })?;
/// buffer.update(vertices, vertices.len() / 20);
/// # Ok(())
/// # }
/// ```
pub struct Buffer {
    device: SharedGraphicsDevice,
    kind: BufferKind,
    handle: Option<BufferHandle>,
    usage: BufferUsage,
    element_size: usize,
    element_count: usize,
}

impl Buffer {
    /// Create an invalid buffer of the given kind bound to a device
    pub fn new(device: SharedGraphicsDevice, kind: BufferKind) -> Self {
        Self {
            device,
            kind,
            handle: None,
            usage: BufferUsage::StaticDraw,
            element_size: 0,
            element_count: 0,
        }
    }

    /// Create the buffer object and allocate its store
    ///
    /// # Errors
    ///
    /// - `InvalidResource` for a zero element size, an index element size
    ///   other than 1, 2 or 4, a store size that overflows, or data of the
    ///   wrong size
    /// - `AllocationFailure` if the driver refuses the buffer object
    ///
    /// # Panics
    ///
    /// Panics if the buffer is already initialized.
    pub fn initialize(&mut self, info: &BufferInfo<'_>) -> Result<()> {
        engine_debug!(SOURCE, "Creating {}...", self.kind.name());

        assert!(self.handle.is_none(), "Buffer instance has been already initialized!");

        if info.element_size == 0 {
            return Err(log_and_return_error(Error::InvalidResource(
                "\"element_size\" is invalid".to_string(),
            )));
        }

        if self.kind == BufferKind::Index && IndexType::from_element_size(info.element_size).is_none() {
            return Err(log_and_return_error(Error::InvalidResource(format!(
                "{} is not a valid index size",
                info.element_size
            ))));
        }

        let Some(size) = info.element_size.checked_mul(info.element_count) else {
            return Err(log_and_return_error(Error::InvalidResource(format!(
                "{} elements of {} bytes do not fit in memory",
                info.element_count, info.element_size
            ))));
        };

        if let Some(data) = info.data {
            if data.len() != size {
                return Err(log_and_return_error(Error::InvalidResource(format!(
                    "\"data\" holds {} bytes, expected {}",
                    data.len(),
                    size
                ))));
            }
        }

        let mut device = lock_device(&self.device);

        let Some(handle) = device.create_buffer() else {
            return Err(log_and_return_error(Error::AllocationFailure(format!(
                "{} could not be created",
                self.kind.name()
            ))));
        };

        {
            let mut scope = BindScope::begin(&mut *device, self.kind.target(), handle);
            scope.device.buffer_data(scope.target, size, info.data, info.usage);
        }
        drop(device);

        self.handle = Some(handle);
        self.usage = info.usage;
        self.element_size = info.element_size;
        self.element_count = info.element_count;

        engine_info!(
            SOURCE,
            "Created a {} of {} x {} bytes ({}).",
            self.kind.name(),
            info.element_count,
            info.element_size,
            handle
        );
        Ok(())
    }

    /// Replace the buffer contents with `element_count` elements
    ///
    /// The store is reallocated when the element count changes and
    /// overwritten in place otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is invalid or `data` is not exactly
    /// `element_count` elements long.
    pub fn update(&mut self, data: &[u8], element_count: usize) {
        let handle = self.handle();
        assert_eq!(
            self.element_size.checked_mul(element_count),
            Some(data.len()),
            "Buffer data does not match the element count!"
        );

        let mut device = lock_device(&self.device);
        let mut scope = BindScope::begin(&mut *device, self.kind.target(), handle);
        if element_count == self.element_count {
            scope.device.buffer_sub_data(scope.target, data);
        } else {
            scope.device.buffer_data(scope.target, data.len(), Some(data), self.usage);
        }
        drop(scope);

        self.element_count = element_count;
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// Human readable name of the buffer kind
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Binding target of the buffer kind
    pub fn target(&self) -> BufferTarget {
        self.kind.target()
    }

    /// Driver buffer handle
    ///
    /// # Panics
    ///
    /// Panics if the buffer is invalid.
    pub fn handle(&self) -> BufferHandle {
        match self.handle {
            Some(handle) => handle,
            None => panic!("Buffer handle has not been created!"),
        }
    }

    /// Size of one element in bytes
    pub fn element_size(&self) -> usize {
        assert!(self.handle.is_some(), "Buffer handle has not been created!");
        self.element_size
    }

    /// Number of elements currently stored
    pub fn element_count(&self) -> usize {
        assert!(self.handle.is_some(), "Buffer handle has not been created!");
        self.element_count
    }

    /// Index type for index buffers, `None` for other kinds
    pub fn index_type(&self) -> Option<IndexType> {
        assert!(self.handle.is_some(), "Buffer handle has not been created!");
        match self.kind {
            BufferKind::Index => IndexType::from_element_size(self.element_size),
            _ => None,
        }
    }

    pub fn is_instanced(&self) -> bool {
        self.kind.is_instanced()
    }

    /// Whether the instance owns a buffer object
    pub fn is_valid(&self) -> bool {
        self.handle.is_some()
    }

    /// Release the buffer, returning the instance to the invalid state
    pub fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            lock_device(&self.device).delete_buffer(handle);
        }
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
