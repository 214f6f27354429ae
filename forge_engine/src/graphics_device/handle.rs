/// Opaque driver object handles
///
/// Drivers name their objects with non-zero integers; zero is the driver's
/// "no object" value, so an invalid handle is represented as `None` rather
/// than as a handle value.

use std::fmt;
use std::num::NonZeroU32;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Wrap a raw driver name, returning `None` for the driver's null name (0)
            pub fn new(raw: u32) -> Option<Self> {
                NonZeroU32::new(raw).map(Self)
            }

            /// Raw driver name
            pub fn raw(self) -> u32 {
                self.0.get()
            }
        }

        impl From<NonZeroU32> for $name {
            fn from(raw: NonZeroU32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for NonZeroU32 {
            fn from(handle: $name) -> Self {
                handle.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }
    };
}

define_handle!(
    /// Handle to a single-stage shader object
    ShaderObjectHandle, "shader"
);

define_handle!(
    /// Handle to a linked shader program
    ProgramHandle, "program"
);

define_handle!(
    /// Handle to a texture object
    TextureHandle, "texture"
);

define_handle!(
    /// Handle to a sampler object
    SamplerHandle, "sampler"
);

define_handle!(
    /// Handle to a buffer object
    BufferHandle, "buffer"
);
