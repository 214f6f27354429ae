/// 2D texture resource
///
/// Wraps a driver texture object created from raw 8-bit pixel data or loaded
/// from a PNG file. Every upload binds the texture temporarily and puts the
/// previous 2D binding and unpack alignment back afterwards, so callers never
/// observe a change of global driver state.

use std::path::PathBuf;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, SharedGraphicsDevice, PixelFormat, TextureHandle, lock_device,
};
use crate::resource::png_image::decode_png;
use crate::{engine_debug, engine_info};

const SOURCE: &str = "forge::Texture";

#[track_caller]
fn log_and_return_error(error: Error) -> Error {
    Engine::log_and_return_error(SOURCE, error)
}

// ===== DESCRIPTORS =====

/// Parameters for creating a texture from memory
#[derive(Debug, Clone)]
pub struct TextureCreateInfo<'a> {
    /// Width in pixels (must be > 0)
    pub width: u32,
    /// Height in pixels (must be > 0)
    pub height: u32,
    /// Pixel layout of `data`
    pub format: PixelFormat,
    /// Generate a mipmap chain after upload
    pub mipmaps: bool,
    /// Tightly packed rows, bottom row first; `None` leaves the surface undefined
    pub data: Option<&'a [u8]>,
}

impl<'a> TextureCreateInfo<'a> {
    /// Describe a texture with mipmaps and no initial data
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            mipmaps: true,
            data: None,
        }
    }
}

/// Parameters for loading a texture from a PNG file
#[derive(Debug, Clone)]
pub struct TextureLoadInfo {
    /// Path of the PNG file
    pub file_path: PathBuf,
    /// Generate a mipmap chain after upload
    pub mipmaps: bool,
}

impl TextureLoadInfo {
    /// Describe a PNG file to load with mipmaps
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            mipmaps: true,
        }
    }
}

impl Default for TextureLoadInfo {
    fn default() -> Self {
        Self::new(PathBuf::new())
    }
}

// ===== UPLOAD SCOPE =====

/// Binds a texture for uploading and restores the previous driver state on drop
struct UploadScope<'a> {
    device: &'a mut dyn GraphicsDevice,
    previous_binding: Option<TextureHandle>,
    previous_alignment: i32,
}

impl<'a> UploadScope<'a> {
    fn begin(device: &'a mut dyn GraphicsDevice, texture: TextureHandle, width: u32, format: PixelFormat) -> Self {
        let previous_binding = device.texture_binding_2d();
        let previous_alignment = device.unpack_alignment();

        device.bind_texture_2d(Some(texture));

        // Rows are tightly packed
        let stride = width as usize * format.channels();
        let aligned = usize::try_from(previous_alignment)
            .ok()
            .filter(|alignment| *alignment > 0)
            .is_some_and(|alignment| stride % alignment == 0);
        if !aligned {
            device.set_unpack_alignment(1);
        }

        Self {
            device,
            previous_binding,
            previous_alignment,
        }
    }
}

impl Drop for UploadScope<'_> {
    fn drop(&mut self) {
        if self.device.unpack_alignment() != self.previous_alignment {
            self.device.set_unpack_alignment(self.previous_alignment);
        }
        self.device.bind_texture_2d(self.previous_binding);
    }
}

// ===== TEXTURE =====

/// A 2D texture
///
/// # Example
///
/// ```no_run
/// use forge_engine::forge::resource::{Texture, TextureLoadInfo};
/// # fn example(device: forge_engine::forge::render::SharedGraphicsDevice) -> forge_engine::forge::Result<()> {
/// let mut texture = Texture::new(device);
/// texture.load(&TextureLoadInfo::new("Data/Textures/Checker.png"))?;
/// println!("{}x{}", texture.width(), texture.height());
/// # Ok(())
/// # }
/// ```
pub struct Texture {
    device: SharedGraphicsDevice,
    handle: Option<TextureHandle>,
    format: PixelFormat,
    width: u32,
    height: u32,
}

impl Texture {
    /// Create an invalid texture bound to a device
    pub fn new(device: SharedGraphicsDevice) -> Self {
        Self {
            device,
            handle: None,
            format: PixelFormat::RGBA,
            width: 0,
            height: 0,
        }
    }

    /// Load a PNG file and create the texture from it
    ///
    /// # Errors
    ///
    /// - `InvalidResource` for an empty path, a non-PNG file or a decoding error
    /// - `IoFailure` if the file cannot be read
    /// - any error of [`initialize`](Self::initialize)
    ///
    /// # Panics
    ///
    /// Panics if the texture is already initialized.
    pub fn load(&mut self, info: &TextureLoadInfo) -> Result<()> {
        engine_debug!(SOURCE, "Loading texture from \"{}\" file...", info.file_path.display());

        assert!(self.handle.is_none(), "Texture instance has already been initialized!");

        if info.file_path.as_os_str().is_empty() {
            return Err(log_and_return_error(Error::InvalidResource(
                "\"file_path\" is empty".to_string(),
            )));
        }

        let bytes = match std::fs::read(&info.file_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                engine_debug!(SOURCE, "Failed to open \"{}\": {}", info.file_path.display(), e);
                return Err(log_and_return_error(Error::IoFailure(info.file_path.display().to_string())));
            }
        };

        let image = match decode_png(&bytes) {
            Ok(image) => image,
            Err(error) => return Err(log_and_return_error(error)),
        };

        self.initialize(&TextureCreateInfo {
            width: image.width,
            height: image.height,
            format: image.format,
            mipmaps: info.mipmaps,
            data: Some(image.pixels.as_slice()),
        })
    }

    /// Create the texture surface and upload initial data
    ///
    /// # Errors
    ///
    /// - `InvalidResource` for a zero width/height or data of the wrong size
    /// - `AllocationFailure` if the driver refuses the texture object
    ///
    /// # Panics
    ///
    /// Panics if the texture is already initialized.
    pub fn initialize(&mut self, info: &TextureCreateInfo<'_>) -> Result<()> {
        engine_debug!(SOURCE, "Creating texture...");

        assert!(self.handle.is_none(), "Texture instance has been already initialized!");

        if info.width == 0 {
            return Err(log_and_return_error(Error::InvalidResource("\"width\" is invalid".to_string())));
        }

        if info.height == 0 {
            return Err(log_and_return_error(Error::InvalidResource("\"height\" is invalid".to_string())));
        }

        let Some(expected_size) = surface_size(info.width, info.height, info.format) else {
            return Err(log_and_return_error(Error::InvalidResource(format!(
                "{}x{} {:?} texture is too large",
                info.width, info.height, info.format
            ))));
        };

        if let Some(data) = info.data {
            if data.len() != expected_size {
                return Err(log_and_return_error(Error::InvalidResource(format!(
                    "\"data\" holds {} bytes, expected {}",
                    data.len(),
                    expected_size
                ))));
            }
        }

        let mut device = lock_device(&self.device);

        let Some(handle) = device.create_texture() else {
            return Err(log_and_return_error(Error::AllocationFailure(
                "Texture could not be created".to_string(),
            )));
        };

        {
            let mut upload = UploadScope::begin(&mut *device, handle, info.width, info.format);
            upload.device.tex_image_2d(info.width, info.height, info.format, info.data);

            if info.mipmaps {
                upload.device.generate_mipmap_2d();
            }
        }
        drop(device);

        self.handle = Some(handle);
        self.format = info.format;
        self.width = info.width;
        self.height = info.height;

        engine_info!(
            SOURCE,
            "Created a {}x{} {:?} texture ({}).",
            info.width,
            info.height,
            info.format,
            handle
        );
        Ok(())
    }

    /// Replace the whole texture surface
    ///
    /// # Panics
    ///
    /// Panics if the texture is invalid or `data` does not cover the surface exactly.
    pub fn update(&mut self, data: &[u8]) {
        let handle = self.handle();
        assert_eq!(
            Some(data.len()),
            surface_size(self.width, self.height, self.format),
            "Texture data does not match the texture size!"
        );

        let mut device = lock_device(&self.device);
        let mut upload = UploadScope::begin(&mut *device, handle, self.width, self.format);
        upload.device.tex_sub_image_2d(self.width, self.height, self.format, data);
    }

    /// Driver texture handle
    ///
    /// # Panics
    ///
    /// Panics if the texture is invalid.
    pub fn handle(&self) -> TextureHandle {
        match self.handle {
            Some(handle) => handle,
            None => panic!("Texture handle has not been created!"),
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        assert!(self.handle.is_some(), "Texture handle has not been created!");
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        assert!(self.handle.is_some(), "Texture handle has not been created!");
        self.height
    }

    /// Pixel format
    pub fn format(&self) -> PixelFormat {
        assert!(self.handle.is_some(), "Texture handle has not been created!");
        self.format
    }

    /// Whether the instance owns a texture object
    pub fn is_valid(&self) -> bool {
        self.handle.is_some()
    }

    /// Release the texture, returning the instance to the invalid state
    pub fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            lock_device(&self.device).delete_texture(handle);
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Byte size of a tightly packed surface, `None` if it does not fit in `usize`
fn surface_size(width: u32, height: u32, format: PixelFormat) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(format.channels())
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
