/// Sampler resource
///
/// Owns a sampler object holding texture sampling state separately from the
/// textures it is used with.

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::graphics_device::{
    CompareFunc, CompareMode, SamplerHandle, SamplerParameter, SharedGraphicsDevice, TextureFilter,
    TextureWrap, lock_device,
};
use crate::{engine_debug, engine_info};

const SOURCE: &str = "forge::Sampler";

#[track_caller]
fn log_and_return_error(error: Error) -> Error {
    Engine::log_and_return_error(SOURCE, error)
}

// ===== DESCRIPTOR =====

/// Initial sampling state
///
/// `Default` matches the state of a freshly created driver sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerInfo {
    pub border_color: [f32; 4],
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
    pub wrap_s: TextureWrap,
    pub wrap_t: TextureWrap,
    pub wrap_r: TextureWrap,
    pub min_lod: f32,
    pub max_lod: f32,
    pub lod_bias: f32,
    pub compare_mode: CompareMode,
    pub compare_func: CompareFunc,
    /// 1.0 disables anisotropic filtering
    pub max_anisotropy: f32,
}

impl Default for SamplerInfo {
    fn default() -> Self {
        Self {
            border_color: [0.0; 4],
            min_filter: TextureFilter::NearestMipmapLinear,
            mag_filter: TextureFilter::Linear,
            wrap_s: TextureWrap::Repeat,
            wrap_t: TextureWrap::Repeat,
            wrap_r: TextureWrap::Repeat,
            min_lod: -1000.0,
            max_lod: 1000.0,
            lod_bias: 0.0,
            compare_mode: CompareMode::None,
            compare_func: CompareFunc::LessEqual,
            max_anisotropy: 1.0,
        }
    }
}

impl SamplerInfo {
    /// Every field as a parameter, in the order they are applied
    fn parameters(&self) -> [SamplerParameter; 12] {
        [
            SamplerParameter::BorderColor(self.border_color),
            SamplerParameter::MinFilter(self.min_filter),
            SamplerParameter::MagFilter(self.mag_filter),
            SamplerParameter::WrapS(self.wrap_s),
            SamplerParameter::WrapT(self.wrap_t),
            SamplerParameter::WrapR(self.wrap_r),
            SamplerParameter::MinLod(self.min_lod),
            SamplerParameter::MaxLod(self.max_lod),
            SamplerParameter::LodBias(self.lod_bias),
            SamplerParameter::CompareMode(self.compare_mode),
            SamplerParameter::CompareFunc(self.compare_func),
            SamplerParameter::MaxAnisotropy(self.max_anisotropy),
        ]
    }
}

// ===== SAMPLER =====

/// A texture sampler
///
/// # Example
///
/// ```no_run
/// use forge_engine::forge::render::{SamplerParameter, TextureFilter};
/// use forge_engine::forge::resource::{Sampler, SamplerInfo};
/// # fn example(device: forge_engine::forge::render::SharedGraphicsDevice) -> forge_engine::forge::Result<()> {
/// let mut sampler = Sampler::new(device);
/// sampler.initialize(&SamplerInfo::default())?;
/// sampler.set_parameter(SamplerParameter::MinFilter(TextureFilter::Linear));
/// # Ok(())
/// # }
/// ```
pub struct Sampler {
    device: SharedGraphicsDevice,
    handle: Option<SamplerHandle>,
}

impl Sampler {
    /// Create an invalid sampler bound to a device
    pub fn new(device: SharedGraphicsDevice) -> Self {
        Self { device, handle: None }
    }

    /// Create the sampler object and apply every field of `info`
    ///
    /// # Errors
    ///
    /// - `InvalidResource` for a mipmapped magnification filter, a
    ///   `min_lod` above `max_lod` or an anisotropy below 1.0
    /// - `AllocationFailure` if the driver refuses the sampler object
    ///
    /// # Panics
    ///
    /// Panics if the sampler is already initialized.
    pub fn initialize(&mut self, info: &SamplerInfo) -> Result<()> {
        engine_debug!(SOURCE, "Creating sampler...");

        assert!(self.handle.is_none(), "Sampler instance has been already initialized!");

        if info.mag_filter.uses_mipmaps() {
            return Err(log_and_return_error(Error::InvalidResource(format!(
                "\"mag_filter\" cannot be {:?}",
                info.mag_filter
            ))));
        }

        if info.min_lod > info.max_lod {
            return Err(log_and_return_error(Error::InvalidResource(format!(
                "\"min_lod\" ({}) is greater than \"max_lod\" ({})",
                info.min_lod, info.max_lod
            ))));
        }

        if info.max_anisotropy.is_nan() || info.max_anisotropy < 1.0 {
            return Err(log_and_return_error(Error::InvalidResource(format!(
                "\"max_anisotropy\" ({}) is below 1.0",
                info.max_anisotropy
            ))));
        }

        let mut device = lock_device(&self.device);

        let Some(handle) = device.create_sampler() else {
            return Err(log_and_return_error(Error::AllocationFailure(
                "Sampler could not be created".to_string(),
            )));
        };

        for parameter in info.parameters() {
            device.sampler_parameter(handle, parameter);
        }
        drop(device);

        self.handle = Some(handle);

        engine_info!(SOURCE, "Created a sampler ({}).", handle);
        Ok(())
    }

    /// Change one sampling parameter
    ///
    /// # Panics
    ///
    /// Panics if the sampler is invalid.
    pub fn set_parameter(&mut self, parameter: SamplerParameter) {
        let handle = self.handle();
        lock_device(&self.device).sampler_parameter(handle, parameter);
    }

    /// Driver sampler handle
    ///
    /// # Panics
    ///
    /// Panics if the sampler is invalid.
    pub fn handle(&self) -> SamplerHandle {
        match self.handle {
            Some(handle) => handle,
            None => panic!("Sampler handle has not been created!"),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.handle.is_some()
    }

    /// Release the sampler, returning the instance to the invalid state
    pub fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            lock_device(&self.device).delete_sampler(handle);
        }
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
#[path = "sampler_tests.rs"]
mod tests;
