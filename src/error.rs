use thiserror::Error;

pub type GlobeResult<T> = Result<T, GlobeError>;

/// Startup failures. Any of these ends the process: there is nothing useful to draw
/// without a window, a device, both shaders and the map texture.
#[derive(Error, Debug)]
pub enum GlobeError {
    #[error("texture '{path}' could not be read: {source}")]
    TextureIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("texture '{path}' could not be decoded: {source}")]
    TextureDecode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("texture '{path}' has invalid size {width}x{height}")]
    TextureSize { path: String, width: u32, height: u32 },

    #[error("shader '{label}' failed validation: {message}")]
    Shader { label: &'static str, message: String },

    #[error("surface lost and could not be recovered: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("snapshot could not be written: {0}")]
    Snapshot(#[from] image::ImageError),
}
