use thiserror::Error;

/// Failures raised while setting up or driving the GPU renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create drawing surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("drawing surface reports no supported texture formats")]
    UnsupportedSurface,
    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("failed to acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
