mod common;
mod gpu;
mod shared;

pub use common::{CameraParams, LightParams, MeshParams};
pub use gpu::Renderer;
