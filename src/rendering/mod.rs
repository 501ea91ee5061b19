//! wgpu backend: context acquisition, pipelines, scene target and readback.

mod context;
mod pipeline;
mod readback;
mod system;
mod target;
mod uniforms;

pub use system::{RenderSystem, HEADLESS_FORMAT};
pub use uniforms::SurfaceUniforms;
