//! Headless frame capture: drive the renderer from a manual clock and write
//! each frame to disk as PNG.

use log::info;

use crate::clock::ManualClock;
use crate::error::RenderError;
use crate::params::{CaptureConfig, RenderConfig, SceneParams, SurfaceParams};
use crate::renderer::Renderer;
use crate::rendering::RenderSystem;

/// Capture `config.total_frames()` frames. Returns the number written.
pub fn run(
    config: &CaptureConfig,
    render_config: &RenderConfig,
    surface: SurfaceParams,
    scene: SceneParams,
) -> Result<usize, RenderError> {
    std::fs::create_dir_all(&config.output_dir)?;

    let mut renderer = Renderer::new(ManualClock::new(), surface);
    renderer.try_start(|mesh, shading| {
        pollster::block_on(RenderSystem::headless(
            config.width,
            config.height,
            mesh,
            shading,
            render_config,
            scene,
        ))
    })?;

    let total = config.total_frames();
    info!(
        "Capturing {} frames at {} FPS to {}",
        total,
        config.fps,
        config.output_dir.display()
    );

    for index in 0..total {
        renderer.clock_mut().set(config.frame_time(index));
        renderer.frame()?;

        let path = config.frame_path(index);
        if let Some(backend) = renderer.backend() {
            backend.save_png(&path)?;
        }

        if (index + 1) % config.fps.max(1) as usize == 0 {
            info!("Captured {}/{} frames", index + 1, total);
        }
    }

    renderer.stop();
    info!("Capture complete: {} frames", total);
    Ok(total)
}
