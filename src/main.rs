//! wavesurface - a slowly breathing deep-blue wave surface
//!
//! Opens a window showing the animated surface, or with `--capture` renders
//! the same scene headlessly to a PNG frame sequence.

use clap::Parser;
use log::{error, info};

use wavesurface::cli::Args;
use wavesurface::params::{SceneParams, SurfaceParams};
use wavesurface::{app, capture};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let render_config = args.to_render_config();
    if let Err(e) = render_config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    let surface = SurfaceParams::default();
    let scene = SceneParams::default();

    if let Some(capture_config) = args.to_capture_config() {
        if let Err(e) = capture_config.validate() {
            error!("Invalid capture configuration: {}", e);
            std::process::exit(2);
        }
        match capture::run(&capture_config, &render_config, surface, scene) {
            Ok(frames) => info!(
                "Wrote {} frames to {}",
                frames,
                capture_config.output_dir.display()
            ),
            Err(e) => {
                error!("Capture failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    info!("Press ESC to quit");
    if let Err(e) = app::run(render_config, surface, scene) {
        error!("Event loop failed: {}", e);
        std::process::exit(1);
    }
}
