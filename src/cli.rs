//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::{CaptureConfig, RenderConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavesurface")]
#[command(about = "Animated procedural wave surface background", long_about = None)]
pub struct Args {
    /// Window width (logical pixels)
    #[arg(long, value_name = "PIXELS", default_value = "1280")]
    pub width: u32,

    /// Window height (logical pixels)
    #[arg(long, value_name = "PIXELS", default_value = "720")]
    pub height: u32,

    /// Upper bound for the device pixel ratio used when rendering
    #[arg(long, value_name = "RATIO", default_value = "1.5")]
    pub max_pixel_ratio: f64,

    /// Enable 4x multisample antialiasing
    #[arg(long)]
    pub antialias: bool,

    /// Prefer the high-performance GPU over the low-power one
    #[arg(long)]
    pub high_performance: bool,

    /// Borderless fullscreen window
    #[arg(long)]
    pub fullscreen: bool,

    /// Let pointer input pass through the window and keep it below others
    #[arg(long)]
    pub click_through: bool,

    /// Render headlessly to PNG frames instead of opening a window (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub capture: Option<f32>,

    /// Output directory for captured frames
    #[arg(long, value_name = "DIR", default_value = "capture")]
    pub output: PathBuf,

    /// Capture frame rate
    #[arg(long, value_name = "FPS", default_value = "60")]
    pub fps: u32,

    /// Simulation time of the first captured frame (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "0")]
    pub start_time: f32,
}

impl Args {
    pub fn to_render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            max_pixel_ratio: self.max_pixel_ratio,
            antialias: self.antialias,
            low_power: !self.high_performance,
            fullscreen: self.fullscreen,
            click_through: self.click_through,
            ..RenderConfig::default()
        }
    }

    /// Capture configuration if capture mode was requested
    ///
    /// Frames are rendered at the window size, not scaled by pixel ratio.
    pub fn to_capture_config(&self) -> Option<CaptureConfig> {
        self.capture.map(|duration| CaptureConfig {
            start_secs: self.start_time,
            output_dir: self.output.clone(),
            fps: self.fps,
            width: self.width,
            height: self.height,
            ..CaptureConfig::new(duration)
        })
    }
}
