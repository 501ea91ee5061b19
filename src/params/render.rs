//! Rendering and capture configuration.

use std::path::PathBuf;

/// Rendering configuration
///
/// Only presentation knobs live here. Nothing in this struct feeds the wave
/// simulation, so changing it never changes the surface shape.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (logical pixels)
    pub window_width: u32,

    /// Window height (logical pixels)
    pub window_height: u32,

    /// Lower bound on the device pixel ratio used for the scene target
    pub min_pixel_ratio: f64,

    /// Upper bound on the device pixel ratio (bounds GPU cost on dense displays)
    pub max_pixel_ratio: f64,

    /// 4x MSAA when enabled
    pub antialias: bool,

    /// Prefer integrated GPUs
    pub low_power: bool,

    /// Borderless fullscreen on the current monitor
    pub fullscreen: bool,

    /// Let pointer input fall through and keep the window below others
    pub click_through: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            min_pixel_ratio: 1.0,
            max_pixel_ratio: 1.5,
            antialias: false,
            low_power: true,
            fullscreen: false,
            click_through: false,
        }
    }
}

impl RenderConfig {
    /// MSAA sample count for the scene target
    pub fn sample_count(&self) -> u32 {
        if self.antialias {
            4
        } else {
            1
        }
    }

    /// Device scale factor clamped into the configured pixel-ratio range
    pub fn pixel_ratio(&self, scale_factor: f64) -> f64 {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        scale.clamp(self.min_pixel_ratio, self.max_pixel_ratio.max(self.min_pixel_ratio))
    }

    /// Scene target size for a window of `physical` pixels at `scale_factor`
    ///
    /// The window's logical size is scaled by the clamped pixel ratio, so a
    /// 2x display with a 1.5 cap renders at 75% of its physical resolution.
    pub fn render_size(&self, physical: (u32, u32), scale_factor: f64) -> (u32, u32) {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        let ratio = self.pixel_ratio(scale) / scale;
        let width = (physical.0 as f64 * ratio).round() as u32;
        let height = (physical.1 as f64 * ratio).round() as u32;
        (width.max(1), height.max(1))
    }

    /// Validate configuration (positive sizes, sane pixel-ratio range)
    pub fn validate(&self) -> Result<(), String> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(format!(
                "Window size must be > 0, got {}x{}",
                self.window_width, self.window_height
            ));
        }
        if !(self.min_pixel_ratio > 0.0) {
            return Err(format!(
                "Minimum pixel ratio must be > 0, got {}",
                self.min_pixel_ratio
            ));
        }
        if self.max_pixel_ratio < self.min_pixel_ratio {
            return Err(format!(
                "Maximum pixel ratio {} is below minimum {}",
                self.max_pixel_ratio, self.min_pixel_ratio
            ));
        }
        Ok(())
    }
}

/// Headless capture configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Duration to capture (seconds); zero captures a single still
    pub duration_secs: f32,

    /// Simulation time of the first frame (seconds)
    pub start_secs: f32,

    /// Output directory for PNG frames
    pub output_dir: PathBuf,

    /// Frame rate (FPS)
    pub fps: u32,

    /// Output resolution (pixels)
    pub width: u32,
    pub height: u32,
}

impl CaptureConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            start_secs: 0.0,
            output_dir: PathBuf::from("capture"),
            fps: 60,
            width: 1280,
            height: 720,
        }
    }

    /// Total number of frames to capture (at least one)
    pub fn total_frames(&self) -> usize {
        let frames = (self.duration_secs.max(0.0) * self.fps as f32).ceil() as usize;
        frames.max(1)
    }

    /// Simulation time of frame `index`
    pub fn frame_time(&self, index: usize) -> f32 {
        if self.fps == 0 {
            return self.start_secs;
        }
        self.start_secs + index as f32 / self.fps as f32
    }

    /// Frame file path
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!("frame_{:05}.png", index))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fps == 0 {
            return Err("Capture frame rate must be > 0".to_string());
        }
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Capture size must be > 0, got {}x{}",
                self.width, self.height
            ));
        }
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(format!(
                "Capture duration must be >= 0, got {}",
                self.duration_secs
            ));
        }
        if !self.start_secs.is_finite() || self.start_secs < 0.0 {
            return Err(format!(
                "Capture start time must be >= 0, got {}",
                self.start_secs
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_clamped() {
        let config = RenderConfig::default();
        assert_eq!(config.pixel_ratio(0.5), 1.0);
        assert_eq!(config.pixel_ratio(1.25), 1.25);
        assert_eq!(config.pixel_ratio(2.0), 1.5);
        assert_eq!(config.pixel_ratio(f64::NAN), 1.0);
    }

    #[test]
    fn render_size_follows_capped_ratio() {
        let config = RenderConfig::default();

        // 1x display renders at physical size
        assert_eq!(config.render_size((1280, 720), 1.0), (1280, 720));

        // 2x display (2560x1440 physical) capped to 1.5x of 1280x720 logical
        assert_eq!(config.render_size((2560, 1440), 2.0), (1920, 1080));

        // Never collapses to zero
        assert_eq!(config.render_size((0, 0), 1.0), (1, 1));
    }

    #[test]
    fn sample_count_tracks_antialias() {
        let mut config = RenderConfig::default();
        assert_eq!(config.sample_count(), 1);
        config.antialias = true;
        assert_eq!(config.sample_count(), 4);
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let mut config = RenderConfig::default();
        assert!(config.validate().is_ok());
        config.max_pixel_ratio = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn capture_frame_schedule() {
        let mut config = CaptureConfig::new(0.5);
        config.fps = 30;
        config.start_secs = 2.0;

        assert_eq!(config.total_frames(), 15);
        assert_eq!(config.frame_time(0), 2.0);
        assert!((config.frame_time(15) - 2.5).abs() < 1e-6);
        assert_eq!(
            config.frame_path(3),
            PathBuf::from("capture").join("frame_00003.png")
        );
    }

    #[test]
    fn zero_duration_is_a_single_still() {
        let config = CaptureConfig::new(0.0);
        assert_eq!(config.total_frames(), 1);
        assert!(config.validate().is_ok());
    }
}
