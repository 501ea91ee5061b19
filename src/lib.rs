//! wavesurface - animated procedural wave surface for page backgrounds

pub mod app;
pub mod camera;
pub mod capture;
pub mod cli;
pub mod clock;
pub mod color;
pub mod error;
pub mod params;
pub mod renderer;
pub mod rendering;
pub mod wave;
