//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (world units, seconds, pixels)
//! - Documented ranges and meanings
//! - `Default` impls carrying the shipped look
//!
//! Simulation (`SurfaceParams`) and presentation (`SceneParams`,
//! `RenderConfig`) are kept apart: nothing in the presentation structs can
//! change the wave shape.

mod render;
mod scene;
mod surface;

// Re-export all types
pub use render::{CaptureConfig, RenderConfig};
pub use scene::{CameraParams, SceneParams, SurfacePlacement, VeilParams};
pub use surface::{ShadingParams, SurfaceGeometry, SurfaceParams, WaveParams};
