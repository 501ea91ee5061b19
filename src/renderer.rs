//! Renderer lifecycle: mount, per-frame advance, unmount.
//!
//! The renderer owns the simulation (mesh + parameters) and an injected clock.
//! The graphics backend is created by a mount closure and is the only thing
//! holding GPU resources, so dropping it on `stop()` releases the context.
//!
//! States: `Unmounted` → `Running` (start) → `Unmounted` (stop). A failed
//! mount leaves the renderer unmounted and silent.

use log::{debug, info, warn};

use crate::clock::FrameClock;
use crate::error::RenderError;
use crate::params::{ShadingParams, SurfaceParams, WaveParams};
use crate::wave::SurfaceMesh;

/// One frame's worth of simulation output handed to the backend
pub struct Frame<'a> {
    /// Frames drawn since mount (0 for the first)
    pub index: u64,
    pub time_s: f32,
    pub mesh: &'a SurfaceMesh,
    pub shading: &'a ShadingParams,
}

/// Something that can put a frame on a display surface (or into a texture)
pub trait FrameBackend {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), RenderError>;

    /// Window size changed (physical pixels) or moved to a different density
    fn resize(&mut self, _width: u32, _height: u32, _scale_factor: f64) {}
}

pub struct Renderer<C: FrameClock, B: FrameBackend> {
    clock: C,
    mesh: SurfaceMesh,
    waves: WaveParams,
    shading: ShadingParams,
    backend: Option<B>,
    frame_index: u64,
}

impl<C: FrameClock, B: FrameBackend> Renderer<C, B> {
    pub fn new(clock: C, params: SurfaceParams) -> Self {
        let SurfaceParams {
            geometry,
            waves,
            shading,
        } = params;
        Self {
            clock,
            mesh: SurfaceMesh::new(&geometry),
            waves,
            shading,
            backend: None,
            frame_index: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.backend.is_some()
    }

    /// Mount, propagating a failure to acquire the rendering context
    ///
    /// Already running is not an error; the existing backend is kept and
    /// `mount` is not called.
    pub fn try_start<F>(&mut self, mount: F) -> Result<(), RenderError>
    where
        F: FnOnce(&SurfaceMesh, &ShadingParams) -> Result<B, RenderError>,
    {
        if self.backend.is_some() {
            debug!("Renderer already running, ignoring start");
            return Ok(());
        }

        let backend = mount(&self.mesh, &self.shading)?;
        self.clock.reset();
        self.frame_index = 0;
        self.backend = Some(backend);
        info!("Wave surface mounted");
        Ok(())
    }

    /// Mount, failing silently: on error nothing is rendered and `false` is
    /// returned. The surface is decoration and must never take the host down.
    pub fn start<F>(&mut self, mount: F) -> bool
    where
        F: FnOnce(&SurfaceMesh, &ShadingParams) -> Result<B, RenderError>,
    {
        match self.try_start(mount) {
            Ok(()) => true,
            Err(e) => {
                warn!("Wave surface unavailable, rendering nothing: {}", e);
                false
            }
        }
    }

    /// Unmount immediately, releasing the backend. Returns whether anything
    /// was running.
    pub fn stop(&mut self) -> bool {
        match self.backend.take() {
            Some(backend) => {
                drop(backend);
                info!("Wave surface unmounted after {} frames", self.frames_drawn());
                true
            }
            None => false,
        }
    }

    /// Advance the surface to the clock's time and draw it
    ///
    /// Returns `Ok(false)` without touching the mesh when unmounted.
    pub fn frame(&mut self) -> Result<bool, RenderError> {
        let Some(backend) = self.backend.as_mut() else {
            return Ok(false);
        };

        let time_s = self.clock.elapsed_s();
        self.mesh.update(time_s, &self.waves);

        backend.draw(&Frame {
            index: self.frame_index,
            time_s,
            mesh: &self.mesh,
            shading: &self.shading,
        })?;
        self.frame_index += 1;
        Ok(true)
    }

    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f64) {
        if let Some(backend) = self.backend.as_mut() {
            backend.resize(width, height, scale_factor);
        }
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frame_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records what it was asked to draw and how many instances are alive
    #[derive(Default)]
    struct Recorder {
        live: usize,
        mounts: usize,
        draws: Vec<(u64, f32)>,
        resizes: Vec<(u32, u32)>,
    }

    struct FakeBackend {
        record: Rc<RefCell<Recorder>>,
        fail_draws: bool,
    }

    impl FakeBackend {
        fn mount(record: &Rc<RefCell<Recorder>>) -> Result<Self, RenderError> {
            let mut p = record.borrow_mut();
            p.live += 1;
            p.mounts += 1;
            Ok(Self {
                record: Rc::clone(record),
                fail_draws: false,
            })
        }
    }

    impl Drop for FakeBackend {
        fn drop(&mut self) {
            self.record.borrow_mut().live -= 1;
        }
    }

    impl FrameBackend for FakeBackend {
        fn draw(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
            if self.fail_draws {
                return Err(RenderError::Device("lost".into()));
            }
            self.record
                .borrow_mut()
                .draws
                .push((frame.index, frame.time_s));
            Ok(())
        }

        fn resize(&mut self, width: u32, height: u32, _scale_factor: f64) {
            self.record.borrow_mut().resizes.push((width, height));
        }
    }

    fn renderer() -> Renderer<ManualClock, FakeBackend> {
        Renderer::new(ManualClock::new(), SurfaceParams::default())
    }

    #[test]
    fn mount_then_unmount_releases_backend() {
        let record = Rc::new(RefCell::new(Recorder::default()));
        let mut r = renderer();
        assert!(!r.is_running());

        assert!(r.start(|_, _| FakeBackend::mount(&record)));
        assert!(r.is_running());
        assert_eq!(record.borrow().live, 1);

        assert!(r.stop());
        assert!(!r.is_running());
        assert_eq!(record.borrow().live, 0);

        // Second stop is a no-op
        assert!(!r.stop());
    }

    #[test]
    fn no_frames_after_stop() {
        let record = Rc::new(RefCell::new(Recorder::default()));
        let mut r = renderer();
        r.start(|_, _| FakeBackend::mount(&record));

        assert!(r.frame().unwrap());
        r.stop();
        assert!(!r.frame().unwrap());
        r.resize(800, 600, 1.0);

        assert_eq!(record.borrow().draws.len(), 1);
        assert!(record.borrow().resizes.is_empty());
    }

    #[test]
    fn failed_mount_is_silent() {
        let mut r = renderer();
        let mounted = r.start(|_, _| Err(RenderError::AdapterNotFound));

        assert!(!mounted);
        assert!(!r.is_running());
        assert!(!r.frame().unwrap());
    }

    #[test]
    fn try_start_propagates_mount_error() {
        let mut r = renderer();
        let err = r.try_start(|_, _| Err(RenderError::AdapterNotFound));
        assert!(matches!(err, Err(RenderError::AdapterNotFound)));
    }

    #[test]
    fn start_while_running_keeps_backend() {
        let record = Rc::new(RefCell::new(Recorder::default()));
        let mut r = renderer();
        r.start(|_, _| FakeBackend::mount(&record));
        assert!(r.start(|_, _| FakeBackend::mount(&record)));

        assert_eq!(record.borrow().mounts, 1);
        assert_eq!(record.borrow().live, 1);
    }

    #[test]
    fn frames_follow_the_injected_clock() {
        let record = Rc::new(RefCell::new(Recorder::default()));
        let mut r = renderer();
        r.start(|_, _| FakeBackend::mount(&record));

        r.frame().unwrap();
        r.clock_mut().advance(0.5);
        r.frame().unwrap();
        r.clock_mut().advance(0.25);
        r.frame().unwrap();

        assert_eq!(record.borrow().draws, vec![(0, 0.0), (1, 0.5), (2, 0.75)]);
        assert_eq!(r.mesh().time_s(), 0.75);
        assert_eq!(r.frames_drawn(), 3);
    }

    #[test]
    fn remount_resets_clock_and_frame_index() {
        let record = Rc::new(RefCell::new(Recorder::default()));
        let mut r = renderer();
        r.start(|_, _| FakeBackend::mount(&record));
        r.clock_mut().set(10.0);
        r.frame().unwrap();
        r.stop();

        r.start(|_, _| FakeBackend::mount(&record));
        r.frame().unwrap();

        assert_eq!(record.borrow().draws, vec![(0, 10.0), (0, 0.0)]);
        assert_eq!(record.borrow().live, 1);
    }

    #[test]
    fn draw_errors_propagate_without_unmounting() {
        let record = Rc::new(RefCell::new(Recorder::default()));
        let mut r = renderer();
        r.start(|_, _| {
            let mut backend = FakeBackend::mount(&record)?;
            backend.fail_draws = true;
            Ok(backend)
        });

        assert!(r.frame().is_err());
        assert!(r.is_running());
        assert_eq!(r.frames_drawn(), 0);
    }

    #[test]
    fn mount_sees_the_flat_mesh() {
        let mut r = renderer();
        let mut vertex_count = 0;
        r.start(|mesh, _| {
            vertex_count = mesh.vertices.len();
            assert!(mesh.heights().all(|h| h == 0.0));
            Err(RenderError::AdapterNotFound)
        });
        assert_eq!(vertex_count, 81 * 81);
    }

    #[test]
    fn mount_receives_configured_shading() {
        let mut params = SurfaceParams::default();
        params.shading.base_opacity = 0.3;
        params.shading.caustic_strength = 0.0;
        let mut r: Renderer<ManualClock, FakeBackend> = Renderer::new(ManualClock::new(), params);

        let mut seen = None;
        r.start(|_, shading| {
            seen = Some((shading.base_opacity, shading.caustic_strength));
            Err(RenderError::AdapterNotFound)
        });
        assert_eq!(seen, Some((0.3, 0.0)));
    }
}
