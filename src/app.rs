//! Windowed application: creates the window, mounts the renderer once the
//! event loop is idle, redraws every refresh and unmounts on close.

use std::sync::Arc;

use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window, WindowId, WindowLevel},
};

use crate::clock::SystemClock;
use crate::error::RenderError;
use crate::params::{RenderConfig, SceneParams, SurfaceParams};
use crate::renderer::Renderer;
use crate::rendering::RenderSystem;

pub struct App {
    window: Option<Arc<Window>>,
    renderer: Renderer<SystemClock, RenderSystem>,
    render_config: RenderConfig,
    scene: SceneParams,
    pending_mount: bool,
}

impl App {
    pub fn new(render_config: RenderConfig, surface: SurfaceParams, scene: SceneParams) -> Self {
        Self {
            window: None,
            renderer: Renderer::new(SystemClock::new(), surface),
            render_config,
            scene,
            pending_mount: false,
        }
    }

    fn window_attributes(&self) -> winit::window::WindowAttributes {
        let mut attributes = Window::default_attributes()
            .with_title("Wave Surface")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        if self.render_config.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        if self.render_config.click_through {
            attributes = attributes
                .with_decorations(false)
                .with_window_level(WindowLevel::AlwaysOnBottom);
        }
        attributes
    }

    /// Acquire the GPU context for the current window. Failure is only
    /// logged; the window stays open but nothing is ever drawn into it.
    fn mount(&mut self) {
        let Some(window) = self.window.as_ref().map(Arc::clone) else {
            return;
        };
        let render_config = &self.render_config;
        let scene = self.scene.clone();

        let mounted = self.renderer.start(|mesh, shading| {
            pollster::block_on(RenderSystem::for_window(
                Arc::clone(&window),
                mesh,
                shading,
                render_config,
                scene,
            ))
        });
        if mounted {
            if let Some(backend) = self.renderer.backend() {
                let (w, h) = backend.render_size();
                info!("Rendering at {}x{}", w, h);
            }
        }
    }

    fn render_frame(&mut self) {
        match self.renderer.frame() {
            Ok(_) => {}
            Err(e) if e.is_fatal() => {
                error!("Render error, unmounting wave surface: {}", e);
                self.renderer.stop();
            }
            Err(e) => warn!("Skipped frame: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.pending_mount {
            self.pending_mount = false;
            self.mount();
        }
        if self.renderer.is_running() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(self.window_attributes()) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            if self.render_config.click_through {
                if let Err(e) = window.set_cursor_hittest(false) {
                    warn!("Click-through not supported on this platform: {}", e);
                }
            }
            self.window = Some(window);
        }

        // Mount on the next idle turn so window creation never waits on the GPU
        self.pending_mount = true;
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.pending_mount = false;
        self.renderer.stop();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.pending_mount = false;
                self.renderer.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(window) = &self.window {
                    self.renderer
                        .resize(size.width, size.height, window.scale_factor());
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.renderer.resize(size.width, size.height, scale_factor);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(),
            _ => {}
        }
    }
}

/// Run the windowed event loop until the window closes
pub fn run(
    render_config: RenderConfig,
    surface: SurfaceParams,
    scene: SceneParams,
) -> Result<(), RenderError> {
    let event_loop = EventLoop::new().map_err(|e| RenderError::EventLoop(e.to_string()))?;
    let mut app = App::new(render_config, surface, scene);
    event_loop
        .run_app(&mut app)
        .map_err(|e| RenderError::EventLoop(e.to_string()))
}
