//! Rendering system owning the wgpu device, pipelines and buffers.

use std::path::Path;
use std::sync::Arc;

use glam::Mat4;
use log::{debug, info};
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::context::{create_instance, request_device};
use super::pipeline::{PresentPipeline, ScenePipelines};
use super::readback::save_texture_png;
use super::target::SceneTarget;
use super::uniforms::SurfaceUniforms;
use crate::camera::{surface_model, Camera};
use crate::color::to_wgpu;
use crate::error::RenderError;
use crate::params::{RenderConfig, SceneParams, ShadingParams};
use crate::renderer::{Frame, FrameBackend};
use crate::wave::SurfaceMesh;

/// Format of the offscreen target when no window is attached
pub const HEADLESS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Window surface plus the blit that scales the scene onto it
struct Presenter {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    pipeline: PresentPipeline,
    bind_group: wgpu::BindGroup,
    scale_factor: f64,
}

pub struct RenderSystem {
    device: wgpu::Device,
    queue: wgpu::Queue,
    presenter: Option<Presenter>,
    pipelines: ScenePipelines,
    target: SceneTarget,
    render_config: RenderConfig,
    scene: SceneParams,
    camera: Camera,
    model: Mat4,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    index_count: u32,
}

impl RenderSystem {
    /// Attach to a window; the scene renders at the capped pixel ratio and is
    /// blitted to the window surface
    pub async fn for_window(
        window: Arc<Window>,
        mesh: &SurfaceMesh,
        shading: &ShadingParams,
        render_config: &RenderConfig,
        scene: SceneParams,
    ) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();

        let instance = create_instance();
        // Surface holds the Arc so it can be 'static
        let surface = instance.create_surface(window)?;
        let (adapter, device, queue) =
            request_device(&instance, Some(&surface), render_config.low_power).await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| RenderError::Surface("surface reports no formats".into()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let render_size = render_config.render_size((config.width, config.height), scale_factor);
        info!(
            "Surface {}x{} ({:?}), scene target {}x{} at scale {:.2}",
            config.width, config.height, format, render_size.0, render_size.1, scale_factor,
        );

        let target = SceneTarget::new(&device, format, render_size, render_config.sample_count());
        let pipeline = PresentPipeline::new(&device, format);
        let bind_group = pipeline.bind(&device, &target.view);
        let presenter = Presenter {
            surface,
            config,
            pipeline,
            bind_group,
            scale_factor,
        };

        Ok(Self::assemble(
            device,
            queue,
            Some(presenter),
            target,
            mesh,
            shading,
            render_config,
            scene,
        ))
    }

    /// Render into an offscreen texture only, for frame capture
    pub async fn headless(
        width: u32,
        height: u32,
        mesh: &SurfaceMesh,
        shading: &ShadingParams,
        render_config: &RenderConfig,
        scene: SceneParams,
    ) -> Result<Self, RenderError> {
        let instance = create_instance();
        let (_adapter, device, queue) =
            request_device(&instance, None, render_config.low_power).await?;

        let target = SceneTarget::new(
            &device,
            HEADLESS_FORMAT,
            (width, height),
            render_config.sample_count(),
        );
        info!("Headless scene target {}x{}", target.width, target.height);

        Ok(Self::assemble(
            device,
            queue,
            None,
            target,
            mesh,
            shading,
            render_config,
            scene,
        ))
    }

    fn assemble(
        device: wgpu::Device,
        queue: wgpu::Queue,
        presenter: Option<Presenter>,
        target: SceneTarget,
        mesh: &SurfaceMesh,
        shading: &ShadingParams,
        render_config: &RenderConfig,
        scene: SceneParams,
    ) -> Self {
        let pipelines = ScenePipelines::new(
            &device,
            target.color.format(),
            render_config.sample_count(),
        );

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Surface Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Surface Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let camera = Camera::new(scene.camera.clone());
        let model = surface_model(&scene.placement);
        let uniforms = SurfaceUniforms::new(
            camera.view_proj(target.aspect()),
            model,
            mesh.time_s(),
            shading,
            &scene,
        );

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Surface Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Surface Uniform Bind Group"),
            layout: &pipelines.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            device,
            queue,
            presenter,
            pipelines,
            target,
            render_config: render_config.clone(),
            scene,
            camera,
            model,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            uniform_bind_group,
            index_count: mesh.index_count(),
        }
    }

    /// Scene target resolution in pixels
    pub fn render_size(&self) -> (u32, u32) {
        (self.target.width, self.target.height)
    }

    /// Write the most recently drawn frame to `path` as PNG
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        save_texture_png(&self.device, &self.queue, &self.target.color, path)
    }

    /// Next swapchain texture, or `None` when this frame should be skipped
    fn acquire(
        presenter: &Presenter,
        device: &wgpu::Device,
    ) -> Result<Option<wgpu::SurfaceTexture>, RenderError> {
        match presenter.surface.get_current_texture() {
            Ok(texture) => Ok(Some(texture)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("Surface lost or outdated, reconfiguring");
                presenter.surface.configure(device, &presenter.config);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                debug!("Surface acquire timed out, skipping frame");
                Ok(None)
            }
            Err(e) => Err(RenderError::Device(e.to_string())),
        }
    }

    /// Clear, then draw back to front: veil, surface
    fn encode_scene(&self, encoder: &mut wgpu::CommandEncoder) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(self.target.attachment(to_wgpu(self.scene.background)))],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_bind_group(0, &self.uniform_bind_group, &[]);

        pass.set_pipeline(&self.pipelines.veil);
        pass.draw(0..6, 0..1);

        pass.set_pipeline(&self.pipelines.surface);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

impl FrameBackend for RenderSystem {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        let output = match &self.presenter {
            Some(presenter) => match Self::acquire(presenter, &self.device)? {
                Some(texture) => Some(texture),
                None => return Ok(()),
            },
            None => None,
        };

        self.queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(&frame.mesh.vertices),
        );
        let uniforms = SurfaceUniforms::new(
            self.camera.view_proj(self.target.aspect()),
            self.model,
            frame.time_s,
            frame.shading,
            &self.scene,
        );
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.encode_scene(&mut encoder);

        if let (Some(presenter), Some(output)) = (&self.presenter, &output) {
            let view = output
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Present Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&presenter.pipeline.pipeline);
            pass.set_bind_group(0, &presenter.bind_group, &[]);
            pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));

        if let Some(output) = output {
            output.present();
        }

        if frame.index == 0 {
            debug!("First frame submitted");
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32, scale_factor: f64) {
        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };
        if width == 0 || height == 0 {
            // Minimised; keep the old configuration until we get a real size
            return;
        }

        presenter.config.width = width;
        presenter.config.height = height;
        presenter.scale_factor = scale_factor;
        presenter.surface.configure(&self.device, &presenter.config);

        let render_size = self
            .render_config
            .render_size((width, height), presenter.scale_factor);
        if render_size != (self.target.width, self.target.height) {
            self.target = SceneTarget::new(
                &self.device,
                presenter.config.format,
                render_size,
                self.render_config.sample_count(),
            );
            presenter.bind_group = presenter.pipeline.bind(&self.device, &self.target.view);
            debug!("Scene target resized to {}x{}", render_size.0, render_size.1);
        }
    }
}
