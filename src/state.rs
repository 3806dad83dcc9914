use crate::input::InputState;
use crate::render::{
    canvas_format, clear_color, create_canvas_texture, create_render_bind_group,
    create_render_bind_group_layout, create_render_pipeline, write_canvas,
};
use crate::{hud, AppError};
use fading_life::colors::GRID_LINE;
use fading_life::viewport::Viewport;
use fading_life::{Command, Config, Controller, PixelCanvas, SimError};
use std::sync::Arc;
use winit::{dpi::PhysicalSize, window::Window};

// GUI Imports
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui_winit::State as EguiWinitState;

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub window: Arc<Window>,

    pub render_pipeline: wgpu::RenderPipeline,
    pub render_bind_group_layout: wgpu::BindGroupLayout,
    pub render_bind_group: wgpu::BindGroup,
    pub canvas_texture: wgpu::Texture,
    pub canvas_size: (u32, u32),
    pub background: wgpu::Color,

    pub controller: Controller,
    pub canvas: PixelCanvas,
    pub input: InputState,

    // GUI state
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
    pub menu_open: bool,
}

impl State {
    pub async fn new(window: Arc<Window>, options: &Config) -> Result<Self, AppError> {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(AppError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(AppError::IncompatibleSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // The window may not come up at the requested size; fit the grid to
        // what we actually got.
        let mut controller = Controller::new(options)?;
        if options.viewport() != Viewport::new(size.width, size.height)
            && size.width > 0
            && size.height > 0
        {
            controller.resize_viewport(size.width, size.height)?;
        }

        let mut canvas = PixelCanvas::new();
        controller.render(&mut canvas);
        let canvas_size = (canvas.width(), canvas.height());

        // Create Render Resources
        let render_bind_group_layout = create_render_bind_group_layout(&device);
        let canvas_texture =
            create_canvas_texture(&device, canvas_size.0, canvas_size.1, canvas_format(surface_format));
        write_canvas(&queue, &canvas_texture, &canvas);
        let render_bind_group =
            create_render_bind_group(&device, &render_bind_group_layout, &canvas_texture);
        let render_pipeline =
            create_render_pipeline(&device, &render_bind_group_layout, surface_format);
        let background = clear_color(GRID_LINE, surface_format.is_srgb());

        // Initialize egui
        let egui_ctx = EguiContext::default();
        let egui_winit_state =
            EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), &window, None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, config.format, None, 1);
        log::info!("egui initialized.");

        log::info!("wgpu initialized successfully.");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            render_pipeline,
            render_bind_group_layout,
            render_bind_group,
            canvas_texture,
            canvas_size,
            background,
            controller,
            canvas,
            input: InputState::default(),
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            menu_open: false,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) -> Result<(), SimError> {
        if new_size.width == 0 || new_size.height == 0 {
            log::warn!("Ignoring resize to {}x{}", new_size.width, new_size.height);
            return Ok(());
        }
        self.reconfigure_surface(new_size);

        let viewport = Viewport::new(new_size.width, new_size.height);
        if self.controller.simulation().settings().viewport != viewport {
            self.controller.resize_viewport(new_size.width, new_size.height)?;
        }
        Ok(())
    }

    fn reconfigure_surface(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Draws the current generation into the canvas and pushes it to the GPU,
    /// recreating the texture when the grid's pixel size changed.
    fn upload_canvas(&mut self) {
        self.controller.render(&mut self.canvas);
        let canvas_size = (self.canvas.width(), self.canvas.height());
        if canvas_size != self.canvas_size {
            self.canvas_texture = create_canvas_texture(
                &self.device,
                canvas_size.0,
                canvas_size.1,
                canvas_format(self.config.format),
            );
            self.render_bind_group = create_render_bind_group(
                &self.device,
                &self.render_bind_group_layout,
                &self.canvas_texture,
            );
            self.canvas_size = canvas_size;
        }
        write_canvas(&self.queue, &self.canvas_texture, &self.canvas);
    }

    /// Renders one frame: the grid, then the egui overlay on top. Returns the
    /// commands the overlay produced.
    pub fn render(&mut self) -> Result<Vec<Command>, wgpu::SurfaceError> {
        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.reconfigure_surface(self.size);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.upload_canvas();

        // Begin egui frame
        let raw_input = self.egui_winit_state.take_egui_input(&self.window);
        self.egui_ctx.begin_frame(raw_input);
        let commands = hud::show(&self.egui_ctx, &mut self.menu_open, &self.controller);
        let full_output = self.egui_ctx.end_frame();
        self.egui_winit_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Upload egui data to GPU
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let egui_buffers = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Grid Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.render_bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue
            .submit(egui_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        output_frame.present();

        Ok(commands)
    }
}
