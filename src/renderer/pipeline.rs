//! WebGPU render pipeline setup
//!
//! One flat-colour triangle-list pipeline. Vertices arrive in table units and are
//! mapped to clip space on upload.

use wgpu::util::DeviceExt;

use super::shapes::RAIL_THICKNESS;
use super::vertex::{Vertex, colors};
use crate::error::RenderError;

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Playing surface size in table units
    pub table_size: (f32, f32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        table_size: (f32, f32),
    ) -> Result<Self, RenderError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("carom-table-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        let config = surface_config(&caps.formats, &caps.alpha_modes, width, height)?;
        surface.configure(&device, &config);

        let pipeline = table_pipeline(&device, config.format);
        log::debug!("Surface configured: {:?} {}x{}", config.format, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            size: (width, height),
            table_size,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Draw one frame of table-space vertices
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let clip = to_clip_space(self.table_size, vertices);
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("table_vertices"),
                contents: bytemuck::cast_slice(&clip),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("table_encoder"),
            });

        {
            let [r, g, b, a] = colors::BACKGROUND.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("table_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_vertex_buffer(0, vertex_buffer.slice(..));
            pass.draw(0..clip.len() as u32, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Surface configuration from the reported capabilities, preferring an sRGB format
pub fn surface_config(
    formats: &[wgpu::TextureFormat],
    alpha_modes: &[wgpu::CompositeAlphaMode],
    width: u32,
    height: u32,
) -> Result<wgpu::SurfaceConfiguration, RenderError> {
    let format = formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first())
        .copied()
        .ok_or(RenderError::UnsupportedSurface("texture format"))?;
    let alpha_mode = alpha_modes
        .first()
        .copied()
        .ok_or(RenderError::UnsupportedSurface("alpha mode"))?;

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width,
        height,
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

fn table_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("table_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("table_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("table_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Table coordinates (origin top-left, y down, rails outside) to NDC
pub fn table_to_ndc(table_size: (f32, f32), x: f32, y: f32) -> (f32, f32) {
    let (w, h) = table_size;
    let full_w = w + 2.0 * RAIL_THICKNESS;
    let full_h = h + 2.0 * RAIL_THICKNESS;
    let nx = (x + RAIL_THICKNESS) / full_w * 2.0 - 1.0;
    let ny = 1.0 - (y + RAIL_THICKNESS) / full_h * 2.0;
    (nx, ny)
}

fn to_clip_space(table_size: (f32, f32), vertices: &[Vertex]) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|v| {
            let (x, y) = table_to_ndc(table_size, v.position[0], v.position[1]);
            Vertex::new(x, y, v.color)
        })
        .collect()
}
