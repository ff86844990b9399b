//! wgpu pipeline for the play field
//!
//! Vertices arrive in play-field units; the shader letterboxes them into
//! the viewport through a small uniform, so resizing only rewrites 16 bytes.

use super::vertex::{FieldUniform, Vertex};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::Color;

/// Vertices the buffer holds before it first has to grow
const INITIAL_VERTEX_CAPACITY: usize = 4096;

pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    field_buffer: wgpu::Buffer,
    field_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("highway-survival-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        log::info!("Surface format: {:?}", format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let field_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("field"),
            size: std::mem::size_of::<FieldUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(
            &field_buffer,
            0,
            bytemuck::bytes_of(&FieldUniform::for_viewport((width, height))),
        );

        let field_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("field_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let field_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("field_bind_group"),
            layout: &field_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: field_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("field_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("field_pipeline_layout"),
            bind_group_layouts: &[&field_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("field_pipeline"),
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
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let vertex_buffer = Self::create_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            field_buffer,
            field_bind_group,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            size: (width, height),
        })
    }

    fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("field_vertices"),
            size: (std::mem::size_of::<Vertex>() * capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.queue.write_buffer(
            &self.field_buffer,
            0,
            bytemuck::bytes_of(&FieldUniform::for_viewport(self.size)),
        );
    }

    /// Draw one frame of play-field triangles over `clear`
    pub fn render(&mut self, vertices: &[Vertex], clear: Color) -> Result<(), wgpu::SurfaceError> {
        if vertices.len() > self.vertex_capacity {
            self.vertex_capacity = vertices.len().next_power_of_two();
            self.vertex_buffer = Self::create_vertex_buffer(&self.device, self.vertex_capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.vertex_capacity);
        }
        if !vertices.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("field_encoder"),
            });

        {
            let [r, g, b, a] = clear.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("field_pass"),
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

            if !vertices.is_empty() {
                let bytes = (std::mem::size_of::<Vertex>() * vertices.len()) as u64;
                let (x, y, w, h) = field_rect(self.size);
                pass.set_pipeline(&self.pipeline);
                pass.set_scissor_rect(x, y, w, h);
                pass.set_bind_group(0, &self.field_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..bytes));
                pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Pixels per play-field unit when the field is letterboxed into `size`
pub fn field_scale(size: (u32, u32)) -> f32 {
    (size.0 as f32 / SCREEN_WIDTH).min(size.1 as f32 / SCREEN_HEIGHT)
}

/// Pixel rectangle `(x, y, w, h)` the play field occupies; anything
/// drawn past the field edges is clipped to it
pub fn field_rect(size: (u32, u32)) -> (u32, u32, u32, u32) {
    let px = field_scale(size);
    let w = ((SCREEN_WIDTH * px) as u32).clamp(1, size.0.max(1));
    let h = ((SCREEN_HEIGHT * px) as u32).clamp(1, size.1.max(1));
    ((size.0.saturating_sub(w)) / 2, (size.1.saturating_sub(h)) / 2, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_scale_fits_smaller_axis() {
        assert_eq!(field_scale((400, 600)), 1.0);
        assert_eq!(field_scale((1200, 600)), 1.0);
        assert_eq!(field_scale((800, 2000)), 2.0);
    }

    #[test]
    fn test_field_rect_is_centred() {
        assert_eq!(field_rect((400, 600)), (0, 0, 400, 600));
        assert_eq!(field_rect((1200, 600)), (400, 0, 400, 600));
        assert_eq!(field_rect((800, 1500)), (0, 150, 800, 1200));
    }

    #[test]
    fn test_wide_viewport_letterboxes() {
        // 1200x600: field is 400 px wide in the middle third
        let field = FieldUniform::for_viewport((1200, 600));
        let (left, top) = field.apply(0.0, 0.0);
        let (right, bottom) = field.apply(SCREEN_WIDTH, SCREEN_HEIGHT);
        assert!((left + 1.0 / 3.0).abs() < 1e-6);
        assert!((right - 1.0 / 3.0).abs() < 1e-6);
        assert!((top - 1.0).abs() < 1e-5);
        assert!((bottom + 1.0).abs() < 1e-5);
    }
}
