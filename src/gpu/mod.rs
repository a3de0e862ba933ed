//! wgpu renderer for the network.
//!
//! Links are drawn first as alpha-blended lines, then points as instanced
//! discs on top. There is no depth buffer; everything is translucent.

mod connections;
mod nodes;
pub mod shaders;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use winit::window::Window;

use crate::config::VisualConfig;
use crate::error::GpuError;
use crate::render::{Frame, Renderer};
use crate::spawn::hex_to_rgb;
use connections::ConnectionState;
use nodes::NodeState;

/// Uniform block shared by both shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct Uniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    line_color: [f32; 3],
    node_radius: f32,
}

/// Draws frames into a window surface.
pub struct GpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    nodes: NodeState,
    links: ConnectionState,
    line_color: [f32; 3],
    node_radius: f32,
    background: wgpu::Color,
    /// Last ratio reported by the animator. Drawing takes its projection
    /// from the [`Frame`], so this is bookkeeping only.
    aspect: f32,
}

impl GpuRenderer {
    pub async fn new(window: Arc<Window>, visuals: &VisualConfig) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;
        tracing::info!(adapter = ?adapter.get_info().name, "using adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Colors are authored as display values, so skip the sRGB encode.
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let nodes = NodeState::new(&device, &uniform_layout, surface_format);
        let links = ConnectionState::new(&device, &uniform_buffer, surface_format);

        let bg = hex_to_rgb(visuals.background);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            uniform_bind_group,
            nodes,
            links,
            line_color: hex_to_rgb(visuals.line_color).to_array(),
            node_radius: visuals.node_radius,
            background: wgpu::Color {
                r: bg.x as f64,
                g: bg.y as f64,
                b: bg.z as f64,
                a: 1.0,
            },
            aspect: size.width.max(1) as f32 / size.height.max(1) as f32,
        })
    }

    /// Reconfigure the surface at its current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Last aspect ratio reported by the animator.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    fn write_uniforms(&self, frame: &Frame<'_>) {
        let uniforms = Uniforms {
            view: frame.view.to_cols_array_2d(),
            proj: frame.projection.to_cols_array_2d(),
            line_color: self.line_color,
            node_radius: self.node_radius,
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }
}

impl Renderer for GpuRenderer {
    type Error = wgpu::SurfaceError;

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        self.write_uniforms(frame);
        self.nodes.upload(&self.device, &self.queue, frame.points());
        self.links
            .upload(&self.device, &self.queue, &self.uniform_buffer, frame.segments());

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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

            self.links.draw(&mut render_pass);
            self.nodes.draw(&mut render_pass, &self.uniform_bind_group);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn set_viewport_size(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn set_aspect_ratio(&mut self, ratio: f32) {
        self.aspect = ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout() {
        // two mat4 + vec3 + f32, no implicit padding
        assert_eq!(std::mem::size_of::<Uniforms>(), 144);
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
    }
}
