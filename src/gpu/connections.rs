//! Connection rendering: one line per link, faded by its opacity.
//!
//! Endpoints are written to a storage buffer as `vec4` pairs and expanded
//! into a line list in the vertex shader.

use super::shaders::LINK_SHADER;
use crate::render::Segment;

/// Bytes per link in the storage buffer (two `vec4<f32>`).
const LINK_STRIDE: usize = 32;

/// Pack a segment as `(a.xyz, opacity), (b.xyz, 0)`.
pub(crate) fn pack_segment(segment: &Segment) -> [[f32; 4]; 2] {
    [
        segment.start.extend(segment.opacity).to_array(),
        segment.end.extend(0.0).to_array(),
    ]
}

/// GPU resources for connection rendering.
pub(crate) struct ConnectionState {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    buffer: wgpu::Buffer,
    /// Links the buffer can hold.
    capacity: usize,
    /// Links written this frame.
    count: u32,
    scratch: Vec<[[f32; 4]; 2]>,
}

impl ConnectionState {
    pub fn new(
        device: &wgpu::Device,
        uniform_buffer: &wgpu::Buffer,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Connection Render Bind Group Layout"),
            entries: &[
                // uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // link endpoints
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let capacity = 1;
        let buffer = create_link_buffer(device, capacity);
        let bind_group = create_bind_group(device, &bind_group_layout, uniform_buffer, &buffer);
        let pipeline = create_render_pipeline(device, &bind_group_layout, surface_format);

        Self {
            pipeline,
            bind_group_layout,
            bind_group,
            buffer,
            capacity,
            count: 0,
            scratch: Vec::new(),
        }
    }

    /// Copy this frame's segments into the storage buffer. Growing the
    /// buffer also rebuilds the bind group that points at it.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        uniform_buffer: &wgpu::Buffer,
        segments: impl Iterator<Item = Segment>,
    ) {
        self.scratch.clear();
        self.scratch.extend(segments.map(|s| pack_segment(&s)));
        self.count = self.scratch.len() as u32;
        if self.scratch.is_empty() {
            return;
        }

        if self.scratch.len() > self.capacity {
            self.capacity = self.scratch.len().next_power_of_two();
            self.buffer = create_link_buffer(device, self.capacity);
            self.bind_group =
                create_bind_group(device, &self.bind_group_layout, uniform_buffer, &self.buffer);
            tracing::debug!(capacity = self.capacity, "grew connection buffer");
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&self.scratch));
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..2, 0..self.count);
    }
}

fn create_link_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Connection Buffer"),
        size: (capacity * LINK_STRIDE) as u64,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    link_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Connection Render Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: link_buffer.as_entire_binding(),
            },
        ],
    })
}

fn create_render_pipeline(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Connection Render Shader"),
        source: wgpu::ShaderSource::Wgsl(LINK_SHADER.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Connection Render Pipeline Layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Connection Render Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::LineList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    #[test]
    fn test_pack_segment() {
        let segment = Segment {
            start: Vec3::new(1.0, 2.0, 3.0),
            end: Vec3::new(-1.0, 0.5, 0.0),
            opacity: 0.27,
        };
        let packed = pack_segment(&segment);
        assert_eq!(packed[0], [1.0, 2.0, 3.0, 0.27]);
        assert_eq!(packed[1], [-1.0, 0.5, 0.0, 0.0]);
        assert_eq!(std::mem::size_of_val(&packed), LINK_STRIDE);
    }
}
