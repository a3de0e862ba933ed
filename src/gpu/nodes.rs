//! Point rendering: one instanced disc per point.

use bytemuck::{Pod, Zeroable};

use super::shaders::NODE_SHADER;
use crate::network::Point;

/// Per-instance data for one point.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct NodeInstance {
    position: [f32; 3],
    scale: f32,
    color: [f32; 3],
    _pad: f32,
}

impl From<&Point> for NodeInstance {
    fn from(point: &Point) -> Self {
        Self {
            position: point.position.to_array(),
            scale: point.scale,
            color: point.color.to_array(),
            _pad: 0.0,
        }
    }
}

/// GPU resources for point rendering.
pub(crate) struct NodeState {
    pipeline: wgpu::RenderPipeline,
    buffer: wgpu::Buffer,
    /// Instances the buffer can hold.
    capacity: usize,
    /// Instances written this frame.
    count: u32,
    scratch: Vec<NodeInstance>,
}

impl NodeState {
    pub fn new(
        device: &wgpu::Device,
        uniform_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let pipeline = create_render_pipeline(device, uniform_layout, surface_format);
        let capacity = 1;
        Self {
            pipeline,
            buffer: create_instance_buffer(device, capacity),
            capacity,
            count: 0,
            scratch: Vec::new(),
        }
    }

    /// Copy this frame's points into the instance buffer, growing it first
    /// if needed.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, points: &[Point]) {
        self.scratch.clear();
        self.scratch.extend(points.iter().map(NodeInstance::from));
        self.count = self.scratch.len() as u32;
        if self.scratch.is_empty() {
            return;
        }

        if self.scratch.len() > self.capacity {
            self.capacity = self.scratch.len().next_power_of_two();
            self.buffer = create_instance_buffer(device, self.capacity);
            tracing::debug!(capacity = self.capacity, "grew node buffer");
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&self.scratch));
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, uniform_bind_group: &wgpu::BindGroup) {
        if self.count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, uniform_bind_group, &[]);
        pass.set_vertex_buffer(0, self.buffer.slice(..));
        pass.draw(0..6, 0..self.count);
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Node Instance Buffer"),
        size: (capacity * std::mem::size_of::<NodeInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_render_pipeline(
    device: &wgpu::Device,
    uniform_layout: &wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Node Render Shader"),
        source: wgpu::ShaderSource::Wgsl(NODE_SHADER.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Node Render Pipeline Layout"),
        bind_group_layouts: &[uniform_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Node Render Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<NodeInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    // position + scale
                    wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x4,
                    },
                    // color
                    wgpu::VertexAttribute {
                        offset: 16,
                        shader_location: 1,
                        format: wgpu::VertexFormat::Float32x3,
                    },
                ],
            }],
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
            topology: wgpu::PrimitiveTopology::TriangleList,
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
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<NodeInstance>(), 32);

        let mut point = Point::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::new(0.1, 0.2, 0.3));
        point.scale = 1.2;
        let instance = NodeInstance::from(&point);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&instance));
        assert_eq!(&floats[..4], &[1.0, 2.0, 3.0, 1.2]);
        assert_eq!(&floats[4..7], &[0.1, 0.2, 0.3]);
    }
}
