//! Fullscreen sky pipeline

use super::uniform::UniformBlock;
use crate::render::shader;
use crate::sky::SkyUniform;

/// Background pass: one fullscreen triangle, no depth.
pub struct SkyPipeline {
    pipeline: wgpu::RenderPipeline,
    uniform: UniformBlock,
}

impl SkyPipeline {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = shader::create_module(device, "sky_shader", shader::SKY_STAGE);
        let uniform = UniformBlock::new::<SkyUniform>(device, "sky_uniform", wgpu::ShaderStages::FRAGMENT);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky_pipeline_layout"),
            bind_group_layouts: &[uniform.bind_group_layout()],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sky_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self { pipeline, uniform }
    }

    pub fn update(&self, queue: &wgpu::Queue, uniform: &SkyUniform) {
        self.uniform.write(queue, uniform);
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, self.uniform.bind_group(), &[]);
        pass.draw(0..3, 0..1);
    }
}
