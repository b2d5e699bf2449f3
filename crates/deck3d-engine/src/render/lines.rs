//! Unlit colored lines (floor grid) and round point sprites (star field).

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use super::common;
use super::mesh::CameraMatrices;
use super::uniforms::DynamicUniforms;
use super::RenderCtx;

const SHADER: &str = include_str!("shaders/lines.wgsl");

/// Line-list vertex; `color` is premultiplied linear RGBA.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// One point sprite. `size` is a world-ish factor scaled by distance in the shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

/// Static line geometry.
pub struct LineBatch {
    buffer: wgpu::Buffer,
    count: u32,
}

/// Static point sprites.
pub struct PointCloud {
    buffer: wgpu::Buffer,
    count: u32,
}

pub enum LineDraw<'a> {
    Lines(&'a LineBatch, Mat4),
    Points(&'a PointCloud, Mat4),
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DrawUniform {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    viewport_time: [f32; 4],
}

pub struct LineRenderer {
    line_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    uniforms: DynamicUniforms,
    scratch: Vec<DrawUniform>,
}

impl LineRenderer {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat, depth_format: wgpu::TextureFormat) -> Self {
        let module = common::shader(device, "deck3d lines shader", SHADER);
        let uniforms = DynamicUniforms::new(
            device,
            "deck3d line draws",
            std::mem::size_of::<DrawUniform>() as u64,
            wgpu::ShaderStages::VERTEX,
        );
        let layout = common::pipeline_layout(device, "deck3d lines pipeline layout", &[uniforms.layout()]);

        const LINE_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
            0 => Float32x3, // position
            1 => Float32x4  // color
        ];
        const POINT_ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x3, // position
            1 => Float32,   // size
            2 => Float32x4  // color
        ];

        let build = |label: &str,
                     vs: &str,
                     fs: &str,
                     buffer: wgpu::VertexBufferLayout<'_>,
                     topology: wgpu::PrimitiveTopology,
                     blend: wgpu::BlendState| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: Some(vs),
                    compilation_options: Default::default(),
                    buffers: &[buffer],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: Some(fs),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    ..Default::default()
                },
                // Depth-tested against cards, never written: translucent layers.
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: depth_format,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let line_pipeline = build(
            "deck3d line pipeline",
            "vs_line",
            "fs_line",
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<LineVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &LINE_ATTRS,
            },
            wgpu::PrimitiveTopology::LineList,
            common::premul_alpha_blend(),
        );
        let point_pipeline = build(
            "deck3d point pipeline",
            "vs_point",
            "fs_point",
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &POINT_ATTRS,
            },
            wgpu::PrimitiveTopology::TriangleList,
            common::additive_blend(),
        );

        Self {
            line_pipeline,
            point_pipeline,
            uniforms,
            scratch: Vec::new(),
        }
    }

    pub fn upload_lines(&self, device: &wgpu::Device, label: &str, vertices: &[LineVertex]) -> LineBatch {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        LineBatch { buffer, count: vertices.len() as u32 }
    }

    pub fn upload_points(&self, device: &wgpu::Device, label: &str, points: &[PointInstance]) -> PointCloud {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(points),
            usage: wgpu::BufferUsages::VERTEX,
        });
        PointCloud { buffer, count: points.len() as u32 }
    }

    /// Records `draws` into a pass targeting the HDR color and depth targets.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        pass: &mut wgpu::RenderPass<'_>,
        camera: &CameraMatrices,
        time: f32,
        draws: &[LineDraw<'_>],
    ) {
        if draws.is_empty() {
            return;
        }

        let (w, h) = ctx.physical_size();
        let view_proj = (camera.proj * camera.view).to_cols_array_2d();
        let view = camera.view.to_cols_array_2d();

        self.scratch.clear();
        self.scratch.extend(draws.iter().map(|d| {
            let model = match d {
                LineDraw::Lines(_, m) | LineDraw::Points(_, m) => *m,
            };
            DrawUniform {
                view_proj,
                view,
                model: model.to_cols_array_2d(),
                viewport_time: [w as f32, h as f32, time, 0.0],
            }
        }));
        self.uniforms.write(ctx.device, ctx.queue, &self.scratch);

        for (slot, draw) in draws.iter().enumerate() {
            pass.set_bind_group(0, self.uniforms.bind_group(), &[self.uniforms.offset(slot)]);
            match draw {
                LineDraw::Lines(batch, _) if batch.count > 0 => {
                    pass.set_pipeline(&self.line_pipeline);
                    pass.set_vertex_buffer(0, batch.buffer.slice(..));
                    pass.draw(0..batch.count, 0..1);
                }
                LineDraw::Points(cloud, _) if cloud.count > 0 => {
                    pass.set_pipeline(&self.point_pipeline);
                    pass.set_vertex_buffer(0, cloud.buffer.slice(..));
                    pass.draw(0..6, 0..cloud.count);
                }
                _ => {}
            }
        }
    }
}
