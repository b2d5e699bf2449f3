//! Lit, textured mesh renderer.
//!
//! Lighting is ambient + one directional + one point light with a
//! roughness-driven specular lobe. Each material can carry an emissive map
//! whose color is added unlit so the bloom pass picks it up.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::geometry::{Aabb, Mesh, Vertex};

use super::common;
use super::texture::{linear_sampler, GpuTexture};
use super::uniforms::DynamicUniforms;
use super::RenderCtx;

const SHADER: &str = include_str!("shaders/mesh.wgsl");

/// View, projection and eye position for one frame.
#[derive(Debug, Copy, Clone)]
pub struct CameraMatrices {
    pub view: Mat4,
    pub proj: Mat4,
    pub eye: Vec3,
}

/// Light colors are linear RGB already multiplied by intensity.
#[derive(Debug, Copy, Clone, Default)]
pub struct SceneLights {
    pub ambient: [f32; 3],
    /// Unit vector pointing toward the directional light.
    pub directional_dir: Vec3,
    pub directional: [f32; 3],
    pub point_position: Vec3,
    pub point: [f32; 3],
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MaterialDesc {
    /// Linear RGB multiplied with the base map.
    pub base_color: [f32; 3],
    pub roughness: f32,
    /// Linear RGB multiplied with the emissive map.
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    /// Fragments with base-map alpha below this are discarded.
    pub alpha_cutoff: f32,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            base_color: [1.0; 3],
            roughness: 0.5,
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            alpha_cutoff: 0.0,
        }
    }
}

/// Material parameters plus the bind group holding its maps.
pub struct Material {
    pub desc: MaterialDesc,
    bind_group: wgpu::BindGroup,
}

/// Mesh uploaded to vertex/index buffers, keeping its material groups.
pub struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    groups: Vec<Range<u32>>,
    pub bounds: Aabb,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            indices,
            groups: mesh.groups.clone(),
            bounds: mesh.bounds(),
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// One mesh instance; `materials[i]` shades group `i`.
pub struct MeshDraw<'a> {
    pub mesh: &'a GpuMesh,
    pub model: Mat4,
    pub materials: Vec<&'a Material>,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SceneUniform {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    dir_direction: [f32; 4],
    dir_color: [f32; 4],
    point_position: [f32; 4],
    point_color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DrawUniform {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    base_color: [f32; 4],
    emissive: [f32; 4],
    params: [f32; 4],
}

impl DrawUniform {
    fn new(model: Mat4, m: &MaterialDesc) -> Self {
        let [r, g, b] = m.base_color;
        let [er, eg, eb] = m.emissive;
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            base_color: [r, g, b, 1.0],
            emissive: [er, eg, eb, m.emissive_intensity],
            params: [m.roughness, m.alpha_cutoff, 0.0, 0.0],
        }
    }
}

fn vec4(v: [f32; 3], w: f32) -> [f32; 4] {
    [v[0], v[1], v[2], w]
}

pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    draws: DynamicUniforms,
    material_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white: GpuTexture,
    scratch: Vec<DrawUniform>,
}

impl MeshRenderer {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, color_format: wgpu::TextureFormat, depth_format: wgpu::TextureFormat) -> Self {
        let module = common::shader(device, "deck3d mesh shader", SHADER);

        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("deck3d mesh scene layout"),
            entries: &[common::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("deck3d mesh scene"),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("deck3d mesh scene"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let draws = DynamicUniforms::new(
            device,
            "deck3d mesh draws",
            std::mem::size_of::<DrawUniform>() as u64,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );

        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("deck3d material layout"),
            entries: &[
                common::texture_entry(0),
                common::texture_entry(1),
                common::sampler_entry(2),
            ],
        });

        let layout = common::pipeline_layout(
            device,
            "deck3d mesh pipeline layout",
            &[&scene_layout, draws.layout(), &material_layout],
        );

        const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x3, // position
            1 => Float32x3, // normal
            2 => Float32x2  // uv
        ];

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("deck3d mesh pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &ATTRS,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            scene_buffer,
            scene_bind_group,
            draws,
            material_layout,
            sampler: linear_sampler(device, "deck3d material sampler"),
            white: GpuTexture::solid(device, queue, "deck3d white", [255; 4]),
            scratch: Vec::new(),
        }
    }

    /// Binds `desc` with optional maps; a missing map samples as white.
    pub fn create_material(
        &self,
        device: &wgpu::Device,
        label: &str,
        desc: MaterialDesc,
        base_map: Option<&GpuTexture>,
        emissive_map: Option<&GpuTexture>,
    ) -> Material {
        let base = base_map.unwrap_or(&self.white);
        let emissive = emissive_map.unwrap_or(&self.white);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.material_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&base.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&emissive.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        Material { desc, bind_group }
    }

    /// Records `draws` into `pass`, which must target the HDR color and depth targets.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        pass: &mut wgpu::RenderPass<'_>,
        camera: &CameraMatrices,
        lights: &SceneLights,
        draws: &[MeshDraw<'_>],
    ) {
        if draws.is_empty() {
            return;
        }

        let scene = SceneUniform {
            view_proj: (camera.proj * camera.view).to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            ambient: vec4(lights.ambient, 0.0),
            dir_direction: lights.directional_dir.normalize_or_zero().extend(0.0).to_array(),
            dir_color: vec4(lights.directional, 0.0),
            point_position: lights.point_position.extend(1.0).to_array(),
            point_color: vec4(lights.point, 0.0),
        };
        ctx.queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&scene));

        self.scratch.clear();
        for draw in draws {
            debug_assert_eq!(draw.materials.len(), draw.mesh.group_count());
            self.scratch.extend(
                draw.mesh
                    .groups
                    .iter()
                    .zip(&draw.materials)
                    .map(|(_, m)| DrawUniform::new(draw.model, &m.desc)),
            );
        }
        self.draws.write(ctx.device, ctx.queue, &self.scratch);

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.scene_bind_group, &[]);

        let mut slot = 0;
        for draw in draws {
            pass.set_vertex_buffer(0, draw.mesh.vertices.slice(..));
            pass.set_index_buffer(draw.mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
            for (group, material) in draw.mesh.groups.iter().zip(&draw.materials) {
                pass.set_bind_group(1, self.draws.bind_group(), &[self.draws.offset(slot)]);
                pass.set_bind_group(2, &material.bind_group, &[]);
                pass.draw_indexed(group.clone(), 0, 0..1);
                slot += 1;
            }
        }
    }
}
