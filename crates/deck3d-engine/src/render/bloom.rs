//! Bloom and final composite.
//!
//! bright pass (HDR scene -> bloom A), separable blur (A -> B -> A, repeated),
//! then composite `scene + bloom * intensity` over the backdrop gradient into
//! the surface, ACES tone mapped.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::common;
use super::targets::{FrameTargets, HDR_FORMAT};
use super::texture::linear_sampler;
use super::{RenderCtx, RenderTarget};

const BLOOM_SHADER: &str = concat!(include_str!("shaders/fullscreen.wgsl"), include_str!("shaders/bloom.wgsl"));
const COMPOSITE_SHADER: &str = concat!(include_str!("shaders/fullscreen.wgsl"), include_str!("shaders/composite.wgsl"));

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BloomSettings {
    /// Luminance where bloom starts.
    pub threshold: f32,
    /// Width of the soft knee above `threshold`.
    pub smoothing: f32,
    /// Bloom contribution in the composite; `0` skips the bloom passes.
    pub intensity: f32,
    pub blur_iterations: u32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self { threshold: 0.1, smoothing: 0.9, intensity: 1.0, blur_iterations: 2 }
    }
}

/// Vertical background gradient in linear RGB, visible where no geometry drew.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Backdrop {
    pub top: [f32; 3],
    pub bottom: [f32; 3],
}

impl Backdrop {
    pub fn solid(color: [f32; 3]) -> Self {
        Self { top: color, bottom: color }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Params {
    values: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CompositeUniform {
    top: [f32; 4],
    bottom: [f32; 4],
}

struct BoundGroups {
    generation: u64,
    bright: wgpu::BindGroup,
    blur_h: wgpu::BindGroup,
    blur_v: wgpu::BindGroup,
    composite: wgpu::BindGroup,
}

pub struct BloomRenderer {
    bright: wgpu::RenderPipeline,
    blur: wgpu::RenderPipeline,
    composite: wgpu::RenderPipeline,
    bloom_layout: wgpu::BindGroupLayout,
    composite_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    bright_params: wgpu::Buffer,
    blur_h_params: wgpu::Buffer,
    blur_v_params: wgpu::Buffer,
    composite_params: wgpu::Buffer,
    encode_srgb: bool,
    groups: Option<BoundGroups>,
}

impl BloomRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let bloom_module = common::shader(device, "deck3d bloom shader", BLOOM_SHADER);
        let composite_module = common::shader(device, "deck3d composite shader", COMPOSITE_SHADER);

        let bloom_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("deck3d bloom layout"),
            entries: &[
                common::texture_entry(0),
                common::sampler_entry(1),
                common::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
            ],
        });
        let composite_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("deck3d composite layout"),
            entries: &[
                common::texture_entry(0),
                common::texture_entry(1),
                common::sampler_entry(2),
                common::uniform_entry(3, wgpu::ShaderStages::FRAGMENT),
            ],
        });

        let bloom_pl = common::pipeline_layout(device, "deck3d bloom pipeline layout", &[&bloom_layout]);
        let composite_pl = common::pipeline_layout(device, "deck3d composite pipeline layout", &[&composite_layout]);

        let bright = common::fullscreen_pipeline(device, "deck3d bloom bright", &bloom_module, "fs_bright", &bloom_pl, HDR_FORMAT, None);
        let blur = common::fullscreen_pipeline(device, "deck3d bloom blur", &bloom_module, "fs_blur", &bloom_pl, HDR_FORMAT, None);
        let composite = common::fullscreen_pipeline(
            device,
            "deck3d composite",
            &composite_module,
            "fs_composite",
            &composite_pl,
            surface_format,
            None,
        );

        let params = |label: &str, size: usize| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: &vec![0u8; size],
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
        };

        Self {
            bright,
            blur,
            composite,
            bloom_layout,
            composite_layout,
            sampler: linear_sampler(device, "deck3d post sampler"),
            bright_params: params("deck3d bloom bright params", std::mem::size_of::<Params>()),
            blur_h_params: params("deck3d bloom blur h params", std::mem::size_of::<Params>()),
            blur_v_params: params("deck3d bloom blur v params", std::mem::size_of::<Params>()),
            composite_params: params("deck3d composite params", std::mem::size_of::<CompositeUniform>()),
            encode_srgb: !surface_format.is_srgb(),
            groups: None,
        }
    }

    fn bloom_group(&self, device: &wgpu::Device, label: &str, source: &wgpu::TextureView, params: &wgpu::Buffer) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bloom_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(source) },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(&self.sampler) },
                wgpu::BindGroupEntry { binding: 2, resource: params.as_entire_binding() },
            ],
        })
    }

    fn bind(&mut self, device: &wgpu::Device, targets: &FrameTargets) {
        if self.groups.as_ref().is_some_and(|g| g.generation == targets.generation()) {
            return;
        }

        let [a, b] = &targets.bloom;
        let bright = self.bloom_group(device, "deck3d bloom bright", &targets.hdr.view, &self.bright_params);
        let blur_h = self.bloom_group(device, "deck3d bloom blur h", &a.view, &self.blur_h_params);
        let blur_v = self.bloom_group(device, "deck3d bloom blur v", &b.view, &self.blur_v_params);
        let composite = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("deck3d composite"),
            layout: &self.composite_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&targets.hdr.view) },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(&a.view) },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&self.sampler) },
                wgpu::BindGroupEntry { binding: 3, resource: self.composite_params.as_entire_binding() },
            ],
        });

        self.groups = Some(BoundGroups {
            generation: targets.generation(),
            bright,
            blur_h,
            blur_v,
            composite,
        });
    }

    /// Runs bloom (when enabled) and writes the final image into `target.color_view`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        targets: &FrameTargets,
        settings: &BloomSettings,
        backdrop: &Backdrop,
    ) {
        self.bind(ctx.device, targets);
        let Some(groups) = &self.groups else {
            return;
        };

        let [a, b] = &targets.bloom;
        let bloom_on = settings.intensity > 0.0;

        let write = |buffer: &wgpu::Buffer, values: [f32; 4]| {
            ctx.queue.write_buffer(buffer, 0, bytemuck::bytes_of(&Params { values }));
        };
        write(&self.bright_params, [settings.threshold, settings.smoothing, 0.0, 0.0]);
        write(&self.blur_h_params, [1.0 / a.width as f32, 0.0, 0.0, 0.0]);
        write(&self.blur_v_params, [0.0, 1.0 / a.height as f32, 0.0, 0.0]);

        let composite = CompositeUniform {
            top: [backdrop.top[0], backdrop.top[1], backdrop.top[2], settings.intensity.max(0.0)],
            bottom: [
                backdrop.bottom[0],
                backdrop.bottom[1],
                backdrop.bottom[2],
                if self.encode_srgb { 1.0 } else { 0.0 },
            ],
        };
        ctx.queue.write_buffer(&self.composite_params, 0, bytemuck::bytes_of(&composite));

        let clear = wgpu::LoadOp::Clear(wgpu::Color::BLACK);
        if bloom_on {
            {
                let mut pass = common::post_pass(target.encoder, "deck3d bloom bright", &a.view, clear);
                pass.set_pipeline(&self.bright);
                pass.set_bind_group(0, &groups.bright, &[]);
                pass.draw(0..3, 0..1);
            }
            for _ in 0..settings.blur_iterations.max(1) {
                {
                    let mut pass = common::post_pass(target.encoder, "deck3d bloom blur h", &b.view, clear);
                    pass.set_pipeline(&self.blur);
                    pass.set_bind_group(0, &groups.blur_h, &[]);
                    pass.draw(0..3, 0..1);
                }
                {
                    let mut pass = common::post_pass(target.encoder, "deck3d bloom blur v", &a.view, clear);
                    pass.set_pipeline(&self.blur);
                    pass.set_bind_group(0, &groups.blur_v, &[]);
                    pass.draw(0..3, 0..1);
                }
            }
        } else {
            // Composite still samples bloom A; keep it black.
            let _pass = common::post_pass(target.encoder, "deck3d bloom clear", &a.view, clear);
        }

        let mut pass = common::post_pass(target.encoder, "deck3d composite", target.color_view, clear);
        pass.set_pipeline(&self.composite);
        pass.set_bind_group(0, &groups.composite, &[]);
        pass.draw(0..3, 0..1);
    }
}
