//! Blends the CPU-rasterized 2D layer over the surface.

use log::warn;

use super::common;
use super::ctx::{RenderCtx, RenderTarget};
use super::raster;
use super::texture::{self, GpuTexture};
use crate::scene::{DrawItem, DrawList};
use crate::text::FontSystem;

const OVERLAY_WGSL: &str = concat!(include_str!("shaders/fullscreen.wgsl"), include_str!("shaders/overlay.wgsl"));

struct OverlayTexture {
    texture: GpuTexture,
    bind_group: wgpu::BindGroup,
}

/// Rasterizes a [`DrawList`] with tiny-skia and draws it as one fullscreen
/// premultiplied quad.
///
/// Rasterization only reruns when the list contents or the surface size change.
pub struct OverlayRenderer {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    format: wgpu::TextureFormat,
    current: Option<OverlayTexture>,
    last_items: Vec<DrawItem>,
    last_scale: f32,
}

impl OverlayRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let module = common::shader(device, "deck3d overlay shader", OVERLAY_WGSL);
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("deck3d overlay layout"),
            entries: &[common::texture_entry(0), common::sampler_entry(1)],
        });
        let pipeline_layout = common::pipeline_layout(device, "deck3d overlay pipeline layout", &[&layout]);
        let pipeline = common::fullscreen_pipeline(
            device,
            "deck3d overlay pipeline",
            &module,
            "fs_overlay",
            &pipeline_layout,
            surface_format,
            Some(common::premul_alpha_blend()),
        );

        // Pixmap bytes are sRGB-encoded; let the hardware decode them when the
        // surface blends in linear space.
        let format = if surface_format.is_srgb() {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };

        Self {
            pipeline,
            layout,
            sampler: texture::linear_sampler(device, "deck3d overlay sampler"),
            format,
            current: None,
            last_items: Vec::new(),
            last_scale: 0.0,
        }
    }

    fn is_stale(&self, list: &DrawList, size: (u32, u32), scale: f32) -> bool {
        match &self.current {
            None => true,
            Some(c) => {
                (c.texture.width, c.texture.height) != size
                    || self.last_scale != scale
                    || self.last_items.as_slice() != list.items()
            }
        }
    }

    fn upload(&mut self, ctx: &RenderCtx<'_>, fonts: &FontSystem, list: &DrawList) {
        let (w, h) = ctx.physical_size();
        let scale = ctx.viewport.scale_factor;

        let Some(pixmap) = raster::rasterize(list, fonts, w, h, scale) else {
            warn!("overlay rasterization failed at {w}x{h}");
            self.current = None;
            return;
        };

        let reuse = self
            .current
            .as_ref()
            .is_some_and(|c| c.texture.width == pixmap.width() && c.texture.height == pixmap.height());
        if !reuse {
            let texture = GpuTexture::dynamic(ctx.device, "deck3d overlay", pixmap.width(), pixmap.height(), self.format);
            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("deck3d overlay bind group"),
                layout: &self.layout,
                entries: &[
                    wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&texture.view) },
                    wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(&self.sampler) },
                ],
            });
            self.current = Some(OverlayTexture { texture, bind_group });
        }

        if let Some(c) = &self.current {
            if let Err(e) = c.texture.write_rgba8(ctx.queue, pixmap.data()) {
                warn!("overlay upload failed: {e}");
            }
        }

        self.last_items.clear();
        self.last_items.extend_from_slice(list.items());
        self.last_scale = scale;
    }

    /// Draws `list` over whatever the target already holds.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, fonts: &FontSystem, list: &DrawList) {
        if list.is_empty() {
            return;
        }
        let (w, h) = ctx.physical_size();
        if w == 0 || h == 0 {
            return;
        }
        if self.is_stale(list, (w, h), ctx.viewport.scale_factor) {
            self.upload(ctx, fonts, list);
        }
        let Some(current) = &self.current else {
            return;
        };

        let mut pass = common::post_pass(target.encoder, "deck3d overlay pass", target.color_view, wgpu::LoadOp::Load);
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &current.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}
