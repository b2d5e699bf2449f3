//! Frame assembly: the 3D scene into float targets, bloom and composite into
//! the surface, then the UI overlay.

use deck3d_engine::render::{
    Backdrop, BloomRenderer, BloomSettings, CameraMatrices, FrameTargets, LineDraw, LineRenderer, MeshDraw,
    MeshRenderer, OverlayRenderer, RenderCtx, RenderTarget, SceneLights, DEPTH_FORMAT, HDR_FORMAT,
};
use deck3d_engine::scene::DrawList;
use deck3d_engine::text::FontSystem;

/// Height of the blur targets; bloom spread is independent of window size.
pub const BLOOM_BLUR_HEIGHT: u32 = 300;

/// Everything a mode wants drawn this frame.
pub struct SceneFrame<'a> {
    pub camera: CameraMatrices,
    pub lights: SceneLights,
    pub meshes: Vec<MeshDraw<'a>>,
    pub lines: Vec<LineDraw<'a>>,
    pub bloom: BloomSettings,
    pub backdrop: Backdrop,
}

pub struct SceneRenderer {
    pub meshes: MeshRenderer,
    pub lines: LineRenderer,
    bloom: BloomRenderer,
    overlay: OverlayRenderer,
    targets: Option<FrameTargets>,
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, surface_format: wgpu::TextureFormat) -> Self {
        log::debug!("creating scene renderers for {surface_format:?}");
        Self {
            meshes: MeshRenderer::new(device, queue, HDR_FORMAT, DEPTH_FORMAT),
            lines: LineRenderer::new(device, HDR_FORMAT, DEPTH_FORMAT),
            bloom: BloomRenderer::new(device, surface_format),
            overlay: OverlayRenderer::new(device, surface_format),
            targets: None,
        }
    }

    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: Option<&SceneFrame<'_>>,
        time: f32,
        fonts: &FontSystem,
        overlay: &DrawList,
    ) {
        if let Some(scene) = scene {
            self.draw_scene(ctx, target, scene, time);
        }
        self.overlay.render(ctx, target, fonts, overlay);
    }

    fn draw_scene(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, scene: &SceneFrame<'_>, time: f32) {
        let (w, h) = ctx.physical_size();
        let targets = self
            .targets
            .get_or_insert_with(|| FrameTargets::new(ctx.device, w.max(1), h.max(1), BLOOM_BLUR_HEIGHT));
        targets.ensure(ctx.device, w, h);

        {
            let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("deck3d scene"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &targets.hdr.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &targets.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            self.meshes.render(ctx, &mut pass, &scene.camera, &scene.lights, &scene.meshes);
            self.lines.render(ctx, &mut pass, &scene.camera, time, &scene.lines);
        }

        self.bloom.render(ctx, target, targets, &scene.bloom, &scene.backdrop);
    }
}
