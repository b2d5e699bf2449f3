//! Per-frame glue between the engine runtime, the overlay UI and the active mode.

use deck3d_engine::core::{App, AppControl, FrameCtx};
use deck3d_engine::coords::Rect;
use deck3d_engine::paint::Color;
use deck3d_engine::text::{FontId, FontSystem};
use deck3d_engine::window::CursorIcon;
use deck3d_ui::prelude::{UiInput, UiScene};

use crate::config::{Settings, ViewerMode};
use crate::modes::{DeckMode, FanMode, FrameInput, Gfx, PanelActions, TableMode};
use crate::render::SceneRenderer;
use crate::textures::Templates;

/// Longest step fed to animations; a stall resumes instead of jumping.
const MAX_FRAME_DT: f32 = 0.1;

pub struct ViewerApp {
    ui: UiScene,
    font: Option<FontId>,
    templates: Templates,
    mode: Box<dyn DeckMode>,
    actions: PanelActions,
    /// Created on the first frame, once a device exists.
    renderer: Option<SceneRenderer>,
}

impl ViewerApp {
    pub fn new(settings: &Settings, fonts: FontSystem, font: Option<FontId>, templates: Templates) -> Self {
        let mode: Box<dyn DeckMode> = match settings.mode {
            ViewerMode::Table => Box::new(TableMode::new(settings.themes.clone(), settings.initial_theme)),
            ViewerMode::Fan => Box::new(FanMode::new()),
        };
        log::info!("opening {:?} mode", mode.kind());

        Self {
            ui: UiScene::with_fonts(fonts),
            font,
            templates,
            mode,
            actions: PanelActions::default(),
            renderer: None,
        }
    }
}

impl App for ViewerApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();

        // ── Overlay ───────────────────────────────────────────────────────
        let root = self.mode.overlay(self.font, &self.actions);
        let screen = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        let ui = self.ui.frame(root, screen, &UiInput::from_engine(ctx.input, ctx.input_frame));
        for action in self.actions.drain() {
            self.mode.apply(action);
        }

        // ── Scene input ───────────────────────────────────────────────────
        let input = FrameInput {
            viewport,
            state: ctx.input,
            frame: ctx.input_frame,
            ui_captured: ui.pointer_captured,
        };
        let outcome = self.mode.update(&input, ctx.time.dt_capped(MAX_FRAME_DT));
        if outcome.exit {
            log::info!("exit requested");
            return AppControl::Exit;
        }
        ctx.window.set_cursor(if outcome.hover_clickable { CursorIcon::Pointer } else { CursorIcon::Default });

        // ── GPU resources ─────────────────────────────────────────────────
        let renderer = self
            .renderer
            .get_or_insert_with(|| SceneRenderer::new(ctx.gpu.device(), ctx.gpu.queue(), ctx.gpu.surface_format()));
        let gfx = Gfx {
            device: ctx.gpu.device(),
            queue: ctx.gpu.queue(),
            meshes: &renderer.meshes,
            lines: &renderer.lines,
            fonts: &self.ui.font_system,
            font: self.font,
            templates: &self.templates,
        };
        if let Err(e) = self.mode.prepare(&gfx) {
            log::error!("failed to prepare scene: {e:#}");
            return AppControl::Exit;
        }

        // ── Render ────────────────────────────────────────────────────────
        let elapsed = ctx.time.elapsed;
        let scene = self.mode.scene(elapsed);
        let fonts = &self.ui.font_system;
        let overlay = &self.ui.draw_list;
        ctx.render(Color::BLACK, |rctx, target| {
            renderer.draw(rctx, target, scene.as_ref(), elapsed, fonts, overlay);
        })
    }
}
