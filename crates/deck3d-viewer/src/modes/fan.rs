//! Six poker-size cards fanned over a floor grid. Click to flip, hover to lift.

use std::f32::consts::PI;

use anyhow::{Context, Result};
use deck3d_cards::{damp, fan_deck, Card};
use deck3d_engine::coords::Vec2;
use deck3d_engine::geometry::{card_box, Aabb};
use deck3d_engine::input::Key;
use deck3d_engine::paint::Color;
use deck3d_engine::render::{
    Backdrop, BloomSettings, GpuMesh, GpuTexture, LineBatch, LineDraw, Material, MaterialDesc, MeshDraw,
};
use deck3d_engine::text::FontId;
use deck3d_ui::prelude::Element;
use glam::{Mat4, Vec3};

use super::panel::{instructions, overlay};
use super::{DeckMode, FrameInput, Gesture, Gfx, ModeOutcome, PanelActions};
use crate::config::ViewerMode;
use crate::render::SceneFrame;
use crate::textures::{fan, CardArt};
use crate::world::{pick_nearest, screen_to_ray, FloorGrid, LightRig, OrbitCamera, PerspectiveCamera, Transform};

const CARD_WIDTH: f32 = 2.5;
const CARD_HEIGHT: f32 = 3.5;
const CARD_DEPTH: f32 = 0.04;

const FAN_STEP: f32 = 1.6;
const FAN_SPREAD: f32 = 0.32;
const LIFT: f32 = 0.02;
const BOW: f32 = 0.15;

const HOVER_SCALE: f32 = 1.06;
const RATE: f32 = 10.0;
const MAX_DT: f32 = 0.033;
const BACKGROUND: u32 = 0x101014;
const SIDE: u32 = 0xbdbdbd;

const HELP: [&str; 3] = ["Click a card to flip it", "Drag to orbit, scroll to zoom", "R turns every card face up"];

/// Per-card animation state.
#[derive(Debug, Copy, Clone, PartialEq)]
struct FanCard {
    card: Card,
    rest: Transform,
    flipped: bool,
    /// Current rotation about Y.
    turn: f32,
    scale: f32,
}

struct FanGpu {
    mesh: GpuMesh,
    sides: Material,
    fronts: Vec<Material>,
    back: Material,
    grid: LineBatch,
    _textures: Vec<GpuTexture>,
}

pub struct FanMode {
    cards: Vec<FanCard>,
    hovered: Option<usize>,
    camera: OrbitCamera,
    lens: PerspectiveCamera,
    lights: LightRig,
    gesture: Gesture,
    card_bounds: Aabb,
    grid: FloorGrid,
    gpu: Option<FanGpu>,
}

/// Rest pose of card `i` of `n`: spread along X, fanned about Z, ends bowed toward the camera.
fn fan_pose(i: usize, n: usize) -> Transform {
    let t = i as f32 - (n as f32 - 1.0) / 2.0;
    Transform::at(Vec3::new(t * FAN_STEP, LIFT * i as f32, t.abs() * BOW))
        .with_rotation(Vec3::new(0.0, 0.0, t * FAN_SPREAD * 0.25))
}

impl FanMode {
    pub fn new() -> Self {
        let deck = fan_deck();
        let n = deck.len();
        let cards = deck
            .into_iter()
            .enumerate()
            .map(|(i, card)| FanCard { card, rest: fan_pose(i, n), flipped: false, turn: 0.0, scale: 1.0 })
            .collect();

        Self {
            cards,
            hovered: None,
            camera: OrbitCamera::new(Vec3::new(0.0, 3.2, 8.0), Vec3::ZERO).with_damping(0.05),
            lens: PerspectiveCamera::new(60.0, 0.1, 100.0),
            lights: LightRig::fan(),
            gesture: Gesture::default(),
            card_bounds: card_box(CARD_WIDTH, CARD_HEIGHT, CARD_DEPTH).bounds(),
            grid: FloorGrid::default(),
            gpu: None,
        }
    }

    fn model(card: &FanCard) -> Mat4 {
        let mut t = card.rest;
        t.rotation.y = card.turn;
        t.scale = card.scale;
        t.matrix()
    }

    fn pick(&self, pointer: Vec2, input: &FrameInput<'_>) -> Option<usize> {
        let m = self.camera.matrices(&self.lens);
        let ray = screen_to_ray(pointer, input.viewport, m.view, m.proj)?;
        let bounds = self.card_bounds;
        pick_nearest(&ray, self.cards.iter().enumerate().map(|(i, c)| (i, Self::model(c), bounds)))
    }

    fn unflip_all(&mut self) {
        log::debug!("all fan cards face up");
        for card in &mut self.cards {
            card.flipped = false;
        }
    }

    fn build_gpu(&self, gfx: &Gfx<'_>) -> Result<FanGpu> {
        let art = CardArt { fonts: gfx.fonts, font: gfx.font, templates: gfx.templates };
        let mesh = GpuMesh::upload(gfx.device, "fan card", &card_box(CARD_WIDTH, CARD_HEIGHT, CARD_DEPTH));
        let face = MaterialDesc { roughness: 0.35, ..MaterialDesc::default() };

        let side_desc = MaterialDesc {
            base_color: Color::from_hex(SIDE).to_linear_rgb(),
            roughness: 0.7,
            ..MaterialDesc::default()
        };
        let sides = gfx.meshes.create_material(gfx.device, "fan sides", side_desc, None, None);

        let mut textures = Vec::with_capacity(self.cards.len() + 1);
        let mut fronts = Vec::with_capacity(self.cards.len());
        for c in &self.cards {
            let label = format!("fan front {}", c.card.label());
            let pixmap = fan::front(&c.card, &art).with_context(|| format!("painting {label}"))?;
            let texture = GpuTexture::from_pixmap(gfx.device, gfx.queue, &label, &pixmap)
                .with_context(|| format!("uploading {label}"))?;
            fronts.push(gfx.meshes.create_material(gfx.device, &label, face, Some(&texture), None));
            textures.push(texture);
        }

        let pixmap = fan::back().context("painting fan back")?;
        let texture = GpuTexture::from_pixmap(gfx.device, gfx.queue, "fan back", &pixmap).context("uploading fan back")?;
        let back = gfx.meshes.create_material(gfx.device, "fan back", face, Some(&texture), None);
        textures.push(texture);

        let grid = gfx.lines.upload_lines(gfx.device, "floor grid", &self.grid.generate());
        log::debug!("fan resources ready: {} cards", fronts.len());
        Ok(FanGpu { mesh, sides, fronts, back, grid, _textures: textures })
    }
}

impl Default for FanMode {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckMode for FanMode {
    fn kind(&self) -> ViewerMode {
        ViewerMode::Fan
    }

    fn update(&mut self, input: &FrameInput<'_>, dt: f32) -> ModeOutcome {
        let dt = dt.min(MAX_DT);
        let mut out = ModeOutcome { exit: input.key_pressed(Key::Escape), ..ModeOutcome::default() };
        if input.key_pressed(Key::R) {
            self.unflip_all();
        }

        self.lens.set_aspect(input.viewport.aspect());

        let gesture = self.gesture.update(input);
        if let Some(delta) = gesture.drag {
            self.camera.rotate_by_pixels(delta.x, delta.y, input.viewport.height);
        }
        self.camera.dolly(input.scene_scroll());

        if let Some(at) = gesture.click {
            if let Some(i) = self.pick(at, input) {
                let card = &mut self.cards[i];
                card.flipped = !card.flipped;
                log::debug!("{} flipped: {}", card.card.label(), card.flipped);
            }
        }

        self.hovered = match input.scene_pointer() {
            Some(p) if !self.gesture.is_dragging() => self.pick(p, input),
            _ => None,
        };
        out.hover_clickable = self.hovered.is_some();

        self.camera.update(dt);
        for (i, card) in self.cards.iter_mut().enumerate() {
            let turn = if card.flipped { PI } else { 0.0 };
            let scale = if self.hovered == Some(i) { HOVER_SCALE } else { 1.0 };
            card.turn = damp(card.turn, turn, RATE, dt);
            card.scale = damp(card.scale, scale, RATE, dt);
        }
        out
    }

    fn overlay(&self, font: Option<FontId>, _actions: &PanelActions) -> Element {
        overlay(None, instructions(&HELP, font))
    }

    fn prepare(&mut self, gfx: &Gfx<'_>) -> Result<()> {
        if self.gpu.is_none() {
            self.gpu = Some(self.build_gpu(gfx)?);
        }
        Ok(())
    }

    fn scene(&self, _elapsed: f32) -> Option<SceneFrame<'_>> {
        let gpu = self.gpu.as_ref()?;
        let meshes = self
            .cards
            .iter()
            .zip(&gpu.fronts)
            .map(|(card, front)| MeshDraw {
                mesh: &gpu.mesh,
                model: Self::model(card),
                materials: vec![&gpu.sides, front, &gpu.back],
            })
            .collect();

        Some(SceneFrame {
            camera: self.camera.matrices(&self.lens),
            lights: self.lights.scene_lights(),
            meshes,
            lines: vec![LineDraw::Lines(&gpu.grid, Mat4::IDENTITY)],
            bloom: BloomSettings { intensity: 0.0, ..BloomSettings::default() },
            backdrop: Backdrop::solid(Color::from_hex(BACKGROUND).to_linear_rgb()),
        })
    }
}
