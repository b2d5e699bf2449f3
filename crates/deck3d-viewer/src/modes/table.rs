//! Pile table: a face-down main pile on the left, the active card in the
//! middle and the discard pile on the right, with skull backs in theme colors.

use std::f32::consts::{FRAC_PI_4, PI};

use anyhow::{Context, Result};
use deck3d_cards::tween::rate_from_per_frame;
use deck3d_cards::{
    damp, quantize_bloom, table_deck, CardId, ColorSlot, Easing, Hsv, PileKind, Piles, Theme, ThemeColors, Tween,
};
use deck3d_engine::coords::Vec2;
use deck3d_engine::geometry::{card_planes, Aabb};
use deck3d_engine::input::Key;
use deck3d_engine::paint::Color;
use deck3d_engine::render::{
    Backdrop, BloomSettings, GpuMesh, GpuTexture, LineDraw, Material, MaterialDesc, MeshDraw, PointCloud,
};
use deck3d_engine::text::FontId;
use deck3d_ui::prelude::Element;
use glam::{Mat4, Vec3};

use super::panel::{instructions, overlay, theme_panel};
use super::{DeckMode, FrameInput, Gesture, Gfx, ModeOutcome, PanelAction, PanelActions};
use crate::config::ViewerMode;
use crate::render::SceneFrame;
use crate::textures::{table, CardArt};
use crate::world::{pick_nearest, screen_to_ray, LightRig, OrbitCamera, PerspectiveCamera, StarField, Transform, STAR_SPIN};

const CARD_WIDTH: f32 = 2.0;
const CARD_HEIGHT: f32 = 3.0;
const MAIN_X: f32 = -3.5;
const DISCARD_X: f32 = 3.5;
const PILE_STEP: f32 = 0.02;
const PILE_TILT: f32 = 0.1;

const ENTRY_SECONDS: f32 = 0.7;
const ENTRY_FROM: Vec3 = Vec3::new(0.0, -2.0, -5.0);
const ENTRY_TILT: Vec3 = Vec3::new(0.0, -FRAC_PI_4, -0.2);

/// Share of the remaining face rotation kept per 60 Hz frame.
const FACE_KEEP: f32 = 0.95;
const EYE_GLOW: f32 = 1.5;
/// Shortest gap between card-back repaints while a color is dragged.
const BACK_REFRESH_SECONDS: f32 = 0.1;
const ALPHA_CUTOFF: f32 = 0.5;

const BACKDROP_TOP: u32 = 0x0c0020;
const BACKDROP_BOTTOM: u32 = 0x1a0035;

const HELP: [&str; 3] = [
    "Click a card on the left pile to bring it forward",
    "Drag to orbit the center card and see both sides",
    "Used cards move to the right pile, skull side up",
];

/// Current face angle of a card and the pile it was last seen in.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Face {
    angle: f32,
    pile: PileKind,
}

/// Limits card-back repaints while a picker is dragged. A released picker
/// or a preset change repaints on the next frame.
#[derive(Debug, Default)]
struct BackRefresh {
    wait: f32,
    urgent: bool,
}

impl BackRefresh {
    fn tick(&mut self, dt: f32) {
        self.wait = (self.wait - dt).max(0.0);
    }

    fn urge(&mut self) {
        self.urgent = true;
    }

    /// Whether a back painted with stale colors may be repainted now.
    fn take(&mut self, stale: bool) -> bool {
        if !stale {
            self.urgent = false;
            return false;
        }
        if !self.urgent && self.wait > 0.0 {
            return false;
        }
        self.urgent = false;
        self.wait = BACK_REFRESH_SECONDS;
        true
    }
}

struct TableGpu {
    mesh: GpuMesh,
    fronts: Vec<Material>,
    back: Material,
    /// Colors `back` was painted with.
    back_colors: ThemeColors,
    stars: PointCloud,
    _textures: Vec<GpuTexture>,
    _back_maps: [GpuTexture; 2],
}

pub struct TableMode {
    piles: Piles,
    faces: Vec<Face>,
    themes: Vec<Theme>,
    selected: usize,
    theme: Theme,
    /// Picker state per slot, in `ColorSlot::ALL` order.
    picks: [Hsv; 3],
    back_refresh: BackRefresh,

    entry_position: Tween<Vec3>,
    entry_rotation: Tween<Vec3>,

    camera: OrbitCamera,
    lens: PerspectiveCamera,
    lights: LightRig,
    gesture: Gesture,
    card_bounds: Aabb,
    stars: StarField,

    gpu: Option<TableGpu>,
}

impl TableMode {
    /// `themes` must not be empty; `selected` is clamped into it.
    pub fn new(themes: Vec<Theme>, selected: usize) -> Self {
        let themes = if themes.is_empty() { Theme::presets() } else { themes };
        let selected = selected.min(themes.len() - 1);
        let piles = Piles::new(table_deck());
        let faces = vec![Face { angle: 0.0, pile: PileKind::Main }; piles.len()];

        let mut entry_position = Tween::new(ENTRY_FROM, Vec3::ZERO, ENTRY_SECONDS, Easing::Power3Out);
        let mut entry_rotation = Tween::new(ENTRY_TILT, Vec3::ZERO, ENTRY_SECONDS, Easing::Power2Out);
        entry_position.advance(ENTRY_SECONDS);
        entry_rotation.advance(ENTRY_SECONDS);

        let mut camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 7.0), Vec3::ZERO)
            .with_damping(0.05)
            .with_zoom(false)
            .with_polar_limits(PI / 2.2, PI / 1.8);
        camera.enabled = false;

        Self {
            piles,
            faces,
            picks: themes[selected].colors.to_hsv(),
            back_refresh: BackRefresh::default(),
            theme: themes[selected].clone(),
            themes,
            selected,
            entry_position,
            entry_rotation,
            camera,
            lens: PerspectiveCamera::new(50.0, 0.1, 1000.0),
            lights: LightRig::table(),
            gesture: Gesture::default(),
            card_bounds: card_planes(CARD_WIDTH, CARD_HEIGHT).bounds(),
            stars: StarField::default(),
            gpu: None,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    fn select_theme(&mut self, index: usize) {
        let Some(theme) = self.themes.get(index) else {
            return;
        };
        log::debug!("theme {} selected", theme.name);
        self.selected = index;
        self.theme = theme.clone();
        self.picks = self.theme.colors.to_hsv();
        self.back_refresh.urge();
    }

    fn edit_color(&mut self, slot: ColorSlot, hsv: Hsv) {
        self.picks[slot.index()] = hsv;
        self.theme.colors.set(slot, hsv.to_rgb());
    }

    /// World matrix of every card on the table.
    fn placements(&self) -> Vec<(CardId, PileKind, Mat4)> {
        let mut out = Vec::with_capacity(self.piles.len());
        let face = |id: CardId| self.faces.get(id.0 as usize).map_or(0.0, |f| f.angle);

        for (i, card) in self.piles.main().iter().enumerate() {
            let t = Transform::at(Vec3::new(MAIN_X, 0.0, -(i as f32) * PILE_STEP))
                .with_rotation(Vec3::new(0.0, face(card.id), -PILE_TILT));
            out.push((card.id, PileKind::Main, t.matrix()));
        }
        if let Some(card) = self.piles.active() {
            let group = Transform::at(self.entry_position.value()).with_rotation(self.entry_rotation.value());
            let t = Transform::IDENTITY.with_rotation(Vec3::new(0.0, face(card.id), 0.0));
            out.push((card.id, PileKind::Active, t.under(&group)));
        }
        for (i, card) in self.piles.discard().iter().enumerate() {
            let t = Transform::at(Vec3::new(DISCARD_X, 0.0, i as f32 * PILE_STEP))
                .with_rotation(Vec3::new(0.0, face(card.id), PILE_TILT));
            out.push((card.id, PileKind::Discard, t.matrix()));
        }
        out
    }

    /// Nearest card under `pointer`.
    fn pick(&self, pointer: Vec2, input: &FrameInput<'_>) -> Option<(CardId, PileKind)> {
        let m = self.camera.matrices(&self.lens);
        let ray = screen_to_ray(pointer, input.viewport, m.view, m.proj)?;
        let bounds = self.card_bounds;
        pick_nearest(&ray, self.placements().into_iter().map(|(id, kind, model)| ((id, kind), model, bounds)))
    }

    fn click(&mut self, id: CardId) {
        match self.piles.click(id) {
            Ok(change) => {
                log::debug!("card {} activated, {:?} discarded", change.activated.0, change.discarded.map(|c| c.0));
                self.entry_position = Tween::new(ENTRY_FROM, Vec3::ZERO, ENTRY_SECONDS, Easing::Power3Out);
                self.entry_rotation = Tween::new(ENTRY_TILT, Vec3::ZERO, ENTRY_SECONDS, Easing::Power2Out);
            }
            Err(e) => log::debug!("ignored click: {e}"),
        }
    }

    fn reset(&mut self) {
        log::debug!("piles reset");
        self.piles.reset();
    }

    fn animate_faces(&mut self, dt: f32) {
        let rate = rate_from_per_frame(FACE_KEEP, 60.0);
        for (i, face) in self.faces.iter_mut().enumerate() {
            let Some((pile, _)) = self.piles.locate(CardId(i as u32)) else {
                continue;
            };
            if pile != face.pile {
                face.pile = pile;
                face.angle = 0.0;
            }
            let target = if pile == PileKind::Main { PI } else { 0.0 };
            face.angle = damp(face.angle, target, rate, dt);
        }
    }

    fn build_gpu(&self, gfx: &Gfx<'_>) -> Result<TableGpu> {
        let art = CardArt { fonts: gfx.fonts, font: gfx.font, templates: gfx.templates };
        let mesh = GpuMesh::upload(gfx.device, "table card", &card_planes(CARD_WIDTH, CARD_HEIGHT));

        let mut textures = Vec::with_capacity(self.piles.len());
        let mut fronts = Vec::with_capacity(self.piles.len());
        for card in table_deck() {
            let label = format!("table front {}", card.label());
            let pixmap = table::front(&card, &art).with_context(|| format!("painting {label}"))?;
            let texture = GpuTexture::from_pixmap(gfx.device, gfx.queue, &label, &pixmap)
                .with_context(|| format!("uploading {label}"))?;
            fronts.push(gfx.meshes.create_material(gfx.device, &label, front_desc(), Some(&texture), None));
            textures.push(texture);
        }

        let (back, back_maps) = self.build_back(gfx, &art)?;
        let stars = gfx.lines.upload_points(gfx.device, "stars", &self.stars.generate());
        log::debug!("table resources ready: {} fronts", fronts.len());

        Ok(TableGpu {
            mesh,
            fronts,
            back,
            back_colors: self.theme.colors,
            stars,
            _textures: textures,
            _back_maps: back_maps,
        })
    }

    fn build_back(&self, gfx: &Gfx<'_>, art: &CardArt<'_>) -> Result<(Material, [GpuTexture; 2])> {
        let maps = table::back(&self.theme.colors, art).context("painting card back")?;
        let color = GpuTexture::from_pixmap(gfx.device, gfx.queue, "table back", &maps.color)
            .context("uploading card back")?;
        let emissive = GpuTexture::from_pixmap(gfx.device, gfx.queue, "table back emissive", &maps.emissive)
            .context("uploading card back glow")?;
        let desc = MaterialDesc {
            roughness: 0.4,
            emissive: [1.0; 3],
            emissive_intensity: EYE_GLOW,
            alpha_cutoff: ALPHA_CUTOFF,
            ..MaterialDesc::default()
        };
        let material = gfx.meshes.create_material(gfx.device, "table back", desc, Some(&color), Some(&emissive));
        Ok((material, [color, emissive]))
    }
}

fn front_desc() -> MaterialDesc {
    MaterialDesc { roughness: 0.5, alpha_cutoff: ALPHA_CUTOFF, ..MaterialDesc::default() }
}

impl DeckMode for TableMode {
    fn kind(&self) -> ViewerMode {
        ViewerMode::Table
    }

    fn update(&mut self, input: &FrameInput<'_>, dt: f32) -> ModeOutcome {
        let mut out = ModeOutcome::default();
        if input.key_pressed(Key::Escape) {
            out.exit = true;
        }
        if input.key_pressed(Key::R) {
            self.reset();
        }
        if let Some(d) = input.pressed_digit() {
            self.select_theme(d as usize - 1);
        }

        self.lens.set_aspect(input.viewport.aspect());
        self.camera.enabled = self.piles.active().is_some();

        let gesture = self.gesture.update(input);
        if let Some(delta) = gesture.drag {
            self.camera.rotate_by_pixels(delta.x, delta.y, input.viewport.height);
        }
        if let Some(at) = gesture.click {
            if let Some((id, PileKind::Main)) = self.pick(at, input) {
                self.click(id);
            }
        }
        if !self.gesture.is_dragging() {
            if let Some(pointer) = input.scene_pointer() {
                out.hover_clickable = matches!(self.pick(pointer, input), Some((_, PileKind::Main)));
            }
        }

        self.camera.update(dt);
        self.back_refresh.tick(dt);
        self.entry_position.advance(dt);
        self.entry_rotation.advance(dt);
        self.animate_faces(dt);
        out
    }

    fn overlay(&self, font: Option<FontId>, actions: &PanelActions) -> Element {
        let panel = theme_panel(&self.themes, self.selected, &self.theme, &self.picks, font, actions);
        overlay(Some(panel), instructions(&HELP, font))
    }

    fn apply(&mut self, action: PanelAction) {
        match action {
            PanelAction::SelectTheme(i) => self.select_theme(i),
            PanelAction::PreviewColor(slot, hsv) => self.edit_color(slot, hsv),
            PanelAction::SetColor(slot, hsv) => {
                self.edit_color(slot, hsv);
                self.back_refresh.urge();
            }
            PanelAction::SetBloom(v) => self.theme.bloom = quantize_bloom(v),
        }
    }

    fn prepare(&mut self, gfx: &Gfx<'_>) -> Result<()> {
        let Some(gpu) = &self.gpu else {
            self.gpu = Some(self.build_gpu(gfx)?);
            return Ok(());
        };
        let stale = gpu.back_colors != self.theme.colors;
        if !self.back_refresh.take(stale) {
            return Ok(());
        }

        let art = CardArt { fonts: gfx.fonts, font: gfx.font, templates: gfx.templates };
        let (back, maps) = self.build_back(gfx, &art)?;
        let colors = self.theme.colors;
        if let Some(gpu) = &mut self.gpu {
            gpu.back = back;
            gpu._back_maps = maps;
            gpu.back_colors = colors;
        }
        log::debug!("card back regenerated for theme {}", self.theme.name);
        Ok(())
    }

    fn scene(&self, elapsed: f32) -> Option<SceneFrame<'_>> {
        let gpu = self.gpu.as_ref()?;
        let meshes = self
            .placements()
            .into_iter()
            .filter_map(|(id, _, model)| {
                let front = gpu.fronts.get(id.0 as usize)?;
                Some(MeshDraw { mesh: &gpu.mesh, model, materials: vec![front, &gpu.back] })
            })
            .collect();

        Some(SceneFrame {
            camera: self.camera.matrices(&self.lens),
            lights: self.lights.scene_lights(),
            meshes,
            lines: vec![LineDraw::Points(&gpu.stars, Mat4::from_rotation_y(elapsed * STAR_SPIN))],
            bloom: BloomSettings { threshold: 0.1, smoothing: 0.9, intensity: self.theme.bloom, ..BloomSettings::default() },
            backdrop: Backdrop {
                top: Color::from_hex(BACKDROP_TOP).to_linear_rgb(),
                bottom: Color::from_hex(BACKDROP_BOTTOM).to_linear_rgb(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::gesture::test_input::InputSim;
    use deck3d_cards::Rgb;
    use deck3d_engine::coords::{Rect, Viewport};
    use deck3d_ui::prelude::{UiInput, UiScene};

    const VP: Viewport = Viewport::new(800.0, 600.0);
    const DT: f32 = 1.0 / 60.0;

    fn screen_of(mode: &TableMode, world: Vec3) -> (f32, f32) {
        let m = mode.camera.matrices(&mode.lens);
        let clip = m.proj * m.view * world.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        ((ndc.x + 1.0) * 0.5 * VP.width, (1.0 - ndc.y) * 0.5 * VP.height)
    }

    fn click_at(mode: &mut TableMode, sim: &mut InputSim, (x, y): (f32, f32)) -> ModeOutcome {
        sim.next_frame();
        sim.move_to(x, y);
        sim.press();
        sim.release();
        mode.update(&sim.input(VP), DT)
    }

    fn settle(mode: &mut TableMode, sim: &mut InputSim, seconds: f32) {
        for _ in 0..(seconds / DT) as usize {
            sim.next_frame();
            mode.update(&sim.input(VP), DT);
        }
    }

    fn new_mode() -> (TableMode, InputSim) {
        let mut mode = TableMode::new(Theme::presets(), 0);
        let mut sim = InputSim::default();
        mode.update(&sim.input(VP), DT);
        sim.next_frame();
        (mode, sim)
    }

    #[test]
    fn starts_with_everything_in_main_and_a_locked_camera() {
        let (mode, _) = new_mode();
        assert_eq!(mode.piles().main().len(), 10);
        assert!(mode.piles().active().is_none());
        assert!(!mode.camera.enabled);
        assert_eq!(mode.theme().name, "classic");
    }

    #[test]
    fn clicking_the_main_pile_activates_its_top_card() {
        let (mut mode, mut sim) = new_mode();
        let main = screen_of(&mode, Vec3::new(MAIN_X, 0.0, 0.0));
        click_at(&mut mode, &mut sim, main);

        assert_eq!(mode.piles().active().map(|c| c.id), Some(CardId(0)));
        assert_eq!(mode.piles().main().len(), 9);
        assert!(!mode.entry_position.is_finished());

        let active = mode.placements().into_iter().find(|(_, k, _)| *k == PileKind::Active).unwrap();
        assert!(active.2.w_axis.z < -4.0, "entry starts behind the table");

        mode.update(&sim.input(VP), DT);
        assert!(mode.camera.enabled);

        settle(&mut mode, &mut sim, 1.0);
        let active = mode.placements().into_iter().find(|(_, k, _)| *k == PileKind::Active).unwrap();
        assert!(active.2.w_axis.truncate().length() < 1e-4);
    }

    #[test]
    fn second_click_discards_the_active_card() {
        let (mut mode, mut sim) = new_mode();
        let main = screen_of(&mode, Vec3::new(MAIN_X, 0.0, 0.0));
        click_at(&mut mode, &mut sim, main);
        settle(&mut mode, &mut sim, 1.0);
        click_at(&mut mode, &mut sim, main);

        assert_eq!(mode.piles().active().map(|c| c.id), Some(CardId(1)));
        assert_eq!(mode.piles().discard().iter().map(|c| c.id).collect::<Vec<_>>(), vec![CardId(0)]);
    }

    #[test]
    fn empty_space_and_active_card_do_not_react() {
        let (mut mode, mut sim) = new_mode();
        click_at(&mut mode, &mut sim, (400.0, 20.0));
        assert!(mode.piles().active().is_none());

        let main = screen_of(&mode, Vec3::new(MAIN_X, 0.0, 0.0));
        click_at(&mut mode, &mut sim, main);
        settle(&mut mode, &mut sim, 1.0);
        let center = screen_of(&mode, Vec3::ZERO);
        click_at(&mut mode, &mut sim, center);
        assert_eq!(mode.piles().active().map(|c| c.id), Some(CardId(0)));
        assert!(mode.piles().discard().is_empty());
    }

    #[test]
    fn hover_reports_clickable_main_cards_only() {
        let (mut mode, mut sim) = new_mode();
        sim.move_to(screen_of(&mode, Vec3::new(MAIN_X, 0.0, 0.0)).0, 300.0);
        assert!(mode.update(&sim.input(VP), DT).hover_clickable);

        sim.next_frame();
        sim.move_to(400.0, 20.0);
        assert!(!mode.update(&sim.input(VP), DT).hover_clickable);

        sim.next_frame();
        sim.ui_captured = true;
        sim.move_to(screen_of(&mode, Vec3::new(MAIN_X, 0.0, 0.0)).0, 300.0);
        assert!(!mode.update(&sim.input(VP), DT).hover_clickable);
    }

    #[test]
    fn faces_turn_down_in_main_and_restart_when_moved() {
        let (mut mode, mut sim) = new_mode();
        settle(&mut mode, &mut sim, 3.0);
        assert!((mode.faces[0].angle - PI).abs() < 0.01);

        let main = screen_of(&mode, Vec3::new(MAIN_X, 0.0, 0.0));
        click_at(&mut mode, &mut sim, main);
        assert_eq!(mode.faces[0].pile, PileKind::Active);
        assert!(mode.faces[0].angle.abs() < 1e-6);
    }

    #[test]
    fn reset_key_and_digit_keys() {
        let (mut mode, mut sim) = new_mode();
        let main = screen_of(&mode, Vec3::new(MAIN_X, 0.0, 0.0));
        click_at(&mut mode, &mut sim, main);

        sim.next_frame();
        sim.key(Key::R);
        sim.key(Key::Digit2);
        mode.update(&sim.input(VP), DT);
        assert!(mode.piles().active().is_none());
        assert_eq!(mode.theme().name, "neon");

        sim.next_frame();
        sim.key(Key::Digit9);
        mode.update(&sim.input(VP), DT);
        assert_eq!(mode.theme().name, "neon");

        sim.next_frame();
        sim.key(Key::Escape);
        assert!(mode.update(&sim.input(VP), DT).exit);
    }

    #[test]
    fn panel_edits_change_the_current_theme_only() {
        let (mut mode, _) = new_mode();
        mode.apply(PanelAction::SetColor(ColorSlot::Eye, Hsv::from(Rgb::new(0, 255, 0))));
        mode.apply(PanelAction::SetBloom(1.234));
        assert_eq!(mode.theme().colors.eye, Rgb::new(0, 255, 0));
        assert!((mode.theme().bloom - 1.2).abs() < 1e-6);
        assert_eq!(mode.themes[0], Theme::classic());

        mode.apply(PanelAction::SelectTheme(0));
        assert_eq!(*mode.theme(), Theme::classic());
        assert_eq!(mode.picks, Theme::classic().colors.to_hsv());
        mode.apply(PanelAction::SelectTheme(42));
        assert_eq!(mode.selected, 0);
    }

    /// Press, move and release inside the overlay, one UI frame each, the
    /// way the app feeds panel actions back into the mode.
    fn drag_in_panel(mode: &mut TableMode, ui: &mut UiScene, from: Vec2, to: Vec2) {
        let actions = PanelActions::default();
        let inputs = [
            UiInput { mouse_pos: Some(from), mouse_down: true, mouse_pressed: true, ..UiInput::default() },
            UiInput { mouse_pos: Some(to), mouse_down: true, ..UiInput::default() },
            UiInput { mouse_pos: Some(to), mouse_released: true, ..UiInput::default() },
        ];
        for input in inputs {
            let root = mode.overlay(None, &actions);
            ui.frame(root, Rect::new(0.0, 0.0, VP.width, VP.height), &input);
            for action in actions.drain() {
                mode.apply(action);
            }
        }
    }

    #[test]
    fn base_color_survives_a_drag_through_black() {
        let mut mode = TableMode::new(Theme::presets(), 1);
        let mut ui = UiScene::new();
        let neon = Hsv::from(Rgb::new(0xc5, 0x51, 0xf5));
        assert_eq!(mode.theme().colors.base, Rgb::new(0xc5, 0x51, 0xf5));

        // Base picker's value bar spans y 280..294 from x 558.
        let bar = Vec2::new(600.0, 287.0);
        drag_in_panel(&mut mode, &mut ui, bar, Vec2::new(520.0, 287.0));
        assert_eq!(mode.theme().colors.base, Rgb::BLACK);

        drag_in_panel(&mut mode, &mut ui, bar, Vec2::new(790.0, 287.0));
        let base = mode.picks[ColorSlot::Base.index()];
        assert_eq!((base.hue, base.sat), (neon.hue, neon.sat));
        assert_eq!(mode.theme().colors.base, Rgb::from_hsv(neon.hue, neon.sat, 1.0));
        assert_ne!(mode.theme().colors.base, Rgb::WHITE);
        assert_eq!(mode.theme().colors.eye, Theme::presets()[1].colors.eye);
    }

    #[test]
    fn back_repaints_are_throttled_until_release() {
        let mut refresh = BackRefresh::default();
        assert!(!refresh.take(false));
        assert!(refresh.take(true));

        // Dragging: stale every frame, repainted once per interval.
        assert!(!refresh.take(true));
        refresh.tick(BACK_REFRESH_SECONDS * 0.5);
        assert!(!refresh.take(true));
        refresh.tick(BACK_REFRESH_SECONDS * 0.5);
        assert!(refresh.take(true));

        // Release: repaint right away.
        refresh.urge();
        assert!(refresh.take(true));
        assert!(!refresh.take(false));
        assert!(!refresh.urgent);
    }

    #[test]
    fn picker_release_and_presets_request_a_repaint() {
        let (mut mode, _) = new_mode();
        mode.apply(PanelAction::PreviewColor(ColorSlot::Base, Hsv::new(10.0, 1.0, 1.0)));
        assert!(!mode.back_refresh.urgent);
        mode.apply(PanelAction::SetColor(ColorSlot::Base, Hsv::new(10.0, 1.0, 1.0)));
        assert!(mode.back_refresh.urgent);

        mode.back_refresh = BackRefresh::default();
        mode.apply(PanelAction::SelectTheme(2));
        assert!(mode.back_refresh.urgent);
    }

    #[test]
    fn no_scene_before_prepare() {
        let (mode, _) = new_mode();
        assert!(mode.scene(0.0).is_none());
    }
}
