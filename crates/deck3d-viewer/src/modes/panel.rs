//! The customization panel and the instruction footer.

use std::cell::RefCell;
use std::rc::Rc;

use deck3d_cards::theme::{BLOOM_MAX, BLOOM_MIN, BLOOM_STEP};
use deck3d_cards::{ColorSlot, Hsv, Theme};
use deck3d_ui::prelude::*;

const PANEL_WIDTH: f32 = 288.0;
const MARGIN: f32 = 16.0;
const INDIGO: u32 = 0x4f46e5;
const GRAY: u32 = 0xe5e7eb;
const INK: u32 = 0x1f2937;

/// A change requested from the overlay, applied by the mode on the next frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    SelectTheme(usize),
    /// A color picker is being dragged.
    PreviewColor(ColorSlot, Hsv),
    /// A color picker was released.
    SetColor(ColorSlot, Hsv),
    SetBloom(f32),
}

/// Queue shared between widget callbacks and the app.
#[derive(Debug, Clone, Default)]
pub struct PanelActions(Rc<RefCell<Vec<PanelAction>>>);

impl PanelActions {
    pub fn push(&self, action: PanelAction) {
        self.0.borrow_mut().push(action);
    }

    pub fn drain(&self) -> Vec<PanelAction> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Preset buttons, three color pickers and the bloom slider for `current`.
///
/// `picks` is the picker state per slot in [`ColorSlot::ALL`] order.
pub fn theme_panel(
    themes: &[Theme],
    selected: usize,
    current: &Theme,
    picks: &[Hsv; 3],
    font: Option<FontId>,
    actions: &PanelActions,
) -> Element {
    let ink = Color::from_hex(INK);

    let presets = themes.iter().enumerate().map(|(i, theme)| {
        let is_selected = i == selected;
        let text = if is_selected { Color::WHITE } else { ink };
        let queue = actions.clone();
        Button::new(Text::new(theme.name.to_uppercase(), font, 14.0, text))
            .selected(is_selected)
            .background(Color::from_hex(GRAY))
            .hover_background(Color::from_hex(0xd1d5db))
            .press_background(Color::from_hex(0x9ca3af))
            .selected_background(Color::from_hex(INDIGO))
            .corner_radius(8.0)
            .padding(Edges::symmetric(8.0, 12.0))
            .min_height(34.0)
            .on_click(move || queue.push(PanelAction::SelectTheme(i)))
    });

    let pickers = ColorSlot::ALL.map(|slot| {
        let (on_drag, on_change) = (actions.clone(), actions.clone());
        Column::new()
            .spacing(6.0)
            .child(Text::new(slot.label(), font, 14.0, ink))
            .child(
                ColorPicker::new(picks[slot.index()])
                    .on_drag(move |c| on_drag.push(PanelAction::PreviewColor(slot, c)))
                    .on_change(move |c| on_change.push(PanelAction::SetColor(slot, c))),
            )
    });

    let (on_drag, on_change) = (actions.clone(), actions.clone());
    let bloom = Column::new()
        .spacing(6.0)
        .child(Text::new(format!("Bloom: {:.1}", current.bloom), font, 14.0, ink))
        .child(
            Slider::new(BLOOM_MIN, BLOOM_MAX)
                .value(current.bloom)
                .step(BLOOM_STEP)
                .fill_color(Color::from_hex(INDIGO))
                .on_drag(move |v| on_drag.push(PanelAction::SetBloom(v)))
                .on_change(move |v| on_change.push(PanelAction::SetBloom(v))),
        );

    Container::new()
        .background(Color::WHITE.with_alpha(0.9))
        .border(Border::new(1.0, Color::from_hex(0xd1d5db)))
        .corner_radius(16.0)
        .padding_all(20.0)
        .child(
            Column::new()
                .spacing(14.0)
                .child(Text::new("Customize", font, 22.0, ink))
                .child(Grid::new(2).spacing(8.0).children(presets))
                .children(pickers)
                .child(bloom),
        )
        .into()
}

/// Help lines in the lower left corner.
pub fn instructions(lines: &[&str], font: Option<FontId>) -> Element {
    let color = Color::WHITE.with_alpha(0.8);
    Column::new()
        .spacing(4.0)
        .align(Align::Start)
        .children(lines.iter().map(|l| Text::new(*l, font, 14.0, color)))
        .into()
}

/// Layers the optional panel (top right) and the instructions (bottom left).
pub fn overlay(panel: Option<Element>, help: Element) -> Element {
    let mut stack = Stack::new().item(StackItem::new(help).left(AnchorVal::Px(MARGIN)).bottom(AnchorVal::Px(MARGIN)));
    if let Some(panel) = panel {
        stack = stack.item(
            StackItem::new(panel)
                .top(AnchorVal::Px(MARGIN))
                .right(AnchorVal::Px(MARGIN))
                .width(SizeHint::Px(PANEL_WIDTH)),
        );
    }
    stack.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    fn click(ui: &mut UiScene, root: impl Fn() -> Element, x: f32, y: f32) -> UiFrame {
        let at = Some(Vec2::new(x, y));
        ui.frame(root(), SCREEN, &UiInput { mouse_pos: at, mouse_down: true, mouse_pressed: true, ..UiInput::default() });
        ui.frame(root(), SCREEN, &UiInput { mouse_pos: at, mouse_released: true, ..UiInput::default() })
    }

    fn table_overlay(actions: &PanelActions) -> Element {
        let themes = Theme::presets();
        let picks = themes[1].colors.to_hsv();
        overlay(Some(theme_panel(&themes, 1, &themes[1], &picks, None, actions)), instructions(&["Click the deck"], None))
    }

    #[test]
    fn preset_buttons_queue_selection() {
        let actions = PanelActions::default();
        let mut ui = UiScene::new();

        // Panel content starts at (516, 36); the title line is 26.4 high.
        let frame = click(&mut ui, || table_overlay(&actions), 560.0, 92.0);
        assert!(frame.pointer_captured);
        click(&mut ui, || table_overlay(&actions), 700.0, 92.0);

        assert_eq!(actions.drain(), vec![PanelAction::SelectTheme(0), PanelAction::SelectTheme(1)]);
        assert!(actions.drain().is_empty());
    }

    #[test]
    fn scene_area_is_not_captured() {
        let actions = PanelActions::default();
        let mut ui = UiScene::new();
        let frame = click(&mut ui, || table_overlay(&actions), 200.0, 200.0);
        assert!(!frame.pointer_captured);
        assert!(actions.drain().is_empty());
    }

    #[test]
    fn instructions_alone_leave_the_corner_free() {
        let mut ui = UiScene::new();
        let frame = click(&mut ui, || overlay(None, instructions(&["Drag to orbit"], None)), 700.0, 40.0);
        assert!(!frame.pointer_captured);
    }

    #[test]
    fn value_drag_previews_then_commits() {
        let actions = PanelActions::default();
        let mut ui = UiScene::new();
        // Base picker's value bar spans y 280..294 and starts at x 558.
        let (start, end) = (Vec2::new(600.0, 287.0), Vec2::new(530.0, 287.0));
        ui.frame(
            table_overlay(&actions),
            SCREEN,
            &UiInput { mouse_pos: Some(start), mouse_down: true, mouse_pressed: true, ..UiInput::default() },
        );
        ui.frame(table_overlay(&actions), SCREEN, &UiInput { mouse_pos: Some(end), mouse_down: true, ..UiInput::default() });
        ui.frame(table_overlay(&actions), SCREEN, &UiInput { mouse_pos: Some(end), mouse_released: true, ..UiInput::default() });

        let got = actions.drain();
        assert_eq!(got.len(), 3);
        assert!(matches!(got[0], PanelAction::PreviewColor(ColorSlot::Base, hsv) if hsv.val == 0.0));
        assert!(matches!(got[2], PanelAction::SetColor(ColorSlot::Base, hsv) if hsv.val == 0.0 && hsv.sat > 0.5));
    }
}
