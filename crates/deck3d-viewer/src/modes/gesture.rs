use deck3d_engine::coords::Vec2;
use deck3d_engine::input::MouseButton;
use deck3d_ui::scene::CLICK_SLOP;

use super::FrameInput;

/// Splits primary-button input into clicks and orbit drags.
///
/// A press that travels more than [`CLICK_SLOP`] before release is a drag;
/// anything else is a click at the release point. Presses that start on the
/// UI are ignored entirely.
#[derive(Debug, Default, Clone)]
pub struct Gesture {
    press: Option<Vec2>,
    dragged: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GestureFrame {
    pub click: Option<Vec2>,
    /// Pointer motion while the button is held, in logical pixels.
    pub drag: Option<Vec2>,
}

impl Gesture {
    pub fn update(&mut self, input: &FrameInput<'_>) -> GestureFrame {
        let pos = input.state.pointer_pos.map(Vec2::from);
        let pressed = input.frame.button_pressed(MouseButton::Left);
        let released = input.frame.button_released(MouseButton::Left);
        let down = input.state.button_down(MouseButton::Left);

        if pressed && !input.ui_captured {
            if let Some(p) = pos {
                self.press = Some(p);
                self.dragged = false;
            }
        }

        let mut out = GestureFrame::default();
        let Some(start) = self.press else {
            return out;
        };

        if pos.is_some_and(|p| p.distance(start) > CLICK_SLOP) {
            self.dragged = true;
        }

        let (dx, dy) = input.frame.pointer_delta;
        if (down || released) && (dx != 0.0 || dy != 0.0) {
            out.drag = Some(Vec2::new(dx, dy));
        }

        if released {
            if !self.dragged {
                out.click = Some(pos.unwrap_or(start));
            }
            self.press = None;
            self.dragged = false;
        } else if !down {
            // Release was lost, e.g. to a focus change.
            self.press = None;
            self.dragged = false;
        }
        out
    }

    /// A press is held and has moved past the click slop.
    pub fn is_dragging(&self) -> bool {
        self.press.is_some() && self.dragged
    }
}


#[cfg(test)]
mod tests {
    use super::test_input::InputSim;
    use super::*;
    use deck3d_engine::coords::Viewport;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn short_press_is_a_click() {
        let mut sim = InputSim::default();
        let mut g = Gesture::default();
        sim.move_to(100.0, 100.0);
        sim.press();
        assert_eq!(g.update(&sim.input(VP)).click, None);

        sim.next_frame();
        sim.move_to(102.0, 101.0);
        sim.release();
        let out = g.update(&sim.input(VP));
        assert_eq!(out.click, Some(Vec2::new(102.0, 101.0)));
    }

    #[test]
    fn press_and_release_in_one_frame_is_a_click() {
        let mut sim = InputSim::default();
        let mut g = Gesture::default();
        sim.move_to(10.0, 10.0);
        sim.press();
        sim.release();
        assert_eq!(g.update(&sim.input(VP)).click, Some(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn moving_past_the_slop_is_a_drag() {
        let mut sim = InputSim::default();
        let mut g = Gesture::default();
        sim.move_to(100.0, 100.0);
        sim.press();
        g.update(&sim.input(VP));

        sim.next_frame();
        sim.move_to(110.0, 100.0);
        let out = g.update(&sim.input(VP));
        assert_eq!(out.drag, Some(Vec2::new(10.0, 0.0)));
        assert!(g.is_dragging());

        // Coming back near the start does not turn it into a click.
        sim.next_frame();
        sim.move_to(100.0, 100.0);
        sim.release();
        let out = g.update(&sim.input(VP));
        assert_eq!(out.click, None);
        assert!(!g.is_dragging());
    }

    #[test]
    fn presses_on_the_ui_are_ignored() {
        let mut sim = InputSim::default();
        let mut g = Gesture::default();
        sim.ui_captured = true;
        sim.move_to(10.0, 10.0);
        sim.press();
        g.update(&sim.input(VP));

        sim.next_frame();
        sim.move_to(40.0, 10.0);
        let out = g.update(&sim.input(VP));
        assert_eq!(out.drag, None);

        sim.next_frame();
        sim.release();
        assert_eq!(g.update(&sim.input(VP)).click, None);
    }

    #[test]
    fn hover_motion_without_press_is_nothing() {
        let mut sim = InputSim::default();
        let mut g = Gesture::default();
        sim.move_to(10.0, 10.0);
        sim.next_frame();
        sim.move_to(50.0, 10.0);
        assert_eq!(g.update(&sim.input(VP)), GestureFrame::default());
    }
}
