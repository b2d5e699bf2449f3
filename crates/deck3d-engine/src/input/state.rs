use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,

    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies `ev` to the held state and records transitions into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases never arrive for presses that were held while focus moved away.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                if let Some((px, py)) = self.pointer_pos {
                    frame.pointer_delta.0 += x - px;
                    frame.pointer_delta.1 += y - py;
                }
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, modifiers, repeat } => {
                self.modifiers = *modifiers;
                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) && !*repeat {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, modifiers }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;
                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = *modifiers;
                frame.scroll_lines += delta.lines_y();
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    fn button(state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x: 10.0,
            y: 10.0,
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn pointer_motion_accumulates_per_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, moved(10.0, 10.0));
        assert_eq!(frame.pointer_delta, (0.0, 0.0));

        state.apply_event(&mut frame, moved(13.0, 8.0));
        state.apply_event(&mut frame, moved(15.0, 9.0));
        assert_eq!(frame.pointer_delta, (5.0, -1.0));

        frame.clear();
        assert_eq!(frame.pointer_delta, (0.0, 0.0));
        assert_eq!(state.pointer_pos, Some((15.0, 9.0)));
    }

    #[test]
    fn button_transitions_are_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, button(MouseButtonState::Pressed));
        state.apply_event(&mut frame, button(MouseButtonState::Pressed));
        assert!(frame.button_pressed(MouseButton::Left));
        assert!(state.button_down(MouseButton::Left));

        frame.clear();
        state.apply_event(&mut frame, button(MouseButtonState::Released));
        assert!(frame.button_released(MouseButton::Left));
        assert!(!state.button_down(MouseButton::Left));
    }

    #[test]
    fn key_repeat_is_not_a_new_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let key = |repeat| InputEvent::Key {
            key: Key::R,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat,
        };

        state.apply_event(&mut frame, key(false));
        assert!(frame.key_pressed(Key::R));
        frame.clear();
        state.apply_event(&mut frame, key(true));
        assert!(!frame.key_pressed(Key::R));
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(MouseButtonState::Pressed));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(state.buttons_down.is_empty());
    }

    #[test]
    fn wheel_pixels_are_normalized_to_lines() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let wheel = |delta| InputEvent::MouseWheel { delta, modifiers: Modifiers::default() };

        state.apply_event(&mut frame, wheel(MouseWheelDelta::Line { x: 0.0, y: 1.0 }));
        state.apply_event(&mut frame, wheel(MouseWheelDelta::Pixel { x: 0.0, y: -50.0 }));
        assert!((frame.scroll_lines - 0.5).abs() < 1e-6);
    }
}
