//! Input handling for the backdrop window.
//!
//! `Input` folds raw winit window events into the two things the backdrop
//! cares about: where the pointer is (mouse or touch) and which control keys
//! went down this frame.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, Touch, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Keys the backdrop responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    C,
    G,
    R,
    S,
    W,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Up,
    Down,
    Left,
    Right,
    Space,
    Escape,
}

impl KeyCode {
    /// Map a winit key code, or `None` for keys without a binding.
    pub fn from_winit(key: WinitKeyCode) -> Option<Self> {
        let key = match key {
            WinitKeyCode::KeyC => KeyCode::C,
            WinitKeyCode::KeyG => KeyCode::G,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::KeyW => KeyCode::W,

            WinitKeyCode::Digit1 | WinitKeyCode::Numpad1 => KeyCode::Key1,
            WinitKeyCode::Digit2 | WinitKeyCode::Numpad2 => KeyCode::Key2,
            WinitKeyCode::Digit3 | WinitKeyCode::Numpad3 => KeyCode::Key3,
            WinitKeyCode::Digit4 | WinitKeyCode::Numpad4 => KeyCode::Key4,
            WinitKeyCode::Digit5 | WinitKeyCode::Numpad5 => KeyCode::Key5,

            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::ArrowLeft => KeyCode::Left,
            WinitKeyCode::ArrowRight => KeyCode::Right,

            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,

            _ => return None,
        };
        Some(key)
    }
}

/// Pointer and keyboard state.
///
/// Key presses are edge-triggered: holding a key (or OS key repeat) fires it
/// once until it is released.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    pointer: Option<Vec2>,
    active_touch: Option<u64>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` went down since the last [`begin_frame`](Self::begin_frame).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Whether `key` is currently down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Keys that went down this frame, in no particular order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_pressed.iter().copied()
    }

    /// Pointer position in surface pixels, if a mouse or finger is over the window.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Clear per-frame state. Call after the frame's input has been consumed.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let Some(key) = KeyCode::from_winit(code) else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => {
                        if self.keys_held.insert(key) {
                            self.keys_pressed.insert(key);
                        }
                    }
                    ElementState::Released => {
                        self.keys_held.remove(&key);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if self.active_touch.is_none() {
                    self.pointer = Some(Vec2::new(position.x as f32, position.y as f32));
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if self.active_touch.is_none() {
                    self.pointer = None;
                }
            }

            WindowEvent::Touch(touch) => self.handle_touch(touch),

            WindowEvent::Focused(false) => {
                self.keys_held.clear();
            }

            _ => {}
        }
    }

    fn handle_touch(&mut self, touch: &Touch) {
        let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
        match touch.phase {
            TouchPhase::Started => {
                self.active_touch = Some(touch.id);
                self.pointer = Some(position);
            }
            TouchPhase::Moved => {
                // Only the first finger steers the pointer.
                if self.active_touch == Some(touch.id) {
                    self.pointer = Some(position);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.active_touch == Some(touch.id) {
                    self.active_touch = None;
                    self.pointer = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, Force};

    fn device() -> DeviceId {
        // SAFETY: the id is only compared, never passed back to the platform.
        unsafe { DeviceId::dummy() }
    }

    fn touch(id: u64, phase: TouchPhase, x: f64, y: f64) -> WindowEvent {
        WindowEvent::Touch(Touch {
            device_id: device(),
            phase,
            location: PhysicalPosition::new(x, y),
            force: None::<Force>,
            id,
        })
    }

    #[test]
    fn test_key_state() {
        let mut input = Input::new();

        assert!(!input.key_held(KeyCode::Space));
        assert!(!input.key_pressed(KeyCode::Space));

        // Simulate a press (normally done via handle_event)
        input.keys_pressed.insert(KeyCode::Space);
        input.keys_held.insert(KeyCode::Space);

        assert!(input.key_held(KeyCode::Space));
        assert!(input.key_pressed(KeyCode::Space));
        assert_eq!(input.pressed_keys().collect::<Vec<_>>(), vec![KeyCode::Space]);

        // After begin_frame, pressed is cleared but held remains
        input.begin_frame();
        assert!(input.key_held(KeyCode::Space));
        assert!(!input.key_pressed(KeyCode::Space));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyCode::from_winit(WinitKeyCode::KeyG), Some(KeyCode::G));
        assert_eq!(KeyCode::from_winit(WinitKeyCode::Numpad3), Some(KeyCode::Key3));
        assert_eq!(KeyCode::from_winit(WinitKeyCode::ArrowLeft), Some(KeyCode::Left));
        assert_eq!(KeyCode::from_winit(WinitKeyCode::KeyQ), None);
    }

    #[test]
    fn test_cursor_sets_and_clears_pointer() {
        let mut input = Input::new();
        assert_eq!(input.pointer(), None);

        input.handle_event(&WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(120.0, 45.5),
        });
        assert_eq!(input.pointer(), Some(Vec2::new(120.0, 45.5)));

        input.handle_event(&WindowEvent::CursorLeft {
            device_id: device(),
        });
        assert_eq!(input.pointer(), None);
    }

    #[test]
    fn test_pointer_at_origin_is_kept() {
        let mut input = Input::new();
        input.handle_event(&WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(0.0, 0.0),
        });
        assert_eq!(input.pointer(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_touch_lifecycle() {
        let mut input = Input::new();

        input.handle_event(&touch(1, TouchPhase::Started, 10.0, 20.0));
        assert_eq!(input.pointer(), Some(Vec2::new(10.0, 20.0)));

        input.handle_event(&touch(1, TouchPhase::Moved, 30.0, 40.0));
        assert_eq!(input.pointer(), Some(Vec2::new(30.0, 40.0)));

        // A second finger does not steal the pointer
        input.handle_event(&touch(2, TouchPhase::Moved, 500.0, 500.0));
        assert_eq!(input.pointer(), Some(Vec2::new(30.0, 40.0)));

        input.handle_event(&touch(1, TouchPhase::Ended, 30.0, 40.0));
        assert_eq!(input.pointer(), None);
    }

    #[test]
    fn test_touch_cancel_clears_pointer() {
        let mut input = Input::new();
        input.handle_event(&touch(7, TouchPhase::Started, 1.0, 2.0));
        input.handle_event(&touch(7, TouchPhase::Cancelled, 1.0, 2.0));
        assert_eq!(input.pointer(), None);
    }
}
