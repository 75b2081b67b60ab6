//! Pointer and keyboard input.
//!
//! Raw winit events are translated into the few things the simulation
//! cares about: where the pointer is, whether the primary button is held
//! (which switches pointer interaction on), and a handful of keyboard
//! shortcuts for the viewer.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Last known pointer position in canvas pixels.
///
/// Written by the pointer source, read by the tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
}

/// Pointer activity relevant to the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to a new canvas position.
    Moved(Vec2),
    /// Primary button went down: enable pointer interaction.
    Pressed,
    /// Primary button went up: disable pointer interaction.
    Released,
}

impl PointerEvent {
    /// Translate a window event. Returns `None` for unrelated events.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(PointerEvent::Moved(Vec2::new(position.x as f32, position.y as f32)))
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => Some(match state {
                ElementState::Pressed => PointerEvent::Pressed,
                ElementState::Released => PointerEvent::Released,
            }),
            _ => None,
        }
    }
}

/// Viewer keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    /// Space: start or pause ticking.
    ToggleRunning,
    /// R: randomize every rule.
    RandomizeRules,
    /// G: switch gravity on or off.
    ToggleGravity,
    /// W: switch between bouncing and wrapping walls.
    ToggleBoundary,
}

impl Shortcut {
    /// Shortcut bound to a key press, if any. Releases and repeats are ignored.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return None;
        };
        if event.state != ElementState::Pressed || event.repeat {
            return None;
        }
        match event.physical_key {
            PhysicalKey::Code(code) => Self::from_key(code),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Space => Some(Shortcut::ToggleRunning),
            KeyCode::KeyR => Some(Shortcut::RandomizeRules),
            KeyCode::KeyG => Some(Shortcut::ToggleGravity),
            KeyCode::KeyW => Some(Shortcut::ToggleBoundary),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_keys() {
        assert_eq!(Shortcut::from_key(KeyCode::Space), Some(Shortcut::ToggleRunning));
        assert_eq!(Shortcut::from_key(KeyCode::KeyR), Some(Shortcut::RandomizeRules));
        assert_eq!(Shortcut::from_key(KeyCode::KeyG), Some(Shortcut::ToggleGravity));
        assert_eq!(Shortcut::from_key(KeyCode::KeyW), Some(Shortcut::ToggleBoundary));
        assert_eq!(Shortcut::from_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_unrelated_window_event() {
        assert_eq!(PointerEvent::from_window_event(&WindowEvent::Focused(true)), None);
        assert_eq!(Shortcut::from_window_event(&WindowEvent::Focused(true)), None);
    }
}
