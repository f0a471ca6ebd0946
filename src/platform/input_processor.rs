//=========================================================================
// Input Processor
//=========================================================================
//
// Turns Winit keyboard, mouse and modifier events into the game's
// `InputEvent`s.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent → InputBuffer
//
// The last modifier state is cached: the change itself is forwarded
// (Shift alone boosts the player) and stamped on every later key and
// mouse event. Keys outside `KEY_BINDINGS` are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== Key Bindings ========================================================

/// Physical keys the game reads: movement on WASD and arrows, plus the
/// menu keys.
const KEY_BINDINGS: [(WinitKeyCode, KeyCode); 11] = [
    (WinitKeyCode::KeyW, KeyCode::KeyW),
    (WinitKeyCode::KeyA, KeyCode::KeyA),
    (WinitKeyCode::KeyS, KeyCode::KeyS),
    (WinitKeyCode::KeyD, KeyCode::KeyD),
    (WinitKeyCode::ArrowUp, KeyCode::ArrowUp),
    (WinitKeyCode::ArrowDown, KeyCode::ArrowDown),
    (WinitKeyCode::ArrowLeft, KeyCode::ArrowLeft),
    (WinitKeyCode::ArrowRight, KeyCode::ArrowRight),
    (WinitKeyCode::Space, KeyCode::Space),
    (WinitKeyCode::Enter, KeyCode::Enter),
    (WinitKeyCode::Escape, KeyCode::Escape),
];

fn bound_key(code: WinitKeyCode) -> Option<KeyCode> {
    KEY_BINDINGS
        .iter()
        .find_map(|&(winit, key)| (winit == code).then_some(key))
}

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            modifiers: Modifiers::NONE,
        }
    }

    /// Caches the new modifier state and returns it as an event.
    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) -> InputEvent {
        self.modifiers = Modifiers {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        };
        InputEvent::ModifiersChanged(self.modifiers)
    }

    /// `None` for keys the game does not bind.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return None;
        };
        Some(self.key_event(bound_key(code)?, key_event.state))
    }

    pub(crate) fn process_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        };
        let modifiers = self.modifiers;

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }

    pub(crate) fn process_mouse_move(&self, x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    fn key_event(&self, key: KeyCode, state: ElementState) -> InputEvent {
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_change_is_forwarded_and_stamped_on_movement() {
        let mut processor = InputProcessor::new();
        let event = processor.update_modifiers(ModifiersState::SHIFT);

        let boosted = Modifiers {
            shift: true,
            ctrl: false,
            alt: false,
        };
        assert_eq!(event, InputEvent::ModifiersChanged(boosted));
        assert_eq!(
            processor.key_event(KeyCode::ArrowLeft, ElementState::Pressed),
            InputEvent::KeyDown {
                key: KeyCode::ArrowLeft,
                modifiers: boosted,
            }
        );
    }

    #[test]
    fn releasing_shift_clears_the_boost() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(ModifiersState::SHIFT);
        processor.update_modifiers(ModifiersState::empty());

        assert_eq!(
            processor.key_event(KeyCode::KeyD, ElementState::Released),
            InputEvent::KeyUp {
                key: KeyCode::KeyD,
                modifiers: Modifiers::NONE,
            }
        );
    }

    #[test]
    fn every_binding_maps_and_others_are_dropped() {
        for (winit, key) in KEY_BINDINGS {
            assert_eq!(bound_key(winit), Some(key), "{:?} should be bound", winit);
        }
        assert_eq!(bound_key(WinitKeyCode::KeyQ), None);
        assert_eq!(bound_key(WinitKeyCode::F13), None);
    }

    #[test]
    fn left_release_is_a_button_click() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.process_mouse_button(WinitMouseButton::Left, ElementState::Released),
            InputEvent::MouseButtonUp {
                button: MouseButton::Left,
                modifiers: Modifiers::NONE,
            }
        );
        assert!(matches!(
            processor.process_mouse_button(WinitMouseButton::Back, ElementState::Pressed),
            InputEvent::MouseButtonDown { button: MouseButton::Other, .. }
        ));
    }
}
