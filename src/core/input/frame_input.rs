//=========================================================================
// Frame Input
//=========================================================================
//
// Per-frame input snapshot handed to scenes as their "event batch".
//
// Architecture:
//   Vec<InputEvent> batches → apply() → held sets + frame deltas → query
//
// Frame lifecycle: begin_frame() → apply() (once per batch) → query
//
// Scenes never interpret raw events; they forward this snapshot to their
// groups, where the player reads held keys and buttons read clicks.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== FrameInput ==========================================================

/// Held state that survives frame boundaries plus one-frame deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    //--- Persistent State -------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    cursor: (f32, f32),
    modifiers: Modifiers,

    //--- Frame Deltas -----------------------------------------------------
    keys_pressed: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears the one-frame deltas; held keys and cursor carry over.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    /// Folds a batch of events into the snapshot, in order.
    pub fn apply(&mut self, events: &[InputEvent]) {
        for event in events {
            if let Some(modifiers) = event.modifiers() {
                self.modifiers = modifiers;
            }

            match *event {
                InputEvent::KeyDown { key, .. } => {
                    if self.keys_down.insert(key) {
                        self.keys_pressed.insert(key);
                    }
                }
                InputEvent::KeyUp { key, .. } => {
                    self.keys_down.remove(&key);
                }
                InputEvent::MouseButtonDown { button, .. } => {
                    if self.buttons_down.insert(button) {
                        self.buttons_pressed.insert(button);
                    }
                }
                InputEvent::MouseButtonUp { button, .. } => {
                    if self.buttons_down.remove(&button) {
                        self.buttons_released.insert(button);
                    }
                }
                InputEvent::MouseMoved { x, y } => self.cursor = (x, y),
                InputEvent::ModifiersChanged(_) => {}
            }
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Cursor position in window pixels.
    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    pub fn shift_held(&self) -> bool {
        self.modifiers.shift
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
