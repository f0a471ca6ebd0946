//=========================================================================
// Input Event Types
//=========================================================================
//
// Engine-side representation of keyboard and mouse input.
//
// The platform layer translates winit events into these types, so the
// logic thread and every scene stay independent of the windowing crate.
// Only the keys the game actually binds are named; everything else is
// dropped by the platform before it crosses the channel.
//
// Event Flow:
// ```text
// winit WindowEvent
//         ↓
//    InputEvent (this module)
//         ↓
//    FrameInput (per-frame state, handed to scenes)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

//=== KeyCode =============================================================

/// Physical key location (layout independent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Movement ---------------------------------------------------------
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    //--- Menu / System ----------------------------------------------------
    Space,
    Enter,
    Escape,
}

//=== Modifiers ===========================================================

/// Modifier key state (left/right variants are not distinguished).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };
}

//=== InputEvent ==========================================================

/// Low-level input event produced by the platform layer.
///
/// Key and button events carry the modifier state current at the time
/// they were produced. Cursor coordinates are window pixels, top-left
/// origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },
    MouseMoved { x: f32, y: f32 },
    /// Modifier state changed without a key event attached to it.
    ModifiersChanged(Modifiers),
}

impl InputEvent {
    /// Returns `true` for events whose order within a frame matters.
    ///
    /// Cursor motion is continuous: only the last position of a frame is
    /// meaningful, so the platform coalesces it.
    pub fn is_discrete(&self) -> bool {
        !matches!(self, Self::MouseMoved { .. })
    }

    /// Modifier state attached to the event, if any.
    pub fn modifiers(&self) -> Option<Modifiers> {
        match *self {
            Self::KeyDown { modifiers, .. }
            | Self::KeyUp { modifiers, .. }
            | Self::MouseButtonDown { modifiers, .. }
            | Self::MouseButtonUp { modifiers, .. }
            | Self::ModifiersChanged(modifiers) => Some(modifiers),
            Self::MouseMoved { .. } => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
