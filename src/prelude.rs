//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use star_dodge::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Time, geometry and drawing
pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::geometry::{Rect, ScreenSize};
pub use crate::core::render::{Color, DisplayList, Font, FontFace, Renderer, Text};

// Input system
pub use crate::core::input::{FrameInput, InputEvent, KeyCode, Modifiers, MouseButton};

// Scene system
pub use crate::core::scene::{
    GameController, Group, Scene, SceneContext, SceneError, SceneInit, SceneKind, Stage,
};

// Sprites
pub use crate::sprite::{ButtonAction, Sprite};
