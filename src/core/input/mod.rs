//=========================================================================
// Input System
//=========================================================================
//
// Engine-level input types and the per-frame input snapshot.
//
// Architecture:
//   Platform (winit) → InputEvent batches → FrameInput → Scene::update
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod frame_input;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use frame_input::FrameInput;
