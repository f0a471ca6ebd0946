//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Message types crossing the window thread ↔ logic thread boundary.
//
//   Platform ──PlatformEvent──▶ Core   (input batches, window closed)
//   Core     ──CoreEvent─────▶ Platform (rendered frames, exit request)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::render::DisplayList;

//=== PlatformEvent =======================================================

/// Events sent from the platform to the logic thread.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Input gathered during one platform frame.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window close requested.
    WindowClosed,
}

//=== CoreEvent ===========================================================

/// Events sent from the logic thread back to the platform.
#[derive(Debug, Clone)]
pub(crate) enum CoreEvent {
    /// Draw calls for the latest simulated frame.
    Frame(DisplayList),

    /// The game asked to quit (or hit a fatal scene error).
    Exit,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(String),

    /// Event loop execution error.
    EventLoopExecution(String),

    /// No usable GPU surface, adapter or device for the window.
    GraphicsInit(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::GraphicsInit(e) => write!(f, "Graphics initialization failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=========================================================================
// Unit Tests
//=========================================================================
