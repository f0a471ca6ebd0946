//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the window thread and the logic thread.
//
// Components:
// - `interface`: message and error types crossing the boundary
// - `event_collector`: core-side draining of platform input
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{CoreEvent, PlatformError, PlatformEvent};
