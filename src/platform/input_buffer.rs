//=========================================================================
// Input Buffer
//
// Collects translated input between two platform frames.
//
// Responsibilities:
// - Keep discrete events (keys, mouse buttons) in arrival order
// - Coalesce cursor motion down to the last position of the frame
// - Hand both out together via `drain()` at the frame boundary
//
// Notes:
// The buffer is reused every frame; draining keeps its allocation.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    cursor: Option<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            cursor: None,
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // Only the latest cursor position matters to the game.
    //
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        debug_assert!(!event.is_discrete());
        self.cursor = Some(event);
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Key repeat produces runs of identical KeyDown events; only the
    // first of a run is kept.
    //
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns `(discrete, continuous)` for this frame, or `None` when the
    // frame saw no input at all.
    //
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = self.discrete.drain(..).collect();
        let continuous = self.cursor.take().into_iter().collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + usize::from(self.cursor.is_some())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.cursor.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
