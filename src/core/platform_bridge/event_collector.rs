//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side drain of the platform channel, run once per logic tick.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → FrameInput → TickControl
//
// Draining is bounded so a flood of input cannot starve the simulation.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::FrameInput;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Pulls pending platform events and folds them into the frame input.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    batches: usize,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self { receiver, batches: 0 }
    }

    /// Starts a new input frame and applies every queued batch to it.
    ///
    /// Returns [`TickControl::Exit`] when the window closed or the
    /// platform side of the channel is gone.
    pub(crate) fn collect_frame(&mut self, input: &mut FrameInput) -> TickControl {
        input.begin_frame();
        self.batches = 0;

        while self.batches < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                    input.apply(&discrete);
                    input.apply(&continuous);
                    self.batches += 1;
                }
                Ok(PlatformEvent::WindowClosed) => return TickControl::Exit,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if self.batches >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "core", "Input backlog: drained {} batches this frame", self.batches);
        }

        TickControl::Continue
    }

    /// Number of batches applied by the last `collect_frame` call.
    #[cfg(test)]
    pub(crate) fn batches_last_frame(&self) -> usize {
        self.batches
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
