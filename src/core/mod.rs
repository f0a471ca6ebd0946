//=========================================================================
// Core Systems Orchestrator
//
// Drives the game on the logic (non-platform) thread.
//
// Responsibilities:
// - Drain platform input into a per-frame `FrameInput`
// - Tick the `GameController` (scene update, then queued commands)
// - Record the frame into a `DisplayList` and hand it to the platform
// - Hold a fixed tick rate (TPS)
//
// Notes:
// The orchestrator shares nothing with the platform thread; both sides
// talk only through the two bounded crossbeam channels.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================
use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{error, info, trace, warn};

//=== Internal Modules ====================================================
pub mod clock;
pub mod collision;
pub mod geometry;
pub mod input;
pub(crate) mod platform_bridge;
pub mod render;
pub mod scene;

use input::FrameInput;
use platform_bridge::{CoreEvent, EventCollector, PlatformEvent, TickControl};
use render::DisplayList;
use scene::GameController;

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator {
    controller: GameController,
    collector: EventCollector,
    input: FrameInput,
    frames: Sender<CoreEvent>,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        controller: GameController,
        receiver: Receiver<PlatformEvent>,
        frames: Sender<CoreEvent>,
    ) -> Self {
        Self {
            controller,
            collector: EventCollector::new(receiver),
            input: FrameInput::new(),
            frames,
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Enters the menu, then ticks at `tps` until the window closes, the
    // game quits, or a scene fails.
    //
    pub(crate) fn spawn_core_thread(mut self, tps: f64) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            if let Err(e) = self.controller.start() {
                error!(target: "core", "Could not enter the menu: {}", e);
                self.request_exit();
                return;
            }

            loop {
                let frame_start = Instant::now();

                if let TickControl::Exit = self.tick() {
                    info!(target: "core", "Core thread exiting.");
                    break;
                }

                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }

    //--- tick() -----------------------------------------------------------
    //
    // One logic step:
    //  1. Fold pending platform input into the frame
    //  2. Update the active scene and apply its commands
    //  3. Render and publish the frame
    //
    pub(crate) fn tick(&mut self) -> TickControl {
        if let TickControl::Exit = self.collector.collect_frame(&mut self.input) {
            return TickControl::Exit;
        }

        if let Err(e) = self.controller.tick(&self.input) {
            error!(target: "core", "Scene failed: {}", e);
            self.request_exit();
            return TickControl::Exit;
        }

        if !self.controller.is_running() {
            info!(target: "core", "Game requested quit");
            self.request_exit();
            return TickControl::Exit;
        }

        let mut frame = DisplayList::new();
        self.controller.render(&mut frame);
        trace!(target: "core", "Frame recorded ({} draw calls)", frame.len());

        match self.frames.try_send(CoreEvent::Frame(frame)) {
            Ok(()) => TickControl::Continue,
            Err(TrySendError::Full(_)) => {
                warn!(target: "core", "Frame channel full, dropping frame");
                TickControl::Continue
            }
            Err(TrySendError::Disconnected(_)) => TickControl::Exit,
        }
    }

    #[cfg(test)]
    pub(crate) fn controller(&self) -> &GameController {
        &self.controller
    }

    fn request_exit(&self) {
        if self.frames.send(CoreEvent::Exit).is_err() {
            warn!(target: "core", "Platform already gone, exit not delivered");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
