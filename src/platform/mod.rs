//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the logic thread over two
// crossbeam channels.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  EventCollector      │
//  │   ↓                      │    │   ↓                  │
//  │  InputProcessor          │    │  FrameInput          │
//  │   ↓                      │    │   ↓                  │
//  │  InputBuffer             │    │  GameController      │
//  │   ↓ RedrawRequested      │    │   ↓                  │
//  │  PlatformEvent ──────────┼───▶│  DisplayList         │
//  │                          │    │   │                  │
//  │  about_to_wait ◀─────────┼────┼───┘ CoreEvent        │
//  │   └─ keep latest frame   │    │                      │
//  │  Presenter (wgpu)        │    │                      │
//  │   └─ draw on redraw      │    │                      │
//  └──────────────────────────┘    └──────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: all buffered input is sent as
//   one batch; empty batches are not sent
// - **Latest frame wins**: only the newest `DisplayList` is kept and
//   drawn on the next redraw, older ones are discarded unseen
// - **Graceful channel disconnect**: if the logic thread is gone, the
//   platform exits instead of panicking
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;
mod presenter;

//=== External Crates =====================================================

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::geometry::ScreenSize;
use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use crate::core::render::DisplayList;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;
use presenter::Presenter;

//=== WindowConfig ========================================================

/// Window parameters chosen at engine build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub size: ScreenSize,
}

//=== Platform ============================================================

/// Window owner, input aggregator and frame sink.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(...)` - no window yet
/// 2. **Execution**: `platform.run()` - blocks in the Winit event loop
/// 3. **Shutdown**: window closed (→ `WindowClosed` to core) or
///    `CoreEvent::Exit` received from core
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Arc<Window>>,

    /// GPU surface bound to `window`.
    presenter: Option<Presenter>,

    config: WindowConfig,

    /// Buffers discrete/continuous input until frame boundary.
    buffer: InputBuffer,

    /// Input batches to the logic thread.
    event_sender: Sender<PlatformEvent>,

    /// Frames and exit requests from the logic thread.
    core_receiver: Receiver<CoreEvent>,

    /// Converts Winit events to engine InputEvents.
    input_processor: InputProcessor,

    latest_frame: Option<DisplayList>,
    frames_received: u64,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        config: WindowConfig,
        event_sender: Sender<PlatformEvent>,
        core_receiver: Receiver<CoreEvent>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            presenter: None,
            config,
            buffer: InputBuffer::new(),
            event_sender,
            core_receiver,
            input_processor: InputProcessor::new(),
            latest_frame: None,
            frames_received: 0,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes or core exits.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends this frame's buffered input to the logic thread.
    ///
    /// A disconnected channel means the logic thread already stopped;
    /// the events are dropped with a warning.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    discrete_count + continuous_count
                );
            }
        }
    }

    /// Pulls everything the logic thread sent since the last call.
    ///
    /// Returns `true` when the platform should shut down.
    fn drain_core_events(&mut self) -> bool {
        loop {
            match self.core_receiver.try_recv() {
                Ok(CoreEvent::Frame(frame)) => {
                    self.frames_received += 1;
                    self.latest_frame = Some(frame);
                }
                Ok(CoreEvent::Exit) => {
                    info!(target: "platform", "Core requested exit");
                    return true;
                }
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    warn!(target: "platform", "Core channel disconnected");
                    return true;
                }
            }
        }
    }

    /// Draws the newest frame, if both a frame and a surface exist.
    fn present_latest(&mut self) {
        if let (Some(presenter), Some(frame)) = (self.presenter.as_mut(), self.latest_frame.as_ref()) {
            trace!(
                target: "platform",
                "Presenting frame #{} ({} draw calls)",
                self.frames_received,
                frame.len()
            );
            presenter.present(frame);
        }
    }

    fn notify_closed(&self) {
        if self.event_sender.send(PlatformEvent::WindowClosed).is_err() {
            debug!(target: "platform", "Core already stopped");
        }
    }

    //--- Accessors --------------------------------------------------------

    /// The newest frame received from the logic thread.
    #[cfg(test)]
    pub(crate) fn latest_frame(&self) -> Option<&DisplayList> {
        self.latest_frame.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the fixed-size window on first activation.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let size = self.config.size;
        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(size.width, size.height))
            .with_resizable(false);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.notify_closed();
                event_loop.exit();
                return;
            }
        };
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        match Presenter::new(Arc::clone(&window), size) {
            Ok(presenter) => self.presenter = Some(presenter),
            Err(e) => {
                error!(target: "platform", "{}", e);
                self.notify_closed();
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.notify_closed();
                event_loop.exit();
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                let event = self.input_processor.update_modifiers(state.state());
                self.buffer.push_discrete(event);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .input_processor
                    .process_mouse_move(position.x as f32, position.y as f32);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push_discrete(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::Resized(size) => {
                if let Some(presenter) = self.presenter.as_mut() {
                    presenter.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();
                self.present_latest();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    /// Picks up frames and exit requests from the logic thread.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.drain_core_events() {
            event_loop.exit();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
