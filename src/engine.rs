//=========================================================================
// Star Dodge Engine
//
// Main entry point: wires the window thread to the logic thread.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ spawns logic thread
//         ├─ with_channel_capacity() ├─ runs platform (main thread)
//         ├─ with_window_size()      └─ joins logic thread on exit
//         ├─ with_title()
//         └─ with_seed()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::bounded;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::clock::SystemClock;
use crate::core::geometry::ScreenSize;
use crate::core::scene::GameController;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 messages per direction
/// - **Window**: 800×600, titled "Star Dodge"
/// - **Seed**: none (RNG seeded from the OS)
///
/// # Examples
///
/// ```no_run
/// use star_dodge::EngineBuilder;
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_seed(2022)
///     .build()
///     .run();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    window_size: ScreenSize,
    title: String,
    seed: Option<u64>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window_size: ScreenSize::new(800, 600),
            title: "Star Dodge".to_owned(),
            seed: None,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Movement speeds are per tick, so this also sets game speed.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of both thread channels.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the (fixed) window size scenes lay themselves out in.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.window_size = ScreenSize::new(width, height);
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    /// Makes enemy spawns and star placement reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            target: "core",
            "Building engine (TPS: {}, channel: {}, window: {}x{})",
            self.tps,
            self.channel_capacity,
            self.window_size.width,
            self.window_size.height
        );

        Engine {
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: WindowConfig {
                title: self.title,
                size: self.window_size,
            },
            seed: self.seed,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Star Dodge runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► GameController ─► active Scene
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling, latest frame
///
/// Communication: PlatformEvent ─▶ core, CoreEvent ─▶ platform
/// ```
pub struct Engine {
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
    seed: Option<u64>,
}

impl Engine {
    /// Engine with default settings.
    pub fn new() -> Self {
        EngineBuilder::new().build()
    }

    /// Starts the runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates both channels
    /// 2. Spawns the logic thread (enters the menu, ticks at TPS)
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Joins the logic thread once the platform returns
    pub fn run(self) {
        info!(target: "core", "Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channels -----------------------------
        let (event_tx, event_rx) = bounded(self.channel_capacity);
        let (core_tx, core_rx) = bounded(self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let controller = GameController::new(self.window.size, Box::new(SystemClock::new()), rng);
        let orchestrator = CoreSystemsOrchestrator::new(controller, event_rx, core_tx);
        let core_handle = orchestrator.spawn_core_thread(self.tps);
        info!(target: "core", "Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(self.window, event_tx, core_rx);
        if let Err(e) = platform.run() {
            error!(target: "platform", "Platform error: {}", e);
        }
        info!(target: "platform", "Platform event loop exited");

        //--- 4. Cleanup ---------------------------------------------------
        // Dropping the platform closed its sender, so the core loop exits
        // on its next tick even if `WindowClosed` was never delivered.
        match core_handle.join() {
            Ok(()) => info!(target: "core", "Core thread terminated cleanly"),
            Err(e) => error!(target: "core", "Core thread panicked: {:?}", e),
        }

        info!(target: "core", "Engine shutdown complete");
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.window_size, ScreenSize::new(800, 600));
        assert_eq!(builder.title, "Star Dodge");
        assert_eq!(builder.seed, None);
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Window size must be non-zero")]
    fn builder_with_window_size_panics_on_zero() {
        EngineBuilder::new().with_window_size(0, 600);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_window_size(1024, 768)
            .with_title("Dodge")
            .with_seed(42)
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.window.size, ScreenSize::new(1024, 768));
        assert_eq!(engine.window.title, "Dodge");
        assert_eq!(engine.seed, Some(42));
    }
}
