//=========================================================================
// Star Dodge Library Root
//
// An arcade dodge game: steer a square around red enemies, score by
// surviving and by brushing past them.
//
// Responsibilities:
// - Expose the runtime entry point (`Engine`, `EngineBuilder`)
// - Expose the scene machinery and sprites for tests and tooling
// - Keep the winit platform layer private
//
// Typical usage:
// ```no_run
// use star_dodge::Engine;
//
// fn main() {
//     Engine::new().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine-side systems (input, clock, geometry, drawing,
// scene controller). `sprite` and `scenes` are the game itself.
//
pub mod core;
pub mod prelude;
pub mod scenes;
pub mod sprite;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and the Winit event loop; `engine` wires it
// to the logic thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
