//=========================================================================
// Scene System
//=========================================================================
//
// Manages the single active scene and the transitions between scenes.
//
// Architecture:
//   GameController
//     ├─ current: Option<Box<dyn Scene>>
//     ├─ commands: CommandQueue
//     └─ clock / rng / screen
//
// Flow:
//   tick() → Scene::update(ctx) → CommandQueue → process_commands()
//          → change_scene(kind) → scenes::build(kind)
//
// Scenes hold their state in a `Stage` (named groups + raw overlays) and
// never call back into the controller directly: every transition is a
// queued `Command` applied at the tick boundary.
//
//=========================================================================

//=== Module Declarations =================================================

mod command_queue;
mod controller;
mod error;
mod group;
pub mod kind;
mod stage;

//=== Public API ==========================================================

pub use command_queue::{Command, CommandQueue};
pub use controller::GameController;
pub use error::SceneError;
pub use group::{Group, GroupId};
pub use kind::{GamePayload, MenuPayload, ResultPayload, SceneKind, TransitionPayload};
pub use stage::{InheritedGroups, RawItem, Stage};

//=== External Dependencies ===============================================

use rand::rngs::StdRng;

//=== Internal Dependencies ===============================================

use crate::core::geometry::ScreenSize;
use crate::core::input::FrameInput;
use crate::core::render::{Color, Renderer};
use crate::sprite::FrameContext;

//=== Scene Trait =========================================================

/// Behavior of one game screen.
///
/// Only `name`, `update` and `render` are required:
///
/// ```rust
/// # use star_dodge::prelude::*;
/// struct Blank {
///     stage: Stage,
/// }
///
/// impl Scene for Blank {
///     fn name(&self) -> &'static str {
///         "blank"
///     }
///
///     fn update(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
///         self.stage.update(&ctx.frame());
///         Ok(())
///     }
///
///     fn render(&self, renderer: &mut dyn Renderer) {
///         self.stage.render(renderer);
///     }
/// }
/// ```
pub trait Scene: Send {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;

    /// Called once per tick with this frame's input and time sample.
    fn update(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError>;

    /// Draws the scene. The controller clears to `background()` first.
    fn render(&self, renderer: &mut dyn Renderer);

    /// Handles `Command::NavigatePage`. Scenes without pages ignore it.
    fn navigate(&mut self, _delta: i32) {}

    fn background(&self) -> Color {
        Color::BLACK
    }
}

//=== SceneInit ===========================================================

/// Data available to a scene constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneInit {
    pub now: u64,
    pub screen: ScreenSize,
}

//=== SceneContext ========================================================

/// Per-tick view of the controller handed to `Scene::update`.
pub struct SceneContext<'a> {
    pub input: &'a FrameInput,
    pub now: u64,
    pub screen: ScreenSize,
    pub rng: &'a mut StdRng,
    commands: &'a mut CommandQueue,
}

impl<'a> SceneContext<'a> {
    pub fn new(
        input: &'a FrameInput,
        now: u64,
        screen: ScreenSize,
        rng: &'a mut StdRng,
        commands: &'a mut CommandQueue,
    ) -> Self {
        Self {
            input,
            now,
            screen,
            rng,
            commands,
        }
    }

    /// Read-only slice of the context forwarded to sprites.
    pub fn frame(&self) -> FrameContext<'a> {
        FrameContext {
            input: self.input,
            now: self.now,
            screen: self.screen,
        }
    }

    //--- Controller Surface -----------------------------------------------

    pub fn change_scene(&mut self, kind: SceneKind) {
        self.commands.push(Command::ChangeScene(kind));
    }

    pub fn quit(&mut self) {
        self.commands.push(Command::Quit);
    }

    pub fn navigate_page(&mut self, delta: i32) {
        self.commands.push(Command::NavigatePage(delta));
    }

    pub fn commands(&self) -> &CommandQueue {
        self.commands
    }
}
