//! Deterministic scaffolding for driving scenes outside the controller.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::geometry::ScreenSize;
use crate::core::input::{FrameInput, InputEvent, Modifiers, MouseButton};
use crate::core::scene::{Command, CommandQueue, SceneContext, SceneInit, SceneKind};

pub const SCREEN: ScreenSize = ScreenSize::new(800, 600);

pub struct Harness {
    pub input: FrameInput,
    pub rng: StdRng,
    pub commands: CommandQueue,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            input: FrameInput::new(),
            rng: StdRng::seed_from_u64(2022),
            commands: CommandQueue::new(),
        }
    }

    pub fn init(now: u64) -> SceneInit {
        SceneInit { now, screen: SCREEN }
    }

    pub fn ctx(&mut self, now: u64) -> SceneContext<'_> {
        SceneContext::new(&self.input, now, SCREEN, &mut self.rng, &mut self.commands)
    }

    /// Replaces this frame's input with a left click at `(x, y)`.
    pub fn click(&mut self, x: f32, y: f32) {
        self.input = FrameInput::new();
        self.input.apply(&[
            InputEvent::MouseMoved { x, y },
            InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                modifiers: Modifiers::NONE,
            },
            InputEvent::MouseButtonUp {
                button: MouseButton::Left,
                modifiers: Modifiers::NONE,
            },
        ]);
    }

    pub fn release_input(&mut self) {
        self.input = FrameInput::new();
    }

    /// Pops the first queued scene change, dropping other commands.
    pub fn take_scene_change(&mut self) -> Option<SceneKind> {
        self.commands.take().into_iter().find_map(|command| match command {
            Command::ChangeScene(kind) => Some(kind),
            _ => None,
        })
    }
}
