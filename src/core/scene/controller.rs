//=========================================================================
// Game Controller
//=========================================================================
//
// Owns the active scene and applies scene commands.
//
// States: no scene (before `start`, or after a failed construction) or
// exactly one active scene. `change_scene` drops the current scene before
// building the next one, so nothing can reach the old scene afterwards.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};
use rand::rngs::StdRng;

//=== Internal Dependencies ===============================================

use super::{Command, CommandQueue, MenuPayload, Scene, SceneContext, SceneError, SceneInit, SceneKind};
use crate::core::clock::Clock;
use crate::core::geometry::ScreenSize;
use crate::core::input::FrameInput;
use crate::core::render::Renderer;
use crate::scenes;

//=== GameController ======================================================

pub struct GameController {
    current: Option<Box<dyn Scene>>,
    screen: ScreenSize,
    clock: Box<dyn Clock>,
    rng: StdRng,
    commands: CommandQueue,
    running: bool,
}

impl GameController {
    //--- Construction -----------------------------------------------------

    pub fn new(screen: ScreenSize, clock: Box<dyn Clock>, rng: StdRng) -> Self {
        Self {
            current: None,
            screen,
            clock,
            rng,
            commands: CommandQueue::new(),
            running: true,
        }
    }

    /// Enters the main menu with a fresh star field.
    pub fn start(&mut self) -> Result<(), SceneError> {
        self.change_scene(SceneKind::Menu(MenuPayload::default()))
    }

    //--- Queries ----------------------------------------------------------

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_scene_name(&self) -> Option<&'static str> {
        self.current.as_ref().map(|scene| scene.name())
    }

    pub fn current_scene(&self) -> Option<&dyn Scene> {
        self.current.as_deref()
    }

    //--- Transitions ------------------------------------------------------

    /// Discards the current scene and builds `kind` from its payload.
    pub fn change_scene(&mut self, kind: SceneKind) -> Result<(), SceneError> {
        let previous = self.current.take().map(|scene| scene.name());
        info!(
            target: "scene",
            "Scene change: {} -> {}",
            previous.unwrap_or("none"),
            kind.name()
        );

        let init = SceneInit {
            now: self.clock.now_millis(),
            screen: self.screen,
        };
        self.current = Some(scenes::build(kind, &init)?);
        Ok(())
    }

    pub fn quit(&mut self) {
        if self.running {
            info!(target: "scene", "Quit requested");
        }
        self.running = false;
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one scene update, then applies the commands it queued.
    pub fn tick(&mut self, input: &FrameInput) -> Result<(), SceneError> {
        if !self.running {
            return Ok(());
        }

        let now = self.clock.now_millis();
        if let Some(scene) = self.current.as_mut() {
            let mut ctx = SceneContext::new(input, now, self.screen, &mut self.rng, &mut self.commands);
            scene.update(&mut ctx)?;
        }

        self.process_commands()
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        if let Some(scene) = self.current.as_ref() {
            renderer.clear(scene.background());
            scene.render(renderer);
        }
    }

    /// Applies queued commands in FIFO order.
    ///
    /// Later commands apply to whatever scene is current by then; nothing
    /// runs after `Quit`.
    fn process_commands(&mut self) -> Result<(), SceneError> {
        for command in self.commands.take() {
            match command {
                Command::Quit => {
                    self.quit();
                    break;
                }
                Command::ChangeScene(kind) => self.change_scene(kind)?,
                Command::NavigatePage(delta) => {
                    if let Some(scene) = self.current.as_mut() {
                        debug!(target: "scene", "Navigate {} by {}", scene.name(), delta);
                        scene.navigate(delta);
                    }
                }
            }
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::input::{InputEvent, Modifiers, MouseButton};
    use crate::core::render::DisplayList;
    use crate::core::scene::{GamePayload, InheritedGroups};
    use rand::SeedableRng;

    const SCREEN: ScreenSize = ScreenSize::new(800, 600);

    fn controller() -> (GameController, ManualClock) {
        let clock = ManualClock::new(0);
        let controller = GameController::new(
            SCREEN,
            Box::new(clock.clone()),
            StdRng::seed_from_u64(42),
        );
        (controller, clock)
    }

    fn click_at(x: f32, y: f32) -> FrameInput {
        let mut input = FrameInput::new();
        input.apply(&[
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
        input
    }

    //--- Lifecycle --------------------------------------------------------

    #[test]
    fn controller_starts_without_a_scene() {
        let (controller, _) = controller();
        assert_eq!(controller.current_scene_name(), None);
        assert!(controller.is_running());
    }

    #[test]
    fn start_enters_the_menu() {
        let (mut controller, _) = controller();
        controller.start().expect("menu builds");
        assert_eq!(controller.current_scene_name(), Some("menu"));
    }

    #[test]
    fn quit_stops_ticking() {
        let (mut controller, clock) = controller();
        controller.start().expect("menu builds");
        controller.quit();
        assert!(!controller.is_running());

        clock.advance(1_000);
        controller.tick(&FrameInput::new()).expect("no-op tick");
        assert_eq!(controller.current_scene_name(), Some("menu"));
    }

    #[test]
    fn failed_construction_leaves_no_scene() {
        let (mut controller, _) = controller();
        controller.start().expect("menu builds");

        let result = controller.change_scene(SceneKind::Game(GamePayload {
            inherit_groups: InheritedGroups::new(),
            last_star_creation: 0,
        }));

        assert_eq!(result.err(), Some(SceneError::MissingPayloadKey("stars")));
        assert_eq!(controller.current_scene_name(), None);
    }

    //--- Commands ---------------------------------------------------------

    #[test]
    fn quit_button_stops_the_run_loop() {
        let (mut controller, _) = controller();
        controller.start().expect("menu builds");

        // Quit sits at (w / 2, h / 8 * 5 + 120).
        controller.tick(&click_at(400.0, 495.0)).expect("tick");
        assert!(!controller.is_running());
    }

    #[test]
    fn help_button_switches_to_how_to_play() {
        let (mut controller, _) = controller();
        controller.start().expect("menu builds");

        controller.tick(&click_at(400.0, 415.0)).expect("tick");
        assert_eq!(controller.current_scene_name(), Some("how_to_play"));
    }

    #[test]
    fn render_clears_to_scene_background() {
        let (mut controller, _) = controller();
        let mut empty = DisplayList::new();
        controller.render(&mut empty);
        assert!(empty.is_empty());

        controller.start().expect("menu builds");
        let mut list = DisplayList::new();
        controller.render(&mut list);
        assert!(matches!(
            list.commands().first(),
            Some(crate::core::render::DrawCommand::Clear(_))
        ));
    }
}
