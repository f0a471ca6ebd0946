//=========================================================================
// Menu Scene
//=========================================================================
//
// Title plus start / help / quit buttons over the star field. Button
// clicks are the only input that changes state.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::{menu_button, title_text, StarField};
use crate::core::render::Renderer;
use crate::core::scene::kind::{BUTTONS, STARS, TITLE};
use crate::core::scene::{
    Group, MenuPayload, Scene, SceneContext, SceneError, SceneInit, SceneKind, Stage,
    TransitionPayload,
};
use crate::sprite::{ButtonAction, Label};

//=== MenuScene ===========================================================

pub struct MenuScene {
    stage: Stage,
    stars: StarField,
}

impl MenuScene {
    pub fn new(init: &SceneInit, payload: MenuPayload) -> Self {
        let screen = init.screen;
        let (w, h) = (screen.width_f(), screen.height_f());
        let mut stage = Stage::new();

        let title = Label::new(title_text("Star Dodge"), Vec2::new(w / 2.0, h / 6.0));
        stage.create_group(TITLE, [title.into()]);

        let column = h / 8.0 * 5.0;
        stage.create_group(
            BUTTONS,
            [
                menu_button("Start", Vec2::new(w / 2.0, column - 40.0), ButtonAction::StartGame).into(),
                menu_button("Help", Vec2::new(w / 2.0, column + 40.0), ButtonAction::ShowHelp).into(),
                menu_button("Quit", Vec2::new(w / 2.0, column + 120.0), ButtonAction::Quit).into(),
            ],
        );

        stage.insert_group(STARS, payload.stars.unwrap_or_default());

        Self {
            stage,
            stars: StarField::new(payload.last_star_creation.unwrap_or(init.now)),
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }
}

impl Scene for MenuScene {
    fn name(&self) -> &'static str {
        "menu"
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        let actions = self.stage.update(&ctx.frame());
        self.stars.update(&mut self.stage, ctx)?;

        for action in actions {
            match action {
                ButtonAction::StartGame => {
                    let inherit_groups = self.stage.inherit_groups(&[TITLE, BUTTONS, STARS])?;
                    ctx.change_scene(SceneKind::MenuGameTransition(TransitionPayload {
                        inherit_groups,
                        last_star_creation: self.stars.last_star_creation(),
                    }));
                    return Ok(());
                }
                ButtonAction::ShowHelp => ctx.change_scene(SceneKind::HowToPlay),
                ButtonAction::Quit => ctx.quit(),
                other => debug!(target: "scene", "Menu ignores {:?}", other),
            }
        }
        Ok(())
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.stage.render(renderer);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Command;
    use crate::scenes::test_support::Harness;
    use crate::sprite::Star;

    #[test]
    fn fresh_menu_starts_empty_star_field() {
        let scene = MenuScene::new(&Harness::init(100), MenuPayload::default());
        assert_eq!(scene.stage().group(STARS).map(Group::len), Some(0));
        assert_eq!(scene.stage().group(BUTTONS).map(Group::len), Some(3));
    }

    #[test]
    fn carried_stars_are_reused() {
        let stars = Group::with_sprites([Star::new(Vec2::ONE, 0).into()]);
        let id = stars.id();
        let scene = MenuScene::new(
            &Harness::init(100),
            MenuPayload {
                stars: Some(stars),
                last_star_creation: Some(50),
            },
        );
        assert_eq!(scene.stage().group(STARS).map(Group::id), Some(id));
    }

    #[test]
    fn start_hands_title_buttons_and_stars_over() {
        let mut harness = Harness::new();
        let mut scene = MenuScene::new(&Harness::init(0), MenuPayload::default());
        let stars_id = scene.stage().group(STARS).map(Group::id);

        harness.click(400.0, 335.0);
        scene.update(&mut harness.ctx(10)).unwrap();

        let Some(SceneKind::MenuGameTransition(payload)) = harness.take_scene_change() else {
            panic!("expected a transition to MenuGameTransition");
        };
        assert!(payload.inherit_groups.contains(TITLE));
        assert!(payload.inherit_groups.contains(BUTTONS));
        assert_eq!(payload.inherit_groups.get(STARS).map(Group::id), stars_id);
        assert!(!scene.stage().has_group(STARS));
    }

    #[test]
    fn quit_button_queues_quit() {
        let mut harness = Harness::new();
        let mut scene = MenuScene::new(&Harness::init(0), MenuPayload::default());

        harness.click(400.0, 495.0);
        scene.update(&mut harness.ctx(10)).unwrap();
        assert!(matches!(harness.commands.iter().next(), Some(Command::Quit)));
    }

    #[test]
    fn no_click_no_command() {
        let mut harness = Harness::new();
        let mut scene = MenuScene::new(&Harness::init(0), MenuPayload::default());
        scene.update(&mut harness.ctx(10)).unwrap();
        assert!(harness.commands.is_empty());
    }
}
