//=========================================================================
// Scenes
//=========================================================================
//
// The game's five screens and the factory the controller builds them
// with.
//
// Components:
// - `menu`: title screen with start/help/quit
// - `menu_transition`: slides the menu away before a round
// - `game`: the round itself (spawning, collisions, scoring)
// - `result`: score reveal after a lethal hit
// - `how_to_play`: paged instructions
// - `star_field`: background star cadence shared by the dark scenes
//
//=========================================================================

//=== Module Declarations =================================================

mod game;
mod how_to_play;
mod menu;
mod menu_transition;
mod result;
mod star_field;

#[cfg(test)]
mod test_support;

//=== Public API ==========================================================

pub use game::{spawn_delay, GameScene, NEAR_MISS_BONUS};
pub use how_to_play::{HowToPlayScene, PAGE_COUNT};
pub use menu::MenuScene;
pub use menu_transition::{push_power, MenuGameTransition, TRANSITION_FINISH_DELAY};
pub use result::{RevealPhase, ResultScene};
pub use star_field::{StarField, STAR_EFFECT_DELAY};

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::render::{Color, Font, FontFace, Text};
use crate::core::scene::{Scene, SceneError, SceneInit, SceneKind};
use crate::sprite::{Button, ButtonAction, ButtonColors};

//=== Factory =============================================================

/// Constructs the scene `kind` describes, consuming its payload.
pub(crate) fn build(kind: SceneKind, init: &SceneInit) -> Result<Box<dyn Scene>, SceneError> {
    Ok(match kind {
        SceneKind::Menu(payload) => Box::new(MenuScene::new(init, payload)),
        SceneKind::MenuGameTransition(payload) => Box::new(MenuGameTransition::new(init, payload)?),
        SceneKind::Game(payload) => Box::new(GameScene::new(init, payload)?),
        SceneKind::Result(payload) => Box::new(ResultScene::new(init, payload)?),
        SceneKind::HowToPlay => Box::new(HowToPlayScene::new(init)),
    })
}

//=== Shared Widgets ======================================================

const MENU_BUTTON_SIZE: Vec2 = Vec2::new(200.0, 50.0);
const MENU_BUTTON_FONT: Font = Font::new(FontFace::Button, 30);

/// Large orange heading with a lighter drop shadow.
fn title_text(content: &str) -> Text {
    Text::new(content, Font::new(FontFace::Title, 40), Color::ORANGE)
        .with_shadow(Color::ORANGE.lighten(20), Vec2::new(2.0, 2.0))
}

/// 200×50 orange button used by the menu and result screens.
fn menu_button(label: &str, center: Vec2, action: ButtonAction) -> Button {
    Button::new(
        MENU_BUTTON_SIZE,
        center,
        ButtonColors::MENU,
        Text::new(label, MENU_BUTTON_FONT, Color::WHITE),
        action,
    )
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::test_support::Harness;
    use super::*;
    use crate::core::scene::kind::{ENEMY, PLAYER, STARS};
    use crate::core::scene::{Group, MenuPayload};
    use crate::sprite::Enemy;

    /// Menu → transition → round → result, following the star field.
    #[test]
    fn star_field_survives_every_hop() {
        let mut harness = Harness::new();

        let mut menu = MenuScene::new(&Harness::init(0), MenuPayload::default());
        let stars_id = menu.stage().group(STARS).map(Group::id);
        harness.click(400.0, 335.0);
        menu.update(&mut harness.ctx(0)).unwrap();
        harness.release_input();
        let Some(SceneKind::MenuGameTransition(payload)) = harness.take_scene_change() else {
            panic!("menu did not start the transition");
        };

        let mut transition = MenuGameTransition::new(&Harness::init(0), payload).unwrap();
        let mut now = 0;
        let game_payload = loop {
            transition.update(&mut harness.ctx(now)).unwrap();
            if let Some(SceneKind::Game(payload)) = harness.take_scene_change() {
                break payload;
            }
            now += 16;
            assert!(now < 60_000, "transition never finished");
        };
        assert_eq!(game_payload.inherit_groups.get(STARS).map(Group::id), stars_id);

        let mut game = GameScene::new(&Harness::init(now), game_payload).unwrap();
        assert_eq!(game.stage().group(STARS).map(Group::id), stars_id);
        let center = game.stage().group(PLAYER).and_then(|g| g.get(0)).map(|s| s.rect().center());
        let center = center.expect("player present");
        game.stage_mut().add_item(ENEMY, Enemy::frozen_at(center)).unwrap();
        game.update(&mut harness.ctx(now + 1)).unwrap();
        let Some(SceneKind::Result(result_payload)) = harness.take_scene_change() else {
            panic!("lethal overlap did not end the round");
        };
        assert_eq!(result_payload.inherit_groups.get(STARS).map(Group::id), stars_id);

        let result = ResultScene::new(&Harness::init(now + 1), result_payload).unwrap();
        assert_eq!(result.stage().group(STARS).map(Group::id), stars_id);
    }

    #[test]
    fn build_reports_missing_groups() {
        let kind = SceneKind::Game(crate::core::scene::GamePayload {
            inherit_groups: crate::core::scene::InheritedGroups::new(),
            last_star_creation: 0,
        });
        assert!(matches!(
            build(kind, &Harness::init(0)),
            Err(crate::core::scene::SceneError::MissingPayloadKey(STARS))
        ));
    }

    #[test]
    fn build_names_each_scene() {
        let init = Harness::init(0);
        let menu = build(SceneKind::Menu(MenuPayload::default()), &init).unwrap();
        let help = build(SceneKind::HowToPlay, &init).unwrap();
        assert_eq!(menu.name(), "menu");
        assert_eq!(help.name(), "how_to_play");
    }
}
