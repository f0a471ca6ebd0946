//=========================================================================
// Result Scene
//=========================================================================
//
// Score reveal after a lethal hit, over the frozen enemies and the
// still-running star field.
//
// Phases (forward only):
//   SlidingIn ──▶ AnimatingTime ──▶ AnimatingAction ──▶ Finished
//
// - SlidingIn: every overlay starts one `move_length` below its rest
//   position and rises linearly for `SLIDE_DURATION` ms.
// - AnimatingTime: the time counter counts up in `COUNT_CHUNK` steps
//   every `COUNT_INTERVAL` ms, the last step clamped to the exact value.
// - AnimatingAction: after `ACTION_HOLD` ms, same for the action counter.
// - Finished: restart / menu / quit buttons appear.
//
// The total counter accrues in lockstep with whichever counter is moving.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::{menu_button, title_text, StarField};
use crate::core::geometry::ScreenSize;
use crate::core::render::{Color, Font, FontFace, Renderer, Text};
use crate::core::scene::kind::{BUTTONS, ENEMY, STARS, TITLE};
use crate::core::scene::{
    GamePayload, MenuPayload, ResultPayload, Scene, SceneContext, SceneError, SceneInit, SceneKind,
    Stage,
};
use crate::sprite::{ButtonAction, Label};

//=== Constants ===========================================================

const SLIDE_DURATION: u64 = 1_500;
const COUNT_CHUNK: u64 = 100;
const COUNT_INTERVAL: u64 = 20;
const ACTION_HOLD: u64 = 300;

//--- Overlay Names -------------------------------------------------------

const TOTAL_VALUE: &str = "score_displayer";
const TOTAL_CAPTION: &str = "score_comment_overall";
const TIME_CAPTION: &str = "score_comment_time";
const ACTION_CAPTION: &str = "score_comment_action";
const TIME_VALUE: &str = "score_splitted_time";
const ACTION_VALUE: &str = "score_splitted_action";

/// Overlay whose rest position defines the slide distance.
const SLIDE_ANCHOR: &str = TIME_VALUE;

//=== RevealPhase =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RevealPhase {
    SlidingIn,
    AnimatingTime,
    AnimatingAction,
    Finished,
}

//=== CountUp =============================================================

/// Display counter ramping toward a fixed target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CountUp {
    shown: u64,
    target: u64,
}

impl CountUp {
    fn new(target: u64) -> Self {
        Self { shown: 0, target }
    }

    /// Advances one chunk. Returns the amount added and whether this was
    /// the final, clamped step.
    fn step(&mut self) -> (u64, bool) {
        if self.shown + COUNT_CHUNK > self.target {
            let rest = self.target - self.shown;
            self.shown = self.target;
            (rest, true)
        } else {
            self.shown += COUNT_CHUNK;
            (COUNT_CHUNK, false)
        }
    }
}

//=== ResultScene =========================================================

pub struct ResultScene {
    stage: Stage,
    stars: StarField,
    phase: RevealPhase,

    //--- Score Snapshot ---------------------------------------------------
    score: u64,
    elapsed_time: u64,
    total_score: u64,

    //--- Counters ---------------------------------------------------------
    time_counter: CountUp,
    action_counter: CountUp,
    shown_total: u64,
    last_step_at: u64,
    time_finished_at: u64,

    //--- Slide-in ---------------------------------------------------------
    started_at: u64,
    move_length: f32,
    rest_positions: Vec<(&'static str, Vec2)>,

    screen: ScreenSize,
}

impl ResultScene {
    pub fn new(init: &SceneInit, payload: ResultPayload) -> Result<Self, SceneError> {
        let ResultPayload {
            mut inherit_groups,
            score,
            elapsed_time,
            total_score,
            last_star_creation,
        } = payload;
        let screen = init.screen;
        let (w, h) = (screen.width_f(), screen.height_f());

        let mut enemies = inherit_groups.take(ENEMY)?;
        let stars = inherit_groups.take(STARS)?;
        for enemy in enemies.iter_mut().filter_map(|sprite| sprite.as_enemy_mut()) {
            enemy.freeze();
        }

        let mut stage = Stage::new();
        stage.insert_group(ENEMY, enemies);
        stage.insert_group(STARS, stars);
        let title = Label::new(title_text("Game Over"), Vec2::new(w / 2.0, h / 5.0));
        stage.create_group(TITLE, [title.into()]);

        //--- Overlays -----------------------------------------------------
        let value_font = Font::new(FontFace::Score, 40);
        let caption_font = Font::new(FontFace::Title, 40);
        let caption_color = Color::RED.darken_red(50);
        let top = h / 5.0;

        let rest_positions = vec![
            (TOTAL_VALUE, Vec2::new(w / 2.0, top + 100.0)),
            (TOTAL_CAPTION, Vec2::new(w / 2.0, top + 70.0)),
            (TIME_CAPTION, Vec2::new(w / 4.0, top + 170.0)),
            (ACTION_CAPTION, Vec2::new(w / 4.0 * 3.0, top + 170.0)),
            (TIME_VALUE, Vec2::new(w / 4.0, top + 200.0)),
            (ACTION_VALUE, Vec2::new(w / 4.0 * 3.0, top + 200.0)),
        ];
        let texts = [
            Text::new("0", value_font, Color::ORANGE),
            Text::new("Total", caption_font, caption_color),
            Text::new("Time", caption_font, caption_color),
            Text::new("Action", caption_font, caption_color),
            Text::new("0", value_font, Color::ORANGE),
            Text::new("0", value_font, Color::ORANGE),
        ];

        let anchor_height = texts[4].measure().y;
        let anchor_rest = rest_positions
            .iter()
            .find(|(name, _)| *name == SLIDE_ANCHOR)
            .map_or(top + 200.0, |(_, position)| position.y);
        let move_length = h - (anchor_rest - anchor_height / 2.0);

        for ((name, rest), text) in rest_positions.iter().zip(texts) {
            stage.add_raw_item(text, *rest + Vec2::new(0.0, move_length), name);
        }

        Ok(Self {
            stage,
            stars: StarField::new(last_star_creation),
            phase: RevealPhase::SlidingIn,
            score,
            elapsed_time,
            total_score,
            time_counter: CountUp::new(elapsed_time),
            action_counter: CountUp::new(score),
            shown_total: 0,
            last_step_at: init.now,
            time_finished_at: init.now,
            started_at: init.now,
            move_length,
            rest_positions,
            screen,
        })
    }

    //--- Queries ----------------------------------------------------------

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_animation_finished(&self) -> bool {
        self.phase == RevealPhase::Finished
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    /// `(elapsed_time, score)` of the finished round.
    pub fn round_scores(&self) -> (u64, u64) {
        (self.elapsed_time, self.score)
    }

    /// `(time, action, total)` as currently displayed.
    pub fn shown_scores(&self) -> (u64, u64, u64) {
        (self.time_counter.shown, self.action_counter.shown, self.shown_total)
    }

    //--- Phases -----------------------------------------------------------

    fn slide_in(&mut self, now: u64) {
        let elapsed = now.saturating_sub(self.started_at).min(SLIDE_DURATION);
        let speed = self.move_length / SLIDE_DURATION as f32;
        let remaining = (self.move_length - speed * elapsed as f32).max(0.0);
        let done = elapsed >= SLIDE_DURATION;

        for &(name, rest) in &self.rest_positions {
            if let Some(item) = self.stage.raw_mut(name) {
                item.position = if done { rest } else { rest + Vec2::new(0.0, remaining) };
            }
        }

        if done {
            debug!(target: "scene", "Result overlays in place");
            self.phase = RevealPhase::AnimatingTime;
            self.last_step_at = now;
        }
    }

    fn count_up(&mut self, now: u64) {
        match self.phase {
            RevealPhase::AnimatingTime => {
                if now.saturating_sub(self.last_step_at) < COUNT_INTERVAL {
                    return;
                }
                let (added, finished) = self.time_counter.step();
                self.shown_total += added;
                self.last_step_at = now;
                if finished {
                    self.time_finished_at = now;
                    self.phase = RevealPhase::AnimatingAction;
                }
            }
            RevealPhase::AnimatingAction => {
                if now.saturating_sub(self.time_finished_at) < ACTION_HOLD
                    || now.saturating_sub(self.last_step_at) < COUNT_INTERVAL
                {
                    return;
                }
                let (added, finished) = self.action_counter.step();
                self.shown_total += added;
                self.last_step_at = now;
                if finished {
                    self.finish();
                }
            }
            RevealPhase::SlidingIn | RevealPhase::Finished => {}
        }
    }

    fn finish(&mut self) {
        let w = self.screen.width_f() / 2.0;
        let h = self.screen.height_f() / 8.0 * 5.0;
        self.stage.create_group(
            BUTTONS,
            [
                menu_button("Restart", Vec2::new(w, h - 40.0), ButtonAction::Restart).into(),
                menu_button("Menu", Vec2::new(w, h + 40.0), ButtonAction::BackToMenu).into(),
                menu_button("Quit", Vec2::new(w, h + 120.0), ButtonAction::Quit).into(),
            ],
        );
        self.phase = RevealPhase::Finished;
        debug!(target: "scene", "Result animation finished at total {}", self.shown_total);
    }

    fn refresh_counters(&mut self) {
        let values = [
            (TOTAL_VALUE, self.shown_total),
            (TIME_VALUE, self.time_counter.shown),
            (ACTION_VALUE, self.action_counter.shown),
        ];
        for (name, value) in values {
            if let Some(item) = self.stage.raw_mut(name) {
                item.text.set_content(value.to_string());
            }
        }
    }

    fn handle(&mut self, action: ButtonAction, ctx: &mut SceneContext<'_>) -> Result<bool, SceneError> {
        let last_star_creation = self.stars.last_star_creation();
        match action {
            ButtonAction::Restart => {
                let inherit_groups = self.stage.inherit_groups(&[STARS])?;
                ctx.change_scene(SceneKind::Game(GamePayload {
                    inherit_groups,
                    last_star_creation,
                }));
                Ok(true)
            }
            ButtonAction::BackToMenu => {
                let stars = self
                    .stage
                    .remove_group(STARS)
                    .ok_or(SceneError::UnknownGroup(STARS.to_owned()))?;
                ctx.change_scene(SceneKind::Menu(MenuPayload {
                    stars: Some(stars),
                    last_star_creation: Some(last_star_creation),
                }));
                Ok(true)
            }
            ButtonAction::Quit => {
                ctx.quit();
                Ok(true)
            }
            other => {
                debug!(target: "scene", "Result ignores {:?}", other);
                Ok(false)
            }
        }
    }
}

impl Scene for ResultScene {
    fn name(&self) -> &'static str {
        "result"
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        self.stars.update(&mut self.stage, ctx)?;
        let actions = self.stage.update(&ctx.frame());
        for action in actions {
            if self.handle(action, ctx)? {
                return Ok(());
            }
        }

        if self.phase == RevealPhase::SlidingIn {
            self.slide_in(ctx.now);
        } else {
            self.count_up(ctx.now);
            self.refresh_counters();
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
    use crate::core::scene::{Group, InheritedGroups};
    use crate::scenes::test_support::{Harness, SCREEN};
    use crate::sprite::{Enemy, Star};

    fn new_result(now: u64, elapsed_time: u64, score: u64) -> ResultScene {
        let mut inherit_groups = InheritedGroups::new();
        inherit_groups.insert(ENEMY, Group::new());
        inherit_groups.insert(STARS, Group::new());
        ResultScene::new(
            &Harness::init(now),
            ResultPayload {
                inherit_groups,
                score,
                elapsed_time,
                total_score: elapsed_time + score,
                last_star_creation: now,
            },
        )
        .unwrap()
    }

    fn shown(scene: &ResultScene, name: &str) -> String {
        scene.stage().raw(name).expect("overlay exists").text.content.clone()
    }

    //--- CountUp ----------------------------------------------------------

    #[test]
    fn count_up_clamps_last_step() {
        let mut counter = CountUp::new(250);
        assert_eq!(counter.step(), (100, false));
        assert_eq!(counter.step(), (100, false));
        assert_eq!(counter.step(), (50, true));
        assert_eq!(counter.shown, 250);
    }

    #[test]
    fn count_up_on_zero_target_finishes_immediately() {
        let mut counter = CountUp::new(0);
        assert_eq!(counter.step(), (0, true));
    }

    //--- Construction -----------------------------------------------------

    #[test]
    fn missing_enemy_group_fails_construction() {
        let mut inherit_groups = InheritedGroups::new();
        inherit_groups.insert(STARS, Group::new());
        let result = ResultScene::new(
            &Harness::init(0),
            ResultPayload {
                inherit_groups,
                score: 0,
                elapsed_time: 0,
                total_score: 0,
                last_star_creation: 0,
            },
        );
        assert_eq!(result.err(), Some(SceneError::MissingPayloadKey(ENEMY)));
    }

    #[test]
    fn inherited_enemies_are_frozen() {
        let mut inherit_groups = InheritedGroups::new();
        inherit_groups.insert(
            ENEMY,
            Group::with_sprites([Enemy::new(
                Vec2::new(100.0, 100.0),
                crate::sprite::EnemySpawn {
                    velocity: Vec2::ZERO,
                    target: Vec2::new(400.0, 100.0),
                    bounce_x: false,
                    bounce_y: false,
                },
                SCREEN,
            )
            .into()]),
        );
        inherit_groups.insert(STARS, Group::with_sprites([Star::new(Vec2::ONE, 0).into()]));

        let mut scene = ResultScene::new(
            &Harness::init(0),
            ResultPayload {
                inherit_groups,
                score: 0,
                elapsed_time: 0,
                total_score: 0,
                last_star_creation: 0,
            },
        )
        .unwrap();

        let before = scene.stage().group(ENEMY).and_then(|g| g.get(0)).map(|s| s.rect());
        let mut harness = Harness::new();
        scene.update(&mut harness.ctx(16)).unwrap();
        let after = scene.stage().group(ENEMY).and_then(|g| g.get(0)).map(|s| s.rect());
        assert_eq!(before, after);
    }

    //--- Slide-in ---------------------------------------------------------

    #[test]
    fn overlays_start_below_and_rise_to_rest() {
        let mut harness = Harness::new();
        let mut scene = new_result(0, 250, 0);
        let start = scene.stage().raw(TIME_VALUE).map(|item| item.position.y);
        let rest = SCREEN.height_f() / 5.0 + 200.0;
        assert!(start.is_some_and(|y| y > rest));

        scene.update(&mut harness.ctx(750)).unwrap();
        let halfway = scene.stage().raw(TIME_VALUE).map(|item| item.position.y);
        assert!(halfway.is_some_and(|y| y > rest && Some(y) < start));
        assert_eq!(scene.phase(), RevealPhase::SlidingIn);

        scene.update(&mut harness.ctx(1_500)).unwrap();
        assert_eq!(scene.stage().raw(TIME_VALUE).map(|item| item.position.y), Some(rest));
        assert_eq!(scene.phase(), RevealPhase::AnimatingTime);
    }

    //--- Count-up ---------------------------------------------------------

    #[test]
    fn time_counter_steps_to_exact_value() {
        let mut harness = Harness::new();
        let mut scene = new_result(0, 250, 0);
        scene.update(&mut harness.ctx(1_500)).unwrap();

        let mut seen = vec![shown(&scene, TIME_VALUE)];
        for now in [1_520, 1_540, 1_560] {
            scene.update(&mut harness.ctx(now)).unwrap();
            seen.push(shown(&scene, TIME_VALUE));
        }
        assert_eq!(seen, vec!["0", "100", "200", "250"]);
        assert_eq!(scene.phase(), RevealPhase::AnimatingAction);
        assert_eq!(shown(&scene, TOTAL_VALUE), "250");
    }

    #[test]
    fn steps_wait_for_the_interval() {
        let mut harness = Harness::new();
        let mut scene = new_result(0, 1_000, 0);
        scene.update(&mut harness.ctx(1_500)).unwrap();
        scene.update(&mut harness.ctx(1_519)).unwrap();
        assert_eq!(scene.shown_scores().0, 0);
        scene.update(&mut harness.ctx(1_520)).unwrap();
        assert_eq!(scene.shown_scores().0, 100);
    }

    #[test]
    fn action_counter_waits_for_hold_even_when_small() {
        let mut harness = Harness::new();
        let mut scene = new_result(0, 50, 60);
        scene.update(&mut harness.ctx(1_500)).unwrap();
        scene.update(&mut harness.ctx(1_520)).unwrap();
        assert_eq!(scene.phase(), RevealPhase::AnimatingAction);

        scene.update(&mut harness.ctx(1_520 + ACTION_HOLD - 1)).unwrap();
        assert_eq!(scene.shown_scores().1, 0);

        scene.update(&mut harness.ctx(1_520 + ACTION_HOLD)).unwrap();
        assert_eq!(scene.shown_scores(), (50, 60, 110));
        assert!(scene.is_animation_finished());
    }

    #[test]
    fn buttons_appear_only_when_finished() {
        let mut harness = Harness::new();
        let mut scene = new_result(0, 100, 2_000);
        let mut now = 0;
        while !scene.is_animation_finished() {
            assert!(!scene.stage().has_group(BUTTONS));
            scene.update(&mut harness.ctx(now)).unwrap();
            now += 10;
            assert!(now < 10_000, "animation never finished");
        }
        assert_eq!(scene.stage().group(BUTTONS).map(Group::len), Some(3));
        let (elapsed_time, score) = scene.round_scores();
        assert_eq!(scene.shown_scores(), (elapsed_time, score, scene.total_score()));
    }

    #[test]
    fn phases_only_move_forward() {
        let mut harness = Harness::new();
        let mut scene = new_result(0, 300, 300);
        let mut last = scene.phase();
        for now in (0..5_000).step_by(7) {
            scene.update(&mut harness.ctx(now)).unwrap();
            assert!(scene.phase() >= last);
            last = scene.phase();
        }
        assert_eq!(last, RevealPhase::Finished);
    }

    //--- Buttons ----------------------------------------------------------

    #[test]
    fn restart_hands_stars_to_a_new_round() {
        let mut harness = Harness::new();
        let mut scene = new_result(0, 0, 0);
        let stars_id = scene.stage().group(STARS).map(Group::id);
        let mut now = 0;
        while !scene.is_animation_finished() {
            scene.update(&mut harness.ctx(now)).unwrap();
            now += 20;
        }

        harness.click(400.0, 335.0);
        scene.update(&mut harness.ctx(now)).unwrap();
        match harness.take_scene_change() {
            Some(SceneKind::Game(payload)) => {
                assert_eq!(payload.inherit_groups.get(STARS).map(Group::id), stars_id);
            }
            other => panic!("expected GameScene, got {:?}", other),
        }
    }

    #[test]
    fn menu_button_returns_with_stars() {
        let mut harness = Harness::new();
        let mut scene = new_result(0, 0, 0);
        let stars_id = scene.stage().group(STARS).map(Group::id);
        let mut now = 0;
        while !scene.is_animation_finished() {
            scene.update(&mut harness.ctx(now)).unwrap();
            now += 20;
        }

        harness.click(400.0, 415.0);
        scene.update(&mut harness.ctx(now)).unwrap();
        match harness.take_scene_change() {
            Some(SceneKind::Menu(payload)) => {
                assert_eq!(payload.stars.as_ref().map(Group::id), stars_id);
                assert!(payload.last_star_creation.is_some());
            }
            other => panic!("expected MenuScene, got {:?}", other),
        }
    }
}
