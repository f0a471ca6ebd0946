//=========================================================================
// Menu → Game Transition
//=========================================================================
//
// Pushes the inherited title up and the inherited buttons down with an
// accelerating push, then waits `TRANSITION_FINISH_DELAY` on the bare
// star field before starting the round.
//
// Timeline:
//   entry ── push title/buttons ── both groups gone ── +500 ms ── Game
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::StarField;
use crate::core::render::Renderer;
use crate::core::scene::kind::{BUTTONS, STARS, TITLE};
use crate::core::scene::{
    GamePayload, Scene, SceneContext, SceneError, SceneInit, SceneKind, Stage, TransitionPayload,
};

//=== Constants ===========================================================

const PUSH_BASE: f64 = 1.0042;
const PUSH_OFFSET_MS: f64 = 100.0;

/// Pause between the menu leaving the screen and the round starting.
pub const TRANSITION_FINISH_DELAY: u64 = 500;

/// Per-frame push in pixels, `t` ms after the transition began.
pub fn push_power(t: u64) -> f32 {
    PUSH_BASE.powf(t as f64 + PUSH_OFFSET_MS) as f32
}

//=== MenuGameTransition ==================================================

pub struct MenuGameTransition {
    stage: Stage,
    stars: StarField,
    started_at: u64,
    finished_at: Option<u64>,
}

impl MenuGameTransition {
    pub fn new(init: &SceneInit, payload: TransitionPayload) -> Result<Self, SceneError> {
        let TransitionPayload {
            mut inherit_groups,
            last_star_creation,
        } = payload;

        let title = inherit_groups.take(TITLE)?;
        let mut buttons = inherit_groups.take(BUTTONS)?;
        let stars = inherit_groups.take(STARS)?;

        for button in buttons.iter_mut().filter_map(|sprite| sprite.as_button_mut()) {
            button.set_disabled(true);
        }

        let mut stage = Stage::new();
        stage.insert_group(TITLE, title);
        stage.insert_group(BUTTONS, buttons);
        stage.insert_group(STARS, stars);

        Ok(Self {
            stage,
            stars: StarField::new(last_star_creation),
            started_at: init.now,
            finished_at: None,
        })
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Slides both menu groups one frame further off-screen.
    fn push_menu(&mut self, now: u64, screen_height: f32) {
        let power = push_power(now.saturating_sub(self.started_at));

        if let Some(title) = self.stage.group_mut(TITLE) {
            for sprite in title.iter_mut() {
                sprite.translate(Vec2::new(0.0, -power));
            }
            title.retain(|sprite| sprite.rect().bottom() >= 0.0);
        }

        if let Some(buttons) = self.stage.group_mut(BUTTONS) {
            for sprite in buttons.iter_mut() {
                if let Some(button) = sprite.as_button_mut() {
                    button.set_disabled(true);
                }
                sprite.translate(Vec2::new(0.0, power));
            }
            buttons.retain(|sprite| sprite.rect().top() <= screen_height);
        }
    }
}

impl Scene for MenuGameTransition {
    fn name(&self) -> &'static str {
        "menu_game_transition"
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        self.stars.update(&mut self.stage, ctx)?;
        self.stage.drop_empty_groups(&[TITLE, BUTTONS]);

        if !self.stage.has_group(TITLE) && !self.stage.has_group(BUTTONS) {
            match self.finished_at {
                None => {
                    debug!(target: "scene", "Menu cleared at {} ms", ctx.now);
                    self.finished_at = Some(ctx.now);
                }
                Some(finished_at) if ctx.now.saturating_sub(finished_at) >= TRANSITION_FINISH_DELAY => {
                    let inherit_groups = self.stage.inherit_groups(&[STARS])?;
                    ctx.change_scene(SceneKind::Game(GamePayload {
                        inherit_groups,
                        last_star_creation: self.stars.last_star_creation(),
                    }));
                    return Ok(());
                }
                Some(_) => {}
            }
        }

        self.push_menu(ctx.now, ctx.screen.height_f());
        self.stage.update(&ctx.frame());
        Ok(())
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.stage.render(renderer);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
