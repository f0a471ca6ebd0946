//=========================================================================
// Game Scene
//=========================================================================
//
// One round: the player dodges enemies spawned on a tightening schedule.
//
// Per frame:
//   1. star cadence
//   2. collision pass (lethal shape before scoring shape, per enemy)
//   3. spawn check against `spawn_delay(elapsed)`
//   4. elapsed-time label
//   5. group updates (player input, enemy motion)
//
// A lethal hit ends the round and hands `enemy` and `stars` to the
// result screen together with the score snapshot.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::StarField;
use crate::core::render::{Color, Font, FontFace, Renderer, Text};
use crate::core::scene::kind::{ENEMY, PLAYER, STARS};
use crate::core::scene::{
    GamePayload, Group, ResultPayload, Scene, SceneContext, SceneError, SceneInit, SceneKind, Stage,
};
use crate::sprite::{Enemy, EnemySpawn, Hitbox, Player, Sprite};

//=== Constants ===========================================================

/// Points awarded the first time an enemy grazes the scoring zone.
pub const NEAR_MISS_BONUS: u64 = 2_000;

const SPAWN_DELAY_START_MS: f64 = 500.0;
const SPAWN_DELAY_FLOOR_MS: f64 = 100.0;
const SPAWN_CURVE: f64 = 0.000_005;

const SCORE_LABEL: &str = "score_displayer";

//=== Spawn Curve =========================================================

/// Milliseconds between enemy spawns, `elapsed` ms into the round.
///
/// Falls quadratically from 500 ms and bottoms out at 100 ms once
/// `elapsed` passes `sqrt(400 / 0.000005) ≈ 8944` ms.
pub fn spawn_delay(elapsed: u64) -> f64 {
    let t = elapsed as f64;
    (-SPAWN_CURVE * t * t + SPAWN_DELAY_START_MS).max(SPAWN_DELAY_FLOOR_MS)
}

//=== Collision Outcome ===================================================

enum Collision {
    /// Carries the grazes found before the lethal enemy.
    Lethal(Vec<usize>),
    Grazed(Vec<usize>),
}

//=== GameScene ===========================================================

pub struct GameScene {
    stage: Stage,
    stars: StarField,
    started_at: u64,
    score: u64,
    last_spawn: u64,
    score_font: Font,
}

impl GameScene {
    pub fn new(init: &SceneInit, payload: GamePayload) -> Result<Self, SceneError> {
        let GamePayload {
            mut inherit_groups,
            last_star_creation,
        } = payload;
        let screen = init.screen;
        let score_font = Font::new(FontFace::Score, 60);

        let mut stage = Stage::new();
        stage.create_group(PLAYER, [Player::new(screen.center()).into()]);
        stage.add_raw_item(
            Text::new("0", score_font, Color::ORANGE),
            Vec2::new(screen.width_f() / 2.0, screen.height_f() / 8.0),
            SCORE_LABEL,
        );
        stage.insert_group(ENEMY, Group::new());
        stage.insert_group(STARS, inherit_groups.take(STARS)?);

        Ok(Self {
            stage,
            stars: StarField::new(last_star_creation),
            started_at: init.now,
            score: 0,
            last_spawn: 0,
            score_font,
        })
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    fn player(&self) -> Option<&Player> {
        self.stage.group(PLAYER)?.iter().find_map(Sprite::as_player)
    }

    fn player_mut(&mut self) -> Option<&mut Player> {
        self.stage.group_mut(PLAYER)?.iter_mut().find_map(Sprite::as_player_mut)
    }

    //--- Collisions -------------------------------------------------------

    /// Tests every enemy against the player, lethal shape first.
    ///
    /// Stops at the first lethal hit. Grazes before it are still reported.
    fn detect_collisions(&self) -> Collision {
        let mut grazed = Vec::new();
        let (Some(player), Some(enemies)) = (self.player(), self.stage.group(ENEMY)) else {
            return Collision::Grazed(grazed);
        };

        for (index, sprite) in enemies.iter().enumerate() {
            let Some(enemy) = sprite.as_enemy() else {
                continue;
            };
            if player.hits(Hitbox::Normal, enemy) {
                return Collision::Lethal(grazed);
            }
            if !enemy.is_counted() && player.hits(Hitbox::Point, enemy) {
                grazed.push(index);
            }
        }
        Collision::Grazed(grazed)
    }

    fn award_grazes(&mut self, grazed: &[usize]) {
        let Some(enemies) = self.stage.group_mut(ENEMY) else {
            return;
        };
        let mut awarded = 0;
        for &index in grazed {
            let marked = enemies
                .get_mut(index)
                .and_then(Sprite::as_enemy_mut)
                .is_some_and(Enemy::mark_counted);
            if marked {
                awarded += NEAR_MISS_BONUS;
            }
        }
        if awarded > 0 {
            self.score += awarded;
            debug!(target: "game", "Near miss: +{} (score {})", awarded, self.score);
        }
    }

    fn end_round(&mut self, ctx: &mut SceneContext<'_>, elapsed_time: u64) -> Result<(), SceneError> {
        if let Some(player) = self.player_mut() {
            player.kill();
        }

        let total_score = elapsed_time + self.score;
        info!(
            target: "game",
            "Round over after {} ms: score {}, total {}",
            elapsed_time, self.score, total_score
        );

        let inherit_groups = self.stage.inherit_groups(&[ENEMY, STARS])?;
        ctx.change_scene(SceneKind::Result(ResultPayload {
            inherit_groups,
            score: self.score,
            elapsed_time,
            total_score,
            last_star_creation: self.stars.last_star_creation(),
        }));
        Ok(())
    }

    //--- Spawning ---------------------------------------------------------

    fn maybe_spawn(&mut self, ctx: &mut SceneContext<'_>, elapsed: u64) -> Result<(), SceneError> {
        let delay = spawn_delay(elapsed);
        trace!(target: "game", "elapsed {} ms, next spawn at {:.0} ms", elapsed, self.last_spawn as f64 + delay);

        if (elapsed as f64) <= self.last_spawn as f64 + delay {
            return Ok(());
        }

        let aim = self
            .player()
            .map(|player| player.rect().center())
            .unwrap_or_else(|| ctx.screen.center());
        let spawn = EnemySpawn::random(ctx.rng, aim);
        let enemy = Enemy::spawn(ctx.rng, spawn, ctx.screen);
        debug!(target: "game", "Enemy spawned at {:?} aiming for {:?}", enemy.rect().center(), enemy.target());

        self.stage.add_item(ENEMY, enemy)?;
        self.last_spawn = elapsed;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }
}

impl Scene for GameScene {
    fn name(&self) -> &'static str {
        "game"
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        self.stars.update(&mut self.stage, ctx)?;
        let elapsed = ctx.now.saturating_sub(self.started_at);

        match self.detect_collisions() {
            Collision::Lethal(grazed) => {
                self.award_grazes(&grazed);
                return self.end_round(ctx, elapsed);
            }
            Collision::Grazed(grazed) => self.award_grazes(&grazed),
        }

        self.maybe_spawn(ctx, elapsed)?;

        if let Some(label) = self.stage.raw_mut(SCORE_LABEL) {
            label.text = Text::new(elapsed.to_string(), self.score_font, Color::ORANGE);
        }

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
