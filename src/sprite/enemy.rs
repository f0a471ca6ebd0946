//=========================================================================
// Enemy
//=========================================================================
//
// Round hazard spawned by the game scene.
//
// Motion: an enemy appears just outside a random screen edge and heads
// for a target point picked near the player at spawn time. Its random
// velocity is applied as a sideways drift on top of that heading.
//
// Behavior flags:
// - `bounce_x`: reflect off the left/right screen edges
// - `bounce_y`: reflect off the top/bottom screen edges
// Both share a budget of `MAX_BOUNCES` reflections, after which the
// enemy leaves the screen and is pruned.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::collision::Mask;
use crate::core::geometry::{Rect, ScreenSize};
use crate::core::render::{Color, Renderer};

//=== Constants ===========================================================

/// Diameter of an enemy, in pixels.
pub const ENEMY_SIZE: u32 = 20;

const ENEMY_SPEED: f32 = 4.0;
const DRIFT_SCALE: f32 = 0.25;
const MAX_BOUNCES: u8 = 3;

/// Per-axis bound of the random velocity.
const VELOCITY_RANGE: f32 = 5.0;

/// Per-axis bound of the target's distance from the player.
const TARGET_RANGE: f32 = 50.0;

/// Enemies that never made it on screen are dropped past this margin.
const STRAY_MARGIN: f32 = 200.0;

//=== EnemySpawn ==========================================================

/// Randomized parameters rolled once per enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    pub velocity: Vec2,
    pub target: Vec2,
    pub bounce_x: bool,
    pub bounce_y: bool,
}

impl EnemySpawn {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, player_center: Vec2) -> Self {
        let velocity = Vec2::new(
            rng.random_range(-VELOCITY_RANGE..=VELOCITY_RANGE),
            rng.random_range(-VELOCITY_RANGE..=VELOCITY_RANGE),
        );
        let target = player_center
            + Vec2::new(
                rng.random_range(-TARGET_RANGE..=TARGET_RANGE),
                rng.random_range(-TARGET_RANGE..=TARGET_RANGE),
            );
        Self {
            velocity,
            target,
            bounce_x: rng.random_bool(0.5),
            bounce_y: rng.random_bool(0.5),
        }
    }
}

//=== Enemy ===============================================================

#[derive(Debug, Clone)]
pub struct Enemy {
    rect: Rect,
    velocity: Vec2,
    heading: Vec2,
    target: Vec2,
    bounce_x: bool,
    bounce_y: bool,
    bounces_left: u8,
    bounds: Rect,
    mask: Mask,
    color: Color,

    //--- Lifecycle --------------------------------------------------------
    counted: bool,
    entered: bool,
    frozen: bool,
    alive: bool,
}

impl Enemy {
    /// Places a new enemy just outside a random edge of the screen.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, spawn: EnemySpawn, screen: ScreenSize) -> Self {
        let size = ENEMY_SIZE as f32;
        let half = size / 2.0;
        let (w, h) = (screen.width_f(), screen.height_f());

        let center = match rng.random_range(0..4) {
            0 => Vec2::new(rng.random_range(0.0..=w), -half),
            1 => Vec2::new(rng.random_range(0.0..=w), h + half),
            2 => Vec2::new(-half, rng.random_range(0.0..=h)),
            _ => Vec2::new(w + half, rng.random_range(0.0..=h)),
        };
        Self::new(center, spawn, screen)
    }

    pub fn new(center: Vec2, spawn: EnemySpawn, screen: ScreenSize) -> Self {
        let size = ENEMY_SIZE as f32;
        let radius = size / 2.0;
        let heading = (spawn.target - center)
            .try_normalize()
            .or_else(|| (screen.center() - center).try_normalize())
            .unwrap_or(Vec2::Y);

        Self {
            rect: Rect::from_center(center, Vec2::splat(size)),
            velocity: spawn.velocity,
            heading,
            target: spawn.target,
            bounce_x: spawn.bounce_x,
            bounce_y: spawn.bounce_y,
            bounces_left: MAX_BOUNCES,
            bounds: screen.bounds(),
            mask: Mask::from_fn(ENEMY_SIZE, ENEMY_SIZE, |x, y| {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                dx * dx + dy * dy <= radius * radius
            }),
            color: Color::RED,
            counted: false,
            entered: false,
            frozen: false,
            alive: true,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    //--- Scoring ----------------------------------------------------------

    pub fn is_counted(&self) -> bool {
        self.counted
    }

    /// Flags the enemy as scored. Returns `false` if it already was.
    pub fn mark_counted(&mut self) -> bool {
        !std::mem::replace(&mut self.counted, true)
    }

    //--- Motion -----------------------------------------------------------

    /// Stops all motion and pruning; used once the round is over.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Displacement applied on the next update.
    pub fn step(&self) -> Vec2 {
        self.heading * ENEMY_SPEED + self.velocity * DRIFT_SCALE
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.rect.translate(delta);
    }

    pub fn update(&mut self) {
        if self.frozen || !self.alive {
            return;
        }

        self.rect.translate(self.step());
        self.bounce();

        let on_screen = self.rect.intersects(&self.bounds);
        if on_screen {
            self.entered = true;
        } else if self.entered || !self.within_stray_margin() {
            self.alive = false;
        }
    }

    fn bounce(&mut self) {
        if !self.entered || self.bounces_left == 0 {
            return;
        }

        let step = self.step();
        let hit_x = (self.rect.left() < self.bounds.left() && step.x < 0.0)
            || (self.rect.right() > self.bounds.right() && step.x > 0.0);
        if self.bounce_x && hit_x {
            self.heading.x = -self.heading.x;
            self.velocity.x = -self.velocity.x;
            self.bounces_left -= 1;
        }

        if self.bounces_left == 0 {
            return;
        }

        let step = self.step();
        let hit_y = (self.rect.top() < self.bounds.top() && step.y < 0.0)
            || (self.rect.bottom() > self.bounds.bottom() && step.y > 0.0);
        if self.bounce_y && hit_y {
            self.heading.y = -self.heading.y;
            self.velocity.y = -self.velocity.y;
            self.bounces_left -= 1;
        }
    }

    fn within_stray_margin(&self) -> bool {
        let reach = Rect::new(
            self.bounds.x - STRAY_MARGIN,
            self.bounds.y - STRAY_MARGIN,
            self.bounds.w + STRAY_MARGIN * 2.0,
            self.bounds.h + STRAY_MARGIN * 2.0,
        );
        self.rect.intersects(&reach)
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw_rounded_rect(self.rect.size(), self.rect.center(), self.color);
    }

    /// Motionless enemy centered at `center`, for collision tests.
    #[cfg(test)]
    pub(crate) fn frozen_at(center: Vec2) -> Self {
        let spawn = EnemySpawn {
            velocity: Vec2::ZERO,
            target: center + Vec2::X,
            bounce_x: false,
            bounce_y: false,
        };
        let mut enemy = Self::new(center, spawn, ScreenSize::new(800, 600));
        enemy.freeze();
        enemy
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCREEN: ScreenSize = ScreenSize::new(800, 600);

    fn spawn_toward(target: Vec2, bounce_x: bool, bounce_y: bool) -> EnemySpawn {
        EnemySpawn {
            velocity: Vec2::ZERO,
            target,
            bounce_x,
            bounce_y,
        }
    }

    //--- Spawning ---------------------------------------------------------

    #[test]
    fn random_spawn_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let player = SCREEN.center();
        for _ in 0..200 {
            let spawn = EnemySpawn::random(&mut rng, player);
            assert!(spawn.velocity.x.abs() <= VELOCITY_RANGE);
            assert!(spawn.velocity.y.abs() <= VELOCITY_RANGE);
            assert!((spawn.target - player).abs().max_element() <= TARGET_RANGE);
        }
    }

    #[test]
    fn spawned_enemy_starts_off_screen() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let spawn = EnemySpawn::random(&mut rng, SCREEN.center());
            let enemy = Enemy::spawn(&mut rng, spawn, SCREEN);
            assert!(!enemy.rect().intersects(&SCREEN.bounds()));
            assert!(enemy.is_alive());
            assert!(!enemy.is_counted());
        }
    }

    #[test]
    fn mask_is_round() {
        let enemy = Enemy::frozen_at(Vec2::ZERO);
        assert!(enemy.mask().get(10, 10));
        assert!(!enemy.mask().get(0, 0), "corners are transparent");
    }

    //--- Motion -----------------------------------------------------------

    #[test]
    fn enemy_heads_for_its_target() {
        let start = Vec2::new(-10.0, 300.0);
        let mut enemy = Enemy::new(start, spawn_toward(Vec2::new(400.0, 300.0), false, false), SCREEN);
        enemy.update();
        assert_eq!(enemy.rect().center(), start + Vec2::new(ENEMY_SPEED, 0.0));
    }

    #[test]
    fn enemy_crossing_the_screen_is_pruned() {
        let mut enemy = Enemy::new(
            Vec2::new(-10.0, 300.0),
            spawn_toward(Vec2::new(400.0, 300.0), false, false),
            SCREEN,
        );
        let mut frames = 0;
        while enemy.is_alive() {
            enemy.update();
            frames += 1;
            assert!(frames < 1_000, "enemy never left the screen");
        }
        assert!(enemy.rect().left() >= SCREEN.width_f());
    }

    #[test]
    fn bouncing_enemy_reflects_then_runs_out_of_bounces() {
        let mut enemy = Enemy::new(
            Vec2::new(-10.0, 300.0),
            spawn_toward(Vec2::new(400.0, 300.0), true, false),
            SCREEN,
        );

        let mut reversals = 0;
        let mut last = enemy.step().x.signum();
        let mut frames = 0;
        while enemy.is_alive() {
            enemy.update();
            let now = enemy.step().x.signum();
            if now != last {
                reversals += 1;
                last = now;
            }
            frames += 1;
            assert!(frames < 5_000, "bouncing enemy never escaped");
        }
        assert_eq!(reversals, MAX_BOUNCES as usize);
    }

    #[test]
    fn frozen_enemy_never_moves() {
        let mut enemy = Enemy::frozen_at(Vec2::new(100.0, 100.0));
        let before = enemy.rect();
        for _ in 0..10 {
            enemy.update();
        }
        assert_eq!(enemy.rect(), before);
        assert!(enemy.is_alive());
    }

    #[test]
    fn stray_enemy_is_dropped() {
        let mut enemy = Enemy::new(
            Vec2::new(-10.0, 300.0),
            spawn_toward(Vec2::new(-500.0, 300.0), false, false),
            SCREEN,
        );
        let mut frames = 0;
        while enemy.is_alive() {
            enemy.update();
            frames += 1;
            assert!(frames < 1_000);
        }
    }

    //--- Scoring ----------------------------------------------------------

    #[test]
    fn counted_flips_once() {
        let mut enemy = Enemy::frozen_at(Vec2::ZERO);
        assert!(enemy.mark_counted());
        assert!(!enemy.mark_counted());
        assert!(enemy.is_counted());
    }
}
