//=========================================================================
// Player
//=========================================================================
//
// Keyboard-driven square with two collision shapes:
//
// - `Hitbox::Normal`: the sprite's own mask. Any overlap is lethal.
// - `Hitbox::Point`: a mask grown by `POINT_HITBOX_EXPAND` on both axes
//   and centered on the sprite. Grazing an enemy with it scores a bonus.
//
// The point zone strictly contains the normal zone, so callers must test
// the lethal shape first.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::{Enemy, FrameContext};
use crate::core::collision::Mask;
use crate::core::geometry::Rect;
use crate::core::input::{FrameInput, KeyCode};
use crate::core::render::{Color, Renderer};

//=== Constants ===========================================================

/// Side length of the player square, in pixels.
pub const PLAYER_SIZE: u32 = 30;

/// Extra width and height of the scoring zone around the player.
pub const POINT_HITBOX_EXPAND: u32 = 40;

const PLAYER_SPEED: f32 = 5.0;
const PLAYER_BOOST_SPEED: f32 = 9.0;

//=== Hitbox ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hitbox {
    Normal,
    Point,
}

//=== Player ==============================================================

#[derive(Debug, Clone)]
pub struct Player {
    rect: Rect,
    velocity: Vec2,
    color: Color,
    normal_mask: Mask,
    point_mask: Mask,
    alive: bool,
}

impl Player {
    pub fn new(center: Vec2) -> Self {
        let size = PLAYER_SIZE as f32;
        let grown = PLAYER_SIZE + POINT_HITBOX_EXPAND;
        Self {
            rect: Rect::from_center(center, Vec2::splat(size)),
            velocity: Vec2::ZERO,
            color: Color::BLUE,
            normal_mask: Mask::filled(PLAYER_SIZE, PLAYER_SIZE),
            point_mask: Mask::filled(grown, grown),
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn mask(&self, hitbox: Hitbox) -> &Mask {
        match hitbox {
            Hitbox::Normal => &self.normal_mask,
            Hitbox::Point => &self.point_mask,
        }
    }

    /// Screen position of the given mask's top-left pixel.
    pub fn hitbox_origin(&self, hitbox: Hitbox) -> Vec2 {
        match hitbox {
            Hitbox::Normal => self.rect.top_left(),
            Hitbox::Point => self.rect.top_left() - Vec2::splat(POINT_HITBOX_EXPAND as f32 / 2.0),
        }
    }

    /// Pixel-exact overlap test between one of our shapes and an enemy.
    pub fn hits(&self, hitbox: Hitbox, enemy: &Enemy) -> bool {
        let offset = enemy.rect().top_left() - self.hitbox_origin(hitbox);
        let offset = (offset.x.round() as i32, offset.y.round() as i32);
        self.mask(hitbox).overlap(enemy.mask(), offset).is_some()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.rect.translate(delta);
    }

    pub fn update(&mut self, frame: &FrameContext<'_>) {
        if !self.alive {
            self.velocity = Vec2::ZERO;
            return;
        }

        let speed = if frame.input.shift_held() {
            PLAYER_BOOST_SPEED
        } else {
            PLAYER_SPEED
        };
        self.velocity = steering(frame.input).normalize_or_zero() * speed;
        self.rect.translate(self.velocity);

        let max_x = (frame.screen.width_f() - self.rect.w).max(0.0);
        let max_y = (frame.screen.height_f() - self.rect.h).max(0.0);
        self.rect.x = self.rect.x.clamp(0.0, max_x);
        self.rect.y = self.rect.y.clamp(0.0, max_y);
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.fill_rect(self.rect, self.color);
    }
}

//--- Helpers -------------------------------------------------------------

fn steering(input: &FrameInput) -> Vec2 {
    let held = |a: KeyCode, b: KeyCode| input.is_key_down(a) || input.is_key_down(b);

    let mut direction = Vec2::ZERO;
    if held(KeyCode::KeyA, KeyCode::ArrowLeft) {
        direction.x -= 1.0;
    }
    if held(KeyCode::KeyD, KeyCode::ArrowRight) {
        direction.x += 1.0;
    }
    if held(KeyCode::KeyW, KeyCode::ArrowUp) {
        direction.y -= 1.0;
    }
    if held(KeyCode::KeyS, KeyCode::ArrowDown) {
        direction.y += 1.0;
    }
    direction
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::ScreenSize;
    use crate::core::input::{InputEvent, Modifiers};
    use crate::sprite::ENEMY_SIZE;

    const SCREEN: ScreenSize = ScreenSize::new(800, 600);

    fn press(keys: &[KeyCode], modifiers: Modifiers) -> FrameInput {
        let mut input = FrameInput::new();
        let events: Vec<InputEvent> = keys
            .iter()
            .map(|&key| InputEvent::KeyDown { key, modifiers })
            .collect();
        input.apply(&events);
        input
    }

    fn step(player: &mut Player, input: &FrameInput) {
        let frame = FrameContext {
            input,
            now: 0,
            screen: SCREEN,
        };
        player.update(&frame);
    }

    //--- Movement ---------------------------------------------------------

    #[test]
    fn arrow_keys_move_at_base_speed() {
        let mut player = Player::new(SCREEN.center());
        let start = player.rect().center();

        step(&mut player, &press(&[KeyCode::ArrowRight], Modifiers::NONE));
        assert_eq!(player.rect().center(), start + Vec2::new(PLAYER_SPEED, 0.0));
    }

    #[test]
    fn shift_boosts_speed() {
        let mut player = Player::new(SCREEN.center());
        let start = player.rect().center();

        step(&mut player, &press(&[KeyCode::KeyW], Modifiers::SHIFT));
        assert_eq!(player.rect().center(), start - Vec2::new(0.0, PLAYER_BOOST_SPEED));
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let mut player = Player::new(SCREEN.center());
        step(&mut player, &press(&[KeyCode::KeyD, KeyCode::KeyS], Modifiers::NONE));
        assert!((player.velocity().length() - PLAYER_SPEED).abs() < 1e-4);
    }

    #[test]
    fn player_is_clamped_to_screen() {
        let mut player = Player::new(Vec2::new(16.0, 16.0));
        let input = press(&[KeyCode::KeyA, KeyCode::KeyW], Modifiers::NONE);
        for _ in 0..10 {
            step(&mut player, &input);
        }
        assert_eq!(player.rect().top_left(), Vec2::ZERO);
    }

    #[test]
    fn dead_player_stops() {
        let mut player = Player::new(SCREEN.center());
        player.kill();
        let start = player.rect();
        step(&mut player, &press(&[KeyCode::KeyD], Modifiers::NONE));
        assert_eq!(player.rect(), start);
        assert!(!player.is_alive());
    }

    //--- Hitboxes ---------------------------------------------------------

    #[test]
    fn point_zone_is_centered_and_larger() {
        let player = Player::new(SCREEN.center());
        let normal = player.hitbox_origin(Hitbox::Normal);
        let point = player.hitbox_origin(Hitbox::Point);

        assert_eq!(normal - point, Vec2::splat(20.0));
        assert_eq!(player.mask(Hitbox::Point).width(), PLAYER_SIZE + POINT_HITBOX_EXPAND);
        assert!(player.mask(Hitbox::Point).count() > player.mask(Hitbox::Normal).count());
    }

    #[test]
    fn enemy_overlapping_sprite_hits_both_shapes() {
        let player = Player::new(SCREEN.center());
        let enemy = Enemy::frozen_at(player.rect().center());
        assert!(player.hits(Hitbox::Normal, &enemy));
        assert!(player.hits(Hitbox::Point, &enemy));
    }

    #[test]
    fn enemy_in_the_margin_only_hits_point_zone() {
        let player = Player::new(SCREEN.center());
        // Enemy sits just right of the sprite, inside the 20 px margin.
        let center = Vec2::new(player.rect().right() + 12.0, player.rect().center().y);
        let enemy = Enemy::frozen_at(center);
        assert!(!player.hits(Hitbox::Normal, &enemy));
        assert!(player.hits(Hitbox::Point, &enemy));
    }

    #[test]
    fn distant_enemy_hits_nothing() {
        let player = Player::new(SCREEN.center());
        let far = player.rect().center() + Vec2::splat(PLAYER_SIZE as f32 + ENEMY_SIZE as f32 * 2.0);
        let enemy = Enemy::frozen_at(far);
        assert!(!player.hits(Hitbox::Normal, &enemy));
        assert!(!player.hits(Hitbox::Point, &enemy));
    }

    #[test]
    fn offset_direction_follows_enemy_side() {
        // Enemy past the bottom-right corner, inside the margin. A mirrored
        // offset would look for it up-left of the zone and miss.
        let player = Player::new(SCREEN.center());
        let corner = Vec2::new(player.rect().right(), player.rect().bottom());
        let enemy = Enemy::frozen_at(corner + Vec2::splat(12.0));
        assert!(!player.hits(Hitbox::Normal, &enemy));
        assert!(player.hits(Hitbox::Point, &enemy));
    }
}
