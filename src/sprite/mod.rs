//=========================================================================
// Sprites
//=========================================================================
//
// Every entity a scene can hold in a group.
//
// The set of entity kinds is closed, so sprites are a tagged enum rather
// than trait objects: scenes reach into enemies (score flags), buttons
// (disable during transitions) and labels (slide animations) by matching,
// with no downcasting.
//
// Architecture:
//   Group ── Vec<Sprite> ──┬─ Player   (input driven, two hitboxes)
//                          ├─ Enemy    (spawned by GameScene)
//                          ├─ Star     (decorative, fades out)
//                          ├─ Button   (emits ButtonAction on click)
//                          └─ Label    (static text)
//
//=========================================================================

//=== Module Declarations =================================================

mod button;
mod enemy;
mod label;
mod player;
mod star;

//=== Public API ==========================================================

pub use button::{Button, ButtonAction, ButtonColors};
pub use enemy::{Enemy, EnemySpawn, ENEMY_SIZE};
pub use label::Label;
pub use player::{Hitbox, Player, PLAYER_SIZE, POINT_HITBOX_EXPAND};
pub use star::{Star, STAR_LIFETIME};

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Rect, ScreenSize};
use crate::core::input::FrameInput;
use crate::core::render::Renderer;

//=== FrameContext ========================================================

/// Read-only per-frame data forwarded to every sprite update.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub input: &'a FrameInput,
    pub now: u64,
    pub screen: ScreenSize,
}

//=== Sprite ==============================================================

#[derive(Debug, Clone)]
pub enum Sprite {
    Player(Player),
    Enemy(Enemy),
    Star(Star),
    Button(Button),
    Label(Label),
}

impl Sprite {
    /// Advances the sprite one frame; buttons may report an activation.
    pub fn update(&mut self, frame: &FrameContext<'_>) -> Option<ButtonAction> {
        match self {
            Self::Player(player) => {
                player.update(frame);
                None
            }
            Self::Enemy(enemy) => {
                enemy.update();
                None
            }
            Self::Star(star) => {
                star.update(frame.now);
                None
            }
            Self::Button(button) => button.update(frame.input),
            Self::Label(_) => None,
        }
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        match self {
            Self::Player(player) => player.render(renderer),
            Self::Enemy(enemy) => enemy.render(renderer),
            Self::Star(star) => star.render(renderer),
            Self::Button(button) => button.render(renderer),
            Self::Label(label) => label.render(renderer),
        }
    }

    /// `false` once the sprite should be dropped from its group.
    pub fn is_alive(&self) -> bool {
        match self {
            Self::Player(player) => player.is_alive(),
            Self::Enemy(enemy) => enemy.is_alive(),
            Self::Star(star) => star.is_alive(),
            Self::Button(_) | Self::Label(_) => true,
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            Self::Player(player) => player.rect(),
            Self::Enemy(enemy) => enemy.rect(),
            Self::Star(star) => star.rect(),
            Self::Button(button) => button.rect(),
            Self::Label(label) => label.rect(),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Self::Player(player) => player.translate(delta),
            Self::Enemy(enemy) => enemy.translate(delta),
            Self::Star(star) => star.translate(delta),
            Self::Button(button) => button.translate(delta),
            Self::Label(label) => label.translate(delta),
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Self::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match self {
            Self::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_enemy(&self) -> Option<&Enemy> {
        match self {
            Self::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn as_enemy_mut(&mut self) -> Option<&mut Enemy> {
        match self {
            Self::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Self::Button(button) => Some(button),
            _ => None,
        }
    }

    pub fn as_star(&self) -> Option<&Star> {
        match self {
            Self::Star(star) => Some(star),
            _ => None,
        }
    }
}

//--- Conversions ---------------------------------------------------------

impl From<Player> for Sprite {
    fn from(player: Player) -> Self {
        Self::Player(player)
    }
}

impl From<Enemy> for Sprite {
    fn from(enemy: Enemy) -> Self {
        Self::Enemy(enemy)
    }
}

impl From<Star> for Sprite {
    fn from(star: Star) -> Self {
        Self::Star(star)
    }
}

impl From<Button> for Sprite {
    fn from(button: Button) -> Self {
        Self::Button(button)
    }
}

impl From<Label> for Sprite {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}
