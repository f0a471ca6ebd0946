//=========================================================================
// Scene Kinds
//=========================================================================
//
// Closed set of scenes the controller can construct, each variant
// carrying the typed payload its constructor consumes.
//
//   Menu ──StartGame──▶ MenuGameTransition ──500 ms──▶ Game
//    ▲  ╲                                               │ lethal hit
//    │   ╲ShowHelp──▶ HowToPlay                         ▼
//    └──────────────BackToMenu───────────────────── Result ──Restart──▶ Game
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Group, InheritedGroups};

//=== Group Names =========================================================

pub const STARS: &str = "stars";
pub const TITLE: &str = "title";
pub const BUTTONS: &str = "buttons";
pub const ENEMY: &str = "enemy";
pub const PLAYER: &str = "player";

//=== Payloads ============================================================

/// Menu entry: optional carried star field, or a fresh one.
#[derive(Debug, Default)]
pub struct MenuPayload {
    pub stars: Option<Group>,
    pub last_star_creation: Option<u64>,
}

/// Menu → game slide-out. Requires `title`, `buttons` and `stars`.
#[derive(Debug)]
pub struct TransitionPayload {
    pub inherit_groups: InheritedGroups,
    pub last_star_creation: u64,
}

/// Round start. Requires `stars`.
#[derive(Debug)]
pub struct GamePayload {
    pub inherit_groups: InheritedGroups,
    pub last_star_creation: u64,
}

/// Round end. Requires `enemy` and `stars`.
#[derive(Debug)]
pub struct ResultPayload {
    pub inherit_groups: InheritedGroups,
    pub score: u64,
    pub elapsed_time: u64,
    pub total_score: u64,
    pub last_star_creation: u64,
}

//=== SceneKind ===========================================================

#[derive(Debug)]
pub enum SceneKind {
    Menu(MenuPayload),
    MenuGameTransition(TransitionPayload),
    Game(GamePayload),
    Result(ResultPayload),
    HowToPlay,
}

impl SceneKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Menu(_) => "menu",
            Self::MenuGameTransition(_) => "menu_game_transition",
            Self::Game(_) => "game",
            Self::Result(_) => "result",
            Self::HowToPlay => "how_to_play",
        }
    }
}
