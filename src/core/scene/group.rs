//=========================================================================
// Group
//=========================================================================
//
// Collection of sprites sharing a lifecycle tag ("enemy", "stars", ...).
//
// Groups are handed between scenes by move, never cloned: the `GroupId`
// assigned at creation follows the collection through every transition.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use crate::core::render::Renderer;
use crate::sprite::{ButtonAction, FrameContext, Sprite};

//=== GroupId =============================================================

static NEXT_GROUP_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(u64);

impl GroupId {
    fn next() -> Self {
        Self(NEXT_GROUP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

//=== Group ===============================================================

#[derive(Debug)]
pub struct Group {
    id: GroupId,
    sprites: Vec<Sprite>,
}

impl Group {
    pub fn new() -> Self {
        Self {
            id: GroupId::next(),
            sprites: Vec::new(),
        }
    }

    pub fn with_sprites(sprites: impl IntoIterator<Item = Sprite>) -> Self {
        Self {
            id: GroupId::next(),
            sprites: sprites.into_iter().collect(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    //--- Membership -------------------------------------------------------

    pub fn add(&mut self, sprite: impl Into<Sprite>) {
        self.sprites.push(sprite.into());
    }

    /// Removes every sprite for which `keep` returns `false`.
    pub fn retain(&mut self, keep: impl FnMut(&Sprite) -> bool) {
        self.sprites.retain(keep);
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sprite> {
        self.sprites.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Sprite> {
        self.sprites.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Sprite> {
        self.sprites.iter_mut()
    }

    //--- Frame ------------------------------------------------------------

    /// Updates every sprite, prunes dead ones, and reports button clicks.
    pub fn update(&mut self, frame: &FrameContext<'_>, actions: &mut Vec<ButtonAction>) {
        for sprite in &mut self.sprites {
            if let Some(action) = sprite.update(frame) {
                actions.push(action);
            }
        }
        self.sprites.retain(Sprite::is_alive);
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        for sprite in &self.sprites {
            sprite.render(renderer);
        }
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::ScreenSize;
    use crate::core::input::FrameInput;
    use crate::sprite::{Star, STAR_LIFETIME};
    use glam::Vec2;

    #[test]
    fn every_group_gets_a_fresh_id() {
        let a = Group::new();
        let b = Group::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn moving_a_group_keeps_its_id() {
        let group = Group::with_sprites([Star::new(Vec2::ZERO, 0).into()]);
        let id = group.id();
        let moved = group;
        assert_eq!(moved.id(), id);
    }

    #[test]
    fn update_prunes_expired_sprites() {
        let mut group = Group::new();
        group.add(Star::new(Vec2::ZERO, 0));
        group.add(Star::new(Vec2::ZERO, STAR_LIFETIME));

        let input = FrameInput::new();
        let frame = FrameContext {
            input: &input,
            now: STAR_LIFETIME + 1,
            screen: ScreenSize::new(800, 600),
        };
        let mut actions = Vec::new();
        group.update(&frame, &mut actions);

        assert_eq!(group.len(), 1);
        assert!(actions.is_empty());
    }

    #[test]
    fn empty_group_update_is_a_no_op() {
        let mut group = Group::new();
        let input = FrameInput::new();
        let frame = FrameContext {
            input: &input,
            now: 0,
            screen: ScreenSize::new(800, 600),
        };
        let mut actions = Vec::new();
        group.update(&frame, &mut actions);
        assert!(group.is_empty());
    }
}
