//=========================================================================
// Star Field
//=========================================================================
//
// Background stars shared by every scene except How-to-Play. The `stars`
// group and its last-spawn timestamp are handed from scene to scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::scene::kind::STARS;
use crate::core::scene::{SceneContext, SceneError, Stage};
use crate::sprite::Star;

//=== StarField ===========================================================

/// Minimum gap between two star spawns, in milliseconds.
pub const STAR_EFFECT_DELAY: u64 = 250;

/// Drops a star at a random position into the `stars` group on a fixed
/// cadence. The timestamp travels with the group between scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarField {
    last_star_creation: u64,
}

impl StarField {
    pub fn new(last_star_creation: u64) -> Self {
        Self { last_star_creation }
    }

    pub fn last_star_creation(&self) -> u64 {
        self.last_star_creation
    }

    pub fn update(&mut self, stage: &mut Stage, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        if ctx.now.saturating_sub(self.last_star_creation) <= STAR_EFFECT_DELAY {
            return Ok(());
        }

        let position = Vec2::new(
            ctx.rng.random_range(0.0..=ctx.screen.width_f()),
            ctx.rng.random_range(0.0..=ctx.screen.height_f()),
        );
        stage.add_item(STARS, Star::new(position, ctx.now))?;
        self.last_star_creation = ctx.now;
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Group;
    use crate::scenes::test_support::Harness;

    #[test]
    fn spawns_only_after_the_delay() {
        let mut harness = Harness::new();
        let mut stage = Stage::new();
        stage.insert_group(STARS, Group::new());
        let mut field = StarField::new(1_000);

        field.update(&mut stage, &mut harness.ctx(1_000 + STAR_EFFECT_DELAY)).unwrap();
        assert_eq!(stage.group(STARS).map(Group::len), Some(0));

        field.update(&mut stage, &mut harness.ctx(1_000 + STAR_EFFECT_DELAY + 1)).unwrap();
        assert_eq!(stage.group(STARS).map(Group::len), Some(1));
        assert_eq!(field.last_star_creation(), 1_000 + STAR_EFFECT_DELAY + 1);
    }

    #[test]
    fn missing_stars_group_is_a_wiring_error() {
        let mut harness = Harness::new();
        let mut stage = Stage::new();
        let mut field = StarField::new(0);

        let result = field.update(&mut stage, &mut harness.ctx(10_000));
        assert_eq!(result, Err(SceneError::UnknownGroup(STARS.into())));
    }
}
