//=========================================================================
// Stage
//=========================================================================
//
// Shared scene base: named sprite groups plus named raw overlay items.
//
// Architecture:
//   Stage
//     ├─ groups: IndexMap<String, Group>     (updated + drawn first)
//     └─ raws:   IndexMap<String, RawItem>   (drawn last, on top)
//
// Both maps keep insertion order so draw order is stable frame to frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use indexmap::IndexMap;
use log::debug;

//=== Internal Dependencies ===============================================

use super::{Group, SceneError};
use crate::core::render::{Renderer, Text};
use crate::sprite::{ButtonAction, FrameContext, Sprite};

//=== RawItem =============================================================

/// Free-standing text drawn centered at `position`.
///
/// Scenes rewrite `text` and `position` directly between frames (score
/// counters, slide animations).
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    pub text: Text,
    pub position: Vec2,
}

//=== InheritedGroups =====================================================

/// Groups relinquished by an outgoing scene, keyed by group name.
#[derive(Debug, Default)]
pub struct InheritedGroups {
    groups: IndexMap<&'static str, Group>,
}

impl InheritedGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, group: Group) {
        self.groups.insert(name, group);
    }

    /// Takes a group the receiving scene cannot run without.
    pub fn take(&mut self, name: &'static str) -> Result<Group, SceneError> {
        self.groups
            .shift_remove(name)
            .ok_or(SceneError::MissingPayloadKey(name))
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

//=== Stage ===============================================================

#[derive(Debug, Default)]
pub struct Stage {
    groups: IndexMap<String, Group>,
    raws: IndexMap<String, RawItem>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    //=====================================================================
    // Groups
    //=====================================================================

    /// Creates (or replaces) the group `name` holding `initial`.
    pub fn create_group(
        &mut self,
        name: &str,
        initial: impl IntoIterator<Item = Sprite>,
    ) -> &mut Group {
        self.insert_group(name, Group::with_sprites(initial))
    }

    /// Installs an existing group (typically inherited) under `name`.
    pub fn insert_group(&mut self, name: &str, group: Group) -> &mut Group {
        let index = match self.groups.get_index_of(name) {
            Some(index) => {
                self.groups[index] = group;
                index
            }
            None => self.groups.insert_full(name.to_owned(), group).0,
        };
        &mut self.groups[index]
    }

    pub fn add_item(&mut self, group: &str, sprite: impl Into<Sprite>) -> Result<(), SceneError> {
        self.groups
            .get_mut(group)
            .ok_or_else(|| SceneError::UnknownGroup(group.to_owned()))?
            .add(sprite);
        Ok(())
    }

    pub fn remove_group(&mut self, name: &str) -> Option<Group> {
        self.groups.shift_remove(name)
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.get_mut(name)
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Removes `names` from this stage and hands them over in one map.
    pub fn inherit_groups(&mut self, names: &[&'static str]) -> Result<InheritedGroups, SceneError> {
        if let Some(missing) = names.iter().find(|name| !self.groups.contains_key(**name)) {
            return Err(SceneError::UnknownGroup((*missing).to_owned()));
        }

        let mut inherited = InheritedGroups::new();
        for &name in names {
            if let Some(group) = self.groups.shift_remove(name) {
                inherited.insert(name, group);
            }
        }
        Ok(inherited)
    }

    /// Drops the listed groups that have become empty.
    ///
    /// Returns the names that were removed.
    pub fn drop_empty_groups(&mut self, names: &[&str]) -> Vec<String> {
        let mut dropped = Vec::new();
        for &name in names {
            if self.groups.get(name).is_some_and(Group::is_empty) {
                self.groups.shift_remove(name);
                debug!(target: "scene", "Group {} emptied and dropped", name);
                dropped.push(name.to_owned());
            }
        }
        dropped
    }

    //=====================================================================
    // Raw Items
    //=====================================================================

    /// Inserts or replaces the overlay item `name`.
    pub fn add_raw_item(&mut self, text: Text, position: Vec2, name: &str) {
        let item = RawItem { text, position };
        match self.raws.get_mut(name) {
            Some(existing) => *existing = item,
            None => {
                self.raws.insert(name.to_owned(), item);
            }
        }
    }

    pub fn raw(&self, name: &str) -> Option<&RawItem> {
        self.raws.get(name)
    }

    pub fn raw_mut(&mut self, name: &str) -> Option<&mut RawItem> {
        self.raws.get_mut(name)
    }

    pub fn raws_mut(&mut self) -> impl Iterator<Item = &mut RawItem> {
        self.raws.values_mut()
    }

    //=====================================================================
    // Frame
    //=====================================================================

    /// Updates every group and returns the button actions fired this frame.
    pub fn update(&mut self, frame: &FrameContext<'_>) -> Vec<ButtonAction> {
        let mut actions = Vec::new();
        for group in self.groups.values_mut() {
            group.update(frame, &mut actions);
        }
        actions
    }

    /// Draws grouped sprites, then raw items on top, in insertion order.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for group in self.groups.values() {
            group.render(renderer);
        }
        for item in self.raws.values() {
            renderer.draw_text(&item.text, item.position);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
