//=========================================================================
// Star
//=========================================================================
//
// Decorative background twinkle. Stars have no gameplay effect: they are
// spawned on a fixed cadence by every scene, fade out over their
// lifetime, and are then pruned from their group.
//
//=========================================================================

use glam::Vec2;

use crate::core::geometry::Rect;
use crate::core::render::{Color, Renderer};

/// How long a star stays visible, in milliseconds.
pub const STAR_LIFETIME: u64 = 2_000;

const STAR_SIZE: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    rect: Rect,
    born_at: u64,
    brightness: f32,
}

impl Star {
    pub fn new(center: Vec2, born_at: u64) -> Self {
        Self {
            rect: Rect::from_center(center, Vec2::splat(STAR_SIZE)),
            born_at,
            brightness: 1.0,
        }
    }

    pub fn born_at(&self) -> u64 {
        self.born_at
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn update(&mut self, now: u64) {
        let age = now.saturating_sub(self.born_at) as f32;
        self.brightness = 1.0 - age / STAR_LIFETIME as f32;
    }

    pub fn is_alive(&self) -> bool {
        self.brightness > 0.0
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.rect.translate(delta);
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.fill_rect(self.rect, Color::WHITE.faded(self.brightness));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
