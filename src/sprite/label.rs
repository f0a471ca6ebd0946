use glam::Vec2;

use crate::core::geometry::Rect;
use crate::core::render::{Renderer, Text};

/// Static text positioned by its center (titles, help page lines).
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: Text,
    rect: Rect,
}

impl Label {
    pub fn new(text: Text, center: Vec2) -> Self {
        let rect = Rect::from_center(center, text.measure());
        Self { text, rect }
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.rect.translate(delta);
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw_text(&self.text, self.rect.center());
    }
}
