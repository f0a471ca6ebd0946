//=========================================================================
// Render Interface
//=========================================================================
//
// The narrow drawing surface the scene core needs from a backend.
//
// Scenes describe a frame through the [`Renderer`] trait. The engine
// records each frame into a [`DisplayList`] on the logic thread and ships
// it to the platform thread, whose wgpu presenter fills the rects. Text
// has no font backend there and is only recorded.
//
// Architecture:
//   Scene::render(&mut dyn Renderer) → DisplayList → CoreEvent::Frame
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::geometry::Rect;

//=== Color ===============================================================

/// 8-bit RGB color with saturating channel arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const ORANGE: Self = Self::rgb(255, 165, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn lighten(self, amount: u8) -> Self {
        Self::rgb(
            self.r.saturating_add(amount),
            self.g.saturating_add(amount),
            self.b.saturating_add(amount),
        )
    }

    pub fn darken_red(self, amount: u8) -> Self {
        Self::rgb(self.r.saturating_sub(amount), self.g, self.b)
    }

    /// Scales every channel by `alpha` in `[0, 1]` toward black.
    pub fn faded(self, alpha: f32) -> Self {
        let a = alpha.clamp(0.0, 1.0);
        Self::rgb(
            (self.r as f32 * a) as u8,
            (self.g as f32 * a) as u8,
            (self.b as f32 * a) as u8,
        )
    }
}

//=== Fonts & Text ========================================================

/// Font roles used by the UI; the backend maps them to actual faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Title,
    Button,
    Score,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Font {
    pub face: FontFace,
    pub size: u16,
}

impl Font {
    pub const fn new(face: FontFace, size: u16) -> Self {
        Self { face, size }
    }
}

/// Drop shadow drawn under a text at a pixel offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextShadow {
    pub color: Color,
    pub offset: Vec2,
}

/// A renderable piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub font: Font,
    pub color: Color,
    pub shadow: Option<TextShadow>,
}

impl Text {
    pub fn new(content: impl Into<String>, font: Font, color: Color) -> Self {
        Self {
            content: content.into(),
            font,
            color,
            shadow: None,
        }
    }

    pub fn with_shadow(mut self, color: Color, offset: Vec2) -> Self {
        self.shadow = Some(TextShadow { color, offset });
        self
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Layout box estimate used before a backend has measured the glyphs.
    pub fn measure(&self) -> Vec2 {
        let size = self.font.size as f32;
        Vec2::new(self.content.chars().count() as f32 * size * 0.6, size)
    }
}

//=== Renderer ============================================================

/// Drawing operations consumed by scenes and sprites.
pub trait Renderer {
    fn clear(&mut self, color: Color);

    /// Draws `text` centered at `center`, shadow first when present.
    fn draw_text(&mut self, text: &Text, center: Vec2);

    fn draw_rounded_rect(&mut self, size: Vec2, center: Vec2, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);
}

//=== DisplayList =========================================================

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Text { text: Text, center: Vec2 },
    RoundedRect { size: Vec2, center: Vec2, color: Color },
    FillRect { rect: Rect, color: Color },
}

/// Recording renderer: the frame format exchanged between threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates over the text contents in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.content.as_str()),
            _ => None,
        })
    }
}

impl Renderer for DisplayList {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_text(&mut self, text: &Text, center: Vec2) {
        self.commands.push(DrawCommand::Text {
            text: text.clone(),
            center,
        });
    }

    fn draw_rounded_rect(&mut self, size: Vec2, center: Vec2, color: Color) {
        self.commands.push(DrawCommand::RoundedRect { size, center, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_arithmetic_saturates() {
        assert_eq!(Color::ORANGE.lighten(100), Color::rgb(255, 255, 100));
        assert_eq!(Color::RED.darken_red(100), Color::rgb(155, 0, 0));
        assert_eq!(Color::BLACK.darken_red(10), Color::BLACK);
    }

    #[test]
    fn faded_clamps_alpha() {
        assert_eq!(Color::WHITE.faded(2.0), Color::WHITE);
        assert_eq!(Color::WHITE.faded(-1.0), Color::BLACK);
    }

    #[test]
    fn display_list_records_in_order() {
        let mut list = DisplayList::new();
        list.clear(Color::BLACK);
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        list.draw_text(
            &Text::new("42", Font::new(FontFace::Score, 60), Color::ORANGE),
            Vec2::ZERO,
        );

        assert_eq!(list.len(), 3);
        assert_eq!(list.commands()[0], DrawCommand::Clear(Color::BLACK));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["42"]);
    }

    #[test]
    fn measure_scales_with_font_size() {
        let text = Text::new("abcd", Font::new(FontFace::Body, 10), Color::WHITE);
        assert_eq!(text.measure(), Vec2::new(24.0, 10.0));
    }
}
