//=========================================================================
// Button
//=========================================================================
//
// Rounded-rect push button.
//
// A button never runs game code itself: when clicked it reports its
// `ButtonAction`, and the owning scene turns that into a controller
// command. Activation requires the left button to go down over the
// button and come back up still over it.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Rect;
use crate::core::input::{FrameInput, MouseButton};
use crate::core::render::{Color, Renderer, Text};

//=== ButtonAction ========================================================

/// Intent reported by a clicked button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    StartGame,
    ShowHelp,
    Quit,
    Restart,
    BackToMenu,
    PrevPage,
    NextPage,
}

//=== ButtonColors ========================================================

/// Fill color per interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    pub normal: Color,
    pub hovered: Color,
    pub pressed: Color,
}

impl ButtonColors {
    /// Orange / red / dark red, shared by every menu in the game.
    pub const MENU: Self = Self {
        normal: Color::ORANGE,
        hovered: Color::RED,
        pressed: Color::rgb(155, 0, 0),
    };
}

//=== Button ==============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    rect: Rect,
    colors: ButtonColors,
    label: Text,
    action: ButtonAction,
    disabled: bool,
    hovered: bool,
    armed: bool,
}

impl Button {
    pub fn new(size: Vec2, center: Vec2, colors: ButtonColors, label: Text, action: ButtonAction) -> Self {
        Self {
            rect: Rect::from_center(center, size),
            colors,
            label,
            action,
            disabled: false,
            hovered: false,
            armed: false,
        }
    }

    pub fn action(&self) -> ButtonAction {
        self.action
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Disabled buttons ignore input and drop any half-finished click.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.hovered = false;
            self.armed = false;
        }
    }

    pub fn update(&mut self, input: &FrameInput) -> Option<ButtonAction> {
        if self.disabled {
            return None;
        }

        let (x, y) = input.cursor();
        let over = self.rect.contains(Vec2::new(x, y));
        self.hovered = over;

        if over && input.is_button_pressed(MouseButton::Left) {
            self.armed = true;
        }

        if input.is_button_released(MouseButton::Left) {
            let fire = self.armed && over;
            self.armed = false;
            if fire {
                return Some(self.action);
            }
        }

        None
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.rect.translate(delta);
    }

    pub fn current_color(&self) -> Color {
        if self.armed {
            self.colors.pressed
        } else if self.hovered {
            self.colors.hovered
        } else {
            self.colors.normal
        }
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        let center = self.rect.center();
        renderer.draw_rounded_rect(self.rect.size(), center, self.current_color());
        renderer.draw_text(&self.label, center);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, Modifiers};
    use crate::core::render::{Font, FontFace};

    fn start_button() -> Button {
        Button::new(
            Vec2::new(200.0, 50.0),
            Vec2::new(400.0, 300.0),
            ButtonColors::MENU,
            Text::new("Start", Font::new(FontFace::Button, 30), Color::WHITE),
            ButtonAction::StartGame,
        )
    }

    fn input_at(x: f32, y: f32, events: &[InputEvent]) -> FrameInput {
        let mut input = FrameInput::new();
        input.apply(&[InputEvent::MouseMoved { x, y }]);
        input.apply(events);
        input
    }

    const DOWN: InputEvent = InputEvent::MouseButtonDown {
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    };
    const UP: InputEvent = InputEvent::MouseButtonUp {
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    };

    #[test]
    fn click_over_button_fires_action() {
        let mut button = start_button();
        let input = input_at(400.0, 300.0, &[DOWN, UP]);
        assert_eq!(button.update(&input), Some(ButtonAction::StartGame));
    }

    #[test]
    fn press_and_release_across_frames_fires_once() {
        let mut button = start_button();
        let mut input = input_at(400.0, 300.0, &[DOWN]);
        assert_eq!(button.update(&input), None);
        assert_eq!(button.current_color(), ButtonColors::MENU.pressed);

        input.begin_frame();
        input.apply(&[UP]);
        assert_eq!(button.update(&input), Some(ButtonAction::StartGame));

        input.begin_frame();
        assert_eq!(button.update(&input), None);
    }

    #[test]
    fn release_outside_button_cancels_click() {
        let mut button = start_button();
        let mut input = input_at(400.0, 300.0, &[DOWN]);
        button.update(&input);

        input.begin_frame();
        input.apply(&[InputEvent::MouseMoved { x: 10.0, y: 10.0 }, UP]);
        assert_eq!(button.update(&input), None);
    }

    #[test]
    fn disabled_button_ignores_clicks() {
        let mut button = start_button();
        button.set_disabled(true);
        let input = input_at(400.0, 300.0, &[DOWN, UP]);
        assert_eq!(button.update(&input), None);
        assert_eq!(button.current_color(), ButtonColors::MENU.normal);
    }

    #[test]
    fn hover_changes_color() {
        let mut button = start_button();
        button.update(&input_at(400.0, 300.0, &[]));
        assert_eq!(button.current_color(), ButtonColors::MENU.hovered);
    }
}
