//=========================================================================
// How-To-Play Scene
//=========================================================================
//
// Paged instructions on a white background.
//
// The page index only changes through `Command::NavigatePage`, which the
// controller delivers between ticks via `Scene::navigate`. Navigating
// clears the content group; the next update sees it empty and rebuilds
// both the content and the navigation buttons for the new page.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::geometry::ScreenSize;
use crate::core::render::{Color, Font, FontFace, Renderer, Text};
use crate::core::scene::{Group, MenuPayload, Scene, SceneContext, SceneError, SceneInit, SceneKind, Stage};
use crate::sprite::{Button, ButtonAction, ButtonColors, Label, Sprite};

//=== Constants ===========================================================

const PAGE_CONTENT: &str = "page_content";
const START_PAGE_BUTTONS: &str = "start_page_buttons";
const MIDDLE_PAGE_BUTTONS: &str = "middle_page_buttons";
const END_PAGE_BUTTONS: &str = "end_page_buttons";

const NAV_BUTTON_SIZE: Vec2 = Vec2::new(100.0, 25.0);
const NAV_BUTTON_FONT: Font = Font::new(FontFace::Button, 20);
const HEADING_FONT: Font = Font::new(FontFace::Title, 50);
const BODY_FONT: Font = Font::new(FontFace::Body, 30);
const INK: Color = Color::rgb(100, 100, 100);

//--- Pages ---------------------------------------------------------------

/// One page: a heading, then body lines with their centers.
struct Page {
    heading: &'static str,
    lines: &'static [(&'static str, (f32, f32))],
}

const PAGES: [Page; 3] = [
    Page {
        heading: "How to Play",
        lines: &[
            ("Move the blue square", (210.0, 150.0)),
            ("and dodge the red ones.", (220.0, 220.0)),
        ],
    },
    Page {
        heading: "Controls",
        lines: &[
            ("Move with W, A, S, D.", (190.0, 150.0)),
            ("Hold LSHIFT to move even faster.", (330.0, 220.0)),
        ],
    },
    Page {
        heading: "Scoring",
        lines: &[
            ("Time survived is measured in ms.", (270.0, 150.0)),
            ("Time is the base score.", (220.0, 220.0)),
            ("Brushing past red squares pays extra.", (280.0, 330.0)),
            ("That is the \"action score\".", (200.0, 400.0)),
        ],
    },
];

pub const PAGE_COUNT: usize = PAGES.len();

//=== HowToPlayScene ======================================================

pub struct HowToPlayScene {
    stage: Stage,
    page: usize,
    screen: ScreenSize,
}

impl HowToPlayScene {
    pub fn new(init: &SceneInit) -> Self {
        let mut stage = Stage::new();
        stage.insert_group(PAGE_CONTENT, Group::new());
        Self {
            stage,
            page: 0,
            screen: init.screen,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    //--- Page Building ----------------------------------------------------

    fn content_is_empty(&self) -> bool {
        self.stage.group(PAGE_CONTENT).map_or(true, Group::is_empty)
    }

    fn rebuild(&mut self) {
        for name in [START_PAGE_BUTTONS, MIDDLE_PAGE_BUTTONS, END_PAGE_BUTTONS] {
            self.stage.remove_group(name);
        }

        let (w, h) = (self.screen.width_f(), self.screen.height_f());
        let prev = || nav_button("Prev", Vec2::new(80.0, h - 80.0), ButtonAction::PrevPage);
        let next = || nav_button("Next", Vec2::new(w - 80.0, h - 80.0), ButtonAction::NextPage);
        let menu = || nav_button("Menu", Vec2::new(w - 100.0, 50.0), ButtonAction::BackToMenu);

        let last = PAGE_COUNT - 1;
        let (name, buttons): (&str, Vec<Sprite>) = match self.page {
            0 => (START_PAGE_BUTTONS, vec![next().into(), menu().into()]),
            page if page == last => (END_PAGE_BUTTONS, vec![prev().into(), menu().into()]),
            _ => (MIDDLE_PAGE_BUTTONS, vec![prev().into(), next().into(), menu().into()]),
        };
        self.stage.create_group(name, buttons);

        let page = &PAGES[self.page];
        let heading = Label::new(body_text(page.heading, HEADING_FONT), Vec2::new(w / 2.0, 50.0));
        let lines = page
            .lines
            .iter()
            .map(|&(line, (x, y))| Label::new(body_text(line, BODY_FONT), Vec2::new(x, y)));
        let content = self.stage.insert_group(PAGE_CONTENT, Group::new());
        content.add(heading);
        for line in lines {
            content.add(line);
        }

        debug!(target: "scene", "Help page {} built under {}", self.page, name);
    }
}

fn body_text(content: &str, font: Font) -> Text {
    Text::new(content, font, INK).with_shadow(Color::BLACK, Vec2::new(2.0, 2.0))
}

fn nav_button(label: &str, center: Vec2, action: ButtonAction) -> Button {
    Button::new(
        NAV_BUTTON_SIZE,
        center,
        ButtonColors::MENU,
        Text::new(label, NAV_BUTTON_FONT, Color::WHITE),
        action,
    )
}

impl Scene for HowToPlayScene {
    fn name(&self) -> &'static str {
        "how_to_play"
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), SceneError> {
        let actions = self.stage.update(&ctx.frame());
        if self.content_is_empty() {
            self.rebuild();
        }

        for action in actions {
            match action {
                ButtonAction::PrevPage => ctx.navigate_page(-1),
                ButtonAction::NextPage => ctx.navigate_page(1),
                ButtonAction::BackToMenu => {
                    ctx.change_scene(SceneKind::Menu(MenuPayload::default()));
                    return Ok(());
                }
                other => debug!(target: "scene", "Help ignores {:?}", other),
            }
        }
        Ok(())
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.stage.render(renderer);
    }

    fn navigate(&mut self, delta: i32) {
        let target = (self.page as i64 + i64::from(delta)).clamp(0, PAGE_COUNT as i64 - 1) as usize;
        if target == self.page {
            return;
        }
        self.page = target;
        if let Some(content) = self.stage.group_mut(PAGE_CONTENT) {
            content.clear();
        }
    }

    fn background(&self) -> Color {
        Color::WHITE
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Command;
    use crate::scenes::test_support::Harness;

    fn nav_actions(scene: &HowToPlayScene) -> Vec<ButtonAction> {
        [START_PAGE_BUTTONS, MIDDLE_PAGE_BUTTONS, END_PAGE_BUTTONS]
            .iter()
            .filter_map(|name| scene.stage().group(name))
            .flat_map(Group::iter)
            .filter_map(|sprite| match sprite {
                Sprite::Button(button) => Some(button.action()),
                _ => None,
            })
            .collect()
    }

    fn built(harness: &mut Harness) -> HowToPlayScene {
        let mut scene = HowToPlayScene::new(&Harness::init(0));
        scene.update(&mut harness.ctx(0)).unwrap();
        scene
    }

    #[test]
    fn first_update_builds_first_page() {
        let mut harness = Harness::new();
        let scene = built(&mut harness);
        assert_eq!(scene.page(), 0);
        assert_eq!(scene.stage().group(PAGE_CONTENT).map(Group::len), Some(3));
        assert_eq!(nav_actions(&scene), vec![ButtonAction::NextPage, ButtonAction::BackToMenu]);
    }

    #[test]
    fn middle_page_has_three_buttons() {
        let mut harness = Harness::new();
        let mut scene = built(&mut harness);
        scene.navigate(1);
        assert_eq!(scene.stage().group(PAGE_CONTENT).map(Group::len), Some(0));

        scene.update(&mut harness.ctx(16)).unwrap();
        assert_eq!(
            nav_actions(&scene),
            vec![ButtonAction::PrevPage, ButtonAction::NextPage, ButtonAction::BackToMenu]
        );
        assert!(!scene.stage().has_group(START_PAGE_BUTTONS));
    }

    #[test]
    fn last_page_has_prev_and_menu() {
        let mut harness = Harness::new();
        let mut scene = built(&mut harness);
        scene.navigate(1);
        scene.navigate(1);
        scene.update(&mut harness.ctx(16)).unwrap();
        assert_eq!(scene.page(), PAGE_COUNT - 1);
        assert_eq!(nav_actions(&scene), vec![ButtonAction::PrevPage, ButtonAction::BackToMenu]);
        assert_eq!(scene.stage().group(PAGE_CONTENT).map(Group::len), Some(5));
    }

    #[test]
    fn navigation_clamps_to_valid_pages() {
        let mut harness = Harness::new();
        let mut scene = built(&mut harness);
        scene.navigate(-1);
        assert_eq!(scene.page(), 0);
        assert_eq!(scene.stage().group(PAGE_CONTENT).map(Group::len), Some(3));

        scene.navigate(10);
        assert_eq!(scene.page(), PAGE_COUNT - 1);
    }

    #[test]
    fn next_button_queues_navigation() {
        let mut harness = Harness::new();
        let mut scene = built(&mut harness);
        harness.click(720.0, 520.0);
        scene.update(&mut harness.ctx(16)).unwrap();
        assert!(matches!(harness.commands.iter().next(), Some(Command::NavigatePage(1))));
        // Page only moves once the controller delivers the command.
        assert_eq!(scene.page(), 0);
    }

    #[test]
    fn menu_button_returns_to_fresh_menu() {
        let mut harness = Harness::new();
        let mut scene = built(&mut harness);
        harness.click(700.0, 50.0);
        scene.update(&mut harness.ctx(16)).unwrap();
        match harness.take_scene_change() {
            Some(SceneKind::Menu(payload)) => assert!(payload.stars.is_none()),
            other => panic!("expected MenuScene, got {:?}", other),
        }
    }

    #[test]
    fn background_is_white() {
        let scene = HowToPlayScene::new(&Harness::init(0));
        assert_eq!(scene.background(), Color::WHITE);
    }
}
