//! Navigation state machine.
//!
//! Menu: `Closed` ⇄ `Open`. Only the hamburger opens it; every other event
//! closes an open menu or leaves a closed one alone.
//! Active link: set by the latest scroll sample, or immediately by a link click.

use crate::config::SiteConfig;
use crate::scroll::ScrollView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MenuEvent {
    HamburgerClick,
    OutsideClick,
    Escape,
    Resize { width: f64 },
    OrientationChange,
    LinkClick,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    pub fn next(self, event: MenuEvent, desktop_breakpoint: f64) -> MenuState {
        match (self, event) {
            (MenuState::Closed, MenuEvent::HamburgerClick) => MenuState::Open,
            (MenuState::Open, MenuEvent::HamburgerClick) => MenuState::Closed,
            (MenuState::Open, MenuEvent::Resize { width }) if width <= desktop_breakpoint => {
                MenuState::Open
            }
            (MenuState::Open, _) => MenuState::Closed,
            (MenuState::Closed, _) => MenuState::Closed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavController {
    menu: MenuState,
    active_link: Option<String>,
    nav_offset: f64,
    desktop_breakpoint: f64,
}

impl NavController {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            menu: MenuState::Closed,
            active_link: None,
            nav_offset: config.nav_offset,
            desktop_breakpoint: config.desktop_breakpoint,
        }
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn active_link(&self) -> Option<&str> {
        self.active_link.as_deref()
    }

    /// Apply a menu event; returns `true` when the state changed.
    pub fn handle(&mut self, event: MenuEvent) -> bool {
        let next = self.menu.next(event, self.desktop_breakpoint);
        let changed = next != self.menu;
        self.menu = next;
        changed
    }

    /// Nav link clicked. `target_top` is the target section's `offsetTop`, or
    /// `None` when the page has no such section (nothing happens then).
    /// Returns the smooth-scroll destination.
    pub fn on_link_click(&mut self, section_id: &str, target_top: Option<f64>) -> Option<f64> {
        let top = target_top?;
        self.handle(MenuEvent::LinkClick);
        self.active_link = Some(section_id.to_owned());
        Some((top - self.nav_offset).max(0.0))
    }

    pub fn on_scroll(&mut self, view: &ScrollView) {
        self.active_link = view.active_section.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> NavController {
        NavController::new(&SiteConfig::default())
    }

    #[test]
    fn hamburger_opens_and_outside_click_closes() {
        let mut nav = controller();
        assert!(nav.handle(MenuEvent::HamburgerClick));
        assert!(nav.menu().is_open());
        assert!(nav.handle(MenuEvent::OutsideClick));
        assert_eq!(nav.menu(), MenuState::Closed);
        assert!(!nav.handle(MenuEvent::OutsideClick));
    }

    #[test]
    fn resize_above_breakpoint_forces_close() {
        let mut nav = controller();
        nav.handle(MenuEvent::HamburgerClick);
        assert!(!nav.handle(MenuEvent::Resize { width: 768.0 }));
        assert!(nav.menu().is_open());
        assert!(nav.handle(MenuEvent::Resize { width: 1024.0 }));
        assert_eq!(nav.menu(), MenuState::Closed);
    }

    #[test]
    fn escape_and_orientation_close_only_when_open() {
        let mut nav = controller();
        assert!(!nav.handle(MenuEvent::Escape));
        nav.handle(MenuEvent::HamburgerClick);
        assert!(nav.handle(MenuEvent::OrientationChange));
        nav.handle(MenuEvent::HamburgerClick);
        assert!(nav.handle(MenuEvent::Escape));
        assert!(!nav.menu().is_open());
    }

    #[test]
    fn link_click_closes_menu_and_marks_active() {
        let mut nav = controller();
        nav.handle(MenuEvent::HamburgerClick);
        assert_eq!(nav.on_link_click("skills", Some(1500.0)), Some(1430.0));
        assert_eq!(nav.menu(), MenuState::Closed);
        assert_eq!(nav.active_link(), Some("skills"));

        nav.on_scroll(&ScrollView {
            scroll_y: 0.0,
            scrolled: false,
            show_back_to_top: false,
            active_section: Some("home".to_owned()),
        });
        assert_eq!(nav.active_link(), Some("home"));
    }

    #[test]
    fn link_to_missing_section_is_noop() {
        let mut nav = controller();
        nav.handle(MenuEvent::HamburgerClick);
        assert_eq!(nav.on_link_click("blog", None), None);
        assert!(nav.menu().is_open());
        assert_eq!(nav.active_link(), None);
    }
}
