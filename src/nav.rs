//! Collapsible mobile navigation menu.
//!
//! Two states, `closed` (initial) and `open`. Every transition writes the
//! four mirrored surfaces together: the panel's `is-open` class, the toggle's
//! `is-open` class, the toggle's `aria-expanded`, and the body's
//! `menu-open` scroll lock.

use crate::contract::{
    MENU_OPEN_BODY_CLASS, NAV_LINK_CLASS, NAV_MENU_ID, NAV_TOGGLE_ID, OPEN_CLASS,
};
use crate::dom::{Dom, Selector};
use crate::events::{EventOutcome, Key, KeyPress};
use crate::focus_trap::FocusTrap;
use log::debug;

pub struct NavMenu<N> {
    toggle: N,
    panel: N,
    body: Option<N>,
    open: bool,
}

impl<N: Clone + PartialEq> NavMenu<N> {
    /// Wire the menu if both the toggle and the panel exist.
    pub fn attach<D: Dom<Node = N>>(dom: &D) -> Option<Self> {
        let (Some(toggle), Some(panel)) = (dom.by_id(NAV_TOGGLE_ID), dom.by_id(NAV_MENU_ID)) else {
            debug!("#{NAV_TOGGLE_ID} or #{NAV_MENU_ID} missing; mobile menu disabled");
            return None;
        };
        let menu = Self {
            toggle,
            panel,
            body: dom.body(),
            open: false,
        };
        menu.sync(dom);
        Some(menu)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle_button(&self) -> &N {
        &self.toggle
    }

    pub fn panel(&self) -> &N {
        &self.panel
    }

    pub fn open<D: Dom<Node = N>>(&mut self, dom: &D) {
        self.open = true;
        self.sync(dom);
    }

    pub fn close<D: Dom<Node = N>>(&mut self, dom: &D) {
        self.open = false;
        self.sync(dom);
    }

    pub fn toggle<D: Dom<Node = N>>(&mut self, dom: &D) {
        if self.open {
            self.close(dom);
        } else {
            self.open(dom);
        }
    }

    /// Route a document click. Returns `true` if the menu reacted.
    ///
    /// - on the toggle: flip
    /// - on a `.nav__link` inside the panel: close
    /// - anywhere outside toggle and panel while open: close
    pub fn on_click<D: Dom<Node = N>>(&mut self, dom: &D, target: &N) -> bool {
        if dom.contains(&self.toggle, target) {
            self.toggle(dom);
            return true;
        }
        if dom.contains(&self.panel, target) {
            let on_link = dom
                .closest(target, &Selector::Class(NAV_LINK_CLASS))
                .is_some_and(|link| dom.contains(&self.panel, &link));
            if on_link {
                self.close(dom);
                return true;
            }
            return false;
        }
        if self.open {
            self.close(dom);
            return true;
        }
        false
    }

    /// Keyboard handling while focus is inside the panel: Escape closes and
    /// returns focus to the toggle, Tab is trapped.
    pub fn on_keydown<D: Dom<Node = N>>(
        &mut self,
        dom: &D,
        target: Option<&N>,
        key: KeyPress,
    ) -> EventOutcome {
        let inside = target.is_some_and(|t| dom.contains(&self.panel, t));
        if !self.open || !inside {
            return EventOutcome::PASS;
        }
        if key.key == Key::Escape {
            self.close(dom);
            dom.focus(&self.toggle);
            return EventOutcome::PASS;
        }
        <Self as FocusTrap<D>>::trap_tab(self, dom, key)
    }

    fn sync<D: Dom<Node = N>>(&self, dom: &D) {
        dom.set_class(&self.panel, OPEN_CLASS, self.open);
        dom.set_class(&self.toggle, OPEN_CLASS, self.open);
        dom.set_attr(
            &self.toggle,
            "aria-expanded",
            if self.open { "true" } else { "false" },
        );
        if let Some(body) = &self.body {
            dom.set_class(body, MENU_OPEN_BODY_CLASS, self.open);
        }
    }
}

impl<D: Dom> FocusTrap<D> for NavMenu<D::Node> {
    fn trap_container(&self) -> &D::Node {
        &self.panel
    }

    fn trap_active(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, NodeId};

    struct Fixture {
        dom: MemoryDom,
        toggle: NodeId,
        panel: NodeId,
        links: Vec<NodeId>,
        outside: NodeId,
    }

    fn fixture() -> Fixture {
        let dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let nav = dom.append(&body, "nav", &[("id", "navbar")]);
        let toggle = dom.append(&nav, "button", &[("id", "navToggle")]);
        let panel = dom.append(&nav, "ul", &[("id", "navMenu")]);
        let links = ["#about", "#work", "#contact"]
            .iter()
            .map(|href| {
                let li = dom.append(&panel, "li", &[]);
                dom.append(&li, "a", &[("class", "nav__link"), ("href", *href)])
            })
            .collect();
        let outside = dom.append(&body, "main", &[]);
        Fixture {
            dom,
            toggle,
            panel,
            links,
            outside,
        }
    }

    fn assert_mirrors(f: &Fixture, open: bool) {
        let body = f.dom.body().unwrap();
        assert_eq!(f.dom.has_class(&f.panel, OPEN_CLASS), open);
        assert_eq!(f.dom.has_class(&f.toggle, OPEN_CLASS), open);
        assert_eq!(
            f.dom.attr(&f.toggle, "aria-expanded").as_deref(),
            Some(if open { "true" } else { "false" })
        );
        assert_eq!(f.dom.has_class(&body, MENU_OPEN_BODY_CLASS), open);
    }

    #[test]
    fn attach_requires_toggle_and_panel() {
        let dom = MemoryDom::new();
        let body = dom.body().unwrap();
        dom.append(&body, "button", &[("id", "navToggle")]);
        assert!(NavMenu::attach(&dom).is_none());
    }

    #[test]
    fn attach_starts_closed_with_consistent_mirrors() {
        let f = fixture();
        let menu = NavMenu::attach(&f.dom).unwrap();
        assert!(!menu.is_open());
        assert_mirrors(&f, false);
    }

    #[test]
    fn toggle_click_flips_every_mirror() {
        let f = fixture();
        let mut menu = NavMenu::attach(&f.dom).unwrap();
        assert!(menu.on_click(&f.dom, &f.toggle));
        assert_mirrors(&f, true);
        assert!(menu.on_click(&f.dom, &f.toggle));
        assert_mirrors(&f, false);
    }

    #[test]
    fn link_click_closes() {
        let f = fixture();
        let mut menu = NavMenu::attach(&f.dom).unwrap();
        menu.open(&f.dom);
        assert!(menu.on_click(&f.dom, &f.links[1]));
        assert_mirrors(&f, false);
        // Already closed: still a close, still consistent.
        menu.on_click(&f.dom, &f.links[0]);
        assert_mirrors(&f, false);
    }

    #[test]
    fn outside_click_closes_only_when_open() {
        let f = fixture();
        let mut menu = NavMenu::attach(&f.dom).unwrap();
        assert!(!menu.on_click(&f.dom, &f.outside));
        menu.open(&f.dom);
        assert!(menu.on_click(&f.dom, &f.outside));
        assert_mirrors(&f, false);
    }

    #[test]
    fn click_inside_panel_off_link_keeps_open() {
        let f = fixture();
        let mut menu = NavMenu::attach(&f.dom).unwrap();
        menu.open(&f.dom);
        assert!(!menu.on_click(&f.dom, &f.panel));
        assert_mirrors(&f, true);
    }

    #[test]
    fn escape_closes_and_refocuses_toggle() {
        let f = fixture();
        let mut menu = NavMenu::attach(&f.dom).unwrap();
        menu.open(&f.dom);
        f.dom.focus(&f.links[0]);
        menu.on_keydown(&f.dom, Some(&f.links[0]), KeyPress::new(Key::Escape));
        assert_mirrors(&f, false);
        assert_eq!(f.dom.active_element(), Some(f.toggle));
    }

    #[test]
    fn escape_outside_panel_is_ignored() {
        let f = fixture();
        let mut menu = NavMenu::attach(&f.dom).unwrap();
        menu.open(&f.dom);
        menu.on_keydown(&f.dom, Some(&f.outside), KeyPress::new(Key::Escape));
        assert!(menu.is_open());
    }

    #[test]
    fn tab_wraps_inside_open_menu() {
        let f = fixture();
        let mut menu = NavMenu::attach(&f.dom).unwrap();
        menu.open(&f.dom);
        f.dom.focus(&f.links[2]);
        let outcome = menu.on_keydown(&f.dom, Some(&f.links[2]), KeyPress::new(Key::Tab));
        assert!(outcome.prevent_default);
        assert_eq!(f.dom.active_element(), Some(f.links[0]));
    }
}
