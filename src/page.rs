//! The page-level controller.
//!
//! [`Portfolio`] owns the backend, the storage, the [`UiSession`] and every
//! controller, and exposes one entry point per browser event. Backends
//! forward raw events here and act on the returned [`EventOutcome`]; the
//! in-memory backend drives the exact same entry points in tests.
//!
//! ```text
//! click ──────────► on_click ──► theme │ menu │ scroll-top │ anchors │ modals │ timeline
//! keydown ────────► on_keydown ─► menu (Escape, Tab) │ modals (Escape, Tab) │ lightbox (Enter/Space)
//! scroll (thr.) ──► on_scroll ──► ScrollCoordinator::tick
//! intersection ───► reveal / on_counters_visible
//! animation frame ► on_animation_frame
//! load ───────────► on_load
//! ```

use crate::animate::{AnimationStatus, CounterAnimation, Counters, Reveal};
use crate::config::UiConfig;
use crate::contract::{
    CASE_STUDY_ATTR, CURRENT_YEAR_ID, LIGHTBOX_ATTR, LOADED_BODY_CLASS, MODAL_CLOSE_ATTR,
    RESUME_TRIGGER_CLASS, SCROLL_TOP_ID, TIMELINE_COLLAPSED_ID, TIMELINE_EXPANDED_CLASS,
    TIMELINE_TOGGLE_ID,
};
use crate::dom::{Dom, Selector, Storage};
use crate::events::{EventOutcome, Key, KeyPress};
use crate::links;
use crate::modal::{ModalError, ModalSet};
use crate::nav::NavMenu;
use crate::scroll::ScrollCoordinator;
use crate::session::UiSession;
use crate::theme::{Theme, ThemeController};
use log::{debug, info, warn};

const TIMELINE_MORE_LABEL: &str = r#"View Full History <i class="fas fa-chevron-down"></i>"#;
const TIMELINE_LESS_LABEL: &str = r#"Show Less <i class="fas fa-chevron-up"></i>"#;

/// "View full history" expander for the experience timeline.
struct Timeline<N> {
    toggle: N,
    collapsed: N,
}

impl<N> Timeline<N> {
    fn attach<D: Dom<Node = N>>(dom: &D) -> Option<Self> {
        Some(Self {
            toggle: dom.by_id(TIMELINE_TOGGLE_ID)?,
            collapsed: dom.by_id(TIMELINE_COLLAPSED_ID)?,
        })
    }

    fn toggle<D: Dom<Node = N>>(&self, dom: &D) -> bool {
        let expanded = dom.attr(&self.toggle, "aria-expanded").as_deref() != Some("true");
        dom.set_attr(
            &self.toggle,
            "aria-expanded",
            if expanded { "true" } else { "false" },
        );
        dom.set_class(&self.collapsed, TIMELINE_EXPANDED_CLASS, expanded);
        dom.set_inner_html(
            &self.toggle,
            if expanded {
                TIMELINE_LESS_LABEL
            } else {
                TIMELINE_MORE_LABEL
            },
        );
        expanded
    }
}

pub struct Portfolio<D: Dom, S: Storage> {
    dom: D,
    storage: S,
    config: UiConfig,
    session: UiSession<D::Node>,
    theme: ThemeController<D::Node>,
    menu: Option<NavMenu<D::Node>>,
    scroll: ScrollCoordinator<D>,
    modals: ModalSet<D::Node>,
    reveal: Reveal,
    counters: Option<Counters<D::Node>>,
    animation: Option<CounterAnimation<D::Node>>,
    scroll_top: Option<D::Node>,
    timeline: Option<Timeline<D::Node>>,
}

impl<D: Dom, S: Storage> Portfolio<D, S> {
    /// Wire every controller to the elements present, apply the initial
    /// theme, rewrite external links and run one scroll tick so the page
    /// starts in the right visual state.
    pub fn mount(dom: D, storage: S, config: UiConfig) -> Self {
        let theme = ThemeController::attach(&dom, &config.theme.storage_key);
        let menu = NavMenu::attach(&dom);
        let scroll = ScrollCoordinator::attach(&dom, &config.scroll);
        let modals = ModalSet::attach(&dom, &config.resume.document);
        let reveal = Reveal::new(&config.reveal);
        let counters = Counters::attach(&dom, &config.counters);
        let scroll_top = dom.by_id(SCROLL_TOP_ID);
        let timeline = Timeline::attach(&dom);

        let portfolio = Self {
            dom,
            storage,
            config,
            session: UiSession::new(),
            theme,
            menu,
            scroll,
            modals,
            reveal,
            counters,
            animation: None,
            scroll_top,
            timeline,
        };

        let theme = portfolio.theme.init(&portfolio.dom, &portfolio.storage);
        links::open_external_links_in_new_tab(&portfolio.dom);
        portfolio.on_scroll();
        info!(
            "portfolio mounted: theme {theme}, scroll effects {:?}",
            portfolio.scroll.effect_names()
        );
        portfolio
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn session(&self) -> &UiSession<D::Node> {
        &self.session
    }

    pub fn modals(&self) -> &ModalSet<D::Node> {
        &self.modals
    }

    pub fn theme(&self) -> Theme {
        self.theme.current(&self.dom)
    }

    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(NavMenu::is_open)
    }

    /// One scroll tick. Callers throttle; see [`crate::throttle`].
    pub fn on_scroll(&self) {
        self.scroll.tick(&self.dom);
    }

    /// Document-level click on `target`.
    pub fn on_click(&mut self, target: &D::Node) -> EventOutcome {
        let dom = &self.dom;
        let mut outcome = EventOutcome::PASS;

        if let Some(toggle) = self.theme.toggle_button() {
            if dom.contains(toggle, target) {
                let theme = self.theme.toggle(dom, &self.storage);
                debug!("theme switched to {theme}");
            }
        }

        if let Some(menu) = &mut self.menu {
            menu.on_click(dom, target);
        }

        if let Some(button) = &self.scroll_top {
            if dom.contains(button, target) {
                dom.scroll_to(0.0);
            }
        }

        if let Some(anchor) = dom.closest(target, &Selector::TagWithAttrPrefix("a", "href", "#")) {
            if links::scroll_to_anchor(dom, &anchor, self.config.scroll.fallback_nav_height) {
                outcome = EventOutcome::CONSUMED;
            }
        }

        if dom.closest(target, &Selector::Attr(MODAL_CLOSE_ATTR)).is_some() {
            self.modals.close_all(dom, &mut self.session);
            return outcome;
        }

        let opened = if let Some(trigger) = dom.closest(target, &Selector::Attr(CASE_STUDY_ATTR)) {
            let slug = dom.attr(&trigger, CASE_STUDY_ATTR).unwrap_or_default();
            Some(self.modals.open_case_study(dom, &mut self.session, &slug))
        } else if let Some(item) = dom.closest(target, &Selector::Attr(LIGHTBOX_ATTR)) {
            Some(self.modals.open_lightbox(dom, &mut self.session, &item))
        } else if dom
            .closest(target, &Selector::Class(RESUME_TRIGGER_CLASS))
            .is_some()
        {
            Some(self.modals.open_resume(dom, &mut self.session))
        } else {
            None
        };
        if let Some(result) = opened {
            if opened_modal(result) {
                outcome = EventOutcome::CONSUMED;
            }
        }

        if let Some(timeline) = &self.timeline {
            if dom.contains(&timeline.toggle, target) {
                timeline.toggle(dom);
            }
        }

        outcome
    }

    /// Document-level keydown. `target` is the focused element the event
    /// was dispatched to.
    pub fn on_keydown(&mut self, target: Option<&D::Node>, key: KeyPress) -> EventOutcome {
        let dom = &self.dom;
        let mut outcome = EventOutcome::PASS;
        if let Some(menu) = &mut self.menu {
            outcome = outcome.merge(menu.on_keydown(dom, target, key));
        }
        outcome = outcome.merge(self.modals.on_keydown(dom, &mut self.session, target, key));

        if matches!(key.key, Key::Enter | Key::Space) && !self.modals.any_open() {
            let item = target.and_then(|t| dom.closest(t, &Selector::Attr(LIGHTBOX_ATTR)));
            if let Some(item) = item {
                if opened_modal(self.modals.open_lightbox(dom, &mut self.session, &item)) {
                    outcome = EventOutcome::CONSUMED;
                }
            }
        }
        outcome
    }

    /// Elements for the reveal observer, and its options.
    pub fn reveal_targets(&self) -> (Vec<D::Node>, &Reveal) {
        (self.reveal.targets(&self.dom), &self.reveal)
    }

    pub fn reveal(&self, node: &D::Node, is_intersecting: bool) {
        self.reveal.on_intersect(&self.dom, node, is_intersecting);
    }

    /// Element and threshold for the counters observer.
    pub fn counters_target(&self) -> Option<(D::Node, f64)> {
        self.counters
            .as_ref()
            .map(|c| (c.container().clone(), c.threshold()))
    }

    /// The stats block became visible. Returns `true` when the count-up
    /// started; the caller then stops observing and schedules frames.
    pub fn on_counters_visible(&mut self) -> bool {
        let Some(counters) = &self.counters else {
            return false;
        };
        match counters.trigger(&self.dom, &mut self.session) {
            Some(animation) => {
                self.animation = Some(animation);
                true
            }
            None => false,
        }
    }

    pub fn on_animation_frame(&mut self, now_ms: f64) -> AnimationStatus {
        let Some(animation) = &mut self.animation else {
            return AnimationStatus::Finished;
        };
        let status = animation.frame(&self.dom, now_ms);
        if status == AnimationStatus::Finished {
            self.animation = None;
        }
        status
    }

    pub fn on_load(&self) {
        if let Some(body) = self.dom.body() {
            self.dom.add_class(&body, LOADED_BODY_CLASS);
        }
    }

    pub fn stamp_copyright_year(&self, year: u32) {
        if let Some(span) = self.dom.by_id(CURRENT_YEAR_ID) {
            self.dom.set_text(&span, &year.to_string());
        }
    }
}

fn opened_modal(result: Result<bool, ModalError>) -> bool {
    match result {
        Ok(opened) => opened,
        Err(err) => {
            warn!("modal not opened: {err}");
            false
        }
    }
}
