//! Scroll-driven effects.
//!
//! One tick source fans out to an ordered list of independent
//! [`ScrollEffect`]s. Each effect owns the elements it touches; an effect
//! whose elements are missing is simply never registered, so the others
//! still run.
//!
//! Tick order is fixed:
//!
//! 1. [`NavbarStyle`]: `is-scrolled` past the navbar threshold
//! 2. [`ActiveSection`]: highlight the nav link of the section in view
//! 3. [`ScrollTopButton`]: show the back-to-top button past its threshold
//! 4. [`ProgressBar`]: width as the percentage of the page scrolled
//! 5. [`Parallax`]: translate the hero background while the hero is in view
//!
//! The math lives in free functions so it can be tested without a document.

use crate::config::ScrollConfig;
use crate::contract::{
    HERO_BACKGROUND_CLASS, HERO_ID, NAV_LINK_ACTIVE_CLASS, NAV_LINK_CLASS, NAVBAR_ID,
    NAVBAR_SCROLLED_CLASS, PROGRESS_BAR_ID, SCROLL_TOP_ID, SCROLL_TOP_VISIBLE_CLASS,
};
use crate::dom::{Dom, Geometry, Selector, Viewport};
use log::debug;

/// Whether a section is the one being read at `scroll_y`.
///
/// The section's top is pulled up by the navbar height plus `offset`, and
/// the window is half-open: `top < scroll_y <= top + height`.
///
/// ```
/// # use folio_ui::scroll::is_section_active;
/// // 500 - 70 - 100 = 330 < 450 <= 630
/// assert!(is_section_active(450.0, 70.0, 100.0, 500.0, 300.0));
/// assert!(!is_section_active(650.0, 70.0, 100.0, 500.0, 300.0));
/// ```
pub fn is_section_active(
    scroll_y: f64,
    nav_height: f64,
    offset: f64,
    offset_top: f64,
    offset_height: f64,
) -> bool {
    let top = section_top(nav_height, offset, offset_top);
    top < scroll_y && scroll_y <= top + offset_height
}

fn section_top(nav_height: f64, offset: f64, offset_top: f64) -> f64 {
    offset_top - nav_height - offset
}

/// Index of the single active section, if any.
///
/// When windows overlap, the section whose adjusted top is closest below
/// the scroll position wins; among equal tops the later one in document
/// order wins.
pub fn active_section_index(
    scroll_y: f64,
    nav_height: f64,
    offset: f64,
    sections: &[Geometry],
) -> Option<usize> {
    sections
        .iter()
        .enumerate()
        .filter(|(_, g)| {
            is_section_active(scroll_y, nav_height, offset, g.offset_top, g.offset_height)
        })
        .max_by(|(_, a), (_, b)| {
            section_top(nav_height, offset, a.offset_top)
                .total_cmp(&section_top(nav_height, offset, b.offset_top))
        })
        .map(|(i, _)| i)
}

/// Percentage of the scrollable distance covered, clamped to `0..=100`.
/// A page that does not scroll reports 0.
///
/// ```
/// # use folio_ui::scroll::progress_percent;
/// assert_eq!(progress_percent(600.0, 2000.0, 800.0), 50.0);
/// assert_eq!(progress_percent(100.0, 800.0, 800.0), 0.0);
/// ```
pub fn progress_percent(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Vertical hero background offset, or `None` once the hero has scrolled
/// out (the transform is then left frozen).
pub fn parallax_offset(scroll_y: f64, hero_bottom: f64, factor: f64) -> Option<f64> {
    (scroll_y < hero_bottom).then(|| scroll_y * factor)
}

/// One consumer of the scroll tick.
pub trait ScrollEffect<D: Dom> {
    fn name(&self) -> &'static str;
    fn apply(&self, dom: &D, viewport: &Viewport);
}

pub struct NavbarStyle<N> {
    navbar: N,
    threshold: f64,
}

impl<D: Dom> ScrollEffect<D> for NavbarStyle<D::Node> {
    fn name(&self) -> &'static str {
        "navbar-style"
    }

    fn apply(&self, dom: &D, viewport: &Viewport) {
        dom.set_class(
            &self.navbar,
            NAVBAR_SCROLLED_CLASS,
            viewport.scroll_y > self.threshold,
        );
    }
}

pub struct ActiveSection<N> {
    navbar: Option<N>,
    /// `(section, link)` pairs in document order.
    sections: Vec<(N, N)>,
    fallback_nav_height: f64,
    offset: f64,
}

impl<D: Dom> ScrollEffect<D> for ActiveSection<D::Node> {
    fn name(&self) -> &'static str {
        "active-section"
    }

    fn apply(&self, dom: &D, viewport: &Viewport) {
        let nav_height = self
            .navbar
            .as_ref()
            .map(|n| dom.geometry(n).offset_height)
            .unwrap_or(self.fallback_nav_height);
        let geometries: Vec<Geometry> = self
            .sections
            .iter()
            .map(|(section, _)| dom.geometry(section))
            .collect();
        let active = active_section_index(viewport.scroll_y, nav_height, self.offset, &geometries);
        for (i, (_, link)) in self.sections.iter().enumerate() {
            dom.set_class(link, NAV_LINK_ACTIVE_CLASS, Some(i) == active);
        }
    }
}

pub struct ScrollTopButton<N> {
    button: N,
    threshold: f64,
}

impl<D: Dom> ScrollEffect<D> for ScrollTopButton<D::Node> {
    fn name(&self) -> &'static str {
        "scroll-top"
    }

    fn apply(&self, dom: &D, viewport: &Viewport) {
        dom.set_class(
            &self.button,
            SCROLL_TOP_VISIBLE_CLASS,
            viewport.scroll_y > self.threshold,
        );
    }
}

pub struct ProgressBar<N> {
    bar: N,
}

impl<D: Dom> ScrollEffect<D> for ProgressBar<D::Node> {
    fn name(&self) -> &'static str {
        "progress-bar"
    }

    fn apply(&self, dom: &D, viewport: &Viewport) {
        let pct = progress_percent(viewport.scroll_y, viewport.document_height, viewport.height);
        dom.set_style(&self.bar, "width", &format!("{pct}%"));
    }
}

pub struct Parallax<N> {
    hero: N,
    layer: N,
    factor: f64,
}

impl<D: Dom> ScrollEffect<D> for Parallax<D::Node> {
    fn name(&self) -> &'static str {
        "parallax"
    }

    fn apply(&self, dom: &D, viewport: &Viewport) {
        let bottom = dom.geometry(&self.hero).bottom();
        if let Some(offset) = parallax_offset(viewport.scroll_y, bottom, self.factor) {
            dom.set_style(&self.layer, "transform", &format!("translateY({offset:.2}px)"));
        }
    }
}

/// The ordered effect list behind the window scroll listener.
pub struct ScrollCoordinator<D: Dom> {
    effects: Vec<Box<dyn ScrollEffect<D>>>,
}

impl<D: Dom> ScrollCoordinator<D> {
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Register the stock effects for whatever elements the page has.
    pub fn attach(dom: &D, config: &ScrollConfig) -> Self {
        let mut coordinator = Self::new();
        let navbar = dom.by_id(NAVBAR_ID);

        match &navbar {
            Some(navbar) => coordinator.register(NavbarStyle {
                navbar: navbar.clone(),
                threshold: config.navbar_threshold,
            }),
            None => debug!("#{NAVBAR_ID} missing; navbar style effect skipped"),
        }

        let sections: Vec<(D::Node, D::Node)> = dom
            .query_all(None, &Selector::TagWithAttr("section", "id"))
            .into_iter()
            .filter_map(|section| {
                let id = dom.attr(&section, "id")?;
                let href = format!("#{id}");
                let link = dom.query(None, &Selector::ClassWithAttrEq(NAV_LINK_CLASS, "href", &href))?;
                Some((section, link))
            })
            .collect();
        if sections.is_empty() {
            debug!("no linked sections; active section effect skipped");
        } else {
            coordinator.register(ActiveSection {
                navbar: navbar.clone(),
                sections,
                fallback_nav_height: config.fallback_nav_height,
                offset: config.section_offset,
            });
        }

        match dom.by_id(SCROLL_TOP_ID) {
            Some(button) => coordinator.register(ScrollTopButton {
                button,
                threshold: config.scroll_top_threshold,
            }),
            None => debug!("#{SCROLL_TOP_ID} missing; scroll-top effect skipped"),
        }

        match dom.by_id(PROGRESS_BAR_ID) {
            Some(bar) => coordinator.register(ProgressBar { bar }),
            None => debug!("#{PROGRESS_BAR_ID} missing; progress bar effect skipped"),
        }

        let hero = dom.by_id(HERO_ID);
        let layer = hero
            .as_ref()
            .and_then(|h| dom.query(Some(h), &Selector::Class(HERO_BACKGROUND_CLASS)));
        match (hero, layer) {
            (Some(hero), Some(layer)) => coordinator.register(Parallax {
                hero,
                layer,
                factor: config.parallax_factor,
            }),
            _ => debug!("hero background missing; parallax effect skipped"),
        }

        coordinator
    }

    pub fn register(&mut self, effect: impl ScrollEffect<D> + 'static) {
        self.effects.push(Box::new(effect));
    }

    pub fn effect_names(&self) -> Vec<&'static str> {
        self.effects.iter().map(|e| e.name()).collect()
    }

    /// Run every effect once, in registration order, against the current
    /// viewport.
    pub fn tick(&self, dom: &D) {
        let viewport = dom.viewport();
        for effect in &self.effects {
            effect.apply(dom, &viewport);
        }
    }
}

impl<D: Dom> Default for ScrollCoordinator<D> {
    fn default() -> Self {
        Self::new()
    }
}
