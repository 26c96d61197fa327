//! Shared test utilities for the folio-ui test suite.
//!
//! [`portfolio_page`] builds the full stock page in a [`MemoryDom`], with
//! layout already applied, and hands back the elements tests poke at.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (dom, page) = portfolio_page();
//! let mut portfolio = Portfolio::mount(dom, MemoryStorage::new(), UiConfig::default());
//! portfolio.on_click(&page.toggle);
//! assert_menu_open(portfolio.dom(), &page, true);
//! ```
//!
//! # Layout
//!
//! ```text
//! navbar            0 +   70
//! #hero             0 +  800   (stats block inside)
//! #about          800 +  600
//! #projects      1400 +  900
//! #contact       2300 +  500
//! viewport 800, document 2800
//! ```

use crate::contract::{MENU_OPEN_BODY_CLASS, OPEN_CLASS};
use crate::dom::{Dom, MemoryDom, NodeId};

/// Handles to the interesting elements of [`portfolio_page`].
pub struct PortfolioPage {
    pub progress: NodeId,
    pub navbar: NodeId,
    pub theme_toggle: NodeId,
    pub theme_icon: NodeId,
    pub toggle: NodeId,
    pub menu: NodeId,
    /// `.nav__link`s for about, projects, contact.
    pub nav_links: Vec<NodeId>,
    pub hero: NodeId,
    pub hero_bg: NodeId,
    pub counters: Vec<NodeId>,
    pub reveal: Vec<NodeId>,
    pub external_link: NodeId,
    pub case_study_trigger: NodeId,
    pub gallery_item: NodeId,
    pub resume_button: NodeId,
    pub timeline_toggle: NodeId,
    pub timeline_collapsed: NodeId,
    pub current_year: NodeId,
    pub scroll_top: NodeId,
    pub case_study_modal: NodeId,
    pub case_study_backdrop: NodeId,
    pub case_study_close: NodeId,
    pub case_study_body: NodeId,
    pub lightbox_modal: NodeId,
    pub lightbox_close: NodeId,
    pub lightbox_image: NodeId,
    pub resume_modal: NodeId,
    pub resume_frame: NodeId,
}

pub fn portfolio_page() -> (MemoryDom, PortfolioPage) {
    let dom = MemoryDom::new();
    dom.set_host("danieltso.com");
    dom.set_viewport(800.0, 2800.0);
    let body = dom.body().unwrap();

    let progress = dom.append(&body, "div", &[("id", "scrollProgress")]);

    // =========================================================================
    // Navigation
    // =========================================================================
    let navbar = dom.append(&body, "nav", &[("id", "navbar"), ("class", "nav")]);
    dom.set_geometry(&navbar, 0.0, 70.0);
    dom.append(&navbar, "a", &[("class", "nav__logo"), ("href", "#hero")]);
    let theme_toggle = dom.append(&navbar, "button", &[("id", "themeToggle")]);
    let theme_icon = dom.append(&theme_toggle, "i", &[("class", "fas fa-sun")]);
    let toggle = dom.append(
        &navbar,
        "button",
        &[("id", "navToggle"), ("aria-expanded", "false")],
    );
    let menu = dom.append(&navbar, "ul", &[("id", "navMenu"), ("class", "nav__menu")]);
    let nav_links = ["#about", "#projects", "#contact"]
        .into_iter()
        .map(|href| {
            let item = dom.append(&menu, "li", &[]);
            dom.append(&item, "a", &[("class", "nav__link"), ("href", href)])
        })
        .collect();

    // =========================================================================
    // Sections
    // =========================================================================
    let hero = dom.append(&body, "section", &[("id", "hero")]);
    dom.set_geometry(&hero, 0.0, 800.0);
    let hero_bg = dom.append(&hero, "div", &[("class", "hero__bg")]);
    let stats = dom.append(&hero, "div", &[("id", "stats")]);
    let counters = vec![
        dom.append(
            &stats,
            "span",
            &[
                ("class", "stat__number"),
                ("data-target", "150"),
                ("data-prefix", "$"),
                ("data-suffix", "K"),
            ],
        ),
        dom.append(
            &stats,
            "span",
            &[("class", "stat__number"), ("data-target", "12"), ("data-suffix", "+")],
        ),
    ];

    let about = dom.append(&body, "section", &[("id", "about")]);
    dom.set_geometry(&about, 800.0, 600.0);
    let reveal = vec![
        dom.append(&about, "div", &[("class", "card animate-on-scroll")]),
        dom.append(
            &about,
            "div",
            &[("class", "card animate-on-scroll"), ("data-delay", "200")],
        ),
    ];
    let external_link = dom.append(&about, "a", &[("href", "https://linkedin.com/in/dtso")]);

    let projects = dom.append(&body, "section", &[("id", "projects")]);
    dom.set_geometry(&projects, 1400.0, 900.0);
    let case_study_trigger = dom.append(&projects, "button", &[("data-case-study", "bridge")]);
    let gallery_item = dom.append(
        &projects,
        "div",
        &[("class", "gallery__item"), ("data-lightbox", ""), ("tabindex", "0")],
    );
    dom.append(&gallery_item, "img", &[("src", "a.jpg"), ("alt", "A")]);
    let resume_button = dom.append(&projects, "button", &[("class", "btn js-open-resume")]);
    let timeline_toggle = dom.append(
        &projects,
        "button",
        &[("id", "timelineToggle"), ("aria-expanded", "false")],
    );
    let timeline_collapsed = dom.append(&projects, "div", &[("id", "timelineCollapsed")]);

    let contact = dom.append(&body, "section", &[("id", "contact")]);
    dom.set_geometry(&contact, 2300.0, 500.0);

    let footer = dom.append(&body, "footer", &[]);
    let current_year = dom.append(&footer, "span", &[("id", "currentYear")]);
    let scroll_top = dom.append(&body, "button", &[("id", "scrollToTop")]);

    // =========================================================================
    // Modals
    // =========================================================================
    let template = dom.append(&body, "template", &[("id", "case-study-bridge")]);
    dom.set_inner_html(&template, "<h2>Bridge Retrofit</h2>");

    let case_study_modal = dom.append(&body, "div", &[("id", "caseStudyModal"), ("class", "modal")]);
    let case_study_backdrop = dom.append(
        &case_study_modal,
        "div",
        &[("class", "modal__backdrop"), ("data-modal-close", "")],
    );
    let case_study_close = dom.append(
        &case_study_modal,
        "button",
        &[("class", "modal__close"), ("data-modal-close", "")],
    );
    let case_study_body = dom.append(&case_study_modal, "div", &[("id", "caseStudyBody")]);

    let lightbox_modal = dom.append(&body, "div", &[("id", "lightboxModal"), ("class", "modal")]);
    let lightbox_close = dom.append(
        &lightbox_modal,
        "button",
        &[("class", "modal__close"), ("data-modal-close", "")],
    );
    let lightbox_image = dom.append(&lightbox_modal, "img", &[("id", "lightboxImage")]);

    let resume_modal = dom.append(&body, "div", &[("id", "resumeModal"), ("class", "modal")]);
    dom.append(
        &resume_modal,
        "button",
        &[("class", "modal__close"), ("data-modal-close", "")],
    );
    let resume_frame = dom.append(&resume_modal, "iframe", &[("id", "resumeFrame")]);

    let page = PortfolioPage {
        progress,
        navbar,
        theme_toggle,
        theme_icon,
        toggle,
        menu,
        nav_links,
        hero,
        hero_bg,
        counters,
        reveal,
        external_link,
        case_study_trigger,
        gallery_item,
        resume_button,
        timeline_toggle,
        timeline_collapsed,
        current_year,
        scroll_top,
        case_study_modal,
        case_study_backdrop,
        case_study_close,
        case_study_body,
        lightbox_modal,
        lightbox_close,
        lightbox_image,
        resume_modal,
        resume_frame,
    };
    (dom, page)
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert the four menu mirrors all agree with `open`.
pub fn assert_menu_open(dom: &MemoryDom, page: &PortfolioPage, open: bool) {
    let body = dom.body().unwrap();
    assert_eq!(dom.has_class(&page.menu, OPEN_CLASS), open, "panel class");
    assert_eq!(dom.has_class(&page.toggle, OPEN_CLASS), open, "toggle class");
    assert_eq!(
        dom.attr(&page.toggle, "aria-expanded").as_deref(),
        Some(if open { "true" } else { "false" }),
        "aria-expanded"
    );
    assert_eq!(dom.has_class(&body, MENU_OPEN_BODY_CLASS), open, "body lock");
}

/// Names of the nav links currently marked active.
pub fn active_links(dom: &MemoryDom, page: &PortfolioPage) -> Vec<String> {
    page.nav_links
        .iter()
        .filter(|link| dom.has_class(link, crate::contract::NAV_LINK_ACTIVE_CLASS))
        .filter_map(|link| dom.attr(link, "href"))
        .collect()
}
