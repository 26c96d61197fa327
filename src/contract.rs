//! Element ids, classes and data attributes shared with the page markup and
//! stylesheet. The markup is authored elsewhere; these names are the whole
//! interface between it and this crate.

// Navigation
pub const NAVBAR_ID: &str = "navbar";
pub const NAV_TOGGLE_ID: &str = "navToggle";
pub const NAV_MENU_ID: &str = "navMenu";
pub const NAV_LINK_CLASS: &str = "nav__link";
pub const NAV_LINK_ACTIVE_CLASS: &str = "nav__link--active";
pub const NAVBAR_SCROLLED_CLASS: &str = "is-scrolled";
pub const OPEN_CLASS: &str = "is-open";
pub const MENU_OPEN_BODY_CLASS: &str = "menu-open";

// Scroll affordances
pub const SCROLL_TOP_ID: &str = "scrollToTop";
pub const SCROLL_TOP_VISIBLE_CLASS: &str = "visible";
pub const PROGRESS_BAR_ID: &str = "scrollProgress";
pub const HERO_ID: &str = "hero";
pub const HERO_BACKGROUND_CLASS: &str = "hero__bg";

// Theme
pub const THEME_TOGGLE_ID: &str = "themeToggle";
pub const THEME_ATTR: &str = "data-theme";
pub const ICON_MOON_CLASS: &str = "fa-moon";
pub const ICON_SUN_CLASS: &str = "fa-sun";

// Reveal and counters
pub const REVEAL_CLASS: &str = "animate-on-scroll";
pub const REVEALED_CLASS: &str = "is-visible";
pub const DELAY_ATTR: &str = "data-delay";
pub const STATS_ID: &str = "stats";
pub const TARGET_ATTR: &str = "data-target";
pub const PREFIX_ATTR: &str = "data-prefix";
pub const SUFFIX_ATTR: &str = "data-suffix";

// Modals
pub const MODAL_CLASS: &str = "modal";
pub const MODAL_CLOSE_CLASS: &str = "modal__close";
pub const MODAL_OPEN_BODY_CLASS: &str = "modal-open";
pub const MODAL_CLOSE_ATTR: &str = "data-modal-close";
pub const CASE_STUDY_ATTR: &str = "data-case-study";
pub const CASE_STUDY_MODAL_ID: &str = "caseStudyModal";
pub const CASE_STUDY_BODY_ID: &str = "caseStudyBody";
pub const CASE_STUDY_TEMPLATE_PREFIX: &str = "case-study-";
pub const LIGHTBOX_ATTR: &str = "data-lightbox";
pub const LIGHTBOX_MODAL_ID: &str = "lightboxModal";
pub const LIGHTBOX_IMAGE_ID: &str = "lightboxImage";
pub const RESUME_TRIGGER_CLASS: &str = "js-open-resume";
pub const RESUME_MODAL_ID: &str = "resumeModal";
pub const RESUME_FRAME_ID: &str = "resumeFrame";

// Page chrome
pub const TIMELINE_TOGGLE_ID: &str = "timelineToggle";
pub const TIMELINE_COLLAPSED_ID: &str = "timelineCollapsed";
pub const TIMELINE_EXPANDED_CLASS: &str = "is-expanded";
pub const CURRENT_YEAR_ID: &str = "currentYear";
pub const LOADED_BODY_CLASS: &str = "loaded";
pub const CONFIG_SCRIPT_ID: &str = "ui-config";
