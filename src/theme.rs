//! Light/dark theme controller.
//!
//! The active theme is the `data-theme` attribute on `<html>`; no attribute
//! means dark. The toggle button shows the *other* theme's icon (a moon
//! while light is active, a sun while dark is active) and an `aria-label`
//! naming the action.
//!
//! Persistence is best-effort: a failing storage is logged and the page
//! keeps working with the in-memory attribute only.

use crate::contract::{ICON_MOON_CLASS, ICON_SUN_CLASS, THEME_ATTR, THEME_TOGGLE_ID};
use crate::dom::{Dom, Selector, Storage};
use log::{debug, warn};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme '{0}' (expected \"light\" or \"dark\")")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn opposite(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon class offered by the toggle while this theme is active.
    fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => ICON_MOON_CLASS,
            Theme::Dark => ICON_SUN_CLASS,
        }
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemeController<N> {
    root: Option<N>,
    toggle: Option<N>,
    icon: Option<N>,
    storage_key: String,
}

impl<N: Clone + PartialEq> ThemeController<N> {
    pub fn attach<D: Dom<Node = N>>(dom: &D, storage_key: &str) -> Self {
        let toggle = dom.by_id(THEME_TOGGLE_ID);
        let icon = toggle
            .as_ref()
            .and_then(|t| dom.query(Some(t), &Selector::Tag("i")));
        if toggle.is_none() {
            debug!("theme toggle #{THEME_TOGGLE_ID} missing; theme switching disabled");
        }
        Self {
            root: dom.root(),
            toggle,
            icon,
            storage_key: storage_key.to_string(),
        }
    }

    pub fn toggle_button(&self) -> Option<&N> {
        self.toggle.as_ref()
    }

    /// Apply the persisted theme, else light when the platform prefers it.
    /// Otherwise the page stays dark with no attribute set. Returns the
    /// theme in effect.
    pub fn init<D: Dom<Node = N>>(&self, dom: &D, storage: &impl Storage) -> Theme {
        match storage.get(&self.storage_key) {
            Ok(Some(value)) => match value.parse::<Theme>() {
                Ok(theme) => {
                    self.apply(dom, theme);
                    return theme;
                }
                Err(err) => warn!("ignoring persisted theme: {err}"),
            },
            Ok(None) => {}
            Err(err) => warn!("theme preference unreadable, using default: {err}"),
        }
        if dom.prefers_light() {
            // Follows the platform; not persisted so a later system change
            // still applies on the next visit.
            self.apply(dom, Theme::Light);
            return Theme::Light;
        }
        self.sync_toggle(dom, Theme::Dark);
        Theme::Dark
    }

    /// Apply `theme` to the document and persist it.
    pub fn set_theme<D: Dom<Node = N>>(&self, dom: &D, storage: &impl Storage, theme: Theme) {
        self.apply(dom, theme);
        if let Err(err) = storage.set(&self.storage_key, theme.as_str()) {
            warn!("theme preference not saved: {err}");
        }
    }

    /// Current theme as read from the document; a missing or foreign value
    /// counts as dark.
    pub fn current<D: Dom<Node = N>>(&self, dom: &D) -> Theme {
        self.root
            .as_ref()
            .and_then(|root| dom.attr(root, THEME_ATTR))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn toggle<D: Dom<Node = N>>(&self, dom: &D, storage: &impl Storage) -> Theme {
        let next = self.current(dom).opposite();
        self.set_theme(dom, storage, next);
        next
    }

    fn apply<D: Dom<Node = N>>(&self, dom: &D, theme: Theme) {
        if let Some(root) = &self.root {
            dom.set_attr(root, THEME_ATTR, theme.as_str());
        }
        self.sync_toggle(dom, theme);
    }

    fn sync_toggle<D: Dom<Node = N>>(&self, dom: &D, theme: Theme) {
        if let Some(icon) = &self.icon {
            dom.remove_class(icon, theme.opposite().toggle_icon());
            dom.add_class(icon, theme.toggle_icon());
        }
        if let Some(toggle) = &self.toggle {
            let label = format!("Switch to {} theme", theme.opposite());
            dom.set_attr(toggle, "aria-label", &label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, MemoryStorage, NodeId};

    fn page() -> (MemoryDom, NodeId, NodeId) {
        let dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let toggle = dom.append(&body, "button", &[("id", "themeToggle")]);
        let icon = dom.append(&toggle, "i", &[("class", "fas fa-sun")]);
        (dom, toggle, icon)
    }

    fn theme_attr(dom: &MemoryDom) -> Option<String> {
        dom.attr(&dom.root().unwrap(), THEME_ATTR)
    }

    #[test]
    fn parse_two_value_domain() {
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(
            "sepia".parse::<Theme>(),
            Err(ThemeError::Unknown("sepia".into()))
        );
    }

    #[test]
    fn double_flip_is_identity() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.opposite().opposite(), theme);
        }
    }

    #[test]
    fn init_applies_persisted_value() {
        let (dom, _, icon) = page();
        let storage = MemoryStorage::with_value("theme", "light");
        let controller = ThemeController::attach(&dom, "theme");
        assert_eq!(controller.init(&dom, &storage), Theme::Light);
        assert_eq!(theme_attr(&dom).as_deref(), Some("light"));
        assert!(dom.has_class(&icon, ICON_MOON_CLASS));
        assert!(!dom.has_class(&icon, ICON_SUN_CLASS));
    }

    #[test]
    fn init_follows_platform_light_preference_without_persisting() {
        let (dom, _, _) = page();
        dom.set_prefers_light(true);
        let storage = MemoryStorage::new();
        let controller = ThemeController::attach(&dom, "theme");
        assert_eq!(controller.init(&dom, &storage), Theme::Light);
        assert_eq!(theme_attr(&dom).as_deref(), Some("light"));
        assert_eq!(storage.get("theme").unwrap(), None);
    }

    #[test]
    fn init_defaults_to_dark_without_attribute() {
        let (dom, toggle, icon) = page();
        let controller = ThemeController::attach(&dom, "theme");
        assert_eq!(controller.init(&dom, &MemoryStorage::new()), Theme::Dark);
        assert_eq!(theme_attr(&dom), None);
        assert!(dom.has_class(&icon, ICON_SUN_CLASS));
        assert_eq!(
            dom.attr(&toggle, "aria-label").as_deref(),
            Some("Switch to light theme")
        );
    }

    #[test]
    fn init_ignores_invalid_persisted_value() {
        let (dom, _, _) = page();
        let storage = MemoryStorage::with_value("theme", "sepia");
        let controller = ThemeController::attach(&dom, "theme");
        assert_eq!(controller.init(&dom, &storage), Theme::Dark);
        assert_eq!(theme_attr(&dom), None);
    }

    #[test]
    fn toggle_flips_and_persists() {
        let (dom, _, icon) = page();
        let storage = MemoryStorage::new();
        let controller = ThemeController::attach(&dom, "theme");
        // No attribute yet: treated as dark, so the first toggle goes light.
        assert_eq!(controller.toggle(&dom, &storage), Theme::Light);
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("light"));
        assert!(dom.has_class(&icon, ICON_MOON_CLASS));
        assert_eq!(controller.toggle(&dom, &storage), Theme::Dark);
        assert_eq!(theme_attr(&dom).as_deref(), Some("dark"));
        assert!(dom.has_class(&icon, ICON_SUN_CLASS));
        assert!(dom.has_class(&icon, "fas"));
    }

    #[test]
    fn storage_failure_still_applies_theme() {
        let (dom, _, _) = page();
        let storage = MemoryStorage::unavailable();
        let controller = ThemeController::attach(&dom, "theme");
        assert_eq!(controller.init(&dom, &storage), Theme::Dark);
        controller.set_theme(&dom, &storage, Theme::Light);
        assert_eq!(controller.current(&dom), Theme::Light);
    }

    #[test]
    fn works_without_toggle_button() {
        let dom = MemoryDom::new();
        let controller = ThemeController::attach(&dom, "theme");
        controller.set_theme(&dom, &MemoryStorage::new(), Theme::Light);
        assert_eq!(theme_attr(&dom).as_deref(), Some("light"));
    }
}
