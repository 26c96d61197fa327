//! Behaviour configuration.
//!
//! Every tunable of the behaviour layer (scroll thresholds, observer
//! thresholds, animation timing, the storage key and the resume document)
//! lives in [`UiConfig`]. Nothing needs to be configured: the defaults match
//! the stock stylesheet.
//!
//! ## Where config comes from
//!
//! A page can override values by embedding JSON in the markup:
//!
//! ```html
//! <script type="application/json" id="ui-config">
//!   { "scroll": { "navbar_threshold": 80 }, "resume": { "document": "cv.pdf" } }
//! </script>
//! ```
//!
//! The same structure can be written as TOML (see [`stock_config_toml`]) for
//! tooling that templates the page.
//!
//! ## Configuration Options
//!
//! ```toml
//! [scroll]
//! throttle_ms = 16            # Minimum gap between scroll ticks
//! navbar_threshold = 50       # px scrolled before the navbar turns solid
//! scroll_top_threshold = 500  # px scrolled before the back-to-top button shows
//! section_offset = 100        # Extra lead before a section counts as active
//! fallback_nav_height = 70    # Used when the navbar element is missing
//! parallax_factor = 0.3       # Hero background speed relative to scroll
//!
//! [reveal]
//! threshold = 0.1
//! root_margin = "0px 0px -50px 0px"
//!
//! [counters]
//! threshold = 0.3
//! duration_ms = 2000
//!
//! [theme]
//! storage_key = "theme"
//!
//! [resume]
//! document = "assets/resume.pdf"
//! ```
//!
//! Config is sparse: override only the values you need. Unknown keys are
//! rejected to catch typos early.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub counters: CountersConfig,
    pub theme: ThemeConfig,
    pub resume: ResumeConfig,
}

impl UiConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: UiConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: UiConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scroll.throttle_ms == 0 {
            return Err(ConfigError::Validation(
                "scroll.throttle_ms must be greater than 0".into(),
            ));
        }
        let scroll_values = [
            ("scroll.navbar_threshold", self.scroll.navbar_threshold),
            ("scroll.scroll_top_threshold", self.scroll.scroll_top_threshold),
            ("scroll.section_offset", self.scroll.section_offset),
            ("scroll.fallback_nav_height", self.scroll.fallback_nav_height),
            ("scroll.parallax_factor", self.scroll.parallax_factor),
        ];
        for (name, value) in scroll_values {
            if !value.is_finite() {
                return Err(ConfigError::Validation(format!("{name} must be finite")));
            }
        }
        for (name, value) in [
            ("reveal.threshold", self.reveal.threshold),
            ("counters.threshold", self.counters.threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!("{name} must be 0-1")));
            }
        }
        if self.counters.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "counters.duration_ms must be greater than 0".into(),
            ));
        }
        if self.theme.storage_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "theme.storage_key must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Scroll coordinator settings. Distances are CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Minimum time between two scroll ticks, in milliseconds.
    pub throttle_ms: u32,
    pub navbar_threshold: f64,
    pub scroll_top_threshold: f64,
    /// Subtracted from each section top (in addition to the navbar height)
    /// so a section activates slightly before it reaches the navbar.
    pub section_offset: f64,
    pub fallback_nav_height: f64,
    pub parallax_factor: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 16,
            navbar_threshold: 50.0,
            scroll_top_threshold: 500.0,
            section_offset: 100.0,
            fallback_nav_height: 70.0,
            parallax_factor: 0.3,
        }
    }
}

/// Reveal-on-scroll observer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// `IntersectionObserver` root margin (CSS margin syntax).
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountersConfig {
    pub threshold: f64,
    pub duration_ms: u32,
}

impl Default for CountersConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            duration_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// `localStorage` key holding `"light"` or `"dark"`.
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResumeConfig {
    /// Path loaded into the resume viewer iframe on first open.
    pub document: String,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            document: "assets/resume.pdf".into(),
        }
    }
}

/// Returns a fully-commented stock config with all keys and explanations.
pub fn stock_config_toml() -> &'static str {
    r##"# Portfolio behaviour configuration
# =================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Scroll effects
# ---------------------------------------------------------------------------
[scroll]
# Minimum gap between two scroll ticks, in milliseconds (one frame at 60Hz).
throttle_ms = 16

# Pixels scrolled before the navbar switches to its solid style.
navbar_threshold = 50.0

# Pixels scrolled before the back-to-top button appears.
scroll_top_threshold = 500.0

# Extra lead (px) before a section's nav link becomes active.
section_offset = 100.0

# Navbar height assumed when the navbar element is missing.
fallback_nav_height = 70.0

# Hero background speed relative to scroll (0 = fixed, 1 = scrolls with page).
parallax_factor = 0.3

# ---------------------------------------------------------------------------
# Reveal-on-scroll
# ---------------------------------------------------------------------------
[reveal]
# Fraction of an element that must be visible before it reveals (0-1).
threshold = 0.1

# Observer root margin; a negative bottom margin reveals slightly later.
root_margin = "0px 0px -50px 0px"

# ---------------------------------------------------------------------------
# Animated counters
# ---------------------------------------------------------------------------
[counters]
# Fraction of the stats block that must be visible to start counting (0-1).
threshold = 0.3

# Length of the count-up animation in milliseconds.
duration_ms = 2000

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# localStorage key for the persisted light/dark preference.
storage_key = "theme"

# ---------------------------------------------------------------------------
# Resume viewer
# ---------------------------------------------------------------------------
[resume]
# Document loaded into the resume iframe the first time it opens.
document = "assets/resume.pdf"
"##
}
