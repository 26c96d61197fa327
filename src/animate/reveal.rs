use crate::config::RevealConfig;
use crate::contract::{DELAY_ATTR, REVEAL_CLASS, REVEALED_CLASS};
use crate::dom::{Dom, Selector};
use log::warn;

/// Reveal-on-scroll. Observer options come from [`RevealConfig`].
#[derive(Debug, Clone)]
pub struct Reveal {
    pub threshold: f64,
    pub root_margin: String,
}

impl Reveal {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold,
            root_margin: config.root_margin.clone(),
        }
    }

    /// Elements the observer should watch.
    pub fn targets<D: Dom>(&self, dom: &D) -> Vec<D::Node> {
        dom.query_all(None, &Selector::Class(REVEAL_CLASS))
    }

    /// Handle an intersection entry. Only intersecting entries reveal, and
    /// revealing an already revealed element changes nothing.
    pub fn on_intersect<D: Dom>(&self, dom: &D, node: &D::Node, is_intersecting: bool) {
        if !is_intersecting || dom.has_class(node, REVEALED_CLASS) {
            return;
        }
        if let Some(raw) = dom.attr(node, DELAY_ATTR) {
            match transition_delay(&raw) {
                Some(delay) => dom.set_style(node, "transition-delay", &delay),
                None => warn!("ignoring unparseable {DELAY_ATTR}=\"{raw}\""),
            }
        }
        dom.add_class(node, REVEALED_CLASS);
    }
}

/// Normalise a `data-delay` value to a CSS time. Bare numbers are
/// milliseconds; values already carrying `ms` or `s` pass through.
fn transition_delay(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let (number, unit) = if let Some(n) = raw.strip_suffix("ms") {
        (n, "ms")
    } else if let Some(n) = raw.strip_suffix('s') {
        (n, "s")
    } else {
        (raw, "ms")
    };
    let value: f64 = number.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then(|| format!("{value}{unit}"))
}
