//! One-shot animated counters.
//!
//! The stats block (`#stats`) holds `.stat__number`-style elements carrying
//! `data-target` (an integer) and optional `data-prefix` / `data-suffix`.
//! The first time the block becomes visible every counter counts up from 0
//! over `duration_ms` with an ease-out-cubic curve; the backend then drops
//! its observer and nothing can trigger the animation again.

use crate::config::CountersConfig;
use crate::contract::{PREFIX_ATTR, STATS_ID, SUFFIX_ATTR, TARGET_ATTR};
use crate::dom::{Dom, Selector};
use crate::session::UiSession;
use log::{debug, warn};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    #[error("counter target '{0}' is not an integer")]
    InvalidTarget(String),
}

/// `1 - (1 - t)^3`, with `t` clamped to `0..=1`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Value shown at progress `t`: `round(ease_out_cubic(t) * target)`.
///
/// ```
/// # use folio_ui::animate::counters::counter_value;
/// assert_eq!(counter_value(150, 0.0), 0);
/// assert_eq!(counter_value(150, 1.0), 150);
/// ```
pub fn counter_value(target: i64, t: f64) -> i64 {
    (ease_out_cubic(t) * target as f64).round() as i64
}

/// A counter element with its parsed declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSpec<N> {
    pub node: N,
    pub target: i64,
    pub prefix: String,
    pub suffix: String,
}

impl<N> CounterSpec<N> {
    /// Parse the data attributes of `node`. A non-integer `data-target` is
    /// rejected rather than displayed as garbage.
    pub fn parse<D: Dom<Node = N>>(dom: &D, node: N) -> Result<Self, CounterError> {
        let raw = dom.attr(&node, TARGET_ATTR).unwrap_or_default();
        let target = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| CounterError::InvalidTarget(raw.clone()))?;
        Ok(Self {
            prefix: dom.attr(&node, PREFIX_ATTR).unwrap_or_default(),
            suffix: dom.attr(&node, SUFFIX_ATTR).unwrap_or_default(),
            node,
            target,
        })
    }

    pub fn display(&self, t: f64) -> String {
        format!("{}{}{}", self.prefix, counter_value(self.target, t), self.suffix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Finished,
}

/// An in-flight count-up. Runs to completion; there is no cancel.
#[derive(Debug)]
pub struct CounterAnimation<N> {
    specs: Vec<CounterSpec<N>>,
    start_ms: Option<f64>,
    duration_ms: f64,
}

impl<N> CounterAnimation<N> {
    pub fn new(specs: Vec<CounterSpec<N>>, duration_ms: f64) -> Self {
        Self {
            specs,
            start_ms: None,
            duration_ms,
        }
    }

    /// Render the frame at `now_ms`. The first frame fixes the start time.
    pub fn frame<D: Dom<Node = N>>(&mut self, dom: &D, now_ms: f64) -> AnimationStatus {
        let start = *self.start_ms.get_or_insert(now_ms);
        let t = ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0);
        for spec in &self.specs {
            dom.set_text(&spec.node, &spec.display(t));
        }
        if t >= 1.0 {
            AnimationStatus::Finished
        } else {
            AnimationStatus::Running
        }
    }
}

/// The stats block and its counters.
pub struct Counters<N> {
    container: N,
    counters: Vec<N>,
    threshold: f64,
    duration_ms: f64,
}

impl<N: Clone> Counters<N> {
    pub fn attach<D: Dom<Node = N>>(dom: &D, config: &CountersConfig) -> Option<Self> {
        let Some(container) = dom.by_id(STATS_ID) else {
            debug!("#{STATS_ID} missing; animated counters disabled");
            return None;
        };
        let counters = dom.query_all(Some(&container), &Selector::Attr(TARGET_ATTR));
        Some(Self {
            container,
            counters,
            threshold: config.threshold,
            duration_ms: f64::from(config.duration_ms),
        })
    }

    /// Element the trigger observer watches.
    pub fn container(&self) -> &N {
        &self.container
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The block became visible. Returns the animation to drive on the
    /// first trigger only; later calls return `None`.
    pub fn trigger<D: Dom<Node = N>>(
        &self,
        dom: &D,
        session: &mut UiSession<N>,
    ) -> Option<CounterAnimation<N>> {
        if !session.claim_counters() {
            return None;
        }
        let specs = self
            .counters
            .iter()
            .filter_map(|node| match CounterSpec::parse(dom, node.clone()) {
                Ok(spec) => Some(spec),
                Err(err) => {
                    warn!("skipping counter: {err}");
                    None
                }
            })
            .collect();
        Some(CounterAnimation::new(specs, self.duration_ms))
    }
}
