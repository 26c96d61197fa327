//! Visibility-driven animations.
//!
//! Both animators are fed by an `IntersectionObserver` owned by the
//! backend; this module only decides what to do with an entry:
//!
//! - [`reveal`]: fade-in of `.animate-on-scroll` elements, once each
//! - [`counters`]: one-shot count-up of the stats block, framed by
//!   `requestAnimationFrame`

pub mod counters;
pub mod reveal;

pub use counters::{AnimationStatus, CounterAnimation, CounterError, CounterSpec, Counters};
pub use reveal::Reveal;
