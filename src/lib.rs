//! # Folio UI
//!
//! The client-side behaviour layer of a single-page portfolio site. The page
//! itself is static HTML and CSS; this crate adds everything that moves:
//! the mobile menu, scroll-driven styling, theme switching, reveal and
//! count-up animations, and the modal dialogs.
//!
//! # Architecture: Logic Over a Document Backend
//!
//! Every behaviour is written against the [`dom::Dom`] trait rather than the
//! browser directly:
//!
//! ```text
//! browser events ──► web (wasm32 only) ──► page::Portfolio ──► controllers ──► dom::Dom
//!                                                                     │
//!                                        tests ──► dom::MemoryDom ────┘
//! ```
//!
//! The browser backend ([`web`], compiled for `wasm32` only) is a thin
//! adapter over `web-sys`: it forwards events and owns the observers and
//! animation frames. All decisions live in the controllers, which run
//! unchanged against the in-memory backend in tests.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`page`] | [`page::Portfolio`], one entry point per browser event |
//! | [`dom`] | Backend traits, typed selectors, the in-memory backend |
//! | [`contract`] | Element ids, class names and attributes shared with the markup |
//! | [`config`] | Tunable thresholds and durations, TOML or embedded JSON |
//! | [`throttle`] | Leading-edge rate limiting for the scroll listener |
//! | [`theme`] | Light/dark theme with persisted preference |
//! | [`nav`] | Mobile navigation menu |
//! | [`focus_trap`] | Tab cycling shared by the menu and modals |
//! | [`scroll`] | Scroll effects and the coordinator that ticks them |
//! | [`animate`] | Reveal-on-scroll and one-shot animated counters |
//! | [`modal`] | Modal dialogs and their three content producers |
//! | [`links`] | External links in new tabs, smooth anchor scrolling |
//! | [`session`] | Per-page-load state: focus to restore, one-shot flags |
//! | [`events`] | Key and event-outcome types the backends translate into |
//!
//! # Design Decisions
//!
//! ## Elements Are Optional
//!
//! Any element the behaviour layer expects may be missing from a given page.
//! Controllers attach to what exists and log at debug level what they skip;
//! nothing panics and one missing element never disables an unrelated
//! feature.
//!
//! ## Time Comes From the Caller
//!
//! The throttle and the counter animation never read a clock. The browser
//! backend passes event timestamps and animation-frame times in, which keeps
//! both deterministic under test.
//!
//! ## One Modal at a Time
//!
//! Opening a modal while another is open is refused with
//! [`modal::ModalError::AlreadyOpen`]. There is a single slot for the focus
//! to restore, so stacking would lose it.

pub mod animate;
pub mod config;
pub mod contract;
pub mod dom;
pub mod events;
pub mod focus_trap;
pub mod links;
pub mod modal;
pub mod nav;
pub mod page;
pub mod scroll;
pub mod session;
pub mod theme;
pub mod throttle;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::UiConfig;
pub use page::Portfolio;

#[cfg(test)]
pub(crate) mod test_helpers;
