//! Document backend trait and shared types.
//!
//! Every controller in this crate talks to the page through [`Dom`] and
//! [`Storage`], so the behaviour layer is backend-agnostic:
//!
//! | Backend | Where it runs | Used for |
//! |---|---|---|
//! | [`MemoryDom`] / [`MemoryStorage`] | anywhere | tests, headless tooling |
//! | `WebDom` / `WebStorage` | `wasm32` only | the live page (`web-sys`) |
//!
//! Methods take `&self`: a browser document is a shared, internally mutable
//! object, and the memory backend mirrors that with a `RefCell`.

pub mod memory;
mod selector;

pub use memory::{MemoryDom, MemoryStorage, NodeId};
pub use selector::Selector;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage write rejected: {0}")]
    WriteRejected(String),
}

/// Layout box of an element, in CSS pixels relative to its offset parent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    pub offset_top: f64,
    pub offset_height: f64,
}

impl Geometry {
    pub fn bottom(&self) -> f64 {
        self.offset_top + self.offset_height
    }
}

/// Window scroll position and document extent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
    pub document_height: f64,
}

/// The document operations the behaviour layer needs.
///
/// Lookups return `Option`: a missing element means the dependent feature is
/// not wired up, never an error.
pub trait Dom {
    /// Handle to one element. Equality is element identity.
    type Node: Clone + PartialEq + std::fmt::Debug + 'static;

    fn by_id(&self, id: &str) -> Option<Self::Node>;

    /// All matches in document order, searched under `scope` (exclusive) or
    /// the whole document when `scope` is `None`.
    fn query_all(&self, scope: Option<&Self::Node>, selector: &Selector<'_>) -> Vec<Self::Node>;

    fn query(&self, scope: Option<&Self::Node>, selector: &Selector<'_>) -> Option<Self::Node> {
        self.query_all(scope, selector).into_iter().next()
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &Selector<'_>) -> Option<Self::Node>;

    /// The `<html>` element.
    fn root(&self) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    fn set_class(&self, node: &Self::Node, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attr(&self, node: &Self::Node, name: &str, value: &str);

    /// Set one inline style property (`transform`, `width`, ...).
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn inner_html(&self, node: &Self::Node) -> String;
    fn set_inner_html(&self, node: &Self::Node, html: &str);
    fn set_text(&self, node: &Self::Node, text: &str);

    /// Inclusive containment: an element contains itself.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    fn focus(&self, node: &Self::Node);
    fn active_element(&self) -> Option<Self::Node>;

    fn geometry(&self, node: &Self::Node) -> Geometry;
    fn viewport(&self) -> Viewport;

    /// Smooth-scroll the window to `top`.
    fn scroll_to(&self, top: f64);

    /// Hostname of the current page, without port.
    fn page_host(&self) -> String;

    /// Whether the platform reports `prefers-color-scheme: light`.
    fn prefers_light(&self) -> bool;
}

/// Key-value persistence for the theme preference.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
