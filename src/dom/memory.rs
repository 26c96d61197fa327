//! In-memory document and storage backends.
//!
//! [`MemoryDom`] is a flat arena of elements with parent/child links. It
//! implements exactly the surface [`Dom`] needs: attributes (classes live in
//! the `class` attribute as in HTML), inline styles, markup/text slots,
//! focus, geometry and window metrics. Layout is not computed; tests place
//! elements with [`MemoryDom::set_geometry`] and scroll with
//! [`MemoryDom::set_scroll_y`].
//!
//! ```
//! use folio_ui::dom::{Dom, MemoryDom};
//!
//! let dom = MemoryDom::new();
//! let body = dom.body().unwrap();
//! let nav = dom.append(&body, "nav", &[("id", "navbar"), ("class", "nav")]);
//! dom.add_class(&nav, "is-scrolled");
//! assert_eq!(dom.attr(&nav, "class").as_deref(), Some("nav is-scrolled"));
//! ```

use super::{Dom, Geometry, Selector, Storage, StorageError, Viewport};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

/// Handle into a [`MemoryDom`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    inner_html: String,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    geometry: Geometry,
}

#[derive(Debug)]
struct Document {
    elements: Vec<Element>,
    focused: Option<NodeId>,
    viewport: Viewport,
    host: String,
    prefers_light: bool,
    scroll_requests: Vec<f64>,
}

pub struct MemoryDom {
    doc: RefCell<Document>,
}

const ROOT: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// An empty `<html><body></body></html>` document on host `localhost`.
    pub fn new() -> Self {
        let root = Element {
            tag: "html".into(),
            children: vec![BODY],
            ..Default::default()
        };
        let body = Element {
            tag: "body".into(),
            parent: Some(ROOT),
            ..Default::default()
        };
        Self {
            doc: RefCell::new(Document {
                elements: vec![root, body],
                focused: None,
                viewport: Viewport::default(),
                host: "localhost".into(),
                prefers_light: false,
                scroll_requests: Vec::new(),
            }),
        }
    }

    /// Append a new element under `parent` with the given attributes.
    pub fn append(&self, parent: &NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut doc = self.doc.borrow_mut();
        let id = NodeId(doc.elements.len());
        doc.elements.push(Element {
            tag: tag.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            parent: Some(*parent),
            ..Default::default()
        });
        doc.elements[parent.0].children.push(id);
        id
    }

    /// Detach every child of `node` (the elements stay in the arena).
    pub fn clear_children(&self, node: &NodeId) {
        let mut doc = self.doc.borrow_mut();
        let children = std::mem::take(&mut doc.elements[node.0].children);
        for child in children {
            doc.elements[child.0].parent = None;
        }
    }

    pub fn set_geometry(&self, node: &NodeId, offset_top: f64, offset_height: f64) {
        self.doc.borrow_mut().elements[node.0].geometry = Geometry {
            offset_top,
            offset_height,
        };
    }

    pub fn set_scroll_y(&self, scroll_y: f64) {
        self.doc.borrow_mut().viewport.scroll_y = scroll_y;
    }

    pub fn set_viewport(&self, height: f64, document_height: f64) {
        let mut doc = self.doc.borrow_mut();
        doc.viewport.height = height;
        doc.viewport.document_height = document_height;
    }

    pub fn set_host(&self, host: &str) {
        self.doc.borrow_mut().host = host.to_string();
    }

    pub fn set_prefers_light(&self, prefers_light: bool) {
        self.doc.borrow_mut().prefers_light = prefers_light;
    }

    pub fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.doc.borrow().elements[node.0].styles.get(property).cloned()
    }

    pub fn text(&self, node: &NodeId) -> String {
        self.doc.borrow().elements[node.0].text.clone()
    }

    /// Every `scroll_to` target requested so far, oldest first.
    pub fn scroll_requests(&self) -> Vec<f64> {
        self.doc.borrow().scroll_requests.clone()
    }

    fn is_attached(doc: &Document, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ROOT {
                return true;
            }
            current = doc.elements[id.0].parent;
        }
        false
    }

    fn descendants(doc: &Document, scope: NodeId, out: &mut Vec<NodeId>) {
        for &child in &doc.elements[scope.0].children {
            out.push(child);
            Self::descendants(doc, child, out);
        }
    }

    fn matches(doc: &Document, node: NodeId, selector: &Selector<'_>) -> bool {
        let element = &doc.elements[node.0];
        selector.matches(&element.tag, |name| {
            element.attrs.get(name).map(String::as_str)
        })
    }

    fn edit_classes(&self, node: &NodeId, edit: impl FnOnce(&mut Vec<String>)) {
        let mut doc = self.doc.borrow_mut();
        let attrs = &mut doc.elements[node.0].attrs;
        let mut classes: Vec<String> = attrs
            .get("class")
            .map(|list| list.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        edit(&mut classes);
        attrs.insert("class".into(), classes.join(" "));
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn by_id(&self, id: &str) -> Option<NodeId> {
        self.query(None, &Selector::AttrEq("id", id))
    }

    fn query_all(&self, scope: Option<&NodeId>, selector: &Selector<'_>) -> Vec<NodeId> {
        let doc = self.doc.borrow();
        let mut candidates = Vec::new();
        Self::descendants(&doc, scope.copied().unwrap_or(ROOT), &mut candidates);
        candidates
            .into_iter()
            .filter(|&node| Self::matches(&doc, node, selector))
            .collect()
    }

    fn closest(&self, node: &NodeId, selector: &Selector<'_>) -> Option<NodeId> {
        let doc = self.doc.borrow();
        let mut current = Some(*node);
        while let Some(id) = current {
            if Self::matches(&doc, id, selector) {
                return Some(id);
            }
            current = doc.elements[id.0].parent;
        }
        None
    }

    fn root(&self) -> Option<NodeId> {
        Some(ROOT)
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.doc.borrow().elements[node.0]
            .attrs
            .get("class")
            .map(|list| list.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.edit_classes(node, |classes| {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.edit_classes(node, |classes| classes.retain(|c| c != class));
    }

    fn attr(&self, node: &NodeId, name: &str) -> Option<String> {
        self.doc.borrow().elements[node.0].attrs.get(name).cloned()
    }

    fn set_attr(&self, node: &NodeId, name: &str, value: &str) {
        self.doc.borrow_mut().elements[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.doc.borrow_mut().elements[node.0]
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn inner_html(&self, node: &NodeId) -> String {
        self.doc.borrow().elements[node.0].inner_html.clone()
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        self.doc.borrow_mut().elements[node.0].inner_html = html.to_string();
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.doc.borrow_mut().elements[node.0].text = text.to_string();
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let doc = self.doc.borrow();
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == *ancestor {
                return true;
            }
            current = doc.elements[id.0].parent;
        }
        false
    }

    fn focus(&self, node: &NodeId) {
        let mut doc = self.doc.borrow_mut();
        if Self::is_attached(&doc, *node) {
            doc.focused = Some(*node);
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        self.doc.borrow().focused
    }

    fn geometry(&self, node: &NodeId) -> Geometry {
        self.doc.borrow().elements[node.0].geometry
    }

    fn viewport(&self) -> Viewport {
        self.doc.borrow().viewport
    }

    fn scroll_to(&self, top: f64) {
        let mut doc = self.doc.borrow_mut();
        doc.scroll_requests.push(top);
        doc.viewport.scroll_y = top;
    }

    fn page_host(&self) -> String {
        self.doc.borrow().host.clone()
    }

    fn prefers_light(&self) -> bool {
        self.doc.borrow().prefers_light
    }
}

/// `localStorage` stand-in. [`MemoryStorage::unavailable`] builds one whose
/// every call fails, like storage in a locked-down private window.
#[derive(Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
    unavailable: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        let storage = Self::default();
        storage.unavailable.set(true);
        storage
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable.get() {
            return Err(StorageError::Unavailable("storage disabled".into()));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable.get() {
            return Err(StorageError::Unavailable("storage disabled".into()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_all_returns_document_order() {
        let dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let a = dom.append(&body, "section", &[("id", "a")]);
        let inner = dom.append(&a, "section", &[("id", "inner")]);
        let b = dom.append(&body, "section", &[("id", "b")]);
        let found = dom.query_all(None, &Selector::TagWithAttr("section", "id"));
        assert_eq!(found, vec![a, inner, b]);
    }

    #[test]
    fn scoped_query_excludes_scope_itself() {
        let dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let menu = dom.append(&body, "ul", &[("tabindex", "0")]);
        let link = dom.append(&menu, "a", &[("href", "#x")]);
        assert_eq!(dom.query_all(Some(&menu), &Selector::Focusable), vec![link]);
    }

    #[test]
    fn class_edits_are_idempotent() {
        let dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let el = dom.append(&body, "div", &[]);
        dom.add_class(&el, "is-open");
        dom.add_class(&el, "is-open");
        assert_eq!(dom.attr(&el, "class").as_deref(), Some("is-open"));
        dom.remove_class(&el, "is-open");
        dom.remove_class(&el, "is-open");
        assert!(!dom.has_class(&el, "is-open"));
    }

    #[test]
    fn closest_is_inclusive() {
        let dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let card = dom.append(&body, "div", &[("data-lightbox", "")]);
        let img = dom.append(&card, "img", &[]);
        assert_eq!(dom.closest(&img, &Selector::Attr("data-lightbox")), Some(card));
        assert_eq!(dom.closest(&card, &Selector::Attr("data-lightbox")), Some(card));
        assert_eq!(dom.closest(&body, &Selector::Attr("data-lightbox")), None);
    }

    #[test]
    fn detached_elements_cannot_take_focus() {
        let dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let panel = dom.append(&body, "div", &[]);
        let button = dom.append(&panel, "button", &[]);
        dom.clear_children(&panel);
        dom.focus(&button);
        assert_eq!(dom.active_element(), None);
    }

    #[test]
    fn unavailable_storage_fails_both_ways() {
        let storage = MemoryStorage::unavailable();
        assert!(storage.get("theme").is_err());
        assert!(storage.set("theme", "light").is_err());
    }
}
