//! Browser backend and entry point (`wasm32` only).
//!
//! [`WebDom`] and [`WebStorage`] implement the backend traits over
//! `web-sys`. [`start`] runs when the module is instantiated: it installs
//! the console logger, reads the embedded config, mounts a
//! [`Portfolio`] once the document is parsed, and wires the listeners,
//! observers and animation frames to it.
//!
//! Listeners live for the whole page, so their closures are leaked with
//! `forget()`. The counter animation closure is the exception: it drops
//! itself after the last frame.

use crate::animate::AnimationStatus;
use crate::config::UiConfig;
use crate::contract::CONFIG_SCRIPT_ID;
use crate::dom::{Dom, Geometry, Selector, Storage, StorageError, Viewport};
use crate::events::{Key, KeyPress, ReadyState};
use crate::page::Portfolio;
use crate::throttle::throttle;
use log::{Level, LevelFilter, Log, Metadata, Record, debug, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, HtmlElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    ScrollBehavior, ScrollToOptions, Window,
};

type App = Portfolio<WebDom, WebStorage>;

// =========================================================================
// Logging
// =========================================================================

/// `log` records to the browser console, one console method per level.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[folio-ui] {}", record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

// =========================================================================
// Backend
// =========================================================================

pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, scope: Option<&Element>, selector: &Selector<'_>) -> Vec<Element> {
        let css = selector.to_css();
        let list = match scope {
            Some(scope) => scope.query_selector_all(&css),
            None => self.document.query_selector_all(&css),
        };
        match list {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(err) => {
                warn!("selector {css} rejected: {err:?}");
                Vec::new()
            }
        }
    }

    fn closest(&self, node: &Element, selector: &Selector<'_>) -> Option<Element> {
        node.closest(&selector.to_css()).ok().flatten()
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            debug!("adding class {class} failed: {err:?}");
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            debug!("removing class {class} failed: {err:?}");
        }
    }

    fn attr(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attr(&self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            debug!("setting {name} failed: {err:?}");
        }
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            if let Err(err) = el.style().set_property(property, value) {
                debug!("setting style {property} failed: {err:?}");
            }
        }
    }

    fn inner_html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node;
        ancestor.contains(Some(node))
    }

    fn focus(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            if let Err(err) = el.focus() {
                debug!("focus failed: {err:?}");
            }
        }
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn geometry(&self, node: &Element) -> Geometry {
        node.dyn_ref::<HtmlElement>()
            .map(|el| Geometry {
                offset_top: f64::from(el.offset_top()),
                offset_height: f64::from(el.offset_height()),
            })
            .unwrap_or_default()
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_y: self.window.scroll_y().unwrap_or_default(),
            height: self
                .window
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or_default(),
            document_height: self
                .document
                .document_element()
                .map(|root| f64::from(root.scroll_height()))
                .unwrap_or_default(),
        }
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn page_host(&self) -> String {
        self.window.location().hostname().unwrap_or_default()
    }

    fn prefers_light(&self) -> bool {
        self.window
            .match_media("(prefers-color-scheme: light)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }
}

/// `localStorage`, which may be missing (private browsing, disabled
/// storage) or refuse writes (quota).
pub struct WebStorage {
    inner: Option<web_sys::Storage>,
}

impl WebStorage {
    pub fn new(window: &Window) -> Self {
        Self {
            inner: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.inner
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
    }
}

impl Storage for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::WriteRejected(format!("{err:?}")))
    }
}

// =========================================================================
// Entry point
// =========================================================================

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_logging();
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    if !ReadyState::from_ready_state(&document.ready_state()).is_parsed() {
        let target = document.clone();
        let ready = Closure::once_into_js(move || {
            if let Err(err) = boot(window, document) {
                warn!("folio-ui failed to start: {err:?}");
            }
        });
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            ready.unchecked_ref(),
            &options,
        )?;
        Ok(())
    } else {
        boot(window, document)
    }
}

/// Config embedded in `<script type="application/json" id="ui-config">`,
/// or the defaults when absent or invalid.
fn embedded_config(document: &Document) -> UiConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|script| script.text_content())
    else {
        return UiConfig::default();
    };
    UiConfig::from_json_str(&text).unwrap_or_else(|err| {
        warn!("ignoring #{CONFIG_SCRIPT_ID}: {err}");
        UiConfig::default()
    })
}

fn boot(window: Window, document: Document) -> Result<(), JsValue> {
    let config = embedded_config(&document);
    let throttle_interval = Duration::from_millis(config.scroll.throttle_ms.into());
    let storage = WebStorage::new(&window);
    let app = Rc::new(RefCell::new(Portfolio::mount(
        WebDom::new(window.clone(), document.clone()),
        storage,
        config,
    )));

    app.borrow()
        .stamp_copyright_year(js_sys::Date::new_0().get_full_year());

    listen_clicks(&document, &app)?;
    listen_keys(&document, &app)?;
    listen_scroll(&window, &app, throttle_interval)?;
    listen_load(&window, &document, &app)?;
    observe_reveal(&app)?;
    observe_counters(&window, &app)?;
    Ok(())
}

fn listen_clicks(document: &Document, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if app.borrow_mut().on_click(&target).prevent_default {
            event.prevent_default();
        }
    });
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn listen_keys(document: &Document, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let key = Key::from_key_value(&event.key());
        if key == Key::Other {
            return;
        }
        let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
        let press = KeyPress {
            key,
            shift: event.shift_key(),
        };
        if app.borrow_mut().on_keydown(target.as_ref(), press).prevent_default {
            event.prevent_default();
        }
    });
    document.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
    on_keydown.forget();
    Ok(())
}

fn listen_scroll(
    window: &Window,
    app: &Rc<RefCell<App>>,
    interval: Duration,
) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let mut tick = throttle(interval, move |()| {
        app.borrow().on_scroll();
    });
    let on_scroll = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        tick.call(event.time_stamp(), ());
    });
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        on_scroll.as_ref().unchecked_ref(),
        &options,
    )?;
    on_scroll.forget();
    Ok(())
}

fn listen_load(window: &Window, document: &Document, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    if ReadyState::from_ready_state(&document.ready_state()).is_loaded() {
        app.borrow().on_load();
        return Ok(());
    }
    let app = Rc::clone(app);
    let on_load = Closure::once_into_js(move || {
        app.borrow().on_load();
    });
    window.add_event_listener_with_callback("load", on_load.unchecked_ref())?;
    Ok(())
}

fn observer_options(threshold: f64, root_margin: Option<&str>) -> IntersectionObserverInit {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    options
}

fn observe_reveal(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let (targets, options) = {
        let app = app.borrow();
        let (targets, reveal) = app.reveal_targets();
        (
            targets,
            observer_options(reveal.threshold, Some(&reveal.root_margin)),
        )
    };
    if targets.is_empty() {
        return Ok(());
    }

    let app = Rc::clone(app);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                app.borrow().reveal(&target, entry.is_intersecting());
            }
        },
    );
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    for target in &targets {
        observer.observe(target);
    }
    debug!("observing {} reveal target(s)", targets.len());
    Ok(())
}

fn observe_counters(window: &Window, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let Some((container, threshold)) = app.borrow().counters_target() else {
        return Ok(());
    };

    let app = Rc::clone(app);
    let window = window.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let visible = entries
                .iter()
                .any(|entry| entry.unchecked_into::<IntersectionObserverEntry>().is_intersecting());
            if !visible {
                return;
            }
            observer.disconnect();
            let started = app.borrow_mut().on_counters_visible();
            if started {
                if let Err(err) = run_counter_frames(&window, Rc::clone(&app)) {
                    warn!("counter animation not scheduled: {err:?}");
                }
            }
        },
    );
    let observer = IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &observer_options(threshold, None),
    )?;
    callback.forget();
    observer.observe(&container);
    Ok(())
}

/// Drive the counter animation with `requestAnimationFrame` until it
/// reports finished.
fn run_counter_frames(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&slot);
    let frame_window = window.clone();

    *slot.borrow_mut() = Some(Closure::new(move |now: f64| {
        if app.borrow_mut().on_animation_frame(now) == AnimationStatus::Finished {
            let _ = next.borrow_mut().take();
            return;
        }
        if let Some(frame) = next.borrow().as_ref() {
            if let Err(err) = frame_window.request_animation_frame(frame.as_ref().unchecked_ref()) {
                warn!("counter frame not scheduled: {err:?}");
            }
        }
    }));

    if let Some(frame) = slot.borrow().as_ref() {
        window.request_animation_frame(frame.as_ref().unchecked_ref())?;
    }
    Ok(())
}
