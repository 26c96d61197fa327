//! Keyboard focus containment for open containers.
//!
//! Implemented once as the default method of [`FocusTrap`]; the nav menu
//! and every modal only say which element is the container and whether it
//! is currently open.

use crate::dom::{Dom, Selector};
use crate::events::{EventOutcome, Key, KeyPress};

pub trait FocusTrap<D: Dom> {
    /// The element whose focusable descendants form the cycle.
    fn trap_container(&self) -> &D::Node;

    /// The trap only runs while this returns `true`.
    fn trap_active(&self) -> bool;

    /// Wrap Tab from the last focusable to the first, and Shift+Tab from
    /// the first to the last. Anything else passes through.
    ///
    /// The focusable set is read fresh on every key press, so content
    /// swapped in between opens is honoured.
    fn trap_tab(&self, dom: &D, key: KeyPress) -> EventOutcome {
        if key.key != Key::Tab || !self.trap_active() {
            return EventOutcome::PASS;
        }
        let focusable = dom.query_all(Some(self.trap_container()), &Selector::Focusable);
        let (Some(first), Some(last)) = (focusable.first(), focusable.last()) else {
            return EventOutcome::PASS;
        };
        let active = dom.active_element();
        let (edge, wrap_to) = if key.shift { (first, last) } else { (last, first) };
        if active.as_ref() == Some(edge) {
            dom.focus(wrap_to);
            return EventOutcome::CONSUMED;
        }
        EventOutcome::PASS
    }
}
