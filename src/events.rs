//! Input events as the controllers see them.

/// The keys the behaviour layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Enter,
    Space,
    Other,
}

impl Key {
    /// Parse a `KeyboardEvent.key` value.
    ///
    /// ```
    /// # use folio_ui::events::Key;
    /// assert_eq!(Key::from_key_value("Escape"), Key::Escape);
    /// assert_eq!(Key::from_key_value(" "), Key::Space);
    /// assert_eq!(Key::from_key_value("a"), Key::Other);
    /// ```
    pub fn from_key_value(value: &str) -> Self {
        match value {
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// `document.readyState`, which decides whether the backend mounts now or
/// waits for `DOMContentLoaded`, and whether `load` already fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Parse a `document.readyState` value. Anything unrecognised counts as
    /// still loading, so the backend waits for the document events.
    ///
    /// ```
    /// # use folio_ui::events::ReadyState;
    /// assert_eq!(ReadyState::from_ready_state("complete"), ReadyState::Complete);
    /// assert_eq!(ReadyState::from_ready_state(""), ReadyState::Loading);
    /// ```
    pub fn from_ready_state(value: &str) -> Self {
        match value {
            "interactive" => ReadyState::Interactive,
            "complete" => ReadyState::Complete,
            _ => ReadyState::Loading,
        }
    }

    /// The document is parsed and elements can be looked up.
    pub fn is_parsed(self) -> bool {
        self != ReadyState::Loading
    }

    /// The window `load` event has already fired.
    pub fn is_loaded(self) -> bool {
        self == ReadyState::Complete
    }
}

/// What the backend should do with the native event after a handler ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const PASS: EventOutcome = EventOutcome {
        prevent_default: false,
    };
    pub const CONSUMED: EventOutcome = EventOutcome {
        prevent_default: true,
    };

    /// Combine outcomes of handlers that ran for the same event.
    pub fn merge(self, other: EventOutcome) -> EventOutcome {
        EventOutcome {
            prevent_default: self.prevent_default || other.prevent_default,
        }
    }
}
