//! Per-page mutable state shared across controllers.
//!
//! The three one-shot/single-slot values of the page live here instead of
//! in globals, so every [`Portfolio`](crate::page::Portfolio) (and every
//! test) starts clean.

#[derive(Debug)]
pub struct UiSession<N> {
    previous_focus: Option<N>,
    counters_animated: bool,
    resume_loaded: bool,
}

impl<N> Default for UiSession<N> {
    fn default() -> Self {
        Self {
            previous_focus: None,
            counters_animated: false,
            resume_loaded: false,
        }
    }
}

impl<N> UiSession<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the element to refocus when the open modal closes.
    pub fn remember_focus(&mut self, node: Option<N>) {
        self.previous_focus = node;
    }

    /// Take the remembered element, leaving the slot empty.
    pub fn take_previous_focus(&mut self) -> Option<N> {
        self.previous_focus.take()
    }

    pub fn has_previous_focus(&self) -> bool {
        self.previous_focus.is_some()
    }

    /// Flip the counters flag. Returns `true` only on the first call.
    pub fn claim_counters(&mut self) -> bool {
        !std::mem::replace(&mut self.counters_animated, true)
    }

    pub fn counters_animated(&self) -> bool {
        self.counters_animated
    }

    /// Flip the resume-loaded flag. Returns `true` only on the first call.
    pub fn claim_resume_load(&mut self) -> bool {
        !std::mem::replace(&mut self.resume_loaded, true)
    }

    pub fn resume_loaded(&self) -> bool {
        self.resume_loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_flags_claim_once() {
        let mut session: UiSession<u32> = UiSession::new();
        assert!(session.claim_counters());
        assert!(!session.claim_counters());
        assert!(session.counters_animated());
        assert!(session.claim_resume_load());
        assert!(!session.claim_resume_load());
    }

    #[test]
    fn previous_focus_is_taken_once() {
        let mut session = UiSession::new();
        session.remember_focus(Some(7));
        assert!(session.has_previous_focus());
        assert_eq!(session.take_previous_focus(), Some(7));
        assert_eq!(session.take_previous_focus(), None);
    }
}
