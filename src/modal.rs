//! Modal dialogs.
//!
//! Every `.modal` element on the page becomes a [`Modal`], keyed by its id.
//! The generic machinery (open, close, close-all, focus restore, Escape,
//! backdrop clicks, focus trap) is shared; three producers fill a modal
//! before opening it:
//!
//! | Producer | Trigger | Fills |
//! |---|---|---|
//! | [`ModalSet::open_case_study`] | `[data-case-study="slug"]` | `#caseStudyBody` from `#case-study-<slug>` |
//! | [`ModalSet::open_lightbox`] | `[data-lightbox]` | `#lightboxImage` `src`/`alt` from the clicked image |
//! | [`ModalSet::open_resume`] | `.js-open-resume` | `#resumeFrame` `src`, first open only |
//!
//! Only one modal may be open at a time. The element focused before the
//! open is held in the [`UiSession`] and refocused on close.

use crate::contract::{
    CASE_STUDY_BODY_ID, CASE_STUDY_MODAL_ID, CASE_STUDY_TEMPLATE_PREFIX, LIGHTBOX_IMAGE_ID,
    LIGHTBOX_MODAL_ID, MODAL_CLASS, MODAL_CLOSE_CLASS, MODAL_OPEN_BODY_CLASS, OPEN_CLASS,
    RESUME_FRAME_ID, RESUME_MODAL_ID,
};
use crate::dom::{Dom, Selector};
use crate::events::{EventOutcome, Key, KeyPress};
use crate::focus_trap::FocusTrap;
use crate::session::UiSession;
use log::debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    #[error("no modal with id '{0}'")]
    Unknown(String),
    #[error("cannot open '{requested}' while '{open}' is open")]
    AlreadyOpen { requested: String, open: String },
}

#[derive(Debug)]
pub struct Modal<N> {
    id: String,
    container: N,
    close_control: Option<N>,
    open: bool,
}

impl<N> Modal<N> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn container(&self) -> &N {
        &self.container
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl<D: Dom> FocusTrap<D> for Modal<D::Node> {
    fn trap_container(&self) -> &D::Node {
        &self.container
    }

    fn trap_active(&self) -> bool {
        self.open
    }
}

pub struct ModalSet<N> {
    modals: Vec<Modal<N>>,
    body: Option<N>,
    resume_document: String,
}

impl<N: Clone + PartialEq> ModalSet<N> {
    /// Collect every `.modal` with an id. All start closed.
    pub fn attach<D: Dom<Node = N>>(dom: &D, resume_document: &str) -> Self {
        let modals: Vec<Modal<N>> = dom
            .query_all(None, &Selector::Class(MODAL_CLASS))
            .into_iter()
            .filter_map(|container| {
                let Some(id) = dom.attr(&container, "id") else {
                    debug!("ignoring .{MODAL_CLASS} without an id");
                    return None;
                };
                let close_control = dom.query(Some(&container), &Selector::Class(MODAL_CLOSE_CLASS));
                dom.set_attr(&container, "aria-hidden", "true");
                Some(Modal {
                    id,
                    container,
                    close_control,
                    open: false,
                })
            })
            .collect();
        debug!("{} modal(s) attached", modals.len());
        Self {
            modals,
            body: dom.body(),
            resume_document: resume_document.to_string(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Modal<N>> {
        self.modals.iter().find(|m| m.id == id)
    }

    pub fn open_modal(&self) -> Option<&Modal<N>> {
        self.modals.iter().find(|m| m.open)
    }

    pub fn any_open(&self) -> bool {
        self.open_modal().is_some()
    }

    /// Open the modal `id` and move focus to its close control.
    pub fn open<D: Dom<Node = N>>(
        &mut self,
        dom: &D,
        session: &mut UiSession<N>,
        id: &str,
    ) -> Result<(), ModalError> {
        if let Some(open) = self.open_modal() {
            return Err(ModalError::AlreadyOpen {
                requested: id.to_string(),
                open: open.id.clone(),
            });
        }
        let modal = self
            .modals
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ModalError::Unknown(id.to_string()))?;

        session.remember_focus(dom.active_element());
        modal.open = true;
        dom.add_class(&modal.container, OPEN_CLASS);
        dom.set_attr(&modal.container, "aria-hidden", "false");
        if let Some(body) = &self.body {
            dom.add_class(body, MODAL_OPEN_BODY_CLASS);
        }
        if let Some(close) = &modal.close_control {
            dom.focus(close);
        }
        Ok(())
    }

    /// Close one modal. Closing a closed modal does nothing.
    pub fn close<D: Dom<Node = N>>(
        &mut self,
        dom: &D,
        session: &mut UiSession<N>,
        id: &str,
    ) -> Result<(), ModalError> {
        let modal = self
            .modals
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ModalError::Unknown(id.to_string()))?;
        if !modal.open {
            return Ok(());
        }
        Self::hide(dom, modal);
        self.finish_close(dom, session);
        Ok(())
    }

    /// Close whatever is open. With nothing open this is a no-op.
    pub fn close_all<D: Dom<Node = N>>(&mut self, dom: &D, session: &mut UiSession<N>) -> bool {
        let mut closed_any = false;
        for modal in self.modals.iter_mut().filter(|m| m.open) {
            Self::hide(dom, modal);
            closed_any = true;
        }
        if closed_any {
            self.finish_close(dom, session);
        }
        closed_any
    }

    /// Escape closes everything; Tab is trapped inside the open modal.
    pub fn on_keydown<D: Dom<Node = N>>(
        &mut self,
        dom: &D,
        session: &mut UiSession<N>,
        target: Option<&N>,
        key: KeyPress,
    ) -> EventOutcome {
        match key.key {
            Key::Escape if self.any_open() => {
                self.close_all(dom, session);
                EventOutcome::PASS
            }
            Key::Tab => {
                let Some(modal) = self.open_modal() else {
                    return EventOutcome::PASS;
                };
                if !target.is_some_and(|t| dom.contains(&modal.container, t)) {
                    return EventOutcome::PASS;
                }
                <Modal<N> as FocusTrap<D>>::trap_tab(modal, dom, key)
            }
            _ => EventOutcome::PASS,
        }
    }

    /// Copy the `#case-study-<slug>` template into the case-study body and
    /// open the modal. Missing template or body: nothing happens.
    pub fn open_case_study<D: Dom<Node = N>>(
        &mut self,
        dom: &D,
        session: &mut UiSession<N>,
        slug: &str,
    ) -> Result<bool, ModalError> {
        let template = dom.by_id(&format!("{CASE_STUDY_TEMPLATE_PREFIX}{slug}"));
        let (Some(template), Some(body)) = (template, dom.by_id(CASE_STUDY_BODY_ID)) else {
            debug!("case study '{slug}' has no template or body target");
            return Ok(false);
        };
        self.ensure_openable(CASE_STUDY_MODAL_ID)?;
        dom.set_inner_html(&body, &dom.inner_html(&template));
        self.open(dom, session, CASE_STUDY_MODAL_ID)?;
        Ok(true)
    }

    /// Show the image inside `container` in the lightbox.
    pub fn open_lightbox<D: Dom<Node = N>>(
        &mut self,
        dom: &D,
        session: &mut UiSession<N>,
        container: &N,
    ) -> Result<bool, ModalError> {
        let image = dom.query(Some(container), &Selector::Tag("img"));
        let (Some(image), Some(target)) = (image, dom.by_id(LIGHTBOX_IMAGE_ID)) else {
            debug!("lightbox trigger without image or #{LIGHTBOX_IMAGE_ID}");
            return Ok(false);
        };
        self.ensure_openable(LIGHTBOX_MODAL_ID)?;
        dom.set_attr(&target, "src", &dom.attr(&image, "src").unwrap_or_default());
        dom.set_attr(&target, "alt", &dom.attr(&image, "alt").unwrap_or_default());
        self.open(dom, session, LIGHTBOX_MODAL_ID)?;
        Ok(true)
    }

    /// Open the resume viewer, loading the document into its iframe the
    /// first time only.
    pub fn open_resume<D: Dom<Node = N>>(
        &mut self,
        dom: &D,
        session: &mut UiSession<N>,
    ) -> Result<bool, ModalError> {
        self.ensure_openable(RESUME_MODAL_ID)?;
        if let Some(frame) = dom.by_id(RESUME_FRAME_ID) {
            if session.claim_resume_load() {
                dom.set_attr(&frame, "src", &self.resume_document);
            }
        } else {
            debug!("#{RESUME_FRAME_ID} missing; opening resume modal empty");
        }
        self.open(dom, session, RESUME_MODAL_ID)?;
        Ok(true)
    }

    /// Producers check before touching content or one-shot flags, so a
    /// refused open leaves the page as it was: the target modal must exist
    /// and nothing may be open.
    fn ensure_openable(&self, requested: &str) -> Result<(), ModalError> {
        if self.get(requested).is_none() {
            return Err(ModalError::Unknown(requested.to_string()));
        }
        match self.open_modal() {
            Some(open) => Err(ModalError::AlreadyOpen {
                requested: requested.to_string(),
                open: open.id.clone(),
            }),
            None => Ok(()),
        }
    }

    fn hide<D: Dom<Node = N>>(dom: &D, modal: &mut Modal<N>) {
        modal.open = false;
        dom.remove_class(&modal.container, OPEN_CLASS);
        dom.set_attr(&modal.container, "aria-hidden", "true");
    }

    fn finish_close<D: Dom<Node = N>>(&self, dom: &D, session: &mut UiSession<N>) {
        if self.any_open() {
            return;
        }
        if let Some(body) = &self.body {
            dom.remove_class(body, MODAL_OPEN_BODY_CLASS);
        }
        if let Some(previous) = session.take_previous_focus() {
            dom.focus(&previous);
        }
    }
}
