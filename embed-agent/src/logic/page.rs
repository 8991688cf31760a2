//! Page Controller
//!
//! Owns the two page-wide singletons: the one-time stylesheet injection and
//! the single active decision presentation. Constructed once per page
//! context and shared by every interceptor.

use std::cell::Cell;
use std::rc::Rc;

use super::host::FormId;

/// Minimal styles for the overlay, modal and banner
pub const STYLES: &str = "\
.pg-loading{position:absolute;inset:0;display:flex;align-items:center;justify-content:center;background:rgba(255,255,255,.6);pointer-events:none}\
.pg-modal{position:fixed;inset:0;display:flex;align-items:center;justify-content:center;background:rgba(0,0,0,.4);z-index:2147483647}\
.pg-modal__body{max-width:28rem;padding:1.5rem;border-radius:8px;background:#fff}\
.pg-banner{margin:.75rem 0;padding:.75rem 1rem;border-radius:6px;background:#fff7e6;border:1px solid #f59e0b}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PresentationId(pub u64);

/// Something shown to the user after a decision
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    /// Informational banner (held)
    Notice { message: String },
    /// Application-level failure
    Error { message: String },
    /// Block modal with reasons and the submission id for support requests
    Blocked {
        message: String,
        reasons: Vec<String>,
        submission_id: Option<String>,
    },
}

/// Rendering backend
pub trait Surface {
    fn inject_styles(&self, css: &str);

    fn open(&self, presentation: &Presentation) -> PresentationId;

    fn close(&self, id: PresentationId);

    /// Non-blocking loading overlay on one form
    fn set_loading(&self, form: FormId, visible: bool);

    /// Built-in confirmation prompt
    fn confirm(&self, question: &str) -> bool;
}

pub struct PageController {
    surface: Rc<dyn Surface>,
    styles_injected: Cell<bool>,
    active: Cell<Option<PresentationId>>,
}

impl PageController {
    pub fn new(surface: Rc<dyn Surface>) -> Self {
        Self {
            surface,
            styles_injected: Cell::new(false),
            active: Cell::new(None),
        }
    }

    /// Inject the stylesheet on first use only
    pub fn ensure_styles(&self) {
        if self.styles_injected.replace(true) {
            return;
        }
        self.surface.inject_styles(STYLES);
        log::debug!("PitchGuard styles injected");
    }

    /// Show a presentation, closing whichever one was active
    pub fn present(&self, presentation: Presentation) -> PresentationId {
        self.ensure_styles();
        if let Some(previous) = self.active.take() {
            self.surface.close(previous);
        }
        let id = self.surface.open(&presentation);
        self.active.set(Some(id));
        id
    }

    /// Close the active presentation, if any
    pub fn dismiss(&self) {
        if let Some(active) = self.active.take() {
            self.surface.close(active);
        }
    }

    pub fn active(&self) -> Option<PresentationId> {
        self.active.get()
    }

    pub fn set_loading(&self, form: FormId, visible: bool) {
        self.ensure_styles();
        self.surface.set_loading(form, visible);
    }

    pub fn confirm(&self, question: &str) -> bool {
        self.surface.confirm(question)
    }
}
