//! Host Page Abstraction
//!
//! The agent never touches a real DOM. A host binding implements these
//! traits and forwards events to the interceptor; a headless harness
//! implements them in memory.

use std::rc::Rc;
use thiserror::Error;

use pitchguard_core::FormData;

/// Stable identity of one form element for the life of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormId(pub u64);

impl std::fmt::Display for FormId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "form#{}", self.0)
    }
}

/// Handle returned when a listener is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Events the agent subscribes to.
/// `Input`, `Change` and `Paste` cover every input/textarea descendant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Submit,
    Input,
    Change,
    Paste,
}

/// Dispatch phase; the submit listener must run in `Capture`, ahead of
/// page handlers and the default action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Capture,
    Bubble,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("form is no longer attached to the document")]
    Detached,
    #[error("native submission failed: {0}")]
    SubmitFailed(String),
}

/// One form element
pub trait FormHost {
    fn id(&self) -> FormId;

    /// Still attached to the document
    fn is_connected(&self) -> bool;

    /// Current field values (string and string-list fields only)
    fn field_values(&self) -> FormData;

    fn listen(&self, kind: EventKind, phase: Phase) -> ListenerId;

    fn unlisten(&self, listener: ListenerId);

    /// Perform the real submission, bypassing page submit handlers
    fn submit_native(&self) -> Result<(), HostError>;
}

/// The submit event being intercepted
pub trait SubmitEvent {
    fn prevent_default(&self);
    fn stop_propagation(&self);
}

/// The page document
pub trait Document {
    /// Forms currently matching `selector`
    fn query_forms(&self, selector: &str) -> Vec<Rc<dyn FormHost>>;

    fn location(&self) -> String;

    fn user_agent(&self) -> String;
}
