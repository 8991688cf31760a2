//! In-memory host for tests: forms, document, surface and a scripted evaluator.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::Notify;

use pitchguard_core::logic::policy::CHALLENGE_QUESTION;
use pitchguard_core::{
    Challenge, Decision, EvaluateRequest, EvaluateResponse, EvaluationResult, FieldValue, FormData,
    Scores,
};

use crate::config::EmbedConfig;
use crate::error::TransportError;
use super::context::AgentContext;
use super::evaluator::RemoteEvaluator;
use super::hooks::Hooks;
use super::host::{Document, EventKind, FormHost, FormId, HostError, ListenerId, Phase, SubmitEvent};
use super::page::{PageController, Presentation, PresentationId, Surface};

// ============================================================================
// FORM
// ============================================================================

pub struct MemoryForm {
    id: FormId,
    pub class: Option<String>,
    pub connected: Cell<bool>,
    pub fields: RefCell<FormData>,
    next_listener: Cell<u64>,
    pub listeners: RefCell<HashMap<ListenerId, (EventKind, Phase)>>,
    pub native_submits: Cell<u32>,
    /// Whether a submit listener was registered while `submit_native` ran
    pub intercepted_during_native: Cell<bool>,
    pub submit_error: RefCell<Option<HostError>>,
}

impl MemoryForm {
    pub fn new(id: u64) -> Rc<Self> {
        Self::build(id, None)
    }

    pub fn with_class(id: u64, class: &str) -> Rc<Self> {
        Self::build(id, Some(class.to_string()))
    }

    fn build(id: u64, class: Option<String>) -> Rc<Self> {
        Rc::new(Self {
            id: FormId(id),
            class,
            connected: Cell::new(true),
            fields: RefCell::new(FormData::new()),
            next_listener: Cell::new(0),
            listeners: RefCell::new(HashMap::new()),
            native_submits: Cell::new(0),
            intercepted_during_native: Cell::new(false),
            submit_error: RefCell::new(None),
        })
    }

    pub fn set_field(&self, name: &str, value: &str) {
        self.fields
            .borrow_mut()
            .insert(name.to_string(), FieldValue::Text(value.to_string()));
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.borrow().values().filter(|(k, _)| *k == kind).count()
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn matches(&self, selector: &str) -> bool {
        match selector.strip_prefix("form").unwrap_or(selector).strip_prefix('.') {
            Some(class) => self.class.as_deref() == Some(class),
            None => true,
        }
    }
}

impl FormHost for MemoryForm {
    fn id(&self) -> FormId {
        self.id
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }

    fn field_values(&self) -> FormData {
        self.fields.borrow().clone()
    }

    fn listen(&self, kind: EventKind, phase: Phase) -> ListenerId {
        let id = ListenerId(self.next_listener.get() + 1);
        self.next_listener.set(id.0);
        self.listeners.borrow_mut().insert(id, (kind, phase));
        id
    }

    fn unlisten(&self, listener: ListenerId) {
        self.listeners.borrow_mut().remove(&listener);
    }

    fn submit_native(&self) -> Result<(), HostError> {
        if self.listener_count(EventKind::Submit) > 0 {
            self.intercepted_during_native.set(true);
        }
        if let Some(err) = self.submit_error.borrow().clone() {
            return Err(err);
        }
        self.native_submits.set(self.native_submits.get() + 1);
        Ok(())
    }
}

// ============================================================================
// DOCUMENT
// ============================================================================

pub struct MemoryDocument {
    pub forms: RefCell<Vec<Rc<MemoryForm>>>,
    pub queries: Cell<u32>,
}

impl MemoryDocument {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            forms: RefCell::new(Vec::new()),
            queries: Cell::new(0),
        })
    }

    pub fn add(&self, form: Rc<MemoryForm>) {
        form.connected.set(true);
        self.forms.borrow_mut().push(form);
    }

    pub fn remove(&self, id: u64) {
        let mut forms = self.forms.borrow_mut();
        for form in forms.iter().filter(|f| f.id == FormId(id)) {
            form.connected.set(false);
        }
        forms.retain(|f| f.id != FormId(id));
    }
}

impl Document for MemoryDocument {
    fn query_forms(&self, selector: &str) -> Vec<Rc<dyn FormHost>> {
        self.queries.set(self.queries.get() + 1);
        self.forms
            .borrow()
            .iter()
            .filter(|f| f.is_connected() && f.matches(selector))
            .map(|f| f.clone() as Rc<dyn FormHost>)
            .collect()
    }

    fn location(&self) -> String {
        "https://example.jp/contact".to_string()
    }

    fn user_agent(&self) -> String {
        "Mozilla/5.0 (test)".to_string()
    }
}

// ============================================================================
// SURFACE
// ============================================================================

#[derive(Default)]
pub struct RecordingSurface {
    pub style_injections: Cell<u32>,
    pub opened: RefCell<Vec<(PresentationId, Presentation)>>,
    pub closed: RefCell<Vec<PresentationId>>,
    pub loading: RefCell<Vec<(FormId, bool)>>,
    pub confirm_answer: Cell<bool>,
    pub confirms: RefCell<Vec<String>>,
    next_id: Cell<u64>,
}

impl RecordingSurface {
    /// Presentations opened and not yet closed
    pub fn open_count(&self) -> usize {
        let closed = self.closed.borrow();
        self.opened
            .borrow()
            .iter()
            .filter(|(id, _)| !closed.contains(id))
            .count()
    }

    pub fn last_opened(&self) -> Option<Presentation> {
        self.opened.borrow().last().map(|(_, p)| p.clone())
    }
}

impl Surface for RecordingSurface {
    fn inject_styles(&self, _css: &str) {
        self.style_injections.set(self.style_injections.get() + 1);
    }

    fn open(&self, presentation: &Presentation) -> PresentationId {
        let id = PresentationId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        self.opened.borrow_mut().push((id, presentation.clone()));
        id
    }

    fn close(&self, id: PresentationId) {
        self.closed.borrow_mut().push(id);
    }

    fn set_loading(&self, form: FormId, visible: bool) {
        self.loading.borrow_mut().push((form, visible));
    }

    fn confirm(&self, question: &str) -> bool {
        self.confirms.borrow_mut().push(question.to_string());
        self.confirm_answer.get()
    }
}

// ============================================================================
// EVALUATOR
// ============================================================================

/// Answers from a queue; an empty queue answers `allowed`
#[derive(Default)]
pub struct ScriptedEvaluator {
    pub responses: RefCell<VecDeque<Result<EvaluateResponse, TransportError>>>,
    pub requests: RefCell<Vec<EvaluateRequest>>,
    /// Calls wait for one permit each when set
    pub gate: Option<Rc<Notify>>,
    pub delay: Option<Duration>,
}

impl ScriptedEvaluator {
    pub fn answering(responses: Vec<Result<EvaluateResponse, TransportError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait::async_trait(?Send)]
impl RemoteEvaluator for ScriptedEvaluator {
    async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.responses.borrow_mut().pop_front();
        next.unwrap_or_else(|| Ok(evaluated(Decision::Allowed, &[])))
    }
}

/// Successful response carrying `decision`
pub fn evaluated(decision: Decision, reasons: &[&str]) -> EvaluateResponse {
    let challenge = (decision == Decision::Challenged).then(|| Challenge::self_report(CHALLENGE_QUESTION));
    EvaluateResponse::evaluated(&EvaluationResult {
        decision,
        scores: Scores { sales: 0.5, spam: 0.1 },
        reasons: reasons.iter().map(|r| r.to_string()).collect(),
        message: format!("decision: {}", decision),
        challenge,
        submission_id: Some("sub-123".to_string()),
    })
}

// ============================================================================
// EVENT & FIXTURE
// ============================================================================

#[derive(Default)]
pub struct TestEvent {
    pub prevented: Cell<bool>,
    pub stopped: Cell<bool>,
}

impl SubmitEvent for TestEvent {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.stopped.set(true);
    }
}

pub struct Fixture {
    pub ctx: Rc<AgentContext>,
    pub surface: Rc<RecordingSurface>,
    pub document: Rc<MemoryDocument>,
    pub evaluator: Rc<ScriptedEvaluator>,
}

/// Route `log` output through the test harness; repeated calls are no-ops
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

pub fn fixture(config: EmbedConfig, hooks: Hooks, evaluator: ScriptedEvaluator) -> Fixture {
    init_logging();
    let surface = Rc::new(RecordingSurface::default());
    let document = MemoryDocument::new();
    let evaluator = Rc::new(evaluator);
    let page = Rc::new(PageController::new(surface.clone()));
    let ctx = Rc::new(AgentContext::new(
        config,
        hooks,
        page,
        document.clone(),
        evaluator.clone(),
    ));
    Fixture {
        ctx,
        surface,
        document,
        evaluator,
    }
}

pub fn test_config() -> EmbedConfig {
    EmbedConfig {
        api_base_url: "http://127.0.0.1:9".to_string(),
        ..EmbedConfig::new("pk_test")
    }
}
