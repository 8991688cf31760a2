//! Form Interceptor
//!
//! One per registered form. Publishes live detection snapshots on
//! input/paste, intercepts submit in the capture phase, calls the evaluator
//! at most once per attempt and executes the returned decision.
//!
//! ## Structure
//! - `state`: `FormState`, `BehavioralSnapshot`
//! - `outcome`: `Outcome`, `AllowReason`, `ChallengeResume`

pub mod state;
pub mod outcome;


pub use outcome::{AllowReason, ChallengeResume, Outcome};
pub use state::{BehavioralSnapshot, FormState};

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;

use pitchguard_core::logic::policy::CHALLENGE_QUESTION;
use pitchguard_core::{
    BehavioralData, Decision, DetectionSnapshot, ErrorBody, EvaluateRequest, EvaluationResult,
    RequestMetadata,
};

use crate::error::{GuardError, TransportError};
use super::context::AgentContext;
use super::host::{EventKind, FormHost, FormId, ListenerId, Phase, SubmitEvent};
use super::page::Presentation;

/// Shown when the evaluator answers `success:false` without a message
pub const REJECTED_MESSAGE: &str = "Your message could not be checked. Please try again.";

#[derive(Debug, Default)]
struct Listeners {
    submit: Option<ListenerId>,
    fields: Vec<ListenerId>,
}

pub struct FormInterceptor {
    form: Rc<dyn FormHost>,
    ctx: Rc<AgentContext>,
    state: Cell<FormState>,
    attached: Cell<bool>,
    /// Incremented per submit attempt; stale challenge capabilities compare against it
    attempt: Cell<u64>,
    behavior: RefCell<BehavioralSnapshot>,
    detection: RefCell<Option<DetectionSnapshot>>,
    listeners: RefCell<Listeners>,
}

impl FormInterceptor {
    /// Register listeners on `form` and start its behavioral clock
    pub fn attach(form: Rc<dyn FormHost>, ctx: Rc<AgentContext>) -> Rc<Self> {
        let submit = form.listen(EventKind::Submit, Phase::Capture);
        let fields = [EventKind::Input, EventKind::Change, EventKind::Paste]
            .into_iter()
            .map(|kind| form.listen(kind, Phase::Bubble))
            .collect();

        log::debug!("Interceptor attached to {}", form.id());

        Rc::new(Self {
            form,
            ctx,
            state: Cell::new(FormState::Idle),
            attached: Cell::new(true),
            attempt: Cell::new(0),
            behavior: RefCell::new(BehavioralSnapshot::new(Instant::now())),
            detection: RefCell::new(None),
            listeners: RefCell::new(Listeners {
                submit: Some(submit),
                fields,
            }),
        })
    }

    pub fn id(&self) -> FormId {
        self.form.id()
    }

    pub fn form(&self) -> &Rc<dyn FormHost> {
        &self.form
    }

    pub fn state(&self) -> FormState {
        self.state.get()
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    pub fn behavior(&self) -> BehavioralSnapshot {
        self.behavior.borrow().clone()
    }

    /// Last published detection snapshot
    pub fn detection(&self) -> Option<DetectionSnapshot> {
        self.detection.borrow().clone()
    }

    /// Remove every listener. Idempotent.
    pub fn detach(&self) {
        if !self.attached.replace(false) {
            return;
        }

        let mut listeners = self.listeners.borrow_mut();
        if let Some(submit) = listeners.submit.take() {
            self.form.unlisten(submit);
        }
        for listener in listeners.fields.drain(..) {
            self.form.unlisten(listener);
        }
        drop(listeners);

        if self.state.get().is_in_flight() {
            self.ctx.page.set_loading(self.id(), false);
        }
        log::debug!("Interceptor detached from {}", self.id());
    }

    // ========================================================================
    // FIELD EVENTS
    // ========================================================================

    /// Input or change on any field
    pub fn handle_input(&self) {
        if self.attached.get() {
            self.refresh_detection();
        }
    }

    /// Paste into any field
    pub fn handle_paste(&self) {
        if !self.attached.get() {
            return;
        }
        if self.ctx.config.enable_paste_detection {
            self.behavior.borrow_mut().paste_detected = true;
        }
        self.refresh_detection();
    }

    /// Recompute the snapshot from current field values and publish it
    fn refresh_detection(&self) -> DetectionSnapshot {
        let paste_detected = self.behavior.borrow().paste_detected;
        let snapshot = self.ctx.extractor.snapshot(&self.form.field_values(), paste_detected);

        if self.ctx.config.debug {
            log::info!(
                "[{}] detection: urls={:?} scheduling={:?} sales={:?} banned={:?} blocked={:?} paste={}",
                self.id(),
                snapshot.detected_urls,
                snapshot.scheduling_urls,
                snapshot.sales_keywords,
                snapshot.banned_keywords,
                snapshot.blocked_domains,
                snapshot.paste_detected,
            );
        }

        *self.detection.borrow_mut() = Some(snapshot.clone());
        self.ctx.hooks.detection(self.id(), &snapshot);
        snapshot
    }

    // ========================================================================
    // SUBMIT
    // ========================================================================

    /// Capture-phase submit handler
    pub async fn handle_submit(self: &Rc<Self>, event: &dyn SubmitEvent) -> Outcome {
        if !self.attached.get() {
            return Outcome::Suppressed;
        }

        event.prevent_default();
        event.stop_propagation();

        if self.state.get().is_in_flight() {
            log::debug!("[{}] submit ignored, evaluation already in flight", self.id());
            return Outcome::Suppressed;
        }

        self.state.set(FormState::Submitting);
        let attempt = self.attempt.get() + 1;
        self.attempt.set(attempt);

        let time_to_submit = self.behavior.borrow_mut().mark_submit(Instant::now());
        self.ctx.page.set_loading(self.id(), true);
        self.refresh_detection();

        let request = self.build_request(time_to_submit);
        let limit = Duration::from_millis(self.ctx.config.evaluate_timeout_ms);
        let response = match tokio::time::timeout(limit, self.ctx.evaluator.evaluate(&request)).await {
            Ok(response) => response,
            Err(_) => Err(TransportError::Timeout(limit)),
        };

        self.ctx.page.set_loading(self.id(), false);

        if !self.attached.get() {
            log::debug!("[{}] form detached during evaluation, result dropped", self.id());
            self.state.set(FormState::Idle);
            return Outcome::Suppressed;
        }

        match response {
            Err(err) => self.fail_open(err),
            Ok(body) => match body.into_result() {
                Err(error) => self.reject(error),
                Ok(result) => self.execute(result, attempt),
            },
        }
    }

    fn build_request(&self, time_to_submit: f64) -> EvaluateRequest {
        let behavior = self.behavior.borrow();
        EvaluateRequest {
            api_key: self.ctx.config.api_key.clone(),
            form_data: self.form.field_values(),
            metadata: RequestMetadata {
                url: self.ctx.document.location(),
                user_agent: self.ctx.document.user_agent(),
                timestamp: Utc::now().to_rfc3339(),
            },
            behavioral_data: BehavioralData {
                paste_detected: behavior.paste_detected,
                time_to_submit: Some(time_to_submit),
            },
        }
    }

    fn execute(self: &Rc<Self>, result: EvaluationResult, attempt: u64) -> Outcome {
        let id = self.id();
        if self.ctx.config.debug {
            log::info!(
                "[{}] decision={} sales={:.2} spam={:.2} reasons={:?}",
                id, result.decision, result.scores.sales, result.scores.spam, result.reasons
            );
        }

        match result.decision {
            Decision::Allowed => {
                self.state.set(FormState::Allowed);
                self.allow_submission();
                self.ctx.hooks.allow(id, AllowReason::Evaluated, Some(&result));
                Outcome::Allowed(AllowReason::Evaluated)
            }

            Decision::Challenged => {
                self.state.set(FormState::Challenged);
                let resume = ChallengeResume::new(Rc::downgrade(self), attempt, result.clone());

                if let Some(handler) = self.ctx.hooks.on_challenge.clone() {
                    handler(id, &result, resume.clone());
                    if resume.is_resolved() && self.state.get() == FormState::Allowed {
                        return Outcome::Allowed(AllowReason::Confirmed);
                    }
                    return Outcome::Pending(resume);
                }

                let question = result
                    .challenge
                    .as_ref()
                    .map(|c| c.question.as_str())
                    .unwrap_or(CHALLENGE_QUESTION);
                if self.ctx.page.confirm(question) && resume.allow() {
                    Outcome::Allowed(AllowReason::Confirmed)
                } else {
                    Outcome::Pending(resume)
                }
            }

            Decision::Held => {
                self.state.set(FormState::Held);
                self.ctx.page.present(Presentation::Notice {
                    message: result.message.clone(),
                });
                self.ctx.hooks.hold(id, &result);
                Outcome::Held
            }

            Decision::Blocked => {
                self.state.set(FormState::Blocked);
                self.ctx.page.present(Presentation::Blocked {
                    message: result.message.clone(),
                    reasons: result.reasons.clone(),
                    submission_id: result.submission_id.clone(),
                });
                self.ctx.hooks.block(id, &result);
                Outcome::Blocked
            }
        }
    }

    /// Transport failure: report it, then let the submission through
    fn fail_open(&self, err: TransportError) -> Outcome {
        let id = self.id();
        log::warn!("[{}] evaluator unavailable ({}), failing open", id, err);

        self.state.set(FormState::Allowed);
        self.ctx.hooks.error(id, &GuardError::Transport(err));
        self.allow_submission();
        self.ctx.hooks.allow(id, AllowReason::FailOpen, None);
        Outcome::Allowed(AllowReason::FailOpen)
    }

    /// Application failure: report it and wait for the user's next action
    fn reject(&self, error: ErrorBody) -> Outcome {
        let id = self.id();
        let code = error.code.unwrap_or_else(|| "unknown".to_string());
        let message = error.message.unwrap_or_else(|| REJECTED_MESSAGE.to_string());
        log::warn!("[{}] evaluation rejected: {} ({})", id, message, code);

        self.state.set(FormState::Idle);
        self.ctx.hooks.error(id, &GuardError::Application {
            code,
            message: message.clone(),
        });
        self.ctx.page.present(Presentation::Error { message });
        Outcome::Rejected
    }

    /// Called through `ChallengeResume::allow`
    pub(crate) fn resolve_challenge(&self, attempt: u64, result: &EvaluationResult) -> bool {
        if self.state.get() != FormState::Challenged || self.attempt.get() != attempt {
            log::debug!("[{}] stale challenge resolution ignored", self.id());
            return false;
        }

        self.state.set(FormState::Allowed);
        let dispatched = self.allow_submission();
        self.ctx.hooks.allow(self.id(), AllowReason::Confirmed, Some(result));
        dispatched
    }

    /// Perform the real submission without re-entering interception.
    /// The submit listener is taken off for the native call and put back
    /// afterwards, also when the call fails. A no-op in preview mode.
    fn allow_submission(&self) -> bool {
        let id = self.id();
        if self.ctx.config.preview_mode {
            log::info!("[{}] preview mode, real submission skipped", id);
            return true;
        }
        if !self.attached.get() {
            self.ctx.hooks.error(id, &GuardError::Host(super::host::HostError::Detached));
            return false;
        }

        let submit = self.listeners.borrow_mut().submit.take();
        if let Some(listener) = submit {
            self.form.unlisten(listener);
        }

        let result = self.form.submit_native();

        if self.attached.get() {
            let listener = self.form.listen(EventKind::Submit, Phase::Capture);
            self.listeners.borrow_mut().submit = Some(listener);
        }

        match result {
            Ok(()) => true,
            Err(err) => {
                log::error!("[{}] native submission failed: {}", id, err);
                self.ctx.hooks.error(id, &GuardError::Host(err));
                false
            }
        }
    }
}

impl std::fmt::Debug for FormInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormInterceptor")
            .field("form", &self.id())
            .field("state", &self.state.get())
            .field("attached", &self.attached.get())
            .finish()
    }
}
