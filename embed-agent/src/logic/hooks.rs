//! Host Hooks
//!
//! Callbacks the host page registers. All optional; a missing hook is a
//! no-op. `on_challenge` doubles as the host challenge handler: when set,
//! the built-in confirm prompt is skipped.

use std::rc::Rc;

use pitchguard_core::{DetectionSnapshot, EvaluationResult};

use crate::error::GuardError;
use super::host::FormId;
use super::interceptor::{AllowReason, ChallengeResume};

pub type AllowHook = Rc<dyn Fn(FormId, AllowReason, Option<&EvaluationResult>)>;
pub type ResultHook = Rc<dyn Fn(FormId, &EvaluationResult)>;
pub type ChallengeHook = Rc<dyn Fn(FormId, &EvaluationResult, ChallengeResume)>;
pub type ErrorHook = Rc<dyn Fn(FormId, &GuardError)>;
pub type DetectionHook = Rc<dyn Fn(FormId, &DetectionSnapshot)>;

#[derive(Clone, Default)]
pub struct Hooks {
    pub on_allow: Option<AllowHook>,
    pub on_block: Option<ResultHook>,
    pub on_challenge: Option<ChallengeHook>,
    pub on_hold: Option<ResultHook>,
    pub on_error: Option<ErrorHook>,
    pub on_detection_update: Option<DetectionHook>,
}

impl Hooks {
    pub fn on_allow(mut self, f: impl Fn(FormId, AllowReason, Option<&EvaluationResult>) + 'static) -> Self {
        self.on_allow = Some(Rc::new(f));
        self
    }

    pub fn on_block(mut self, f: impl Fn(FormId, &EvaluationResult) + 'static) -> Self {
        self.on_block = Some(Rc::new(f));
        self
    }

    pub fn on_challenge(mut self, f: impl Fn(FormId, &EvaluationResult, ChallengeResume) + 'static) -> Self {
        self.on_challenge = Some(Rc::new(f));
        self
    }

    pub fn on_hold(mut self, f: impl Fn(FormId, &EvaluationResult) + 'static) -> Self {
        self.on_hold = Some(Rc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(FormId, &GuardError) + 'static) -> Self {
        self.on_error = Some(Rc::new(f));
        self
    }

    pub fn on_detection_update(mut self, f: impl Fn(FormId, &DetectionSnapshot) + 'static) -> Self {
        self.on_detection_update = Some(Rc::new(f));
        self
    }

    pub(crate) fn allow(&self, form: FormId, reason: AllowReason, result: Option<&EvaluationResult>) {
        if let Some(hook) = &self.on_allow {
            hook(form, reason, result);
        }
    }

    pub(crate) fn block(&self, form: FormId, result: &EvaluationResult) {
        if let Some(hook) = &self.on_block {
            hook(form, result);
        }
    }

    pub(crate) fn hold(&self, form: FormId, result: &EvaluationResult) {
        if let Some(hook) = &self.on_hold {
            hook(form, result);
        }
    }

    pub(crate) fn error(&self, form: FormId, error: &GuardError) {
        if let Some(hook) = &self.on_error {
            hook(form, error);
        }
    }

    pub(crate) fn detection(&self, form: FormId, snapshot: &DetectionSnapshot) {
        if let Some(hook) = &self.on_detection_update {
            hook(form, snapshot);
        }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_allow", &self.on_allow.is_some())
            .field("on_block", &self.on_block.is_some())
            .field("on_challenge", &self.on_challenge.is_some())
            .field("on_hold", &self.on_hold.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_detection_update", &self.on_detection_update.is_some())
            .finish()
    }
}
