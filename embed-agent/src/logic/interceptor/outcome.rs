//! Submit Outcomes
//!
//! `handle_submit` returns an explicit `Outcome`. A challenge that still
//! needs the user's answer comes back as `Pending` carrying the resume
//! capability, so "ask now, resolve later" needs no closure over form state.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use serde::Serialize;

use pitchguard_core::EvaluationResult;

use super::FormInterceptor;

/// Why a submission was let through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowReason {
    /// Evaluator decided `allowed` (or an unknown decision kind)
    Evaluated,
    /// User or host resolved a challenge
    Confirmed,
    /// Evaluator unreachable or unparseable
    FailOpen,
}

/// Result of one submit attempt
#[derive(Debug)]
pub enum Outcome {
    Allowed(AllowReason),
    Held,
    Blocked,
    /// `success:false` from the evaluator; nothing submitted
    Rejected,
    /// Waiting on the challenge answer
    Pending(ChallengeResume),
    /// Submit ignored: an evaluation is already in flight, or the form is detached
    Suppressed,
}

impl Outcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Outcome::Allowed(_))
    }

    pub fn pending(self) -> Option<ChallengeResume> {
        match self {
            Outcome::Pending(resume) => Some(resume),
            _ => None,
        }
    }
}

struct ResumeInner {
    form: Weak<FormInterceptor>,
    attempt: u64,
    result: EvaluationResult,
    used: Cell<bool>,
}

/// One-shot capability to let a challenged submission through
#[derive(Clone)]
pub struct ChallengeResume {
    inner: Rc<ResumeInner>,
}

impl ChallengeResume {
    pub(crate) fn new(form: Weak<FormInterceptor>, attempt: u64, result: EvaluationResult) -> Self {
        Self {
            inner: Rc::new(ResumeInner {
                form,
                attempt,
                result,
                used: Cell::new(false),
            }),
        }
    }

    /// Dispatch the held-back submission. Only the first call on any clone
    /// does anything; returns whether this call dispatched.
    pub fn allow(&self) -> bool {
        if self.inner.used.replace(true) {
            log::debug!("Challenge already resolved, allow() ignored");
            return false;
        }
        match self.inner.form.upgrade() {
            Some(form) => form.resolve_challenge(self.inner.attempt, &self.inner.result),
            None => {
                log::debug!("Challenged form was torn down, allow() ignored");
                false
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.inner.used.get()
    }

    pub fn result(&self) -> &EvaluationResult {
        &self.inner.result
    }
}

impl std::fmt::Debug for ChallengeResume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChallengeResume")
            .field("resolved", &self.is_resolved())
            .field("submission_id", &self.inner.result.submission_id)
            .finish()
    }
}
