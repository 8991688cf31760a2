//! Interceptor State

use serde::Serialize;
use tokio::time::Instant;

/// Per-form submission state
///
/// ```text
/// Idle ──submit──► Submitting ──► Allowed | Blocked | Held | Challenged
///                                        Challenged ──allow()──► Allowed
/// ```
/// Any state but `Submitting` accepts a new, user-initiated submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    Idle,
    Submitting,
    Allowed,
    Challenged,
    Held,
    Blocked,
}

impl FormState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, FormState::Submitting)
    }
}

/// Behavioral telemetry of one form registration
#[derive(Debug, Clone)]
pub struct BehavioralSnapshot {
    pub paste_detected: bool,
    pub page_load_time: Instant,
    /// Seconds from attach to the latest submit attempt
    pub time_to_submit: Option<f64>,
}

impl BehavioralSnapshot {
    pub fn new(page_load_time: Instant) -> Self {
        Self {
            paste_detected: false,
            page_load_time,
            time_to_submit: None,
        }
    }

    /// Stamp a submit attempt and return the elapsed seconds
    pub fn mark_submit(&mut self, now: Instant) -> f64 {
        let secs = now.saturating_duration_since(self.page_load_time).as_secs_f64();
        self.time_to_submit = Some(secs);
        secs
    }
}
