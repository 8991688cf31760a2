//! Agent Errors
//!
//! - `Config`: initialization aborts silently (logged, never raised)
//! - `Transport`: network/status/parse/timeout failure, submission fails open
//! - `Application`: well-formed `success:false`, submission is not allowed
//! - `Host`: the page refused the native submission

use std::time::Duration;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logic::host::HostError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("evaluator returned status {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("evaluator did not answer within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GuardError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("evaluation rejected ({code}): {message}")]
    Application { code: String, message: String },
    #[error("host error: {0}")]
    Host(#[from] HostError),
}

impl GuardError {
    /// Whether this failure lets the submission through
    pub fn fails_open(&self) -> bool {
        matches!(self, GuardError::Transport(_))
    }
}
