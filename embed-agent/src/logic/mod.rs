//! Logic Module - Interception & Discovery Engines
//!
//! - `host` - DOM abstraction the host binding implements
//! - `page` - style guard and single active presentation
//! - `hooks` - host callbacks
//! - `evaluator/` - remote evaluator trait and HTTP client
//! - `interceptor/` - per-form submit state machine
//! - `discovery/` - form registry and rescans

pub mod host;
pub mod page;
pub mod hooks;
pub mod context;
pub mod evaluator;
pub mod interceptor;
pub mod discovery;

#[cfg(test)]
pub(crate) mod harness;
