//! Data models

pub mod form;
pub mod evaluation;

pub use form::*;
pub use evaluation::*;
