//! Data models

pub mod evaluation;
pub mod submission;

pub use evaluation::*;
pub use submission::*;
