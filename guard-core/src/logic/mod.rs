//! Logic Module - Signal, Scoring & Policy Engines
//!
//! - `signals/` - corpus normalization, URL/domain/keyword extraction
//! - `scoring/` - rule accumulation and AI blend
//! - `policy/` - threshold decision policy

pub mod signals;
pub mod scoring;
pub mod policy;
