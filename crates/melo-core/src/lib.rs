//! melo-core
//!
//! Behavioural assessment records, aggregate tags, and the code-to-label
//! mapping applied before records are handed to a language model.

pub mod error;
pub mod mapping;
pub mod models;
pub mod normalize;
