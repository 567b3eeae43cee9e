//! melo-prompt
//!
//! Prompt templates for patient summaries and their rendering into chat
//! messages.

pub mod error;
pub mod render;
pub mod template;
