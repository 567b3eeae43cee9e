//! melo-openai
//!
//! Azure OpenAI chat completions used to write patient summaries.

pub mod chat;
pub mod client;
pub mod error;
