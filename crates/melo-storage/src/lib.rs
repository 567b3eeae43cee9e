//! melo-storage
//!
//! Read-only Postgres access to patients and behavioural submissions.

pub mod client;
pub mod error;
pub mod patients;
pub mod store;
pub mod submissions;
