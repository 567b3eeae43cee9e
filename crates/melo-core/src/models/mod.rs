pub mod patient;
pub mod submission;
pub mod tags;
