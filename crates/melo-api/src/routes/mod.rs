pub mod root;
pub mod summary;
