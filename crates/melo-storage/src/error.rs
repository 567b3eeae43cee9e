use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid database URL: {0}")]
    Config(String),

    #[error("failed to acquire database connection: {0}")]
    Acquire(#[source] sqlx::Error),

    #[error("{query} query failed: {source}")]
    Query {
        query: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("unexpected value in {column}: {value}")]
    UnexpectedValue { column: &'static str, value: String },
}

impl StorageError {
    pub(crate) fn query(query: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| StorageError::Query { query, source }
    }
}
