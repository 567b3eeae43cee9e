use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("{0} environment variable is not set")]
    MissingSetting(&'static str),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP client error: {0}")]
    Config(String),

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),
}

impl OpenAiError {
    /// Errors caused by how the service is set up rather than by the provider.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            OpenAiError::MissingSetting(_) | OpenAiError::InvalidEndpoint(_) | OpenAiError::Config(_)
        )
    }
}
