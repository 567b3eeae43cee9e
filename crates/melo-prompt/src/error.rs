use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompts file not found at {}", path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("failed to read prompts file {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("{0} section not found in prompts file")]
    MissingSection(String),

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tera::Error> for PromptError {
    fn from(e: tera::Error) -> Self {
        PromptError::TemplateRender(e.to_string())
    }
}
