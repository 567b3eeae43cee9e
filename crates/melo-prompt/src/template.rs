use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::PromptError;

/// Section of the prompts document holding the summary prompt.
pub const SUMMARY_SECTION: &str = "patient_summary";

/// A two-part chat prompt. `user` is a Tera template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PromptTemplate {
    pub system: String,
    pub user: String,
}

impl PromptTemplate {
    /// Pick `section` out of a YAML prompts document.
    pub fn from_yaml_str(document: &str, section: &str) -> Result<Self, PromptError> {
        let mut sections: HashMap<String, serde_yaml::Value> = serde_yaml::from_str(document)
            .map_err(|e| PromptError::TemplateParse(e.to_string()))?;

        let value = sections
            .remove(section)
            .ok_or_else(|| PromptError::MissingSection(section.to_string()))?;

        serde_yaml::from_value(value)
            .map_err(|e| PromptError::TemplateParse(format!("{section}: {e}")))
    }

    /// Read and parse the prompts document at `path`.
    pub async fn load(path: &Path, section: &str) -> Result<Self, PromptError> {
        let document = tokio::fs::read_to_string(path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                PromptError::TemplateNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                PromptError::TemplateRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        debug!(path = %path.display(), section, "loaded prompts file");
        Self::from_yaml_str(&document, section)
    }
}
