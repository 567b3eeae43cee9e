//! Patient summary orchestration.
//!
//! Reads every active submission of a patient through a [`SubmissionStore`],
//! relabels coded fields, and asks a [`TextGenerator`] for a summary. A
//! patient with no active submissions gets a fixed answer without any
//! generation call.

use std::path::PathBuf;
use std::sync::Arc;

use melo_core::error::CoreError;
use melo_core::mapping::MappingTable;
use melo_core::models::tags::AggregateTags;
use melo_core::normalize::normalize;
use melo_openai::chat::{TextGenerator, unescape_newlines};
use melo_openai::error::OpenAiError;
use melo_prompt::error::PromptError;
use melo_prompt::render::{SummaryContext, render_messages};
use melo_prompt::template::{PromptTemplate, SUMMARY_SECTION};
use melo_storage::error::StorageError;
use melo_storage::store::SubmissionStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

pub const NO_DATA_SUMMARY: &str = "No data available for this patient";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub summary: String,
    pub ai_tags: AggregateTags,
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("patient {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("submission normalization failed: {0}")]
    Normalization(#[from] CoreError),

    #[error("service configuration error: {0}")]
    Configuration(String),

    #[error("summary generation failed: {0}")]
    Generation(String),
}

impl From<PromptError> for SummaryError {
    fn from(e: PromptError) -> Self {
        SummaryError::Configuration(e.to_string())
    }
}

impl From<OpenAiError> for SummaryError {
    fn from(e: OpenAiError) -> Self {
        if e.is_configuration() {
            SummaryError::Configuration(e.to_string())
        } else {
            SummaryError::Generation(e.to_string())
        }
    }
}

pub struct SummaryService<G> {
    mappings: Arc<MappingTable>,
    prompts_path: PathBuf,
    /// A provider that could not be set up keeps its error, reported only
    /// when a summary needs generating.
    generator: Result<G, OpenAiError>,
}

impl<G: TextGenerator> SummaryService<G> {
    pub fn new(
        mappings: MappingTable,
        prompts_path: impl Into<PathBuf>,
        generator: Result<G, OpenAiError>,
    ) -> Self {
        Self {
            mappings: Arc::new(mappings),
            prompts_path: prompts_path.into(),
            generator,
        }
    }

    pub async fn summarize<S: SubmissionStore>(
        &self,
        store: &mut S,
        patient_id: Uuid,
    ) -> Result<PatientSummary, SummaryError> {
        info!(%patient_id, "processing summary");

        match store.patient_status(patient_id).await? {
            Some(status) if status.is_visible() => {}
            _ => return Err(SummaryError::NotFound(patient_id)),
        }

        // One connection, so strictly one query at a time.
        let oasmnr = store.oasmnr_submissions(patient_id).await?;
        let sasba = store.sasba_submissions(patient_id).await?;
        let abs = store.abs_submissions(patient_id).await?;
        let abc = store.abc_submissions(patient_id).await?;
        let ai_tags = AggregateTags::from(store.submission_counts(patient_id).await?);

        let oasmnr = normalize(&oasmnr, &self.mappings)?;
        let sasba = normalize(&sasba, &self.mappings)?;
        let abs = normalize(&abs, &self.mappings)?;
        let abc = normalize(&abc, &self.mappings)?;

        if oasmnr.is_empty() && sasba.is_empty() && abs.is_empty() && abc.is_empty() {
            warn!(%patient_id, "no submissions found");
            return Ok(PatientSummary {
                summary: NO_DATA_SUMMARY.to_string(),
                ai_tags,
            });
        }

        let generator = self
            .generator
            .as_ref()
            .map_err(|e| SummaryError::Configuration(e.to_string()))?;

        let template = PromptTemplate::load(&self.prompts_path, SUMMARY_SECTION).await?;
        let messages = render_messages(
            &template,
            &SummaryContext {
                oasmnr: &oasmnr,
                sasba: &sasba,
                abs: &abs,
                abc: &abc,
                trends: &ai_tags,
            },
        )?;

        let text = generator.generate(&messages).await?;

        info!(
            %patient_id,
            oasmnr = oasmnr.len(),
            sasba = sasba.len(),
            abs = abs.len(),
            abc = abc.len(),
            "summary generated"
        );

        Ok(PatientSummary {
            summary: unescape_newlines(&text),
            ai_tags,
        })
    }
}
