use melo_core::models::submission::AssessmentType;
use melo_core::models::tags::AggregateTags;
use melo_core::normalize::NormalizedSubmission;
use melo_openai::chat::ChatMessage;
use tera::{Context, Tera};

use crate::error::PromptError;
use crate::template::PromptTemplate;

const USER_TEMPLATE_NAME: &str = "patient_summary.user";

/// Everything the summary prompt is filled with.
#[derive(Debug, Clone, Copy)]
pub struct SummaryContext<'a> {
    pub oasmnr: &'a [NormalizedSubmission],
    pub sasba: &'a [NormalizedSubmission],
    pub abs: &'a [NormalizedSubmission],
    pub abc: &'a [NormalizedSubmission],
    pub trends: &'a AggregateTags,
}

/// Text standing in for one submission set inside the prompt.
///
/// An empty set becomes `No <TYPE> submissions available`, anything else its
/// JSON rendering.
pub fn submissions_context(
    records: &[NormalizedSubmission],
    kind: AssessmentType,
) -> Result<String, PromptError> {
    if records.is_empty() {
        return Ok(format!("No {} submissions available", kind.label()));
    }
    Ok(serde_json::to_string(records)?)
}

/// Render the user part of `template` with `ctx`.
pub fn render_user_prompt(
    template: &PromptTemplate,
    ctx: &SummaryContext<'_>,
) -> Result<String, PromptError> {
    let mut tera = Tera::default();
    tera.add_raw_template(USER_TEMPLATE_NAME, &template.user)
        .map_err(|e| PromptError::TemplateParse(e.to_string()))?;

    let mut context = Context::new();
    context.insert(
        "oasmnr_submissions_context",
        &submissions_context(ctx.oasmnr, AssessmentType::Oasmnr)?,
    );
    context.insert(
        "sasba_submissions_context",
        &submissions_context(ctx.sasba, AssessmentType::Sasba)?,
    );
    context.insert(
        "abs_submissions_context",
        &submissions_context(ctx.abs, AssessmentType::Abs)?,
    );
    context.insert(
        "abc_submissions_context",
        &submissions_context(ctx.abc, AssessmentType::Abc)?,
    );
    context.insert("trends", &serde_json::to_string(ctx.trends)?);

    let rendered = tera.render(USER_TEMPLATE_NAME, &context)?;
    Ok(rendered)
}

/// The system message followed by the rendered user message.
pub fn render_messages(
    template: &PromptTemplate,
    ctx: &SummaryContext<'_>,
) -> Result<Vec<ChatMessage>, PromptError> {
    let user = render_user_prompt(template, ctx)?;
    Ok(vec![
        ChatMessage::system(template.system.clone()),
        ChatMessage::user(user),
    ])
}
