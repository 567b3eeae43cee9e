use std::path::Path;

use melo_core::models::submission::AssessmentType;
use melo_core::models::tags::AggregateTags;
use melo_core::normalize::NormalizedSubmission;
use melo_openai::chat::ChatRole;
use melo_prompt::error::PromptError;
use melo_prompt::render::{SummaryContext, render_messages, render_user_prompt, submissions_context};
use melo_prompt::template::{PromptTemplate, SUMMARY_SECTION};

const PROMPTS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/prompts.yaml");

fn record(value: serde_json::Value) -> NormalizedSubmission {
    value.as_object().cloned().unwrap()
}

fn shipped_template() -> PromptTemplate {
    let document = std::fs::read_to_string(PROMPTS_PATH).unwrap();
    PromptTemplate::from_yaml_str(&document, SUMMARY_SECTION).unwrap()
}

fn template(user: &str) -> PromptTemplate {
    PromptTemplate {
        system: "You write handover summaries.".to_string(),
        user: user.to_string(),
    }
}

const ALL_PLACEHOLDERS: &str = "O={{ oasmnr_submissions_context }}|S={{ sasba_submissions_context }}|B={{ abs_submissions_context }}|C={{ abc_submissions_context }}|T={{ trends }}";

#[test]
fn empty_sets_use_fallback_strings() {
    let tags = AggregateTags::default();
    let ctx = SummaryContext {
        oasmnr: &[],
        sasba: &[],
        abs: &[],
        abc: &[],
        trends: &tags,
    };

    let user = render_user_prompt(&template(ALL_PLACEHOLDERS), &ctx).unwrap();
    assert_eq!(
        user,
        "O=No OASMNR submissions available|S=No SASBA submissions available|B=No ABS submissions available|C=No ABC submissions available|T={}"
    );
}

#[test]
fn non_empty_sets_render_as_json_without_escaping() {
    let oasmnr = vec![record(serde_json::json!({
        "behaviour": "Verbal aggression",
        "antecedent": "Personal care",
    }))];
    let tags = AggregateTags {
        oasmnr_count: Some(3),
        ..Default::default()
    };
    let ctx = SummaryContext {
        oasmnr: &oasmnr,
        sasba: &[],
        abs: &[],
        abc: &[],
        trends: &tags,
    };

    let user = render_user_prompt(&template(ALL_PLACEHOLDERS), &ctx).unwrap();
    assert!(user.starts_with(
        r#"O=[{"antecedent":"Personal care","behaviour":"Verbal aggression"}]|S=No SASBA"#
    ));
    assert!(user.ends_with(r#"T={"oasmnr_count":3}"#));
}

#[test]
fn fallback_names_the_assessment_type() {
    assert_eq!(
        submissions_context(&[], AssessmentType::Abc).unwrap(),
        "No ABC submissions available"
    );
}

#[test]
fn shipped_template_places_each_context_once() {
    let template = shipped_template();
    let abs = vec![record(serde_json::json!({ "aggression": "Severe" }))];
    let tags = AggregateTags {
        abs_count: Some(1),
        ..Default::default()
    };
    let ctx = SummaryContext {
        oasmnr: &[],
        sasba: &[],
        abs: &abs,
        abc: &[],
        trends: &tags,
    };

    let user = render_user_prompt(&template, &ctx).unwrap();
    assert_eq!(user.matches("No OASMNR submissions available").count(), 1);
    assert_eq!(user.matches("No SASBA submissions available").count(), 1);
    assert_eq!(user.matches("No ABC submissions available").count(), 1);
    assert_eq!(user.matches(r#"[{"aggression":"Severe"}]"#).count(), 1);
    assert_eq!(user.matches(r#"{"abs_count":1}"#).count(), 1);
    assert!(!user.contains("{{"));
}

#[test]
fn messages_are_system_then_user() {
    let template = shipped_template();
    let tags = AggregateTags::default();
    let ctx = SummaryContext {
        oasmnr: &[],
        sasba: &[],
        abs: &[],
        abc: &[],
        trends: &tags,
    };

    let messages = render_messages(&template, &ctx).unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, ChatRole::System);
    assert_eq!(messages[0].content, template.system);
    assert_eq!(messages[1].role, ChatRole::User);
}

#[test]
fn unknown_placeholder_fails_rendering() {
    let tags = AggregateTags::default();
    let ctx = SummaryContext {
        oasmnr: &[],
        sasba: &[],
        abs: &[],
        abc: &[],
        trends: &tags,
    };

    let err = render_user_prompt(&template("{{ patient_name }}"), &ctx).unwrap_err();
    assert!(matches!(err, PromptError::TemplateRender(_)));
}

#[test]
fn missing_section_is_reported() {
    let err = PromptTemplate::from_yaml_str("other:\n  system: a\n  user: b\n", SUMMARY_SECTION)
        .unwrap_err();
    assert!(matches!(err, PromptError::MissingSection(ref s) if s == "patient_summary"));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let err = PromptTemplate::from_yaml_str("patient_summary: [unclosed", SUMMARY_SECTION)
        .unwrap_err();
    assert!(matches!(err, PromptError::TemplateParse(_)));
}

#[test]
fn section_without_user_part_is_a_parse_error() {
    let err = PromptTemplate::from_yaml_str("patient_summary:\n  system: only\n", SUMMARY_SECTION)
        .unwrap_err();
    assert!(matches!(err, PromptError::TemplateParse(_)));
}

#[tokio::test]
async fn load_reads_the_shipped_prompts() {
    let template = PromptTemplate::load(Path::new(PROMPTS_PATH), SUMMARY_SECTION)
        .await
        .unwrap();
    assert!(template.user.contains("{{ trends }}"));
    assert!(!template.system.is_empty());
}

#[tokio::test]
async fn load_reports_missing_file() {
    let err = PromptTemplate::load(Path::new("/nonexistent/prompts.yaml"), SUMMARY_SECTION)
        .await
        .unwrap_err();
    assert!(matches!(err, PromptError::TemplateNotFound { .. }));
}
