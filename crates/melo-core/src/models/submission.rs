use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Soft-delete flag shared by every submission table. Only `ACTIVE` rows are
/// ever read.
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// The four behavioural assessment kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    Oasmnr,
    Sasba,
    Abs,
    Abc,
}

impl AssessmentType {
    /// Value of the `assessment_type` discriminator column. Only OASMNR and
    /// SASBA rows carry one; they share `oasmnr_submissions`.
    pub fn discriminator(&self) -> &'static str {
        match self {
            AssessmentType::Oasmnr => "oasmnr",
            AssessmentType::Sasba => "sasba",
            AssessmentType::Abs => "abs",
            AssessmentType::Abc => "abc",
        }
    }

    /// Upper-case label used in prompts and logs.
    pub fn label(&self) -> &'static str {
        match self {
            AssessmentType::Oasmnr => "OASMNR",
            AssessmentType::Sasba => "SASBA",
            AssessmentType::Abs => "ABS",
            AssessmentType::Abc => "ABC",
        }
    }
}

/// Projection of `oasmnr_submissions`, used for both OASMNR and SASBA rows.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OasmnrSubmission {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub time_of_behaviour: NaiveDateTime,
    pub behaviour: String,
    pub severity: i32,
    pub antecedent: i32,
    pub intervention: String,
    pub recordings: i32,
    pub status: String,
    pub assessment_type: String,
    pub contributing_factors: Option<Vec<String>>,
    pub antecedent_other: Option<String>,
    pub intervention_other: Option<String>,
    pub severity_score: Option<i32>,
    pub intrusiveness: Option<i32>,
}

/// Projection of `abc_submissions`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AbcSubmission {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub severity: i32,
    pub occurred_at: NaiveDateTime,
    pub status: String,
    pub additional_comments: Option<String>,
    pub actions_taken: Option<Vec<String>>,
    pub before_events: Option<Vec<String>>,
    pub behaviour: Option<Vec<String>>,
    pub environment: Option<Vec<String>>,
    pub perceived_feelings: Option<Vec<String>>,
    pub location: Option<Vec<String>>,
    pub people_present: Option<Vec<String>>,
    pub restraint_techniques: Option<Vec<String>>,
}

/// Projection of `abs_submissions`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AbsSubmission {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub anger: i32,
    pub attention: i32,
    pub emotion_trigger: i32,
    pub impulsivity: i32,
    pub fluctuating_mood: i32,
    pub pulling_equipment: i32,
    pub repetitive_behaviour: i32,
    pub restlessness: i32,
    pub self_abusiveness: i32,
    pub self_stimulation: i32,
    pub talking: i32,
    pub uncooperative: i32,
    pub violence: i32,
    pub wandering: i32,
    pub observation_start: NaiveDateTime,
    pub observation_location: String,
    pub status: String,
    pub updated_at: NaiveDateTime,
    pub additional_comments: Option<String>,
    pub score: Option<i32>,
    pub severity: Option<String>,
}

impl AbsSubmission {
    /// The fourteen Agitated Behaviour Scale items, all rated on one scale.
    pub const SCALE_FIELDS: [&'static str; 14] = [
        "anger",
        "attention",
        "emotion_trigger",
        "impulsivity",
        "fluctuating_mood",
        "pulling_equipment",
        "repetitive_behaviour",
        "restlessness",
        "self_abusiveness",
        "self_stimulation",
        "talking",
        "uncooperative",
        "violence",
        "wandering",
    ];
}
