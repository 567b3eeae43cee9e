use melo_core::models::submission::{
    ACTIVE_STATUS, AbcSubmission, AbsSubmission, AssessmentType, OasmnrSubmission,
};
use melo_core::models::tags::SubmissionCounts;
use sqlx::PgConnection;
use tracing::debug;
use uuid::Uuid;

use crate::error::StorageError;

// Enum-typed columns are cast to text so they decode as plain strings.

const BEHAVIOUR_SQL: &str = "\
SELECT id, patient_id, time_of_behaviour, behaviour::text AS behaviour, severity, antecedent, \
       intervention, recordings, status::text AS status, assessment_type, \
       contributing_factors::text[] AS contributing_factors, antecedent_other, \
       intervention_other, severity_score, intrusiveness \
FROM oasmnr_submissions \
WHERE patient_id = $1 AND assessment_type = $2 AND status::text = $3 \
ORDER BY time_of_behaviour ASC, id ASC";

const ABS_SQL: &str = "\
SELECT id, patient_id, anger, attention, emotion_trigger, impulsivity, fluctuating_mood, \
       pulling_equipment, repetitive_behaviour, restlessness, self_abusiveness, \
       self_stimulation, talking, uncooperative, violence, wandering, observation_start, \
       observation_location, status::text AS status, updated_at, additional_comments, score, \
       severity::text AS severity \
FROM abs_submissions \
WHERE patient_id = $1 AND status::text = $2 \
ORDER BY observation_start ASC, id ASC";

const ABC_SQL: &str = "\
SELECT id, patient_id, severity, occurred_at, status::text AS status, additional_comments, \
       actions_taken, before_events, behaviour, environment, perceived_feelings, location, \
       people_present, restraint_techniques \
FROM abc_submissions \
WHERE patient_id = $1 AND status::text = $2 \
ORDER BY occurred_at ASC, id ASC";

const COUNTS_SQL: &str = "\
SELECT \
    (SELECT SUM(recordings) FROM oasmnr_submissions \
      WHERE patient_id = $1 AND assessment_type = 'oasmnr' AND status::text = $2) AS oasmnr_count, \
    (SELECT SUM(recordings) FROM oasmnr_submissions \
      WHERE patient_id = $1 AND assessment_type = 'sasba' AND status::text = $2) AS sasba_count, \
    (SELECT COUNT(*) FROM abs_submissions \
      WHERE patient_id = $1 AND status::text = $2) AS abs_count, \
    (SELECT COUNT(*) FROM abc_submissions \
      WHERE patient_id = $1 AND status::text = $2) AS abc_count";

/// Active OASMNR submissions for a patient.
pub async fn oasmnr_submissions(
    conn: &mut PgConnection,
    patient_id: Uuid,
) -> Result<Vec<OasmnrSubmission>, StorageError> {
    behaviour_submissions(conn, patient_id, AssessmentType::Oasmnr).await
}

/// Active SASBA submissions for a patient.
pub async fn sasba_submissions(
    conn: &mut PgConnection,
    patient_id: Uuid,
) -> Result<Vec<OasmnrSubmission>, StorageError> {
    behaviour_submissions(conn, patient_id, AssessmentType::Sasba).await
}

async fn behaviour_submissions(
    conn: &mut PgConnection,
    patient_id: Uuid,
    kind: AssessmentType,
) -> Result<Vec<OasmnrSubmission>, StorageError> {
    let rows = sqlx::query_as::<_, OasmnrSubmission>(BEHAVIOUR_SQL)
        .bind(patient_id)
        .bind(kind.discriminator())
        .bind(ACTIVE_STATUS)
        .fetch_all(&mut *conn)
        .await
        .map_err(StorageError::query(kind.discriminator()))?;

    debug!(%patient_id, kind = kind.label(), rows = rows.len(), "fetched submissions");
    Ok(rows)
}

/// Active ABS submissions for a patient.
pub async fn abs_submissions(
    conn: &mut PgConnection,
    patient_id: Uuid,
) -> Result<Vec<AbsSubmission>, StorageError> {
    let rows = sqlx::query_as::<_, AbsSubmission>(ABS_SQL)
        .bind(patient_id)
        .bind(ACTIVE_STATUS)
        .fetch_all(&mut *conn)
        .await
        .map_err(StorageError::query("abs"))?;

    debug!(%patient_id, kind = "ABS", rows = rows.len(), "fetched submissions");
    Ok(rows)
}

/// Active ABC submissions for a patient.
pub async fn abc_submissions(
    conn: &mut PgConnection,
    patient_id: Uuid,
) -> Result<Vec<AbcSubmission>, StorageError> {
    let rows = sqlx::query_as::<_, AbcSubmission>(ABC_SQL)
        .bind(patient_id)
        .bind(ACTIVE_STATUS)
        .fetch_all(&mut *conn)
        .await
        .map_err(StorageError::query("abc"))?;

    debug!(%patient_id, kind = "ABC", rows = rows.len(), "fetched submissions");
    Ok(rows)
}

/// Recording sums for OASMNR and SASBA, row counts for ABS and ABC.
pub async fn submission_counts(
    conn: &mut PgConnection,
    patient_id: Uuid,
) -> Result<SubmissionCounts, StorageError> {
    sqlx::query_as::<_, SubmissionCounts>(COUNTS_SQL)
        .bind(patient_id)
        .bind(ACTIVE_STATUS)
        .fetch_one(&mut *conn)
        .await
        .map_err(StorageError::query("submission counts"))
}
