use melo_core::models::patient::PatientStatus;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::StorageError;

const PATIENT_STATUS_SQL: &str = "SELECT status::text FROM patients WHERE id = $1";

/// Lifecycle status of a patient, or `None` if no such patient exists.
pub async fn patient_status(
    conn: &mut PgConnection,
    patient_id: Uuid,
) -> Result<Option<PatientStatus>, StorageError> {
    let status: Option<String> = sqlx::query_scalar(PATIENT_STATUS_SQL)
        .bind(patient_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(StorageError::query("patient status"))?;

    status
        .map(|s| {
            s.parse::<PatientStatus>().map_err(|_| StorageError::UnexpectedValue {
                column: "patients.status",
                value: s,
            })
        })
        .transpose()
}
