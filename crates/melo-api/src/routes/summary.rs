use axum::Json;
use axum::extract::{Path, State};
use melo_storage::error::StorageError;
use melo_storage::store::PgSubmissionStore;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::summary::PatientSummary;

pub async fn patient_summary(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientSummary>, ApiError> {
    let patient_id = Uuid::parse_str(&patient_id)
        .map_err(|_| ApiError::BadRequest(format!("invalid patient id: {patient_id}")))?;

    // Released back to the pool when dropped, on every exit path.
    let mut conn = state.pool.acquire().await.map_err(StorageError::Acquire)?;
    let mut store = PgSubmissionStore::new(&mut conn);

    let summary = state.summaries.summarize(&mut store, patient_id).await?;
    Ok(Json(summary))
}
