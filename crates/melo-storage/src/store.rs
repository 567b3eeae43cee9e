use std::future::Future;

use melo_core::models::patient::PatientStatus;
use melo_core::models::submission::{AbcSubmission, AbsSubmission, OasmnrSubmission};
use melo_core::models::tags::SubmissionCounts;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::StorageError;
use crate::{patients, submissions};

/// Read access to everything a patient summary is built from.
///
/// Methods take `&mut self` because an implementation typically wraps a
/// single connection that cannot serve two queries at once.
pub trait SubmissionStore {
    fn patient_status(
        &mut self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Option<PatientStatus>, StorageError>> + Send;

    fn oasmnr_submissions(
        &mut self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Vec<OasmnrSubmission>, StorageError>> + Send;

    fn sasba_submissions(
        &mut self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Vec<OasmnrSubmission>, StorageError>> + Send;

    fn abs_submissions(
        &mut self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Vec<AbsSubmission>, StorageError>> + Send;

    fn abc_submissions(
        &mut self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<Vec<AbcSubmission>, StorageError>> + Send;

    fn submission_counts(
        &mut self,
        patient_id: Uuid,
    ) -> impl Future<Output = Result<SubmissionCounts, StorageError>> + Send;
}

/// [`SubmissionStore`] over one borrowed Postgres connection.
pub struct PgSubmissionStore<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgSubmissionStore<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

impl SubmissionStore for PgSubmissionStore<'_> {
    async fn patient_status(
        &mut self,
        patient_id: Uuid,
    ) -> Result<Option<PatientStatus>, StorageError> {
        patients::patient_status(self.conn, patient_id).await
    }

    async fn oasmnr_submissions(
        &mut self,
        patient_id: Uuid,
    ) -> Result<Vec<OasmnrSubmission>, StorageError> {
        submissions::oasmnr_submissions(self.conn, patient_id).await
    }

    async fn sasba_submissions(
        &mut self,
        patient_id: Uuid,
    ) -> Result<Vec<OasmnrSubmission>, StorageError> {
        submissions::sasba_submissions(self.conn, patient_id).await
    }

    async fn abs_submissions(&mut self, patient_id: Uuid) -> Result<Vec<AbsSubmission>, StorageError> {
        submissions::abs_submissions(self.conn, patient_id).await
    }

    async fn abc_submissions(&mut self, patient_id: Uuid) -> Result<Vec<AbcSubmission>, StorageError> {
        submissions::abc_submissions(self.conn, patient_id).await
    }

    async fn submission_counts(&mut self, patient_id: Uuid) -> Result<SubmissionCounts, StorageError> {
        submissions::submission_counts(self.conn, patient_id).await
    }
}
