use async_trait::async_trait;
use thiserror::Error;

use crate::data_structs::student_enrollment::{NewEnrollment, StudentEnrollment};

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence seam for enrollment records. The handlers only talk to this
/// trait so they can run against MySQL in production and memory in tests.
#[async_trait]
pub trait EnrollmentStore: Send + Sync {

    /// Returns the record whose four fields match `enrollment` exactly,
    /// inserting it first if none exists. The bool is true when the row
    /// was created by this call.
    async fn find_or_create(&self, enrollment: &NewEnrollment) -> Result<(StudentEnrollment, bool), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
