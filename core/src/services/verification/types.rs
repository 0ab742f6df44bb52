//! Types for verification service results

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::VerificationStatus;

/// Result of requesting a verification
#[derive(Debug, Clone)]
pub struct RequestVerificationResult {
    /// Id the client presents when confirming
    pub verification_id: Uuid,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// The plaintext code, only present when it was not delivered by email
    pub code: Option<String>,
}

/// Result of a confirm call that reached a recognized outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmVerificationResult {
    /// Status of the record after the call
    pub status: VerificationStatus,
}

impl From<VerificationStatus> for ConfirmVerificationResult {
    fn from(status: VerificationStatus) -> Self {
        Self { status }
    }
}
