use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use vm_core::services::verification::{ConfirmVerificationResult, RequestVerificationResult};
use vm_core::VerificationStatus;
use vm_shared::utils::normalize_email;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestVerificationRequest {
    /// Address to verify
    #[validate(email, length(max = 254))]
    pub email: String,
}

impl RequestVerificationRequest {
    /// Address trimmed and with a lowercase domain, ready for validation
    pub fn normalized(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestVerificationResponse {
    pub verification_id: Uuid,
    pub expires_at: DateTime<Utc>,
    /// Only present when the code was not delivered by email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<RequestVerificationResult> for RequestVerificationResponse {
    fn from(result: RequestVerificationResult) -> Self {
        Self {
            verification_id: result.verification_id,
            expires_at: result.expires_at,
            code: result.code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmVerificationRequest {
    /// Id returned by the request endpoint
    #[validate(length(min = 1))]
    pub verification_id: String,

    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmVerificationResponse {
    pub status: VerificationStatus,
}

impl From<ConfirmVerificationResult> for ConfirmVerificationResponse {
    fn from(result: ConfirmVerificationResult) -> Self {
        Self {
            status: result.status,
        }
    }
}
