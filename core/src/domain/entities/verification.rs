//! Verification record entity for email one-time code verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Lifecycle status of a verification record
///
/// `Pending` is the only non-terminal state. Once a record reaches
/// `Verified`, `Failed` or `Expired` it never transitions again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Code issued, waiting for confirmation
    Pending,
    /// Correct code presented in time
    Verified,
    /// Attempt limit reached
    Failed,
    /// Code lifetime elapsed before a correct confirmation
    Expired,
}

impl VerificationStatus {
    /// Whether no further transition can happen from this status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VerificationStatus::Pending)
    }

    /// Wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Failed => "failed",
            VerificationStatus::Expired => "expired",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single email verification, keyed by its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Unique identifier, also the token a client presents to confirm
    pub id: Uuid,

    /// Address the code was sent to
    pub email: String,

    /// The 6-digit code; empty once verified
    pub code: String,

    /// Current lifecycle status
    pub status: VerificationStatus,

    /// Number of wrong codes presented so far
    pub attempts: u32,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Creates a pending record with a fresh id
    ///
    /// # Arguments
    ///
    /// * `email` - The address the code is sent to
    /// * `code` - The generated verification code
    /// * `ttl` - How long the code stays acceptable
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Internal)` - The expiry is not representable
    pub fn new(email: String, code: String, ttl: Duration) -> DomainResult<Self> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| DomainError::Internal {
                message: format!("Code lifetime out of range: {}s", ttl.num_seconds()),
            })?;

        Ok(Self {
            id: Uuid::new_v4(),
            email,
            code,
            status: VerificationStatus::Pending,
            attempts: 0,
            created_at: now,
            expires_at,
        })
    }

    /// Whether the record is in a terminal status
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether the code is no longer acceptable at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the attempt budget is used up
    pub fn has_exhausted_attempts(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Compare a candidate code against the stored one in constant time
    ///
    /// An empty stored code (already verified) never matches.
    pub fn matches_code(&self, candidate: &str) -> bool {
        if self.code.is_empty() || self.code.len() != candidate.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Count a wrong code; reaching `max_attempts` fails the record
    pub fn record_failed_attempt(&mut self, max_attempts: u32) {
        self.attempts += 1;
        if self.attempts >= max_attempts {
            self.status = VerificationStatus::Failed;
        }
    }

    /// Mark as verified and clear the code so it cannot be reused or leaked
    pub fn mark_verified(&mut self) {
        self.status = VerificationStatus::Verified;
        self.code.clear();
    }

    /// Mark as expired
    pub fn mark_expired(&mut self) {
        self.status = VerificationStatus::Expired;
    }

    /// Mark as failed
    pub fn mark_failed(&mut self) {
        self.status = VerificationStatus::Failed;
    }

    /// Wrong codes still accepted before the record fails
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }
}
