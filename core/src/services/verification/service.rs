//! Main verification service implementation

use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;
use vm_shared::utils::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::VerificationRecord;
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::VerificationRepository;

use super::code_generator::generate_code;
use super::config::VerificationServiceConfig;
use super::record_locks::RecordLocks;
use super::traits::MailServiceTrait;
use super::types::{ConfirmVerificationResult, RequestVerificationResult};

/// Verification service owning the request/confirm lifecycle
///
/// Generic over the store and the mail gateway. Both may be trait objects
/// (`dyn VerificationRepository`, `dyn MailServiceTrait`).
pub struct VerificationService<R: ?Sized, M: ?Sized> {
    /// Store for verification records
    repository: Arc<R>,
    /// Gateway used to deliver codes
    mail_service: Arc<M>,
    /// Service configuration
    config: VerificationServiceConfig,
    /// Serializes confirm calls per verification id
    locks: RecordLocks,
}

impl<R, M> VerificationService<R, M>
where
    R: VerificationRepository + ?Sized,
    M: MailServiceTrait + ?Sized,
{
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `repository` - Verification store implementation
    /// * `mail_service` - Mail gateway implementation
    /// * `config` - Service configuration
    pub fn new(repository: Arc<R>, mail_service: Arc<M>, config: VerificationServiceConfig) -> Self {
        Self {
            repository,
            mail_service,
            config,
            locks: RecordLocks::new(),
        }
    }

    /// Service configuration
    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Start a verification for an email address
    ///
    /// This method:
    /// 1. Generates a code and persists a pending record
    /// 2. Sends the code through the mail gateway
    /// 3. Decides whether to return the code inline
    ///
    /// The code is withheld only when a configured gateway delivered it.
    /// An unconfigured gateway, or a failing one in development mode, yields
    /// the code in the result. Any other delivery failure deletes the record
    /// and returns `VerificationError::DeliveryFailed`.
    ///
    /// # Arguments
    ///
    /// * `email` - The address to verify; surrounding whitespace is trimmed
    ///   and the domain lowercased
    ///
    /// # Returns
    ///
    /// * `Ok(RequestVerificationResult)` - Id, expiry and possibly the code
    /// * `Err(DomainError)` - Invalid address, store failure or delivery failure
    pub async fn request_verification(&self, email: &str) -> DomainResult<RequestVerificationResult> {
        let email = normalize_email(email);
        let email = email.as_str();

        if !is_valid_email(email) {
            return Err(DomainError::Validation {
                message: "Invalid email address".to_string(),
            });
        }

        let code = generate_code();
        let ttl = Duration::try_minutes(self.config.code_expiration_minutes).ok_or_else(|| {
            DomainError::Internal {
                message: format!(
                    "Invalid code lifetime: {} minutes",
                    self.config.code_expiration_minutes
                ),
            }
        })?;
        let record = VerificationRecord::new(email.to_string(), code.clone(), ttl)?;

        self.repository.save(&record).await?;

        tracing::info!(
            email = %mask_email(email),
            verification_id = %record.id,
            expires_at = %record.expires_at,
            event = "verification_created",
            "Created verification record"
        );

        let configured = self.mail_service.is_configured();
        let inline = |code: String| RequestVerificationResult {
            verification_id: record.id,
            expires_at: record.expires_at,
            code: Some(code),
        };

        let delivery = self.mail_service.send_verification_code(email, &code).await;

        match delivery {
            Ok(()) if configured => {
                tracing::info!(
                    verification_id = %record.id,
                    event = "verification_code_sent",
                    "Verification code delivered"
                );
                Ok(RequestVerificationResult {
                    verification_id: record.id,
                    expires_at: record.expires_at,
                    code: None,
                })
            }
            Ok(()) => {
                tracing::warn!(
                    verification_id = %record.id,
                    event = "verification_code_inline",
                    "Mail gateway not configured, returning code to caller"
                );
                Ok(inline(code))
            }
            Err(reason) if !configured || self.config.development_mode => {
                tracing::warn!(
                    verification_id = %record.id,
                    error = %reason,
                    event = "verification_delivery_degraded",
                    "Failed to send verification email, returning code to caller"
                );
                Ok(inline(code))
            }
            Err(reason) => {
                tracing::error!(
                    verification_id = %record.id,
                    email = %mask_email(email),
                    error = %reason,
                    event = "verification_delivery_failed",
                    "Failed to send verification email"
                );

                if let Err(e) = self.repository.delete(record.id).await {
                    tracing::error!(
                        verification_id = %record.id,
                        error = %e,
                        event = "verification_rollback_failed",
                        "Failed to delete undelivered verification"
                    );
                }

                Err(VerificationError::DeliveryFailed.into())
            }
        }
    }

    /// Confirm a verification with a candidate code
    ///
    /// Checks run in a fixed order: unknown id, terminal status, expiry,
    /// exhausted attempts, code comparison. Terminal records are returned
    /// unchanged. A wrong code is counted before the error is returned, and
    /// the attempt that reaches the limit still reports `InvalidCode`.
    ///
    /// The new state is written with `update_if_unchanged`. If another
    /// process changed the record in between, the record is read again and
    /// the checks rerun against the fresh state.
    ///
    /// # Arguments
    ///
    /// * `verification_id` - Id returned by `request_verification`
    /// * `code` - Candidate code
    ///
    /// # Returns
    ///
    /// * `Ok(ConfirmVerificationResult)` - Status after the call
    /// * `Err(DomainError)` - `NotFound`, `InvalidCode` or a store failure
    pub async fn confirm_verification(
        &self,
        verification_id: Uuid,
        code: &str,
    ) -> DomainResult<ConfirmVerificationResult> {
        let _guard = self.locks.acquire(verification_id).await;
        let max_attempts = self.config.max_attempts;

        // Every lost write means the record moved forward, so this terminates
        loop {
            let current = self
                .repository
                .find_by_id(verification_id)
                .await?
                .ok_or(VerificationError::NotFound)?;

            if current.is_terminal() {
                tracing::debug!(
                    verification_id = %verification_id,
                    status = %current.status,
                    event = "verification_already_final",
                    "Confirm on finished verification"
                );
                return Ok(current.status.into());
            }

            let mut record = current.clone();
            let transition = if record.is_expired_at(Utc::now()) {
                record.mark_expired();
                Transition::Expired
            } else if record.has_exhausted_attempts(max_attempts) {
                record.mark_failed();
                Transition::Exhausted
            } else if !record.matches_code(code) {
                record.record_failed_attempt(max_attempts);
                Transition::Mismatch
            } else {
                record.mark_verified();
                Transition::Matched
            };

            if !self.repository.update_if_unchanged(&current, &record).await? {
                tracing::debug!(
                    verification_id = %verification_id,
                    event = "verification_write_conflict",
                    "Verification changed concurrently, retrying"
                );
                continue;
            }

            return match transition {
                Transition::Mismatch => {
                    let remaining_attempts = record.remaining_attempts(max_attempts);
                    tracing::warn!(
                        verification_id = %verification_id,
                        attempts = record.attempts,
                        remaining_attempts,
                        status = %record.status,
                        event = "verification_code_mismatch",
                        "Invalid verification code"
                    );
                    Err(VerificationError::InvalidCode { remaining_attempts }.into())
                }
                Transition::Expired => Ok(finished(&record, "verification_expired")),
                Transition::Exhausted => Ok(finished(&record, "verification_failed")),
                Transition::Matched => Ok(finished(&record, "verification_succeeded")),
            };
        }
    }
}

/// Outcome of the checks on a pending record
enum Transition {
    Expired,
    Exhausted,
    Mismatch,
    Matched,
}

fn finished(record: &VerificationRecord, event: &'static str) -> ConfirmVerificationResult {
    tracing::info!(
        verification_id = %record.id,
        status = %record.status,
        attempts = record.attempts,
        event,
        "Verification finished"
    );

    ConfirmVerificationResult {
        status: record.status,
    }
}
