use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use vm_core::errors::VerificationError;
use vm_core::repositories::VerificationRepository;
use vm_core::services::verification::MailServiceTrait;

use crate::dto::{ConfirmVerificationRequest, ConfirmVerificationResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /verification/confirm
///
/// # Request Body
///
/// ```json
/// { "verificationId": "67e55044-10b1-426f-9247-bb680e5fe0c8", "code": "482913" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "status": "verified" }
/// ```
/// `expired` and `failed` are also returned with 200.
///
/// ## Errors
/// - 400 Bad Request: Malformed body or wrong code
/// - 404 Not Found: Unknown verification id
pub async fn confirm_verification<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<ConfirmVerificationRequest>,
) -> HttpResponse
where
    R: VerificationRepository + ?Sized + 'static,
    M: MailServiceTrait + ?Sized + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::debug!(errors = %errors, "Rejected confirm request");
        return validation_error_response(&errors);
    }

    // Ids that are not UUIDs cannot name any record
    let Ok(verification_id) = Uuid::parse_str(&request.verification_id) else {
        return handle_domain_error(VerificationError::NotFound.into());
    };

    match state
        .verification_service
        .confirm_verification(verification_id, &request.code)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(ConfirmVerificationResponse::from(result)),
        Err(error) => handle_domain_error(error),
    }
}
