use actix_web::{web, HttpResponse};
use validator::Validate;

use vm_core::repositories::VerificationRepository;
use vm_core::services::verification::MailServiceTrait;
use vm_shared::utils::mask_email;

use crate::dto::{RequestVerificationRequest, RequestVerificationResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /verification/request
///
/// Starts a verification for an email address.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "verificationId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
///     "expiresAt": "2025-08-14T10:10:00Z",
///     "code": "482913"
/// }
/// ```
/// `code` is omitted when the email was actually delivered.
///
/// ## Errors
/// - 400 Bad Request: Invalid email or delivery failure
/// - 500 Internal Server Error: Store failure
pub async fn request_verification<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<RequestVerificationRequest>,
) -> HttpResponse
where
    R: VerificationRepository + ?Sized + 'static,
    M: MailServiceTrait + ?Sized + 'static,
{
    let request = request.into_inner().normalized();

    if let Err(errors) = request.validate() {
        tracing::debug!(errors = %errors, "Rejected verification request");
        return validation_error_response(&errors);
    }

    tracing::info!(email = %mask_email(&request.email), "Processing verification request");

    match state
        .verification_service
        .request_verification(&request.email)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(RequestVerificationResponse::from(result)),
        Err(error) => handle_domain_error(error),
    }
}
