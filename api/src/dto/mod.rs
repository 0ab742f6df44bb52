pub mod verification;

pub use verification::{
    ConfirmVerificationRequest, ConfirmVerificationResponse, RequestVerificationRequest,
    RequestVerificationResponse,
};
