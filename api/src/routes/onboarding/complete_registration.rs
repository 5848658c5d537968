//! Handler for POST /api/v1/onboarding/complete

use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use onbo_core::domain::entities::verification_session::VerificationPurpose;
use onbo_core::repositories::UserRepository;
use onbo_core::services::verification::{Notifier, PasswordHasher, TemporaryStore};
use onbo_shared::types::ApiResponse;
use onbo_shared::utils::mask_contact;

use crate::dto::onboarding::{CompleteRegistrationRequest, CompleteRegistrationResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Complete a staged registration.
///
/// Atomically consumes the verification session and its draft, then
/// commits the account. Answers 201 with the durable user id.
pub async fn complete_registration<U, N, T, H>(
    state: web::Data<AppState<U, N, T, H>>,
    request: web::Json<CompleteRegistrationRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    N: Notifier + 'static,
    T: TemporaryStore + 'static,
    H: PasswordHasher + 'static,
{
    let request = request.into_inner();
    request.validate().map_err(ApiError::from_validation)?;

    let user_id = state
        .onboarding
        .complete_registration(
            &request.contact,
            VerificationPurpose::FinishRegistration,
            &request.code,
        )
        .await?;

    info!(
        contact = %mask_contact(&request.contact),
        user_id = %user_id,
        "Registration completed"
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(CompleteRegistrationResponse {
        user_id,
    })))
}
