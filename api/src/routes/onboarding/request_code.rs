//! Handler for POST /api/v1/onboarding/request-code

use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use onbo_core::errors::DomainError;
use onbo_core::repositories::UserRepository;
use onbo_core::services::verification::{Notifier, PasswordHasher, TemporaryStore};
use onbo_shared::types::ApiResponse;
use onbo_shared::utils::mask_contact;

use crate::dto::onboarding::{RequestCodeRequest, RequestCodeResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Issue a verification code.
///
/// For `finish_registration` the request must carry registration details,
/// which are staged (password hashed) until the code is confirmed. Other
/// purposes stage only a session.
pub async fn request_code<U, N, T, H>(
    state: web::Data<AppState<U, N, T, H>>,
    request: web::Json<RequestCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    N: Notifier + 'static,
    T: TemporaryStore + 'static,
    H: PasswordHasher + 'static,
{
    let request = request.into_inner();
    request.validate().map_err(ApiError::from_validation)?;

    info!(
        contact = %mask_contact(&request.contact),
        purpose = %request.purpose,
        "Processing request-code"
    );

    let result = if request.purpose.requires_draft() {
        let registration = request.registration.ok_or_else(|| {
            ApiError(DomainError::Validation {
                message: format!("Purpose {} requires registration details", request.purpose),
            })
        })?;
        state
            .onboarding
            .request_registration_code(
                &request.contact,
                request.delivery_method,
                registration.into(),
            )
            .await?
    } else {
        if request.registration.is_some() {
            return Err(ApiError(DomainError::Validation {
                message: format!(
                    "Purpose {} does not accept registration details",
                    request.purpose
                ),
            }));
        }
        state
            .onboarding
            .request_verification_code(&request.contact, request.purpose, request.delivery_method)
            .await?
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(RequestCodeResponse {
        expires_in_seconds: result.expires_in_seconds,
        delivery_id: result.delivery_id,
    })))
}
