//! Handler for POST /api/v1/onboarding/verify-code

use actix_web::{web, HttpResponse};
use validator::Validate;

use onbo_core::repositories::UserRepository;
use onbo_core::services::verification::{Notifier, PasswordHasher, TemporaryStore};
use onbo_shared::types::ApiResponse;

use crate::dto::onboarding::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Validate a presented code.
///
/// Pure-verify purposes consume the session here; registration sessions
/// stay live for the complete-registration endpoint. An unknown, consumed
/// or expired code answers 422 uniformly.
pub async fn verify_code<U, N, T, H>(
    state: web::Data<AppState<U, N, T, H>>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    N: Notifier + 'static,
    T: TemporaryStore + 'static,
    H: PasswordHasher + 'static,
{
    let request = request.into_inner();
    request.validate().map_err(ApiError::from_validation)?;

    let result = state
        .onboarding
        .validate_code(&request.contact, request.purpose, &request.code)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(VerifyCodeResponse {
        verified: true,
        consumed: result.consumed,
    })))
}
