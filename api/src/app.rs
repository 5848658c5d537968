//! Application factory
//!
//! Builds the Actix application over an `AppState` whose collaborator
//! types are generic, so production wiring and tests share one factory.

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use onbo_core::repositories::UserRepository;
use onbo_core::services::verification::{Notifier, PasswordHasher, TemporaryStore};
use onbo_shared::config::Environment;
use onbo_shared::types::{ApiResponse, ErrorResponse};

use crate::middleware::cors::create_cors;
use crate::routes::onboarding::{complete_registration, request_code, verify_code, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, N, T, H>(
    app_state: web::Data<AppState<U, N, T, H>>,
    environment: Environment,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            actix_web::body::EitherBody<
                tracing_actix_web::StreamSpan<actix_web::body::BoxBody>,
            >,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    N: Notifier + 'static,
    T: TemporaryStore + 'static,
    H: PasswordHasher + 'static,
{
    let cors = create_cors(environment);

    App::new()
        .app_data(app_state)
        .wrap(TracingLogger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/onboarding")
                    .route("/request-code", web::post().to(request_code::<U, N, T, H>))
                    .route("/verify-code", web::post().to(verify_code::<U, N, T, H>))
                    .route(
                        "/complete",
                        web::post().to(complete_registration::<U, N, T, H>),
                    ),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "onbo-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    let body: ApiResponse<()> =
        ApiResponse::error(ErrorResponse::new("not_found", "Resource not found"));
    HttpResponse::NotFound().json(body)
}
