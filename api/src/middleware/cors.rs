//! CORS middleware configuration for cross-origin requests.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use onbo_shared::config::Environment;

/// Creates a CORS middleware instance configured for the current
/// environment.
///
/// Development is permissive for local clients and tooling; production
/// restricts origins to the `ALLOWED_ORIGINS` list.
pub fn create_cors(environment: Environment) -> Cors {
    if environment.is_production() {
        create_production_cors()
    } else {
        create_development_cors()
    }
}

fn create_development_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

fn create_production_cors() -> Cors {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS").unwrap_or_default();

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    for origin in allowed_origins.split(',').filter(|o| !o.trim().is_empty()) {
        cors = cors.allowed_origin(origin.trim());
    }

    cors
}
