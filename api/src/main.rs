//! Onbo API server entry point.
//!
//! Wires the Redis temporary store, the MySQL user repository, the
//! configured delivery channels and the bcrypt hasher into the onboarding
//! services and serves the HTTP API.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use onbo_api::app::create_app;
use onbo_api::routes::onboarding::AppState;
use onbo_core::domain::entities::verification_session::DeliveryMethod;
use onbo_core::repositories::UserRepository;
use onbo_core::services::onboarding::OnboardingService;
use onbo_core::services::verification::{
    CodeAlphabet, Notifier, PasswordHasher, TemporaryStore, VerificationService,
    VerificationServiceConfig,
};
use onbo_infra::cache::{RedisClient, RedisTemporaryStore};
use onbo_infra::database::{DatabasePool, MySqlUserRepository};
use onbo_infra::notify::{ChannelNotifier, ConsoleNotifier};
use onbo_infra::security::BcryptPasswordHasher;
use onbo_shared::config::{AppConfig, VerificationConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    info!(
        environment = %config.environment,
        "Starting Onbo API server"
    );

    // The fixed-code switch is a test facility; a production deployment
    // carrying it is a misconfiguration, not a feature.
    if config.environment.is_production() && config.verification.fixed_code.is_some() {
        anyhow::bail!("VERIFICATION_FIXED_CODE must not be set in production");
    }

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("Failed to create database pool")?;
    pool.health_check()
        .await
        .context("Database health check failed")?;

    let redis = RedisClient::new(config.cache.clone())
        .await
        .context("Failed to connect to Redis")?;
    redis
        .health_check()
        .await
        .context("Redis health check failed")?;
    let store = Arc::new(RedisTemporaryStore::new(redis));

    let users = Arc::new(MySqlUserRepository::new(pool.pool().clone()));
    let hasher = Arc::new(BcryptPasswordHasher::new());
    let verification_config = build_verification_config(&config.verification)?;

    if config.notify.use_mock {
        warn!("Using console notifier; verification codes will appear in the logs");
        let notifier = Arc::new(ConsoleNotifier::new());
        serve(config, users, notifier, store, hasher, verification_config).await
    } else {
        let notifier = Arc::new(
            ChannelNotifier::new(&config.notify)
                .context("Failed to configure delivery channels")?,
        );
        serve(config, users, notifier, store, hasher, verification_config).await
    }
}

/// Assemble the services and run the HTTP server
async fn serve<U, N, T, H>(
    config: AppConfig,
    users: Arc<U>,
    notifier: Arc<N>,
    store: Arc<T>,
    hasher: Arc<H>,
    verification_config: VerificationServiceConfig,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    N: Notifier + 'static,
    T: TemporaryStore + 'static,
    H: PasswordHasher + 'static,
{
    let verification = Arc::new(VerificationService::new(
        notifier,
        store,
        hasher,
        verification_config,
    ));
    let onboarding = Arc::new(OnboardingService::new(users, verification));
    let app_state = web::Data::new(AppState { onboarding });

    let environment = config.environment;
    let bind_address = config.server.bind_address();
    info!("Server listening on {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), environment));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}

/// Map the env-driven verification settings onto the core config
fn build_verification_config(
    shared: &VerificationConfig,
) -> anyhow::Result<VerificationServiceConfig> {
    let code_alphabet = match shared.code_alphabet.as_str() {
        "numeric" => CodeAlphabet::Numeric,
        "alphanumeric" => CodeAlphabet::Alphanumeric,
        other => anyhow::bail!("Unknown code alphabet: {}", other),
    };

    let mut allowed_delivery_methods = Vec::new();
    for method in &shared.allowed_delivery_methods {
        allowed_delivery_methods.push(
            method
                .parse::<DeliveryMethod>()
                .map_err(anyhow::Error::msg)?,
        );
    }

    Ok(VerificationServiceConfig {
        code_length: shared.code_length,
        code_alphabet,
        code_ttl_seconds: shared.code_ttl_seconds,
        fixed_code: shared.fixed_code.clone(),
        allowed_delivery_methods,
    })
}
