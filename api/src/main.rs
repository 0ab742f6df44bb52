use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use vm_api::app::create_app;
use vm_api::routes::verification::AppState;
use vm_api::telemetry::init_tracing;
use vm_core::repositories::{InMemoryVerificationRepository, VerificationRepository};
use vm_core::services::verification::{VerificationService, VerificationServiceConfig};
use vm_infra::cache::RedisVerificationRepository;
use vm_infra::mail::create_mail_gateway;
use vm_shared::{AppConfig, Environment, StoreBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Environment-specific file first, then a plain .env
    let environment = Environment::from_env();
    if dotenvy::from_filename(environment.env_file()).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env();
    init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        store = ?config.verification.store,
        mail_configured = config.is_mail_configured(),
        development_mode = config.verification.development_mode,
        "Starting VeriMail API server"
    );

    let repository: Arc<dyn VerificationRepository> = match config.verification.store {
        StoreBackend::Memory => Arc::new(InMemoryVerificationRepository::new()),
        StoreBackend::Redis => Arc::new(
            RedisVerificationRepository::connect(&config.cache)
                .await
                .context("Failed to connect to Redis verification store")?,
        ),
    };
    let mail_service = create_mail_gateway(config.mail.clone(), config.verification.code_ttl_minutes);

    let verification_service = Arc::new(VerificationService::new(
        repository,
        mail_service,
        VerificationServiceConfig::from(&config.verification),
    ));
    let app_state = web::Data::new(AppState::new(verification_service));

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &app_config));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
