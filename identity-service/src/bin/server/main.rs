use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenService;
use identity_service::config::Config;
use identity_service::domain::user::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::store::InMemoryUserStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    // The signing key itself is never logged
    tracing::info!(
        http_port = config.server.http_port,
        jwt_issuer = %config.jwt.issuer,
        jwt_audience = %config.jwt.audience,
        jwt_expiration_hours = config.jwt.expiration_hours,
        password_iterations = config.password.iterations,
        "Configuration loaded"
    );

    let user_store = Arc::new(InMemoryUserStore::new());
    let password_hasher = PasswordHasher::new(config.password.iterations);
    let token_service = TokenService::new(
        config.jwt.secret.as_bytes(),
        &config.jwt.issuer,
        &config.jwt.audience,
        config.jwt.expiration_hours,
    )?;

    let auth_service = Arc::new(AuthService::new(user_store, password_hasher, token_service));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(auth_service);
    axum::serve(http_listener, application).await?;

    Ok(())
}
