use std::sync::Arc;

use auth::Authenticator;
use platform_service::config::BootstrapAdminConfig;
use platform_service::config::Config;
use platform_service::domain::user::models::DisplayName;
use platform_service::domain::user::models::EmailAddress;
use platform_service::domain::user::models::Password;
use platform_service::domain::user::models::RegisterCommand;
use platform_service::domain::user::ports::UserServicePort;
use platform_service::domain::user::service::UserService;
use platform_service::inbound::http::cookies::CookieSettings;
use platform_service::inbound::http::router::create_router;
use platform_service::outbound::repositories::InMemoryUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "platform_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "platform-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        secure_cookies = config.cookies.secure,
        bootstrap_admin = config.bootstrap_admin.is_some(),
        "Configuration loaded"
    );

    let secrets = config.signing_secrets().map_err(|e| {
        tracing::error!(error = %e, "Refusing to start without valid signing secrets");
        e
    })?;

    let authenticator = Arc::new(Authenticator::new(&secrets));
    let user_repository = Arc::new(InMemoryUserRepository::new());
    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));

    if let Some(admin) = &config.bootstrap_admin {
        let user = user_service
            .ensure_admin(bootstrap_command(admin)?)
            .await?;
        tracing::info!(user_id = %user.id, "Bootstrap admin ready");
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        authenticator,
        CookieSettings::new(config.cookies.secure),
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

fn bootstrap_command(admin: &BootstrapAdminConfig) -> Result<RegisterCommand, anyhow::Error> {
    Ok(RegisterCommand::new(
        DisplayName::new(admin.name.clone())?,
        EmailAddress::new(admin.email.clone())?,
        Password::new(admin.password.clone())?,
    ))
}
