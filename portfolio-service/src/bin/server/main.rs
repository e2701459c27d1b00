use std::sync::Arc;
use std::time::Duration;

use auth::PasswordHasher;
use auth::ResetTokenCodec;
use auth::SessionSettings;
use auth::SessionTokenService;
use portfolio_service::config::Config;
use portfolio_service::domain::application::service::ApplicationService;
use portfolio_service::domain::message::service::MessageService;
use portfolio_service::domain::project::service::ProjectService;
use portfolio_service::domain::skill::service::SkillService;
use portfolio_service::domain::timeline::service::TimelineService;
use portfolio_service::domain::user::gate::AuthenticationGate;
use portfolio_service::domain::user::models::UserId;
use portfolio_service::domain::user::service::CredentialService;
use portfolio_service::domain::user::service::CredentialSettings;
use portfolio_service::inbound::http::router::create_router;
use portfolio_service::inbound::http::router::AppState;
use portfolio_service::inbound::http::session_cookie::SessionCookie;
use portfolio_service::outbound::assets::HttpAssetStore;
use portfolio_service::outbound::notifications::ResendEmailSender;
use portfolio_service::outbound::repositories::PostgresApplicationRepository;
use portfolio_service::outbound::repositories::PostgresMessageRepository;
use portfolio_service::outbound::repositories::PostgresProjectRepository;
use portfolio_service::outbound::repositories::PostgresSkillRepository;
use portfolio_service::outbound::repositories::PostgresTimelineRepository;
use portfolio_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MIN_SESSION_SECRET_BYTES: usize = 32;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "portfolio-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        session_days = config.session.expiration_days,
        reset_minutes = config.reset.expiration_minutes,
        allowed_origins = ?config.cors.allowed_origins,
        "Configuration loaded"
    );

    if config.session.secret.len() < MIN_SESSION_SECRET_BYTES {
        anyhow::bail!(
            "session.secret must be at least {} bytes",
            MIN_SESSION_SECRET_BYTES
        );
    }

    let portfolio_owner = config
        .portfolio
        .owner_id
        .as_deref()
        .map(UserId::from_string)
        .transpose()?;
    if portfolio_owner.is_none() {
        tracing::warn!("portfolio.owner_id is not set; the public profile route will answer 404");
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let hasher = Arc::new(PasswordHasher::with_cost(config.password.cost())?);
    let sessions = Arc::new(SessionTokenService::new(SessionSettings::new(
        config.session.secret.as_bytes(),
        chrono::Duration::days(config.session.expiration_days),
    )));
    let reset_codec =
        ResetTokenCodec::new(chrono::Duration::minutes(config.reset.expiration_minutes));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let notifier = Arc::new(ResendEmailSender::new(
        config.email.api_url.clone(),
        config.email.api_key.clone(),
        config.email.from.clone(),
        Duration::from_secs(config.email.timeout_secs),
    )?);
    let assets = Arc::new(HttpAssetStore::new(
        config.assets.upload_url.clone(),
        config.assets.destroy_url.clone(),
        config.assets.api_key.clone(),
        Duration::from_secs(config.assets.timeout_secs),
    )?);

    let credential_service = Arc::new(CredentialService::new(
        Arc::clone(&user_repository),
        notifier,
        Arc::clone(&assets),
        CredentialSettings {
            hasher,
            sessions: Arc::clone(&sessions),
            reset_codec,
            dashboard_url: config.reset.dashboard_url.clone(),
            portfolio_owner,
        },
    ));
    let gate = Arc::new(AuthenticationGate::new(user_repository, sessions));

    let state = AppState {
        credential_service,
        gate,
        project_service: Arc::new(ProjectService::new(
            Arc::new(PostgresProjectRepository::new(pg_pool.clone())),
            Arc::clone(&assets),
        )),
        skill_service: Arc::new(SkillService::new(
            Arc::new(PostgresSkillRepository::new(pg_pool.clone())),
            Arc::clone(&assets),
        )),
        timeline_service: Arc::new(TimelineService::new(Arc::new(
            PostgresTimelineRepository::new(pg_pool.clone()),
        ))),
        application_service: Arc::new(ApplicationService::new(
            Arc::new(PostgresApplicationRepository::new(pg_pool.clone())),
            assets,
        )),
        message_service: Arc::new(MessageService::new(Arc::new(
            PostgresMessageRepository::new(pg_pool),
        ))),
        session_cookie: SessionCookie::new(config.session.cookie_name.clone()),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, &config.cors.allowed_origins);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");
    Ok(())
}
