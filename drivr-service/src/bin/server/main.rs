use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use drivr_service::config::Config;
use drivr_service::domain::report::service::ReportService;
use drivr_service::domain::user::service::UserService;
use drivr_service::inbound::http::router::create_router;
use drivr_service::inbound::http::router::AppState;
use drivr_service::outbound::repositories::PostgresReportRepository;
use drivr_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drivr_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "drivr-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.auth.algorithm,
        jwt_expiration_minutes = config.auth.expiration_minutes,
        cors_origins = ?config.server.cors_origins,
        "Configuration loaded"
    );

    // Fail before touching the database if the signing or hashing setup is unusable.
    let authenticator = Arc::new(Authenticator::new(&config.auth)?);
    let password_hasher = PasswordHasher::from_config(&config.hashing)?;

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

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let report_repository = Arc::new(PostgresReportRepository::new(pg_pool));

    let state = AppState {
        user_service: Arc::new(UserService::new(user_repository, password_hasher)),
        report_service: Arc::new(ReportService::new(report_repository)),
        authenticator,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(state, &config.server.cors_origins);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
