use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::inbound::http::router::create_router;
use user_service::inbound::http::router::AppState;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let auth_config = config.auth_config()?;

    tracing::info!(
        http_port = config.server.http_port,
        in_memory = config.database.is_in_memory(),
        token_ttl_minutes = auth_config.token_ttl().num_minutes(),
        cors_origins = config.cors.allowed_origins.len(),
        allowed_hosts = ?config.server.allowed_hosts,
        "Configuration loaded"
    );

    let state = if config.database.is_in_memory() {
        tracing::warn!(database = "memory", "Using in-memory user repository");
        AppState::new(Arc::new(InMemoryUserRepository::new()), &auth_config)
    } else {
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

        AppState::new(Arc::new(PostgresUserRepository::new(pg_pool)), &auth_config)
    };

    let http_address = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        state,
        &config.cors.allowed_origins,
        &config.server.allowed_hosts,
    );
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
