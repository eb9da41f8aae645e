use std::net::SocketAddr;
use std::sync::Arc;

use auth::new_token_maker;
use bank_service::app::AppState;
use bank_service::app::Dependencies;
use bank_service::config::Config;
use bank_service::inbound::grpc::BankGrpcService;
use bank_service::inbound::http::router::create_router;
use bank_service::outbound::repositories::PostgresSessionRepository;
use bank_service::outbound::repositories::PostgresUserRepository;
use bank_service::proto::simple_bank_server::SimpleBankServer;
use sqlx::postgres::PgPoolOptions;
use tokio::task::JoinHandle;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bank_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "bank-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        grpc_port = config.server.grpc_port,
        token_kind = ?config.token.kind,
        access_token_duration_secs = config.token.access_token_duration_secs,
        refresh_token_duration_secs = config.token.refresh_token_duration_secs,
        "Configuration loaded"
    );

    // Misconfigured keys or lifetimes stop the service before it binds.
    let token_maker = new_token_maker(config.token.kind, config.token.symmetric_key.as_bytes())?;
    let durations = config.token.durations()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let state = AppState::new(Dependencies {
        user_repository: Arc::new(PostgresUserRepository::new(pg_pool.clone())),
        session_repository: Arc::new(PostgresSessionRepository::new(pg_pool)),
        token_maker,
        durations,
    });

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application =
        create_router(state.clone()).into_make_service_with_connect_info::<SocketAddr>();
    let http_server =
        tokio::spawn(async move { axum::serve(http_listener, http_application).await });

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = BankGrpcService::new(state);
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let grpc_server = tokio::spawn(async move {
        Server::builder()
            .add_service(SimpleBankServer::new(grpc_service))
            .serve(grpc_address)
            .await
    });

    if let Err(e) = tokio::try_join!(supervise(http_server), supervise(grpc_server)) {
        tracing::error!(error = %e, "Server error");
        return Err(e);
    }

    tracing::info!("Servers exited successfully");
    Ok(())
}

/// Flattens a server task: its own error, a panic and an abort all surface
/// as `Err`.
async fn supervise<E>(server: JoinHandle<Result<(), E>>) -> Result<(), anyhow::Error>
where
    E: Into<anyhow::Error>,
{
    match server.await {
        Ok(result) => result.map_err(Into::into),
        Err(e) => Err(e.into()),
    }
}
