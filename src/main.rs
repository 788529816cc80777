//! Subtrack server binary.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use subtrack::adapters::auth::{Argon2Hasher, JwtSessionValidator, JwtTokenService};
use subtrack::adapters::http::{app_router, AppState, ShieldSettings};
use subtrack::adapters::memory::InMemoryStore;
use subtrack::adapters::postgres::{
    PostgresSubscriptionRepository, PostgresUnitOfWork, PostgresUserRepository,
};
use subtrack::adapters::rate_limiter::{InMemoryRateLimiter, TokenBucketConfig};
use subtrack::adapters::workflow::{
    DisabledReminderScheduler, HttpReminderScheduler, WorkflowClientConfig,
};
use subtrack::config::{AppConfig, ServerConfig, WorkflowConfig};
use subtrack::ports::{ReminderScheduler, SubscriptionRepository, UnitOfWork, UserRepository};
use subtrack::telemetry::{init_tracing, LogFormat};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(
        LogFormat::for_environment(config.is_production()),
        &config.server.log_level,
    );

    let state = build_state(&config).await?;
    let app = app_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Subtrack listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn build_state(config: &AppConfig) -> Result<AppState, BoxError> {
    let (users, subscriptions, uow): (
        Arc<dyn UserRepository>,
        Arc<dyn SubscriptionRepository>,
        Arc<dyn UnitOfWork>,
    ) = match &config.database {
        Some(database) => {
            let pool = database.pool_options().connect(&database.url).await?;
            if database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("database migrations applied");
            }
            (
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
                Arc::new(PostgresUnitOfWork::new(pool)),
            )
        }
        None => {
            tracing::warn!("no database configured, using in-memory storage");
            let store = InMemoryStore::new();
            (Arc::new(store.clone()), Arc::new(store.clone()), Arc::new(store))
        }
    };

    let jwt = Arc::new(JwtTokenService::new(
        &config.auth.jwt_secret,
        config.auth.jwt_expires_in_secs,
    ));

    Ok(AppState {
        sessions: Arc::new(JwtSessionValidator::new(jwt.clone(), users.clone())),
        tokens: jwt,
        users,
        subscriptions,
        uow,
        hasher: Arc::new(Argon2Hasher::new()),
        scheduler: reminder_scheduler(&config.workflow)?,
        rate_limiter: spawn_rate_limiter(config.rate_limit.bucket()),
        admin_key: config.auth.admin_creation_key.clone(),
        secure_cookies: config.is_production(),
        shield: ShieldSettings {
            rate_limit: config.rate_limit.enabled,
            trust_forwarded: config.rate_limit.trust_proxy_headers,
            block_bots: config.server.blocks_bots(),
        },
    })
}

/// Limiter plus a background sweep of buckets that have refilled.
fn spawn_rate_limiter(bucket: TokenBucketConfig) -> Arc<InMemoryRateLimiter> {
    let limiter = Arc::new(InMemoryRateLimiter::new(bucket));
    let sweeper = limiter.clone();
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(Duration::from_secs(60));
        loop {
            ticks.tick().await;
            sweeper.evict_idle().await;
        }
    });
    limiter
}

fn reminder_scheduler(config: &WorkflowConfig) -> Result<Arc<dyn ReminderScheduler>, BoxError> {
    match (&config.token, config.enabled) {
        (Some(token), true) => {
            let client = WorkflowClientConfig::new(
                config.base_url.clone(),
                token.clone(),
                config.server_url.clone(),
            )
            .with_timeout(config.timeout());
            Ok(Arc::new(HttpReminderScheduler::new(client)?))
        }
        _ => {
            tracing::info!("reminder workflow disabled");
            Ok(Arc::new(DisabledReminderScheduler))
        }
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins).allow_credentials(true)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
