mod config;
mod db;
mod divisions;
mod errors;
mod finance;
mod handlers;
mod matcher;
mod models;
mod registry;
mod scoring;
mod storage;

use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::handlers::AppState;
use crate::matcher::OpportunityMatcher;
use crate::registry::DivisionRegistry;
use crate::storage::{DealStore, MemoryDealStore, PgDealStore};

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration, selects the storage backend
/// (Postgres when DATABASE_URL is set, in-memory fixtures otherwise),
/// builds the division registry, and serves the API with rate limiting,
/// CORS, and request tracing.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_broker_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Select storage backend once at startup; every handler goes through
    // the same port regardless of mode.
    let (db_pool, store): (Option<sqlx::PgPool>, Arc<dyn DealStore>) = match &config.database_url {
        Some(url) => {
            let database = Database::new(url).await?;
            tracing::info!("Database connection pool established");
            (
                Some(database.pool.clone()),
                Arc::new(PgDealStore::new(database.pool)),
            )
        }
        None => {
            tracing::info!("Running in mock mode with in-memory fixture deals");
            let seeds: Vec<(&str, f64)> = divisions::ALL
                .iter()
                .map(|h| (h.spec.id, h.spec.commission_rate))
                .collect();
            (None, Arc::new(MemoryDealStore::seeded(&seeds)))
        }
    };

    // Division registry, one instance for the process lifetime.
    let registry = Arc::new(DivisionRegistry::new());
    tracing::info!(divisions = divisions::ALL.len(), "division registry initialized");

    // Aggregation response cache (revenue, trends, metrics).
    let aggregate_cache = Cache::builder()
        .time_to_live(Duration::from_secs(config.metrics_cache_ttl_secs))
        .max_capacity(16)
        .build();

    let app_state = Arc::new(AppState {
        registry,
        store,
        matcher: OpportunityMatcher::new(),
        db: db_pool,
        config: config.clone(),
        aggregate_cache,
    });

    // Rate limiter: per-IP sustained rate with burst allowance.
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("invalid rate limiter configuration"))?,
    );

    // Health check bypasses rate limiting for load balancer probes.
    let protected_routes = handlers::api_router(app_state).layer(
        ServiceBuilder::new()
            // Request size limit: 1MB max payload
            .layer(RequestBodyLimitLayer::new(1024 * 1024))
            .layer(GovernorLayer {
                config: governor_conf,
            }),
    );

    let app = axum::Router::new()
        .route("/health", axum::routing::get(handlers::health))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
