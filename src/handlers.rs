use crate::config::Config;
use crate::errors::AppError;
use crate::finance;
use crate::matcher::OpportunityMatcher;
use crate::models::*;
use crate::registry::DivisionRegistry;
use crate::storage::DealStore;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use moka::future::Cache;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Shared application state injected into handlers.
pub struct AppState {
    /// Division registry, built once at startup.
    pub registry: Arc<DivisionRegistry>,
    /// Deal/revenue storage port (Postgres or in-memory fixtures).
    pub store: Arc<dyn DealStore>,
    /// Generic five-factor matcher.
    pub matcher: OpportunityMatcher,
    /// Database pool when configured; matcher persistence is skipped
    /// without it.
    pub db: Option<PgPool>,
    /// Application configuration.
    pub config: Config,
    /// Cache for aggregation responses (revenue, trends, metrics).
    pub aggregate_cache: Cache<&'static str, serde_json::Value>,
}

/// Full router as served by `main`, minus middleware: `/health` plus the
/// `/api` routes. Tests drive this directly.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(api_router(state))
}

/// The rate-limited API surface. `/health` stays outside so load balancer
/// probes are never throttled.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/divisions", get(list_divisions))
        .route("/api/divisions/universal-search", post(universal_search))
        .route("/api/divisions/revenue", get(revenue))
        .route("/api/divisions/revenue/trends", get(revenue_trends))
        .route("/api/divisions/revenue/projections", get(revenue_projections))
        .route("/api/divisions/deals", get(list_deals).post(create_deal))
        .route("/api/divisions/deals/:id", put(update_deal))
        .route("/api/divisions/metrics", get(metrics))
        .route("/api/divisions/:id", get(get_division))
        .route("/api/divisions/:id/enable", post(enable_division))
        .route("/api/divisions/:id/disable", post(disable_division))
        .route("/api/divisions/:id/find-leads", post(find_leads))
        .route(
            "/api/divisions/:id/find-opportunities",
            post(find_opportunities),
        )
        .route("/api/divisions/:id/match", post(match_division))
        .route("/api/matcher/score", post(matcher_score))
        .route("/api/matcher/batch", post(matcher_batch))
        .with_state(state)
}

/// Health check endpoint; bypasses rate limiting in `main`.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-broker-api",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// GET /api/divisions
pub async fn list_divisions(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<DivisionSummary>>> {
    Json(ApiResponse::ok(state.registry.summaries()))
}

/// GET /api/divisions/:id
pub async fn get_division(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DivisionSummary>>, AppError> {
    let division = state.registry.require(&id)?;
    Ok(Json(ApiResponse::ok(division.summary())))
}

/// POST /api/divisions/:id/enable
pub async fn enable_division(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DivisionSummary>>, AppError> {
    set_division_enabled(&state, &id, true)
}

/// POST /api/divisions/:id/disable
pub async fn disable_division(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DivisionSummary>>, AppError> {
    set_division_enabled(&state, &id, false)
}

fn set_division_enabled(
    state: &AppState,
    id: &str,
    enabled: bool,
) -> Result<Json<ApiResponse<DivisionSummary>>, AppError> {
    let division = state.registry.require(id)?;
    division.set_enabled(enabled);
    tracing::info!(division = id, enabled, "division availability changed");
    Ok(Json(ApiResponse::ok(division.summary())))
}

/// POST /api/divisions/universal-search
pub async fn universal_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Json<ApiResponse<UniversalSearchResult>> {
    let result = state.registry.universal_search(request.criteria).await;
    Json(ApiResponse::ok(result))
}

/// POST /api/divisions/:id/find-leads
pub async fn find_leads(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ApiResponse<Vec<Lead>>>, AppError> {
    let division = state.registry.require(&id)?;
    Ok(Json(ApiResponse::ok(division.find_leads(&request.criteria)?)))
}

/// POST /api/divisions/:id/find-opportunities
pub async fn find_opportunities(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ApiResponse<Vec<Opportunity>>>, AppError> {
    let division = state.registry.require(&id)?;
    Ok(Json(ApiResponse::ok(
        division.find_opportunities(&request.criteria)?,
    )))
}

/// POST /api/divisions/:id/match
///
/// Scores a lead/opportunity pair with the division's factor table.
/// Returns 400 when either record is missing, 404 for an unknown division.
pub async fn match_division(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<ApiResponse<MatchResult>>, AppError> {
    let division = state.registry.require(&id)?;
    let lead = request
        .lead
        .ok_or_else(|| AppError::BadRequest("lead is required".to_string()))?;
    let opportunity = request
        .opportunity
        .ok_or_else(|| AppError::BadRequest("opportunity is required".to_string()))?;

    let result = division.score_match(&lead, &opportunity);
    tracing::info!(
        division = %id,
        score = result.score,
        rating = ?result.rating,
        "scored division match"
    );
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/matcher/score
///
/// Generic five-factor weighted match, with optional weight overrides.
/// Persists the match when a database is configured; mock mode only logs.
pub async fn matcher_score(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenericMatchRequest>,
) -> Result<Json<ApiResponse<crate::matcher::GenericMatch>>, AppError> {
    let lead = request
        .lead
        .ok_or_else(|| AppError::BadRequest("lead is required".to_string()))?;
    let opportunity = request
        .opportunity
        .ok_or_else(|| AppError::BadRequest("opportunity is required".to_string()))?;

    let result = state.matcher.score_match(&lead, &opportunity, request.weights);
    if let Err(e) = state.matcher.store_match(state.db.as_ref(), &result).await {
        // Persistence is best-effort; the score is still valid.
        tracing::warn!(error = %e, "failed to persist match");
    }
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/matcher/batch
pub async fn matcher_batch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchMatchRequest>,
) -> Json<ApiResponse<Vec<crate::matcher::GenericMatch>>> {
    let results = state
        .matcher
        .batch_score(&request.leads, &request.opportunities, request.weights);
    Json(ApiResponse::ok(results))
}

#[derive(Debug, Default, Deserialize)]
pub struct DealsQuery {
    pub division_id: Option<String>,
}

/// GET /api/divisions/deals
pub async fn list_deals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DealsQuery>,
) -> Result<Json<ApiResponse<Vec<Deal>>>, AppError> {
    let deals = state.store.list_deals(query.division_id.as_deref()).await?;
    Ok(Json(ApiResponse::ok(deals)))
}

/// POST /api/divisions/deals
///
/// Commission is recomputed from the division's default rate; client
/// supplied commissions are not accepted.
pub async fn create_deal(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDealRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Deal>>), AppError> {
    let division = state.registry.require(&request.division_id)?;
    if request.client_name.trim().is_empty() {
        return Err(AppError::BadRequest("client_name is required".to_string()));
    }
    if request.value <= 0.0 {
        return Err(AppError::BadRequest("value must be positive".to_string()));
    }

    let deal = Deal {
        id: Uuid::new_v4(),
        division_id: request.division_id,
        client_name: request.client_name,
        value: request.value,
        commission: division.calculate_commission(request.value),
        status: request.status.unwrap_or_default(),
        closed_at: None,
        created_at: Utc::now(),
    };
    let deal = state.store.create_deal(deal).await?;
    state.aggregate_cache.invalidate_all();
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(deal))))
}

/// PUT /api/divisions/deals/:id
pub async fn update_deal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDealRequest>,
) -> Result<Json<ApiResponse<Deal>>, AppError> {
    if let Some(value) = request.value {
        if value <= 0.0 {
            return Err(AppError::BadRequest("value must be positive".to_string()));
        }
    }
    let deal = state.store.update_deal(id, &request).await?;
    state.aggregate_cache.invalidate_all();
    Ok(Json(ApiResponse::ok(deal)))
}

/// GET /api/divisions/revenue
pub async fn revenue(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    if let Some(cached) = state.aggregate_cache.get("revenue").await {
        return Ok(Json(ApiResponse::ok(cached)));
    }
    let revenue = state.store.revenue_by_division().await?;
    let value = serde_json::to_value(revenue)
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    state.aggregate_cache.insert("revenue", value.clone()).await;
    Ok(Json(ApiResponse::ok(value)))
}

/// GET /api/divisions/revenue/trends
pub async fn revenue_trends(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    if let Some(cached) = state.aggregate_cache.get("trends").await {
        return Ok(Json(ApiResponse::ok(cached)));
    }
    let trends = state.store.revenue_trends().await?;
    let value = serde_json::to_value(trends)
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    state.aggregate_cache.insert("trends", value.clone()).await;
    Ok(Json(ApiResponse::ok(value)))
}

/// GET /api/divisions/revenue/projections
pub async fn revenue_projections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RevenueProjection>>>, AppError> {
    let revenue = state.store.revenue_by_division().await?;
    let projections = revenue
        .into_iter()
        .map(|r| RevenueProjection {
            projected_quarterly_value: finance::project_quarterly(r.total_value, r.deal_count),
            projected_quarterly_commission: finance::project_quarterly(
                r.total_commission,
                r.deal_count,
            ),
            basis_deal_count: r.deal_count,
            division_id: r.division_id,
        })
        .collect();
    Ok(Json(ApiResponse::ok(projections)))
}

/// GET /api/divisions/metrics
///
/// Merges registry-side metrics (mock pipeline) with stored revenue.
pub async fn metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    if let Some(cached) = state.aggregate_cache.get("metrics").await {
        return Ok(Json(ApiResponse::ok(cached)));
    }

    let revenue = state.store.revenue_by_division().await?;
    let criteria = SearchCriteria::default();
    let mut metrics = Vec::new();
    for summary in state.registry.summaries() {
        let division = state.registry.require(&summary.id)?;
        let leads = division.find_leads(&criteria)?;
        let opportunities = division.find_opportunities(&criteria)?;
        let pipeline_value: f64 = opportunities.iter().filter_map(|o| o.value).sum();
        let stored = revenue.iter().find(|r| r.division_id == summary.id);
        metrics.push(DivisionMetrics {
            division_id: summary.id.clone(),
            name: summary.name.clone(),
            enabled: summary.enabled,
            commission_rate: summary.commission_rate,
            lead_count: leads.len(),
            opportunity_count: opportunities.len(),
            pipeline_value,
            total_revenue: stored.map_or(0.0, |r| r.total_value),
            total_commission: stored.map_or(0.0, |r| r.total_commission),
        });
    }

    let value = serde_json::to_value(metrics)
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    state.aggregate_cache.insert("metrics", value.clone()).await;
    Ok(Json(ApiResponse::ok(value)))
}
