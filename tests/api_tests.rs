//! HTTP surface tests driving the router directly in mock mode.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use moka::future::Cache;
use rust_broker_api::config::Config;
use rust_broker_api::divisions;
use rust_broker_api::handlers::{router, AppState};
use rust_broker_api::matcher::OpportunityMatcher;
use rust_broker_api::registry::DivisionRegistry;
use rust_broker_api::storage::MemoryDealStore;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

fn test_state() -> Arc<AppState> {
    let seeds: Vec<(&str, f64)> = divisions::ALL
        .iter()
        .map(|h| (h.spec.id, h.spec.commission_rate))
        .collect();
    Arc::new(AppState {
        registry: Arc::new(DivisionRegistry::new()),
        store: Arc::new(MemoryDealStore::seeded(&seeds)),
        matcher: OpportunityMatcher::new(),
        db: None,
        config: Config::for_tests(),
        aggregate_cache: Cache::builder()
            .time_to_live(Duration::from_secs(60))
            .max_capacity(16)
            .build(),
    })
}

async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn send_json(
    state: Arc<AppState>,
    method: &str,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let response = router(state)
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = get(test_state(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn list_divisions_returns_all_ten_in_envelope() {
    let (status, body) = get(test_state(), "/api/divisions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 10);
    assert!(data.iter().all(|d| d["enabled"] == true));
}

#[tokio::test]
async fn unknown_division_is_a_404_envelope() {
    let (status, body) = get(test_state(), "/api/divisions/timeshares").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("timeshares"));
}

#[tokio::test]
async fn disable_is_observable_through_summaries() {
    let state = test_state();
    let (status, body) = send_json(
        state.clone(),
        "POST",
        "/api/divisions/grants/disable",
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enabled"], false);

    let (_, body) = get(state.clone(), "/api/divisions/grants").await;
    assert_eq!(body["data"]["enabled"], false);

    let (_, body) = send_json(
        state,
        "POST",
        "/api/divisions/grants/enable",
        json!({}),
    )
    .await;
    assert_eq!(body["data"]["enabled"], true);
}

#[tokio::test]
async fn match_without_lead_is_a_400() {
    let (status, body) = send_json(
        test_state(),
        "POST",
        "/api/divisions/govcon/match",
        json!({ "opportunity": { "title": "IT Support BPA" } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "lead is required");
}

#[tokio::test]
async fn division_match_scores_the_reference_contractor() {
    let (status, body) = send_json(
        test_state(),
        "POST",
        "/api/divisions/govcon/match",
        json!({
            "lead": {
                "name": "Lone Star Federal Services",
                "location": "San Antonio, TX",
                "annual_revenue": 15_000_000.0,
                "codes": ["541512"],
                "certifications": ["Secret"],
                "track_record": "Excellent"
            },
            "opportunity": {
                "title": "Enterprise IT Modernization IDIQ",
                "location": "Fort Meade, MD",
                "value": 15_000_000.0,
                "codes": ["541512"],
                "required_certification": "Secret"
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["score"], 93);
    assert_eq!(body["data"]["rating"], "Excellent");
    assert_eq!(body["data"]["recommendation"], "Highly Recommended");
    assert_eq!(body["data"]["estimate"]["commission"], 750_000.0);
}

#[tokio::test]
async fn universal_search_spans_every_division() {
    let (status, body) = send_json(
        test_state(),
        "POST",
        "/api/divisions/universal-search",
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let leads = body["data"]["leads"].as_array().unwrap();
    assert!(!leads.is_empty());
    let mut ids: Vec<&str> = leads
        .iter()
        .map(|l| l["division_id"].as_str().unwrap())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);
    // No failures means no errors key in the payload.
    assert!(body["data"].get("errors").is_none());
}

#[tokio::test]
async fn universal_search_respects_criteria() {
    let (_, body) = send_json(
        test_state(),
        "POST",
        "/api/divisions/universal-search",
        json!({ "criteria": { "location": "TX", "limit": 5 } }),
    )
    .await;
    let leads = body["data"]["leads"].as_array().unwrap();
    assert!(leads
        .iter()
        .all(|l| l["location"].as_str().unwrap().contains("TX")));
}

#[tokio::test]
async fn find_leads_filters_by_industry() {
    let (status, body) = send_json(
        test_state(),
        "POST",
        "/api/divisions/govcon/find-leads",
        json!({ "criteria": { "industry": "cyber" } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let leads = body["data"].as_array().unwrap();
    assert!(!leads.is_empty());
    assert!(leads.iter().all(|l| l["industry"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("cyber")));
}

#[tokio::test]
async fn create_deal_recomputes_commission_server_side() {
    let state = test_state();
    let (status, body) = send_json(
        state.clone(),
        "POST",
        "/api/divisions/deals",
        json!({
            "division_id": "govcon",
            "client_name": "Meridian Defense Systems",
            "value": 200_000.0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // 5% govcon rate, regardless of anything the client might send.
    assert_eq!(body["data"]["commission"], 10_000.0);
    assert_eq!(body["data"]["status"], "pending");

    let (_, listing) = get(state, "/api/divisions/deals?division_id=govcon").await;
    assert_eq!(listing["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn create_deal_rejects_bad_input() {
    let (status, body) = send_json(
        test_state(),
        "POST",
        "/api/divisions/deals",
        json!({ "division_id": "govcon", "client_name": "  ", "value": 100.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "client_name is required");

    let (status, body) = send_json(
        test_state(),
        "POST",
        "/api/divisions/deals",
        json!({ "division_id": "govcon", "client_name": "Acme", "value": -5.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "value must be positive");
}

#[tokio::test]
async fn closing_a_deal_over_http_stamps_closed_at() {
    let state = test_state();
    let (_, created) = send_json(
        state.clone(),
        "POST",
        "/api/divisions/deals",
        json!({ "division_id": "loans", "client_name": "Harbor Credit Union", "value": 50_000.0 }),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        state,
        "PUT",
        &format!("/api/divisions/deals/{id}"),
        json!({ "status": "closed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "closed");
    assert!(body["data"]["closed_at"].is_string());
}

#[tokio::test]
async fn revenue_covers_every_seeded_division() {
    let (status, body) = get(test_state(), "/api/divisions/revenue").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 10);
    assert!(rows
        .iter()
        .all(|r| r["total_commission"].as_f64().unwrap() > 0.0));
}

#[tokio::test]
async fn projections_follow_revenue() {
    let (status, body) = get(test_state(), "/api/divisions/revenue/projections").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|r| r["basis_deal_count"] == 3));
}

#[tokio::test]
async fn metrics_merge_pipeline_and_revenue() {
    let (status, body) = get(test_state(), "/api/divisions/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 10);
    for row in rows {
        assert!(row["lead_count"].as_u64().unwrap() > 0);
        assert!(row["pipeline_value"].as_f64().unwrap() > 0.0);
        assert!(row["total_revenue"].as_f64().unwrap() > 0.0);
    }
}

#[tokio::test]
async fn matcher_score_works_without_a_database() {
    let (status, body) = send_json(
        test_state(),
        "POST",
        "/api/matcher/score",
        json!({
            "lead": { "industry": "Software", "location": "Austin, TX" },
            "opportunity": { "industry": "Software", "location": "Austin, TX" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"]["score"].as_u64().unwrap() <= 100);
    assert!(body["data"]["confidence"].is_string());
}

#[tokio::test]
async fn matcher_batch_returns_sorted_cross_product() {
    let (status, body) = send_json(
        test_state(),
        "POST",
        "/api/matcher/batch",
        json!({
            "leads": [
                { "industry": "Software", "location": "Austin, TX" },
                { "industry": "Energy", "location": "Fargo, ND" }
            ],
            "opportunities": [
                { "industry": "Software", "location": "Austin, TX" },
                { "industry": "Retail", "location": "Miami, FL" }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    let scores: Vec<u64> = results
        .iter()
        .map(|r| r["score"].as_u64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}
