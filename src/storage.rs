//! Deal and revenue storage port.
//!
//! Two implementations selected once at startup: [`PgDealStore`] runs
//! parameterized SQL aggregation against Postgres; [`MemoryDealStore`]
//! serves deterministic fixture deals so the platform works end to end
//! with no database configured ("mock mode").

use crate::errors::AppError;
use crate::models::{
    Deal, DealStatus, DivisionRevenue, RevenueTrendPoint, UpdateDealRequest,
};
use async_trait::async_trait;
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, Datelike, Duration, Utc};
use sqlx::PgPool;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[async_trait]
pub trait DealStore: Send + Sync {
    async fn list_deals(&self, division_id: Option<&str>) -> Result<Vec<Deal>, AppError>;
    async fn create_deal(&self, deal: Deal) -> Result<Deal, AppError>;
    async fn update_deal(&self, id: Uuid, patch: &UpdateDealRequest) -> Result<Deal, AppError>;
    /// SUM/AVG/COUNT grouped by division, cancelled deals excluded.
    async fn revenue_by_division(&self) -> Result<Vec<DivisionRevenue>, AppError>;
    /// Monthly SUM/COUNT buckets, oldest first.
    async fn revenue_trends(&self) -> Result<Vec<RevenueTrendPoint>, AppError>;
}

// --- Postgres implementation ---

pub struct PgDealStore {
    pool: PgPool,
}

impl PgDealStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape; monetary columns are NUMERIC and come back as BigDecimal.
#[derive(sqlx::FromRow)]
struct DealRow {
    id: Uuid,
    division_id: String,
    client_name: String,
    value: BigDecimal,
    commission: BigDecimal,
    status: String,
    closed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl DealRow {
    fn into_deal(self) -> Deal {
        Deal {
            id: self.id,
            division_id: self.division_id,
            client_name: self.client_name,
            value: self.value.to_f64().unwrap_or(0.0),
            commission: self.commission.to_f64().unwrap_or(0.0),
            status: DealStatus::parse(&self.status).unwrap_or_default(),
            closed_at: self.closed_at,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RevenueRow {
    division_id: String,
    total_value: Option<BigDecimal>,
    total_commission: Option<BigDecimal>,
    deal_count: i64,
    avg_deal_value: Option<BigDecimal>,
}

#[derive(sqlx::FromRow)]
struct TrendRow {
    month: String,
    total_value: Option<BigDecimal>,
    total_commission: Option<BigDecimal>,
    deal_count: i64,
}

fn dec(value: Option<BigDecimal>) -> f64 {
    value.and_then(|v| v.to_f64()).unwrap_or(0.0)
}

#[async_trait]
impl DealStore for PgDealStore {
    async fn list_deals(&self, division_id: Option<&str>) -> Result<Vec<Deal>, AppError> {
        let rows: Vec<DealRow> = match division_id {
            Some(division_id) => {
                sqlx::query_as(
                    "SELECT id, division_id, client_name, value, commission, status, closed_at, created_at \
                     FROM deals WHERE division_id = $1 ORDER BY created_at DESC",
                )
                .bind(division_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT id, division_id, client_name, value, commission, status, closed_at, created_at \
                     FROM deals ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows.into_iter().map(DealRow::into_deal).collect())
    }

    async fn create_deal(&self, deal: Deal) -> Result<Deal, AppError> {
        sqlx::query(
            "INSERT INTO deals (id, division_id, client_name, value, commission, status, closed_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(deal.id)
        .bind(&deal.division_id)
        .bind(&deal.client_name)
        .bind(deal.value)
        .bind(deal.commission)
        .bind(deal.status.as_str())
        .bind(deal.closed_at)
        .bind(deal.created_at)
        .execute(&self.pool)
        .await?;
        Ok(deal)
    }

    async fn update_deal(&self, id: Uuid, patch: &UpdateDealRequest) -> Result<Deal, AppError> {
        let row: Option<DealRow> = sqlx::query_as(
            "UPDATE deals SET \
                 value = COALESCE($2, value), \
                 status = COALESCE($3, status), \
                 closed_at = CASE WHEN $3 = 'closed' THEN now() ELSE closed_at END \
             WHERE id = $1 \
             RETURNING id, division_id, client_name, value, commission, status, closed_at, created_at",
        )
        .bind(id)
        .bind(patch.value)
        .bind(patch.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?;
        row.map(DealRow::into_deal)
            .ok_or_else(|| AppError::NotFound(format!("Deal {} not found", id)))
    }

    async fn revenue_by_division(&self) -> Result<Vec<DivisionRevenue>, AppError> {
        let rows: Vec<RevenueRow> = sqlx::query_as(
            "SELECT division_id, \
                    SUM(value) AS total_value, \
                    SUM(commission) AS total_commission, \
                    COUNT(*) AS deal_count, \
                    AVG(value) AS avg_deal_value \
             FROM deals WHERE status <> 'cancelled' \
             GROUP BY division_id ORDER BY division_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| DivisionRevenue {
                division_id: r.division_id,
                total_value: dec(r.total_value),
                total_commission: dec(r.total_commission),
                deal_count: r.deal_count,
                avg_deal_value: dec(r.avg_deal_value),
            })
            .collect())
    }

    async fn revenue_trends(&self) -> Result<Vec<RevenueTrendPoint>, AppError> {
        let rows: Vec<TrendRow> = sqlx::query_as(
            "SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS month, \
                    SUM(value) AS total_value, \
                    SUM(commission) AS total_commission, \
                    COUNT(*) AS deal_count \
             FROM deals WHERE status <> 'cancelled' \
             GROUP BY 1 ORDER BY 1",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| RevenueTrendPoint {
                month: r.month,
                total_value: dec(r.total_value),
                total_commission: dec(r.total_commission),
                deal_count: r.deal_count,
            })
            .collect())
    }
}

// --- In-memory implementation (mock mode) ---

pub struct MemoryDealStore {
    deals: RwLock<Vec<Deal>>,
}

impl MemoryDealStore {
    pub fn new(deals: Vec<Deal>) -> Self {
        Self {
            deals: RwLock::new(deals),
        }
    }

    /// Seed three fixture deals per division with arithmetically derived
    /// values, so mock-mode aggregates are stable across runs.
    pub fn seeded(divisions: &[(&str, f64)]) -> Self {
        let now = Utc::now();
        let statuses = [DealStatus::Closed, DealStatus::Active, DealStatus::Pending];
        let mut deals = Vec::new();
        for (i, (division_id, rate)) in divisions.iter().enumerate() {
            for j in 0..3usize {
                let value = 80_000.0 * (i + 1) as f64 + 35_000.0 * j as f64;
                let status = statuses[j % statuses.len()];
                let created_at = now - Duration::days(25 * j as i64 + i as i64);
                deals.push(Deal {
                    id: Uuid::new_v4(),
                    division_id: division_id.to_string(),
                    client_name: format!("{} Fixture Client {}", division_id, j + 1),
                    value,
                    commission: value * rate,
                    status,
                    closed_at: (status == DealStatus::Closed).then_some(created_at),
                    created_at,
                });
            }
        }
        Self::new(deals)
    }
}

#[async_trait]
impl DealStore for MemoryDealStore {
    async fn list_deals(&self, division_id: Option<&str>) -> Result<Vec<Deal>, AppError> {
        let deals = self.deals.read().await;
        let mut result: Vec<Deal> = deals
            .iter()
            .filter(|d| division_id.map_or(true, |id| d.division_id == id))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn create_deal(&self, deal: Deal) -> Result<Deal, AppError> {
        self.deals.write().await.push(deal.clone());
        Ok(deal)
    }

    async fn update_deal(&self, id: Uuid, patch: &UpdateDealRequest) -> Result<Deal, AppError> {
        let mut deals = self.deals.write().await;
        let deal = deals
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Deal {} not found", id)))?;
        if let Some(value) = patch.value {
            deal.value = value;
        }
        if let Some(status) = patch.status {
            deal.status = status;
            if status == DealStatus::Closed && deal.closed_at.is_none() {
                deal.closed_at = Some(Utc::now());
            }
        }
        Ok(deal.clone())
    }

    async fn revenue_by_division(&self) -> Result<Vec<DivisionRevenue>, AppError> {
        let deals = self.deals.read().await;
        let mut grouped: BTreeMap<String, (f64, f64, i64)> = BTreeMap::new();
        for deal in deals.iter().filter(|d| d.status != DealStatus::Cancelled) {
            let entry = grouped.entry(deal.division_id.clone()).or_default();
            entry.0 += deal.value;
            entry.1 += deal.commission;
            entry.2 += 1;
        }
        Ok(grouped
            .into_iter()
            .map(|(division_id, (total_value, total_commission, deal_count))| DivisionRevenue {
                division_id,
                total_value,
                total_commission,
                deal_count,
                avg_deal_value: total_value / deal_count as f64,
            })
            .collect())
    }

    async fn revenue_trends(&self) -> Result<Vec<RevenueTrendPoint>, AppError> {
        let deals = self.deals.read().await;
        let mut grouped: BTreeMap<String, (f64, f64, i64)> = BTreeMap::new();
        for deal in deals.iter().filter(|d| d.status != DealStatus::Cancelled) {
            let month = format!("{:04}-{:02}", deal.created_at.year(), deal.created_at.month());
            let entry = grouped.entry(month).or_default();
            entry.0 += deal.value;
            entry.1 += deal.commission;
            entry.2 += 1;
        }
        Ok(grouped
            .into_iter()
            .map(|(month, (total_value, total_commission, deal_count))| RevenueTrendPoint {
                month,
                total_value,
                total_commission,
                deal_count,
            })
            .collect())
    }
}
