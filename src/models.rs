use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Standard response envelope returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Lifecycle status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Matched,
}

/// A prospective client or counterparty record.
///
/// Field usage varies per division; the division modules document which
/// fields carry meaning for their domain (e.g. `codes` holds NAICS codes
/// for govcon, skills for recruiting, product categories for supply chain).
/// Unused fields stay `None`/empty and scoring rules treat them as missing
/// data rather than failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub division_id: String,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Budget the lead can commit (purchase budget, premium budget, rent, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<u16>,
    /// Domain codes: NAICS, skills, grant focus areas, product categories.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub codes: Vec<String>,
    /// Clearances, licenses, or quality certifications held.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<String>,
    /// Qualitative history tier (past performance, claims history, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_record: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_in_business: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headcount: Option<u32>,
}

impl Default for Lead {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            division_id: String::new(),
            status: LeadStatus::New,
            created_at: Utc::now(),
            industry: None,
            location: None,
            budget: None,
            annual_revenue: None,
            credit_score: None,
            codes: Vec::new(),
            certifications: Vec::new(),
            track_record: None,
            years_in_business: None,
            headcount: None,
        }
    }
}

/// An offer, listing, contract, or provider record on the other side of
/// the match. Fields mirror the qualifying dimensions of [`Lead`] so the
/// scoring rules can compare like for like.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub division_id: String,
    #[serde(default = "Utc::now")]
    pub posted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Contract value, listing price, loan amount, grant award, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub codes: Vec<String>,
    /// Certification the counterparty must hold (clearance level, license).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_certification: Option<String>,
    /// Acceptable size range for the counterparty (revenue, sqft, kWh, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_credit_score: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
}

impl Default for Opportunity {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            division_id: String::new(),
            posted_at: Utc::now(),
            industry: None,
            location: None,
            value: None,
            codes: Vec::new(),
            required_certification: None,
            min_size: None,
            max_size: None,
            min_credit_score: None,
            deadline: None,
            term_months: None,
        }
    }
}

/// Human-readable tier attached to a single factor contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorStatus {
    Excellent,
    Good,
    Fair,
    Poor,
    #[serde(rename = "n/a")]
    NotApplicable,
}

/// One factor's contribution to a division match score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorContribution {
    pub factor: String,
    pub points: u16,
    pub status: FactorStatus,
}

/// Category rating derived from the total score. The cutoffs are shared
/// across every division: >=80 Excellent, >=60 Good, >=40 Fair, else Poor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Rating {
    pub fn from_score(score: u16) -> Self {
        match score {
            80.. => Rating::Excellent,
            60..=79 => Rating::Good,
            40..=59 => Rating::Fair,
            _ => Rating::Poor,
        }
    }
}

/// Division-specific financial estimate attached to a match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchEstimate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_savings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_months: Option<u32>,
}

/// Output of scoring a (lead, opportunity) pair inside a division.
///
/// Invariant: `score` equals the sum of `factors[].points` and never
/// exceeds `max_score` (always 100).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u16,
    pub max_score: u16,
    pub rating: Rating,
    pub factors: Vec<FactorContribution>,
    pub recommendation: String,
    pub estimate: MatchEstimate,
}

/// Search filters accepted by find-leads / find-opportunities /
/// universal-search. All fields optional; an empty criteria set matches
/// everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub min_budget: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Status of a committed deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    #[default]
    Pending,
    Active,
    Closed,
    Cancelled,
}

impl DealStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStatus::Pending => "pending",
            DealStatus::Active => "active",
            DealStatus::Closed => "closed",
            DealStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DealStatus::Pending),
            "active" => Some(DealStatus::Active),
            "closed" => Some(DealStatus::Closed),
            "cancelled" => Some(DealStatus::Cancelled),
            _ => None,
        }
    }
}

/// A committed transaction and its derived commission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: Uuid,
    pub division_id: String,
    pub client_name: String,
    pub value: f64,
    pub commission: f64,
    pub status: DealStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Revenue aggregate for one division (SUM / AVG / COUNT over deals).
#[derive(Debug, Clone, Serialize)]
pub struct DivisionRevenue {
    pub division_id: String,
    pub total_value: f64,
    pub total_commission: f64,
    pub deal_count: i64,
    pub avg_deal_value: f64,
}

/// Monthly revenue bucket used by the trends endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueTrendPoint {
    /// `YYYY-MM` bucket key.
    pub month: String,
    pub total_value: f64,
    pub total_commission: f64,
    pub deal_count: i64,
}

/// Simple linear projection of next-quarter revenue per division.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueProjection {
    pub division_id: String,
    pub projected_quarterly_value: f64,
    pub projected_quarterly_commission: f64,
    /// Number of historical deals the projection was derived from.
    pub basis_deal_count: i64,
}

/// Per-division operational metrics returned by GET /api/divisions/metrics.
#[derive(Debug, Clone, Serialize)]
pub struct DivisionMetrics {
    pub division_id: String,
    pub name: String,
    pub enabled: bool,
    pub commission_rate: f64,
    pub lead_count: usize,
    pub opportunity_count: usize,
    pub pipeline_value: f64,
    pub total_revenue: f64,
    pub total_commission: f64,
}

/// Description of a division as exposed over HTTP.
#[derive(Debug, Clone, Serialize)]
pub struct DivisionSummary {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub commission_rate: f64,
    pub data_sources: Vec<String>,
}

/// Concatenated fan-out results from universal search.
///
/// Divisions that failed are omitted from `leads`/`opportunities` and
/// reported individually in `errors` keyed by division id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UniversalSearchResult {
    pub leads: Vec<Lead>,
    pub opportunities: Vec<Opportunity>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

// --- Request bodies ---

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub criteria: SearchCriteria,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub lead: Option<Lead>,
    pub opportunity: Option<Opportunity>,
}

#[derive(Debug, Deserialize)]
pub struct GenericMatchRequest {
    pub lead: Option<Lead>,
    pub opportunity: Option<Opportunity>,
    /// Optional weight overrides; not validated to sum to 1.0, that is the
    /// caller's responsibility.
    #[serde(default)]
    pub weights: Option<crate::matcher::MatchWeights>,
}

#[derive(Debug, Deserialize)]
pub struct BatchMatchRequest {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub weights: Option<crate::matcher::MatchWeights>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDealRequest {
    pub division_id: String,
    pub client_name: String,
    pub value: f64,
    #[serde(default)]
    pub status: Option<DealStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDealRequest {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub status: Option<DealStatus>,
}
