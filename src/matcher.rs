//! Generic five-factor opportunity matcher.
//!
//! Unlike the per-division point tables in [`crate::scoring`], this matcher
//! scores each factor into [0, 1] and combines them with fractional weights,
//! which makes it usable across divisions when no domain table applies.

use crate::models::{Lead, Opportunity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Fractional weights applied to the five factor scores. Defaults sum to
/// 1.0; caller-supplied overrides are applied as-is without validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchWeights {
    pub industry: f64,
    pub location: f64,
    pub size: f64,
    pub timing: f64,
    pub budget: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            industry: 0.30,
            location: 0.25,
            size: 0.20,
            timing: 0.15,
            budget: 0.10,
        }
    }
}

/// Per-factor scores in [0, 1], before weighting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorScores {
    pub industry: f64,
    pub location: f64,
    pub size: f64,
    pub timing: f64,
    pub budget: f64,
}

impl FactorScores {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.industry,
            self.location,
            self.size,
            self.timing,
            self.budget,
        ]
    }
}

/// How much the five factors agree with each other. Derived from the
/// population variance of the factor scores: a uniformly mediocre match is
/// more trustworthy than one excellent factor drowning out four misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchMetadata {
    pub lead_id: Uuid,
    pub opportunity_id: Uuid,
    pub factor_scores: FactorScores,
    pub weights: MatchWeights,
    pub scored_at: DateTime<Utc>,
}

/// Result of the generic weighted match.
#[derive(Debug, Clone, Serialize)]
pub struct GenericMatch {
    /// `round(100 * sum(factor_i * weight_i))`.
    pub score: u16,
    pub recommendation: String,
    pub reasoning: Vec<String>,
    pub confidence: Confidence,
    pub metadata: MatchMetadata,
}

/// US regions used for partial location credit. A lead in Virginia gets
/// some credit against a Maryland opportunity even though the states differ.
const REGIONS: &[(&str, &[&str])] = &[
    ("northeast", &["CT", "MA", "ME", "NH", "NJ", "NY", "PA", "RI", "VT"]),
    (
        "southeast",
        &["AL", "AR", "DC", "FL", "GA", "KY", "LA", "MD", "MS", "NC", "SC", "TN", "VA", "WV"],
    ),
    (
        "midwest",
        &["IA", "IL", "IN", "KS", "MI", "MN", "MO", "ND", "NE", "OH", "SD", "WI"],
    ),
    ("southwest", &["AZ", "NM", "OK", "TX"]),
    (
        "west",
        &["AK", "CA", "CO", "HI", "ID", "MT", "NV", "OR", "UT", "WA", "WY"],
    ),
];

/// Curated pairs of related industries, matched case-insensitively in
/// either direction.
const RELATED_INDUSTRIES: &[(&str, &str)] = &[
    ("software", "information technology"),
    ("software", "cybersecurity"),
    ("information technology", "telecommunications"),
    ("construction", "real estate"),
    ("construction", "engineering"),
    ("healthcare", "medical devices"),
    ("healthcare", "pharmaceuticals"),
    ("logistics", "transportation"),
    ("logistics", "manufacturing"),
    ("finance", "insurance"),
    ("finance", "banking"),
    ("energy", "utilities"),
    ("energy", "oil and gas"),
    ("defense", "aerospace"),
];

pub struct OpportunityMatcher {
    weights: MatchWeights,
}

impl Default for OpportunityMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl OpportunityMatcher {
    pub fn new() -> Self {
        Self {
            weights: MatchWeights::default(),
        }
    }

    /// Score a single (lead, opportunity) pair. `weights` overrides the
    /// default weight set for this call only.
    pub fn score_match(
        &self,
        lead: &Lead,
        opportunity: &Opportunity,
        weights: Option<MatchWeights>,
    ) -> GenericMatch {
        self.score_match_at(lead, opportunity, weights, Utc::now())
    }

    /// Deterministic variant taking an explicit clock, used by the timing
    /// factor and by tests.
    pub fn score_match_at(
        &self,
        lead: &Lead,
        opportunity: &Opportunity,
        weights: Option<MatchWeights>,
        now: DateTime<Utc>,
    ) -> GenericMatch {
        let w = weights.unwrap_or(self.weights);
        let scores = FactorScores {
            industry: score_industry(lead, opportunity),
            location: score_location(lead, opportunity),
            size: score_size(lead, opportunity),
            timing: score_timing(lead, opportunity, now),
            budget: score_budget(lead, opportunity),
        };

        let weighted = scores.industry * w.industry
            + scores.location * w.location
            + scores.size * w.size
            + scores.timing * w.timing
            + scores.budget * w.budget;
        let score = (weighted * 100.0).round().max(0.0) as u16;

        let reasoning = vec![
            format!("industry alignment {:.2}", scores.industry),
            format!("location proximity {:.2}", scores.location),
            format!("size fit {:.2}", scores.size),
            format!("timing {:.2}", scores.timing),
            format!("budget fit {:.2}", scores.budget),
        ];

        GenericMatch {
            score,
            recommendation: recommendation_for(score).to_string(),
            reasoning,
            confidence: calculate_confidence(&scores.as_array()),
            metadata: MatchMetadata {
                lead_id: lead.id,
                opportunity_id: opportunity.id,
                factor_scores: scores,
                weights: w,
                scored_at: now,
            },
        }
    }

    /// Cross-product scoring of every lead against every opportunity,
    /// sorted descending by score. Ties keep input order (stable sort).
    /// Quadratic by construction; intended for small candidate sets only.
    pub fn batch_score(
        &self,
        leads: &[Lead],
        opportunities: &[Opportunity],
        weights: Option<MatchWeights>,
    ) -> Vec<GenericMatch> {
        let now = Utc::now();
        let mut results: Vec<GenericMatch> = Vec::with_capacity(leads.len() * opportunities.len());
        for lead in leads {
            for opportunity in opportunities {
                results.push(self.score_match_at(lead, opportunity, weights, now));
            }
        }
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results
    }

    /// Persist a scored match when a database is configured. Without one
    /// this logs and returns `None` instead of erroring, so mock mode stays
    /// side-effect free.
    pub async fn store_match(
        &self,
        pool: Option<&PgPool>,
        result: &GenericMatch,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let Some(pool) = pool else {
            tracing::debug!(
                lead_id = %result.metadata.lead_id,
                opportunity_id = %result.metadata.opportunity_id,
                score = result.score,
                "no database configured, skipping match persistence"
            );
            return Ok(None);
        };

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO matches (id, lead_id, opportunity_id, score, confidence, scored_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(result.metadata.lead_id)
        .bind(result.metadata.opportunity_id)
        .bind(result.score as i32)
        .bind(format!("{:?}", result.confidence))
        .bind(result.metadata.scored_at)
        .execute(pool)
        .await?;

        Ok(Some(id))
    }
}

fn recommendation_for(score: u16) -> &'static str {
    match score {
        75.. => "Highly Recommended",
        55..=74 => "Recommended",
        35..=54 => "Review Manually",
        _ => "Not Recommended",
    }
}

/// Population variance of the factor scores mapped to a confidence tier.
/// Lower variance means the factors agree, which we trust more than a
/// single outlier driving the total.
pub fn calculate_confidence(scores: &[f64]) -> Confidence {
    if scores.is_empty() {
        return Confidence::Low;
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    if variance < 0.05 {
        Confidence::High
    } else if variance < 0.15 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Industry alignment. Exact match 1.0, substring containment 0.7, curated
/// related pair 0.6, otherwise 0.3. A total miss never zeroes the factor;
/// industry alone must not disqualify a pair.
pub fn score_industry(lead: &Lead, opportunity: &Opportunity) -> f64 {
    let (Some(lead_ind), Some(opp_ind)) = (&lead.industry, &opportunity.industry) else {
        return 0.5;
    };
    let a = lead_ind.trim().to_lowercase();
    let b = opp_ind.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return 0.5;
    }
    if a == b {
        return 1.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return 0.7;
    }
    let related = RELATED_INDUSTRIES
        .iter()
        .any(|(x, y)| (a == *x && b == *y) || (a == *y && b == *x));
    if related {
        0.6
    } else {
        0.3
    }
}

/// Location proximity. Exact 1.0, same state 0.7, same region 0.5, else
/// 0.3. Missing data on either side is neutral 0.5. State is taken as the
/// trimmed text after the last comma ("Fort Meade, MD" -> "MD").
pub fn score_location(lead: &Lead, opportunity: &Opportunity) -> f64 {
    let (Some(lead_loc), Some(opp_loc)) = (&lead.location, &opportunity.location) else {
        return 0.5;
    };
    let a = lead_loc.trim().to_lowercase();
    let b = opp_loc.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return 0.5;
    }
    if a == b {
        return 1.0;
    }
    let state_a = state_of(lead_loc);
    let state_b = state_of(opp_loc);
    match (state_a, state_b) {
        (Some(sa), Some(sb)) if sa == sb => 0.7,
        (Some(sa), Some(sb)) if region_of(&sa).is_some() && region_of(&sa) == region_of(&sb) => 0.5,
        _ => 0.3,
    }
}

/// Size fit against the opportunity's acceptable range. Inside the range
/// is a full 1.0; outside degrades by ratio but floors at 0.3.
pub fn score_size(lead: &Lead, opportunity: &Opportunity) -> f64 {
    let Some(size) = lead.annual_revenue else {
        return 0.5;
    };
    if size <= 0.0 {
        return 0.5;
    }
    let min = opportunity.min_size;
    let max = opportunity.max_size;
    if min.is_none() && max.is_none() {
        return 0.5;
    }
    if let Some(min) = min {
        if size < min {
            return (size / min).max(0.3);
        }
    }
    if let Some(max) = max {
        if size > max {
            return (max / size).max(0.3);
        }
    }
    1.0
}

/// Timing urgency. A live deadline buckets by days remaining; a missing
/// deadline falls back to lead freshness with the same buckets; with
/// neither signal the factor is neutral.
pub fn score_timing(lead: &Lead, opportunity: &Opportunity, now: DateTime<Utc>) -> f64 {
    if let Some(deadline) = opportunity.deadline {
        let days = (deadline - now).num_days();
        return if days < 0 {
            0.0
        } else if days <= 7 {
            1.0
        } else if days <= 30 {
            0.8
        } else if days <= 90 {
            0.6
        } else {
            0.4
        };
    }
    let age_days = (now - lead.created_at).num_days();
    if age_days < 0 {
        // Clock skew or a future-dated lead; treat as brand new.
        return 1.0;
    }
    if age_days <= 7 {
        1.0
    } else if age_days <= 30 {
        0.8
    } else if age_days <= 90 {
        0.6
    } else {
        0.5
    }
}

/// Budget fit: ratio of opportunity value to lead budget. The ideal band
/// is 1-10% of budget; wider ratios degrade through 0.7/0.4/0.2.
pub fn score_budget(lead: &Lead, opportunity: &Opportunity) -> f64 {
    let (Some(budget), Some(value)) = (lead.budget, opportunity.value) else {
        return 0.5;
    };
    if budget <= 0.0 || value <= 0.0 {
        return 0.5;
    }
    let ratio = value / budget;
    if (0.01..=0.10).contains(&ratio) {
        1.0
    } else if ratio < 0.01 || ratio <= 0.30 {
        0.7
    } else if ratio <= 0.60 {
        0.4
    } else {
        0.2
    }
}

/// True when the two industries appear in the curated related-pairs table.
pub(crate) fn industries_related(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    RELATED_INDUSTRIES
        .iter()
        .any(|(x, y)| (a == *x && b == *y) || (a == *y && b == *x))
}

/// Extract an upper-cased two-letter state code from "City, ST" text.
pub(crate) fn state_of(location: &str) -> Option<String> {
    let tail = location.rsplit(',').next()?.trim();
    if tail.is_empty() {
        return None;
    }
    Some(tail.to_uppercase())
}

pub(crate) fn region_of(state: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|(_, states)| states.contains(&state))
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead_with(industry: &str, location: &str) -> Lead {
        Lead {
            industry: Some(industry.to_string()),
            location: Some(location.to_string()),
            ..Default::default()
        }
    }

    fn opp_with(industry: &str, location: &str) -> Opportunity {
        Opportunity {
            industry: Some(industry.to_string()),
            location: Some(location.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn exact_industry_scores_full() {
        let lead = lead_with("Software", "Austin, TX");
        let opp = opp_with("software", "Austin, TX");
        assert_eq!(score_industry(&lead, &opp), 1.0);
    }

    #[test]
    fn related_industry_scores_point_six() {
        let lead = lead_with("finance", "Austin, TX");
        let opp = opp_with("insurance", "Austin, TX");
        assert_eq!(score_industry(&lead, &opp), 0.6);
    }

    #[test]
    fn unrelated_industry_keeps_floor() {
        let lead = lead_with("healthcare", "Austin, TX");
        let opp = opp_with("energy", "Austin, TX");
        assert_eq!(score_industry(&lead, &opp), 0.3);
    }

    #[test]
    fn missing_location_is_neutral() {
        let mut lead = lead_with("software", "Austin, TX");
        lead.location = None;
        let opp = opp_with("software", "Austin, TX");
        assert_eq!(score_location(&lead, &opp), 0.5);
    }

    #[test]
    fn same_state_scores_point_seven() {
        let lead = lead_with("software", "Dallas, TX");
        let opp = opp_with("software", "Austin, TX");
        assert_eq!(score_location(&lead, &opp), 0.7);
    }

    #[test]
    fn same_region_scores_point_five() {
        // TX and AZ are both southwest.
        let lead = lead_with("software", "Dallas, TX");
        let opp = opp_with("software", "Phoenix, AZ");
        assert_eq!(score_location(&lead, &opp), 0.5);
    }

    #[test]
    fn past_deadline_zeroes_timing() {
        let lead = Lead::default();
        let opp = Opportunity {
            deadline: Some(Utc::now() - chrono::Duration::days(3)),
            ..Default::default()
        };
        assert_eq!(score_timing(&lead, &opp, Utc::now()), 0.0);
    }

    #[test]
    fn size_inside_range_scores_full() {
        let lead = Lead {
            annual_revenue: Some(5_000_000.0),
            ..Default::default()
        };
        let opp = Opportunity {
            min_size: Some(1_000_000.0),
            max_size: Some(10_000_000.0),
            ..Default::default()
        };
        assert_eq!(score_size(&lead, &opp), 1.0);
    }

    #[test]
    fn size_outside_range_floors_at_point_three() {
        let lead = Lead {
            annual_revenue: Some(100_000.0),
            ..Default::default()
        };
        let opp = Opportunity {
            min_size: Some(10_000_000.0),
            ..Default::default()
        };
        assert_eq!(score_size(&lead, &opp), 0.3);
    }

    #[test]
    fn ideal_budget_band_scores_full() {
        let lead = Lead {
            budget: Some(1_000_000.0),
            ..Default::default()
        };
        let opp = Opportunity {
            value: Some(50_000.0),
            ..Default::default()
        };
        assert_eq!(score_budget(&lead, &opp), 1.0);
    }

    #[test]
    fn uniform_scores_give_high_confidence() {
        assert_eq!(calculate_confidence(&[0.6, 0.6, 0.6, 0.6, 0.6]), Confidence::High);
    }

    #[test]
    fn spread_scores_give_low_confidence() {
        assert_eq!(calculate_confidence(&[1.0, 0.0, 1.0, 0.0, 1.0]), Confidence::Low);
    }

    #[test]
    fn batch_score_returns_full_cross_product_sorted() {
        let matcher = OpportunityMatcher::new();
        let leads = vec![lead_with("software", "Austin, TX"), lead_with("energy", "Fargo, ND")];
        let opps = vec![opp_with("software", "Austin, TX"), opp_with("retail", "Miami, FL")];
        let results = matcher.batch_score(&leads, &opps, None);
        assert_eq!(results.len(), 4);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
