//! Grant brokerage division. `industry` is the applicant's sector,
//! `codes` holds program focus areas. Deadline scoring rewards lead time:
//! a grant closing within a week leaves no room to prepare an application.

use crate::models::{Lead, Opportunity};
use crate::scoring::{
    DivisionSpec, EstimateKind, FactorRule, FactorSpec, RecommendationSpec,
};
use chrono::{Duration, Utc};

const FACTORS: &[FactorSpec] = &[
    FactorSpec {
        name: "Eligibility",
        max_points: 30,
        rule: FactorRule::IndustryMatch {
            exact: 30,
            related: 20,
            other: 6,
            unknown: 12,
        },
    },
    FactorSpec {
        name: "Focus Area Overlap",
        max_points: 25,
        rule: FactorRule::CodeOverlap {
            exact: 25,
            prefix: 14,
            miss: 5,
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Award Size",
        max_points: 20,
        rule: FactorRule::ValueBands {
            bands: &[
                (50_000.0, 1_000_000.0, 20),
                (10_000.0, 50_000.0, 14),
                (1_000_000.0, 5_000_000.0, 12),
                (0.0, 10_000.0, 6),
            ],
            unknown: 8,
        },
    },
    FactorSpec {
        name: "Geography",
        max_points: 15,
        rule: FactorRule::Geography {
            exact: 15,
            state: 11,
            region: 8,
            other: 4,
            unknown: 7,
        },
    },
    FactorSpec {
        name: "Application Window",
        max_points: 10,
        rule: FactorRule::DeadlineBuckets {
            week: 3,
            month: 8,
            quarter: 10,
            later: 6,
            passed: 0,
            unknown: 5,
        },
    },
];

pub static SPEC: DivisionSpec = DivisionSpec {
    id: "grants",
    name: "Grant Programs",
    commission_rate: 0.08,
    data_sources: &["Grants.gov", "SAM.gov Assistance Listings"],
    factors: FACTORS,
    recommendation: RecommendationSpec {
        high_cutoff: 70,
        mid_cutoff: 50,
        high: "Highly Recommended",
        mid: "Recommended",
        low: "Not Recommended",
    },
    estimate: EstimateKind::Commission,
};

pub fn leads() -> Vec<Lead> {
    let now = Utc::now();
    vec![
        Lead {
            name: "Prairie STEM Alliance".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(5),
            industry: Some("Education".to_string()),
            location: Some("Lincoln, NE".to_string()),
            codes: vec!["stem education".to_string(), "workforce development".to_string()],
            ..Default::default()
        },
        Lead {
            name: "Riverbend Community Health".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(14),
            industry: Some("Healthcare".to_string()),
            location: Some("Memphis, TN".to_string()),
            codes: vec!["rural health".to_string(), "telehealth".to_string()],
            ..Default::default()
        },
        Lead {
            name: "Cleanwater Research Collective".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(2),
            industry: Some("Environmental".to_string()),
            location: Some("Portland, OR".to_string()),
            codes: vec!["water quality".to_string(), "climate resilience".to_string()],
            ..Default::default()
        },
        Lead {
            name: "Heritage Arts Foundation".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(27),
            industry: Some("Arts".to_string()),
            location: Some("Santa Fe, NM".to_string()),
            codes: vec!["cultural preservation".to_string()],
            ..Default::default()
        },
        Lead {
            name: "Bright Futures Housing Coalition".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(8),
            industry: Some("Housing".to_string()),
            location: Some("Cleveland, OH".to_string()),
            codes: vec!["affordable housing".to_string(), "homelessness".to_string()],
            ..Default::default()
        },
    ]
}

pub fn opportunities() -> Vec<Opportunity> {
    let now = Utc::now();
    vec![
        Opportunity {
            title: "NSF Advancing Informal STEM Learning".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Education".to_string()),
            location: Some("Washington, DC".to_string()),
            value: Some(750_000.0),
            codes: vec!["stem education".to_string()],
            deadline: Some(now + Duration::days(60)),
            ..Default::default()
        },
        Opportunity {
            title: "HRSA Rural Health Outreach Program".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Healthcare".to_string()),
            location: Some("Nashville, TN".to_string()),
            value: Some(300_000.0),
            codes: vec!["rural health".to_string()],
            deadline: Some(now + Duration::days(40)),
            ..Default::default()
        },
        Opportunity {
            title: "EPA Watershed Restoration Grants".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Environmental".to_string()),
            location: Some("Salem, OR".to_string()),
            value: Some(1_400_000.0),
            codes: vec!["water quality".to_string()],
            deadline: Some(now + Duration::days(85)),
            ..Default::default()
        },
        Opportunity {
            title: "NEA Our Town Placemaking".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Arts".to_string()),
            location: Some("Albuquerque, NM".to_string()),
            value: Some(90_000.0),
            codes: vec!["cultural preservation".to_string()],
            deadline: Some(now + Duration::days(15)),
            ..Default::default()
        },
        Opportunity {
            title: "HUD Continuum of Care Expansion".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Housing".to_string()),
            location: Some("Columbus, OH".to_string()),
            value: Some(2_200_000.0),
            codes: vec!["homelessness".to_string()],
            deadline: Some(now + Duration::days(5)),
            ..Default::default()
        },
    ]
}
