//! Retail energy brokerage. Leads are commercial energy buyers,
//! opportunities are supplier contract offers. `value` is annual contract
//! value, `deadline` the renewal window close. Estimates quote annual
//! savings against the incumbent tariff.

use crate::models::{Lead, Opportunity};
use crate::scoring::{
    DivisionSpec, EstimateKind, FactorRule, FactorSpec, RecommendationSpec,
};
use chrono::{Duration, Utc};

const FACTORS: &[FactorSpec] = &[
    FactorSpec {
        name: "Contract Volume",
        max_points: 30,
        rule: FactorRule::ValueBands {
            bands: &[
                (100_000.0, 2_000_000.0, 30),
                (25_000.0, 100_000.0, 22),
                (2_000_000.0, 10_000_000.0, 16),
                (0.0, 25_000.0, 8),
            ],
            unknown: 12,
        },
    },
    FactorSpec {
        name: "Renewal Window",
        max_points: 25,
        rule: FactorRule::DeadlineBuckets {
            week: 25,
            month: 20,
            quarter: 14,
            later: 8,
            passed: 0,
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Utility Territory",
        max_points: 20,
        rule: FactorRule::Geography {
            exact: 20,
            state: 16,
            region: 10,
            other: 4,
            unknown: 8,
        },
    },
    FactorSpec {
        name: "Credit",
        max_points: 15,
        rule: FactorRule::CreditBands {
            bands: &[(700, 15), (640, 11), (580, 6), (0, 2)],
            unknown: 7,
        },
    },
    FactorSpec {
        name: "Load Profile",
        max_points: 10,
        rule: FactorRule::IndustryMatch {
            exact: 10,
            related: 7,
            other: 3,
            unknown: 5,
        },
    },
];

pub static SPEC: DivisionSpec = DivisionSpec {
    id: "energy",
    name: "Energy Brokerage",
    commission_rate: 0.07,
    data_sources: &["EIA", "Utility tariff sheets"],
    factors: FACTORS,
    recommendation: RecommendationSpec {
        high_cutoff: 70,
        mid_cutoff: 50,
        high: "Highly Recommended",
        mid: "Recommended",
        low: "Not Recommended",
    },
    estimate: EstimateKind::AnnualSavings { savings_rate: 0.18 },
};

pub fn leads() -> Vec<Lead> {
    let now = Utc::now();
    vec![
        Lead {
            name: "Lakeshore Cold Storage".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(3),
            industry: Some("Logistics".to_string()),
            location: Some("Erie, PA".to_string()),
            credit_score: Some(720),
            ..Default::default()
        },
        Lead {
            name: "Vulcan Foundry Works".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(12),
            industry: Some("Manufacturing".to_string()),
            location: Some("Birmingham, AL".to_string()),
            credit_score: Some(665),
            ..Default::default()
        },
        Lead {
            name: "Granite Peaks Resort".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(7),
            industry: Some("Hospitality".to_string()),
            location: Some("Park City, UT".to_string()),
            credit_score: Some(705),
            ..Default::default()
        },
        Lead {
            name: "Evergreen Data Centers".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(1),
            industry: Some("Information Technology".to_string()),
            location: Some("Hillsboro, OR".to_string()),
            credit_score: Some(755),
            ..Default::default()
        },
    ]
}

pub fn opportunities() -> Vec<Opportunity> {
    let now = Utc::now();
    vec![
        Opportunity {
            title: "PJM Fixed-Rate Supply - 36 Month".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Logistics".to_string()),
            location: Some("Pittsburgh, PA".to_string()),
            value: Some(640_000.0),
            term_months: Some(36),
            deadline: Some(now + Duration::days(22)),
            ..Default::default()
        },
        Opportunity {
            title: "Industrial Interruptible Tariff Buyout".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Manufacturing".to_string()),
            location: Some("Birmingham, AL".to_string()),
            value: Some(1_900_000.0),
            term_months: Some(24),
            deadline: Some(now + Duration::days(6)),
            ..Default::default()
        },
        Opportunity {
            title: "Mountain West Green Power Block".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Hospitality".to_string()),
            location: Some("Salt Lake City, UT".to_string()),
            value: Some(410_000.0),
            term_months: Some(12),
            deadline: Some(now + Duration::days(48)),
            ..Default::default()
        },
        Opportunity {
            title: "Hyperscale Load Supply Agreement".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Information Technology".to_string()),
            location: Some("Portland, OR".to_string()),
            value: Some(7_400_000.0),
            term_months: Some(60),
            deadline: Some(now + Duration::days(95)),
            ..Default::default()
        },
    ]
}
