//! Recruiting/placement. Leads are hiring clients; opportunities are
//! candidate profiles. `codes` holds required vs offered skills, `budget`
//! the salary budget against the candidate's expected compensation
//! (`value`). Commission models a 20% placement fee.

use crate::models::{Lead, Opportunity};
use crate::scoring::{
    DivisionSpec, EstimateKind, FactorRule, FactorSpec, RecommendationSpec,
};
use chrono::{Duration, Utc};

const FACTORS: &[FactorSpec] = &[
    FactorSpec {
        name: "Skills Match",
        max_points: 30,
        rule: FactorRule::CodeOverlap {
            exact: 30,
            prefix: 20,
            miss: 6,
            unknown: 12,
        },
    },
    FactorSpec {
        name: "Experience Level",
        max_points: 25,
        rule: FactorRule::TrackRecordTable {
            table: &[
                ("principal", 25),
                ("senior", 22),
                ("mid", 16),
                ("junior", 10),
            ],
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Compensation Fit",
        max_points: 20,
        rule: FactorRule::BudgetFit {
            inside: 20,
            near: 12,
            outside: 4,
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Location",
        max_points: 15,
        // Remote-friendly market; unknown location is barely penalized.
        rule: FactorRule::Geography {
            exact: 15,
            state: 12,
            region: 9,
            other: 6,
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Availability",
        max_points: 10,
        rule: FactorRule::DeadlineBuckets {
            week: 10,
            month: 8,
            quarter: 5,
            later: 3,
            passed: 0,
            unknown: 5,
        },
    },
];

pub static SPEC: DivisionSpec = DivisionSpec {
    id: "recruiting",
    name: "Executive Recruiting",
    commission_rate: 0.20,
    data_sources: &["LinkedIn Talent", "Indeed"],
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
            name: "Northwind Robotics - VP Engineering".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(3),
            industry: Some("Software".to_string()),
            location: Some("Boston, MA".to_string()),
            budget: Some(260_000.0),
            codes: vec!["rust".to_string(), "distributed systems".to_string()],
            track_record: Some("Senior".to_string()),
            ..Default::default()
        },
        Lead {
            name: "Helix Biotech - Head of Quality".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(8),
            industry: Some("Pharmaceuticals".to_string()),
            location: Some("San Diego, CA".to_string()),
            budget: Some(210_000.0),
            codes: vec!["gmp".to_string(), "quality systems".to_string()],
            track_record: Some("Principal".to_string()),
            ..Default::default()
        },
        Lead {
            name: "Archway Capital - Controller".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(15),
            industry: Some("Finance".to_string()),
            location: Some("Chicago, IL".to_string()),
            budget: Some(175_000.0),
            codes: vec!["cpa".to_string(), "fund accounting".to_string()],
            track_record: Some("Mid".to_string()),
            ..Default::default()
        },
        Lead {
            name: "Terra Grid - Power Systems Lead".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(1),
            industry: Some("Energy".to_string()),
            location: Some("Austin, TX".to_string()),
            budget: Some(195_000.0),
            codes: vec!["scada".to_string(), "power systems".to_string()],
            track_record: Some("Senior".to_string()),
            ..Default::default()
        },
    ]
}

pub fn opportunities() -> Vec<Opportunity> {
    let now = Utc::now();
    vec![
        Opportunity {
            title: "Staff Engineer, Distributed Storage".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Software".to_string()),
            location: Some("Cambridge, MA".to_string()),
            value: Some(245_000.0),
            codes: vec!["rust".to_string(), "distributed systems".to_string()],
            deadline: Some(now + Duration::days(14)),
            ..Default::default()
        },
        Opportunity {
            title: "Director of Quality Assurance, Biologics".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Pharmaceuticals".to_string()),
            location: Some("San Diego, CA".to_string()),
            value: Some(230_000.0),
            codes: vec!["gmp".to_string()],
            deadline: Some(now + Duration::days(30)),
            ..Default::default()
        },
        Opportunity {
            title: "Senior Fund Accountant".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Finance".to_string()),
            location: Some("Chicago, IL".to_string()),
            value: Some(150_000.0),
            codes: vec!["fund accounting".to_string(), "cpa".to_string()],
            deadline: Some(now + Duration::days(6)),
            ..Default::default()
        },
        Opportunity {
            title: "Grid Controls Engineer".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Energy".to_string()),
            location: Some("Houston, TX".to_string()),
            value: Some(185_000.0),
            codes: vec!["scada".to_string()],
            deadline: Some(now + Duration::days(45)),
            ..Default::default()
        },
    ]
}
