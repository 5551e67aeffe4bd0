//! Franchise brokerage. `budget` is the candidate's liquid capital,
//! `track_record` their operating background, `value` the total initial
//! investment quoted by the franchisor.

use crate::models::{Lead, Opportunity};
use crate::scoring::{
    DivisionSpec, EstimateKind, FactorRule, FactorSpec, RecommendationSpec,
};
use chrono::{Duration, Utc};

const FACTORS: &[FactorSpec] = &[
    FactorSpec {
        name: "Capital Fit",
        max_points: 30,
        rule: FactorRule::BudgetFit {
            inside: 30,
            near: 18,
            outside: 5,
            unknown: 12,
        },
    },
    FactorSpec {
        name: "Operating Experience",
        max_points: 25,
        rule: FactorRule::TrackRecordTable {
            table: &[
                ("multi-unit operator", 25),
                ("operator", 20),
                ("industry experience", 15),
                ("first-time", 8),
            ],
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Industry Fit",
        max_points: 20,
        rule: FactorRule::IndustryMatch {
            exact: 20,
            related: 13,
            other: 5,
            unknown: 8,
        },
    },
    FactorSpec {
        name: "Territory",
        max_points: 15,
        rule: FactorRule::Geography {
            exact: 15,
            state: 11,
            region: 7,
            other: 3,
            unknown: 7,
        },
    },
    FactorSpec {
        name: "Credit Reserve",
        max_points: 10,
        rule: FactorRule::CreditBands {
            bands: &[(700, 10), (640, 7), (580, 4), (0, 1)],
            unknown: 5,
        },
    },
];

pub static SPEC: DivisionSpec = DivisionSpec {
    id: "franchise",
    name: "Franchise Sales",
    commission_rate: 0.06,
    data_sources: &["Franchise Disclosure Documents", "IFA Directory"],
    factors: FACTORS,
    recommendation: RecommendationSpec {
        high_cutoff: 75,
        mid_cutoff: 55,
        high: "Highly Recommended",
        mid: "Recommended",
        low: "Not Recommended",
    },
    // Monthly return assumption of 1.5% of the initial investment.
    estimate: EstimateKind::PaybackPeriod {
        monthly_return_rate: 0.015,
    },
};

pub fn leads() -> Vec<Lead> {
    let now = Utc::now();
    vec![
        Lead {
            name: "Dana Whitfield".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(1),
            industry: Some("Food Service".to_string()),
            location: Some("Charlotte, NC".to_string()),
            budget: Some(450_000.0),
            credit_score: Some(725),
            track_record: Some("Operator".to_string()),
            ..Default::default()
        },
        Lead {
            name: "Marcus Oyelaran".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(12),
            industry: Some("Fitness".to_string()),
            location: Some("Phoenix, AZ".to_string()),
            budget: Some(300_000.0),
            credit_score: Some(690),
            track_record: Some("First-Time".to_string()),
            ..Default::default()
        },
        Lead {
            name: "Priya Raghunathan".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(7),
            industry: Some("Education".to_string()),
            location: Some("Naperville, IL".to_string()),
            budget: Some(600_000.0),
            credit_score: Some(770),
            track_record: Some("Multi-Unit Operator".to_string()),
            ..Default::default()
        },
        Lead {
            name: "Tom and Ellie Kovacs".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(25),
            industry: Some("Home Services".to_string()),
            location: Some("Boise, ID".to_string()),
            budget: Some(180_000.0),
            credit_score: Some(655),
            track_record: Some("Industry Experience".to_string()),
            ..Default::default()
        },
    ]
}

pub fn opportunities() -> Vec<Opportunity> {
    vec![
        Opportunity {
            title: "Fast-Casual Mediterranean - Southeast Expansion".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Food Service".to_string()),
            location: Some("Raleigh, NC".to_string()),
            value: Some(420_000.0),
            ..Default::default()
        },
        Opportunity {
            title: "Boutique Strength Studio - Desert Markets".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Fitness".to_string()),
            location: Some("Scottsdale, AZ".to_string()),
            value: Some(350_000.0),
            ..Default::default()
        },
        Opportunity {
            title: "STEM Tutoring Centers - Chicagoland".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Education".to_string()),
            location: Some("Naperville, IL".to_string()),
            value: Some(280_000.0),
            ..Default::default()
        },
        Opportunity {
            title: "Residential HVAC Services - Mountain West".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Home Services".to_string()),
            location: Some("Meridian, ID".to_string()),
            value: Some(210_000.0),
            ..Default::default()
        },
    ]
}
