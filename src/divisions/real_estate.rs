//! Commercial real estate division. `codes` holds property types,
//! `budget` is the buyer's acquisition budget, `credit_score` proxies
//! financing strength. Mock data stands in for CoStar/LoopNet listings.

use crate::models::{Lead, Opportunity};
use crate::scoring::{
    DivisionSpec, EstimateKind, FactorRule, FactorSpec, RecommendationSpec,
};
use chrono::{Duration, Utc};

const FACTORS: &[FactorSpec] = &[
    FactorSpec {
        name: "Budget Fit",
        max_points: 30,
        rule: FactorRule::BudgetFit {
            inside: 30,
            near: 20,
            outside: 8,
            unknown: 15,
        },
    },
    FactorSpec {
        name: "Location",
        max_points: 25,
        rule: FactorRule::Geography {
            exact: 25,
            state: 18,
            region: 12,
            other: 6,
            unknown: 12,
        },
    },
    FactorSpec {
        name: "Property Type",
        max_points: 20,
        rule: FactorRule::CodeOverlap {
            exact: 20,
            prefix: 10,
            miss: 4,
            unknown: 8,
        },
    },
    FactorSpec {
        name: "Financing Strength",
        max_points: 15,
        rule: FactorRule::CreditBands {
            bands: &[(720, 15), (660, 11), (600, 6), (0, 2)],
            unknown: 7,
        },
    },
    FactorSpec {
        name: "Timeline",
        max_points: 10,
        rule: FactorRule::DeadlineBuckets {
            week: 10,
            month: 8,
            quarter: 6,
            later: 4,
            passed: 0,
            unknown: 5,
        },
    },
];

pub static SPEC: DivisionSpec = DivisionSpec {
    id: "real_estate",
    name: "Commercial Real Estate",
    commission_rate: 0.03,
    data_sources: &["CoStar", "LoopNet", "Crexi"],
    factors: FACTORS,
    recommendation: RecommendationSpec {
        high_cutoff: 75,
        mid_cutoff: 55,
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
            name: "Harborview Capital Partners".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(3),
            industry: Some("Real Estate".to_string()),
            location: Some("Seattle, WA".to_string()),
            budget: Some(12_000_000.0),
            credit_score: Some(760),
            codes: vec!["office".to_string(), "mixed-use".to_string()],
            ..Default::default()
        },
        Lead {
            name: "Lone Star Industrial Trust".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(11),
            industry: Some("Logistics".to_string()),
            location: Some("Dallas, TX".to_string()),
            budget: Some(30_000_000.0),
            credit_score: Some(710),
            codes: vec!["industrial".to_string(), "warehouse".to_string()],
            ..Default::default()
        },
        Lead {
            name: "Crescent Retail Group".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(6),
            industry: Some("Retail".to_string()),
            location: Some("Atlanta, GA".to_string()),
            budget: Some(8_500_000.0),
            credit_score: Some(645),
            codes: vec!["retail".to_string()],
            ..Default::default()
        },
        Lead {
            name: "Summit Medical Properties".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(18),
            industry: Some("Healthcare".to_string()),
            location: Some("Denver, CO".to_string()),
            budget: Some(22_000_000.0),
            credit_score: Some(735),
            codes: vec!["medical office".to_string(), "office".to_string()],
            ..Default::default()
        },
        Lead {
            name: "Bayfront Hospitality LLC".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(30),
            industry: Some("Hospitality".to_string()),
            location: Some("Tampa, FL".to_string()),
            budget: Some(17_000_000.0),
            codes: vec!["hotel".to_string()],
            ..Default::default()
        },
    ]
}

pub fn opportunities() -> Vec<Opportunity> {
    let now = Utc::now();
    vec![
        Opportunity {
            title: "Class A Office Tower - Downtown Seattle".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Real Estate".to_string()),
            location: Some("Seattle, WA".to_string()),
            value: Some(11_400_000.0),
            codes: vec!["office".to_string()],
            deadline: Some(now + Duration::days(20)),
            ..Default::default()
        },
        Opportunity {
            title: "Distribution Center Portfolio - DFW".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Logistics".to_string()),
            location: Some("Fort Worth, TX".to_string()),
            value: Some(28_000_000.0),
            codes: vec!["industrial".to_string(), "warehouse".to_string()],
            deadline: Some(now + Duration::days(45)),
            ..Default::default()
        },
        Opportunity {
            title: "Neighborhood Retail Strip - Buckhead".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Retail".to_string()),
            location: Some("Atlanta, GA".to_string()),
            value: Some(9_900_000.0),
            codes: vec!["retail".to_string()],
            deadline: Some(now + Duration::days(65)),
            ..Default::default()
        },
        Opportunity {
            title: "Ambulatory Surgery Center - Aurora".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Healthcare".to_string()),
            location: Some("Aurora, CO".to_string()),
            value: Some(19_500_000.0),
            codes: vec!["medical office".to_string()],
            deadline: Some(now + Duration::days(8)),
            ..Default::default()
        },
        Opportunity {
            title: "Boutique Hotel Conversion - Gulf Coast".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Hospitality".to_string()),
            location: Some("St. Petersburg, FL".to_string()),
            value: Some(21_000_000.0),
            codes: vec!["hotel".to_string()],
            deadline: Some(now + Duration::days(100)),
            ..Default::default()
        },
    ]
}
