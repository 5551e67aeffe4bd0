//! Commercial insurance brokerage. `codes` holds coverage lines,
//! `track_record` the insured's claims history, `budget` the annual
//! premium budget against the quoted premium (`value`).

use crate::models::{Lead, Opportunity};
use crate::scoring::{
    DivisionSpec, EstimateKind, FactorRule, FactorSpec, RecommendationSpec,
};
use chrono::{Duration, Utc};

const FACTORS: &[FactorSpec] = &[
    FactorSpec {
        name: "Coverage Line",
        max_points: 30,
        rule: FactorRule::CodeOverlap {
            exact: 30,
            prefix: 16,
            miss: 5,
            unknown: 12,
        },
    },
    FactorSpec {
        name: "Claims History",
        max_points: 25,
        rule: FactorRule::TrackRecordTable {
            table: &[
                ("clean", 25),
                ("minor claims", 18),
                ("moderate claims", 10),
                ("severe claims", 3),
            ],
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Premium Fit",
        max_points: 20,
        rule: FactorRule::BudgetFit {
            inside: 20,
            near: 14,
            outside: 6,
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Industry Appetite",
        max_points: 15,
        rule: FactorRule::IndustryMatch {
            exact: 15,
            related: 10,
            other: 4,
            unknown: 7,
        },
    },
    FactorSpec {
        name: "Geography",
        max_points: 10,
        rule: FactorRule::Geography {
            exact: 10,
            state: 8,
            region: 5,
            other: 3,
            unknown: 5,
        },
    },
];

pub static SPEC: DivisionSpec = DivisionSpec {
    id: "insurance",
    name: "Commercial Insurance",
    commission_rate: 0.12,
    data_sources: &["Carrier appetite guides", "NAIC filings"],
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
            name: "Redwood Timber Holdings".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(6),
            industry: Some("Forestry".to_string()),
            location: Some("Eugene, OR".to_string()),
            budget: Some(240_000.0),
            codes: vec!["general liability".to_string(), "property".to_string()],
            track_record: Some("Minor Claims".to_string()),
            ..Default::default()
        },
        Lead {
            name: "Metro Valet Partners".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(13),
            industry: Some("Hospitality".to_string()),
            location: Some("Las Vegas, NV".to_string()),
            budget: Some(95_000.0),
            codes: vec!["garage liability".to_string(), "umbrella".to_string()],
            track_record: Some("Moderate Claims".to_string()),
            ..Default::default()
        },
        Lead {
            name: "Clearline Software Inc".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(2),
            industry: Some("Software".to_string()),
            location: Some("Raleigh, NC".to_string()),
            budget: Some(60_000.0),
            codes: vec!["cyber".to_string(), "e&o".to_string()],
            track_record: Some("Clean".to_string()),
            ..Default::default()
        },
        Lead {
            name: "Ironworks Fabrication Co".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(22),
            industry: Some("Manufacturing".to_string()),
            location: Some("Gary, IN".to_string()),
            budget: Some(310_000.0),
            codes: vec!["workers comp".to_string(), "general liability".to_string()],
            track_record: Some("Severe Claims".to_string()),
            ..Default::default()
        },
    ]
}

pub fn opportunities() -> Vec<Opportunity> {
    let now = Utc::now();
    vec![
        Opportunity {
            title: "Pacific Mutual - Forestry Package Program".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Forestry".to_string()),
            location: Some("Portland, OR".to_string()),
            value: Some(220_000.0),
            codes: vec!["general liability".to_string(), "property".to_string()],
            deadline: Some(now + Duration::days(35)),
            ..Default::default()
        },
        Opportunity {
            title: "Sentry Surplus - Hospitality Garage Program".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Hospitality".to_string()),
            location: Some("Henderson, NV".to_string()),
            value: Some(120_000.0),
            codes: vec!["garage liability".to_string()],
            deadline: Some(now + Duration::days(18)),
            ..Default::default()
        },
        Opportunity {
            title: "Cobalt Specialty - Tech E&O/Cyber Bundle".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Software".to_string()),
            location: Some("Charlotte, NC".to_string()),
            value: Some(54_000.0),
            codes: vec!["cyber".to_string(), "e&o".to_string()],
            deadline: Some(now + Duration::days(9)),
            ..Default::default()
        },
        Opportunity {
            title: "Harbor National - Heavy Manufacturing WC".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Manufacturing".to_string()),
            location: Some("Hammond, IN".to_string()),
            value: Some(380_000.0),
            codes: vec!["workers comp".to_string()],
            deadline: Some(now + Duration::days(70)),
            ..Default::default()
        },
    ]
}
