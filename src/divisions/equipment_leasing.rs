//! Equipment leasing. `codes` holds equipment categories, `budget` the
//! lessee's monthly-payment-capable principal, `value` the equipment cost.
//! Match estimates quote an amortized monthly payment.

use crate::models::{Lead, Opportunity};
use crate::scoring::{
    DivisionSpec, EstimateKind, FactorRule, FactorSpec, RecommendationSpec,
};
use chrono::{Duration, Utc};

const FACTORS: &[FactorSpec] = &[
    FactorSpec {
        name: "Credit Profile",
        max_points: 30,
        rule: FactorRule::CreditBands {
            bands: &[(740, 30), (680, 24), (620, 15), (560, 8), (0, 2)],
            unknown: 12,
        },
    },
    FactorSpec {
        name: "Equipment Category",
        max_points: 25,
        rule: FactorRule::CodeOverlap {
            exact: 25,
            prefix: 14,
            miss: 5,
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Lease Size",
        max_points: 20,
        rule: FactorRule::BudgetFit {
            inside: 20,
            near: 14,
            outside: 5,
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Time in Business",
        max_points: 15,
        rule: FactorRule::TenureBands {
            bands: &[(10, 15), (5, 12), (2, 8), (0, 3)],
            unknown: 6,
        },
    },
    FactorSpec {
        name: "Geography",
        max_points: 10,
        rule: FactorRule::Geography {
            exact: 10,
            state: 8,
            region: 6,
            other: 4,
            unknown: 5,
        },
    },
];

pub static SPEC: DivisionSpec = DivisionSpec {
    id: "equipment_leasing",
    name: "Equipment Leasing",
    commission_rate: 0.04,
    data_sources: &["Vendor catalogs", "UCC filings"],
    factors: FACTORS,
    recommendation: RecommendationSpec {
        high_cutoff: 70,
        mid_cutoff: 50,
        high: "Highly Recommended",
        mid: "Recommended",
        low: "Not Recommended",
    },
    estimate: EstimateKind::FinancedPayment {
        default_annual_rate: 0.085,
        default_term_months: 48,
    },
};

pub fn leads() -> Vec<Lead> {
    let now = Utc::now();
    vec![
        Lead {
            name: "Keystone Excavation LLC".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(2),
            industry: Some("Construction".to_string()),
            location: Some("Pittsburgh, PA".to_string()),
            budget: Some(850_000.0),
            credit_score: Some(745),
            codes: vec!["excavator".to_string(), "loader".to_string()],
            years_in_business: Some(14),
            ..Default::default()
        },
        Lead {
            name: "Nightingale Diagnostics".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(16),
            industry: Some("Healthcare".to_string()),
            location: Some("Columbus, OH".to_string()),
            budget: Some(1_200_000.0),
            credit_score: Some(705),
            codes: vec!["imaging".to_string(), "mri".to_string()],
            years_in_business: Some(7),
            ..Default::default()
        },
        Lead {
            name: "Highline Freight Co".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(5),
            industry: Some("Transportation".to_string()),
            location: Some("Omaha, NE".to_string()),
            budget: Some(520_000.0),
            credit_score: Some(630),
            codes: vec!["tractor".to_string(), "trailer".to_string()],
            years_in_business: Some(3),
            ..Default::default()
        },
        Lead {
            name: "Verdant Packhouse Inc".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(33),
            industry: Some("Agriculture".to_string()),
            location: Some("Fresno, CA".to_string()),
            budget: Some(340_000.0),
            credit_score: Some(585),
            codes: vec!["sorting line".to_string()],
            years_in_business: Some(1),
            ..Default::default()
        },
    ]
}

pub fn opportunities() -> Vec<Opportunity> {
    vec![
        Opportunity {
            title: "CAT 336 Excavator Fleet Lease".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Construction".to_string()),
            location: Some("Harrisburg, PA".to_string()),
            value: Some(780_000.0),
            codes: vec!["excavator".to_string()],
            term_months: Some(60),
            ..Default::default()
        },
        Opportunity {
            title: "3T MRI Suite Lease Program".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Healthcare".to_string()),
            location: Some("Columbus, OH".to_string()),
            value: Some(1_450_000.0),
            codes: vec!["mri".to_string(), "imaging".to_string()],
            term_months: Some(84),
            ..Default::default()
        },
        Opportunity {
            title: "Class 8 Tractor Refresh".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Transportation".to_string()),
            location: Some("Kansas City, MO".to_string()),
            value: Some(460_000.0),
            codes: vec!["tractor".to_string()],
            term_months: Some(48),
            ..Default::default()
        },
        Opportunity {
            title: "Optical Sorting Line Upgrade".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Agriculture".to_string()),
            location: Some("Bakersfield, CA".to_string()),
            value: Some(390_000.0),
            codes: vec!["sorting line".to_string()],
            term_months: Some(36),
            ..Default::default()
        },
    ]
}
