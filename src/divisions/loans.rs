//! Business lending. `value` is the loan amount, `annual_revenue` sizes
//! debt service capacity, `term_months` overrides the program's default
//! amortization term. Estimates quote the amortized monthly payment.

use crate::models::{Lead, Opportunity};
use crate::scoring::{
    DivisionSpec, EstimateKind, FactorRule, FactorSpec, RecommendationSpec,
};
use chrono::{Duration, Utc};

const FACTORS: &[FactorSpec] = &[
    FactorSpec {
        name: "Credit Score",
        max_points: 30,
        rule: FactorRule::CreditBands {
            bands: &[(740, 30), (700, 26), (660, 20), (620, 12), (0, 4)],
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Debt Service",
        max_points: 25,
        // Loan between 5% and 35% of annual revenue services comfortably.
        rule: FactorRule::SizeRatioBands {
            bands: &[
                (0.05, 0.35, 25),
                (0.35, 0.75, 18),
                (0.01, 0.05, 12),
                (0.75, 1.5, 8),
                (1.5, f64::MAX, 2),
            ],
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Loan Size",
        max_points: 20,
        rule: FactorRule::ValueBands {
            bands: &[
                (100_000.0, 5_000_000.0, 20),
                (25_000.0, 100_000.0, 14),
                (5_000_000.0, 25_000_000.0, 10),
                (0.0, 25_000.0, 6),
            ],
            unknown: 8,
        },
    },
    FactorSpec {
        name: "Time in Business",
        max_points: 15,
        rule: FactorRule::TenureBands {
            bands: &[(5, 15), (3, 11), (2, 8), (0, 2)],
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
    id: "loans",
    name: "Business Loans",
    commission_rate: 0.02,
    data_sources: &["SBA lender directory", "Credit bureaus"],
    factors: FACTORS,
    recommendation: RecommendationSpec {
        high_cutoff: 75,
        mid_cutoff: 55,
        high: "Highly Recommended",
        mid: "Recommended",
        low: "Not Recommended",
    },
    estimate: EstimateKind::FinancedPayment {
        default_annual_rate: 0.0975,
        default_term_months: 120,
    },
};

pub fn leads() -> Vec<Lead> {
    let now = Utc::now();
    vec![
        Lead {
            name: "Copper Kettle Brewing".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(2),
            industry: Some("Food Service".to_string()),
            location: Some("Asheville, NC".to_string()),
            annual_revenue: Some(3_800_000.0),
            credit_score: Some(715),
            years_in_business: Some(6),
            ..Default::default()
        },
        Lead {
            name: "Starlight Dental Group".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(9),
            industry: Some("Healthcare".to_string()),
            location: Some("Plano, TX".to_string()),
            annual_revenue: Some(2_100_000.0),
            credit_score: Some(765),
            years_in_business: Some(11),
            ..Default::default()
        },
        Lead {
            name: "Ridgeline Outfitters".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(20),
            industry: Some("Retail".to_string()),
            location: Some("Bozeman, MT".to_string()),
            annual_revenue: Some(950_000.0),
            credit_score: Some(648),
            years_in_business: Some(2),
            ..Default::default()
        },
        Lead {
            name: "Port City Marine Services".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(5),
            industry: Some("Marine".to_string()),
            location: Some("Mobile, AL".to_string()),
            annual_revenue: Some(6_400_000.0),
            credit_score: Some(688),
            years_in_business: Some(15),
            ..Default::default()
        },
    ]
}

pub fn opportunities() -> Vec<Opportunity> {
    vec![
        Opportunity {
            title: "SBA 7(a) Expansion Loan".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Food Service".to_string()),
            location: Some("Charlotte, NC".to_string()),
            value: Some(1_200_000.0),
            term_months: Some(120),
            ..Default::default()
        },
        Opportunity {
            title: "Practice Acquisition Financing".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Healthcare".to_string()),
            location: Some("Dallas, TX".to_string()),
            value: Some(650_000.0),
            term_months: Some(84),
            ..Default::default()
        },
        Opportunity {
            title: "Inventory Line Conversion".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Retail".to_string()),
            location: Some("Billings, MT".to_string()),
            value: Some(180_000.0),
            term_months: Some(36),
            ..Default::default()
        },
        Opportunity {
            title: "Drydock Equipment Term Loan".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Marine".to_string()),
            location: Some("Mobile, AL".to_string()),
            value: Some(2_300_000.0),
            term_months: Some(144),
            ..Default::default()
        },
    ]
}
