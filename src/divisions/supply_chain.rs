//! Supply chain sourcing. Leads are suppliers; opportunities are buyer
//! RFQs. `codes` holds product categories, `certifications` quality
//! standards, `annual_revenue` sizes supplier capacity against contract
//! volume. Estimates quote annual procurement savings.

use crate::models::{Lead, Opportunity};
use crate::scoring::{
    DivisionSpec, EstimateKind, FactorRule, FactorSpec, RecommendationSpec,
};
use chrono::{Duration, Utc};

const QUALITY_LADDER: &[&str] = &["iso 9001", "iso 13485", "as9100"];

const FACTORS: &[FactorSpec] = &[
    FactorSpec {
        name: "Category Overlap",
        max_points: 30,
        rule: FactorRule::CodeOverlap {
            exact: 30,
            prefix: 18,
            miss: 6,
            unknown: 12,
        },
    },
    FactorSpec {
        name: "Capacity Fit",
        max_points: 25,
        // Contract volume between 5% and 50% of supplier revenue is the
        // sweet spot: meaningful but not a concentration risk.
        rule: FactorRule::SizeRatioBands {
            bands: &[
                (0.05, 0.5, 25),
                (0.5, 1.5, 18),
                (0.01, 0.05, 12),
                (1.5, 5.0, 8),
            ],
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Quality Certification",
        max_points: 20,
        rule: FactorRule::CertificationLadder {
            ladder: QUALITY_LADDER,
            meets: 20,
            adjacent: 12,
            miss: 4,
        },
    },
    FactorSpec {
        name: "Geography",
        max_points: 15,
        rule: FactorRule::Geography {
            exact: 15,
            state: 12,
            region: 9,
            other: 5,
            unknown: 7,
        },
    },
    FactorSpec {
        name: "Lead Time",
        max_points: 10,
        // A month-out need is ideal; a week is rushed, a quarter is fine.
        rule: FactorRule::DeadlineBuckets {
            week: 4,
            month: 10,
            quarter: 8,
            later: 5,
            passed: 0,
            unknown: 5,
        },
    },
];

pub static SPEC: DivisionSpec = DivisionSpec {
    id: "supply_chain",
    name: "Supply Chain Sourcing",
    commission_rate: 0.05,
    data_sources: &["ThomasNet", "ImportGenius"],
    factors: FACTORS,
    recommendation: RecommendationSpec {
        high_cutoff: 70,
        mid_cutoff: 50,
        high: "Highly Recommended",
        mid: "Recommended",
        low: "Not Recommended",
    },
    estimate: EstimateKind::AnnualSavings { savings_rate: 0.12 },
};

pub fn leads() -> Vec<Lead> {
    let now = Utc::now();
    vec![
        Lead {
            name: "Great Lakes Precision Machining".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(4),
            industry: Some("Manufacturing".to_string()),
            location: Some("Grand Rapids, MI".to_string()),
            annual_revenue: Some(18_000_000.0),
            codes: vec!["cnc machining".to_string(), "metal fabrication".to_string()],
            certifications: vec!["ISO 9001".to_string(), "AS9100".to_string()],
            ..Default::default()
        },
        Lead {
            name: "Coastal Polymer Solutions".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(10),
            industry: Some("Plastics".to_string()),
            location: Some("Charleston, SC".to_string()),
            annual_revenue: Some(9_500_000.0),
            codes: vec!["injection molding".to_string()],
            certifications: vec!["ISO 9001".to_string()],
            ..Default::default()
        },
        Lead {
            name: "Summit Medical Components".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(19),
            industry: Some("Medical Devices".to_string()),
            location: Some("Minneapolis, MN".to_string()),
            annual_revenue: Some(26_000_000.0),
            codes: vec!["machined implants".to_string(), "cnc machining".to_string()],
            certifications: vec!["ISO 13485".to_string()],
            ..Default::default()
        },
        Lead {
            name: "Bluegrass Harness & Cable".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(1),
            industry: Some("Electronics".to_string()),
            location: Some("Louisville, KY".to_string()),
            annual_revenue: Some(5_200_000.0),
            codes: vec!["wire harness".to_string(), "cable assembly".to_string()],
            ..Default::default()
        },
    ]
}

pub fn opportunities() -> Vec<Opportunity> {
    let now = Utc::now();
    vec![
        Opportunity {
            title: "Aerospace Bracket Machining RFQ".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Manufacturing".to_string()),
            location: Some("Wichita, KS".to_string()),
            value: Some(3_600_000.0),
            codes: vec!["cnc machining".to_string()],
            required_certification: Some("AS9100".to_string()),
            deadline: Some(now + Duration::days(21)),
            ..Default::default()
        },
        Opportunity {
            title: "Consumer Housing Injection Molding".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Plastics".to_string()),
            location: Some("Greenville, SC".to_string()),
            value: Some(1_100_000.0),
            codes: vec!["injection molding".to_string()],
            required_certification: Some("ISO 9001".to_string()),
            deadline: Some(now + Duration::days(50)),
            ..Default::default()
        },
        Opportunity {
            title: "Orthopedic Implant Component Supply".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Medical Devices".to_string()),
            location: Some("Minneapolis, MN".to_string()),
            value: Some(7_800_000.0),
            codes: vec!["machined implants".to_string()],
            required_certification: Some("ISO 13485".to_string()),
            deadline: Some(now + Duration::days(28)),
            ..Default::default()
        },
        Opportunity {
            title: "EV Charger Harness Program".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Electronics".to_string()),
            location: Some("Nashville, TN".to_string()),
            value: Some(2_400_000.0),
            codes: vec!["wire harness".to_string()],
            deadline: Some(now + Duration::days(6)),
            ..Default::default()
        },
    ]
}
