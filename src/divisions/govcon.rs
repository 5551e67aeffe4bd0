//! Government contracting division.
//!
//! Field usage: `codes` holds NAICS codes, `certifications` holds security
//! clearance levels, `track_record` holds a CPARS-style past-performance
//! tier, `annual_revenue` sizes the contractor against contract value.
//! Mock data stands in for SAM.gov / FPDS feeds.

use crate::models::{Lead, Opportunity};
use crate::scoring::{
    DivisionSpec, EstimateKind, FactorRule, FactorSpec, RecommendationSpec,
};
use chrono::{Duration, Utc};

const CLEARANCE_LADDER: &[&str] = &["public trust", "secret", "top secret", "ts/sci"];

const FACTORS: &[FactorSpec] = &[
    FactorSpec {
        name: "NAICS Match",
        max_points: 30,
        rule: FactorRule::CodeOverlap {
            exact: 30,
            prefix: 18,
            miss: 5,
            unknown: 10,
        },
    },
    FactorSpec {
        name: "Security Clearance",
        max_points: 25,
        rule: FactorRule::CertificationLadder {
            ladder: CLEARANCE_LADDER,
            meets: 25,
            adjacent: 12,
            miss: 0,
        },
    },
    FactorSpec {
        name: "Past Performance",
        max_points: 20,
        rule: FactorRule::TrackRecordTable {
            table: &[
                ("exceptional", 20),
                ("excellent", 18),
                ("good", 14),
                ("satisfactory", 10),
                ("limited", 5),
            ],
            unknown: 8,
        },
    },
    FactorSpec {
        name: "Contract Size Fit",
        max_points: 15,
        // Ratio of contract value to contractor revenue. The sweet spot is
        // a contract between half and triple the contractor's annual
        // revenue; far smaller or larger contracts score down.
        rule: FactorRule::SizeRatioBands {
            bands: &[
                (0.5, 3.0, 15),
                (0.2, 0.5, 10),
                (3.0, 10.0, 8),
                (0.05, 0.2, 5),
                (10.0, f64::MAX, 2),
            ],
            unknown: 7,
        },
    },
    FactorSpec {
        name: "Geography",
        max_points: 10,
        rule: FactorRule::Geography {
            exact: 10,
            state: 8,
            region: 6,
            other: 5,
            unknown: 5,
        },
    },
];

pub static SPEC: DivisionSpec = DivisionSpec {
    id: "govcon",
    name: "Government Contracts",
    commission_rate: 0.05,
    data_sources: &["SAM.gov", "FPDS", "USASpending"],
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
            name: "Meridian Defense Systems".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(2),
            industry: Some("Defense".to_string()),
            location: Some("Arlington, VA".to_string()),
            annual_revenue: Some(15_000_000.0),
            codes: vec!["541512".to_string(), "541511".to_string()],
            certifications: vec!["Secret".to_string()],
            track_record: Some("Excellent".to_string()),
            years_in_business: Some(12),
            headcount: Some(85),
            ..Default::default()
        },
        Lead {
            name: "Blue Ridge Analytics".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(9),
            industry: Some("Information Technology".to_string()),
            location: Some("Charlottesville, VA".to_string()),
            annual_revenue: Some(4_200_000.0),
            codes: vec!["541511".to_string(), "518210".to_string()],
            certifications: vec!["Public Trust".to_string()],
            track_record: Some("Good".to_string()),
            years_in_business: Some(6),
            headcount: Some(32),
            ..Default::default()
        },
        Lead {
            name: "Sentinel Logistics Group".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(21),
            industry: Some("Logistics".to_string()),
            location: Some("San Antonio, TX".to_string()),
            annual_revenue: Some(28_000_000.0),
            codes: vec!["488510".to_string(), "493110".to_string()],
            certifications: vec!["Secret".to_string()],
            track_record: Some("Satisfactory".to_string()),
            years_in_business: Some(18),
            headcount: Some(210),
            ..Default::default()
        },
        Lead {
            name: "Cascade Cyber Works".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(4),
            industry: Some("Cybersecurity".to_string()),
            location: Some("Tacoma, WA".to_string()),
            annual_revenue: Some(7_500_000.0),
            codes: vec!["541512".to_string(), "541519".to_string()],
            certifications: vec!["Top Secret".to_string()],
            track_record: Some("Exceptional".to_string()),
            years_in_business: Some(9),
            headcount: Some(54),
            ..Default::default()
        },
        Lead {
            name: "Gulf Coast Facilities Inc".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(40),
            industry: Some("Facilities Management".to_string()),
            location: Some("Pensacola, FL".to_string()),
            annual_revenue: Some(2_100_000.0),
            codes: vec!["561210".to_string()],
            track_record: Some("Limited".to_string()),
            years_in_business: Some(3),
            headcount: Some(45),
            ..Default::default()
        },
        Lead {
            name: "Ironclad Engineering".to_string(),
            division_id: SPEC.id.to_string(),
            created_at: now - Duration::days(1),
            industry: Some("Engineering".to_string()),
            location: Some("Huntsville, AL".to_string()),
            annual_revenue: Some(11_000_000.0),
            codes: vec!["541330".to_string(), "541715".to_string()],
            certifications: vec!["Secret".to_string(), "Top Secret".to_string()],
            track_record: Some("Excellent".to_string()),
            years_in_business: Some(15),
            headcount: Some(120),
            ..Default::default()
        },
    ]
}

pub fn opportunities() -> Vec<Opportunity> {
    let now = Utc::now();
    vec![
        Opportunity {
            title: "Enterprise IT Modernization IDIQ".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Information Technology".to_string()),
            location: Some("Fort Meade, MD".to_string()),
            value: Some(15_000_000.0),
            codes: vec!["541512".to_string()],
            required_certification: Some("Secret".to_string()),
            deadline: Some(now + Duration::days(25)),
            ..Default::default()
        },
        Opportunity {
            title: "Base Logistics Support Services".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Logistics".to_string()),
            location: Some("San Antonio, TX".to_string()),
            value: Some(42_000_000.0),
            codes: vec!["488510".to_string()],
            deadline: Some(now + Duration::days(55)),
            ..Default::default()
        },
        Opportunity {
            title: "Cyber Threat Hunting Task Order".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Cybersecurity".to_string()),
            location: Some("Colorado Springs, CO".to_string()),
            value: Some(6_800_000.0),
            codes: vec!["541512".to_string(), "541519".to_string()],
            required_certification: Some("Top Secret".to_string()),
            deadline: Some(now + Duration::days(12)),
            ..Default::default()
        },
        Opportunity {
            title: "Facilities Maintenance BPA".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Facilities Management".to_string()),
            location: Some("Jacksonville, FL".to_string()),
            value: Some(1_900_000.0),
            codes: vec!["561210".to_string()],
            deadline: Some(now + Duration::days(80)),
            ..Default::default()
        },
        Opportunity {
            title: "Missile Systems Engineering Support".to_string(),
            division_id: SPEC.id.to_string(),
            industry: Some("Engineering".to_string()),
            location: Some("Huntsville, AL".to_string()),
            value: Some(24_000_000.0),
            codes: vec!["541330".to_string()],
            required_certification: Some("Secret".to_string()),
            deadline: Some(now + Duration::days(38)),
            ..Default::default()
        },
    ]
}
