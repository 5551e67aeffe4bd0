//! End-to-end scoring scenarios against the shipped division tables.

use chrono::{Duration, Utc};
use rust_broker_api::divisions::{equipment_leasing, franchise, govcon, supply_chain};
use rust_broker_api::models::{FactorStatus, Lead, Opportunity, Rating};
use rust_broker_api::scoring::score_match_at;

/// Reference contractor scenario: exact NAICS match, clearance met,
/// excellent past performance, contract equal to annual revenue, and an
/// out-of-region location.
#[test]
fn govcon_reference_contractor_scores_ninety_three() {
    let now = Utc::now();
    let lead = Lead {
        name: "Lone Star Federal Services".to_string(),
        division_id: "govcon".to_string(),
        location: Some("San Antonio, TX".to_string()),
        annual_revenue: Some(15_000_000.0),
        codes: vec!["541512".to_string()],
        certifications: vec!["Secret".to_string()],
        track_record: Some("Excellent".to_string()),
        ..Default::default()
    };
    let opp = Opportunity {
        title: "Enterprise IT Modernization IDIQ".to_string(),
        division_id: "govcon".to_string(),
        location: Some("Fort Meade, MD".to_string()),
        value: Some(15_000_000.0),
        codes: vec!["541512".to_string()],
        required_certification: Some("Secret".to_string()),
        deadline: Some(now + Duration::days(25)),
        ..Default::default()
    };

    let result = score_match_at(&govcon::SPEC, &lead, &opp, now);

    // 30 (NAICS exact) + 25 (clearance met) + 18 (excellent) + 15 (ratio
    // 1.0 in the 0.5-3.0 band) + 5 (TX vs MD, different region).
    assert_eq!(result.score, 93);
    assert_eq!(result.max_score, 100);
    assert_eq!(result.rating, Rating::Excellent);
    assert_eq!(result.recommendation, "Highly Recommended");

    let points: Vec<u16> = result.factors.iter().map(|f| f.points).collect();
    assert_eq!(points, vec![30, 25, 18, 15, 5]);
    assert_eq!(result.factors[0].status, FactorStatus::Excellent);
    assert_eq!(result.factors[4].status, FactorStatus::Fair);

    // 5% commission on the contract value.
    assert_eq!(result.estimate.commission, Some(750_000.0));
    assert_eq!(result.estimate.monthly_payment, None);
}

/// Same pairing but with a same-region lead: the only delta is the
/// geography factor moving from 5 to 6 points.
#[test]
fn govcon_same_region_lead_earns_geography_credit() {
    let now = Utc::now();
    let lead = Lead {
        location: Some("Arlington, VA".to_string()),
        annual_revenue: Some(15_000_000.0),
        codes: vec!["541512".to_string()],
        certifications: vec!["Secret".to_string()],
        track_record: Some("Excellent".to_string()),
        ..Default::default()
    };
    let opp = Opportunity {
        location: Some("Fort Meade, MD".to_string()),
        value: Some(15_000_000.0),
        codes: vec!["541512".to_string()],
        required_certification: Some("Secret".to_string()),
        ..Default::default()
    };
    let result = score_match_at(&govcon::SPEC, &lead, &opp, now);
    assert_eq!(result.score, 94);
}

/// A completely empty pair still scores: every factor falls back to its
/// unknown allocation (with no required clearance counting as met) and the
/// data-dependent factors report n/a.
#[test]
fn govcon_empty_pair_uses_unknown_fallbacks() {
    let result = score_match_at(
        &govcon::SPEC,
        &Lead::default(),
        &Opportunity::default(),
        Utc::now(),
    );
    // 10 + 25 + 8 + 7 + 5.
    assert_eq!(result.score, 55);
    assert_eq!(result.rating, Rating::Fair);
    assert_eq!(result.recommendation, "Recommended");
    assert_eq!(result.factors[0].status, FactorStatus::NotApplicable);
    assert_eq!(result.factors[2].status, FactorStatus::NotApplicable);
}

#[test]
fn equipment_leasing_match_includes_amortized_payment() {
    let lead = Lead {
        credit_score: Some(720),
        ..Default::default()
    };
    let opp = Opportunity {
        value: Some(100_000.0),
        term_months: Some(60),
        ..Default::default()
    };
    let result = score_match_at(&equipment_leasing::SPEC, &lead, &opp, Utc::now());
    let payment = result
        .estimate
        .monthly_payment
        .expect("financed divisions attach a monthly payment");
    // $100,000 at 8.5% over 60 months.
    assert!((payment - 2_051.65).abs() < 1.0, "payment was {payment}");
    assert!(result.estimate.commission.is_some());
}

#[test]
fn supply_chain_match_estimates_annual_savings() {
    let result = score_match_at(
        &supply_chain::SPEC,
        &Lead::default(),
        &Opportunity {
            value: Some(2_000_000.0),
            ..Default::default()
        },
        Utc::now(),
    );
    // 12% of annual spend.
    assert_eq!(result.estimate.annual_savings, Some(240_000.0));
    // Commission is charged on the savings, not the spend.
    assert_eq!(result.estimate.commission, Some(240_000.0 * 0.05));
}

#[test]
fn franchise_match_estimates_payback_period() {
    let result = score_match_at(
        &franchise::SPEC,
        &Lead::default(),
        &Opportunity {
            value: Some(300_000.0),
            ..Default::default()
        },
        Utc::now(),
    );
    // 1.5% monthly return: ceil(1 / 0.015) = 67 months to recoup.
    assert_eq!(result.estimate.payback_months, Some(67));
}

/// Every shipped division handles an arbitrary well-populated pair without
/// exceeding its budget, and attaches the estimate kind it advertises.
#[test]
fn all_divisions_score_a_populated_pair() {
    let now = Utc::now();
    let lead = Lead {
        industry: Some("Software".to_string()),
        location: Some("Austin, TX".to_string()),
        budget: Some(500_000.0),
        annual_revenue: Some(3_000_000.0),
        credit_score: Some(700),
        codes: vec!["541511".to_string()],
        certifications: vec!["Secret".to_string()],
        track_record: Some("Good".to_string()),
        years_in_business: Some(8),
        ..Default::default()
    };
    let opp = Opportunity {
        industry: Some("Software".to_string()),
        location: Some("Dallas, TX".to_string()),
        value: Some(400_000.0),
        codes: vec!["541511".to_string()],
        deadline: Some(now + Duration::days(20)),
        ..Default::default()
    };

    for handle in rust_broker_api::divisions::ALL {
        let result = score_match_at(handle.spec, &lead, &opp, now);
        assert!(result.score <= 100, "{} overflowed: {}", handle.spec.id, result.score);
        assert_eq!(result.factors.len(), handle.spec.factors.len());
        assert!(
            result.estimate.commission.is_some(),
            "{} produced no commission estimate",
            handle.spec.id
        );
    }
}
