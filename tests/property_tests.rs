/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs to the scoring engine.
use chrono::{Duration, Utc};
use proptest::prelude::*;
use rust_broker_api::matcher::{
    calculate_confidence, score_budget, score_industry, score_location, score_size, score_timing,
    Confidence, MatchWeights, OpportunityMatcher,
};
use rust_broker_api::models::{Lead, Opportunity, Rating};
use rust_broker_api::scoring::score_match_at;

fn arb_lead() -> impl Strategy<Value = Lead> {
    (
        proptest::option::of("[a-zA-Z ]{0,20}"),
        proptest::option::of("[a-zA-Z ]{0,15}, [A-Z]{2}"),
        proptest::option::of(0.0..1e9f64),
        proptest::option::of(0.0..1e9f64),
        proptest::option::of(300u16..=850u16),
        0i64..400i64,
    )
        .prop_map(|(industry, location, budget, revenue, credit, age_days)| Lead {
            industry,
            location,
            budget,
            annual_revenue: revenue,
            credit_score: credit,
            created_at: Utc::now() - Duration::days(age_days),
            ..Default::default()
        })
}

fn arb_opportunity() -> impl Strategy<Value = Opportunity> {
    (
        proptest::option::of("[a-zA-Z ]{0,20}"),
        proptest::option::of("[a-zA-Z ]{0,15}, [A-Z]{2}"),
        proptest::option::of(0.0..1e9f64),
        proptest::option::of(0.0..1e8f64),
        proptest::option::of(1e8f64..1e9f64),
        proptest::option::of(-200i64..400i64),
    )
        .prop_map(|(industry, location, value, min_size, max_size, deadline_days)| Opportunity {
            industry,
            location,
            value,
            min_size,
            max_size,
            deadline: deadline_days.map(|d| Utc::now() + Duration::days(d)),
            ..Default::default()
        })
}

// Property: every generic factor scorer stays in [0, 1], including for
// missing comparison data.
proptest! {
    #[test]
    fn factor_scores_stay_in_unit_interval(lead in arb_lead(), opp in arb_opportunity()) {
        let now = Utc::now();
        for score in [
            score_industry(&lead, &opp),
            score_location(&lead, &opp),
            score_size(&lead, &opp),
            score_timing(&lead, &opp, now),
            score_budget(&lead, &opp),
        ] {
            prop_assert!((0.0..=1.0).contains(&score), "factor score {score} out of range");
        }
    }

    // Property: the total equals the rounded weighted sum of the factors.
    #[test]
    fn score_is_rounded_weighted_sum(lead in arb_lead(), opp in arb_opportunity()) {
        let matcher = OpportunityMatcher::new();
        let result = matcher.score_match(&lead, &opp, None);
        let s = result.metadata.factor_scores;
        let w = result.metadata.weights;
        let expected = (s.industry * w.industry
            + s.location * w.location
            + s.size * w.size
            + s.timing * w.timing
            + s.budget * w.budget)
            * 100.0;
        prop_assert_eq!(result.score, expected.round() as u16);
    }

    // Property: custom weights flow through the weighted sum unvalidated.
    #[test]
    fn custom_weights_are_applied_as_given(
        lead in arb_lead(),
        opp in arb_opportunity(),
        wi in 0.0..2.0f64,
        wl in 0.0..2.0f64,
    ) {
        let matcher = OpportunityMatcher::new();
        let weights = MatchWeights {
            industry: wi,
            location: wl,
            size: 0.0,
            timing: 0.0,
            budget: 0.0,
        };
        let result = matcher.score_match(&lead, &opp, Some(weights));
        let s = result.metadata.factor_scores;
        let expected = ((s.industry * wi + s.location * wl) * 100.0).round().max(0.0) as u16;
        prop_assert_eq!(result.score, expected);
    }
}

// Property: widening the spread of factor scores never raises confidence.
proptest! {
    #[test]
    fn confidence_never_improves_with_spread(base in 0.2..0.8f64, spread in 0.0..0.2f64) {
        let narrow = [base, base, base, base, base];
        let wide = [
            (base - 2.0 * spread).clamp(0.0, 1.0),
            base,
            base,
            base,
            (base + 2.0 * spread).clamp(0.0, 1.0),
        ];
        let rank = |c: Confidence| match c {
            Confidence::High => 2,
            Confidence::Medium => 1,
            Confidence::Low => 0,
        };
        prop_assert!(rank(calculate_confidence(&wide)) <= rank(calculate_confidence(&narrow)));
    }
}

// Property: every division's score equals the sum of its factor points,
// bounded by the 100-point budget, with a consistent rating.
proptest! {
    #[test]
    fn division_scores_sum_and_stay_bounded(
        lead in arb_lead(),
        opp in arb_opportunity(),
        division_index in 0usize..10usize,
    ) {
        let handle = &rust_broker_api::divisions::ALL[division_index];
        let result = score_match_at(handle.spec, &lead, &opp, Utc::now());
        let sum: u16 = result.factors.iter().map(|f| f.points).sum();
        prop_assert_eq!(result.score, sum);
        prop_assert!(result.score <= 100);
        prop_assert_eq!(result.max_score, 100);
        prop_assert_eq!(result.rating, Rating::from_score(result.score));
        for (factor, spec) in result.factors.iter().zip(handle.spec.factors) {
            prop_assert!(factor.points <= spec.max_points);
        }
    }
}

// Property: batch scoring always returns the full cross product, sorted
// descending by score.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn batch_results_are_complete_and_sorted(
        leads in proptest::collection::vec(arb_lead(), 0..4),
        opps in proptest::collection::vec(arb_opportunity(), 0..4),
    ) {
        let matcher = OpportunityMatcher::new();
        let results = matcher.batch_score(&leads, &opps, None);
        prop_assert_eq!(results.len(), leads.len() * opps.len());
        prop_assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
