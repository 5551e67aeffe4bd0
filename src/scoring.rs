//! Declarative division scoring.
//!
//! Every division is a [`DivisionSpec`]: an ordered table of factors whose
//! point budgets sum to 100, recommendation cutoffs, and an estimate kind.
//! One interpreter ([`score_match`]) evaluates any spec against a
//! (lead, opportunity) pair, so the ten divisions are configuration data
//! rather than ten copies of the same function.

use crate::finance;
use crate::matcher::{industries_related, region_of, state_of};
use crate::models::{
    FactorContribution, FactorStatus, Lead, MatchEstimate, MatchResult, Opportunity, Rating,
};
use chrono::{DateTime, Utc};

/// Static configuration of one business division.
#[derive(Debug)]
pub struct DivisionSpec {
    pub id: &'static str,
    pub name: &'static str,
    /// Default commission rate applied to deal values.
    pub commission_rate: f64,
    /// Names of the (mocked) upstream data sources for this division.
    pub data_sources: &'static [&'static str],
    /// Ordered factor table; max points must sum to 100.
    pub factors: &'static [FactorSpec],
    pub recommendation: RecommendationSpec,
    pub estimate: EstimateKind,
}

impl DivisionSpec {
    /// Sum of the factor point budgets. Equals 100 for every shipped
    /// division; asserted by tests rather than at runtime.
    pub fn max_score(&self) -> u16 {
        self.factors.iter().map(|f| f.max_points).sum()
    }
}

/// Cutoffs mapping a total score to free-text guidance. These vary per
/// division (70/50 for most, 75/55 for the pickier ones), unlike the
/// rating cutoffs which are shared platform policy.
#[derive(Debug)]
pub struct RecommendationSpec {
    pub high_cutoff: u16,
    pub mid_cutoff: u16,
    pub high: &'static str,
    pub mid: &'static str,
    pub low: &'static str,
}

impl RecommendationSpec {
    pub fn for_score(&self, score: u16) -> &'static str {
        if score >= self.high_cutoff {
            self.high
        } else if score >= self.mid_cutoff {
            self.mid
        } else {
            self.low
        }
    }
}

/// Which financial estimate a division attaches to its matches.
#[derive(Debug, Clone, Copy)]
pub enum EstimateKind {
    /// Plain commission on the opportunity value.
    Commission,
    /// Amortized monthly payment (loans, equipment leases) plus commission.
    FinancedPayment {
        default_annual_rate: f64,
        default_term_months: u32,
    },
    /// Recurring annual savings (supply chain, energy) plus commission on
    /// the first year of savings.
    AnnualSavings { savings_rate: f64 },
    /// Upfront investment recovered from monthly returns (franchises).
    PaybackPeriod { monthly_return_rate: f64 },
}

/// One scored dimension of a division match.
#[derive(Debug)]
pub struct FactorSpec {
    pub name: &'static str,
    pub max_points: u16,
    pub rule: FactorRule,
}

/// Tagged evaluation rules interpreted by [`score_match`]. Point values
/// are data so each division tunes its own allocation; the comparison
/// mechanics are shared.
#[derive(Debug)]
pub enum FactorRule {
    /// Overlap between `lead.codes` and `opportunity.codes` (NAICS codes,
    /// skills, product categories). `prefix` credits a shared 4-character
    /// code prefix when no exact code matches.
    CodeOverlap {
        exact: u16,
        prefix: u16,
        miss: u16,
        unknown: u16,
    },
    /// `lead.certifications` against `opportunity.required_certification`
    /// along an ordered ladder (e.g. clearance levels). Holding the level
    /// or better earns `meets`; one rung below earns `adjacent`. No
    /// requirement on the opportunity side counts as met.
    CertificationLadder {
        ladder: &'static [&'static str],
        meets: u16,
        adjacent: u16,
        miss: u16,
    },
    /// `lead.track_record` looked up in a qualitative tier table
    /// (case-insensitive).
    TrackRecordTable {
        table: &'static [(&'static str, u16)],
        unknown: u16,
    },
    /// Bands over the ratio `opportunity.value / lead.annual_revenue`.
    /// First matching `(lo, hi, points)` band wins, bounds inclusive.
    SizeRatioBands {
        bands: &'static [(f64, f64, u16)],
        unknown: u16,
    },
    /// `opportunity.value` against `lead.budget`: affordable, slightly
    /// above (within 25%), or out of reach.
    BudgetFit {
        inside: u16,
        near: u16,
        outside: u16,
        unknown: u16,
    },
    /// Location affinity: exact, same state, same US region, other.
    Geography {
        exact: u16,
        state: u16,
        region: u16,
        other: u16,
        unknown: u16,
    },
    /// `lead.credit_score` against descending `(min_score, points)` bands.
    CreditBands {
        bands: &'static [(u16, u16)],
        unknown: u16,
    },
    /// Days until `opportunity.deadline`, bucketed.
    DeadlineBuckets {
        week: u16,
        month: u16,
        quarter: u16,
        later: u16,
        passed: u16,
        unknown: u16,
    },
    /// Industry comparison reusing the generic matcher's related table.
    IndustryMatch {
        exact: u16,
        related: u16,
        other: u16,
        unknown: u16,
    },
    /// `lead.years_in_business` against descending `(min_years, points)`
    /// bands.
    TenureBands {
        bands: &'static [(u16, u16)],
        unknown: u16,
    },
    /// Absolute `opportunity.value` bands, for divisions where the deal
    /// size itself qualifies the match (grant award, usage volume).
    ValueBands {
        bands: &'static [(f64, f64, u16)],
        unknown: u16,
    },
}

struct FactorOutcome {
    points: u16,
    applicable: bool,
}

impl FactorOutcome {
    fn known(points: u16) -> Self {
        Self {
            points,
            applicable: true,
        }
    }

    fn missing(points: u16) -> Self {
        Self {
            points,
            applicable: false,
        }
    }
}

/// Score a (lead, opportunity) pair against a division spec.
pub fn score_match(spec: &DivisionSpec, lead: &Lead, opportunity: &Opportunity) -> MatchResult {
    score_match_at(spec, lead, opportunity, Utc::now())
}

/// Deterministic variant with an explicit clock for deadline buckets.
pub fn score_match_at(
    spec: &DivisionSpec,
    lead: &Lead,
    opportunity: &Opportunity,
    now: DateTime<Utc>,
) -> MatchResult {
    let mut factors = Vec::with_capacity(spec.factors.len());
    let mut score: u16 = 0;

    for factor in spec.factors {
        let outcome = evaluate(&factor.rule, lead, opportunity, now);
        let points = outcome.points.min(factor.max_points);
        score += points;
        factors.push(FactorContribution {
            factor: factor.name.to_string(),
            points,
            status: status_for(points, factor.max_points, outcome.applicable),
        });
    }

    MatchResult {
        score,
        max_score: 100,
        rating: Rating::from_score(score),
        factors,
        recommendation: spec.recommendation.for_score(score).to_string(),
        estimate: estimate_for(spec, opportunity),
    }
}

/// Status tier from the fraction of the factor budget earned. Missing
/// comparison data is reported as n/a regardless of the fallback points.
fn status_for(points: u16, max_points: u16, applicable: bool) -> FactorStatus {
    if !applicable {
        return FactorStatus::NotApplicable;
    }
    if max_points == 0 {
        return FactorStatus::Poor;
    }
    let fraction = points as f64 / max_points as f64;
    if fraction >= 0.85 {
        FactorStatus::Excellent
    } else if fraction >= 0.60 {
        FactorStatus::Good
    } else if fraction >= 0.35 {
        FactorStatus::Fair
    } else {
        FactorStatus::Poor
    }
}

fn estimate_for(spec: &DivisionSpec, opportunity: &Opportunity) -> MatchEstimate {
    let Some(value) = opportunity.value else {
        return MatchEstimate::default();
    };
    match spec.estimate {
        EstimateKind::Commission => MatchEstimate {
            commission: Some(finance::commission(value, spec.commission_rate)),
            ..Default::default()
        },
        EstimateKind::FinancedPayment {
            default_annual_rate,
            default_term_months,
        } => {
            let term = opportunity.term_months.unwrap_or(default_term_months);
            MatchEstimate {
                commission: Some(finance::commission(value, spec.commission_rate)),
                monthly_payment: Some(finance::monthly_payment(value, default_annual_rate, term)),
                ..Default::default()
            }
        }
        EstimateKind::AnnualSavings { savings_rate } => {
            let savings = value * savings_rate;
            MatchEstimate {
                commission: Some(finance::commission(savings, spec.commission_rate)),
                annual_savings: Some(savings),
                ..Default::default()
            }
        }
        EstimateKind::PaybackPeriod {
            monthly_return_rate,
        } => MatchEstimate {
            commission: Some(finance::commission(value, spec.commission_rate)),
            payback_months: finance::payback_months(value, value * monthly_return_rate),
            ..Default::default()
        },
    }
}

fn evaluate(
    rule: &FactorRule,
    lead: &Lead,
    opportunity: &Opportunity,
    now: DateTime<Utc>,
) -> FactorOutcome {
    match rule {
        FactorRule::CodeOverlap {
            exact,
            prefix,
            miss,
            unknown,
        } => {
            if lead.codes.is_empty() || opportunity.codes.is_empty() {
                return FactorOutcome::missing(*unknown);
            }
            let lead_codes: Vec<String> =
                lead.codes.iter().map(|c| c.trim().to_lowercase()).collect();
            let opp_codes: Vec<String> = opportunity
                .codes
                .iter()
                .map(|c| c.trim().to_lowercase())
                .collect();
            if lead_codes.iter().any(|c| opp_codes.contains(c)) {
                return FactorOutcome::known(*exact);
            }
            let prefix_hit = lead_codes.iter().any(|lc| {
                opp_codes.iter().any(|oc| {
                    lc.len() >= 4 && oc.len() >= 4 && lc.as_bytes()[..4] == oc.as_bytes()[..4]
                })
            });
            if prefix_hit {
                FactorOutcome::known(*prefix)
            } else {
                FactorOutcome::known(*miss)
            }
        }
        FactorRule::CertificationLadder {
            ladder,
            meets,
            adjacent,
            miss,
        } => {
            let Some(required) = &opportunity.required_certification else {
                // Nothing required; any lead qualifies.
                return FactorOutcome::known(*meets);
            };
            let required = required.trim().to_lowercase();
            let required_rank = ladder.iter().position(|l| *l == required);
            let lead_rank = lead
                .certifications
                .iter()
                .filter_map(|c| {
                    let c = c.trim().to_lowercase();
                    ladder.iter().position(|l| *l == c)
                })
                .max();
            match (required_rank, lead_rank) {
                (Some(req), Some(held)) if held >= req => FactorOutcome::known(*meets),
                (Some(req), Some(held)) if req - held == 1 => FactorOutcome::known(*adjacent),
                (Some(_), _) => FactorOutcome::known(*miss),
                // Requirement outside the ladder: fall back to literal match.
                (None, _) => {
                    let held = lead
                        .certifications
                        .iter()
                        .any(|c| c.trim().to_lowercase() == required);
                    FactorOutcome::known(if held { *meets } else { *miss })
                }
            }
        }
        FactorRule::TrackRecordTable { table, unknown } => {
            let Some(record) = &lead.track_record else {
                return FactorOutcome::missing(*unknown);
            };
            let record = record.trim().to_lowercase();
            match table.iter().find(|(tier, _)| *tier == record) {
                Some((_, points)) => FactorOutcome::known(*points),
                None => FactorOutcome::missing(*unknown),
            }
        }
        FactorRule::SizeRatioBands { bands, unknown } => {
            let (Some(value), Some(revenue)) = (opportunity.value, lead.annual_revenue) else {
                return FactorOutcome::missing(*unknown);
            };
            if revenue <= 0.0 || value <= 0.0 {
                return FactorOutcome::missing(*unknown);
            }
            let ratio = value / revenue;
            match bands
                .iter()
                .find(|(lo, hi, _)| ratio >= *lo && ratio <= *hi)
            {
                Some((_, _, points)) => FactorOutcome::known(*points),
                None => FactorOutcome::missing(*unknown),
            }
        }
        FactorRule::BudgetFit {
            inside,
            near,
            outside,
            unknown,
        } => {
            let (Some(budget), Some(value)) = (lead.budget, opportunity.value) else {
                return FactorOutcome::missing(*unknown);
            };
            if budget <= 0.0 {
                return FactorOutcome::missing(*unknown);
            }
            if value <= budget {
                FactorOutcome::known(*inside)
            } else if value <= budget * 1.25 {
                FactorOutcome::known(*near)
            } else {
                FactorOutcome::known(*outside)
            }
        }
        FactorRule::Geography {
            exact,
            state,
            region,
            other,
            unknown,
        } => {
            let (Some(lead_loc), Some(opp_loc)) = (&lead.location, &opportunity.location) else {
                return FactorOutcome::missing(*unknown);
            };
            if lead_loc.trim().eq_ignore_ascii_case(opp_loc.trim()) {
                return FactorOutcome::known(*exact);
            }
            match (state_of(lead_loc), state_of(opp_loc)) {
                (Some(a), Some(b)) if a == b => FactorOutcome::known(*state),
                (Some(a), Some(b))
                    if region_of(&a).is_some() && region_of(&a) == region_of(&b) =>
                {
                    FactorOutcome::known(*region)
                }
                _ => FactorOutcome::known(*other),
            }
        }
        FactorRule::CreditBands { bands, unknown } => {
            let Some(score) = lead.credit_score else {
                return FactorOutcome::missing(*unknown);
            };
            match bands.iter().find(|(min, _)| score >= *min) {
                Some((_, points)) => FactorOutcome::known(*points),
                None => FactorOutcome::known(0),
            }
        }
        FactorRule::DeadlineBuckets {
            week,
            month,
            quarter,
            later,
            passed,
            unknown,
        } => {
            let Some(deadline) = opportunity.deadline else {
                return FactorOutcome::missing(*unknown);
            };
            let days = (deadline - now).num_days();
            let points = if days < 0 {
                *passed
            } else if days <= 7 {
                *week
            } else if days <= 30 {
                *month
            } else if days <= 90 {
                *quarter
            } else {
                *later
            };
            FactorOutcome::known(points)
        }
        FactorRule::IndustryMatch {
            exact,
            related,
            other,
            unknown,
        } => {
            let (Some(a), Some(b)) = (&lead.industry, &opportunity.industry) else {
                return FactorOutcome::missing(*unknown);
            };
            let la = a.trim().to_lowercase();
            let lb = b.trim().to_lowercase();
            if la == lb {
                FactorOutcome::known(*exact)
            } else if la.contains(&lb) || lb.contains(&la) || industries_related(a, b) {
                FactorOutcome::known(*related)
            } else {
                FactorOutcome::known(*other)
            }
        }
        FactorRule::TenureBands { bands, unknown } => {
            let Some(years) = lead.years_in_business else {
                return FactorOutcome::missing(*unknown);
            };
            match bands.iter().find(|(min, _)| years >= *min) {
                Some((_, points)) => FactorOutcome::known(*points),
                None => FactorOutcome::known(0),
            }
        }
        FactorRule::ValueBands { bands, unknown } => {
            let Some(value) = opportunity.value else {
                return FactorOutcome::missing(*unknown);
            };
            match bands
                .iter()
                .find(|(lo, hi, _)| value >= *lo && value <= *hi)
            {
                Some((_, _, points)) => FactorOutcome::known(*points),
                None => FactorOutcome::known(0),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lead, Opportunity};

    const TEST_FACTORS: &[FactorSpec] = &[
        FactorSpec {
            name: "Code Match",
            max_points: 60,
            rule: FactorRule::CodeOverlap {
                exact: 60,
                prefix: 35,
                miss: 10,
                unknown: 20,
            },
        },
        FactorSpec {
            name: "Geography",
            max_points: 40,
            rule: FactorRule::Geography {
                exact: 40,
                state: 30,
                region: 20,
                other: 10,
                unknown: 15,
            },
        },
    ];

    const TEST_SPEC: DivisionSpec = DivisionSpec {
        id: "test",
        name: "Test Division",
        commission_rate: 0.10,
        data_sources: &["fixtures"],
        factors: TEST_FACTORS,
        recommendation: RecommendationSpec {
            high_cutoff: 70,
            mid_cutoff: 50,
            high: "go",
            mid: "maybe",
            low: "no",
        },
        estimate: EstimateKind::Commission,
    };

    #[test]
    fn score_equals_sum_of_factor_points() {
        let lead = Lead {
            codes: vec!["541512".to_string()],
            location: Some("Austin, TX".to_string()),
            ..Default::default()
        };
        let opp = Opportunity {
            codes: vec!["541511".to_string()],
            location: Some("Dallas, TX".to_string()),
            value: Some(100_000.0),
            ..Default::default()
        };
        let result = score_match(&TEST_SPEC, &lead, &opp);
        // 4-digit prefix match (35) + same state (30).
        assert_eq!(result.score, 65);
        let sum: u16 = result.factors.iter().map(|f| f.points).sum();
        assert_eq!(result.score, sum);
        assert_eq!(result.recommendation, "maybe");
        assert_eq!(result.estimate.commission, Some(10_000.0));
    }

    #[test]
    fn missing_data_reports_not_applicable() {
        let lead = Lead::default();
        let opp = Opportunity::default();
        let result = score_match(&TEST_SPEC, &lead, &opp);
        assert!(result
            .factors
            .iter()
            .all(|f| f.status == FactorStatus::NotApplicable));
        // Unknown fallbacks: 20 + 15.
        assert_eq!(result.score, 35);
    }

    #[test]
    fn rating_cutoffs_are_exact_at_boundaries() {
        assert_eq!(Rating::from_score(80), Rating::Excellent);
        assert_eq!(Rating::from_score(79), Rating::Good);
        assert_eq!(Rating::from_score(60), Rating::Good);
        assert_eq!(Rating::from_score(59), Rating::Fair);
        assert_eq!(Rating::from_score(40), Rating::Fair);
        assert_eq!(Rating::from_score(39), Rating::Poor);
    }

    #[test]
    fn certification_ladder_honors_rank_order() {
        let rule = FactorRule::CertificationLadder {
            ladder: &["public trust", "secret", "top secret"],
            meets: 25,
            adjacent: 12,
            miss: 0,
        };
        let mut lead = Lead {
            certifications: vec!["Top Secret".to_string()],
            ..Default::default()
        };
        let opp = Opportunity {
            required_certification: Some("Secret".to_string()),
            ..Default::default()
        };
        let outcome = evaluate(&rule, &lead, &opp, Utc::now());
        assert_eq!(outcome.points, 25);

        lead.certifications = vec!["Public Trust".to_string()];
        let outcome = evaluate(&rule, &lead, &opp, Utc::now());
        assert_eq!(outcome.points, 12);

        lead.certifications.clear();
        let outcome = evaluate(&rule, &lead, &opp, Utc::now());
        assert_eq!(outcome.points, 0);
    }

    #[test]
    fn deadline_buckets_respect_clock() {
        let rule = FactorRule::DeadlineBuckets {
            week: 10,
            month: 8,
            quarter: 6,
            later: 4,
            passed: 0,
            unknown: 5,
        };
        let now = Utc::now();
        let lead = Lead::default();
        let mut opp = Opportunity {
            deadline: Some(now + chrono::Duration::days(5)),
            ..Default::default()
        };
        assert_eq!(evaluate(&rule, &lead, &opp, now).points, 10);
        opp.deadline = Some(now + chrono::Duration::days(45));
        assert_eq!(evaluate(&rule, &lead, &opp, now).points, 6);
        opp.deadline = Some(now - chrono::Duration::days(1));
        assert_eq!(evaluate(&rule, &lead, &opp, now).points, 0);
    }
}
