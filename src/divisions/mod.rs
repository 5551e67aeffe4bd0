//! The ten business divisions.
//!
//! Each submodule exports a static [`DivisionSpec`] (the factor point
//! table driving the scoring interpreter) and mock lead/opportunity
//! generators standing in for the division's real upstream data sources.

pub mod energy;
pub mod equipment_leasing;
pub mod franchise;
pub mod govcon;
pub mod grants;
pub mod insurance;
pub mod loans;
pub mod real_estate;
pub mod recruiting;
pub mod supply_chain;

use crate::models::{Lead, Opportunity, SearchCriteria};
use crate::scoring::DivisionSpec;

/// A division's spec plus its mock data generators, dispatchable without
/// knowing which division it is.
#[derive(Clone, Copy)]
pub struct DivisionHandle {
    pub spec: &'static DivisionSpec,
    pub leads: fn() -> Vec<Lead>,
    pub opportunities: fn() -> Vec<Opportunity>,
}

/// Every shipped division, in registry order.
pub const ALL: &[DivisionHandle] = &[
    DivisionHandle {
        spec: &govcon::SPEC,
        leads: govcon::leads,
        opportunities: govcon::opportunities,
    },
    DivisionHandle {
        spec: &real_estate::SPEC,
        leads: real_estate::leads,
        opportunities: real_estate::opportunities,
    },
    DivisionHandle {
        spec: &grants::SPEC,
        leads: grants::leads,
        opportunities: grants::opportunities,
    },
    DivisionHandle {
        spec: &franchise::SPEC,
        leads: franchise::leads,
        opportunities: franchise::opportunities,
    },
    DivisionHandle {
        spec: &equipment_leasing::SPEC,
        leads: equipment_leasing::leads,
        opportunities: equipment_leasing::opportunities,
    },
    DivisionHandle {
        spec: &supply_chain::SPEC,
        leads: supply_chain::leads,
        opportunities: supply_chain::opportunities,
    },
    DivisionHandle {
        spec: &recruiting::SPEC,
        leads: recruiting::leads,
        opportunities: recruiting::opportunities,
    },
    DivisionHandle {
        spec: &insurance::SPEC,
        leads: insurance::leads,
        opportunities: insurance::opportunities,
    },
    DivisionHandle {
        spec: &loans::SPEC,
        leads: loans::leads,
        opportunities: loans::opportunities,
    },
    DivisionHandle {
        spec: &energy::SPEC,
        leads: energy::leads,
        opportunities: energy::opportunities,
    },
];

/// Apply search criteria to a generated lead set. Records missing a field
/// a filter targets are dropped, not treated as wildcard matches.
pub fn filter_leads(leads: Vec<Lead>, criteria: &SearchCriteria) -> Vec<Lead> {
    let mut leads: Vec<Lead> = leads
        .into_iter()
        .filter(|lead| {
            if let Some(industry) = &criteria.industry {
                match &lead.industry {
                    Some(li) if contains_ci(li, industry) => {}
                    _ => return false,
                }
            }
            if let Some(location) = &criteria.location {
                match &lead.location {
                    Some(ll) if contains_ci(ll, location) => {}
                    _ => return false,
                }
            }
            if let Some(min_budget) = criteria.min_budget {
                match lead.budget {
                    Some(b) if b >= min_budget => {}
                    _ => return false,
                }
            }
            if let Some(keywords) = &criteria.keywords {
                let in_name = contains_ci(&lead.name, keywords);
                let in_industry = lead
                    .industry
                    .as_deref()
                    .is_some_and(|i| contains_ci(i, keywords));
                if !in_name && !in_industry {
                    return false;
                }
            }
            true
        })
        .collect();
    if let Some(limit) = criteria.limit {
        leads.truncate(limit);
    }
    leads
}

/// Apply search criteria to a generated opportunity set.
pub fn filter_opportunities(
    opportunities: Vec<Opportunity>,
    criteria: &SearchCriteria,
) -> Vec<Opportunity> {
    let mut opportunities: Vec<Opportunity> = opportunities
        .into_iter()
        .filter(|opp| {
            if let Some(industry) = &criteria.industry {
                match &opp.industry {
                    Some(oi) if contains_ci(oi, industry) => {}
                    _ => return false,
                }
            }
            if let Some(location) = &criteria.location {
                match &opp.location {
                    Some(ol) if contains_ci(ol, location) => {}
                    _ => return false,
                }
            }
            if let Some(max_value) = criteria.max_value {
                match opp.value {
                    Some(v) if v <= max_value => {}
                    _ => return false,
                }
            }
            if let Some(keywords) = &criteria.keywords {
                if !contains_ci(&opp.title, keywords) {
                    return false;
                }
            }
            true
        })
        .collect();
    if let Some(limit) = criteria.limit {
        opportunities.truncate(limit);
    }
    opportunities
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_division_budget_sums_to_one_hundred() {
        for handle in ALL {
            assert_eq!(
                handle.spec.max_score(),
                100,
                "division '{}' factor budget must sum to 100",
                handle.spec.id
            );
        }
    }

    #[test]
    fn division_ids_are_unique() {
        let mut ids: Vec<&str> = ALL.iter().map(|h| h.spec.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ALL.len());
    }

    #[test]
    fn every_division_generates_mock_data() {
        for handle in ALL {
            let leads = (handle.leads)();
            let opportunities = (handle.opportunities)();
            assert!(!leads.is_empty(), "{} has no mock leads", handle.spec.id);
            assert!(
                !opportunities.is_empty(),
                "{} has no mock opportunities",
                handle.spec.id
            );
            assert!(leads.iter().all(|l| l.division_id == handle.spec.id));
            assert!(opportunities.iter().all(|o| o.division_id == handle.spec.id));
        }
    }

    #[test]
    fn criteria_filters_compose() {
        let leads = (govcon::leads)();
        let filtered = filter_leads(
            leads,
            &SearchCriteria {
                location: Some("VA".to_string()),
                limit: Some(2),
                ..Default::default()
            },
        );
        assert!(filtered.len() <= 2);
        assert!(filtered
            .iter()
            .all(|l| l.location.as_deref().unwrap_or("").contains("VA")));
    }
}
