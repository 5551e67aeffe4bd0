//! Division registry: one instance per process, constructed at startup and
//! handed to request handlers through shared state. Fan-out operations run
//! each enabled division on its own task and isolate per-division failures;
//! one bad division must never fail a universal search.

use crate::divisions::{self, DivisionHandle};
use crate::errors::AppError;
use crate::finance;
use crate::models::{
    DivisionSummary, Lead, MatchResult, Opportunity, SearchCriteria, UniversalSearchResult,
};
use crate::scoring::{self, DivisionSpec};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinSet;

/// A registered division: static spec plus the only mutable bit of state
/// in the platform, the enabled flag.
pub struct Division {
    handle: DivisionHandle,
    enabled: AtomicBool,
}

impl Division {
    fn new(handle: DivisionHandle) -> Self {
        Self {
            handle,
            enabled: AtomicBool::new(true),
        }
    }

    pub fn spec(&self) -> &'static DivisionSpec {
        self.handle.spec
    }

    pub fn id(&self) -> &'static str {
        self.handle.spec.id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Generate mock leads and apply the search criteria.
    pub fn find_leads(&self, criteria: &SearchCriteria) -> Result<Vec<Lead>, AppError> {
        Ok(divisions::filter_leads((self.handle.leads)(), criteria))
    }

    /// Generate mock opportunities and apply the search criteria.
    pub fn find_opportunities(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<Opportunity>, AppError> {
        Ok(divisions::filter_opportunities(
            (self.handle.opportunities)(),
            criteria,
        ))
    }

    /// Score a lead/opportunity pair against this division's factor table.
    pub fn score_match(&self, lead: &Lead, opportunity: &Opportunity) -> MatchResult {
        scoring::score_match(self.handle.spec, lead, opportunity)
    }

    /// Commission owed on a deal value at this division's default rate.
    pub fn calculate_commission(&self, value: f64) -> f64 {
        finance::commission(value, self.handle.spec.commission_rate)
    }

    pub fn summary(&self) -> DivisionSummary {
        let spec = self.handle.spec;
        DivisionSummary {
            id: spec.id.to_string(),
            name: spec.name.to_string(),
            enabled: self.is_enabled(),
            commission_rate: spec.commission_rate,
            data_sources: spec.data_sources.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Outcome of one division's leg of a fan-out operation.
#[derive(Debug)]
pub struct DivisionOutcome<T> {
    pub division_id: String,
    pub result: Result<T, String>,
}

pub struct DivisionRegistry {
    divisions: BTreeMap<&'static str, Arc<Division>>,
}

impl Default for DivisionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DivisionRegistry {
    /// Register every shipped division, all enabled.
    pub fn new() -> Self {
        let divisions = divisions::ALL
            .iter()
            .map(|handle| (handle.spec.id, Arc::new(Division::new(*handle))))
            .collect();
        Self { divisions }
    }

    pub fn get(&self, id: &str) -> Option<Arc<Division>> {
        self.divisions.get(id).cloned()
    }

    /// Like [`get`](Self::get) but mapping absence to the API's 404.
    pub fn require(&self, id: &str) -> Result<Arc<Division>, AppError> {
        self.get(id)
            .ok_or_else(|| AppError::NotFound(format!("Division '{}' not registered", id)))
    }

    pub fn summaries(&self) -> Vec<DivisionSummary> {
        self.divisions.values().map(|d| d.summary()).collect()
    }

    pub fn enabled_divisions(&self) -> Vec<Arc<Division>> {
        self.divisions
            .values()
            .filter(|d| d.is_enabled())
            .cloned()
            .collect()
    }

    /// Run `op` against every enabled division concurrently. A failing or
    /// panicking division produces an error outcome for that division only;
    /// the rest of the batch is unaffected. Outcomes are sorted by division
    /// id for stable responses.
    pub async fn execute_all<T, F>(&self, op: F) -> Vec<DivisionOutcome<T>>
    where
        T: Send + 'static,
        F: Fn(Arc<Division>) -> Result<T, AppError> + Clone + Send + Sync + 'static,
    {
        let mut set = JoinSet::new();
        for division in self.enabled_divisions() {
            let op = op.clone();
            let id = division.id().to_string();
            set.spawn(async move { (id, op(division)) });
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((division_id, Ok(value))) => outcomes.push(DivisionOutcome {
                    division_id,
                    result: Ok(value),
                }),
                Ok((division_id, Err(err))) => {
                    tracing::warn!(division = %division_id, error = %err, "division operation failed");
                    outcomes.push(DivisionOutcome {
                        division_id,
                        result: Err(err.to_string()),
                    });
                }
                Err(join_err) => {
                    // Panic inside a division task; the division id is lost
                    // with the task, so this can only be logged.
                    tracing::error!(error = %join_err, "division task panicked during fan-out");
                }
            }
        }
        outcomes.sort_by(|a, b| a.division_id.cmp(&b.division_id));
        outcomes
    }

    /// Fan out `find_leads` + `find_opportunities` across every enabled
    /// division and concatenate the successes. Failed divisions are dropped
    /// from the result lists and surfaced per-division in `errors`.
    pub async fn universal_search(&self, criteria: SearchCriteria) -> UniversalSearchResult {
        let outcomes = self
            .execute_all(move |division| {
                let leads = division.find_leads(&criteria)?;
                let opportunities = division.find_opportunities(&criteria)?;
                Ok((leads, opportunities))
            })
            .await;

        let mut result = UniversalSearchResult::default();
        for outcome in outcomes {
            match outcome.result {
                Ok((leads, opportunities)) => {
                    result.leads.extend(leads);
                    result.opportunities.extend(opportunities);
                }
                Err(err) => {
                    result.errors.insert(outcome.division_id, err);
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn universal_search_covers_all_enabled_divisions() {
        let registry = DivisionRegistry::new();
        let result = registry.universal_search(SearchCriteria::default()).await;
        assert!(result.errors.is_empty());
        assert!(!result.leads.is_empty());
        assert!(!result.opportunities.is_empty());
        // Every registered division contributed leads.
        let mut division_ids: Vec<&str> =
            result.leads.iter().map(|l| l.division_id.as_str()).collect();
        division_ids.sort_unstable();
        division_ids.dedup();
        assert_eq!(division_ids.len(), crate::divisions::ALL.len());
    }

    #[tokio::test]
    async fn universal_search_with_all_divisions_disabled_is_empty() {
        let registry = DivisionRegistry::new();
        for summary in registry.summaries() {
            registry.get(&summary.id).unwrap().set_enabled(false);
        }
        let result = registry.universal_search(SearchCriteria::default()).await;
        assert!(result.leads.is_empty());
        assert!(result.opportunities.is_empty());
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn disabled_division_is_skipped_by_fan_out() {
        let registry = DivisionRegistry::new();
        registry.get("govcon").unwrap().set_enabled(false);
        let result = registry.universal_search(SearchCriteria::default()).await;
        assert!(result.leads.iter().all(|l| l.division_id != "govcon"));
    }

    #[tokio::test]
    async fn failing_division_does_not_abort_the_batch() {
        let registry = DivisionRegistry::new();
        let outcomes = registry
            .execute_all(|division| {
                if division.id() == "loans" {
                    Err(AppError::InternalError("upstream feed offline".to_string()))
                } else {
                    Ok(division.id())
                }
            })
            .await;
        assert_eq!(outcomes.len(), crate::divisions::ALL.len());
        let failed: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].division_id, "loans");
    }

    #[test]
    fn unknown_division_maps_to_not_found() {
        let registry = DivisionRegistry::new();
        assert!(matches!(
            registry.require("timeshares"),
            Err(AppError::NotFound(_))
        ));
    }
}
