//! Scenario runner for comparing deals and deal variants
//!
//! Holds a base deal, runs variants of it, and runs whole batches of deals
//! in parallel. Projections share nothing mutable, so batches parallelize
//! without locking.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::projection::{generate_projection, ProjectionConfig, ProjectionResult};

/// Runner built around a base deal configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(load_config("deal.json")?);
///
/// // Same deal, different refinance values
/// for arv in [150_000.0, 165_000.0, 180_000.0] {
///     let result = runner.run_variant(|c| c.refinance_events[0].after_repair_value = arv)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: ProjectionConfig,
}

impl ScenarioRunner {
    pub fn new(base: ProjectionConfig) -> Self {
        Self { base }
    }

    /// Project the base deal
    pub fn run(&self) -> Result<ProjectionResult, ValidationError> {
        generate_projection(&self.base)
    }

    /// Project a copy of the base deal modified by `adjust`
    pub fn run_variant<F>(&self, adjust: F) -> Result<ProjectionResult, ValidationError>
    where
        F: FnOnce(&mut ProjectionConfig),
    {
        let mut config = self.base.clone();
        adjust(&mut config);
        generate_projection(&config)
    }

    /// Project several variants of the base deal in parallel, in input order
    pub fn run_variants<F>(&self, adjustments: &[F]) -> Vec<Result<ProjectionResult, ValidationError>>
    where
        F: Fn(&mut ProjectionConfig) + Sync,
    {
        adjustments
            .par_iter()
            .map(|adjust| self.run_variant(adjust))
            .collect()
    }

    /// Get reference to the base deal
    pub fn base(&self) -> &ProjectionConfig {
        &self.base
    }
}

/// Project independent deals in parallel; results keep input order
pub fn run_batch(configs: &[ProjectionConfig]) -> Vec<Result<ProjectionResult, ValidationError>> {
    configs.par_iter().map(generate_projection).collect()
}

/// Change in a projection between two months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthComparison {
    pub from_month: u32,
    pub to_month: u32,
    pub property_value_change: f64,
    pub equity_change: f64,
    pub loan_balance_change: f64,
    pub remaining_investment_change: f64,
    /// Cash flow earned over months `from_month + 1 ..= to_month`
    pub cash_flow_between: f64,
    pub monthly_cash_flow_change: f64,
}

/// Compare two months of one projection (`to` minus `from`)
pub fn compare_months(result: &ProjectionResult, from: u32, to: u32) -> Option<MonthComparison> {
    let a = result.snapshot(from)?;
    let b = result.snapshot(to)?;

    Some(MonthComparison {
        from_month: from,
        to_month: to,
        property_value_change: b.property_value - a.property_value,
        equity_change: b.equity - a.equity,
        loan_balance_change: b.loan_balance - a.loan_balance,
        remaining_investment_change: b.remaining_investment - a.remaining_investment,
        cash_flow_between: b.total_cash_flow - a.total_cash_flow,
        monthly_cash_flow_change: b.cash_flow - a.cash_flow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::{Acquisition, Operation, RefinanceEvent, ValueChangeEvent};
    use approx::assert_relative_eq;

    fn test_deal() -> ProjectionConfig {
        let mut acquisition = Acquisition::cash(100_000.0, 3_000.0);
        acquisition.rehab_costs = 25_000.0;
        acquisition.rehab_duration_months = 2;

        let mut config = ProjectionConfig::new(acquisition, Operation::rent_only(1_200.0), 24);
        config.refinance_events.push(RefinanceEvent {
            month: 3,
            after_repair_value: 150_000.0,
            refinance_ltv: 0.75,
            refinance_rate: 0.05,
            refinance_term_years: 30,
            refinance_closing_costs: 3_500.0,
        });
        config
    }

    #[test]
    fn test_variant_leaves_base_alone() {
        let runner = ScenarioRunner::new(test_deal());
        let better = runner
            .run_variant(|c| c.refinance_events[0].after_repair_value = 180_000.0)
            .unwrap();

        assert!(better.summary.successful_brrrr);
        assert_eq!(runner.base().refinance_events[0].after_repair_value, 150_000.0);
        assert!(!runner.run().unwrap().summary.successful_brrrr);
    }

    #[test]
    fn test_run_variants_in_order() {
        let runner = ScenarioRunner::new(test_deal());
        let arvs = [140_000.0, 160_000.0, 180_000.0];
        let adjustments: Vec<_> = arvs
            .iter()
            .map(|&arv| move |c: &mut ProjectionConfig| c.refinance_events[0].after_repair_value = arv)
            .collect();

        let results = runner.run_variants(&adjustments);
        assert_eq!(results.len(), 3);

        let remaining: Vec<f64> = results
            .iter()
            .map(|r| r.as_ref().unwrap().summary.remaining_investment)
            .collect();
        assert!(remaining[0] > remaining[1]);
        assert!(remaining[1] > remaining[2] || remaining[2] == 0.0);
    }

    #[test]
    fn test_batch_matches_sequential_runs() {
        let mut second = test_deal();
        second.operation.monthly_rent = 1_450.0;
        let mut invalid = test_deal();
        invalid.projection_months = 0;

        let configs = vec![test_deal(), second, invalid];
        let results = run_batch(&configs);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &generate_projection(&configs[0]).unwrap());
        assert_eq!(results[1].as_ref().unwrap(), &generate_projection(&configs[1]).unwrap());
        assert!(results[2].is_err());
    }

    #[test]
    fn test_compare_months() {
        let mut config = test_deal();
        config
            .property_value_changes
            .push(ValueChangeEvent { month: 12, new_value: 160_000.0 });
        let result = generate_projection(&config).unwrap();

        let comparison = compare_months(&result, 1, 12).unwrap();
        assert_relative_eq!(comparison.property_value_change, 60_000.0);
        assert_relative_eq!(comparison.remaining_investment_change, -109_000.0);
        assert_relative_eq!(
            comparison.cash_flow_between,
            result.snapshot(12).unwrap().total_cash_flow - result.snapshot(1).unwrap().total_cash_flow
        );
        assert!(comparison.loan_balance_change > 100_000.0);

        assert!(compare_months(&result, 0, 12).is_none());
        assert!(compare_months(&result, 1, 25).is_none());
    }
}
