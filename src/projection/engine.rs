//! Core projection engine for month-by-month deal projections

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::snapshot::{CashOnCash, MonthlySnapshot, ProjectionResult, ProjectionSummary};
use super::state::ProjectionState;
use super::validation::{validate, MAX_PROJECTION_MONTHS};
use crate::deal::{
    event_at, Acquisition, CapitalComponent, ExpenseCategory, ExpenseChange, ExpenseChangeEvent,
    Operation, RefinanceEvent, RentChangeEvent, ValueChangeEvent,
};
use crate::error::ValidationError;
use crate::finance::{amortize_month, calculate_refinance, RefinanceParams};

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionConfig {
    pub acquisition: Acquisition,
    pub operation: Operation,

    /// Number of months to project
    pub projection_months: u32,

    #[serde(default)]
    pub refinance_events: Vec<RefinanceEvent>,

    #[serde(default)]
    pub property_value_changes: Vec<ValueChangeEvent>,

    #[serde(default)]
    pub rent_change_events: Vec<RentChangeEvent>,

    #[serde(default)]
    pub expense_change_events: Vec<ExpenseChangeEvent>,

    /// Components funded by a constant monthly capital reserve
    #[serde(default, alias = "capitalExpenseEvents")]
    pub capital_components: Vec<CapitalComponent>,
}

impl ProjectionConfig {
    /// Configuration with no scheduled events or capital components
    pub fn new(acquisition: Acquisition, operation: Operation, projection_months: u32) -> Self {
        Self {
            acquisition,
            operation,
            projection_months,
            refinance_events: Vec::new(),
            property_value_changes: Vec::new(),
            rent_change_events: Vec::new(),
            expense_change_events: Vec::new(),
            capital_components: Vec::new(),
        }
    }
}

/// Run a full projection for one deal
pub fn generate_projection(config: &ProjectionConfig) -> Result<ProjectionResult, ValidationError> {
    ProjectionEngine::new(config)?.run()
}

/// Main projection engine
///
/// Borrows the configuration for the duration of a run and never mutates
/// it; every snapshot holds its own copy of the expense vector.
pub struct ProjectionEngine<'a> {
    config: &'a ProjectionConfig,
}

impl<'a> ProjectionEngine<'a> {
    /// Validate a configuration and prepare to project it
    pub fn new(config: &'a ProjectionConfig) -> Result<Self, ValidationError> {
        validate(config)?;
        Ok(Self { config })
    }

    /// Project every month and derive the summary
    pub fn run(&self) -> Result<ProjectionResult, ValidationError> {
        let months = self.config.projection_months;
        let mut snapshots = Vec::with_capacity(months as usize);
        let mut state = ProjectionState::from_config(self.config);

        for _month in 1..=months {
            let (next, snapshot) = self.step(&state);
            snapshots.push(snapshot);
            state = next;
        }

        let summary = ProjectionSummary::from_snapshots(&snapshots).ok_or(
            ValidationError::ProjectionLength {
                months,
                max: MAX_PROJECTION_MONTHS,
            },
        )?;

        info!(
            "projected {} months: cash flow {:.2}, remaining investment {:.2}, successful BRRRR {}",
            snapshots.len(),
            summary.total_cash_flow,
            summary.remaining_investment,
            summary.successful_brrrr
        );

        Ok(ProjectionResult {
            monthly_snapshots: snapshots,
            summary,
        })
    }

    /// Advance one month: apply events, compute cash flow, service debt.
    ///
    /// Returns the state after the month and the snapshot recording it.
    pub fn step(&self, prior: &ProjectionState) -> (ProjectionState, MonthlySnapshot) {
        let mut state = prior.clone();
        state.month = prior.month + 1;
        let month = state.month;

        // Events, in a fixed order; the last applied sets the description
        let mut description = None;
        let mut one_time_expense = 0.0;

        if let Some(event) = event_at(&self.config.refinance_events, month) {
            description = Some(self.apply_refinance(&mut state, event));
        }
        if let Some(event) = event_at(&self.config.property_value_changes, month) {
            description = Some(self.apply_value_change(&mut state, event));
        }
        if let Some(event) = event_at(&self.config.rent_change_events, month) {
            description = Some(self.apply_rent_change(&mut state, event));
        }
        if let Some((category, new_amount)) = self.monthly_expense_change_at(month) {
            description = Some(self.apply_expense_change(&mut state, category, new_amount));
        }
        if let Some((label, amount)) = self.one_time_expense_at(month) {
            debug!("month {}: one-time expense {} of {:.2}", month, label, amount);
            one_time_expense = amount;
            description = Some(format!("One-time expense: {} (${:.2})", label, amount));
        }
        if month == 1 && state.expenses.capital_reserves > 0.0 {
            description = Some(format!(
                "Started monthly capital expense budgeting: ${:.2}/month",
                state.expenses.capital_reserves
            ));
        }

        let in_rehab = state.in_rehab();
        let income = state.income(self.config.operation.other_monthly_income);
        let holding = self.config.acquisition.include_holding_costs.as_ref();

        // Debt service, only when the payment was actually made this month.
        // The payoff month is charged what was owed, not the full payment.
        let mut expenses = state.expenses;
        let mortgage_paid = !in_rehab || holding.map_or(true, |h| h.mortgage);
        if mortgage_paid && state.loan_balance > 0.0 && expenses.mortgage > 0.0 {
            let step = amortize_month(state.loan_balance, state.loan_monthly_rate, expenses.mortgage);
            expenses = expenses.with_amount(ExpenseCategory::Mortgage, step.payment);
            state.loan_balance = step.ending_balance;
            if state.loan_balance <= 0.0 {
                debug!("month {}: loan paid off", month);
                state.expenses = state.expenses.with_amount(ExpenseCategory::Mortgage, 0.0);
            }
        }

        let recurring = if in_rehab {
            expenses.holding_total(holding)
        } else {
            expenses.total()
        };
        let cash_flow = income.total() - recurring - one_time_expense;
        state.cumulative_cash_flow += cash_flow;

        if in_rehab {
            state.rehab_months_remaining -= 1;
            if state.rehab_months_remaining == 0 {
                description =
                    Some("Rehabilitation completed, property ready for rental".to_string());
            }
        }

        let snapshot = MonthlySnapshot {
            month,
            property_value: state.property_value,
            total_investment: state.total_investment,
            remaining_investment: state.remaining_investment,
            loan_balance: state.loan_balance,
            monthly_income: income,
            monthly_expenses: expenses,
            one_time_expense,
            cash_flow,
            total_cash_flow: state.cumulative_cash_flow,
            equity: state.equity(),
            cash_on_cash: CashOnCash::from_cash_flow(cash_flow, state.remaining_investment),
            event_description: description,
        };

        (state, snapshot)
    }

    fn apply_refinance(&self, state: &mut ProjectionState, event: &RefinanceEvent) -> String {
        state.property_value = event.after_repair_value;

        let outcome = calculate_refinance(&RefinanceParams {
            after_repair_value: event.after_repair_value,
            total_investment: state.remaining_investment,
            refinance_ltv: event.refinance_ltv,
            refinance_rate: event.refinance_rate,
            refinance_term_years: event.refinance_term_years,
            refinance_closing_costs: event.refinance_closing_costs,
        });

        debug!(
            "month {}: refinance to {:.0} loan, {:.2} recouped, {:.2} still invested",
            event.month, outcome.new_loan_amount, outcome.cash_recouped, outcome.remaining_investment
        );

        state.loan_balance = outcome.new_loan_amount;
        state.loan_monthly_rate = event.refinance_rate / 12.0;
        state.remaining_investment = outcome.remaining_investment;
        state.expenses = state
            .expenses
            .with_amount(ExpenseCategory::Mortgage, outcome.new_monthly_payment);

        let mut description = format!(
            "Refinanced property at {}% LTV",
            (event.refinance_ltv * 100.0).round()
        );
        if outcome.is_brrrr_successful {
            description.push_str(" - Successfully pulled out all capital");
        }
        description
    }

    fn apply_value_change(&self, state: &mut ProjectionState, event: &ValueChangeEvent) -> String {
        debug!("month {}: property value {:.2}", event.month, event.new_value);
        state.property_value = event.new_value;
        format!("Property value changed to ${:.2}", event.new_value)
    }

    /// New rent re-derives the rent-proportional expense lines
    fn apply_rent_change(&self, state: &mut ProjectionState, event: &RentChangeEvent) -> String {
        debug!("month {}: rent {:.2}", event.month, event.new_rent);
        let operation = &self.config.operation;
        state.current_rent = event.new_rent;
        state.expenses = state
            .expenses
            .with_amount(
                ExpenseCategory::PropertyManagement,
                operation.management_fee(event.new_rent),
            )
            .with_amount(
                ExpenseCategory::VacancyAllowance,
                operation.vacancy_allowance(event.new_rent),
            );
        format!("Rent changed to ${:.2} per month", event.new_rent)
    }

    fn apply_expense_change(
        &self,
        state: &mut ProjectionState,
        category: ExpenseCategory,
        new_amount: f64,
    ) -> String {
        debug!("month {}: {} expense {:.2}", state.month, category, new_amount);
        state.expenses = state.expenses.with_amount(category, new_amount);
        format!("{} expense changed to ${:.2}", category, new_amount)
    }

    /// Last monthly-amount override scheduled for `month`
    fn monthly_expense_change_at(&self, month: u32) -> Option<(ExpenseCategory, f64)> {
        self.config
            .expense_change_events
            .iter()
            .rev()
            .filter(|e| e.month == month)
            .find_map(|e| match &e.change {
                ExpenseChange::SetMonthly { category, new_amount } => Some((*category, *new_amount)),
                ExpenseChange::OneTime { .. } => None,
            })
    }

    /// Last lump-sum expense scheduled for `month`
    fn one_time_expense_at(&self, month: u32) -> Option<(&str, f64)> {
        self.config
            .expense_change_events
            .iter()
            .rev()
            .filter(|e| e.month == month)
            .find_map(|e| match &e.change {
                ExpenseChange::OneTime { description, amount } => Some((description.as_str(), *amount)),
                ExpenseChange::SetMonthly { .. } => None,
            })
    }
}
