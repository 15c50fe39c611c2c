//! Running financial state of a deal during projection

use crate::deal::{MonthlyExpenses, MonthlyIncome};
use crate::finance::total_monthly_reserve;

use super::engine::ProjectionConfig;

/// State of a deal at the end of a projection month.
///
/// The engine never mutates a state in place across months: each step
/// clones the prior state and returns the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionState {
    /// Last completed projection month (0 before the first)
    pub month: u32,

    pub property_value: f64,

    /// Outstanding loan principal
    pub loan_balance: f64,

    /// Monthly interest rate on the current loan
    pub loan_monthly_rate: f64,

    /// Capital committed at acquisition
    pub total_investment: f64,

    /// Capital not yet recovered through refinance proceeds
    pub remaining_investment: f64,

    pub current_rent: f64,

    /// Running monthly expense vector
    pub expenses: MonthlyExpenses,

    /// Renovation months still to go; 0 once the property is operating
    pub rehab_months_remaining: u32,

    pub cumulative_cash_flow: f64,
}

impl ProjectionState {
    /// Initialize state from a deal at projection start
    pub fn from_config(config: &ProjectionConfig) -> Self {
        let acquisition = &config.acquisition;
        let operation = &config.operation;
        let rent = operation.monthly_rent;
        let total_investment = acquisition.total_investment();

        Self {
            month: 0,
            property_value: acquisition.purchase_price,
            loan_balance: acquisition.loan_amount(),
            loan_monthly_rate: acquisition.purchase_loan_rate.unwrap_or(0.0) / 12.0,
            total_investment,
            remaining_investment: total_investment,
            current_rent: rent,
            expenses: MonthlyExpenses {
                mortgage: acquisition.mortgage_payment(),
                taxes: operation.monthly_taxes(),
                insurance: operation.monthly_insurance(),
                maintenance: operation.maintenance,
                property_management: operation.management_fee(rent),
                utilities: operation.utilities,
                vacancy_allowance: operation.vacancy_allowance(rent),
                other_expenses: operation.other_expenses,
                capital_reserves: total_monthly_reserve(&config.capital_components),
            },
            rehab_months_remaining: acquisition.rehab_duration_months,
            cumulative_cash_flow: 0.0,
        }
    }

    /// Whether the upcoming month is a renovation month
    pub fn in_rehab(&self) -> bool {
        self.rehab_months_remaining > 0
    }

    /// Income earned this month: nothing while renovating
    pub fn income(&self, other_monthly_income: f64) -> MonthlyIncome {
        if self.in_rehab() {
            MonthlyIncome::default()
        } else {
            MonthlyIncome {
                rent: self.current_rent,
                other_income: other_monthly_income,
            }
        }
    }

    pub fn equity(&self) -> f64 {
        self.property_value - self.loan_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::{Acquisition, CapitalComponent, Operation};
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_state() {
        let mut acquisition = Acquisition::cash(100_000.0, 3_000.0);
        acquisition.rehab_costs = 25_000.0;
        acquisition.rehab_duration_months = 2;
        acquisition.purchase_loan_amount = Some(75_000.0);
        acquisition.purchase_loan_rate = Some(0.06);
        acquisition.purchase_loan_term_years = Some(30);

        let operation = Operation {
            annual_property_taxes: 2_400.0,
            property_management_pct: 10.0,
            ..Operation::rent_only(1_200.0)
        };

        let mut config = ProjectionConfig::new(acquisition, operation, 12);
        config.capital_components.push(CapitalComponent::new("Roof", 25.0, 15_000.0));

        let state = ProjectionState::from_config(&config);
        assert_eq!(state.month, 0);
        assert_relative_eq!(state.total_investment, 128_000.0);
        assert_relative_eq!(state.remaining_investment, 128_000.0);
        assert_relative_eq!(state.loan_balance, 75_000.0);
        assert_relative_eq!(state.loan_monthly_rate, 0.005);
        assert_relative_eq!(state.expenses.mortgage, 449.66, epsilon = 0.01);
        assert_relative_eq!(state.expenses.taxes, 200.0);
        assert_relative_eq!(state.expenses.property_management, 120.0);
        assert_relative_eq!(state.expenses.capital_reserves, 50.0);
        assert_relative_eq!(state.equity(), 25_000.0);
        assert!(state.in_rehab());
        assert_eq!(state.income(50.0), MonthlyIncome::default());
    }
}
