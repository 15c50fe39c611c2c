//! Configuration checks run before any month is simulated

use crate::deal::ExpenseChange;
use crate::error::ValidationError;

use super::engine::ProjectionConfig;

/// Longest supported projection (20 years)
pub const MAX_PROJECTION_MONTHS: u32 = 240;

/// Highest annual loan rate accepted, as a decimal
pub const MAX_LOAN_RATE: f64 = 1.0;

/// Longest loan term accepted
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

/// Reject a configuration that would produce a partial or NaN-laden projection
pub fn validate(config: &ProjectionConfig) -> Result<(), ValidationError> {
    if config.projection_months < 1 || config.projection_months > MAX_PROJECTION_MONTHS {
        return Err(ValidationError::ProjectionLength {
            months: config.projection_months,
            max: MAX_PROJECTION_MONTHS,
        });
    }

    let acquisition = &config.acquisition;
    amount("acquisition.purchasePrice", acquisition.purchase_price)?;
    amount("acquisition.closingCosts", acquisition.closing_costs)?;
    amount("acquisition.rehabCosts", acquisition.rehab_costs)?;
    if let Some(other) = acquisition.other_initial_costs {
        amount("acquisition.otherInitialCosts", other)?;
    }

    if let Some(loan) = acquisition.purchase_loan_amount {
        amount("acquisition.purchaseLoanAmount", loan)?;
        match (acquisition.purchase_loan_rate, acquisition.purchase_loan_term_years) {
            (Some(rate), Some(term)) => {
                if !rate.is_finite() {
                    return Err(ValidationError::NonFinite {
                        field: "acquisition.purchaseLoanRate",
                    });
                }
                if let Err(reason) = loan_terms(rate, term) {
                    return Err(ValidationError::InvalidLoanTerms(reason));
                }
            }
            _ => return Err(ValidationError::IncompleteLoan { amount: loan }),
        }
    }

    let operation = &config.operation;
    amount("operation.monthlyRent", operation.monthly_rent)?;
    amount("operation.otherMonthlyIncome", operation.other_monthly_income)?;
    amount("operation.propertyTaxes", operation.annual_property_taxes)?;
    amount("operation.insurance", operation.annual_insurance)?;
    amount("operation.maintenance", operation.maintenance)?;
    amount("operation.utilities", operation.utilities)?;
    amount("operation.otherExpenses", operation.other_expenses)?;
    percent("operation.propertyManagement", operation.property_management_pct)?;
    percent("operation.vacancyRate", operation.vacancy_pct)?;

    for event in &config.refinance_events {
        event_month("refinance", event.month)?;
        amount("refinanceEvents.afterRepairValue", event.after_repair_value)?;
        amount("refinanceEvents.refinanceClosingCosts", event.refinance_closing_costs)?;
        if !event.refinance_rate.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "refinanceEvents.refinanceRate",
            });
        }
        if !(event.refinance_ltv > 0.0 && event.refinance_ltv <= 1.0) {
            return Err(ValidationError::InvalidRefinance {
                month: event.month,
                reason: format!("loan-to-value must be in (0, 1], got {}", event.refinance_ltv),
            });
        }
        if let Err(reason) = loan_terms(event.refinance_rate, event.refinance_term_years) {
            return Err(ValidationError::InvalidRefinance {
                month: event.month,
                reason,
            });
        }
    }

    for event in &config.property_value_changes {
        event_month("property value", event.month)?;
        amount("propertyValueChanges.newValue", event.new_value)?;
    }

    for event in &config.rent_change_events {
        event_month("rent change", event.month)?;
        amount("rentChangeEvents.newRent", event.new_rent)?;
    }

    for event in &config.expense_change_events {
        event_month("expense change", event.month)?;
        match &event.change {
            ExpenseChange::SetMonthly { new_amount, .. } => {
                amount("expenseChangeEvents.newAmount", *new_amount)?
            }
            ExpenseChange::OneTime { amount: lump, .. } => {
                amount("expenseChangeEvents.amount", *lump)?
            }
        }
    }

    for component in &config.capital_components {
        amount("capitalComponents.replacementCost", component.replacement_cost)?;
        amount("capitalComponents.lifespanYears", component.lifespan_years)?;
        amount("capitalComponents.ageYears", component.age_years)?;
    }

    Ok(())
}

fn amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    Ok(())
}

/// Rate and term of a fixed-rate loan; the rate must already be finite
fn loan_terms(rate: f64, term_years: u32) -> Result<(), String> {
    if !(0.0..=MAX_LOAN_RATE).contains(&rate) {
        return Err(format!(
            "rate must be a decimal between 0 and {} (got {})",
            MAX_LOAN_RATE, rate
        ));
    }
    if term_years == 0 || term_years > MAX_LOAN_TERM_YEARS {
        return Err(format!(
            "term must be between 1 and {} years (got {})",
            MAX_LOAN_TERM_YEARS, term_years
        ));
    }
    Ok(())
}

fn percent(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::PercentOutOfRange { field, value });
    }
    Ok(())
}

fn event_month(kind: &'static str, month: u32) -> Result<(), ValidationError> {
    if month < 1 {
        return Err(ValidationError::EventMonth { kind });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::{
        Acquisition, CapitalComponent, ExpenseCategory, ExpenseChangeEvent, Operation,
        RefinanceEvent, RentChangeEvent,
    };

    fn valid() -> ProjectionConfig {
        ProjectionConfig::new(
            Acquisition::cash(100_000.0, 3_000.0),
            Operation::rent_only(1_200.0),
            12,
        )
    }

    #[test]
    fn test_valid_config_passes() {
        assert_eq!(validate(&valid()), Ok(()));
    }

    #[test]
    fn test_projection_length_bounds() {
        let mut config = valid();
        config.projection_months = 0;
        assert!(matches!(
            validate(&config),
            Err(ValidationError::ProjectionLength { months: 0, .. })
        ));

        config.projection_months = MAX_PROJECTION_MONTHS + 1;
        assert!(validate(&config).is_err());

        config.projection_months = MAX_PROJECTION_MONTHS;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_negative_and_non_finite_amounts() {
        let mut config = valid();
        config.acquisition.closing_costs = -1.0;
        assert_eq!(
            validate(&config),
            Err(ValidationError::NegativeAmount {
                field: "acquisition.closingCosts",
                value: -1.0
            })
        );

        let mut config = valid();
        config.operation.maintenance = f64::NAN;
        assert_eq!(
            validate(&config),
            Err(ValidationError::NonFinite {
                field: "operation.maintenance"
            })
        );
    }

    #[test]
    fn test_percentages_must_be_whole_percent_range() {
        let mut config = valid();
        config.operation.vacancy_pct = 150.0;
        assert!(matches!(
            validate(&config),
            Err(ValidationError::PercentOutOfRange { field: "operation.vacancyRate", .. })
        ));
    }

    #[test]
    fn test_loan_requires_rate_and_term() {
        let mut config = valid();
        config.acquisition.purchase_loan_amount = Some(75_000.0);
        assert_eq!(
            validate(&config),
            Err(ValidationError::IncompleteLoan { amount: 75_000.0 })
        );

        config.acquisition.purchase_loan_rate = Some(0.06);
        config.acquisition.purchase_loan_term_years = Some(0);
        assert!(matches!(validate(&config), Err(ValidationError::InvalidLoanTerms(_))));

        config.acquisition.purchase_loan_term_years = Some(30);
        assert!(validate(&config).is_ok());

        // A stated loan amount needs terms even when it is zero
        let mut config = valid();
        config.acquisition.purchase_loan_amount = Some(0.0);
        assert_eq!(
            validate(&config),
            Err(ValidationError::IncompleteLoan { amount: 0.0 })
        );
    }

    #[test]
    fn test_loan_rate_and_term_bounds() {
        let mut config = valid();
        config.acquisition.purchase_loan_amount = Some(75_000.0);
        config.acquisition.purchase_loan_rate = Some(80.0);
        config.acquisition.purchase_loan_term_years = Some(30);
        assert!(matches!(validate(&config), Err(ValidationError::InvalidLoanTerms(_))));

        config.acquisition.purchase_loan_rate = Some(-0.01);
        assert!(matches!(validate(&config), Err(ValidationError::InvalidLoanTerms(_))));

        config.acquisition.purchase_loan_rate = Some(f64::INFINITY);
        assert!(matches!(validate(&config), Err(ValidationError::NonFinite { .. })));

        config.acquisition.purchase_loan_rate = Some(MAX_LOAN_RATE);
        assert!(validate(&config).is_ok());

        config.acquisition.purchase_loan_term_years = Some(MAX_LOAN_TERM_YEARS + 1);
        assert!(matches!(validate(&config), Err(ValidationError::InvalidLoanTerms(_))));

        let mut config = valid();
        config.refinance_events.push(RefinanceEvent {
            month: 3,
            after_repair_value: 150_000.0,
            refinance_ltv: 0.75,
            refinance_rate: 5.0,
            refinance_term_years: 30,
            refinance_closing_costs: 3_500.0,
        });
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidRefinance { month: 3, .. })
        ));
    }

    #[test]
    fn test_event_checks() {
        let mut config = valid();
        config.rent_change_events.push(RentChangeEvent { month: 0, new_rent: 1_300.0 });
        assert_eq!(
            validate(&config),
            Err(ValidationError::EventMonth { kind: "rent change" })
        );

        let mut config = valid();
        config.refinance_events.push(RefinanceEvent {
            month: 3,
            after_repair_value: 150_000.0,
            refinance_ltv: 1.5,
            refinance_rate: 0.05,
            refinance_term_years: 30,
            refinance_closing_costs: 3_500.0,
        });
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidRefinance { month: 3, .. })
        ));

        let mut config = valid();
        config
            .expense_change_events
            .push(ExpenseChangeEvent::set_monthly(4, ExpenseCategory::Taxes, -5.0));
        assert!(matches!(
            validate(&config),
            Err(ValidationError::NegativeAmount { .. })
        ));

        let mut config = valid();
        config
            .capital_components
            .push(CapitalComponent::new("Roof", -3.0, 10_000.0));
        assert!(validate(&config).is_err());
    }
}
