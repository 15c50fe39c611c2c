//! Acquisition and operating inputs for a single deal

use serde::{Deserialize, Serialize};

use super::expenses::ExpenseCategory;
use crate::finance::amortization::monthly_payment;

/// Initial property acquisition details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acquisition {
    pub purchase_price: f64,
    pub closing_costs: f64,

    /// Renovation budget, paid in full at acquisition
    pub rehab_costs: f64,

    /// Months the property earns nothing while being renovated
    pub rehab_duration_months: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_loan_amount: Option<f64>,

    /// Annual rate as a decimal (0.06 = 6%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_loan_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_loan_term_years: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_initial_costs: Option<f64>,

    /// Expense categories paid out of pocket during rehab.
    /// When absent, the full operating expense vector is carried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_holding_costs: Option<HoldingCosts>,
}

impl Acquisition {
    /// Cash-only acquisition with no renovation period
    pub fn cash(purchase_price: f64, closing_costs: f64) -> Self {
        Self {
            purchase_price,
            closing_costs,
            rehab_costs: 0.0,
            rehab_duration_months: 0,
            purchase_loan_amount: None,
            purchase_loan_rate: None,
            purchase_loan_term_years: None,
            other_initial_costs: None,
            include_holding_costs: None,
        }
    }

    /// Capital committed up front: price, closing, rehab and other costs
    pub fn total_investment(&self) -> f64 {
        self.purchase_price
            + self.closing_costs
            + self.rehab_costs
            + self.other_initial_costs.unwrap_or(0.0)
    }

    pub fn loan_amount(&self) -> f64 {
        self.purchase_loan_amount.unwrap_or(0.0).max(0.0)
    }

    /// Level monthly payment on the purchase loan, 0 without one
    pub fn mortgage_payment(&self) -> f64 {
        match (self.purchase_loan_rate, self.purchase_loan_term_years) {
            (Some(rate), Some(term)) => monthly_payment(self.loan_amount(), rate, term),
            _ => 0.0,
        }
    }
}

/// Which expense categories are carried during the renovation period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingCosts {
    pub mortgage: bool,
    pub taxes: bool,
    pub insurance: bool,
    pub maintenance: bool,
    pub property_management: bool,
    pub utilities: bool,
    pub other: bool,
}

impl HoldingCosts {
    /// Nothing is paid during rehab
    pub fn none() -> Self {
        Self {
            mortgage: false,
            taxes: false,
            insurance: false,
            maintenance: false,
            property_management: false,
            utilities: false,
            other: false,
        }
    }

    /// Carrying costs a lender and the county still expect during rehab
    pub fn typical() -> Self {
        Self {
            mortgage: true,
            taxes: true,
            insurance: true,
            utilities: true,
            ..Self::none()
        }
    }

    /// Whether a category is paid while the property is being renovated.
    /// Vacancy allowance and capital reserves only exist once rented.
    pub fn includes(&self, category: ExpenseCategory) -> bool {
        match category {
            ExpenseCategory::Mortgage => self.mortgage,
            ExpenseCategory::Taxes => self.taxes,
            ExpenseCategory::Insurance => self.insurance,
            ExpenseCategory::Maintenance => self.maintenance,
            ExpenseCategory::PropertyManagement => self.property_management,
            ExpenseCategory::Utilities => self.utilities,
            ExpenseCategory::OtherExpenses => self.other,
            ExpenseCategory::VacancyAllowance | ExpenseCategory::CapitalReserves => false,
        }
    }
}

/// Rental operation details
///
/// Monetary fields are monthly unless named annual. Percentages are whole
/// numbers (8.0 = 8% of rent).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub monthly_rent: f64,
    #[serde(default)]
    pub other_monthly_income: f64,

    /// Annual property taxes
    #[serde(rename = "propertyTaxes")]
    pub annual_property_taxes: f64,

    /// Annual insurance premium
    #[serde(rename = "insurance")]
    pub annual_insurance: f64,

    pub maintenance: f64,

    /// Management fee, percent of rent
    #[serde(rename = "propertyManagement")]
    pub property_management_pct: f64,

    pub utilities: f64,

    /// Vacancy allowance, percent of rent
    #[serde(rename = "vacancyRate")]
    pub vacancy_pct: f64,

    #[serde(default)]
    pub other_expenses: f64,
}

impl Operation {
    /// Rent-only operation with every expense at zero
    pub fn rent_only(monthly_rent: f64) -> Self {
        Self {
            monthly_rent,
            ..Default::default()
        }
    }

    pub fn monthly_taxes(&self) -> f64 {
        self.annual_property_taxes / 12.0
    }

    pub fn monthly_insurance(&self) -> f64 {
        self.annual_insurance / 12.0
    }

    pub fn management_fee(&self, rent: f64) -> f64 {
        rent * self.property_management_pct / 100.0
    }

    pub fn vacancy_allowance(&self, rent: f64) -> f64 {
        rent * self.vacancy_pct / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_total_investment_includes_other_costs() {
        let mut acquisition = Acquisition::cash(100_000.0, 3_000.0);
        acquisition.rehab_costs = 25_000.0;
        assert_relative_eq!(acquisition.total_investment(), 128_000.0);

        acquisition.other_initial_costs = Some(1_500.0);
        assert_relative_eq!(acquisition.total_investment(), 129_500.0);
    }

    #[test]
    fn test_mortgage_payment_requires_terms() {
        let mut acquisition = Acquisition::cash(100_000.0, 0.0);
        acquisition.purchase_loan_amount = Some(75_000.0);
        assert_eq!(acquisition.mortgage_payment(), 0.0);

        acquisition.purchase_loan_rate = Some(0.06);
        acquisition.purchase_loan_term_years = Some(30);
        assert_relative_eq!(acquisition.mortgage_payment(), 449.66, epsilon = 0.01);
    }

    #[test]
    fn test_holding_costs_never_include_vacancy_or_reserves() {
        let all = HoldingCosts {
            mortgage: true,
            taxes: true,
            insurance: true,
            maintenance: true,
            property_management: true,
            utilities: true,
            other: true,
        };
        assert!(all.includes(ExpenseCategory::Taxes));
        assert!(!all.includes(ExpenseCategory::VacancyAllowance));
        assert!(!all.includes(ExpenseCategory::CapitalReserves));
    }

    #[test]
    fn test_percentages_are_whole_numbers() {
        let operation = Operation {
            property_management_pct: 8.0,
            vacancy_pct: 5.0,
            ..Operation::rent_only(1_500.0)
        };
        assert_relative_eq!(operation.management_fee(1_500.0), 120.0);
        assert_relative_eq!(operation.vacancy_allowance(1_500.0), 75.0);
    }

    #[test]
    fn test_operation_reads_stored_field_names() {
        let json = r#"{
            "monthlyRent": 1200,
            "otherMonthlyIncome": 50,
            "propertyTaxes": 2400,
            "insurance": 1200,
            "maintenance": 100,
            "propertyManagement": 8,
            "utilities": 0,
            "vacancyRate": 5,
            "otherExpenses": 0
        }"#;
        let operation: Operation = serde_json::from_str(json).unwrap();
        assert_relative_eq!(operation.monthly_taxes(), 200.0);
        assert_relative_eq!(operation.monthly_insurance(), 100.0);
        assert_relative_eq!(operation.property_management_pct, 8.0);
    }
}
