//! Expense categories and the monthly income/expense vectors

use serde::{Deserialize, Serialize};
use std::fmt;

use super::data::HoldingCosts;

/// Every line item a property can be charged for in a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpenseCategory {
    Mortgage,
    Taxes,
    Insurance,
    Maintenance,
    PropertyManagement,
    Utilities,
    VacancyAllowance,
    OtherExpenses,
    CapitalReserves,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Mortgage,
        ExpenseCategory::Taxes,
        ExpenseCategory::Insurance,
        ExpenseCategory::Maintenance,
        ExpenseCategory::PropertyManagement,
        ExpenseCategory::Utilities,
        ExpenseCategory::VacancyAllowance,
        ExpenseCategory::OtherExpenses,
        ExpenseCategory::CapitalReserves,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Mortgage => "mortgage",
            ExpenseCategory::Taxes => "taxes",
            ExpenseCategory::Insurance => "insurance",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::PropertyManagement => "property management",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::VacancyAllowance => "vacancy allowance",
            ExpenseCategory::OtherExpenses => "other",
            ExpenseCategory::CapitalReserves => "capital reserves",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Income earned in one month
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyIncome {
    pub rent: f64,
    pub other_income: f64,
}

impl MonthlyIncome {
    pub fn total(&self) -> f64 {
        self.rent + self.other_income
    }
}

/// Monthly amount for each expense category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyExpenses {
    pub mortgage: f64,
    pub taxes: f64,
    pub insurance: f64,
    pub maintenance: f64,
    pub property_management: f64,
    pub utilities: f64,
    pub vacancy_allowance: f64,
    pub other_expenses: f64,
    pub capital_reserves: f64,
}

impl MonthlyExpenses {
    pub fn get(&self, category: ExpenseCategory) -> f64 {
        match category {
            ExpenseCategory::Mortgage => self.mortgage,
            ExpenseCategory::Taxes => self.taxes,
            ExpenseCategory::Insurance => self.insurance,
            ExpenseCategory::Maintenance => self.maintenance,
            ExpenseCategory::PropertyManagement => self.property_management,
            ExpenseCategory::Utilities => self.utilities,
            ExpenseCategory::VacancyAllowance => self.vacancy_allowance,
            ExpenseCategory::OtherExpenses => self.other_expenses,
            ExpenseCategory::CapitalReserves => self.capital_reserves,
        }
    }

    /// Copy of this vector with exactly one category replaced
    pub fn with_amount(mut self, category: ExpenseCategory, amount: f64) -> Self {
        let slot = match category {
            ExpenseCategory::Mortgage => &mut self.mortgage,
            ExpenseCategory::Taxes => &mut self.taxes,
            ExpenseCategory::Insurance => &mut self.insurance,
            ExpenseCategory::Maintenance => &mut self.maintenance,
            ExpenseCategory::PropertyManagement => &mut self.property_management,
            ExpenseCategory::Utilities => &mut self.utilities,
            ExpenseCategory::VacancyAllowance => &mut self.vacancy_allowance,
            ExpenseCategory::OtherExpenses => &mut self.other_expenses,
            ExpenseCategory::CapitalReserves => &mut self.capital_reserves,
        };
        *slot = amount;
        self
    }

    /// Sum of every category, capital reserves included
    pub fn total(&self) -> f64 {
        ExpenseCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Out-of-pocket outflow for a renovation month.
    ///
    /// With a holding-cost selection only the flagged categories are paid;
    /// without one every category except capital reserves is paid.
    pub fn holding_total(&self, holding: Option<&HoldingCosts>) -> f64 {
        ExpenseCategory::ALL
            .iter()
            .filter(|c| match holding {
                Some(selection) => selection.includes(**c),
                None => **c != ExpenseCategory::CapitalReserves,
            })
            .map(|c| self.get(*c))
            .sum()
    }
}
