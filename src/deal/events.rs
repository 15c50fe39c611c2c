//! Scheduled events that change a deal's running state

use serde::{Deserialize, Serialize};

use super::expenses::ExpenseCategory;

/// An event that takes effect in a specific projection month (1-indexed)
pub trait Scheduled {
    fn month(&self) -> u32;
}

/// The event of one kind that fires in `month`.
///
/// When several are scheduled for the same month the last one in the list
/// wins.
pub fn event_at<E: Scheduled>(events: &[E], month: u32) -> Option<&E> {
    events.iter().rev().find(|e| e.month() == month)
}

/// Cash-out refinance at the after-repair value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinanceEvent {
    pub month: u32,
    pub after_repair_value: f64,
    /// Loan-to-value as a fraction (0.75 = 75%)
    #[serde(rename = "refinanceLTV")]
    pub refinance_ltv: f64,
    /// Annual rate as a decimal
    pub refinance_rate: f64,
    pub refinance_term_years: u32,
    pub refinance_closing_costs: f64,
}

/// Appreciation or depreciation to a new market value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueChangeEvent {
    pub month: u32,
    pub new_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentChangeEvent {
    pub month: u32,
    pub new_rent: f64,
}

/// What an expense event does to the month it fires in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExpenseChange {
    /// Replace one category's monthly amount from this month onward
    #[serde(rename_all = "camelCase")]
    SetMonthly {
        category: ExpenseCategory,
        new_amount: f64,
    },
    /// Lump-sum capital expense paid in this month only
    #[serde(rename_all = "camelCase")]
    OneTime { description: String, amount: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseChangeEvent {
    pub month: u32,
    #[serde(flatten)]
    pub change: ExpenseChange,
}

impl ExpenseChangeEvent {
    pub fn set_monthly(month: u32, category: ExpenseCategory, new_amount: f64) -> Self {
        Self {
            month,
            change: ExpenseChange::SetMonthly { category, new_amount },
        }
    }

    pub fn one_time(month: u32, description: impl Into<String>, amount: f64) -> Self {
        Self {
            month,
            change: ExpenseChange::OneTime {
                description: description.into(),
                amount,
            },
        }
    }
}

/// A depreciating component (roof, HVAC, water heater) funded by a reserve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalComponent {
    #[serde(alias = "component")]
    pub name: String,
    #[serde(alias = "lifespan")]
    pub lifespan_years: f64,
    pub replacement_cost: f64,
    /// Age when the projection starts; informational only
    #[serde(default, alias = "lastReplaced")]
    pub age_years: f64,
}

impl CapitalComponent {
    pub fn new(name: impl Into<String>, lifespan_years: f64, replacement_cost: f64) -> Self {
        Self {
            name: name.into(),
            lifespan_years,
            replacement_cost,
            age_years: 0.0,
        }
    }

    /// Years of service left before replacement is due
    pub fn years_until_replacement(&self) -> f64 {
        (self.lifespan_years - self.age_years).max(0.0)
    }
}

impl Scheduled for RefinanceEvent {
    fn month(&self) -> u32 {
        self.month
    }
}

impl Scheduled for ValueChangeEvent {
    fn month(&self) -> u32 {
        self.month
    }
}

impl Scheduled for RentChangeEvent {
    fn month(&self) -> u32 {
        self.month
    }
}
