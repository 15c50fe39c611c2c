//! Monthly snapshot and summary output structures for projections

use serde::{Deserialize, Serialize};

use super::irr::{calculate_irr, IrrOutcome};
use crate::deal::{MonthlyExpenses, MonthlyIncome};

/// Annualized cash-on-cash return against capital still invested
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CashOnCash {
    /// Annualized return as a fraction (0.12 = 12%)
    Return(f64),
    /// Every dollar invested has been recovered; the ratio is unbounded
    FullyRecovered,
}

impl CashOnCash {
    /// `monthly_cash_flow × 12 ÷ remaining_investment`
    pub fn from_cash_flow(monthly_cash_flow: f64, remaining_investment: f64) -> Self {
        if remaining_investment <= 0.0 {
            CashOnCash::FullyRecovered
        } else {
            CashOnCash::Return(monthly_cash_flow * 12.0 / remaining_investment)
        }
    }

    /// Numeric view for charts and tables: `FullyRecovered` reads as 0
    pub fn as_f64(&self) -> f64 {
        match self {
            CashOnCash::Return(value) => *value,
            CashOnCash::FullyRecovered => 0.0,
        }
    }
}

/// Financial state at the end of one projection month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySnapshot {
    /// Projection month (1-indexed)
    pub month: u32,
    pub property_value: f64,

    /// Capital committed at acquisition
    pub total_investment: f64,

    /// Capital not yet recovered
    pub remaining_investment: f64,

    /// Loan balance after this month's payment
    pub loan_balance: f64,

    pub monthly_income: MonthlyIncome,
    pub monthly_expenses: MonthlyExpenses,

    /// Lump-sum expense paid this month only
    pub one_time_expense: f64,

    pub cash_flow: f64,

    /// Sum of `cash_flow` for months 1..=month
    pub total_cash_flow: f64,

    /// Property value less loan balance
    pub equity: f64,

    pub cash_on_cash: CashOnCash,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_description: Option<String>,
}

/// Headline metrics over a whole projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_investment: f64,
    pub remaining_investment: f64,
    pub total_cash_flow: f64,
    pub final_property_value: f64,
    pub final_equity: f64,
    pub final_loan_balance: f64,
    pub total_appreciation: f64,
    pub average_monthly_cash_flow: f64,
    pub cash_on_cash_return: CashOnCash,
    pub return_on_investment: f64,
    pub internal_rate_of_return: IrrOutcome,
    #[serde(rename = "successfulBRRRR")]
    pub successful_brrrr: bool,
}

impl ProjectionSummary {
    /// Derive the summary from a complete snapshot series.
    ///
    /// Returns `None` for an empty series.
    pub fn from_snapshots(snapshots: &[MonthlySnapshot]) -> Option<Self> {
        let first = snapshots.first()?;
        let last = snapshots.last()?;

        Some(Self {
            total_investment: first.total_investment,
            remaining_investment: last.remaining_investment,
            total_cash_flow: last.total_cash_flow,
            final_property_value: last.property_value,
            final_equity: last.equity,
            final_loan_balance: last.loan_balance,
            total_appreciation: last.property_value - first.property_value,
            average_monthly_cash_flow: last.total_cash_flow / snapshots.len() as f64,
            cash_on_cash_return: CashOnCash::from_cash_flow(last.cash_flow, last.remaining_investment),
            return_on_investment: if first.total_investment > 0.0 {
                (last.total_cash_flow + last.equity - first.equity) / first.total_investment
            } else {
                0.0
            },
            internal_rate_of_return: calculate_irr(&irr_cashflows(snapshots), 12),
            successful_brrrr: last.remaining_investment <= 0.0,
        })
    }
}

/// Cash flows for the IRR solve: the initial outlay, each month's cash flow,
/// and a hypothetical sale at final equity added to the last month.
pub fn irr_cashflows(snapshots: &[MonthlySnapshot]) -> Vec<f64> {
    let mut cashflows = Vec::with_capacity(snapshots.len() + 1);
    if let Some(first) = snapshots.first() {
        cashflows.push(-first.total_investment);
    }
    cashflows.extend(snapshots.iter().map(|s| s.cash_flow));
    if let (Some(last), Some(final_flow)) = (snapshots.last(), cashflows.last_mut()) {
        *final_flow += last.property_value - last.loan_balance;
    }
    cashflows
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub monthly_snapshots: Vec<MonthlySnapshot>,
    pub summary: ProjectionSummary,
}

impl ProjectionResult {
    /// Snapshot for a 1-indexed month
    pub fn snapshot(&self, month: u32) -> Option<&MonthlySnapshot> {
        let index = month.checked_sub(1)? as usize;
        self.monthly_snapshots.get(index)
    }

    pub fn months(&self) -> usize {
        self.monthly_snapshots.len()
    }
}
