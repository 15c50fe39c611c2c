//! Cash-out refinance economics

use serde::{Deserialize, Serialize};

use super::amortization::monthly_payment;

/// Absorbs binary representation error in `value × ltv` so an exact-dollar
/// product is not floored down a whole dollar.
const LOAN_FLOOR_EPSILON: f64 = 1e-6;

/// Inputs to a cash-out refinance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinanceParams {
    pub after_repair_value: f64,
    /// Capital still invested before the refinance
    pub total_investment: f64,
    #[serde(rename = "refinanceLTV")]
    pub refinance_ltv: f64,
    pub refinance_rate: f64,
    pub refinance_term_years: u32,
    pub refinance_closing_costs: f64,
}

/// Result of a cash-out refinance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinanceOutcome {
    pub new_loan_amount: f64,
    pub cash_recouped: f64,
    pub remaining_investment: f64,
    pub new_monthly_payment: f64,
    #[serde(rename = "isBRRRRSuccessful")]
    pub is_brrrr_successful: bool,
}

/// Compute the new loan, cash pulled out, and capital left in the deal.
///
/// The new loan is the whole-dollar floor of `ARV × LTV`; closing costs are
/// paid out of the proceeds.
pub fn calculate_refinance(params: &RefinanceParams) -> RefinanceOutcome {
    let new_loan_amount =
        (params.after_repair_value * params.refinance_ltv + LOAN_FLOOR_EPSILON).floor();
    let cash_recouped = new_loan_amount - params.refinance_closing_costs;
    let remaining_investment = (params.total_investment - cash_recouped).max(0.0);

    RefinanceOutcome {
        new_loan_amount,
        cash_recouped,
        remaining_investment,
        new_monthly_payment: monthly_payment(
            new_loan_amount,
            params.refinance_rate,
            params.refinance_term_years,
        ),
        is_brrrr_successful: remaining_investment == 0.0,
    }
}

/// Smallest after-repair value whose refinance returns all invested capital.
///
/// Solves `ARV × LTV − closing_costs = total_investment` for ARV. Returns
/// `None` when the LTV is not positive.
pub fn calculate_minimum_arv(total_investment: f64, ltv: f64, closing_costs: f64) -> Option<f64> {
    if ltv <= 0.0 {
        return None;
    }
    Some((total_investment + closing_costs) / ltv)
}
