//! Fixed-rate loan payments and month-by-month amortization

/// Level monthly payment for a fixed-rate loan.
///
/// # Arguments
/// * `principal` - Amount borrowed
/// * `annual_rate` - Annual interest rate as a decimal (0.06 for 6%)
/// * `term_years` - Loan term in years
///
/// Returns 0 for a non-positive principal or a zero term. A zero rate
/// repays the principal in straight-line installments.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    let payments = term_years.saturating_mul(12).min(i32::MAX as u32);
    if principal <= 0.0 || payments == 0 {
        return 0.0;
    }

    let monthly_rate = annual_rate / 12.0;
    if monthly_rate == 0.0 {
        return principal / payments as f64;
    }

    let growth = (1.0 + monthly_rate).powi(payments as i32);
    if !growth.is_finite() {
        // Limit of the annuity formula as the term grows: interest only
        return principal * monthly_rate;
    }
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Balances below half a cent are treated as paid off
pub const PAID_OFF_THRESHOLD: f64 = 0.005;

/// One month of debt service on a loan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmortizationStep {
    /// Amount actually paid: the scheduled payment, or less in the payoff month
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub ending_balance: f64,
}

/// Split a payment into interest and principal and pay the balance down.
///
/// Principal is clamped to `[0, balance]`: a payment below the interest due
/// never grows the balance, and the last payment never overshoots zero.
/// A residue under [`PAID_OFF_THRESHOLD`] is retired with the payment, so a
/// fully scheduled loan ends at exactly 0.
pub fn amortize_month(balance: f64, monthly_rate: f64, payment: f64) -> AmortizationStep {
    if balance <= 0.0 {
        return AmortizationStep {
            payment: 0.0,
            interest: 0.0,
            principal: 0.0,
            ending_balance: 0.0,
        };
    }

    let interest = balance * monthly_rate;
    let due = (payment - interest).max(0.0);
    if balance - due < PAID_OFF_THRESHOLD {
        return AmortizationStep {
            payment: payment.min(interest + balance),
            interest,
            principal: balance,
            ending_balance: 0.0,
        };
    }

    AmortizationStep {
        payment,
        interest,
        principal: due,
        ending_balance: balance - due,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_standard_thirty_year_payment() {
        // $75,000 at 6% over 30 years
        let payment = monthly_payment(75_000.0, 0.06, 30);
        assert_abs_diff_eq!(payment, 449.66, epsilon = 0.005);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_relative_eq!(monthly_payment(120_000.0, 0.0, 10), 1_000.0);
    }

    #[test]
    fn test_degenerate_inputs_pay_nothing() {
        assert_eq!(monthly_payment(0.0, 0.06, 30), 0.0);
        assert_eq!(monthly_payment(-5_000.0, 0.06, 30), 0.0);
        assert_eq!(monthly_payment(75_000.0, 0.06, 0), 0.0);
    }

    #[test]
    fn test_full_schedule_retires_the_loan() {
        let payment = monthly_payment(75_000.0, 0.06, 30);
        let mut balance = 75_000.0;
        let mut total_interest = 0.0;

        for _ in 0..360 {
            let step = amortize_month(balance, 0.005, payment);
            assert!(step.ending_balance <= balance);
            total_interest += step.interest;
            balance = step.ending_balance;
        }

        assert_eq!(balance, 0.0);
        assert_abs_diff_eq!(total_interest, payment * 360.0 - 75_000.0, epsilon = 1e-4);
    }

    #[test]
    fn test_short_loans_end_at_exactly_zero() {
        for term in 1..=19 {
            for principal in [10_000.0, 45_000.0, 100_000.0] {
                for annual_rate in [0.03, 0.0725, 0.10] {
                    let payment = monthly_payment(principal, annual_rate, term);
                    let mut balance = principal;
                    for _ in 0..term * 12 {
                        balance = amortize_month(balance, annual_rate / 12.0, payment).ending_balance;
                    }
                    assert_eq!(balance, 0.0, "{} over {}y at {}", principal, term, annual_rate);
                }
            }
        }
    }

    #[test]
    fn test_payoff_month_pays_only_what_is_owed() {
        let step = amortize_month(100.0, 0.01, 449.66);
        assert_eq!(step.ending_balance, 0.0);
        assert_relative_eq!(step.principal, 100.0);
        assert_relative_eq!(step.payment, 101.0);

        // Residue below half a cent is cleared by the scheduled payment
        let step = amortize_month(449.0 + 0.004, 0.0, 449.0);
        assert_eq!(step.ending_balance, 0.0);
        assert_relative_eq!(step.payment, 449.0);

        let regular = amortize_month(75_000.0, 0.005, 449.66);
        assert_eq!(regular.payment, 449.66);
    }

    #[test]
    fn test_overflowing_growth_falls_back_to_interest_only() {
        let payment = monthly_payment(100_000.0, 80.0, 30);
        assert!(payment.is_finite());
        assert_relative_eq!(payment, 100_000.0 * 80.0 / 12.0);
    }

    #[test]
    fn test_underpayment_never_grows_balance() {
        let step = amortize_month(100_000.0, 0.005, 100.0);
        assert_relative_eq!(step.interest, 500.0);
        assert_eq!(step.principal, 0.0);
        assert_relative_eq!(step.ending_balance, 100_000.0);
    }
}
