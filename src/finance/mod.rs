//! Financial calculators used by the projection engine
//!
//! Every function here is pure: no state, no I/O.

pub mod amortization;
pub mod appreciation;
pub mod capital_reserve;
pub mod refinance;

pub use amortization::{amortize_month, monthly_payment, AmortizationStep};
pub use appreciation::{annualized_appreciation_rate, appreciation_between, value_at_month};
pub use capital_reserve::{monthly_budget, reserve_schedule, total_monthly_reserve, ReserveLine};
pub use refinance::{calculate_minimum_arv, calculate_refinance, RefinanceOutcome, RefinanceParams};
