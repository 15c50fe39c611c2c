//! Internal Rate of Return (IRR) calculation
//!
//! Used to summarize a deal's full cash-flow series, terminated by a
//! hypothetical sale, as a single rate.

use serde::{Deserialize, Serialize};

/// Periodic rates scanned for a sign change of NPV
const SCAN_LOW: f64 = -0.99;
const SCAN_HIGH: f64 = 10.0;

/// Initial guess: 10% annual
const GUESS_ANNUAL_RATE: f64 = 0.10;

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 200;

/// Why no rate could be solved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IrrFailure {
    /// No cash flows at all
    EmptySeries,
    /// A cash flow is NaN or infinite
    NonFiniteCashFlow,
    /// Every flow has the same sign, so NPV never crosses zero
    NoSignChange,
    /// NPV never crosses zero between -99% and 1000% per period
    NoRootInRange,
    /// A root was bracketed but the solver ran out of iterations
    NotConverged,
}

/// Result of an IRR solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum IrrOutcome {
    #[serde(rename_all = "camelCase")]
    Solved { periodic_rate: f64, annual_rate: f64 },
    Unsolved { reason: IrrFailure },
}

impl IrrOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, IrrOutcome::Solved { .. })
    }

    pub fn annual_rate(&self) -> Option<f64> {
        match self {
            IrrOutcome::Solved { annual_rate, .. } => Some(*annual_rate),
            IrrOutcome::Unsolved { .. } => None,
        }
    }

    pub fn periodic_rate(&self) -> Option<f64> {
        match self {
            IrrOutcome::Solved { periodic_rate, .. } => Some(*periodic_rate),
            IrrOutcome::Unsolved { .. } => None,
        }
    }
}

/// Calculate the Internal Rate of Return (IRR) for a series of cash flows.
///
/// NPV is scanned over a grid of periodic rates for sign changes, every
/// bracketed root is refined with Brent's method, and the root closest to
/// the initial guess is reported. A series with several sign changes can
/// have several roots; the nearest to the guess wins.
///
/// # Arguments
/// * `cashflows` - Cash flows per period, `cashflows[0]` at time zero
/// * `periods_per_year` - Number of periods per year (12 for monthly)
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> IrrOutcome {
    if cashflows.is_empty() {
        return unsolved(IrrFailure::EmptySeries);
    }

    if cashflows.iter().any(|cf| !cf.is_finite()) {
        return unsolved(IrrFailure::NonFiniteCashFlow);
    }

    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return solved(0.0, periods_per_year);
    }

    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return unsolved(IrrFailure::NoSignChange);
    }

    let guess = periodic_rate(GUESS_ANNUAL_RATE, periods_per_year);
    let mut roots = Vec::new();
    let mut bracket_failed = false;

    let grid = scan_grid();
    let mut previous: Option<(f64, f64)> = None;
    for &rate in &grid {
        let value = npv(cashflows, rate);
        if !value.is_finite() {
            previous = None;
            continue;
        }
        if value == 0.0 {
            roots.push(rate);
            previous = None;
            continue;
        }
        if let Some((prev_rate, prev_npv)) = previous {
            if prev_npv.signum() != value.signum() {
                match brent(cashflows, prev_rate, rate, prev_npv, value) {
                    Some(root) => roots.push(root),
                    None => bracket_failed = true,
                }
            }
        }
        previous = Some((rate, value));
    }

    match roots
        .into_iter()
        .min_by(|a, b| (a - guess).abs().total_cmp(&(b - guess).abs()))
    {
        Some(rate) => solved(rate, periods_per_year),
        None if bracket_failed => unsolved(IrrFailure::NotConverged),
        None => unsolved(IrrFailure::NoRootInRange),
    }
}

/// Net present value of `cashflows` at a periodic `rate`
pub fn npv(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Convert a periodic rate into its effective annual rate
pub fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

fn periodic_rate(annual_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + annual_rate).powf(1.0 / periods_per_year.max(1) as f64) - 1.0
}

fn solved(rate: f64, periods_per_year: u32) -> IrrOutcome {
    IrrOutcome::Solved {
        periodic_rate: rate,
        annual_rate: annualize(rate, periods_per_year),
    }
}

fn unsolved(reason: IrrFailure) -> IrrOutcome {
    IrrOutcome::Unsolved { reason }
}

/// Grid dense near zero, where realistic monthly rates live
fn scan_grid() -> Vec<f64> {
    let mut grid = Vec::new();
    let mut i = 0;
    loop {
        let rate = SCAN_LOW + i as f64 * 0.0025;
        if rate >= 1.0 {
            break;
        }
        grid.push(rate);
        i += 1;
    }
    let mut i = 0;
    loop {
        let rate = 1.0 + i as f64 * 0.05;
        if rate > SCAN_HIGH {
            break;
        }
        grid.push(rate);
        i += 1;
    }
    grid
}

/// Brent's method on a bracket `[a, b]` where `fa` and `fb` differ in sign
fn brent(cashflows: &[f64], a: f64, b: f64, fa: f64, fb: f64) -> Option<f64> {
    let (mut a, mut b, mut fa, mut fb) = (a, b, fa, fb);
    let (mut c, mut fc) = (b, fb);
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * TOLERANCE;
        let midpoint = 0.5 * (c - b);
        if midpoint.abs() <= tol || fb == 0.0 {
            return Some(b);
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            // Inverse quadratic interpolation, or secant when a == c
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * midpoint * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * midpoint * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * midpoint * q - (tol * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = midpoint;
                e = d;
            }
        } else {
            d = midpoint;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(midpoint) };
        fb = npv(cashflows, b);
    }

    None
}
