//! Appreciation rates implied by scheduled property values

use crate::deal::ValueChangeEvent;

/// Compound annual growth rate between two property values `months` apart
pub fn annualized_appreciation_rate(start_value: f64, end_value: f64, months: u32) -> Option<f64> {
    if months == 0 || start_value <= 0.0 || end_value <= 0.0 {
        return None;
    }
    let years = months as f64 / 12.0;
    Some((end_value / start_value).powf(1.0 / years) - 1.0)
}

/// Property value in effect at `month`: the latest value change at or before
/// it, or `initial_value` when none has happened yet.
pub fn value_at_month(events: &[ValueChangeEvent], initial_value: f64, month: u32) -> f64 {
    events
        .iter()
        .enumerate()
        .filter(|(_, e)| e.month <= month)
        // later month wins; for equal months the later entry wins
        .max_by_key(|(i, e)| (e.month, *i))
        .map(|(_, e)| e.new_value)
        .unwrap_or(initial_value)
}

/// Annualized appreciation between two months of a value-change schedule
pub fn appreciation_between(
    events: &[ValueChangeEvent],
    initial_value: f64,
    start_month: u32,
    end_month: u32,
) -> Option<f64> {
    if start_month >= end_month {
        return None;
    }
    annualized_appreciation_rate(
        value_at_month(events, initial_value, start_month),
        value_at_month(events, initial_value, end_month),
        end_month - start_month,
    )
}
