//! Straight-line capital reserves for depreciating property components

use serde::{Deserialize, Serialize};

use crate::deal::CapitalComponent;

/// Monthly set-aside toward a component's eventual replacement.
///
/// Independent of the component's current age. A lifespan of zero or less
/// reserves nothing.
pub fn monthly_budget(component: &CapitalComponent) -> f64 {
    if component.lifespan_years <= 0.0 {
        return 0.0;
    }
    component.replacement_cost / (component.lifespan_years * 12.0)
}

/// Constant monthly capital reserve across all components
pub fn total_monthly_reserve(components: &[CapitalComponent]) -> f64 {
    components.iter().map(monthly_budget).sum()
}

/// One component's line in the reserve schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveLine {
    pub name: String,
    pub monthly_budget: f64,
    pub years_until_replacement: f64,
}

/// Per-component breakdown of the reserve
pub fn reserve_schedule(components: &[CapitalComponent]) -> Vec<ReserveLine> {
    components
        .iter()
        .map(|c| ReserveLine {
            name: c.name.clone(),
            monthly_budget: monthly_budget(c),
            years_until_replacement: c.years_until_replacement(),
        })
        .collect()
}
