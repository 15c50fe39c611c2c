//! Load deal configurations from JSON files

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::LoadError;
use crate::projection::{validate, ProjectionConfig};

/// Parse a deal configuration from a JSON string and validate it
pub fn parse_config(json: &str) -> Result<ProjectionConfig, LoadError> {
    let config: ProjectionConfig = serde_json::from_str(json)?;
    validate(&config)?;
    Ok(config)
}

/// Load and validate a deal configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ProjectionConfig, LoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    debug!(
        "loaded deal from {}: {} months, {} refinance event(s)",
        path.display(),
        config.projection_months,
        config.refinance_events.len()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    const DEAL: &str = r#"{
        "acquisition": {
            "purchasePrice": 100000,
            "closingCosts": 3000,
            "rehabCosts": 25000,
            "rehabDurationMonths": 2,
            "purchaseLoanAmount": 75000,
            "purchaseLoanRate": 0.06,
            "purchaseLoanTermYears": 30
        },
        "operation": {
            "monthlyRent": 1200,
            "otherMonthlyIncome": 0,
            "propertyTaxes": 2400,
            "insurance": 1200,
            "maintenance": 100,
            "propertyManagement": 8,
            "utilities": 0,
            "vacancyRate": 5,
            "otherExpenses": 0
        },
        "projectionMonths": 24,
        "refinanceEvents": [
            {"month": 3, "afterRepairValue": 150000, "refinanceLTV": 0.75,
             "refinanceRate": 0.05, "refinanceTermYears": 30, "refinanceClosingCosts": 3500}
        ],
        "rentChangeEvents": [{"month": 13, "newRent": 1250}]
    }"#;

    #[test]
    fn test_parse_stored_deal() {
        let config = parse_config(DEAL).unwrap();
        assert_eq!(config.projection_months, 24);
        assert_eq!(config.refinance_events.len(), 1);
        assert_eq!(config.rent_change_events[0].new_rent, 1_250.0);
        assert!(config.property_value_changes.is_empty());
        assert!(config.capital_components.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_config() {
        let config = parse_config(DEAL).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(parse_config(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_deal_is_rejected() {
        let json = DEAL.replace("\"projectionMonths\": 24", "\"projectionMonths\": 0");
        match parse_config(&json) {
            Err(LoadError::Invalid(ValidationError::ProjectionLength { months, .. })) => {
                assert_eq!(months, 0)
            }
            other => panic!("expected projection length error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("does/not/exist.json");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
