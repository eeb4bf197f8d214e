use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::{Validate, ValidationError};

use super::{FuelPrices, Fuels, PlantSpec};

/// Body of `POST /productionplan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_unique_names"))]
pub struct ProductionPlanRequest {
    /// Load to produce (MWh).
    #[validate(range(min = 0.0))]
    pub load: f64,
    #[validate(nested)]
    pub fuels: Fuels,
    #[validate(length(min = 1), nested)]
    pub powerplants: Vec<PlantSpec>,
}

impl ProductionPlanRequest {
    pub fn fuel_prices(&self) -> FuelPrices {
        FuelPrices::from(&self.fuels)
    }

    pub fn names(&self) -> Vec<String> {
        self.powerplants.iter().map(|p| p.name.clone()).collect()
    }
}

fn validate_unique_names(request: &ProductionPlanRequest) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(request.powerplants.len());
    for plant in &request.powerplants {
        if !seen.insert(plant.name.as_str()) {
            let mut err = ValidationError::new("duplicate_name");
            err.message = Some(format!("duplicate powerplant name `{}`", plant.name).into());
            return Err(err);
        }
    }
    Ok(())
}
