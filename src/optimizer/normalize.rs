//! Plant catalog normalization
//!
//! Turns payload plants and the fuel table into [`NormalizedPlant`]s. The
//! result is positional: index `i` of the output describes plant `i` of the
//! input.

use tracing::debug;

use super::{DispatchSettings, NormalizedPlant};
use crate::domain::{CostRule, FuelPrices, PlantSpec};

pub fn normalize(
    plants: &[PlantSpec],
    prices: &FuelPrices,
    settings: &DispatchSettings,
) -> Vec<NormalizedPlant> {
    plants
        .iter()
        .map(|plant| normalize_plant(plant, prices, settings))
        .collect()
}

pub fn normalize_plant(
    plant: &PlantSpec,
    prices: &FuelPrices,
    settings: &DispatchSettings,
) -> NormalizedPlant {
    let price = prices.price(plant.kind);

    let (cost_per_unit_output, efficiency) = match plant.kind.cost_rule() {
        CostRule::Intermittent => (0.0, (price / 100.0).max(settings.epsilon)),
        CostRule::Thermal { co2_ton_per_mwh } => {
            let co2 = if settings.include_co2 {
                co2_ton_per_mwh * prices.co2_price().unwrap_or(0.0)
            } else {
                0.0
            };
            let efficiency = plant.efficiency.max(settings.epsilon);
            ((price + co2) / efficiency, efficiency)
        }
    };

    debug!(
        plant = %plant.name,
        kind = %plant.kind,
        cost_per_unit_output,
        efficiency,
        "normalized plant"
    );

    NormalizedPlant {
        cost_per_unit_output,
        efficiency,
        min_output: plant.min_output,
        max_output: plant.max_output,
    }
}
