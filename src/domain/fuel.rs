use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use super::PlantKind;

/// Fuel table of a production plan request.
///
/// Every entry is optional; a missing entry prices the matching kind at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Fuels {
    #[serde(rename = "gas(euro/MWh)", default)]
    #[validate(range(min = 0.0))]
    pub gas_euro_per_mwh: Option<f64>,
    #[serde(rename = "kerosine(euro/MWh)", default)]
    #[validate(range(min = 0.0))]
    pub kerosine_euro_per_mwh: Option<f64>,
    #[serde(rename = "co2(euro/ton)", default)]
    #[validate(range(min = 0.0))]
    pub co2_euro_per_ton: Option<f64>,
    #[serde(rename = "wind(%)", default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub wind_percent: Option<f64>,
}

/// Price lookup keyed by plant kind.
///
/// For intermittent kinds the stored value is the availability percentage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuelPrices {
    by_kind: HashMap<PlantKind, f64>,
    co2_euro_per_ton: Option<f64>,
}

impl FuelPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, kind: PlantKind, price: f64) -> Self {
        self.by_kind.insert(kind, price);
        self
    }

    pub fn with_co2_price(mut self, euro_per_ton: f64) -> Self {
        self.co2_euro_per_ton = Some(euro_per_ton);
        self
    }

    /// Price for `kind`, zero when the table has no entry.
    pub fn price(&self, kind: PlantKind) -> f64 {
        self.by_kind.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn co2_price(&self) -> Option<f64> {
        self.co2_euro_per_ton
    }
}

impl From<&Fuels> for FuelPrices {
    fn from(fuels: &Fuels) -> Self {
        let entries = [
            (PlantKind::GasFired, fuels.gas_euro_per_mwh),
            (PlantKind::Turbojet, fuels.kerosine_euro_per_mwh),
            (PlantKind::WindTurbine, fuels.wind_percent),
        ];
        Self {
            by_kind: entries
                .into_iter()
                .filter_map(|(kind, price)| price.map(|p| (kind, p)))
                .collect(),
            co2_euro_per_ton: fuels.co2_euro_per_ton,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuels_wire_format() {
        let json = r#"{
            "gas(euro/MWh)": 13.4,
            "kerosine(euro/MWh)": 50.8,
            "co2(euro/ton)": 20,
            "wind(%)": 60
        }"#;
        let fuels: Fuels = serde_json::from_str(json).unwrap();
        assert_eq!(fuels.gas_euro_per_mwh, Some(13.4));
        assert_eq!(fuels.kerosine_euro_per_mwh, Some(50.8));
        assert_eq!(fuels.co2_euro_per_ton, Some(20.0));
        assert_eq!(fuels.wind_percent, Some(60.0));
        assert!(fuels.validate().is_ok());
    }

    #[test]
    fn test_missing_fuel_resolves_to_zero() {
        let fuels: Fuels = serde_json::from_str(r#"{"gas(euro/MWh)": 13.4}"#).unwrap();
        let prices = FuelPrices::from(&fuels);
        assert_eq!(prices.price(PlantKind::GasFired), 13.4);
        assert_eq!(prices.price(PlantKind::Turbojet), 0.0);
        assert_eq!(prices.price(PlantKind::WindTurbine), 0.0);
        assert_eq!(prices.price(PlantKind::Unknown), 0.0);
        assert_eq!(prices.co2_price(), None);
    }

    #[test]
    fn test_wind_percentage_above_hundred_rejected() {
        let fuels = Fuels {
            wind_percent: Some(120.0),
            ..Default::default()
        };
        assert!(fuels.validate().is_err());
    }

    #[test]
    fn test_builder() {
        let prices = FuelPrices::new()
            .with_price(PlantKind::Turbojet, 50.8)
            .with_co2_price(20.0);
        assert_eq!(prices.price(PlantKind::Turbojet), 50.8);
        assert_eq!(prices.co2_price(), Some(20.0));
    }
}
