use serde::{Deserialize, Serialize};
use strum::Display;
use validator::{Validate, ValidationError};

/// CO2 emitted by a gas-fired plant per MWh generated (ton/MWh).
pub const GAS_CO2_TON_PER_MWH: f64 = 0.3;

/// Generator category, as carried by the `type` field of a payload.
///
/// Categories not known to this service deserialize to [`PlantKind::Unknown`]
/// and are priced at zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlantKind {
    GasFired,
    Turbojet,
    WindTurbine,
    #[serde(other)]
    Unknown,
}

/// How cost and efficiency are derived for a plant category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostRule {
    /// Buys fuel at the fuel price and converts it at the plant's own efficiency.
    Thermal { co2_ton_per_mwh: f64 },
    /// No fuel cost; the fuel table carries the availability percentage instead.
    Intermittent,
}

impl PlantKind {
    pub fn cost_rule(self) -> CostRule {
        match self {
            Self::GasFired => CostRule::Thermal {
                co2_ton_per_mwh: GAS_CO2_TON_PER_MWH,
            },
            Self::Turbojet | Self::Unknown => CostRule::Thermal {
                co2_ton_per_mwh: 0.0,
            },
            Self::WindTurbine => CostRule::Intermittent,
        }
    }
}

/// One generating unit of a production plan request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_bounds"))]
pub struct PlantSpec {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlantKind,
    #[validate(range(min = 0.0, max = 1.0))]
    pub efficiency: f64,
    #[serde(rename = "pmin")]
    #[validate(range(min = 0.0))]
    pub min_output: f64,
    #[serde(rename = "pmax")]
    #[validate(range(min = 0.0))]
    pub max_output: f64,
}

impl PlantSpec {
    pub fn new(
        name: impl Into<String>,
        kind: PlantKind,
        efficiency: f64,
        min_output: f64,
        max_output: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            efficiency,
            min_output,
            max_output,
        }
    }
}

fn validate_bounds(plant: &PlantSpec) -> Result<(), ValidationError> {
    if plant.min_output > plant.max_output {
        let mut err = ValidationError::new("pmin_above_pmax");
        err.message = Some(
            format!(
                "pmin {} exceeds pmax {} for powerplant `{}`",
                plant.min_output, plant.max_output, plant.name
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}
