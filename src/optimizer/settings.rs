use serde::{Deserialize, Serialize};

/// Numeric tolerances and cost switches shared by normalization and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispatchSettings {
    /// Efficiency floor. Plants at or below it never contribute load.
    pub epsilon: f64,
    /// Largest gap between produced and requested load still counted as reached (MWh).
    pub load_tolerance: f64,
    /// Add the CO2 cost of emitting plants to their fuel price.
    pub include_co2: bool,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            epsilon: 1e-12,
            load_tolerance: 1e-6,
            include_co2: false,
        }
    }
}

impl DispatchSettings {
    pub fn with_co2(mut self, include_co2: bool) -> Self {
        self.include_co2 = include_co2;
        self
    }

    pub fn is_reached(&self, achieved: f64, target: f64) -> bool {
        (achieved - target).abs() <= self.load_tolerance
    }
}
