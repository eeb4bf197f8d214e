use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::DispatchSettings;

/// A plant reduced to the numbers dispatch works with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPlant {
    /// Cost of one MWh of effective output (euro/MWh).
    pub cost_per_unit_output: f64,
    /// Always strictly positive.
    pub efficiency: f64,
    pub min_output: f64,
    pub max_output: f64,
}

impl NormalizedPlant {
    pub fn new(
        cost_per_unit_output: f64,
        efficiency: f64,
        min_output: f64,
        max_output: f64,
    ) -> Self {
        Self {
            cost_per_unit_output,
            efficiency,
            min_output,
            max_output,
        }
    }

    /// Room between floor and ceiling.
    pub fn spare_capacity(&self) -> f64 {
        (self.max_output - self.min_output).max(0.0)
    }

    pub fn effective(&self, output: f64) -> f64 {
        output * self.efficiency
    }
}

/// Result of one dispatch run.
///
/// `outputs[i]` belongs to plant `i` of the input slice; `order` is the
/// merit order the plants were considered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchPlan {
    pub outputs: Vec<f64>,
    pub order: Vec<usize>,
    pub reached: bool,
    pub target_load: f64,
    pub achieved_load: f64,
}

impl DispatchPlan {
    /// Load still missing. Negative when the floors alone overshoot the target.
    pub fn shortfall(&self) -> f64 {
        self.target_load - self.achieved_load
    }

    pub fn total_cost(&self, plants: &[NormalizedPlant]) -> f64 {
        plants
            .iter()
            .zip(&self.outputs)
            .map(|(p, &out)| p.effective(out) * p.cost_per_unit_output)
            .sum()
    }
}

pub trait DispatchStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn dispatch(
        &self,
        plants: &[NormalizedPlant],
        target_load: f64,
        settings: &DispatchSettings,
    ) -> Result<DispatchPlan>;
}

/// Sum of `output × efficiency` over all plants.
pub fn effective_load(plants: &[NormalizedPlant], outputs: &[f64]) -> f64 {
    plants.iter().zip(outputs).map(|(p, &out)| p.effective(out)).sum()
}
