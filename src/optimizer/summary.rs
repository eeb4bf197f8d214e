use serde::Serialize;

use super::{DispatchPlan, NormalizedPlant};

/// Delivered load and cost of one plant in a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantContribution {
    pub index: usize,
    pub output: f64,
    pub effective_output: f64,
    pub cost: f64,
}

/// Cost and load totals of a plan, plants listed in merit order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub contributions: Vec<PlantContribution>,
    pub total_load: f64,
    pub total_cost: f64,
    /// Produced minus requested load.
    pub load_difference: f64,
}

impl PlanSummary {
    pub fn new(plants: &[NormalizedPlant], plan: &DispatchPlan) -> Self {
        let contributions: Vec<PlantContribution> = plan
            .order
            .iter()
            .map(|&index| {
                let plant = &plants[index];
                let output = plan.outputs[index];
                let effective_output = plant.effective(output);
                PlantContribution {
                    index,
                    output,
                    effective_output,
                    cost: effective_output * plant.cost_per_unit_output,
                }
            })
            .collect();

        let total_load: f64 = contributions.iter().map(|c| c.effective_output).sum();
        let total_cost: f64 = contributions.iter().map(|c| c.cost).sum();

        Self {
            contributions,
            total_load,
            total_cost,
            load_difference: total_load - plan.target_load,
        }
    }
}
