//! Merit-order dispatch
//!
//! Plants start at their floor and are raised cheapest first until the
//! requested load is met or every plant sits at its ceiling.

use anyhow::Result;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use tracing::debug;

use super::{DispatchPlan, DispatchSettings, DispatchStrategy, NormalizedPlant};

/// Merit-order dispatcher:
/// - Plants are brought online cheapest first, ties going to the more efficient plant
/// - Every plant starts at its floor and is only ever raised toward its ceiling
/// - The walk stops once the requested load is met within tolerance
#[derive(Debug, Clone, Copy, Default)]
pub struct MeritOrderDispatcher;

impl DispatchStrategy for MeritOrderDispatcher {
    fn name(&self) -> &'static str {
        "merit-order"
    }

    fn dispatch(
        &self,
        plants: &[NormalizedPlant],
        target_load: f64,
        settings: &DispatchSettings,
    ) -> Result<DispatchPlan> {
        Ok(dispatch(plants, target_load, settings))
    }
}

/// Plant indices sorted by ascending cost, then descending efficiency.
///
/// The sort is stable, so fully tied plants keep their input order.
pub fn merit_order(plants: &[NormalizedPlant]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..plants.len()).collect();
    order.sort_by_key(|&i| {
        (
            OrderedFloat(plants[i].cost_per_unit_output),
            Reverse(OrderedFloat(plants[i].efficiency)),
        )
    });
    order
}

pub fn dispatch(
    plants: &[NormalizedPlant],
    target_load: f64,
    settings: &DispatchSettings,
) -> DispatchPlan {
    let order = merit_order(plants);

    // Floors cannot be shut off, so the plan starts there
    let mut outputs: Vec<f64> = plants.iter().map(|p| p.min_output).collect();
    let mut current_load: f64 = plants.iter().map(|p| p.effective(p.min_output)).sum();

    for &i in &order {
        if settings.is_reached(current_load, target_load) {
            break;
        }

        let plant = &plants[i];
        if plant.efficiency <= settings.epsilon {
            debug!(plant = i, "skipping plant with degenerate efficiency");
            continue;
        }

        let needed = (target_load - current_load) / plant.efficiency;
        let step = needed.min(plant.spare_capacity());
        if step < 0.0 {
            // Floors already overshoot the target; never dispatch below a floor
            continue;
        }

        let output = (plant.min_output + step).min(plant.max_output);
        current_load += plant.effective(output - outputs[i]);
        outputs[i] = output;

        debug!(
            plant = i,
            output,
            current_load,
            target_load,
            "dispatched plant"
        );
    }

    DispatchPlan {
        outputs,
        order,
        reached: settings.is_reached(current_load, target_load),
        target_load,
        achieved_load: current_load,
    }
}
