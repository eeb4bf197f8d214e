//! Linear programming dispatcher
//!
//! Solves the continuous dispatch problem exactly, as a reference for the
//! merit-order result:
//!
//! ```text
//! minimise    Σ cost_i × eff_i × x_i
//! subject to  Σ eff_i × x_i = load
//!             min_i <= x_i <= max_i
//! ```
//!
//! Loads outside the achievable range have no LP solution. Those fall back
//! to the merit-order walk, which returns a best-effort plan with
//! `reached = false`.
//!
//! Only available with the `optimization` feature, which pulls in `good_lp`
//! with its pure Rust `minilp` backend.

use anyhow::{Context, Result};
use tracing::debug;

use crate::optimizer::{
    dispatch, effective_load, merit_order, DispatchPlan, DispatchSettings, DispatchStrategy,
    NormalizedPlant,
};

/// Lowest and highest effective load the plants can deliver together.
///
/// Plants at or below the efficiency floor only count with their floor.
pub fn achievable_load(plants: &[NormalizedPlant], settings: &DispatchSettings) -> (f64, f64) {
    plants.iter().fold((0.0, 0.0), |(low, high), p| {
        let ceiling = if p.efficiency <= settings.epsilon {
            p.min_output
        } else {
            p.max_output
        };
        (low + p.effective(p.min_output), high + p.effective(ceiling))
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LinearProgramDispatcher;

impl LinearProgramDispatcher {
    #[cfg(feature = "optimization")]
    fn solve_lp(
        &self,
        plants: &[NormalizedPlant],
        target_load: f64,
        settings: &DispatchSettings,
    ) -> Result<Vec<f64>> {
        use good_lp::{
            constraint, default_solver, variable, variables, Expression, Solution, SolverModel,
            Variable,
        };

        let mut vars = variables!();

        // Plants that cannot contribute are pinned to their floor
        let outputs: Vec<Variable> = plants
            .iter()
            .map(|p| {
                let ceiling = if p.efficiency <= settings.epsilon {
                    p.min_output
                } else {
                    p.max_output
                };
                vars.add(variable().min(p.min_output).max(ceiling))
            })
            .collect();

        let cost: Expression = plants
            .iter()
            .zip(&outputs)
            .map(|(p, &x)| (p.cost_per_unit_output * p.efficiency) * x)
            .sum();
        let load: Expression = plants
            .iter()
            .zip(&outputs)
            .map(|(p, &x)| p.efficiency * x)
            .sum();

        let solution = vars
            .minimise(cost)
            .using(default_solver)
            .with(constraint!(load == target_load))
            .solve()
            .context("linear program has no feasible dispatch")?;

        Ok(plants
            .iter()
            .zip(&outputs)
            .map(|(p, &x)| solution.value(x).clamp(p.min_output, p.max_output))
            .collect())
    }

    #[cfg(not(feature = "optimization"))]
    fn solve_lp(
        &self,
        _plants: &[NormalizedPlant],
        _target_load: f64,
        _settings: &DispatchSettings,
    ) -> Result<Vec<f64>> {
        anyhow::bail!("linear program dispatch requires the 'optimization' feature to be enabled");
    }
}

impl DispatchStrategy for LinearProgramDispatcher {
    fn name(&self) -> &'static str {
        "linear-program"
    }

    fn dispatch(
        &self,
        plants: &[NormalizedPlant],
        target_load: f64,
        settings: &DispatchSettings,
    ) -> Result<DispatchPlan> {
        let (low, high) = achievable_load(plants, settings);
        let outside = target_load < low - settings.load_tolerance
            || target_load > high + settings.load_tolerance;
        if outside {
            debug!(
                target_load,
                low,
                high,
                "load outside achievable range, falling back to merit order"
            );
            return Ok(dispatch(plants, target_load, settings));
        }

        let outputs = self
            .solve_lp(plants, target_load, settings)
            .context("linear program dispatch failed")?;
        let achieved_load = effective_load(plants, &outputs);

        Ok(DispatchPlan {
            reached: settings.is_reached(achieved_load, target_load),
            order: merit_order(plants),
            outputs,
            target_load,
            achieved_load,
        })
    }
}
