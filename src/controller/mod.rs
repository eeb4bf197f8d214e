use anyhow::Result;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use validator::{Validate, ValidationErrors};

use crate::config::{Config, StrategyKind};
use crate::domain::ProductionPlanRequest;
use crate::optimizer::{
    normalize, DispatchPlan, DispatchSettings, DispatchStrategy, LinearProgramDispatcher,
    MeritOrderDispatcher, NormalizedPlant, PlanSummary,
};

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<DispatchController>,
}

impl AppState {
    pub fn new(cfg: &Config) -> Result<Self> {
        let controller = Arc::new(DispatchController::from_config(cfg)?);
        Ok(Self { controller })
    }
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid production plan request: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Dispatch(#[from] anyhow::Error),
}

/// A computed plan together with everything needed to present it.
#[derive(Debug, Clone)]
pub struct ProductionPlan {
    pub names: Vec<String>,
    pub plants: Vec<NormalizedPlant>,
    pub plan: DispatchPlan,
    pub summary: PlanSummary,
}

impl ProductionPlan {
    /// `(name, effective output)` pairs in merit order.
    pub fn effective_outputs(&self) -> Vec<(&str, f64)> {
        self.plan
            .order
            .iter()
            .map(|&i| (self.names[i].as_str(), self.plants[i].effective(self.plan.outputs[i])))
            .collect()
    }
}

/// Runs validation, normalization and dispatch for one request.
///
/// Holds no per-request state, so one instance serves concurrent requests.
pub struct DispatchController {
    strategy: Box<dyn DispatchStrategy>,
    settings: DispatchSettings,
}

impl DispatchController {
    pub fn new(strategy: Box<dyn DispatchStrategy>, settings: DispatchSettings) -> Self {
        Self { strategy, settings }
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        let strategy: Box<dyn DispatchStrategy> = match cfg.dispatch.strategy {
            StrategyKind::MeritOrder => Box::new(MeritOrderDispatcher),
            StrategyKind::LinearProgram => {
                if !cfg!(feature = "optimization") {
                    anyhow::bail!(
                        "dispatch strategy `linear_program` requires the 'optimization' feature"
                    );
                }
                Box::new(LinearProgramDispatcher)
            }
        };
        Ok(Self::new(strategy, cfg.dispatch.settings()))
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Dispatches already normalized plants and tells whether the load was reached.
    pub fn dispatch_probe(&self, plants: &[NormalizedPlant], target_load: f64) -> Result<bool> {
        Ok(self
            .strategy
            .dispatch(plants, target_load, &self.settings)?
            .reached)
    }

    pub fn plan(&self, request: &ProductionPlanRequest) -> Result<ProductionPlan, PlanError> {
        request.validate()?;

        let plants = normalize(&request.powerplants, &request.fuel_prices(), &self.settings);
        let plan = self
            .strategy
            .dispatch(&plants, request.load, &self.settings)?;
        let summary = PlanSummary::new(&plants, &plan);

        if plan.reached {
            info!(
                strategy = self.strategy.name(),
                load = request.load,
                plants = plants.len(),
                total_cost = summary.total_cost,
                "production plan computed"
            );
        } else {
            warn!(
                strategy = self.strategy.name(),
                load = request.load,
                achieved = plan.achieved_load,
                shortfall = plan.shortfall(),
                "requested load cannot be matched"
            );
        }

        Ok(ProductionPlan {
            names: request.names(),
            plants,
            plan,
            summary,
        })
    }
}
