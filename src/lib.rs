//! Powerplant production planning.
//!
//! Plants from a request are normalized to a cost per unit of delivered
//! output ([`optimizer::normalize`]) and then dispatched in merit order
//! ([`optimizer::dispatch`]) until the requested load is met. The `api`
//! module exposes this over HTTP as `POST /productionplan`.

pub mod api;
pub mod config;
pub mod controller;
pub mod domain;
pub mod optimizer;
pub mod telemetry;
