//! Analysis module - association testing and regression modeling
//!
//! Ties the survey schema to the statistics layer: which fields cross
//! which, and which covariates enter which model.

pub mod associations;
pub mod models;

pub use associations::*;
pub use models::*;
