//! Ergostat: Occupational-Health Survey Statistics Library
//!
//! A library for analyzing clinical/occupational-health survey data:
//! clinical score recoding (BSRS-5, Copenhagen Burnout Inventory),
//! anatomical pain-region aggregation, chi-square association tests,
//! and adjusted logistic regression.

pub mod analysis;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod utils;
