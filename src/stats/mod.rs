//! Statistics module - the delegated statistics-library layer
//!
//! Descriptive summaries, chi-square tests, and logistic regression,
//! independent of the survey schema.

pub mod contingency;
pub mod descriptive;
pub mod logit;

pub use contingency::*;
pub use descriptive::*;
pub use logit::*;
