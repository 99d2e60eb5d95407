//! Pipeline error types.
//!
//! Each variant captures a specific failure mode of a pipeline stage:
//! schema presence checks, score classification, subgroup filtering, and
//! the iterative regression fit. Stage functions raise these through
//! `anyhow::Result` so the CLI can report them with full context.

use thiserror::Error;

/// Errors raised by the analysis pipeline stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A referenced column is absent from the dataset schema.
    #[error("column '{field}' not found in dataset (required by {stage})")]
    MissingField {
        /// Name of the missing column
        field: String,
        /// Pipeline stage that required it
        stage: &'static str,
    },

    /// A non-missing score value lands outside every defined clinical band.
    ///
    /// The cut-point rules are exhaustive over the instrument's valid range;
    /// anything else (e.g. a negative total) is surfaced instead of being
    /// silently assigned to a band.
    #[error("value {value} in column '{field}' (row {row}) falls outside all defined bands")]
    UnclassifiedValue {
        /// Source score column
        field: String,
        /// Zero-based row index of the offending value
        row: usize,
        /// The out-of-band value
        value: f64,
    },

    /// A stratified filter produced zero rows, making the model undefined.
    #[error("subgroup '{subgroup}' is empty - cannot fit '{model}'")]
    EmptySubgroup {
        /// Label of the filtered subgroup
        subgroup: String,
        /// Label of the model that needed it
        model: String,
    },

    /// The iterative fit ran out of iterations before meeting tolerance.
    #[error("logistic regression '{model}' did not converge after {iterations} iterations")]
    NonConvergence {
        /// Label of the model
        model: String,
        /// Iterations performed before giving up
        iterations: usize,
    },

    /// The fit detected perfect or quasi-complete separation.
    ///
    /// Coefficients diverge and fitted probabilities pin at 0/1; reported
    /// instead of returning spurious estimates.
    #[error("separation detected while fitting '{model}' - coefficient estimates diverge")]
    SeparationDetected {
        /// Label of the model
        model: String,
    },

    /// A contingency table margin has fewer than two observed levels.
    #[error(
        "contingency table {row_field} x {col_field} is degenerate ({rows}x{cols} observed levels)"
    )]
    DegenerateTable {
        /// Row variable name
        row_field: String,
        /// Column variable name
        col_field: String,
        /// Observed row levels
        rows: usize,
        /// Observed column levels
        cols: usize,
    },
}
