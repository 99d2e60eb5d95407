//! Pearson chi-square tests of independence on contingency tables.

use std::collections::BTreeMap;

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::error::PipelineError;
use crate::pipeline::schema::{integer_column, require_columns};

/// Result of one chi-square test of independence.
#[derive(Debug, Clone, Serialize)]
pub struct ChiSquareTest {
    /// Row variable name
    pub row_field: String,
    /// Column variable name
    pub col_field: String,
    /// Number of complete (both-observed) pairs in the table
    pub n: usize,
    /// Pearson X^2 statistic
    pub statistic: f64,
    /// Degrees of freedom: (rows - 1) * (cols - 1)
    pub dof: usize,
    /// Upper-tail p-value from the chi-squared distribution
    pub p_value: f64,
}

/// Cross two categorical columns and run Pearson's chi-square test.
///
/// Rows where either value is missing are excluded. An unknown field fails
/// with `MissingField`; a table with fewer than two observed levels on
/// either margin fails with `DegenerateTable` rather than producing a NaN
/// statistic.
pub fn chi_square_test(df: &DataFrame, row_field: &str, col_field: &str) -> Result<ChiSquareTest> {
    require_columns(df, "association", &[row_field, col_field])?;

    let rows = integer_column(df, row_field)?;
    let cols = integer_column(df, col_field)?;

    let pairs: Vec<(i64, i64)> = rows
        .into_iter()
        .zip(cols)
        .filter_map(|(r, c)| Some((r?, c?)))
        .collect();

    chi_square_from_pairs(row_field, col_field, &pairs)
}

/// Chi-square test over pre-extracted level pairs.
fn chi_square_from_pairs(
    row_field: &str,
    col_field: &str,
    pairs: &[(i64, i64)],
) -> Result<ChiSquareTest> {
    let n = pairs.len();

    // Index the observed levels; BTreeMap keeps them in band order
    let mut row_levels: BTreeMap<i64, usize> = pairs.iter().map(|(r, _)| (*r, 0)).collect();
    let mut col_levels: BTreeMap<i64, usize> = pairs.iter().map(|(_, c)| (*c, 0)).collect();
    for (index, slot) in row_levels.values_mut().enumerate() {
        *slot = index;
    }
    for (index, slot) in col_levels.values_mut().enumerate() {
        *slot = index;
    }

    let r = row_levels.len();
    let c = col_levels.len();
    if r < 2 || c < 2 {
        return Err(PipelineError::DegenerateTable {
            row_field: row_field.to_string(),
            col_field: col_field.to_string(),
            rows: r,
            cols: c,
        }
        .into());
    }

    let mut observed = vec![vec![0.0f64; c]; r];
    for (rv, cv) in pairs {
        observed[row_levels[rv]][col_levels[cv]] += 1.0;
    }

    let row_totals: Vec<f64> = observed.iter().map(|row| row.iter().sum()).collect();
    let col_totals: Vec<f64> = (0..c).map(|j| observed.iter().map(|row| row[j]).sum()).collect();
    let total = n as f64;

    let mut statistic = 0.0;
    for i in 0..r {
        for j in 0..c {
            let expected = row_totals[i] * col_totals[j] / total;
            let diff = observed[i][j] - expected;
            statistic += diff * diff / expected;
        }
    }

    let dof = (r - 1) * (c - 1);
    let dist = ChiSquared::new(dof as f64)?;
    let p_value = 1.0 - dist.cdf(statistic);

    Ok(ChiSquareTest {
        row_field: row_field.to_string(),
        col_field: col_field.to_string(),
        n,
        statistic,
        dof,
        p_value,
    })
}
