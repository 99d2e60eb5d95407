//! Descriptive statistics and normality diagnostics for continuous fields.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::pipeline::schema::{numeric_column, require_columns};

/// Summary of one continuous field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    /// Field name
    pub field: String,
    /// Count of non-missing values
    pub n: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub sd: f64,
    /// Median of the non-missing values
    pub median: f64,
    /// Shapiro-Francia W' normality statistic (1.0 = perfectly normal order)
    pub normality_w: f64,
    /// Q-Q diagnostic plot data: (theoretical normal quantile, ordered value)
    pub qq: Vec<(f64, f64)>,
}

/// Per-field descriptive report over an ordered list of continuous fields.
#[derive(Debug, Clone, Serialize)]
pub struct DescriptiveReport {
    pub fields: Vec<FieldSummary>,
}

/// Summarize the named continuous fields of a dataset.
///
/// Missing values are excluded per field; a field needs at least three
/// observed values for the normality statistic.
pub fn summarize(df: &DataFrame, fields: &[&str]) -> Result<DescriptiveReport> {
    require_columns(df, "descriptive", fields)?;

    let mut summaries = Vec::with_capacity(fields.len());
    for field in fields {
        let values: Vec<f64> = numeric_column(df, field)?
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect();
        summaries.push(summarize_values(field, &values)?);
    }

    Ok(DescriptiveReport { fields: summaries })
}

fn summarize_values(field: &str, values: &[f64]) -> Result<FieldSummary> {
    let n = values.len();
    if n == 0 {
        anyhow::bail!("field '{}' has no observed values to summarize", field);
    }

    // Welford's single-pass mean/variance for numerical stability
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, &x) in values.iter().enumerate() {
        let delta = x - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (x - mean);
    }
    let sd = if n > 1 { (m2 / (n - 1) as f64).sqrt() } else { 0.0 };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };

    let (normality_w, qq) = shapiro_francia(&sorted)?;

    Ok(FieldSummary {
        field: field.to_string(),
        n,
        mean,
        sd,
        median,
        normality_w,
        qq,
    })
}

/// Shapiro-Francia W': squared correlation between the order statistics and
/// their expected normal quantiles (Blom approximation). Also returns the
/// Q-Q pairs used for the diagnostic plot.
///
/// Takes the values already sorted ascending. Degenerate inputs (fewer than
/// three values, or zero variance) yield a NaN statistic and the raw pairs.
fn shapiro_francia(sorted: &[f64]) -> Result<(f64, Vec<(f64, f64)>)> {
    let n = sorted.len();
    let normal = Normal::new(0.0, 1.0)?;

    let quantiles: Vec<f64> = (1..=n)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (n as f64 + 0.25)))
        .collect();
    let qq: Vec<(f64, f64)> = quantiles.iter().copied().zip(sorted.iter().copied()).collect();

    if n < 3 {
        return Ok((f64::NAN, qq));
    }

    let mean = sorted.iter().sum::<f64>() / n as f64;
    let ss_x: f64 = sorted.iter().map(|x| (x - mean) * (x - mean)).sum();
    let ss_m: f64 = quantiles.iter().map(|m| m * m).sum();
    // Blom quantiles are symmetric around zero, so no centering term for m
    let cross: f64 = quantiles.iter().zip(sorted.iter()).map(|(m, x)| m * x).sum();

    if ss_x == 0.0 || ss_m == 0.0 {
        return Ok((f64::NAN, qq));
    }

    Ok(((cross * cross) / (ss_m * ss_x), qq))
}
