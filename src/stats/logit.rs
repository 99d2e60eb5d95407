//! Binary logistic regression via iteratively reweighted least squares.
//!
//! Newton-Raphson on the log-likelihood with `faer` supplying the linear
//! algebra: each step solves (X^T W X) d = X^T (y - p) with a partial-pivot
//! LU, and the final information matrix inverse gives the Wald standard
//! errors. The event modeled is P(y = 1).

use anyhow::Result;
use faer::prelude::*;
use faer::Mat;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::PipelineError;

/// Fitting parameters for the IRLS loop.
#[derive(Debug, Clone, Copy)]
pub struct LogitConfig {
    /// Maximum Newton iterations before reporting non-convergence
    pub max_iterations: usize,
    /// Convergence tolerance on the largest coefficient update
    pub tolerance: f64,
    /// Coefficient magnitude treated as evidence of separation
    pub separation_threshold: f64,
}

impl Default for LogitConfig {
    fn default() -> Self {
        Self {
            max_iterations: 25,
            tolerance: 1e-8,
            separation_threshold: 30.0,
        }
    }
}

/// One fitted model term.
#[derive(Debug, Clone, Serialize)]
pub struct TermEstimate {
    /// Term name ("intercept" or a covariate)
    pub term: String,
    /// Log-odds coefficient
    pub coefficient: f64,
    /// Wald standard error
    pub std_error: f64,
    /// Wald z statistic
    pub z: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// exp(coefficient)
    pub odds_ratio: f64,
    /// 95% Wald confidence interval for the odds ratio
    pub ci_low: f64,
    pub ci_high: f64,
}

/// A fitted logistic regression model.
#[derive(Debug, Clone, Serialize)]
pub struct LogitFit {
    /// Model label (e.g. the subgroup it was fitted on)
    pub model: String,
    /// Outcome column name
    pub outcome: String,
    /// Complete-case rows used in the fit
    pub n: usize,
    /// Rows with outcome = 1
    pub events: usize,
    /// Log-likelihood at the final estimates
    pub log_likelihood: f64,
    /// Newton iterations performed
    pub iterations: usize,
    /// Whether the tolerance was met
    pub converged: bool,
    /// Intercept followed by the covariate estimates
    pub terms: Vec<TermEstimate>,
}

/// Fit a binary logistic regression of `y` on the covariate rows.
///
/// `rows` holds one covariate vector per observation (no intercept column;
/// one is prepended internally). `y` must be 0/1. Fails with
/// `SeparationDetected` when coefficients diverge, `NonConvergence` when
/// the iteration cap is hit, and a plain error when the design is singular
/// or has more terms than observations.
pub fn fit_logit(
    model: &str,
    outcome: &str,
    term_names: &[String],
    rows: &[Vec<f64>],
    y: &[f64],
    config: &LogitConfig,
) -> Result<LogitFit> {
    let n = rows.len();
    let p = term_names.len() + 1; // intercept

    if n == 0 {
        return Err(PipelineError::EmptySubgroup {
            subgroup: "complete cases".to_string(),
            model: model.to_string(),
        }
        .into());
    }
    if n != y.len() {
        anyhow::bail!("design has {} rows but outcome has {} values", n, y.len());
    }
    if n < p {
        anyhow::bail!(
            "model '{}' has {} terms but only {} complete cases",
            model,
            p,
            n
        );
    }

    let events = y.iter().filter(|&&v| v == 1.0).count();
    if events == 0 || events == n {
        // Constant outcome: the MLE does not exist
        return Err(PipelineError::SeparationDetected {
            model: model.to_string(),
        }
        .into());
    }

    // Design matrix with intercept column
    let mut x = Mat::<f64>::zeros(n, p);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != p - 1 {
            anyhow::bail!("row {} has {} covariates, expected {}", i, row.len(), p - 1);
        }
        x[(i, 0)] = 1.0;
        for (j, &v) in row.iter().enumerate() {
            x[(i, j + 1)] = v;
        }
    }

    let mut beta = vec![0.0f64; p];
    let mut converged = false;
    let mut iterations = 0;

    for iter in 1..=config.max_iterations {
        iterations = iter;

        // Linear predictor and fitted probabilities
        let mut eta = vec![0.0f64; n];
        for i in 0..n {
            let mut acc = 0.0;
            for j in 0..p {
                acc += x[(i, j)] * beta[j];
            }
            eta[i] = acc;
        }
        let prob: Vec<f64> = eta.iter().map(|e| 1.0 / (1.0 + (-e).exp())).collect();

        // Score X^T (y - p) and information X^T W X, W = diag(p(1-p))
        let mut score = Mat::<f64>::zeros(p, 1);
        let mut info = Mat::<f64>::zeros(p, p);
        for i in 0..n {
            let resid = y[i] - prob[i];
            let w = prob[i] * (1.0 - prob[i]);
            for j in 0..p {
                score[(j, 0)] += x[(i, j)] * resid;
                for k in j..p {
                    info[(j, k)] += w * x[(i, j)] * x[(i, k)];
                }
            }
        }
        for j in 0..p {
            for k in 0..j {
                info[(j, k)] = info[(k, j)];
            }
        }

        let delta = info.partial_piv_lu().solve(&score);

        let mut max_step = 0.0f64;
        for j in 0..p {
            let d = delta[(j, 0)];
            if !d.is_finite() {
                anyhow::bail!("singular information matrix while fitting '{}'", model);
            }
            beta[j] += d;
            max_step = max_step.max(d.abs());
        }

        if beta.iter().any(|b| b.abs() > config.separation_threshold) {
            return Err(PipelineError::SeparationDetected {
                model: model.to_string(),
            }
            .into());
        }

        if max_step < config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        return Err(PipelineError::NonConvergence {
            model: model.to_string(),
            iterations,
        }
        .into());
    }

    // Final log-likelihood via the numerically stable eta form
    let mut log_likelihood = 0.0;
    let mut info = Mat::<f64>::zeros(p, p);
    for i in 0..n {
        let mut eta = 0.0;
        for j in 0..p {
            eta += x[(i, j)] * beta[j];
        }
        log_likelihood += y[i] * eta - softplus(eta);

        let prob = 1.0 / (1.0 + (-eta).exp());
        let w = prob * (1.0 - prob);
        for j in 0..p {
            for k in 0..p {
                info[(j, k)] += w * x[(i, j)] * x[(i, k)];
            }
        }
    }

    let covariance = info.partial_piv_lu().inverse();

    let normal = Normal::new(0.0, 1.0)?;
    let z975 = normal.inverse_cdf(0.975);

    let mut terms = Vec::with_capacity(p);
    let mut names = vec!["intercept".to_string()];
    names.extend(term_names.iter().cloned());
    for (j, name) in names.into_iter().enumerate() {
        let coefficient = beta[j];
        let variance = covariance[(j, j)];
        if !variance.is_finite() || variance < 0.0 {
            anyhow::bail!("singular information matrix while fitting '{}'", model);
        }
        let std_error = variance.sqrt();
        let z = coefficient / std_error;
        let p_value = 2.0 * (1.0 - normal.cdf(z.abs()));
        terms.push(TermEstimate {
            term: name,
            coefficient,
            std_error,
            z,
            p_value,
            odds_ratio: coefficient.exp(),
            ci_low: (coefficient - z975 * std_error).exp(),
            ci_high: (coefficient + z975 * std_error).exp(),
        });
    }

    Ok(LogitFit {
        model: model.to_string(),
        outcome: outcome.to_string(),
        n,
        events,
        log_likelihood,
        iterations,
        converged,
        terms,
    })
}

/// ln(1 + e^x) without overflow for large |x|.
fn softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}
