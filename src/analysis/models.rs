//! The three adjusted logistic regression models.
//!
//! Each model is declared as data - outcome, covariates with their
//! categorical reference levels, and the subgroup it is fitted on - and a
//! single assembly function builds the complete-case design matrix and
//! delegates the fit to the IRLS layer.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use crate::error::PipelineError;
use crate::pipeline::schema::{self, numeric_column, require_columns};
use crate::stats::logit::{fit_logit, LogitConfig, LogitFit};

/// One model covariate: entered as-is, or dummy-coded against a reference level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Covariate {
    /// Continuous covariate entered on its observed scale
    Continuous(&'static str),
    /// Categorical covariate dummy-coded as `value != reference`
    Categorical {
        field: &'static str,
        reference: i64,
    },
}

impl Covariate {
    /// Source column name.
    pub fn field(self) -> &'static str {
        match self {
            Covariate::Continuous(field) => field,
            Covariate::Categorical { field, .. } => field,
        }
    }

    /// Term label used in the regression report.
    pub fn term_name(self) -> String {
        match self {
            Covariate::Continuous(field) => field.to_string(),
            Covariate::Categorical { field, reference } => {
                format!("{} (ref={})", field, reference)
            }
        }
    }

    /// Encode one observed value for the design matrix.
    fn encode(self, value: f64) -> f64 {
        match self {
            Covariate::Continuous(_) => value,
            // Single dummy: 1 when away from the reference level
            Covariate::Categorical { reference, .. } => {
                if (value - reference as f64).abs() > f64::EPSILON {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Declaration of one logistic regression model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSpec {
    /// Human-readable model label, including its subgroup
    pub label: &'static str,
    /// Binary outcome column (event = 1)
    pub outcome: &'static str,
    /// Subgroup the model is restricted to
    pub subgroup: &'static str,
    /// Covariates in entry order
    pub covariates: Vec<Covariate>,
}

/// Model 1: work burnout over the whole cohort, adjusted for trunk pain,
/// demographics, work pattern and chronic disease. Gender enters with the
/// male code (1) as reference; trunk pain and hypertension with 0 as
/// reference.
pub fn overall_work_burnout_model() -> ModelSpec {
    ModelSpec {
        label: "work burnout, all respondents",
        outcome: schema::JGROUP,
        subgroup: "all respondents",
        covariates: vec![
            Covariate::Categorical {
                field: schema::GROUP1,
                reference: 0,
            },
            Covariate::Continuous(schema::SENIORITY),
            Covariate::Continuous(schema::AGE),
            Covariate::Categorical {
                field: schema::GENDER,
                reference: 1,
            },
            Covariate::Continuous(schema::WORK_HOURS),
            Covariate::Continuous(schema::SLEEP_HOURS),
            Covariate::Continuous(schema::DIABETES),
            Covariate::Categorical {
                field: schema::HYPERTENSION,
                reference: 0,
            },
        ],
    }
}

/// Model 2: depression risk among female respondents, adjusted for all
/// three pain regions.
pub fn female_depression_model() -> ModelSpec {
    ModelSpec {
        label: "depression risk, female respondents",
        outcome: schema::BGROUP,
        subgroup: "female",
        covariates: vec![
            Covariate::Continuous(schema::GROUP1),
            Covariate::Continuous(schema::GROUP2),
            Covariate::Continuous(schema::GROUP3),
            Covariate::Continuous(schema::AGE),
            Covariate::Continuous(schema::SENIORITY),
            Covariate::Continuous(schema::WORK_HOURS),
            Covariate::Continuous(schema::SLEEP_HOURS),
            Covariate::Continuous(schema::DIABETES),
            Covariate::Continuous(schema::HYPERTENSION),
        ],
    }
}

/// Model 3: work burnout among senior respondents (at or above the
/// 22-month seniority median).
pub fn senior_work_burnout_model() -> ModelSpec {
    ModelSpec {
        label: "work burnout, senior respondents",
        outcome: schema::JGROUP,
        subgroup: "seniority_cat=2",
        covariates: vec![
            Covariate::Continuous(schema::GROUP1),
            Covariate::Continuous(schema::GROUP2),
            Covariate::Continuous(schema::GROUP3),
            Covariate::Continuous(schema::AGE),
            Covariate::Continuous(schema::WORK_HOURS),
            Covariate::Continuous(schema::SLEEP_HOURS),
            Covariate::Continuous(schema::DIABETES),
            Covariate::Continuous(schema::HYPERTENSION),
        ],
    }
}

/// Fit a declared model on a (possibly subgroup-filtered) dataset.
///
/// Builds the design matrix over complete cases only: a row enters the fit
/// iff the outcome and every covariate are observed. The event modeled is
/// P(outcome = 1).
pub fn fit_model(df: &DataFrame, spec: &ModelSpec, config: &LogitConfig) -> Result<LogitFit> {
    let mut required: Vec<&str> = vec![spec.outcome];
    required.extend(spec.covariates.iter().map(|c| c.field()));
    require_columns(df, "regression", &required)?;

    if df.height() == 0 {
        return Err(PipelineError::EmptySubgroup {
            subgroup: spec.subgroup.to_string(),
            model: spec.label.to_string(),
        }
        .into());
    }

    let outcome = numeric_column(df, spec.outcome)?;
    let columns: Vec<Vec<Option<f64>>> = spec
        .covariates
        .iter()
        .map(|c| numeric_column(df, c.field()))
        .collect::<Result<_>>()?;

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut y: Vec<f64> = Vec::new();
    for i in 0..df.height() {
        let Some(out) = outcome[i] else { continue };
        let covariates: Option<Vec<f64>> = spec
            .covariates
            .iter()
            .zip(columns.iter())
            .map(|(c, col)| col[i].map(|v| c.encode(v)))
            .collect();
        if let Some(covariates) = covariates {
            rows.push(covariates);
            y.push(out);
        }
    }

    if rows.is_empty() {
        return Err(PipelineError::EmptySubgroup {
            subgroup: spec.subgroup.to_string(),
            model: spec.label.to_string(),
        }
        .into());
    }

    let term_names: Vec<String> = spec.covariates.iter().map(|c| c.term_name()).collect();
    fit_logit(spec.label, spec.outcome, &term_names, &rows, &y, config)
}
