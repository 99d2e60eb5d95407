//! Integration tests for the regression modeling stage

use ergostat::analysis::*;
use ergostat::pipeline::*;
use ergostat::stats::LogitConfig;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_overall_model_fits_and_converges() {
    let prepared = derive_outcomes(&enriched_dataframe()).unwrap();

    let fit = fit_model(&prepared, &overall_work_burnout_model(), &LogitConfig::default())
        .unwrap();

    assert!(fit.converged);
    assert_eq!(fit.outcome, "jgroup");
    assert_eq!(fit.n, 160);
    assert!(fit.events > 0 && fit.events < fit.n);
    assert!(fit.log_likelihood < 0.0);

    // Intercept plus the eight covariates, in entry order
    let terms: Vec<&str> = fit.terms.iter().map(|t| t.term.as_str()).collect();
    assert_eq!(
        terms,
        vec![
            "intercept",
            "group1 (ref=0)",
            "seniority",
            "age",
            "gender (ref=1)",
            "work_hours",
            "sleep_hours",
            "diabetes",
            "hypertension (ref=0)",
        ]
    );

    for term in &fit.terms {
        assert!(term.std_error > 0.0, "{} has no standard error", term.term);
        assert!(term.odds_ratio > 0.0);
        assert!(
            term.ci_low < term.odds_ratio && term.odds_ratio < term.ci_high,
            "{} CI does not bracket the OR",
            term.term
        );
        assert!(term.p_value >= 0.0 && term.p_value <= 1.0);
    }
}

#[test]
fn test_female_model_fits_on_female_subset_only() {
    let prepared = derive_outcomes(&enriched_dataframe()).unwrap();
    let (_male, female) = split_by_gender(&prepared).unwrap();

    let fit = fit_model(&female, &female_depression_model(), &LogitConfig::default()).unwrap();

    assert!(fit.converged);
    assert_eq!(fit.outcome, "bgroup");
    assert_eq!(fit.n, 80);
    // Intercept + nine covariates
    assert_eq!(fit.terms.len(), 10);
}

#[test]
fn test_senior_model_fits_on_senior_subset() {
    let prepared = derive_outcomes(&enriched_dataframe()).unwrap();
    let senior = senior_subset(&prepared).unwrap();

    let fit = fit_model(&senior, &senior_work_burnout_model(), &LogitConfig::default()).unwrap();

    assert!(fit.converged);
    assert_eq!(fit.outcome, "jgroup");
    assert_eq!(fit.n, 80);
    // Intercept + eight covariates; no seniority term in the senior model
    assert_eq!(fit.terms.len(), 9);
    assert!(fit.terms.iter().all(|t| t.term != "seniority"));
}

#[test]
fn test_trunk_pain_raises_work_burnout_odds_when_built_in() {
    // Rebuild the fixture with work burnout strongly tied to neck pain
    let mut df = survey_dataframe();
    let neck: Vec<Option<i64>> = integer_column(&df, "neck").unwrap();
    let j_score: Vec<f64> = neck
        .iter()
        .enumerate()
        .map(|(i, n)| {
            // Pain blocks 4/5 above the cut, pain-free blocks 1/5, with the
            // first row of every block flipped so the designs overlap
            let flipped = i % 5 == 0;
            match (n, flipped) {
                (Some(1), false) => 55.0,
                (Some(1), true) => 20.0,
                (_, false) => 20.0,
                (_, true) => 55.0,
            }
        })
        .collect();
    df.with_column(polars::prelude::Column::new("j_score".into(), j_score))
        .unwrap();

    let prepared =
        derive_outcomes(&flag_regions(&recode_scores(&df).unwrap()).unwrap()).unwrap();
    let fit = fit_model(&prepared, &overall_work_burnout_model(), &LogitConfig::default())
        .unwrap();

    let trunk = fit
        .terms
        .iter()
        .find(|t| t.term.starts_with("group1"))
        .unwrap();
    assert!(
        trunk.odds_ratio > 1.0,
        "expected trunk pain OR above 1, got {}",
        trunk.odds_ratio
    );
    assert!(trunk.p_value < 0.05);
}

#[test]
fn test_separation_reported_not_estimated() {
    // Work burnout perfectly determined by trunk pain: no finite MLE
    let mut df = survey_dataframe();
    let neck: Vec<Option<i64>> = integer_column(&df, "neck").unwrap();
    let j_score: Vec<f64> = neck
        .iter()
        .map(|n| if *n == Some(1) { 55.0 } else { 20.0 })
        .collect();
    df.with_column(polars::prelude::Column::new("j_score".into(), j_score))
        .unwrap();

    let prepared =
        derive_outcomes(&flag_regions(&recode_scores(&df).unwrap()).unwrap()).unwrap();
    let err = fit_model(&prepared, &overall_work_burnout_model(), &LogitConfig::default())
        .unwrap_err();

    let msg = err.to_string();
    assert!(
        msg.contains("separation") || msg.contains("converge") || msg.contains("singular"),
        "expected a separation/convergence error, got: {}",
        msg
    );
}
