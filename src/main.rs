//! Ergostat: Occupational-Health Survey Statistics CLI
//!
//! Runs the full analysis pipeline against one survey dataset: clinical
//! score recoding, pain-region aggregation, descriptive statistics,
//! chi-square association tests, and adjusted logistic regression.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use ergostat::analysis::{
    all_site_associations, association_grid, female_depression_model, fit_model,
    overall_work_burnout_model, senior_work_burnout_model,
};
use ergostat::cli::Cli;
use ergostat::pipeline::{
    derive_outcomes, flag_regions, load_dataset, recode_scores, save_dataset, senior_subset,
    split_by_gender, CONTINUOUS_FIELDS,
};
use ergostat::report::{
    display_associations, display_descriptive, display_model, export_analysis, AnalysisExport,
    AnalysisMetadata,
};
use ergostat::stats::{summarize, LogitConfig};
use ergostat::utils::{
    create_spinner, print_banner, print_completion, print_config, print_info, print_stage_error,
    print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    print_banner(env!("CARGO_PKG_VERSION"));

    // Load dataset
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let (raw, rows, cols, memory_mb) = load_dataset(&cli.input, cli.infer_schema_length)?;
    spinner.finish_and_clear();
    print_config(&cli.input, rows, cols, memory_mb);
    print_success("Dataset loaded");
    print_step_time(step_start.elapsed());

    let mut export = AnalysisExport::new(AnalysisMetadata::new(&cli.input, rows));

    // Step 1: Clinical score recoding.
    // Every later stage reads the recoded bands, so a failure here is fatal.
    print_step_header(1, "Clinical Score Recoding");
    let step_start = Instant::now();
    let recoded = recode_scores(&raw)?;
    print_success("Severity bands derived (b_score, i_score1, j_score1)");
    print_step_time(step_start.elapsed());

    // Step 2: Pain-region aggregation; also required downstream.
    print_step_header(2, "Pain-Region Aggregation");
    let step_start = Instant::now();
    let regions = flag_regions(&recoded)?;
    print_success("Region flags derived (trunk, upper extremity, lower extremity)");
    print_step_time(step_start.elapsed());

    // Steps 3-5 depend only on the enriched dataset above; each runs in
    // isolation so one failed analysis leaves the others available.

    // Step 3: Descriptive statistics
    print_step_header(3, "Descriptive Statistics");
    let step_start = Instant::now();
    match summarize(&regions, &CONTINUOUS_FIELDS) {
        Ok(report) => {
            display_descriptive(&report);
            export.descriptive = Some(report);
        }
        Err(err) => {
            print_stage_error("descriptive statistics", &err);
            export.add_failure("descriptive", &err);
        }
    }
    print_step_time(step_start.elapsed());

    // Step 4: Association tests
    print_step_header(4, "Association Tests");
    let step_start = Instant::now();
    match association_grid(&regions) {
        Ok(tests) => {
            display_associations("Region x severity (9 tables)", &tests);
            export.region_associations = Some(tests);
        }
        Err(err) => {
            print_stage_error("region associations", &err);
            export.add_failure("region associations", &err);
        }
    }
    match all_site_associations(&regions) {
        Ok(tests) => {
            display_associations("Per-site x work burnout", &tests);
            export.site_associations = Some(tests);
        }
        Err(err) => {
            print_stage_error("site associations", &err);
            export.add_failure("site associations", &err);
        }
    }
    print_step_time(step_start.elapsed());

    // Step 5: Logistic regression models
    print_step_header(5, "Logistic Regression");
    let step_start = Instant::now();
    let mut derived = regions.clone();
    match run_regressions(&regions, &mut export) {
        Ok(prepared) => derived = prepared,
        Err(err) => {
            print_stage_error("regression modeling", &err);
            export.add_failure("regression", &err);
        }
    }
    print_step_time(step_start.elapsed());

    // Save outputs
    if cli.report.is_some() || cli.out.is_some() {
        print_step_header(6, "Save Results");
    }
    if let Some(report_path) = &cli.report {
        export_analysis(&export, report_path)?;
        print_success(&format!("Report written to {}", report_path.display()));
    }
    if let Some(out_path) = &cli.out {
        save_dataset(&mut derived, out_path)?;
        print_success(&format!("Derived dataset written to {}", out_path.display()));
    }

    if !export.failures.is_empty() {
        print_info(&format!(
            "{} stage(s) failed; their reports are omitted",
            export.failures.len()
        ));
    }

    print_completion();
    Ok(())
}

/// Derive the binary outcomes and fit the three models, recording each
/// model's success or failure independently. Returns the fully derived
/// dataset for the optional `--out` export.
fn run_regressions(
    regions: &polars::prelude::DataFrame,
    export: &mut AnalysisExport,
) -> Result<polars::prelude::DataFrame> {
    let prepared = derive_outcomes(regions)?;
    print_success("Binary outcomes derived (bgroup, igroup, jgroup, seniority_cat)");

    let config = LogitConfig::default();

    // Model 1: whole cohort
    match fit_model(&prepared, &overall_work_burnout_model(), &config) {
        Ok(fit) => {
            display_model(&fit);
            export.models.push(fit);
        }
        Err(err) => {
            print_stage_error("overall work-burnout model", &err);
            export.add_failure("overall work-burnout model", &err);
        }
    }

    // Model 2: female subgroup from the gender partition
    match split_by_gender(&prepared) {
        Ok((male, female)) => {
            print_info(&format!(
                "Gender split: {} male, {} female",
                male.height(),
                female.height()
            ));
            match fit_model(&female, &female_depression_model(), &config) {
                Ok(fit) => {
                    display_model(&fit);
                    export.models.push(fit);
                }
                Err(err) => {
                    print_stage_error("female depression model", &err);
                    export.add_failure("female depression model", &err);
                }
            }
        }
        Err(err) => {
            print_stage_error("gender split", &err);
            export.add_failure("gender split", &err);
        }
    }

    // Model 3: senior subgroup from the seniority median split
    match senior_subset(&prepared).and_then(|senior| {
        print_info(&format!("Senior subgroup: {} respondents", senior.height()));
        fit_model(&senior, &senior_work_burnout_model(), &config)
    }) {
        Ok(fit) => {
            display_model(&fit);
            export.models.push(fit);
        }
        Err(err) => {
            print_stage_error("senior work-burnout model", &err);
            export.add_failure("senior work-burnout model", &err);
        }
    }

    Ok(prepared)
}
