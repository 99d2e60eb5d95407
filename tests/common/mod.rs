//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Build a deterministic 160-respondent survey dataset.
///
/// Respondents come in 32 blocks of 5 with identical covariates inside a
/// block. The five block bits drive gender, the three varying pain sites
/// and the seniority split, and every covariate is built from a distinct
/// combination of those bits, so each regression design stays full rank on
/// the whole cohort and on the female and senior subsets. Every block
/// contains both events and non-events for each outcome, so all three
/// model fits have a finite maximum-likelihood solution.
pub fn survey_dataframe() -> DataFrame {
    let mut gender = Vec::new();
    let mut age = Vec::new();
    let mut seniority = Vec::new();
    let mut work_hours = Vec::new();
    let mut sleep_hours = Vec::new();
    let mut bsrs = Vec::new();
    let mut i_score = Vec::new();
    let mut j_score = Vec::new();
    let mut diabetes = Vec::new();
    let mut hypertension = Vec::new();
    let mut sites: Vec<Vec<i32>> = vec![Vec::new(); 9];

    for block in 0i64..32 {
        let bit = |n: i64| ((block >> n) & 1) as i32;
        let (c0, c1, c2, c3, c4) = (bit(0), bit(1), bit(2), bit(3), bit(4));
        let events_j = 1 + (block % 4) as usize; // 1..4 of 5
        let events_b = 1 + (block % 3) as usize; // 1..3 of 5

        for row in 0..5usize {
            gender.push(1 + c0);
            age.push(30.0 + 4.0 * (c1 * c3) as f64);
            seniority.push(10.0 + 16.0 * c4 as f64 + 2.0 * (c1 * c4) as f64);
            work_hours.push(38.0 + 3.0 * (c1 * c2 * c3) as f64);
            sleep_hours.push(6.0 + 2.0 * (c0 * c1) as f64 + (c2 * c3 * c4) as f64);

            bsrs.push(if row < events_b { 12 } else { 3 });
            i_score.push(if row < 3 { 55.0 } else { 20.0 });
            j_score.push(if row < events_j { 50.0 } else { 20.0 });

            diabetes.push(c1 ^ c2);
            hypertension.push(c2 ^ c3);

            // Trunk: neck, upper_back, lower_back; upper ext: shoulders,
            // elbows, wrists; lower ext: hips, knees, ankles
            sites[0].push(c1); // neck
            sites[1].push(c2); // shoulders
            sites[2].push(0); // upper_back
            sites[3].push(0); // elbows
            sites[4].push(0); // lower_back
            sites[5].push(0); // wrists
            sites[6].push(c3); // hips
            sites[7].push(0); // knees
            sites[8].push(0); // ankles
        }
    }

    df! {
        "gender" => gender,
        "age" => age,
        "seniority" => seniority,
        "work_hours" => work_hours,
        "sleep_hours" => sleep_hours,
        "bsrs" => bsrs,
        "i_score" => i_score,
        "j_score" => j_score,
        "diabetes" => diabetes,
        "hypertension" => hypertension,
        "neck" => sites[0].clone(),
        "shoulders" => sites[1].clone(),
        "upper_back" => sites[2].clone(),
        "elbows" => sites[3].clone(),
        "lower_back" => sites[4].clone(),
        "wrists" => sites[5].clone(),
        "hips" => sites[6].clone(),
        "knees" => sites[7].clone(),
        "ankles" => sites[8].clone(),
    }
    .unwrap()
}

/// Run the fixture through recoding and region flagging.
pub fn enriched_dataframe() -> DataFrame {
    let df = survey_dataframe();
    let recoded = ergostat::pipeline::recode_scores(&df).unwrap();
    ergostat::pipeline::flag_regions(&recoded).unwrap()
}

/// Write a DataFrame to a temporary CSV file, returning the guard and path.
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("survey.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}
