//! Integration tests for the full derivation pipeline

use ergostat::pipeline::*;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn column_i32(df: &DataFrame, name: &str) -> Vec<Option<i32>> {
    df.column(name).unwrap().i32().unwrap().into_iter().collect()
}

#[test]
fn test_full_pipeline_appends_all_derived_columns() {
    let mut df = survey_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);

    let (raw, rows, _cols, _mem) = load_dataset(&csv_path, 100).unwrap();
    assert_eq!(rows, 160);

    let recoded = recode_scores(&raw).unwrap();
    let regions = flag_regions(&recoded).unwrap();
    let prepared = derive_outcomes(&regions).unwrap();

    for derived in [
        "b_score",
        "i_score1",
        "j_score1",
        "group1",
        "group2",
        "group3",
        "bgroup",
        "igroup",
        "jgroup",
        "seniority_cat",
    ] {
        assert!(
            prepared.column(derived).is_ok(),
            "missing derived column '{}'",
            derived
        );
    }

    // Row identity preserved: every stage appends, never drops
    assert_eq!(prepared.height(), raw.height());

    // Source columns survive untouched
    for source in ["bsrs", "i_score", "j_score", "neck", "gender"] {
        assert!(prepared.column(source).is_ok());
    }
}

#[test]
fn test_end_to_end_respondent_scenario() {
    // BSRS-5 = 12, personal burnout 55, work burnout 50, no pain anywhere
    let df = df! {
        "gender" => [1i32],
        "age" => [30.0f64],
        "seniority" => [24.0f64],
        "work_hours" => [40.0f64],
        "sleep_hours" => [7.0f64],
        "bsrs" => [12i32],
        "i_score" => [55.0f64],
        "j_score" => [50.0f64],
        "diabetes" => [0i32],
        "hypertension" => [0i32],
        "neck" => [0i32],
        "shoulders" => [0i32],
        "upper_back" => [0i32],
        "elbows" => [0i32],
        "lower_back" => [0i32],
        "wrists" => [0i32],
        "hips" => [0i32],
        "knees" => [0i32],
        "ankles" => [0i32],
    }
    .unwrap();

    let prepared = derive_outcomes(&flag_regions(&recode_scores(&df).unwrap()).unwrap()).unwrap();

    assert_eq!(column_i32(&prepared, "b_score"), vec![Some(3)]);
    assert_eq!(column_i32(&prepared, "i_score1"), vec![Some(1)]);
    assert_eq!(column_i32(&prepared, "j_score1"), vec![Some(1)]);
    assert_eq!(column_i32(&prepared, "group1"), vec![Some(0)]);
    assert_eq!(column_i32(&prepared, "group2"), vec![Some(0)]);
    assert_eq!(column_i32(&prepared, "group3"), vec![Some(0)]);
    // b_score 3 > 2, both burnout bands above zero
    assert_eq!(column_i32(&prepared, "bgroup"), vec![Some(1)]);
    assert_eq!(column_i32(&prepared, "igroup"), vec![Some(1)]);
    assert_eq!(column_i32(&prepared, "jgroup"), vec![Some(1)]);
}

#[test]
fn test_gender_split_partitions_fixture() {
    let prepared = derive_outcomes(&enriched_dataframe()).unwrap();
    let (male, female) = split_by_gender(&prepared).unwrap();

    assert_eq!(male.height() + female.height(), prepared.height());
    assert_eq!(male.height(), 80);
    assert_eq!(female.height(), 80);
}

#[test]
fn test_senior_subset_respects_median_boundary() {
    let prepared = derive_outcomes(&enriched_dataframe()).unwrap();
    let senior = senior_subset(&prepared).unwrap();

    // Senior blocks have seniority 26 or 28 months, junior blocks 10
    assert_eq!(senior.height(), 80);

    let seniorities = numeric_column(&senior, "seniority").unwrap();
    assert!(seniorities.iter().all(|s| s.unwrap() >= 22.0));
}

#[test]
fn test_stages_do_not_mutate_their_input() {
    let raw = survey_dataframe();
    let before = raw.clone();

    let recoded = recode_scores(&raw).unwrap();
    let _regions = flag_regions(&recoded).unwrap();

    // The raw dataset still has its original shape and no derived columns
    assert_eq!(raw.shape(), before.shape());
    assert!(raw.column("b_score").is_err());
    assert!(recoded.column("group1").is_err());
}

#[test]
fn test_roundtrip_through_csv_preserves_bands() {
    let mut df = survey_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);
    let (raw, _, _, _) = load_dataset(&csv_path, 100).unwrap();

    let direct = recode_scores(&survey_dataframe()).unwrap();
    let loaded = recode_scores(&raw).unwrap();

    assert_eq!(
        column_i32(&direct, "b_score"),
        column_i32(&loaded, "b_score")
    );
}
