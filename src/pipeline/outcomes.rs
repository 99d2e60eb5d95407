//! Binary risk outcomes and subgroup projections.
//!
//! Thresholds the severity bands into high-risk flags for the regression
//! models, dichotomizes seniority at its empirical median, and produces
//! the gender/seniority subgroup datasets as filtered projections of the
//! enriched record set (never mutations of it).

use anyhow::Result;
use polars::prelude::*;

use super::schema::{self, integer_column, numeric_column, require_columns};
use crate::error::PipelineError;

/// Empirical median seniority of the study population, in months.
pub const SENIORITY_MEDIAN_MONTHS: f64 = 22.0;

/// Gender code for male respondents (the regression reference level).
pub const GENDER_MALE: i64 = 1;

/// Append the binary high-risk outcome flags and the seniority split.
///
/// - `bgroup` = 1 iff `b_score` > 2 (moderate or severe depression risk)
/// - `igroup` = 1 iff `i_score1` > 0 (any personal burnout)
/// - `jgroup` = 1 iff `j_score1` > 0 (any work burnout)
/// - `seniority_cat` = 1 if seniority < 22 months, 2 if >= 22
pub fn derive_outcomes(df: &DataFrame) -> Result<DataFrame> {
    require_columns(
        df,
        "outcomes",
        &[schema::B_SCORE, schema::I_SCORE1, schema::J_SCORE1, schema::SENIORITY],
    )?;

    let mut prepared = df.clone();
    prepared.with_column(threshold_column(df, schema::B_SCORE, schema::BGROUP, 2)?)?;
    prepared.with_column(threshold_column(df, schema::I_SCORE1, schema::IGROUP, 0)?)?;
    prepared.with_column(threshold_column(df, schema::J_SCORE1, schema::JGROUP, 0)?)?;

    let seniority = numeric_column(df, schema::SENIORITY)?;
    let cat: Vec<Option<i32>> = seniority
        .into_iter()
        .map(|v| v.map(|months| if months < SENIORITY_MEDIAN_MONTHS { 1 } else { 2 }))
        .collect();
    prepared.with_column(Column::new(schema::SENIORITY_CAT.into(), cat))?;

    Ok(prepared)
}

/// Binary flag: 1 iff the band code exceeds `cut`, null stays null.
fn threshold_column(df: &DataFrame, source: &str, derived: &str, cut: i64) -> Result<Column> {
    let values = integer_column(df, source)?;
    let flags: Vec<Option<i32>> = values
        .into_iter()
        .map(|v| v.map(|code| i32::from(code > cut)))
        .collect();
    Ok(Column::new(derived.into(), flags))
}

/// Partition the dataset into male and female projections.
///
/// Male is the gender code 1 (the reference level); female is every other
/// observed gender code. Rows with missing gender belong to neither subset.
pub fn split_by_gender(df: &DataFrame) -> Result<(DataFrame, DataFrame)> {
    require_columns(df, "gender split", &[schema::GENDER])?;
    let gender = integer_column(df, schema::GENDER)?;

    let male_mask: BooleanChunked = gender
        .iter()
        .map(|v| Some(*v == Some(GENDER_MALE)))
        .collect();
    let female_mask: BooleanChunked = gender
        .iter()
        .map(|v| Some(matches!(v, Some(code) if *code != GENDER_MALE)))
        .collect();

    let male = df.filter(&male_mask)?;
    let female = df.filter(&female_mask)?;
    Ok((male, female))
}

/// Project the senior subgroup (`seniority_cat` = 2, at or above the median).
pub fn senior_subset(df: &DataFrame) -> Result<DataFrame> {
    require_columns(df, "seniority split", &[schema::SENIORITY_CAT])?;
    let cat = integer_column(df, schema::SENIORITY_CAT)?;

    let mask: BooleanChunked = cat.iter().map(|v| Some(*v == Some(2))).collect();
    let senior = df.filter(&mask)?;

    if senior.height() == 0 {
        return Err(PipelineError::EmptySubgroup {
            subgroup: "seniority_cat=2".to_string(),
            model: "senior work-burnout model".to_string(),
        }
        .into());
    }
    Ok(senior)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banded_frame() -> DataFrame {
        df! {
            "b_score" => [1i32, 2, 3, 4],
            "i_score1" => [0i32, 1, 0, 2],
            "j_score1" => [0i32, 0, 1, 2],
            "seniority" => [10.0f64, 21.9, 22.0, 60.0],
            "gender" => [1i32, 2, 1, 2],
        }
        .unwrap()
    }

    #[test]
    fn test_outcome_thresholds() {
        let prepared = derive_outcomes(&banded_frame()).unwrap();

        let b: Vec<Option<i32>> = prepared.column("bgroup").unwrap().i32().unwrap()
            .into_iter().collect();
        let i: Vec<Option<i32>> = prepared.column("igroup").unwrap().i32().unwrap()
            .into_iter().collect();
        let j: Vec<Option<i32>> = prepared.column("jgroup").unwrap().i32().unwrap()
            .into_iter().collect();

        // bgroup: b_score > 2
        assert_eq!(b, vec![Some(0), Some(0), Some(1), Some(1)]);
        // igroup/jgroup: any burnout at all
        assert_eq!(i, vec![Some(0), Some(1), Some(0), Some(1)]);
        assert_eq!(j, vec![Some(0), Some(0), Some(1), Some(1)]);
    }

    #[test]
    fn test_seniority_median_split_boundary() {
        let prepared = derive_outcomes(&banded_frame()).unwrap();
        let cat: Vec<Option<i32>> = prepared.column("seniority_cat").unwrap().i32().unwrap()
            .into_iter().collect();

        // Exactly 22 months lands in category 2
        assert_eq!(cat, vec![Some(1), Some(1), Some(2), Some(2)]);
    }

    #[test]
    fn test_gender_split_is_a_partition() {
        let prepared = derive_outcomes(&banded_frame()).unwrap();
        let (male, female) = split_by_gender(&prepared).unwrap();

        assert_eq!(male.height() + female.height(), prepared.height());
        assert_eq!(male.height(), 2);
        assert_eq!(female.height(), 2);

        // Disjoint: every male row has gender 1, every female row does not
        let male_genders: Vec<Option<i64>> =
            integer_column(&male, "gender").unwrap();
        assert!(male_genders.iter().all(|g| *g == Some(1)));
        let female_genders: Vec<Option<i64>> =
            integer_column(&female, "gender").unwrap();
        assert!(female_genders.iter().all(|g| *g == Some(2)));
    }

    #[test]
    fn test_senior_subset_filters_by_category() {
        let prepared = derive_outcomes(&banded_frame()).unwrap();
        let senior = senior_subset(&prepared).unwrap();
        assert_eq!(senior.height(), 2);
    }

    #[test]
    fn test_senior_subset_empty_is_an_error() {
        let df = df! {
            "b_score" => [1i32],
            "i_score1" => [0i32],
            "j_score1" => [0i32],
            "seniority" => [5.0f64],
            "gender" => [1i32],
        }
        .unwrap();
        let prepared = derive_outcomes(&df).unwrap();

        let err = senior_subset(&prepared).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_missing_band_stays_missing_in_outcome() {
        let df = df! {
            "b_score" => [Some(3i32), None],
            "i_score1" => [Some(1i32), None],
            "j_score1" => [Some(1i32), None],
            "seniority" => [Some(30.0f64), None],
            "gender" => [1i32, 2],
        }
        .unwrap();

        let prepared = derive_outcomes(&df).unwrap();
        let b: Vec<Option<i32>> = prepared.column("bgroup").unwrap().i32().unwrap()
            .into_iter().collect();
        assert_eq!(b, vec![Some(1), None]);
        let cat: Vec<Option<i32>> = prepared.column("seniority_cat").unwrap().i32().unwrap()
            .into_iter().collect();
        assert_eq!(cat, vec![Some(2), None]);
    }
}
