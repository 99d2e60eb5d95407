//! Survey dataset schema: column names and typed field access.
//!
//! The input schema is an external contract - field names and types are
//! fixed by the survey instrument. This module centralizes the names and
//! offers presence checks plus null-aware numeric extraction so stages can
//! fail fast with a clear error instead of producing silently-empty output.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use crate::error::PipelineError;

// Raw survey columns
pub const GENDER: &str = "gender";
pub const AGE: &str = "age";
pub const SENIORITY: &str = "seniority";
pub const WORK_HOURS: &str = "work_hours";
pub const SLEEP_HOURS: &str = "sleep_hours";
pub const BSRS: &str = "bsrs";
pub const I_SCORE: &str = "i_score";
pub const J_SCORE: &str = "j_score";
pub const DIABETES: &str = "diabetes";
pub const HYPERTENSION: &str = "hypertension";

// Derived columns
pub const B_SCORE: &str = "b_score";
pub const I_SCORE1: &str = "i_score1";
pub const J_SCORE1: &str = "j_score1";
pub const GROUP1: &str = "group1";
pub const GROUP2: &str = "group2";
pub const GROUP3: &str = "group3";
pub const BGROUP: &str = "bgroup";
pub const IGROUP: &str = "igroup";
pub const JGROUP: &str = "jgroup";
pub const SENIORITY_CAT: &str = "seniority_cat";

/// The four continuous variables summarized by the descriptive step.
pub const CONTINUOUS_FIELDS: [&str; 4] = [SENIORITY, AGE, WORK_HOURS, SLEEP_HOURS];

/// The nine binary pain-site indicators of the Nordic questionnaire.
///
/// A tagged enum rather than raw strings so the parameterized per-site
/// association test can only ever be asked about a real site column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteIndicator {
    Neck,
    Shoulders,
    UpperBack,
    Elbows,
    LowerBack,
    Wrists,
    Hips,
    Knees,
    Ankles,
}

impl SiteIndicator {
    /// All nine sites in instrument order.
    pub const ALL: [SiteIndicator; 9] = [
        SiteIndicator::Neck,
        SiteIndicator::Shoulders,
        SiteIndicator::UpperBack,
        SiteIndicator::Elbows,
        SiteIndicator::LowerBack,
        SiteIndicator::Wrists,
        SiteIndicator::Hips,
        SiteIndicator::Knees,
        SiteIndicator::Ankles,
    ];

    /// Dataset column name for this site.
    pub fn column(self) -> &'static str {
        match self {
            SiteIndicator::Neck => "neck",
            SiteIndicator::Shoulders => "shoulders",
            SiteIndicator::UpperBack => "upper_back",
            SiteIndicator::Elbows => "elbows",
            SiteIndicator::LowerBack => "lower_back",
            SiteIndicator::Wrists => "wrists",
            SiteIndicator::Hips => "hips",
            SiteIndicator::Knees => "knees",
            SiteIndicator::Ankles => "ankles",
        }
    }
}

impl std::fmt::Display for SiteIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl std::str::FromStr for SiteIndicator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SiteIndicator::ALL
            .into_iter()
            .find(|site| site.column() == s)
            .ok_or_else(|| format!("'{}' is not a pain-site indicator column", s))
    }
}

/// Verify that every named column exists in the dataset schema.
///
/// Stages call this before computing so a misnamed field fails with a
/// `MissingField` error naming the stage, not a wrong empty result.
pub fn require_columns(df: &DataFrame, stage: &'static str, names: &[&str]) -> Result<()> {
    for name in names {
        if df.column(name).is_err() {
            return Err(PipelineError::MissingField {
                field: name.to_string(),
                stage,
            }
            .into());
        }
    }
    Ok(())
}

/// Extract a column as null-aware `f64` values, casting from any numeric type.
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let col = df.column(name)?.cast(&DataType::Float64)?;
    Ok(col.f64()?.into_iter().collect())
}

/// Extract a column as null-aware `i64` values, casting from any integer type.
pub fn integer_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let col = df.column(name)?.cast(&DataType::Int64)?;
    Ok(col.i64()?.into_iter().collect())
}
