//! Clinical score recoding.
//!
//! Applies the validated cut-points to the raw instrument totals:
//! BSRS-5 into four depression-severity bands, and the two Copenhagen
//! Burnout Inventory scores into three burnout bands each. The banding
//! functions are total: anything outside the defined ranges comes back as
//! `Unclassified` instead of silently defaulting to a band.

use anyhow::Result;
use polars::prelude::*;

use super::schema::{self, numeric_column, require_columns};
use crate::error::PipelineError;

/// BSRS-5 depression severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepressionBand {
    /// Total 0-5: no meaningful distress
    Normal,
    /// Total 6-9: mild distress
    Mild,
    /// Total 10-14: moderate distress
    Moderate,
    /// Total >= 15: severe distress
    Severe,
    /// Value outside the instrument's range (e.g. negative total)
    Unclassified,
}

impl DepressionBand {
    /// Numeric code used in the derived `b_score` column (1-4).
    pub fn code(self) -> Option<i32> {
        match self {
            DepressionBand::Normal => Some(1),
            DepressionBand::Mild => Some(2),
            DepressionBand::Moderate => Some(3),
            DepressionBand::Severe => Some(4),
            DepressionBand::Unclassified => None,
        }
    }
}

/// Copenhagen Burnout Inventory band (personal or work-related).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnoutBand {
    /// Below the lower cut-point
    Low,
    /// Between the cut-points inclusive
    Moderate,
    /// Above the upper cut-point
    High,
    /// Value outside the instrument's range
    Unclassified,
}

impl BurnoutBand {
    /// Numeric code used in the derived band columns (0-2).
    pub fn code(self) -> Option<i32> {
        match self {
            BurnoutBand::Low => Some(0),
            BurnoutBand::Moderate => Some(1),
            BurnoutBand::High => Some(2),
            BurnoutBand::Unclassified => None,
        }
    }
}

/// Band a BSRS-5 total: [0-5] -> 1, [6-9] -> 2, [10-14] -> 3, [>= 15] -> 4.
pub fn depression_band(bsrs: f64) -> DepressionBand {
    if (0.0..=5.0).contains(&bsrs) {
        DepressionBand::Normal
    } else if (6.0..=9.0).contains(&bsrs) {
        DepressionBand::Mild
    } else if (10.0..=14.0).contains(&bsrs) {
        DepressionBand::Moderate
    } else if bsrs >= 15.0 {
        DepressionBand::Severe
    } else {
        DepressionBand::Unclassified
    }
}

/// Band a personal burnout score: <50 -> 0, [50-70] -> 1, >70 -> 2.
pub fn personal_burnout_band(score: f64) -> BurnoutBand {
    if (0.0..50.0).contains(&score) {
        BurnoutBand::Low
    } else if (50.0..=70.0).contains(&score) {
        BurnoutBand::Moderate
    } else if score > 70.0 {
        BurnoutBand::High
    } else {
        BurnoutBand::Unclassified
    }
}

/// Band a work burnout score: <45 -> 0, [45-60] -> 1, >60 -> 2.
pub fn work_burnout_band(score: f64) -> BurnoutBand {
    if (0.0..45.0).contains(&score) {
        BurnoutBand::Low
    } else if (45.0..=60.0).contains(&score) {
        BurnoutBand::Moderate
    } else if score > 60.0 {
        BurnoutBand::High
    } else {
        BurnoutBand::Unclassified
    }
}

/// Recode the three raw scores into categorical severity columns.
///
/// Returns a new dataset with `b_score`, `i_score1` and `j_score1`
/// appended; the source columns are preserved unchanged. Missing scores
/// stay missing in the derived column. A non-missing value outside every
/// band fails fast with `UnclassifiedValue` naming the field and row.
pub fn recode_scores(df: &DataFrame) -> Result<DataFrame> {
    require_columns(df, "recode", &[schema::BSRS, schema::I_SCORE, schema::J_SCORE])?;

    let b = band_column(df, schema::BSRS, schema::B_SCORE, |v| depression_band(v).code())?;
    let i = band_column(df, schema::I_SCORE, schema::I_SCORE1, |v| {
        personal_burnout_band(v).code()
    })?;
    let j = band_column(df, schema::J_SCORE, schema::J_SCORE1, |v| {
        work_burnout_band(v).code()
    })?;

    let mut recoded = df.clone();
    recoded.with_column(b)?;
    recoded.with_column(i)?;
    recoded.with_column(j)?;
    Ok(recoded)
}

/// Apply a banding function over one score column, producing the derived column.
fn band_column(
    df: &DataFrame,
    source: &str,
    derived: &str,
    band: impl Fn(f64) -> Option<i32>,
) -> Result<Column> {
    let values = numeric_column(df, source)?;

    let mut codes: Vec<Option<i32>> = Vec::with_capacity(values.len());
    for (row, value) in values.into_iter().enumerate() {
        match value {
            None => codes.push(None),
            Some(v) => match band(v) {
                Some(code) => codes.push(Some(code)),
                None => {
                    return Err(PipelineError::UnclassifiedValue {
                        field: source.to_string(),
                        row,
                        value: v,
                    }
                    .into())
                }
            },
        }
    }

    Ok(Column::new(derived.into(), codes))
}
