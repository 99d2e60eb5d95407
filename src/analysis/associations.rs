//! Association testing between pain regions and severity categories.
//!
//! Crosses every region flag against every severity band (a 3x3 grid of
//! contingency tables) and offers the parameterized per-site test against
//! the work-burnout band.

use anyhow::Result;
use polars::prelude::*;
use rayon::prelude::*;

use crate::error::PipelineError;
use crate::pipeline::schema::{self, SiteIndicator};
use crate::stats::contingency::{chi_square_test, ChiSquareTest};

/// The three severity-band columns crossed in the association grid.
pub const SEVERITY_BANDS: [&str; 3] = [schema::B_SCORE, schema::I_SCORE1, schema::J_SCORE1];

/// The three region-flag columns crossed in the association grid.
pub const REGION_FLAGS: [&str; 3] = [schema::GROUP1, schema::GROUP2, schema::GROUP3];

/// Run the full region x severity chi-square grid (9 tables).
///
/// Tables are independent, so the cross product is evaluated in parallel.
pub fn association_grid(df: &DataFrame) -> Result<Vec<ChiSquareTest>> {
    let pairs: Vec<(&str, &str)> = REGION_FLAGS
        .iter()
        .flat_map(|flag| SEVERITY_BANDS.iter().map(move |band| (*flag, *band)))
        .collect();

    pairs
        .par_iter()
        .map(|(flag, band)| chi_square_test(df, flag, band))
        .collect()
}

/// Cross one pain-site indicator against the work-burnout band.
///
/// The site is a typed selector, so the same function serves all nine
/// sites without duplicated per-field code.
pub fn site_association(df: &DataFrame, site: SiteIndicator) -> Result<ChiSquareTest> {
    chi_square_test(df, site.column(), schema::J_SCORE1)
}

/// Per-site test addressed by raw column name.
///
/// A name that is not one of the nine site indicators fails fast with an
/// unknown-field error instead of producing a wrong, silently-empty table.
pub fn site_association_by_name(df: &DataFrame, name: &str) -> Result<ChiSquareTest> {
    let site: SiteIndicator = name.parse().map_err(|_| PipelineError::MissingField {
        field: name.to_string(),
        stage: "site association",
    })?;
    site_association(df, site)
}

/// Run the per-site test for every site in instrument order.
pub fn all_site_associations(df: &DataFrame) -> Result<Vec<ChiSquareTest>> {
    SiteIndicator::ALL
        .par_iter()
        .map(|site| site_association(df, *site))
        .collect()
}
