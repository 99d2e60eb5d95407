//! Anatomical pain-region aggregation.
//!
//! Collapses the nine Nordic-questionnaire site indicators into three
//! region flags: trunk, upper extremity, lower extremity. A region flag is
//! 1 iff any of its three sites reports pain.

use anyhow::Result;
use polars::prelude::*;

use super::schema::{self, integer_column, require_columns, SiteIndicator};

/// The three anatomical regions, each aggregating three pain sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Neck, upper back, lower back
    Trunk,
    /// Shoulders, elbows, wrists
    UpperExtremity,
    /// Hips, knees, ankles
    LowerExtremity,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Trunk, Region::UpperExtremity, Region::LowerExtremity];

    /// Derived flag column name for this region.
    pub fn column(self) -> &'static str {
        match self {
            Region::Trunk => schema::GROUP1,
            Region::UpperExtremity => schema::GROUP2,
            Region::LowerExtremity => schema::GROUP3,
        }
    }

    /// The three site indicators this region aggregates.
    pub fn sites(self) -> [SiteIndicator; 3] {
        match self {
            Region::Trunk => [
                SiteIndicator::Neck,
                SiteIndicator::UpperBack,
                SiteIndicator::LowerBack,
            ],
            Region::UpperExtremity => [
                SiteIndicator::Shoulders,
                SiteIndicator::Elbows,
                SiteIndicator::Wrists,
            ],
            Region::LowerExtremity => [
                SiteIndicator::Hips,
                SiteIndicator::Knees,
                SiteIndicator::Ankles,
            ],
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// Append the three region flags to the dataset.
///
/// For each region: 1 if any site is 1, 0 if all three sites are observed 0,
/// null if some sites are missing and none reports pain.
pub fn flag_regions(df: &DataFrame) -> Result<DataFrame> {
    let site_names: Vec<&str> = SiteIndicator::ALL.iter().map(|s| s.column()).collect();
    require_columns(df, "regions", &site_names)?;

    let mut augmented = df.clone();
    for region in Region::ALL {
        let sites = region.sites();
        let a = integer_column(df, sites[0].column())?;
        let b = integer_column(df, sites[1].column())?;
        let c = integer_column(df, sites[2].column())?;

        let flags: Vec<Option<i32>> = a
            .iter()
            .zip(b.iter())
            .zip(c.iter())
            .map(|((a, b), c)| region_flag([*a, *b, *c]))
            .collect();

        augmented.with_column(Column::new(region.column().into(), flags))?;
    }
    Ok(augmented)
}

/// OR three binary site indicators into one region flag.
fn region_flag(sites: [Option<i64>; 3]) -> Option<i32> {
    if sites.iter().any(|s| *s == Some(1)) {
        Some(1)
    } else if sites.iter().all(|s| s.is_some()) {
        Some(0)
    } else {
        None
    }
}
