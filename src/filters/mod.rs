mod redundancy;
mod undersampling;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::Blueprint;

pub use redundancy::remove_consecutive_duplicates;
pub use undersampling::undersample;

/// The post-processing applied to a blueprint before it is handed back from a single lookup.
///
/// Filters only ever rewrite the point sequence; author and name pass through untouched.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlueprintFilter {
    /// Returns the blueprint as stored.
    #[default]
    Identity,
    /// Drops points equal to their immediate predecessor.
    Redundancy,
    /// Keeps every other point, starting with the first.
    Undersampling,
}

impl BlueprintFilter {
    pub const ALL: [BlueprintFilter; 3] = [
        BlueprintFilter::Identity,
        BlueprintFilter::Redundancy,
        BlueprintFilter::Undersampling,
    ];

    pub fn apply(&self, blueprint: Blueprint) -> Blueprint {
        match self {
            BlueprintFilter::Identity => blueprint,
            BlueprintFilter::Redundancy => blueprint.map_points(remove_consecutive_duplicates),
            BlueprintFilter::Undersampling => blueprint.map_points(undersample),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlueprintFilter::Identity => "identity",
            BlueprintFilter::Redundancy => "redundancy",
            BlueprintFilter::Undersampling => "undersampling",
        }
    }
}

impl fmt::Display for BlueprintFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown blueprint filter '{0}', expected one of: identity, redundancy, undersampling")]
pub struct UnknownFilter(String);

impl FromStr for BlueprintFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownFilter(s.to_owned()))
    }
}
