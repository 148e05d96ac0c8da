//! Naming of persisted route artifacts.
//!
//! Each routing response is stored as
//! `route_{pair}_{time_of_day}_{preference}.geojson`.  The aggregation stage
//! recovers all three identifiers from the file stem, which is why config
//! labels may not contain `_`.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, PairId};

const PREFIX: &str = "route";

/// File extension of route artifacts (without the dot).
pub const ARTIFACT_EXTENSION: &str = "geojson";

/// The identifiers encoded in a route artifact's name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactKey {
    pub pair_id:     PairId,
    pub time_of_day: String,
    pub preference:  String,
}

impl ArtifactKey {
    pub fn new(pair_id: PairId, time_of_day: &str, preference: &str) -> Self {
        Self {
            pair_id,
            time_of_day: time_of_day.to_string(),
            preference:  preference.to_string(),
        }
    }

    /// `route_{pair}_{time}_{preference}`
    pub fn stem(&self) -> String {
        self.to_string()
    }

    /// Stem plus the `.geojson` extension.
    pub fn file_name(&self) -> String {
        format!("{self}.{ARTIFACT_EXTENSION}")
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}_{}_{}_{}", self.pair_id, self.time_of_day, self.preference)
    }
}

impl FromStr for ArtifactKey {
    type Err = CoreError;

    /// Parse a file stem produced by [`ArtifactKey::stem`].
    fn from_str(stem: &str) -> Result<Self, Self::Err> {
        let bad = || CoreError::ArtifactName(stem.to_string());

        let parts: Vec<&str> = stem.split('_').collect();
        let [prefix, pair, time_of_day, preference] = parts.as_slice() else {
            return Err(bad());
        };
        if *prefix != PREFIX || time_of_day.is_empty() || preference.is_empty() {
            return Err(bad());
        }
        let pair_id = pair.parse::<PairId>().map_err(|_| bad())?;
        Ok(ArtifactKey::new(pair_id, time_of_day, preference))
    }
}
