//! Query parameter enums for catalog operations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::AnimangaError;

/// Ranking dimension for `/top/anime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopAnimeFilter {
    Airing,
    Upcoming,
    #[default]
    ByPopularity,
    Favorite,
}

impl TopAnimeFilter {
    /// Value of the upstream `filter` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Airing => "airing",
            Self::Upcoming => "upcoming",
            Self::ByPopularity => "bypopularity",
            Self::Favorite => "favorite",
        }
    }
}

impl fmt::Display for TopAnimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopAnimeFilter {
    type Err = AnimangaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "airing" => Ok(Self::Airing),
            "upcoming" => Ok(Self::Upcoming),
            "bypopularity" => Ok(Self::ByPopularity),
            "favorite" => Ok(Self::Favorite),
            other => Err(AnimangaError::InvalidInput(format!(
                "unknown anime filter: {other}"
            ))),
        }
    }
}

/// Ranking dimension for `/top/manga`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopMangaFilter {
    Publishing,
    Upcoming,
    #[default]
    ByPopularity,
    Favorite,
}

impl TopMangaFilter {
    /// Value of the upstream `filter` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publishing => "publishing",
            Self::Upcoming => "upcoming",
            Self::ByPopularity => "bypopularity",
            Self::Favorite => "favorite",
        }
    }
}

impl fmt::Display for TopMangaFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopMangaFilter {
    type Err = AnimangaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "publishing" => Ok(Self::Publishing),
            "upcoming" => Ok(Self::Upcoming),
            "bypopularity" => Ok(Self::ByPopularity),
            "favorite" => Ok(Self::Favorite),
            other => Err(AnimangaError::InvalidInput(format!(
                "unknown manga filter: {other}"
            ))),
        }
    }
}

/// Broadcast season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Season containing a zero-based month (January = 0).
    ///
    /// Months past 11 are treated as fall.
    pub fn from_month0(month0: u32) -> Self {
        match month0 {
            0..=2 => Self::Winter,
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            _ => Self::Fall,
        }
    }

    /// Season a given instant falls in.
    pub fn at(time: DateTime<Utc>) -> Self {
        Self::from_month0(time.month0())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = AnimangaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "winter" => Ok(Self::Winter),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" => Ok(Self::Fall),
            other => Err(AnimangaError::InvalidInput(format!("unknown season: {other}"))),
        }
    }
}
