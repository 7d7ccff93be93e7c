use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::locale::LocalizedString;

/// Reader access level for issues and publications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    #[default]
    Open,
    Subscription,
}

impl std::fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AccessStatus::Open => "open",
            AccessStatus::Subscription => "subscription",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AccessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(AccessStatus::Open),
            "subscription" => Ok(AccessStatus::Subscription),
            other => Err(format!("unknown access status: {other}")),
        }
    }
}

/// A journal's volume/number grouping of articles.
///
/// At most one published issue exists per (journal, volume, number); the
/// importer reuses a match and only creates when none exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub journal_id: i64,
    pub volume: i32,
    pub number: i32,
    pub year: i32,
    pub title: LocalizedString,
    pub date_published: NaiveDate,
    pub published: bool,
    pub current: bool,
    pub access_status: AccessStatus,
    pub show_volume: bool,
    pub show_number: bool,
    pub show_year: bool,
    pub show_title: bool,
}

impl Issue {
    /// Display identification, e.g. `Vol. 4, No. 2 (2019)`.
    pub fn identification(&self) -> String {
        format!("Vol. {}, No. {} ({})", self.volume, self.number, self.year)
    }
}
