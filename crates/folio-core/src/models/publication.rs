use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::locale::LocalizedString;
use crate::models::issue::AccessStatus;
use crate::models::submission::SubmissionStatus;

/// Controlled-vocabulary kind attached to a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vocabulary {
    Keyword,
    Subject,
    Discipline,
}

impl std::fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Vocabulary::Keyword => "keyword",
            Vocabulary::Subject => "subject",
            Vocabulary::Discipline => "discipline",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Vocabulary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keyword" => Ok(Vocabulary::Keyword),
            "subject" => Ok(Vocabulary::Subject),
            "discipline" => Ok(Vocabulary::Discipline),
            other => Err(format!("unknown vocabulary kind: {other}")),
        }
    }
}

/// Versioned content bundle attached to a submission. Imports create
/// exactly one (version 1) per submission.
///
/// The title must end up non-empty in at least the journal's primary
/// locale; the importer copies the first available locale's title into the
/// primary locale when the source document lacks one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    pub id: i64,
    pub submission_id: i64,
    pub locale: String,
    pub section_id: i64,
    pub issue_id: i64,
    pub version: i32,
    /// Ordering within the issue; imports use the submission id.
    pub seq: i64,
    pub status: SubmissionStatus,
    pub date_published: NaiveDate,
    pub access_status: AccessStatus,
    pub title: LocalizedString,
    pub abstract_text: LocalizedString,
    /// `"{fpage}-{lpage}"`, only when both page numbers are present.
    pub pages: Option<String>,
    pub license_url: Option<String>,
    pub copyright_holder: LocalizedString,
    pub copyright_year: Option<i32>,
    pub doi: Option<String>,
}
