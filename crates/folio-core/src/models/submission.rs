use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Queued,
    Scheduled,
    Published,
    Declined,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubmissionStatus::Queued => "queued",
            SubmissionStatus::Scheduled => "scheduled",
            SubmissionStatus::Published => "published",
            SubmissionStatus::Declined => "declined",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(SubmissionStatus::Queued),
            "scheduled" => Ok(SubmissionStatus::Scheduled),
            "published" => Ok(SubmissionStatus::Published),
            "declined" => Ok(SubmissionStatus::Declined),
            other => Err(format!("unknown submission status: {other}")),
        }
    }
}

/// Editorial workflow stage a submission sits in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    #[default]
    Submission,
    Review,
    Copyediting,
    Production,
}

impl std::fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WorkflowStage::Submission => "submission",
            WorkflowStage::Review => "review",
            WorkflowStage::Copyediting => "copyediting",
            WorkflowStage::Production => "production",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for WorkflowStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submission" => Ok(WorkflowStage::Submission),
            "review" => Ok(WorkflowStage::Review),
            "copyediting" => Ok(WorkflowStage::Copyediting),
            "production" => Ok(WorkflowStage::Production),
            other => Err(format!("unknown workflow stage: {other}")),
        }
    }
}

/// The administrative envelope for one article's workflow state. Created as
/// a shell before any publication data exists; it is the unit rolled back
/// when an import fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub journal_id: i64,
    pub locale: String,
    pub status: SubmissionStatus,
    pub stage: WorkflowStage,
    /// Wizard step for in-progress submissions; imported articles are
    /// complete, i.e. 0.
    pub progress: u8,
    pub current_publication_id: Option<i64>,
    pub date_submitted: Option<NaiveDateTime>,
    pub last_modified: Option<NaiveDateTime>,
}
