use serde::{Deserialize, Serialize};

use crate::locale::LocalizedString;
use crate::models::submission::WorkflowStage;

/// The journal content is imported into. Default permission values are used
/// when an article supplies no license/copyright data of its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    pub id: i64,
    /// URL path / slug, unique per installation.
    pub path: String,
    pub name: LocalizedString,
    pub primary_locale: String,
    pub default_license_url: Option<String>,
    pub default_copyright_holder: Option<String>,
    pub default_copyright_year: Option<i32>,
}

impl Journal {
    /// Journal name in its primary locale, or the first available one.
    pub fn display_name(&self) -> &str {
        self.name.localized(&self.primary_locale).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
}

/// Role a user group grants within a journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    SectionEditor,
    Author,
    Reviewer,
    Reader,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Manager => "manager",
            Role::SectionEditor => "section_editor",
            Role::Author => "author",
            Role::Reviewer => "reviewer",
            Role::Reader => "reader",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Role::Manager),
            "section_editor" => Ok(Role::SectionEditor),
            "author" => Ok(Role::Author),
            "reviewer" => Ok(Role::Reviewer),
            "reader" => Ok(Role::Reader),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A user group: a named role grant scoped to a journal, participating in
/// zero or more workflow stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserGroup {
    pub id: i64,
    pub journal_id: i64,
    pub role: Role,
    pub name: String,
    pub stages: Vec<WorkflowStage>,
}
